/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 3/10/26
 ******************************************************************************/
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind of object a subscription watches. Rendered as the `object` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    User,
    Tag,
    Location,
    Geography,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::User => "user",
            SubscriptionType::Tag => "tag",
            SubscriptionType::Location => "location",
            SubscriptionType::Geography => "geography",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(SubscriptionType::User),
            "tag" => Ok(SubscriptionType::Tag),
            "location" => Ok(SubscriptionType::Location),
            "geography" => Ok(SubscriptionType::Geography),
            other => Err(format!("unknown subscription object type: {other}")),
        }
    }
}

/// Ids arrive as JSON strings or numbers depending on the endpoint; both become a `String`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}

pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}

/// Envelope metadata present on every platform response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A registered subscription as the platform reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionData {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub radius: Option<u32>,
}

impl SubscriptionData {
    /// The `object` field parsed into a known type, if it is one.
    pub fn subscription_type(&self) -> Option<SubscriptionType> {
        self.object.as_deref().and_then(|o| o.parse().ok())
    }
}

/// Result of a successful create call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionCreationResponse {
    #[serde(default)]
    pub meta: Meta,
    pub data: SubscriptionData,
}

impl SubscriptionCreationResponse {
    pub fn id(&self) -> &str {
        &self.data.id
    }
}

/// Result of listing the subscriptions registered for a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionResponse {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub data: Vec<SubscriptionData>,
}
