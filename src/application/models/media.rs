/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 3/10/26
 ******************************************************************************/
use crate::application::models::subscription::{optional_string_or_number, string_or_number, Meta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recent media posted inside a geography subscription's area.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeographyMediaFeed {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub data: Vec<MediaFeedData>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Cursor information for fetching the next page of a feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub next_url: Option<String>,
    pub next_max_id: Option<String>,
    pub next_min_id: Option<String>,
    pub min_tag_id: Option<String>,
    pub next_max_tag_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaFeedData {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub link: Option<String>,
    /// Unix seconds, sent by the platform as a string.
    pub created_time: Option<String>,
    pub filter: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<Location>,
    pub user: Option<MediaUser>,
    pub caption: Option<Caption>,
    pub likes: Option<Counter>,
    pub comments: Option<Counter>,
    #[serde(default)]
    pub images: HashMap<String, ImageData>,
    /// Fields this crate does not model, kept as received.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl MediaFeedData {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.created_time.as_deref()?.parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: Option<serde_json::Value>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Caption {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    pub text: Option<String>,
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Counter {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageData {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
