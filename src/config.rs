/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 2/10/26
 ******************************************************************************/
use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_ASPECT, DEFAULT_REST_TIMEOUT, OUT_OF_BAND};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub(crate) client_secret: String,
    pub(crate) verify_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
    pub subscription: SubscriptionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    pub timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubscriptionSettings {
    pub callback_url: String,
    pub aspect: String,
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"client_id\":\"{}\",\"client_secret\":{},\"verify_token\":{}}}",
            self.client_id,
            redacted(&self.client_secret),
            redacted(&self.verify_token)
        )
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "null"
    } else {
        "\"[REDACTED]\""
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{},\"subscription\":{}}}",
            self.credentials, self.rest_api, self.subscription
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

impl fmt::Display for SubscriptionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"callback_url\":\"{}\",\"aspect\":\"{}\"}}",
            self.callback_url, self.aspect
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Reads every setting from `INSTAGRAM_*` environment variables.
    /// Unset credentials stay empty and are reported when an operation needs them.
    pub fn new() -> Self {
        Config {
            credentials: Credentials {
                client_id: get_env_or_default("INSTAGRAM_CLIENT_ID", String::new()),
                client_secret: get_env_or_default("INSTAGRAM_CLIENT_SECRET", String::new()),
                verify_token: get_env_or_default("INSTAGRAM_VERIFY_TOKEN", String::new()),
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default(
                    "INSTAGRAM_REST_BASE_URL",
                    String::from(DEFAULT_API_BASE_URL),
                ),
                timeout: get_env_or_default("INSTAGRAM_REST_TIMEOUT", DEFAULT_REST_TIMEOUT),
            },
            subscription: SubscriptionSettings {
                callback_url: get_env_or_default(
                    "INSTAGRAM_CALLBACK_URL",
                    String::from(OUT_OF_BAND),
                ),
                aspect: get_env_or_default("INSTAGRAM_ASPECT", String::from(DEFAULT_ASPECT)),
            },
        }
    }
}
