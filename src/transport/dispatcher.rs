/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 4/10/26
 ******************************************************************************/
use crate::error::BoxError;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

/// A fully assembled call: verb, absolute URL and flat parameter maps.
/// GET and DELETE carry their parameters in `query`, POST in `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: HashMap<String, String>,
    pub body: HashMap<String, String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: HashMap::new(),
            body: HashMap::new(),
        }
    }

    pub fn add_query_parameter(&mut self, key: &str, value: impl Into<String>) {
        self.query.insert(key.to_string(), value.into());
    }

    pub fn add_body_parameter(&mut self, key: &str, value: impl Into<String>) {
        self.body.insert(key.to_string(), value.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Performs the authenticated HTTP round trip for an [`ApiRequest`].
///
/// Implementations only move bytes: any status code, including errors, is
/// returned as a [`RawResponse`]. The `Err` side is reserved for failures
/// where no response was obtained (connect, DNS, timeout, body read).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, BoxError>;
}
