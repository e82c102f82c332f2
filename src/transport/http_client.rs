/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 5/10/26
 ******************************************************************************/
use crate::config::Config;
use crate::error::BoxError;
use crate::transport::dispatcher::{ApiRequest, Dispatcher, RawResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default [`Dispatcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct InstagramHttpClient {
    client: Client,
}

impl InstagramHttpClient {
    /// Creates a new instance of the InstagramHttpClient.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Deadline applied to every request sent through this client.
    ///
    /// # Returns
    ///
    /// A Result containing the InstagramHttpClient instance or an error.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("ig-realtime/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(Duration::from_secs(config.rest_api.timeout))
    }
}

#[async_trait]
impl Dispatcher for InstagramHttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, BoxError> {
        debug!("Sending {} request to {}", request.method, request.url);

        let builder = match request.method {
            Method::POST => self.client.post(&request.url).form(&request.body),
            method => self
                .client
                .request(method, &request.url)
                .query(&request.query),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send request: {:?}", e);
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body);

        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests_instagram_http_client {
    use super::*;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn create_client() -> InstagramHttpClient {
        InstagramHttpClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_query_parameters() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/subscriptions/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("client_id".into(), "abc".into()),
                Matcher::UrlEncoded("client_secret".into(), "shh".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let mut request = ApiRequest::new(Method::GET, format!("{}/subscriptions/", server.url()));
        request.add_query_parameter("client_id", "abc");
        request.add_query_parameter("client_secret", "shh");

        let response = create_client().send(request).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, r#"{"data": []}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_sends_form_body() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/subscriptions/")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("object".into(), "tag".into()),
                Matcher::UrlEncoded("callback_url".into(), "https://example.com/hook?a=b".into()),
            ]))
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let mut request = ApiRequest::new(Method::POST, format!("{}/subscriptions/", server.url()));
        request.add_body_parameter("object", "tag");
        request.add_body_parameter("callback_url", "https://example.com/hook?a=b");

        let response = create_client().send(request).await.unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_failure() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("DELETE", "/subscriptions/")
            .match_query(Matcher::UrlEncoded("id".into(), "42".into()))
            .with_status(500)
            .with_body("server exploded")
            .create_async()
            .await;

        let mut request = ApiRequest::new(Method::DELETE, format!("{}/subscriptions/", server.url()));
        request.add_query_parameter("id", "42");

        let response = create_client().send(request).await.unwrap();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, "server exploded");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        setup_logger();
        // Nothing listens on port 9 (discard) in the test environment.
        let request = ApiRequest::new(Method::GET, "http://127.0.0.1:9/subscriptions/");

        let result = create_client().send(request).await;

        assert!(result.is_err());
    }
}
