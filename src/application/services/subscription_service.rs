/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 7/10/26
 ******************************************************************************/
use async_trait::async_trait;
use reqwest::{Method, Url};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::{
    application::models::{
        media::GeographyMediaFeed,
        subscription::{SubscriptionCreationResponse, SubscriptionResponse, SubscriptionType},
    },
    config::Config,
    constants::*,
    error::SubscriptionError,
    transport::{
        dispatcher::{ApiRequest, Dispatcher, RawResponse},
        http_client::InstagramHttpClient,
        response::{handle_empty_response, handle_response},
    },
};

/// Operations of the real-time subscriptions API.
///
/// Every operation checks its local preconditions first and fails with
/// [`SubscriptionError::Validation`] without touching the network.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Subscribes to media posted by the users who authenticated the client.
    async fn create_user_subscription(
        &self,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError>;

    async fn create_tag_subscription(
        &self,
        tag_name: &str,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError>;

    async fn create_location_subscription(
        &self,
        location_id: &str,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError>;

    /// Subscribes to media posted within `radius` meters of a point.
    /// The radius must be between 1 and 5000 meters.
    async fn create_geography_subscription(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError>;

    async fn get_subscription_list(&self) -> Result<SubscriptionResponse, SubscriptionError>;

    async fn delete_subscription_by_id(&self, subscription_id: u64)
        -> Result<(), SubscriptionError>;

    /// Deletes every subscription whose `object` is `object_type`
    /// (`user`, `tag`, `location`, `geography` or `all`).
    async fn delete_subscription_by_type(&self, object_type: &str)
        -> Result<(), SubscriptionError>;

    async fn delete_all_subscriptions(&self) -> Result<(), SubscriptionError>;

    /// Recent media for a geography subscription.
    ///
    /// `min_id` returns media before that id; `count` caps the number of items.
    /// A `count` of zero is the same as none.
    async fn get_recent_media_by_geography(
        &self,
        geo_id: &str,
        min_id: Option<&str>,
        count: Option<u64>,
    ) -> Result<GeographyMediaFeed, SubscriptionError>;
}

/// Fluent configuration for the subscriptions API plus the dispatcher used to reach it.
///
/// Not meant to be shared between workflows: build one per caller.
pub struct InstagramSubscription<D: Dispatcher> {
    dispatcher: Arc<D>,
    api_base: String,
    aspect: String,
    callback: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    verify_token: Option<String>,
}

impl InstagramSubscription<InstagramHttpClient> {
    /// Builds the default HTTP dispatcher and applies every non-empty setting in `config`.
    pub fn from_config(config: &Config) -> Result<Self, SubscriptionError> {
        let client = InstagramHttpClient::from_config(config)
            .map_err(|e| SubscriptionError::transport("Failed to build HTTP client", e))?;
        Self::new(Arc::new(client)).configure(config)
    }
}

impl<D: Dispatcher> InstagramSubscription<D> {
    pub fn new(dispatcher: Arc<D>) -> Self {
        Self {
            dispatcher,
            api_base: DEFAULT_API_BASE_URL.to_string(),
            aspect: DEFAULT_ASPECT.to_string(),
            callback: OUT_OF_BAND.to_string(),
            client_id: None,
            client_secret: None,
            verify_token: None,
        }
    }

    pub fn configure(self, config: &Config) -> Result<Self, SubscriptionError> {
        let mut configured = self
            .api_base(&config.rest_api.base_url)?
            .callback(&config.subscription.callback_url)?
            .aspect(&config.subscription.aspect)?;

        let credentials = &config.credentials;
        if !credentials.client_id.is_empty() {
            configured = configured.client_id(&credentials.client_id)?;
        }
        if !credentials.client_secret.is_empty() {
            configured = configured.client_secret(&credentials.client_secret)?;
        }
        if !credentials.verify_token.is_empty() {
            configured = configured.verify_token(&credentials.verify_token)?;
        }
        Ok(configured)
    }

    /// Sets the URL the platform notifies. `oob` restores "no callback".
    pub fn callback(mut self, callback: &str) -> Result<Self, SubscriptionError> {
        if callback != OUT_OF_BAND {
            check_valid_url(callback, "Invalid Callback Url")?;
        }
        self.callback = callback.to_string();
        Ok(self)
    }

    pub fn client_id(mut self, client_id: &str) -> Result<Self, SubscriptionError> {
        check_empty_string(Some(client_id), "Invalid 'clientId' key")?;
        self.client_id = Some(client_id.to_string());
        Ok(self)
    }

    pub fn client_secret(mut self, client_secret: &str) -> Result<Self, SubscriptionError> {
        check_empty_string(Some(client_secret), "Invalid 'clientSecret' key")?;
        self.client_secret = Some(client_secret.to_string());
        Ok(self)
    }

    pub fn verify_token(mut self, verify_token: &str) -> Result<Self, SubscriptionError> {
        check_empty_string(Some(verify_token), "Invalid 'verifyToken' key")?;
        self.verify_token = Some(verify_token.to_string());
        Ok(self)
    }

    pub fn aspect(mut self, aspect: &str) -> Result<Self, SubscriptionError> {
        check_empty_string(Some(aspect), "Invalid 'aspect' key")?;
        self.aspect = aspect.to_string();
        Ok(self)
    }

    /// Root of the API, e.g. `https://api.instagram.com/v1`.
    pub fn api_base(mut self, api_base: &str) -> Result<Self, SubscriptionError> {
        check_valid_url(api_base, "Invalid API base url")?;
        self.api_base = api_base.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn get_callback(&self) -> &str {
        &self.callback
    }

    pub fn get_aspect(&self) -> &str {
        &self.aspect
    }

    fn subscriptions_endpoint(&self) -> String {
        format!("{}/{}", self.api_base, SUBSCRIPTIONS_PATH)
    }

    /// `geo_id` always lands in a single percent-encoded path segment.
    fn geography_media_endpoint(&self, geo_id: &str) -> Result<String, SubscriptionError> {
        if matches!(geo_id, "." | "..") {
            return Err(SubscriptionError::validation(format!(
                "Invalid geography id: {geo_id}"
            )));
        }
        let invalid_base =
            || SubscriptionError::validation(format!("Invalid API base url: {}", self.api_base));

        let mut url = Url::parse(&self.api_base).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .push(GEOGRAPHIES_PATH)
            .push(geo_id)
            .extend(RECENT_MEDIA_PATH.split('/'));
        Ok(url.to_string())
    }

    fn require_credentials(&self) -> Result<(&str, &str), SubscriptionError> {
        let client_id = check_empty_string(self.client_id.as_deref(), "You must provide a clientId key")?;
        let client_secret =
            check_empty_string(self.client_secret.as_deref(), "You must provide a clientSecret")?;
        Ok((client_id, client_secret))
    }

    /// POST skeleton shared by every create call.
    fn creation_request(&self, kind: SubscriptionType) -> Result<ApiRequest, SubscriptionError> {
        let (client_id, client_secret) = self.require_credentials()?;
        let verify_token =
            check_empty_string(self.verify_token.as_deref(), "You must provide a verifyToken")?;

        let mut request = ApiRequest::new(Method::POST, self.subscriptions_endpoint());
        request.add_body_parameter(CLIENT_ID_KEY, client_id);
        request.add_body_parameter(CLIENT_SECRET_KEY, client_secret);
        request.add_body_parameter(OBJECT_KEY, kind.as_str());
        request.add_body_parameter(ASPECT_KEY, DEFAULT_ASPECT);
        request.add_body_parameter(VERIFY_TOKEN_KEY, verify_token);
        request.add_body_parameter(CALLBACK_URL_KEY, self.callback.as_str());
        Ok(request)
    }

    fn deletion_request(&self) -> Result<ApiRequest, SubscriptionError> {
        let (client_id, client_secret) = self.require_credentials()?;

        let mut request = ApiRequest::new(Method::DELETE, self.subscriptions_endpoint());
        request.add_query_parameter(CLIENT_ID_KEY, client_id);
        request.add_query_parameter(CLIENT_SECRET_KEY, client_secret);
        Ok(request)
    }

    async fn execute(
        &self,
        request: ApiRequest,
        context: &str,
    ) -> Result<RawResponse, SubscriptionError> {
        debug!("{} {} query={:?}", request.method, request.url, request.query.keys());

        match self.dispatcher.send(request).await {
            Ok(response) => {
                debug!("Response status: {}", response.status);
                Ok(response)
            }
            Err(e) => {
                error!("{}: {}", context, e);
                Err(SubscriptionError::transport(context, e))
            }
        }
    }

    async fn create(
        &self,
        request: ApiRequest,
        context: &str,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError> {
        let response = self.execute(request, context).await?;
        let created: SubscriptionCreationResponse = handle_response(response)?;
        info!("Subscription {} created", created.id());
        Ok(created)
    }
}

#[async_trait]
impl<D: Dispatcher + 'static> SubscriptionService for InstagramSubscription<D> {
    #[instrument(skip(self))]
    async fn create_user_subscription(
        &self,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError> {
        let request = self.creation_request(SubscriptionType::User)?;
        info!("Creating user subscription");

        self.create(request, "Failed to create user subscription").await
    }

    #[instrument(skip(self))]
    async fn create_tag_subscription(
        &self,
        tag_name: &str,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError> {
        let mut request = self.creation_request(SubscriptionType::Tag)?;
        let tag_name = check_empty_string(Some(tag_name), "You must provide a tag name")?;
        request.add_body_parameter(OBJECT_ID_KEY, tag_name);
        info!("Creating tag subscription for: {}", tag_name);

        self.create(request, "Failed to create tag subscription").await
    }

    #[instrument(skip(self))]
    async fn create_location_subscription(
        &self,
        location_id: &str,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError> {
        let mut request = self.creation_request(SubscriptionType::Location)?;
        let location_id = check_empty_string(Some(location_id), "You must provide a location id")?;
        request.add_body_parameter(OBJECT_ID_KEY, location_id);
        info!("Creating location subscription for: {}", location_id);

        self.create(request, "Failed to create location subscription").await
    }

    #[instrument(skip(self))]
    async fn create_geography_subscription(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
    ) -> Result<SubscriptionCreationResponse, SubscriptionError> {
        let mut request = self.creation_request(SubscriptionType::Geography)?;
        check_coordinates(latitude, longitude, radius)?;
        request.add_body_parameter(LATITUDE_KEY, format_degrees(latitude));
        request.add_body_parameter(LONGITUDE_KEY, format_degrees(longitude));
        request.add_body_parameter(RADIUS_KEY, radius.to_string());
        info!(
            "Creating geography subscription at ({}, {}) radius {}m",
            latitude, longitude, radius
        );

        self.create(request, "Failed to create geography subscription").await
    }

    #[instrument(skip(self))]
    async fn get_subscription_list(&self) -> Result<SubscriptionResponse, SubscriptionError> {
        let (client_id, client_secret) = self.require_credentials()?;

        let mut request = ApiRequest::new(Method::GET, self.subscriptions_endpoint());
        request.add_query_parameter(CLIENT_ID_KEY, client_id);
        request.add_query_parameter(CLIENT_SECRET_KEY, client_secret);
        info!("Fetching subscription list");

        let response = self.execute(request, "Failed to get subscription list").await?;
        let result: SubscriptionResponse = handle_response(response)?;

        debug!("Subscriptions obtained: {}", result.data.len());
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn delete_subscription_by_id(
        &self,
        subscription_id: u64,
    ) -> Result<(), SubscriptionError> {
        let mut request = self.deletion_request()?;
        request.add_query_parameter(ID_KEY, subscription_id.to_string());
        info!("Deleting subscription {}", subscription_id);

        let response = self.execute(request, "Failed to delete subscription").await?;
        handle_empty_response(response)
    }

    #[instrument(skip(self))]
    async fn delete_subscription_by_type(
        &self,
        object_type: &str,
    ) -> Result<(), SubscriptionError> {
        let mut request = self.deletion_request()?;
        let object_type = check_empty_string(Some(object_type), "You must provide an object type")?;
        request.add_query_parameter(OBJECT_KEY, object_type);
        info!("Deleting subscriptions for object: {}", object_type);

        let response = self.execute(request, "Failed to delete subscriptions").await?;
        handle_empty_response(response)
    }

    async fn delete_all_subscriptions(&self) -> Result<(), SubscriptionError> {
        self.delete_subscription_by_type(DELETE_ALL_OBJECTS).await
    }

    #[instrument(skip(self))]
    async fn get_recent_media_by_geography(
        &self,
        geo_id: &str,
        min_id: Option<&str>,
        count: Option<u64>,
    ) -> Result<GeographyMediaFeed, SubscriptionError> {
        let client_id = check_empty_string(self.client_id.as_deref(), "You must provide a clientId key")?;
        let geo_id = check_empty_string(Some(geo_id), "You must provide a geography id")?;

        let mut request = ApiRequest::new(Method::GET, self.geography_media_endpoint(geo_id)?);
        request.add_query_parameter(CLIENT_ID_KEY, client_id);
        if let Some(min_id) = min_id {
            request.add_query_parameter(MIN_ID_KEY, min_id);
        }
        if let Some(count) = count.filter(|c| *c != 0) {
            request.add_query_parameter(COUNT_KEY, count.to_string());
        }
        info!("Fetching recent media for geography: {}", geo_id);

        let response = self.execute(request, "Failed to get recent media by geography").await?;
        let feed: GeographyMediaFeed = handle_response(response)?;

        debug!("Media obtained: {}", feed.data.len());
        Ok(feed)
    }
}

impl<D: Dispatcher> fmt::Display for InstagramSubscription<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| {
            value
                .as_ref()
                .map_or("null".to_string(), |_| "\"[REDACTED]\"".to_string())
        };
        write!(
            f,
            "{{\"api_base\":\"{}\",\"aspect\":\"{}\",\"callback\":\"{}\",\"client_id\":{},\"client_secret\":{},\"verify_token\":{}}}",
            self.api_base,
            self.aspect,
            self.callback,
            self.client_id
                .as_ref()
                .map_or("null".to_string(), |id| format!("\"{id}\"")),
            redacted(&self.client_secret),
            redacted(&self.verify_token)
        )
    }
}

impl<D: Dispatcher> fmt::Debug for InstagramSubscription<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstagramSubscription")
            .field("api_base", &self.api_base)
            .field("aspect", &self.aspect)
            .field("callback", &self.callback)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("verify_token", &self.verify_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn check_empty_string<'a>(value: Option<&'a str>, msg: &str) -> Result<&'a str, SubscriptionError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SubscriptionError::validation(msg)),
    }
}

fn check_valid_url(url: &str, msg: &str) -> Result<(), SubscriptionError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(SubscriptionError::validation(format!("{msg}: {url}"))),
    }
}

/// Whole degrees keep one decimal place: `35.0` is sent as `"35.0"`, not `"35"`.
fn format_degrees(degrees: f64) -> String {
    if degrees.fract() == 0.0 {
        format!("{degrees:.1}")
    } else {
        degrees.to_string()
    }
}

fn check_coordinates(latitude: f64, longitude: f64, radius: u32) -> Result<(), SubscriptionError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(SubscriptionError::validation(format!(
            "Latitude must be between -90 and 90 degrees, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(SubscriptionError::validation(format!(
            "Longitude must be between -180 and 180 degrees, got {longitude}"
        )));
    }
    if radius == 0 || radius > MAX_GEOGRAPHY_RADIUS {
        return Err(SubscriptionError::validation(format!(
            "Radius must be between 1 and {MAX_GEOGRAPHY_RADIUS} meters, got {radius}"
        )));
    }
    Ok(())
}
