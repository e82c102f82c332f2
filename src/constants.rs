/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/26
******************************************************************************/

pub const DEFAULT_API_BASE_URL: &str = "https://api.instagram.com/v1";
pub(crate) const SUBSCRIPTIONS_PATH: &str = "subscriptions/";
pub(crate) const GEOGRAPHIES_PATH: &str = "geographies";
pub(crate) const RECENT_MEDIA_PATH: &str = "media/recent";

/// Callback value meaning "no callback configured".
pub const OUT_OF_BAND: &str = "oob";
pub const DEFAULT_ASPECT: &str = "media";
pub const MAX_GEOGRAPHY_RADIUS: u32 = 5000;
pub(crate) const DEFAULT_REST_TIMEOUT: u64 = 30;

pub(crate) const CLIENT_ID_KEY: &str = "client_id";
pub(crate) const CLIENT_SECRET_KEY: &str = "client_secret";
pub(crate) const OBJECT_KEY: &str = "object";
pub(crate) const OBJECT_ID_KEY: &str = "object_id";
pub(crate) const ASPECT_KEY: &str = "aspect";
pub(crate) const VERIFY_TOKEN_KEY: &str = "verify_token";
pub(crate) const CALLBACK_URL_KEY: &str = "callback_url";
pub(crate) const LATITUDE_KEY: &str = "lat";
pub(crate) const LONGITUDE_KEY: &str = "lng";
pub(crate) const RADIUS_KEY: &str = "radius";
pub(crate) const ID_KEY: &str = "id";
pub(crate) const MIN_ID_KEY: &str = "min_id";
pub(crate) const COUNT_KEY: &str = "count";

pub(crate) const DELETE_ALL_OBJECTS: &str = "all";
