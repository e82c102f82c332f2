pub mod dispatcher;
pub mod http_client;
pub(crate) mod response;
