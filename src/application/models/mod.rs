pub mod error_response;
pub mod media;
pub mod subscription;
