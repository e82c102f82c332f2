/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 3/10/26
 ******************************************************************************/
use crate::application::models::subscription::Meta;
use crate::error::SubscriptionError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Error body the platform documents for 400 and 503 answers.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InstagramErrorResponse {
    pub meta: Meta,
}

impl InstagramErrorResponse {
    pub fn into_error(self, status: StatusCode) -> SubscriptionError {
        SubscriptionError::Platform {
            status,
            error_type: self.meta.error_type,
            message: self.meta.error_message,
            code: self.meta.code,
        }
    }
}
