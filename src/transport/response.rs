/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 5/10/26
 ******************************************************************************/
use crate::application::models::error_response::InstagramErrorResponse;
use crate::error::SubscriptionError;
use crate::transport::dispatcher::RawResponse;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::any::type_name;
use tracing::{debug, error};

/// Turns a raw response into `T` on 2xx, or into the classified error otherwise.
pub(crate) fn handle_response<T: DeserializeOwned>(
    response: RawResponse,
) -> Result<T, SubscriptionError> {
    if response.is_success() {
        parse_body(response.body)
    } else {
        Err(handle_instagram_error(response))
    }
}

/// Same as [`handle_response`] for calls whose success body carries nothing we need.
pub(crate) fn handle_empty_response(response: RawResponse) -> Result<(), SubscriptionError> {
    if response.is_success() {
        debug!("Request succeeded with status {}", response.status);
        Ok(())
    } else {
        Err(handle_instagram_error(response))
    }
}

fn parse_body<T: DeserializeOwned>(body: String) -> Result<T, SubscriptionError> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(source) => {
            error!("Failed to deserialize response body: {}", source);
            Err(SubscriptionError::Decode {
                target: short_type_name::<T>(),
                body,
                source,
            })
        }
    }
}

/// Only 400 and 503 have a documented error body; anything else is reported
/// verbatim without trying to read it.
pub(crate) fn handle_instagram_error(response: RawResponse) -> SubscriptionError {
    error!(
        "API request failed. Status: {}, Body: {}",
        response.status, response.body
    );

    match response.status {
        StatusCode::BAD_REQUEST | StatusCode::SERVICE_UNAVAILABLE => {
            match serde_json::from_str::<InstagramErrorResponse>(&response.body) {
                Ok(error) => error.into_error(response.status),
                Err(source) => SubscriptionError::Decode {
                    target: short_type_name::<InstagramErrorResponse>(),
                    body: response.body,
                    source,
                },
            }
        }
        status => SubscriptionError::UnknownResponse {
            status,
            body: response.body,
        },
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
