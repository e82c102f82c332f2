/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/26
******************************************************************************/

//! Client for the Instagram real-time subscriptions API.
//!
//! [`InstagramSubscription`] collects credentials and the callback URL, then
//! turns each [`SubscriptionService`] call into one request through a
//! [`Dispatcher`](transport::dispatcher::Dispatcher), returning a typed result
//! or a classified [`SubscriptionError`].

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod transport;

pub mod utils;

pub use application::services::subscription_service::{InstagramSubscription, SubscriptionService};
pub use error::SubscriptionError;
