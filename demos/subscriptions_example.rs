/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 9/10/26
 ******************************************************************************/
use ig_realtime::config::Config;
use ig_realtime::utils::logger::setup_logger;
use ig_realtime::{InstagramSubscription, SubscriptionService};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    // Reads INSTAGRAM_* environment variables, see src/config.rs
    let config = Config::new();
    info!("Configuration loaded: {}", config);

    let subscription = InstagramSubscription::from_config(&config)?;
    info!("Subscription client ready: {}", subscription);

    match subscription.get_subscription_list().await {
        Ok(list) => {
            if list.data.is_empty() {
                info!("No subscriptions registered");
            }
            for (i, sub) in list.data.iter().enumerate() {
                info!("Subscription #{}: {}", i + 1, serde_json::to_string(sub)?);
            }
        }
        Err(e) if e.is_rate_limited() => error!("Rate limited, try again later: {}", e),
        Err(e) => error!("Failed to list subscriptions: {}", e),
    }

    Ok(())
}
