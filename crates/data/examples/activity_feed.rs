//! Fetch and print the first page of the activity feed.
//!
//! Requires `TASTELOG_API_URL` and `TASTELOG_API_KEY` in the environment or
//! a `.env` file.

use tastelog_core::pagination::PageRange;
use tastelog_data::models::check_in::ActivityFeedQuery;
use tastelog_data::repositories::check_in_repo::CheckInRepo;
use tastelog_postgrest::{Client, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tastelog_postgrest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = Client::new(ClientConfig::from_env()?);
    let page = CheckInRepo::get_activity_feed(
        &client,
        ActivityFeedQuery::Paginated(PageRange::first(10)),
    )
    .await?;

    for check_in in &page {
        println!(
            "#{} {} on {} ({}/10)",
            check_in.id,
            check_in.profile.preferred_name.as_deref().unwrap_or("?"),
            check_in.product.name,
            check_in.rating.unwrap_or_default(),
        );
    }
    tracing::info!(count = page.len(), "feed page loaded");
    Ok(())
}
