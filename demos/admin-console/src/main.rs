//! Admin console demo
//!
//! Lists the first page of events the way the events table does.
//! Set `VITE_API_BASE_URL` to pick a backend and `WALKY_EMAIL` /
//! `WALKY_PASSWORD` to sign in first.

#![allow(missing_docs)]

use tracing_subscriber::EnvFilter;
use walky::admin::{ListEnvelope, ListQuery, QueryCache, Resource};
use walky::catalog::auth::Credentials;
use walky::{AuthContext, HyperClient, WalkyApi};

#[tokio::main]
async fn main() -> walky::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,walky=debug")),
        )
        .init();

    let client = HyperClient::builder().with_logging().with_retry(2).build();
    let api = WalkyApi::from_env(client, AuthContext::new())?;
    tracing::info!(base_url = %api.base_url(), "using backend");

    if let (Ok(email), Ok(password)) = (std::env::var("WALKY_EMAIL"), std::env::var("WALKY_PASSWORD")) {
        let session = api.sign_in(&Credentials::new(email, password)).await?;
        tracing::info!(user = %session.user.id, "signed in");
    }

    let cache = QueryCache::new();
    let query = ListQuery::new().limit(10).sort_by("startTime");
    let events = cache
        .get_or_fetch(query.key(Resource::Events), api.admin_events_list(&query))
        .await?;

    let page = events.into_page();
    tracing::info!(total = page.total, shown = page.rows.len(), "events");
    for event in &page.rows {
        tracing::info!(id = %event.id, start = %event.start_time, "{}", event.title);
    }

    Ok(())
}
