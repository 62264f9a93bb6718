//! Recipe browser core.
//!
//! Keeps facet selections, the browser URL and the displayed recipes in step
//! for a listing screen ([`FilterSyncController`]) and runs the two-stage
//! fetch behind a detail screen ([`DetailResolver`]). Rendering and routing
//! are left to the embedding application; the screens talk to the provider
//! through [`RecipeQueryClient`] and navigate through [`Navigator`].

pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod listing;
pub mod model;
pub mod navigation;
pub mod query;

pub use client::{HttpRecipeClient, RecipeQueryClient};
pub use config::{BrowserConfig, SyncMode};
pub use detail::{DetailResolver, DetailState};
pub use error::BrowserError;
pub use listing::{FilterSyncController, ListingQuery, Ticket};
pub use model::{Facet, FacetOptions, Recipe, Selection};
pub use navigation::{History, Navigator};

/// Listing controller talking HTTP to the configured provider
pub fn listing_controller(
    config: &BrowserConfig,
) -> Result<FilterSyncController<HttpRecipeClient>, BrowserError> {
    let client = HttpRecipeClient::new(config)?;
    Ok(FilterSyncController::new(client, History::new(), config))
}

/// Detail resolver talking HTTP to the configured provider
pub fn detail_resolver(
    config: &BrowserConfig,
) -> Result<DetailResolver<HttpRecipeClient>, BrowserError> {
    let client = HttpRecipeClient::new(config)?;
    Ok(DetailResolver::new(client, History::new(), config))
}
