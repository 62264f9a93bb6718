use log::{debug, error, info, warn};

use crate::client::RecipeQueryClient;
use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::model::{Facet, Recipe, Selection};
use crate::navigation::{History, Navigator};
use crate::query;

/// Where the detail screen is in its two-stage fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    /// No identifier in the URL
    #[default]
    Idle,
    /// Primary recipe requested, or its request failed
    Loading { id: String },
    /// The provider has no recipe with this identifier
    NotFound { id: String },
    /// Primary recipe known, related recipes not (yet) fetched
    PrimaryLoaded { recipe: Recipe },
    /// Primary recipe and its related set are both available
    Ready { recipe: Recipe, related: Vec<Recipe> },
}

impl DetailState {
    pub fn id(&self) -> Option<&str> {
        match self {
            DetailState::Idle => None,
            DetailState::Loading { id } | DetailState::NotFound { id } => Some(id.as_str()),
            DetailState::PrimaryLoaded { recipe } | DetailState::Ready { recipe, .. } => {
                Some(recipe.id.as_str())
            }
        }
    }
}

/// Detail screen: one recipe plus the other recipes in its category
pub struct DetailResolver<C, N = History> {
    client: C,
    navigator: N,
    listing_path: String,
    detail_path: String,
    state: DetailState,
}

impl<C: RecipeQueryClient, N: Navigator> DetailResolver<C, N> {
    pub fn new(client: C, navigator: N, config: &BrowserConfig) -> Self {
        DetailResolver {
            client,
            navigator,
            listing_path: config.listing_path.clone(),
            detail_path: config.detail_path.clone(),
            state: DetailState::Idle,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match &self.state {
            DetailState::PrimaryLoaded { recipe } | DetailState::Ready { recipe, .. } => {
                Some(recipe)
            }
            _ => None,
        }
    }

    pub fn related(&self) -> &[Recipe] {
        match &self.state {
            DetailState::Ready { related, .. } => related.as_slice(),
            _ => &[],
        }
    }

    pub fn ingredients(&self) -> Vec<String> {
        self.recipe().map(Recipe::ingredients).unwrap_or_default()
    }

    /// React to the detail URL changing.
    ///
    /// A missing `id` parameter leaves the screen idle. The same identifier as
    /// the one already shown does not refetch.
    pub async fn on_url_change(&mut self, location: &str) -> Result<(), BrowserError> {
        match query::parse_id(location) {
            None => {
                debug!("No recipe identifier in '{}'", location);
                self.state = DetailState::Idle;
                Ok(())
            }
            Some(id) if self.state.id() == Some(id.as_str()) => {
                debug!("Recipe {} already shown", id);
                Ok(())
            }
            Some(id) => self.load(&id).await,
        }
    }

    /// Fetch a recipe, then the recipes sharing its category.
    ///
    /// A failed primary fetch stays in `Loading`; a failed related fetch stays
    /// in `PrimaryLoaded`. Both are logged and returned.
    pub async fn load(&mut self, id: &str) -> Result<(), BrowserError> {
        self.state = DetailState::Loading { id: id.to_string() };

        let recipe = match self.client.get_by_id(id).await {
            Ok(Some(recipe)) => recipe,
            Ok(None) => {
                warn!("No recipe found with id {}", id);
                self.state = DetailState::NotFound { id: id.to_string() };
                return Ok(());
            }
            Err(e) => {
                error!("Failed to fetch recipe {}: {}", id, e);
                return Err(e);
            }
        };

        if !recipe.has_category() {
            debug!("Recipe {} has no category, skipping related recipes", id);
            self.state = DetailState::Ready {
                recipe,
                related: Vec::new(),
            };
            return Ok(());
        }

        let filter = Selection::only(Facet::Category, recipe.category.clone());
        self.state = DetailState::PrimaryLoaded {
            recipe: recipe.clone(),
        };

        match self.client.list_filtered(&filter).await {
            Ok(related) => {
                info!(
                    "Loaded '{}' with {} related recipes in {}",
                    recipe.name,
                    related.len(),
                    recipe.category
                );
                self.state = DetailState::Ready { recipe, related };
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch recipes in {}: {}", recipe.category, e);
                Err(e)
            }
        }
    }

    /// Show the listing filtered to exactly one country
    pub fn show_country(&mut self, country: &str) {
        self.show_listing(Facet::Country, country);
    }

    /// Show the listing filtered to exactly one ingredient
    pub fn show_ingredient(&mut self, ingredient: &str) {
        self.show_listing(Facet::Ingredient, ingredient);
    }

    fn show_listing(&mut self, facet: Facet, value: &str) {
        let selection = Selection::only(facet, value);
        self.navigator
            .push(query::listing_url(&self.listing_path, &selection));
    }

    /// Navigate to another recipe's detail screen
    pub fn open_related(&mut self, id: &str) {
        self.navigator.push(query::detail_url(&self.detail_path, id));
    }
}
