//! Listing screen state: facet selections, the listing URL and the result set.
//!
//! Every query goes through three steps so that overlapping requests can be
//! expressed without holding the controller across an await:
//!
//! 1. `prepare_*` mutates selection state, clears the result set for filtered
//!    queries and mints a [`Ticket`] stamped with a new generation.
//! 2. [`FilterSyncController::execute`] performs the request.
//! 3. [`FilterSyncController::apply`] writes the result only if the ticket is
//!    still the latest one. Requests are never cancelled; the last dispatched
//!    query wins regardless of the order in which responses arrive.
//!
//! The async `on_url_change`, `select` and `toggle` methods run all three
//! steps back to back.

use log::{debug, error, info, warn};

use crate::client::RecipeQueryClient;
use crate::config::{BrowserConfig, SyncMode};
use crate::error::BrowserError;
use crate::model::{Facet, FacetOptions, Recipe, Selection};
use crate::navigation::{History, Navigator};
use crate::query;

/// Which provider query a ticket stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingQuery {
    All,
    Filtered(Selection),
}

/// A dispatched query waiting for its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: ListingQuery,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }
}

pub struct FilterSyncController<C, N = History> {
    client: C,
    navigator: N,
    listing_path: String,
    detail_path: String,
    sync_mode: SyncMode,
    options: FacetOptions,
    mounted: bool,
    selection: Selection,
    results: Vec<Recipe>,
    generation: u64,
}

impl<C: RecipeQueryClient, N: Navigator> FilterSyncController<C, N> {
    pub fn new(client: C, navigator: N, config: &BrowserConfig) -> Self {
        FilterSyncController {
            client,
            navigator,
            listing_path: config.listing_path.clone(),
            detail_path: config.detail_path.clone(),
            sync_mode: config.sync_mode,
            options: FacetOptions::default(),
            mounted: false,
            selection: Selection::default(),
            results: Vec::new(),
            generation: 0,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn title(&self) -> String {
        self.selection.title()
    }

    /// Listing URL that would reproduce the current in-memory selection.
    ///
    /// In [`SyncMode::LeadingSelection`] this can differ from the location the
    /// navigator last pushed.
    pub fn selection_url(&self) -> String {
        query::listing_url(&self.listing_path, &self.selection)
    }

    /// Fetch the three facet option lists. Runs once per controller.
    ///
    /// The lists are fetched concurrently; a failing list is logged and left
    /// empty without affecting the other two.
    pub async fn mount(&mut self) {
        if self.mounted {
            debug!("Facet options already loaded, skipping");
            return;
        }
        self.mounted = true;

        let client = &self.client;
        let (ingredients, countries, categories) = tokio::join!(
            client.list_facet_options(Facet::Ingredient),
            client.list_facet_options(Facet::Country),
            client.list_facet_options(Facet::Category),
        );

        for (facet, result) in [
            (Facet::Ingredient, ingredients),
            (Facet::Country, countries),
            (Facet::Category, categories),
        ] {
            match result {
                Ok(options) => {
                    debug!("Loaded {} {} options", options.len(), facet);
                    self.options.set(facet, options);
                }
                Err(e) => error!("Failed to fetch {} options: {}", facet, e),
            }
        }
    }

    /// Re-derive selection state from a listing location and mint the matching query.
    ///
    /// No filter parameters means an unfiltered query; the result set is only
    /// cleared for filtered queries.
    pub fn prepare_url_change(&mut self, location: &str) -> Ticket {
        self.selection = query::parse_selection(location);
        if self.selection.is_empty() {
            self.dispatch(ListingQuery::All)
        } else {
            self.dispatch(ListingQuery::Filtered(self.selection.clone()))
        }
    }

    /// Replace one facet's selection from direct selector interaction.
    ///
    /// Returns `None` when all three facets end up empty: nothing is
    /// dispatched and the result set is left as it is.
    pub fn prepare_selection(&mut self, facet: Facet, values: Vec<String>) -> Option<Ticket> {
        self.selection.set(facet, values);
        if self.selection.is_empty() {
            debug!("Selection cleared, skipping filtered query");
            return None;
        }
        Some(self.dispatch(ListingQuery::Filtered(self.selection.clone())))
    }

    fn dispatch(&mut self, query: ListingQuery) -> Ticket {
        self.generation += 1;
        if matches!(query, ListingQuery::Filtered(_)) {
            self.results.clear();
        }
        debug!("Dispatching {:?} as generation {}", query, self.generation);
        Ticket {
            generation: self.generation,
            query,
        }
    }

    /// Perform the request a ticket stands for
    pub async fn execute(&self, ticket: &Ticket) -> Result<Vec<Recipe>, BrowserError> {
        match &ticket.query {
            ListingQuery::All => self.client.list_all().await,
            ListingQuery::Filtered(selection) => self.client.list_filtered(selection).await,
        }
    }

    /// Store a query result if its ticket is still current.
    ///
    /// Returns `Ok(true)` when the result set was replaced and `Ok(false)` when
    /// the ticket was superseded. A failure of the current ticket is logged,
    /// leaves the result set untouched and is handed back to the caller.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Recipe>, BrowserError>,
    ) -> Result<bool, BrowserError> {
        if ticket.generation != self.generation {
            debug!(
                "Discarding result of generation {} (latest is {})",
                ticket.generation, self.generation
            );
            return Ok(false);
        }

        match result {
            Ok(recipes) => {
                info!("Showing {} recipes for '{}'", recipes.len(), self.title());
                self.results = recipes;
                Ok(true)
            }
            Err(e) => {
                error!("Failed to fetch recipes: {}", e);
                Err(e)
            }
        }
    }

    async fn run(&mut self, ticket: Ticket) -> Result<(), BrowserError> {
        let result = self.execute(&ticket).await;
        self.apply(ticket, result).map(|_| ())
    }

    /// React to the listing URL changing, including the initial load
    pub async fn on_url_change(&mut self, location: &str) -> Result<(), BrowserError> {
        let ticket = self.prepare_url_change(location);
        self.run(ticket).await
    }

    /// Selector interaction: replace one facet's values
    pub async fn select(&mut self, facet: Facet, values: Vec<String>) -> Result<(), BrowserError> {
        match self.sync_mode {
            SyncMode::LeadingSelection => match self.prepare_selection(facet, values) {
                Some(ticket) => self.run(ticket).await,
                None => Ok(()),
            },
            SyncMode::UrlAuthoritative => {
                let mut selection = self.selection.clone();
                selection.set(facet, values);
                let location = query::listing_url(&self.listing_path, &selection);
                self.navigator.push(location.clone());
                self.on_url_change(&location).await
            }
        }
    }

    /// Selector interaction: add or remove one value in one facet
    pub async fn toggle(&mut self, facet: Facet, value: &str) -> Result<(), BrowserError> {
        let mut selection = self.selection.clone();
        selection.toggle(facet, value);
        let values = selection.get(facet).to_vec();
        self.select(facet, values).await
    }

    /// Navigate to the detail screen of one recipe
    pub fn open_recipe(&mut self, id: &str) {
        if id.trim().is_empty() {
            warn!("Ignoring navigation to a recipe without identifier");
            return;
        }
        self.navigator.push(query::detail_url(&self.detail_path, id));
    }
}
