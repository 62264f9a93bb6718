mod http;

pub use http::HttpRecipeClient;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::BrowserError;
use crate::model::{Facet, Recipe, Selection};

/// Request layer in front of the remote recipe provider.
///
/// Every call is a single round trip with no retry. An empty response is an
/// empty `Vec` (or `None`), never an error.
#[async_trait]
pub trait RecipeQueryClient: Send + Sync {
    /// Every recipe the provider knows about
    async fn list_all(&self) -> Result<Vec<Recipe>, BrowserError>;

    /// Recipes matching the combined selection across all three facets.
    ///
    /// Callers must not pass an empty selection.
    async fn list_filtered(&self, selection: &Selection) -> Result<Vec<Recipe>, BrowserError>;

    /// Selector options for one facet
    async fn list_facet_options(&self, facet: Facet) -> Result<Vec<String>, BrowserError>;

    /// First recipe with the given identifier, if any
    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, BrowserError>;
}

#[async_trait]
impl<T: RecipeQueryClient + ?Sized> RecipeQueryClient for Arc<T> {
    async fn list_all(&self) -> Result<Vec<Recipe>, BrowserError> {
        self.as_ref().list_all().await
    }

    async fn list_filtered(&self, selection: &Selection) -> Result<Vec<Recipe>, BrowserError> {
        self.as_ref().list_filtered(selection).await
    }

    async fn list_facet_options(&self, facet: Facet) -> Result<Vec<String>, BrowserError> {
        self.as_ref().list_facet_options(facet).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, BrowserError> {
        self.as_ref().get_by_id(id).await
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! Recording client used by the controller tests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        ListAll,
        ListFiltered(Selection),
        FacetOptions(Facet),
        GetById(String),
    }

    #[derive(Default)]
    pub struct StubClient {
        pub all: Vec<Recipe>,
        pub filtered: Vec<Recipe>,
        pub by_category: HashMap<String, Vec<Recipe>>,
        pub recipes: HashMap<String, Recipe>,
        pub options: HashMap<Facet, Vec<String>>,
        pub failing: Vec<Facet>,
        pub offline: bool,
        pub calls: Mutex<Vec<Call>>,
    }

    impl StubClient {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn unavailable() -> BrowserError {
            BrowserError::Status {
                status: 503,
                url: "stub".to_string(),
            }
        }
    }

    pub fn recipe(id: &str, name: &str, category: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[async_trait]
    impl RecipeQueryClient for StubClient {
        async fn list_all(&self) -> Result<Vec<Recipe>, BrowserError> {
            self.record(Call::ListAll);
            if self.offline {
                return Err(Self::unavailable());
            }
            Ok(self.all.clone())
        }

        async fn list_filtered(
            &self,
            selection: &Selection,
        ) -> Result<Vec<Recipe>, BrowserError> {
            self.record(Call::ListFiltered(selection.clone()));
            if self.offline {
                return Err(Self::unavailable());
            }
            if selection.ingredients.is_empty() && selection.countries.is_empty() {
                if let [category] = selection.categories.as_slice() {
                    if let Some(related) = self.by_category.get(category) {
                        return Ok(related.clone());
                    }
                }
            }
            Ok(self.filtered.clone())
        }

        async fn list_facet_options(&self, facet: Facet) -> Result<Vec<String>, BrowserError> {
            self.record(Call::FacetOptions(facet));
            if self.failing.contains(&facet) {
                return Err(Self::unavailable());
            }
            Ok(self.options.get(&facet).cloned().unwrap_or_default())
        }

        async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, BrowserError> {
            self.record(Call::GetById(id.to_string()));
            if self.offline {
                return Err(Self::unavailable());
            }
            Ok(self.recipes.get(id).cloned())
        }
    }
}
