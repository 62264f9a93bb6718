use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::client::RecipeQueryClient;
use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::model::{Facet, Recipe, Selection};

/// Provider response wrapper; a `null` or missing collection means no matches
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(alias = "matches", default)]
    meals: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    fn into_matches(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// Recipe client speaking the provider's REST endpoints
pub struct HttpRecipeClient {
    client: Client,
    base_url: Url,
}

impl HttpRecipeClient {
    /// Create a new client from configuration
    pub fn new(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Self::with_client(client, &config.base_url)
    }

    /// Create a client around an already configured `reqwest::Client`
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BrowserError> {
        // Endpoint names are joined onto the base, so it must end with a slash
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(HttpRecipeClient {
            client,
            base_url: Url::parse(&base)?,
        })
    }

    fn endpoint(&self, name: &str) -> Result<Url, BrowserError> {
        Ok(self.base_url.join(name)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, BrowserError> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_matches())
    }
}

/// Pull the option value out of one facet list entry
fn option_value(facet: Facet, entry: &Value) -> Option<String> {
    entry
        .get(facet.option_field())
        .or_else(|| entry.get("value"))
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(String::from)
}

#[async_trait]
impl RecipeQueryClient for HttpRecipeClient {
    async fn list_all(&self) -> Result<Vec<Recipe>, BrowserError> {
        let url = self.endpoint("getAllRecipes")?;
        self.get(url).await
    }

    async fn list_filtered(&self, selection: &Selection) -> Result<Vec<Recipe>, BrowserError> {
        let mut url = self.endpoint("getFilteredRecipes")?;
        {
            let mut pairs = url.query_pairs_mut();
            for facet in Facet::ALL {
                for value in selection.get(facet) {
                    pairs.append_pair(facet.key(), value);
                }
            }
        }
        self.get(url).await
    }

    async fn list_facet_options(&self, facet: Facet) -> Result<Vec<String>, BrowserError> {
        let mut url = self.endpoint("getListOfRecipes")?;
        url.query_pairs_mut().append_pair("type", facet.key());

        let entries: Vec<Value> = self.get(url).await?;
        Ok(entries
            .iter()
            .filter_map(|entry| option_value(facet, entry))
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, BrowserError> {
        let mut url = self.endpoint("getRecipeById")?;
        url.query_pairs_mut().append_pair("id", id);

        let recipes: Vec<Recipe> = self.get(url).await?;
        Ok(recipes.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> HttpRecipeClient {
        HttpRecipeClient::with_client(Client::new(), &server.url()).unwrap()
    }

    #[tokio::test]
    async fn test_list_filtered_sends_every_selected_value() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getFilteredRecipes")
            .match_query(Matcher::Exact(
                "ingredient=salt&ingredient=egg&category=Dessert".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"meals": [{"idMeal": "1", "strMeal": "Meringue"}]}"#)
            .create_async()
            .await;

        let selection = Selection {
            ingredients: vec!["salt".to_string(), "egg".to_string()],
            countries: vec![],
            categories: vec!["Dessert".to_string()],
        };
        let recipes = client_for(&server).list_filtered(&selection).await.unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Meringue");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_null_matches_normalise_to_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getFilteredRecipes")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        let recipes = client_for(&server)
            .list_filtered(&Selection::only(Facet::Country, "Atlantis"))
            .await
            .unwrap();
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_missing_collection_normalises_to_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getAllRecipes")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        assert!(client_for(&server).list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_facet_options_read_dimension_field() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getListOfRecipes")
            .match_query(Matcher::UrlEncoded("type".into(), "country".into()))
            .with_status(200)
            .with_body(
                r#"{"meals": [{"strArea": "Thai"}, {"strArea": ""}, {"value": "Greek"}, {"strArea": null}]}"#,
            )
            .create_async()
            .await;

        let options = client_for(&server)
            .list_facet_options(Facet::Country)
            .await
            .unwrap();
        assert_eq!(options, vec!["Thai", "Greek"]);
    }

    #[tokio::test]
    async fn test_get_by_id_returns_first_match() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getRecipeById")
            .match_query(Matcher::UrlEncoded("id".into(), "52772".into()))
            .with_status(200)
            .with_body(r#"{"meals": [{"idMeal": "52772", "strCategory": "Chicken"}]}"#)
            .create_async()
            .await;

        let recipe = client_for(&server).get_by_id("52772").await.unwrap();
        assert_eq!(recipe.map(|r| r.category), Some("Chicken".to_string()));
    }

    #[tokio::test]
    async fn test_get_by_id_without_match() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getRecipeById")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        assert!(client_for(&server).get_by_id("0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getAllRecipes")
            .with_status(500)
            .create_async()
            .await;

        let result = client_for(&server).list_all().await;
        match result {
            Err(BrowserError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected status error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/getAllRecipes")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let error = client_for(&server).list_all().await.unwrap_err();
        assert!(matches!(error, BrowserError::Decode(_)));
        assert!(error.is_network_failure());
    }

    #[test]
    fn test_base_url_path_is_kept() {
        let client = HttpRecipeClient::with_client(Client::new(), "http://host/api").unwrap();
        assert_eq!(
            client.endpoint("getAllRecipes").unwrap().as_str(),
            "http://host/api/getAllRecipes"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpRecipeClient::with_client(Client::new(), "not a url");
        assert!(matches!(result, Err(BrowserError::InvalidUrl(_))));
    }
}
