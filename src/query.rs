//! Query-string handling for the listing and detail screens.
//!
//! Both screens are driven by their URL. These helpers translate between raw
//! query strings and [`Selection`] / recipe identifiers, and build the URLs the
//! screens push when the user navigates.

use url::form_urlencoded;

use crate::model::{Facet, Selection};

/// Strip anything before the query component.
///
/// Accepts a bare query (`a=b`), a query with its leading `?`, or a full URL/path.
fn query_component(input: &str) -> &str {
    let without_fragment = input.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    }
}

/// Read every `ingredient`, `country` and `category` value from a query string.
///
/// Unknown keys are ignored; repeated keys keep their order of appearance.
pub fn parse_selection(input: &str) -> Selection {
    let mut selection = Selection::default();
    for (key, value) in form_urlencoded::parse(query_component(input).as_bytes()) {
        if let Some(facet) = Facet::from_key(&key) {
            let mut values = selection.get(facet).to_vec();
            values.push(value.into_owned());
            selection.set(facet, values);
        }
    }
    selection
}

/// Read the single `id` parameter; blank values count as missing.
pub fn parse_id(input: &str) -> Option<String> {
    form_urlencoded::parse(query_component(input).as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}

/// Encode a selection as `ingredient=..&country=..&category=..`.
pub fn selection_query(selection: &Selection) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for facet in Facet::ALL {
        for value in selection.get(facet) {
            serializer.append_pair(facet.key(), value);
        }
    }
    serializer.finish()
}

/// Listing URL for the full selection; an empty selection yields the bare path.
pub fn listing_url(listing_path: &str, selection: &Selection) -> String {
    let query = selection_query(selection);
    if query.is_empty() {
        listing_path.to_string()
    } else {
        format!("{}?{}", listing_path, query)
    }
}

/// Detail URL for one recipe.
pub fn detail_url(detail_path: &str, id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", id)
        .finish();
    format!("{}?{}", detail_path, query)
}
