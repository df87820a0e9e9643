//! OpenFoodFacts product lookup, the default external food database.
//!
//! Two query shapes: direct barcode lookup and free-text search. 8–14
//! digit queries are treated as barcodes. Results are mapped into the
//! app-neutral [`ProductResult`] shape regardless of source.

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
const USER_AGENT: &str = "Larder/1.0 (+https://github.com/larder-app/larder)";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One product hit from an external source, normalized for display and
/// for seeding a [`larder_core::ManualInventoryInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductResult {
    pub upc: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub brand_owner: Option<String>,
    pub product_size: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    code: Option<String>,
    product_name: Option<String>,
    categories: Option<String>,
    brands: Option<String>,
    quantity: Option<String>,
    serving_size: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BarcodeResponse {
    product: Option<ProductPayload>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    products: Option<Vec<ProductPayload>>,
}

pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl OpenFoodFactsClient {
    pub fn new(http: reqwest::Client) -> Self {
        OpenFoodFactsClient { http, base_url: DEFAULT_BASE_URL.to_string() }
    }

    /// Point the client at a different host, e.g. a local stub in tests.
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        OpenFoodFactsClient { http, base_url: base_url.into() }
    }

    /// Dispatch on query shape: digit strings of barcode length go to the
    /// product endpoint, everything else to text search.
    pub async fn search(&self, query: &str) -> Result<Vec<ProductResult>, SearchError> {
        if looks_like_barcode(query) {
            Ok(self.lookup_barcode(query).await?.into_iter().collect())
        } else {
            self.search_text(query).await
        }
    }

    pub async fn lookup_barcode(&self, code: &str) -> Result<Option<ProductResult>, SearchError> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, code);
        let response: BarcodeResponse = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .product
            .and_then(|p| to_result(p, &self.base_url)))
    }

    pub async fn search_text(&self, terms: &str) -> Result<Vec<ProductResult>, SearchError> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let response: SearchResponse = self
            .http
            .get(&url)
            .query(&[
                ("search_terms", terms),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", "100"),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .products
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| to_result(p, &self.base_url))
            .collect())
    }
}

fn looks_like_barcode(query: &str) -> bool {
    (8..=14).contains(&query.len()) && query.bytes().all(|b| b.is_ascii_digit())
}

/// Hits without a product name are unusable and dropped.
fn to_result(payload: ProductPayload, base_url: &str) -> Option<ProductResult> {
    let name = payload.product_name.filter(|n| !n.is_empty())?;
    let url = payload
        .code
        .as_deref()
        .map(|code| format!("{base_url}/product/{code}"));
    Some(ProductResult {
        upc: payload.code,
        name,
        category: payload.categories,
        brand: payload.brands,
        brand_owner: None,
        product_size: payload.quantity.or(payload.serving_size),
        image_url: payload.image_url,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_detection() {
        assert!(looks_like_barcode("012345678905"));
        assert!(looks_like_barcode("12345678"));
        assert!(!looks_like_barcode("1234567"));
        assert!(!looks_like_barcode("123456789012345"));
        assert!(!looks_like_barcode("milk 2%"));
    }

    #[test]
    fn payload_maps_to_result() {
        let payload: ProductPayload = serde_json::from_value(serde_json::json!({
            "code": "012345678905",
            "product_name": "Whole Milk",
            "brands": "Lucerne",
            "categories": "Dairy",
            "quantity": "32oz",
            "image_url": "https://img.example/milk.jpg"
        }))
        .unwrap();

        let result = to_result(payload, DEFAULT_BASE_URL).unwrap();
        assert_eq!(result.name, "Whole Milk");
        assert_eq!(result.upc.as_deref(), Some("012345678905"));
        assert_eq!(result.product_size.as_deref(), Some("32oz"));
        assert_eq!(
            result.url.as_deref(),
            Some("https://world.openfoodfacts.org/product/012345678905")
        );
    }

    #[test]
    fn serving_size_backs_up_quantity() {
        let payload: ProductPayload = serde_json::from_value(serde_json::json!({
            "product_name": "Crackers",
            "serving_size": "30g"
        }))
        .unwrap();
        let result = to_result(payload, DEFAULT_BASE_URL).unwrap();
        assert_eq!(result.product_size.as_deref(), Some("30g"));
        assert!(result.url.is_none());
    }

    #[test]
    fn nameless_payload_is_dropped() {
        let payload: ProductPayload =
            serde_json::from_value(serde_json::json!({ "code": "123" })).unwrap();
        assert!(to_result(payload, DEFAULT_BASE_URL).is_none());
    }
}
