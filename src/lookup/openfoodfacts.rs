use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::error::{FoodTrackError, Result};
use crate::lookup::FoodLookup;
use crate::models::Food;
use crate::nutrition::REFERENCE_QUANTITY_G;

pub const DEFAULT_BASE_URL: &str = "https://fr.openfoodfacts.org";
const USER_AGENT_VALUE: &str = "FoodTrack/1.0 (Rust)";
const PRODUCT_FIELDS: &str =
    "code,product_name,product_name_fr,product_name_en,brands,nutriments,image_url,nutriscore_grade";
const SEARCH_PAGE_SIZE: &str = "10";
const UNNAMED_PRODUCT: &str = "Unnamed product";

/// Blocking client for the Open Food Facts product API.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    http: Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!(url, "open food facts request");
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FoodTrackError::Lookup(format!("{} returned {}", url, status)));
        }
        Ok(response.json()?)
    }
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodLookup for OpenFoodFactsClient {
    fn search(&self, query: &str) -> Result<Vec<Food>> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let data = self.get_json(
            &url,
            &[
                ("search_terms", query),
                ("simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("fields", PRODUCT_FIELDS),
                ("page_size", SEARCH_PAGE_SIZE),
            ],
        )?;

        let foods: Vec<Food> = data
            .get("products")
            .and_then(Value::as_array)
            .map(|products| products.iter().map(map_product).collect())
            .unwrap_or_default();
        tracing::info!(query, results = foods.len(), "searched products");
        Ok(foods)
    }

    fn by_barcode(&self, barcode: &str) -> Result<Option<Food>> {
        let barcode = normalize_barcode(barcode)?;
        let url = format!("{}/api/v2/product/{}.json", self.base_url, barcode);
        let data = self.get_json(&url, &[("fields", PRODUCT_FIELDS)])?;
        Ok(parse_barcode_response(&data))
    }
}

/// Trimmed barcode, rejected unless it is all ASCII digits.
pub fn normalize_barcode(barcode: &str) -> Result<&str> {
    let barcode = barcode.trim();
    if barcode.is_empty() || !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FoodTrackError::Lookup(format!("invalid barcode '{}'", barcode)));
    }
    Ok(barcode)
}

/// Product of a barcode response, `None` when the barcode is unknown.
pub fn parse_barcode_response(data: &Value) -> Option<Food> {
    let found = data.get("status").and_then(Value::as_i64) == Some(1);
    match data.get("product") {
        Some(product) if found && product.is_object() => Some(map_product(product)),
        _ => None,
    }
}

/// Map one product record to a food with per-100g values and a 100g serving.
pub fn map_product(product: &Value) -> Food {
    let nutriments = product.get("nutriments").unwrap_or(&Value::Null);

    Food {
        id: product_id(product),
        name: product_name(product),
        brand: non_empty_str(product, "brands"),
        image_url: non_empty_str(product, "image_url"),
        nutriscore: non_empty_str(product, "nutriscore_grade"),
        calories: Some(nutriment(nutriments, "energy-kcal_100g")),
        proteins: Some(nutriment(nutriments, "proteins_100g")),
        carbs: Some(nutriment(nutriments, "carbohydrates_100g")),
        fats: Some(nutriment(nutriments, "fat_100g")),
        quantity: Some(REFERENCE_QUANTITY_G),
    }
}

fn product_name(product: &Value) -> String {
    ["product_name_fr", "product_name_en", "product_name"]
        .iter()
        .find_map(|key| non_empty_str(product, key))
        .unwrap_or_else(|| UNNAMED_PRODUCT.to_string())
}

fn product_id(product: &Value) -> String {
    match product.get("code") {
        Some(Value::String(code)) if !code.is_empty() => code.clone(),
        Some(Value::Number(code)) => code.to_string(),
        _ => {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            format!("local-{}", nanos)
        }
    }
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric nutriment, accepting numbers or numeric strings; anything else is 0.
fn nutriment(nutriments: &Value, key: &str) -> f64 {
    let value = match nutriments.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
