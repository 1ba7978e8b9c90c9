mod openfoodfacts;

pub use openfoodfacts::{
    map_product, normalize_barcode, parse_barcode_response, OpenFoodFactsClient, DEFAULT_BASE_URL,
};

use crate::error::Result;
use crate::models::Food;

/// Source of foods with per-100g reference values.
///
/// Lookup failures come back as errors; an unknown barcode is `Ok(None)`.
pub trait FoodLookup {
    fn search(&self, query: &str) -> Result<Vec<Food>>;

    fn by_barcode(&self, barcode: &str) -> Result<Option<Food>>;
}
