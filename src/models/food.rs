use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Nutrient;
use crate::nutrition::constants::REFERENCE_QUANTITY_G;

/// A food as returned by lookup and stored inside meals.
///
/// Nutrient values are per 100 grams and may be absent. `quantity` is the
/// serving in grams; when absent the reference 100g is assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriscore: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub calories: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub proteins: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbs: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub fats: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Numbers or numeric strings; anything else reads as absent.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<StoredNumber>::deserialize(deserializer)? {
        Some(StoredNumber::Number(n)) => Some(n),
        Some(StoredNumber::Text(s)) => s.trim().replace(',', ".").parse().ok(),
        Some(StoredNumber::Other(_)) | None => None,
    };
    Ok(value.filter(|v: &f64| v.is_finite()))
}

impl Food {
    /// A food with no nutrient data and no serving set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            image_url: None,
            nutriscore: None,
            calories: None,
            proteins: None,
            carbs: None,
            fats: None,
            quantity: None,
        }
    }

    /// Set all four per-100g reference values.
    pub fn with_reference(mut self, calories: f64, proteins: f64, carbs: f64, fats: f64) -> Self {
        self.calories = Some(calories);
        self.proteins = Some(proteins);
        self.carbs = Some(carbs);
        self.fats = Some(fats);
        self
    }

    /// Copy of this food with the serving set to `quantity` grams.
    pub fn with_quantity(&self, quantity: f64) -> Self {
        Self {
            quantity: Some(quantity),
            ..self.clone()
        }
    }

    fn raw(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Proteins => self.proteins,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fats => self.fats,
        }
    }

    /// Per-100g value for `nutrient`, with absent or malformed values read as 0.
    #[inline]
    pub fn reference_value(&self, nutrient: Nutrient) -> f64 {
        match self.raw(nutrient) {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => 0.0,
        }
    }

    /// Serving used for scaling.
    ///
    /// Zero is kept so an unvalidated preview scales to nothing. Negative,
    /// non-finite or absent quantities fall back to the 100g reference.
    #[inline]
    pub fn effective_quantity(&self) -> f64 {
        match self.quantity {
            Some(q) if q.is_finite() && q >= 0.0 => q,
            _ => REFERENCE_QUANTITY_G,
        }
    }

    /// Serving shown to the user (grams).
    pub fn display_quantity(&self) -> f64 {
        self.effective_quantity()
    }

    /// Nutrients the lookup did not provide.
    pub fn missing_nutrients(&self) -> Vec<Nutrient> {
        Nutrient::ALL
            .into_iter()
            .filter(|&n| !matches!(self.raw(n), Some(v) if v.is_finite()))
            .collect()
    }

    pub fn has_complete_data(&self) -> bool {
        self.missing_nutrients().is_empty()
    }

    /// Name with brand suffix when known.
    pub fn display_name(&self) -> String {
        match &self.brand {
            Some(brand) => format!("{} ({})", self.name, brand),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_food() -> Food {
        Food::new("3017620422003", "Hazelnut spread")
            .with_reference(539.0, 6.3, 57.5, 30.9)
    }

    #[test]
    fn test_effective_quantity_defaults() {
        let mut food = sample_food();
        assert_eq!(food.effective_quantity(), 100.0);

        food.quantity = Some(30.0);
        assert_eq!(food.effective_quantity(), 30.0);

        food.quantity = Some(0.0);
        assert_eq!(food.effective_quantity(), 0.0);

        food.quantity = Some(-15.0);
        assert_eq!(food.effective_quantity(), 100.0);

        food.quantity = Some(f64::NAN);
        assert_eq!(food.effective_quantity(), 100.0);

        food.quantity = Some(f64::INFINITY);
        assert_eq!(food.effective_quantity(), 100.0);
    }

    #[test]
    fn test_reference_value_coerces_missing() {
        let mut food = Food::new("1", "Mystery");
        food.calories = Some(120.0);
        food.fats = Some(f64::NAN);
        food.carbs = Some(-3.0);

        assert_eq!(food.reference_value(Nutrient::Calories), 120.0);
        assert_eq!(food.reference_value(Nutrient::Proteins), 0.0);
        assert_eq!(food.reference_value(Nutrient::Carbs), 0.0);
        assert_eq!(food.reference_value(Nutrient::Fats), 0.0);
    }

    #[test]
    fn test_missing_nutrients() {
        let mut food = Food::new("1", "Partial");
        food.calories = Some(0.0);
        food.proteins = Some(2.0);

        assert_eq!(food.missing_nutrients(), vec![Nutrient::Carbs, Nutrient::Fats]);
        assert!(!food.has_complete_data());
        assert!(sample_food().has_complete_data());
    }

    #[test]
    fn test_deserialize_with_absent_fields() {
        let json = r#"{"id": "42", "name": "Apple", "calories": 52}"#;
        let food: Food = serde_json::from_str(json).unwrap();

        assert_eq!(food.calories, Some(52.0));
        assert_eq!(food.proteins, None);
        assert_eq!(food.quantity, None);
        assert_eq!(food.brand, None);
    }

    #[test]
    fn test_deserialize_null_nutrient() {
        let json = r#"{"id": "42", "name": "Apple", "calories": null, "quantity": 150}"#;
        let food: Food = serde_json::from_str(json).unwrap();

        assert_eq!(food.calories, None);
        assert_eq!(food.quantity, Some(150.0));
    }

    #[test]
    fn test_deserialize_malformed_numbers() {
        let json = r#"{
            "id": "42",
            "name": "Apple",
            "calories": "n/a",
            "proteins": "0,3",
            "carbs": {"value": 14},
            "fats": true,
            "quantity": "150"
        }"#;
        let food: Food = serde_json::from_str(json).unwrap();

        assert_eq!(food.calories, None);
        assert_eq!(food.proteins, Some(0.3));
        assert_eq!(food.carbs, None);
        assert_eq!(food.fats, None);
        assert_eq!(food.quantity, Some(150.0));
        assert_eq!(food.reference_value(Nutrient::Calories), 0.0);
    }

    #[test]
    fn test_with_quantity_keeps_identity() {
        let food = sample_food();
        let serving = food.with_quantity(15.0);

        assert_eq!(serving.id, food.id);
        assert_eq!(serving.name, food.name);
        assert_eq!(serving.quantity, Some(15.0));
        assert_eq!(food.quantity, None);
    }

    #[test]
    fn test_display_name_with_brand() {
        let mut food = sample_food();
        assert_eq!(food.display_name(), "Hazelnut spread");

        food.brand = Some("Ferrero".to_string());
        assert_eq!(food.display_name(), "Hazelnut spread (Ferrero)");
    }
}
