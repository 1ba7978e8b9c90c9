use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// The four tracked nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Proteins,
    Carbs,
    Fats,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Proteins,
        Nutrient::Carbs,
        Nutrient::Fats,
    ];

    /// Short label used in tables and warnings.
    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Proteins => "proteins",
            Nutrient::Carbs => "carbs",
            Nutrient::Fats => "fats",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Absolute nutrient amounts (not per 100g).
///
/// Values are kept at full precision; rounding is a display concern.
/// `Default` is the all-zero identity for `Add`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl NutritionTotals {
    pub fn new(calories: f64, proteins: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            proteins,
            carbs,
            fats,
        }
    }

    /// All-zero totals.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Multiply every field by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            proteins: self.proteins * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Proteins => self.proteins,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fats => self.fats,
        }
    }

    pub fn is_zero(&self) -> bool {
        Nutrient::ALL.iter().all(|&n| self.get(n) == 0.0)
    }

    /// Field-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        Nutrient::ALL
            .iter()
            .all(|&n| (self.get(n) - other.get(n)).abs() <= tolerance)
    }
}

impl Add for NutritionTotals {
    type Output = NutritionTotals;

    fn add(self, other: NutritionTotals) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories + other.calories,
            proteins: self.proteins + other.proteins,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }
}

impl std::iter::Sum for NutritionTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionTotals::zero(), |acc, t| acc + t)
    }
}
