use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct FoodRow {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FoodServingUnitRow {
    pub food_id: Uuid,
    pub serving_unit_id: Uuid,
    pub serving_unit_name: String,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodServingUnit {
    pub serving_unit_id: Uuid,
    pub serving_unit_name: String,
    pub grams: f64,
}

impl From<FoodServingUnitRow> for FoodServingUnit {
    fn from(r: FoodServingUnitRow) -> Self {
        Self {
            serving_unit_id: r.serving_unit_id,
            serving_unit_name: r.serving_unit_name,
            grams: r.grams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub serving_units: Vec<FoodServingUnit>,
}

impl Food {
    pub fn from_row(r: FoodRow, serving_units: Vec<FoodServingUnit>) -> Self {
        Self {
            id: r.id,
            name: r.name,
            calories: r.calories,
            protein: r.protein,
            fat: r.fat,
            carbohydrates: r.carbohydrates,
            fiber: r.fiber,
            sugar: r.sugar,
            category_id: r.category_id,
            category_name: r.category_name,
            serving_units,
        }
    }
}

/// Parsed, validated food ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDraft {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub category_id: Option<Uuid>,
    pub serving_units: Vec<ServingUnitDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServingUnitDraft {
    pub serving_unit_id: Uuid,
    pub grams: f64,
}
