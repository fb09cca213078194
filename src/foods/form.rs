//! String-typed food form shape.
//!
//! Numbers cross the form boundary as text: an empty string means unset, never
//! zero. `f64`'s `Display` is the shortest text that parses back to the same
//! value, so a stored number survives the trip to the form and back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::repo_types::{Food, FoodDraft, ServingUnitDraft};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    #[default]
    Create,
    Update,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServingUnitFormValue {
    pub serving_unit_id: String,
    pub grams: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodFormValues {
    pub action: FormAction,
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub fat: String,
    pub carbohydrates: String,
    pub fiber: String,
    pub sugar: String,
    pub category_id: String,
    pub serving_units: Vec<ServingUnitFormValue>,
}

impl FoodFormValues {
    /// Empty form for creating a new food.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-filled form for editing an existing food.
    pub fn for_update(food: &Food) -> Self {
        Self {
            action: FormAction::Update,
            id: Some(food.id),
            name: food.name.clone(),
            calories: food.calories.to_string(),
            protein: food.protein.to_string(),
            fat: food.fat.to_string(),
            carbohydrates: food.carbohydrates.to_string(),
            fiber: food.fiber.to_string(),
            sugar: food.sugar.to_string(),
            category_id: food.category_id.map(|id| id.to_string()).unwrap_or_default(),
            serving_units: food
                .serving_units
                .iter()
                .map(|su| ServingUnitFormValue {
                    serving_unit_id: su.serving_unit_id.to_string(),
                    grams: su.grams.to_string(),
                })
                .collect(),
        }
    }

    pub fn into_draft(self) -> Result<FoodDraft, AppError> {
        self.validate()?;
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be blank".into()));
        }

        let category_id = match self.category_id.trim() {
            "" => None,
            raw => Some(parse_uuid("category id", raw)?),
        };

        let serving_units = self
            .serving_units
            .iter()
            .map(|su| {
                let grams = parse_number("grams", &su.grams)?;
                if grams <= 0.0 {
                    return Err(AppError::Validation("grams must be greater than 0".into()));
                }
                Ok(ServingUnitDraft {
                    serving_unit_id: parse_uuid("serving unit id", su.serving_unit_id.trim())?,
                    grams,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        for (i, su) in serving_units.iter().enumerate() {
            if serving_units[..i]
                .iter()
                .any(|prev| prev.serving_unit_id == su.serving_unit_id)
            {
                return Err(AppError::Validation(format!(
                    "serving unit {} listed twice",
                    su.serving_unit_id
                )));
            }
        }

        Ok(FoodDraft {
            name,
            calories: parse_nutrient("calories", &self.calories)?,
            protein: parse_nutrient("protein", &self.protein)?,
            fat: parse_nutrient("fat", &self.fat)?,
            carbohydrates: parse_nutrient("carbohydrates", &self.carbohydrates)?,
            fiber: parse_nutrient("fiber", &self.fiber)?,
            sugar: parse_nutrient("sugar", &self.sugar)?,
            category_id,
            serving_units,
        })
    }
}

fn parse_number(label: &str, raw: &str) -> Result<f64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation(format!("{label} is required")));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::Validation(format!("{label} is not a number: {raw}"))),
    }
}

fn parse_nutrient(label: &str, raw: &str) -> Result<f64, AppError> {
    let v = parse_number(label, raw)?;
    if v < 0.0 {
        return Err(AppError::Validation(format!("{label} must not be negative")));
    }
    Ok(v)
}

fn parse_uuid(label: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("invalid {label}: {raw}")))
}
