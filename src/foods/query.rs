//! Food filter composition.
//!
//! A [`FilterState`] is turned into an immutable list of [`FoodPredicate`]s
//! plus sort and page settings. The same list is folded into a SQL `WHERE`
//! clause for Postgres and evaluated directly by the in-memory catalog.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use super::filters::{FilterState, SortBy, SortOrder, ANY_CATEGORY};
use super::repo_types::Food;
use crate::error::AppError;
use crate::pagination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Calories,
    Protein,
}

impl NumericField {
    fn column(self) -> &'static str {
        match self {
            NumericField::Calories => "f.calories",
            NumericField::Protein => "f.protein",
        }
    }

    fn label(self) -> &'static str {
        match self {
            NumericField::Calories => "calories",
            NumericField::Protein => "protein",
        }
    }

    fn value_of(self, food: &Food) -> f64 {
        match self {
            NumericField::Calories => food.calories,
            NumericField::Protein => food.protein,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FoodPredicate {
    NameContains(String),
    Range {
        field: NumericField,
        min: Option<f64>,
        max: Option<f64>,
    },
    CategoryIs(Uuid),
}

impl FoodPredicate {
    fn matches(&self, food: &Food) -> bool {
        match self {
            FoodPredicate::NameContains(term) => food.name.contains(term.as_str()),
            FoodPredicate::Range { field, min, max } => {
                let v = field.value_of(food);
                min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
            }
            FoodPredicate::CategoryIs(id) => food.category_id == Some(*id),
        }
    }

    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            FoodPredicate::NameContains(term) => {
                qb.push("strpos(f.name, ").push_bind(term.clone()).push(") > 0");
            }
            FoodPredicate::Range { field, min, max } => {
                let mut sep = "";
                if let Some(min) = min {
                    qb.push(field.column()).push(" >= ").push_bind(*min);
                    sep = " AND ";
                }
                if let Some(max) = max {
                    qb.push(sep).push(field.column()).push(" <= ").push_bind(*max);
                }
            }
            FoodPredicate::CategoryIs(id) => {
                qb.push("f.category_id = ").push_bind(*id);
            }
        }
    }
}

/// Conjunction of predicates with a single-key sort and one page window.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodQuery {
    predicates: Vec<FoodPredicate>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl FoodQuery {
    /// Validates the filter shape and composes the query. Nothing touches the
    /// store if this fails.
    pub fn from_filters(filters: &FilterState) -> Result<Self, AppError> {
        filters.validate()?;

        let mut predicates = Vec::new();

        // Blank input means no search; otherwise the term is matched as typed.
        if !filters.search_term.trim().is_empty() {
            predicates.push(FoodPredicate::NameContains(filters.search_term.clone()));
        }

        for (field, range) in [
            (NumericField::Calories, &filters.calories_range),
            (NumericField::Protein, &filters.protein_range),
        ] {
            let min = parse_bound(field, "lower", &range.0)?;
            let max = parse_bound(field, "upper", &range.1)?;
            if min.is_some() || max.is_some() {
                predicates.push(FoodPredicate::Range { field, min, max });
            }
        }

        if let Some(raw) = filters.category_id.as_deref().map(str::trim) {
            if !raw.is_empty() && raw != ANY_CATEGORY {
                let id = Uuid::parse_str(raw)
                    .map_err(|_| AppError::Validation(format!("invalid category id: {raw}")))?;
                predicates.push(FoodPredicate::CategoryIs(id));
            }
        }

        Ok(Self {
            predicates,
            sort_by: filters.sort_by,
            sort_order: filters.sort_order,
            page: filters.page,
            page_size: filters.page_size,
        })
    }

    pub fn predicates(&self) -> &[FoodPredicate] {
        &self.predicates
    }

    pub fn offset(&self) -> i64 {
        pagination::offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn matches(&self, food: &Food) -> bool {
        self.predicates.iter().all(|p| p.matches(food))
    }

    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut sep = " WHERE ";
        for p in &self.predicates {
            qb.push(sep);
            p.push_sql(qb);
            sep = " AND ";
        }
    }

    pub fn push_order_and_page(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" ORDER BY ")
            .push(self.sort_by.column())
            .push(" ")
            .push(self.sort_order.keyword());
        qb.push(" LIMIT ")
            .push_bind(self.limit())
            .push(" OFFSET ")
            .push_bind(self.offset());
    }

    /// Orders foods in memory the way `ORDER BY` does for the chosen key.
    pub fn compare(&self, a: &Food, b: &Food) -> std::cmp::Ordering {
        let ord = match self.sort_by {
            SortBy::Name => a.name.cmp(&b.name),
            SortBy::Calories => a.calories.total_cmp(&b.calories),
            SortBy::Carbohydrates => a.carbohydrates.total_cmp(&b.carbohydrates),
            SortBy::Fat => a.fat.total_cmp(&b.fat),
            SortBy::Protein => a.protein.total_cmp(&b.protein),
        };
        match self.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

fn parse_bound(field: NumericField, side: &str, raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(AppError::Validation(format!(
            "{} {side} bound is not a number: {raw}",
            field.label()
        ))),
    }
}
