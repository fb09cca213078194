use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::catalog::classify;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ServingUnit {
    pub id: Uuid,
    pub name: String,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<ServingUnit>> {
    let rows = sqlx::query_as::<_, ServingUnit>("SELECT id, name FROM serving_units ORDER BY name ASC")
        .fetch_all(db)
        .await
        .context("list serving units")?;
    Ok(rows)
}

pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<ServingUnit>> {
    let row = sqlx::query_as::<_, ServingUnit>("SELECT id, name FROM serving_units WHERE name = $1")
        .bind(name)
        .fetch_optional(db)
        .await
        .context("find serving unit by name")?;
    Ok(row)
}

pub async fn create(db: &PgPool, name: &str) -> anyhow::Result<ServingUnit> {
    let row = sqlx::query_as::<_, ServingUnit>(
        r#"
        INSERT INTO serving_units (id, name)
        VALUES ($1, $2)
        RETURNING id, name
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(db)
    .await
    .map_err(|e| classify(e, "insert serving unit"))?;
    Ok(row)
}
