use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::catalog::classify;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
          FROM categories
         ORDER BY name ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("list categories")?;
    Ok(rows)
}

pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<Category>> {
    let row = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(db)
        .await
        .context("find category by name")?;
    Ok(row)
}

pub async fn create(db: &PgPool, name: &str) -> anyhow::Result<Category> {
    let row = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (id, name)
        VALUES ($1, $2)
        RETURNING id, name
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(db)
    .await
    .map_err(|e| classify(e, "insert category"))?;
    Ok(row)
}

pub async fn rename(db: &PgPool, id: Uuid, name: &str) -> anyhow::Result<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
           SET name = $2
         WHERE id = $1
        RETURNING id, name
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_optional(db)
    .await
    .map_err(|e| classify(e, "rename category"))?;
    Ok(row)
}
