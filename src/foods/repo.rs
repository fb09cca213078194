use std::collections::HashMap;

use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use super::query::FoodQuery;
use super::repo_types::{Food, FoodDraft, FoodRow, FoodServingUnit, FoodServingUnitRow};
use crate::catalog::classify;

const FOOD_COLUMNS: &str = r#"
    SELECT f.id, f.name, f.calories, f.protein, f.fat, f.carbohydrates, f.fiber, f.sugar,
           f.category_id, c.name AS category_name
      FROM foods f
      LEFT JOIN categories c ON c.id = f.category_id
"#;

/// Number of foods matching the query, ignoring its page window.
pub async fn count(db: &PgPool, query: &FoodQuery) -> anyhow::Result<i64> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM foods f");
    query.push_where(&mut qb);
    let total = qb
        .build_query_scalar::<i64>()
        .fetch_one(db)
        .await
        .context("count foods")?;
    Ok(total)
}

/// One page of foods with their serving units attached.
pub async fn fetch_page(db: &PgPool, query: &FoodQuery) -> anyhow::Result<Vec<Food>> {
    let mut qb = QueryBuilder::<Postgres>::new(FOOD_COLUMNS);
    query.push_where(&mut qb);
    query.push_order_and_page(&mut qb);
    let rows = qb
        .build_query_as::<FoodRow>()
        .fetch_all(db)
        .await
        .context("fetch food page")?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut units = serving_units_for(db, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let su = units.remove(&r.id).unwrap_or_default();
            Food::from_row(r, su)
        })
        .collect())
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, FoodRow>(&format!("{FOOD_COLUMNS} WHERE f.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find food by id")?;
    let Some(row) = row else {
        return Ok(None);
    };
    let mut units = serving_units_for(db, &[id]).await?;
    Ok(Some(Food::from_row(row, units.remove(&id).unwrap_or_default())))
}

pub async fn create(db: &PgPool, draft: &FoodDraft) -> anyhow::Result<Food> {
    let id = Uuid::new_v4();
    let mut tx = db.begin().await.context("begin tx")?;
    sqlx::query(
        r#"
        INSERT INTO foods (id, name, calories, protein, fat, carbohydrates, fiber, sugar, category_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(draft.calories)
    .bind(draft.protein)
    .bind(draft.fat)
    .bind(draft.carbohydrates)
    .bind(draft.fiber)
    .bind(draft.sugar)
    .bind(draft.category_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| classify(e, "insert food"))?;
    replace_serving_units_tx(&mut tx, id, draft).await?;
    tx.commit().await.context("commit tx")?;

    find_by_id(db, id)
        .await?
        .context("food vanished after insert")
}

pub async fn update(db: &PgPool, id: Uuid, draft: &FoodDraft) -> anyhow::Result<Option<Food>> {
    let mut tx = db.begin().await.context("begin tx")?;
    let res = sqlx::query(
        r#"
        UPDATE foods
           SET name = $2, calories = $3, protein = $4, fat = $5,
               carbohydrates = $6, fiber = $7, sugar = $8, category_id = $9
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(draft.calories)
    .bind(draft.protein)
    .bind(draft.fat)
    .bind(draft.carbohydrates)
    .bind(draft.fiber)
    .bind(draft.sugar)
    .bind(draft.category_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| classify(e, "update food"))?;
    if res.rows_affected() == 0 {
        return Ok(None);
    }
    replace_serving_units_tx(&mut tx, id, draft).await?;
    tx.commit().await.context("commit tx")?;

    find_by_id(db, id).await
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete food")?;
    Ok(res.rows_affected() > 0)
}

async fn replace_serving_units_tx(
    tx: &mut Transaction<'_, Postgres>,
    food_id: Uuid,
    draft: &FoodDraft,
) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM food_serving_units WHERE food_id = $1")
        .bind(food_id)
        .execute(&mut **tx)
        .await
        .context("clear food serving units")?;

    for (position, su) in draft.serving_units.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO food_serving_units (food_id, serving_unit_id, grams, position)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(food_id)
        .bind(su.serving_unit_id)
        .bind(su.grams)
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(|e| classify(e, "insert food serving unit"))?;
    }
    Ok(())
}

async fn serving_units_for(
    db: &PgPool,
    food_ids: &[Uuid],
) -> anyhow::Result<HashMap<Uuid, Vec<FoodServingUnit>>> {
    if food_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = sqlx::query_as::<_, FoodServingUnitRow>(
        r#"
        SELECT fsu.food_id, fsu.serving_unit_id, su.name AS serving_unit_name, fsu.grams
          FROM food_serving_units fsu
          JOIN serving_units su ON su.id = fsu.serving_unit_id
         WHERE fsu.food_id = ANY($1)
         ORDER BY fsu.food_id, fsu.position ASC
        "#,
    )
    .bind(food_ids)
    .fetch_all(db)
    .await
    .context("list food serving units")?;

    let mut out: HashMap<Uuid, Vec<FoodServingUnit>> = HashMap::new();
    for r in rows {
        out.entry(r.food_id).or_default().push(r.into());
    }
    Ok(out)
}
