use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{LedgerEntry, Meal, MealChanges, NewMeal};
use crate::db::PgStore;

/// Per-user log of meals. Every write assigns a fresh `updated_at` and
/// `update_seq`, which together define the update order metrics read in.
#[async_trait]
pub trait MealLedger: Send + Sync {
    async fn create(&self, user_id: Uuid, meal: NewMeal) -> anyhow::Result<Meal>;
    /// All meals of a user in creation order.
    async fn list(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>>;
    async fn get(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>>;
    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>>;
    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
    /// Ledger entries ascending by (`updated_at`, `update_seq`).
    async fn entries(&self, user_id: Uuid) -> anyhow::Result<Vec<LedgerEntry>>;
}

const MEAL_COLUMNS: &str =
    "id, user_id, name, description, date_time, is_in_diet, created_at, updated_at, update_seq";

#[async_trait]
impl MealLedger for PgStore {
    async fn create(&self, user_id: Uuid, meal: NewMeal) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, Meal>(&format!(
            r#"
            INSERT INTO meals (id, user_id, name, description, date_time, is_in_diet)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MEAL_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.date_time)
        .bind(meal.is_in_diet)
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Ok(row)
    }

    async fn list(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
              FROM meals
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meals by user")?;
        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, Meal>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
              FROM meals
             WHERE id = $1 AND user_id = $2
            "#
        ))
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get meal")?;
        Ok(row)
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, Meal>(&format!(
            r#"
            UPDATE meals
               SET name        = COALESCE($3, name),
                   description = COALESCE($4, description),
                   date_time   = COALESCE($5, date_time),
                   is_in_diet  = COALESCE($6, is_in_diet),
                   updated_at  = GREATEST(clock_timestamp(), updated_at),
                   update_seq  = nextval('meal_update_seq')
             WHERE id = $1 AND user_id = $2
            RETURNING {MEAL_COLUMNS}
            "#
        ))
        .bind(meal_id)
        .bind(user_id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.date_time)
        .bind(changes.is_in_diet)
        .fetch_optional(&self.db)
        .await
        .context("update meal")?;
        Ok(row)
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(result.rows_affected() > 0)
    }

    async fn entries(&self, user_id: Uuid) -> anyhow::Result<Vec<LedgerEntry>> {
        let rows = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT updated_at, update_seq, is_in_diet
              FROM meals
             WHERE user_id = $1
             ORDER BY updated_at ASC, update_seq ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list ledger entries")?;
        Ok(rows)
    }
}
