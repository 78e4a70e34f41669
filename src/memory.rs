//! In-process user store and meal ledger.
//!
//! Used when no `DATABASE_URL` is configured and by the router tests. Users
//! and meals share one lock so deleting a user drops their meals in the same
//! step, the way the foreign key cascade does in PostgreSQL.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::meals::{LedgerEntry, Meal, MealChanges, MealLedger, NewMeal};
use crate::metrics::engine::sort_update_order;
use crate::users::{
    repo_types::{NewUser, User},
    UserStore,
};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    meals: Vec<Meal>, // creation order
    last_at: Option<OffsetDateTime>,
    last_seq: i64,
}

impl Inner {
    /// Next write stamp. `updated_at` never goes backwards even if the wall
    /// clock does, and `update_seq` is strictly increasing.
    fn stamp(&mut self) -> (OffsetDateTime, i64) {
        let now = OffsetDateTime::now_utc();
        let at = match self.last_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_at = Some(at);
        self.last_seq += 1;
        (at, self.last_seq)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let mut inner = self.inner.write().await;
        anyhow::ensure!(
            inner
                .users
                .iter()
                .all(|u| u.session_id != Some(user.session_id)),
            "session id already issued"
        );
        let user = User {
            id: Uuid::new_v4(),
            session_id: Some(user.session_id),
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_session(&self, session_id: Uuid) -> anyhow::Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.session_id == Some(session_id))
            .cloned())
    }

    async fn rotate_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> anyhow::Result<Option<User>> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.iter_mut().find(|u| u.id == user_id).map(|u| {
            u.session_id = Some(session_id);
            u.clone()
        }))
    }

    async fn delete(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != user_id);
        if inner.users.len() == before {
            return Ok(false);
        }
        inner.meals.retain(|m| m.user_id != user_id);
        Ok(true)
    }
}

#[async_trait]
impl MealLedger for MemoryStore {
    async fn create(&self, user_id: Uuid, meal: NewMeal) -> anyhow::Result<Meal> {
        let mut inner = self.inner.write().await;
        anyhow::ensure!(
            inner.users.iter().any(|u| u.id == user_id),
            "meal owner {user_id} does not exist"
        );
        let (now, seq) = inner.stamp();
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id,
            name: meal.name,
            description: meal.description,
            date_time: meal.date_time,
            is_in_diet: meal.is_in_diet,
            created_at: now,
            updated_at: now,
            update_seq: seq,
        };
        inner.meals.push(meal.clone());
        Ok(meal)
    }

    async fn list(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let inner = self.inner.read().await;
        Ok(inner
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let inner = self.inner.read().await;
        Ok(inner
            .meals
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>> {
        let mut inner = self.inner.write().await;
        let Some(idx) = inner
            .meals
            .iter()
            .position(|m| m.id == meal_id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        let (updated_at, seq) = inner.stamp();
        let meal = &mut inner.meals[idx];
        changes.apply(meal);
        meal.updated_at = updated_at;
        meal.update_seq = seq;
        Ok(Some(meal.clone()))
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.meals.len();
        inner
            .meals
            .retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(inner.meals.len() < before)
    }

    async fn entries(&self, user_id: Uuid) -> anyhow::Result<Vec<LedgerEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<LedgerEntry> = inner
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(LedgerEntry::from)
            .collect();
        sort_update_order(&mut entries);
        Ok(entries)
    }
}
