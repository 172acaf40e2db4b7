//! Networked Postgres store, selected when a connection URL is configured.
//! Pool is bounded at min 1 / max 10 connections process-wide.

use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use async_trait::async_trait;

use super::rows::{now_ts, NewHeadache, NewMood, NewSleep, NewWater};
use super::schema::{headache_log, mood_log, sleep_log, users, water_log};
use super::db_err;
use crate::domains::{HeadacheEntry, MoodEntry, ProfileUpdate, SleepEntry, UserRecord, WaterEntry};
use crate::error::{HealthBotError, Result};
use crate::interfaces::repository::HealthRepo;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgres");

const POOL_MIN: u32 = 1;
const POOL_MAX: u32 = 10;

type PgPool = Pool<AsyncPgConnection>;
type PgPooledConn<'a> = PooledConnection<'a, AsyncPgConnection>;

pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub async fn connect(database_url: impl AsRef<str>) -> Result<Self> {
        let database_url = database_url.as_ref();
        run_migrations(database_url).await?;

        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool: PgPool = Pool::builder()
            .min_idle(Some(POOL_MIN))
            .max_size(POOL_MAX)
            .build(manager)
            .await
            .map_err(|e| HealthBotError::Database(e.to_string()))?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<PgPooledConn<'_>> {
        self.pool
            .get()
            .await
            .map_err(|e| HealthBotError::Database(e.to_string()))
    }
}

#[async_trait]
impl HealthRepo for PostgresRepo {
    async fn upsert_user(&self, user_id: i64, username: &str, full_name: &str) -> Result<()> {
        let now = now_ts();
        let mut conn = self.conn().await?;
        diesel::insert_into(users::table)
            .values((
                users::user_id.eq(user_id),
                users::username.eq(username),
                users::full_name.eq(full_name),
                users::created_at.eq(now),
                users::updated_at.eq(now),
            ))
            .on_conflict(users::user_id)
            .do_update()
            .set((
                users::username.eq(excluded(users::username)),
                users::full_name.eq(excluded(users::full_name)),
                users::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("upsert_user", e))?;
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let mut conn = self.conn().await?;
        users::table
            .find(user_id)
            .first::<UserRecord>(&mut conn)
            .await
            .optional()
            .map_err(|e| db_err("get_user", e))
    }

    async fn update_profile(&self, user_id: i64, profile: &ProfileUpdate) -> Result<()> {
        let mut conn = self.conn().await?;
        diesel::update(users::table.find(user_id))
            .set((
                users::gender.eq(&profile.gender),
                users::age.eq(profile.age),
                users::height.eq(profile.height),
                users::weight.eq(profile.weight),
                users::activity_level.eq(&profile.activity_level),
                users::goal.eq(&profile.goal),
                users::bmr.eq(profile.targets.bmr),
                users::tdee.eq(profile.targets.tdee),
                users::calories.eq(profile.targets.calories),
                users::protein.eq(profile.targets.protein),
                users::fat.eq(profile.targets.fat),
                users::carbs.eq(profile.targets.carbs),
                users::updated_at.eq(now_ts()),
            ))
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("update_profile", e))?;
        Ok(())
    }

    async fn has_profile(&self, user_id: i64) -> Result<bool> {
        let mut conn = self.conn().await?;
        let count: i64 = users::table
            .filter(users::user_id.eq(user_id))
            .filter(users::gender.is_not_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|e| db_err("has_profile", e))?;
        Ok(count > 0)
    }

    async fn set_water_goal(&self, user_id: i64, goal_ml: i32) -> Result<()> {
        let now = now_ts();
        let mut conn = self.conn().await?;
        diesel::insert_into(users::table)
            .values((
                users::user_id.eq(user_id),
                users::water_goal_ml.eq(goal_ml),
                users::created_at.eq(now),
                users::updated_at.eq(now),
            ))
            .on_conflict(users::user_id)
            .do_update()
            .set((
                users::water_goal_ml.eq(excluded(users::water_goal_ml)),
                users::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("set_water_goal", e))?;
        Ok(())
    }

    async fn get_water_goal(&self, user_id: i64) -> Result<Option<i32>> {
        let mut conn = self.conn().await?;
        let goal: Option<Option<i32>> = users::table
            .find(user_id)
            .select(users::water_goal_ml)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| db_err("get_water_goal", e))?;
        Ok(goal.flatten())
    }

    async fn log_water(&self, user_id: i64, amount_ml: i32, day: &str, ts: i64) -> Result<()> {
        let mut conn = self.conn().await?;
        diesel::insert_into(water_log::table)
            .values(&NewWater {
                user_id,
                amount_ml,
                logged_day: day,
                logged_at: ts,
            })
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("log_water", e))?;
        Ok(())
    }

    async fn water_today(&self, user_id: i64, day: &str) -> Result<i64> {
        let mut conn = self.conn().await?;
        let total: Option<i64> = water_log::table
            .filter(water_log::user_id.eq(user_id))
            .filter(water_log::logged_day.eq(day))
            .select(sum(water_log::amount_ml))
            .first(&mut conn)
            .await
            .map_err(|e| db_err("water_today", e))?;
        Ok(total.unwrap_or(0))
    }

    async fn water_week(
        &self,
        user_id: i64,
        first: &str,
        last: &str,
    ) -> Result<Vec<(String, i64)>> {
        let mut conn = self.conn().await?;
        let rows: Vec<(String, Option<i64>)> = water_log::table
            .filter(water_log::user_id.eq(user_id))
            .filter(water_log::logged_day.between(first, last))
            .group_by(water_log::logged_day)
            .select((water_log::logged_day, sum(water_log::amount_ml)))
            .load(&mut conn)
            .await
            .map_err(|e| db_err("water_week", e))?;
        Ok(rows
            .into_iter()
            .map(|(day, total)| (day, total.unwrap_or(0)))
            .collect())
    }

    async fn log_mood(
        &self,
        user_id: i64,
        emoji: &str,
        note: Option<&str>,
        day: &str,
        ts: i64,
    ) -> Result<()> {
        let mut conn = self.conn().await?;
        diesel::insert_into(mood_log::table)
            .values(&NewMood {
                user_id,
                emoji,
                note,
                logged_day: day,
                logged_at: ts,
            })
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("log_mood", e))?;
        Ok(())
    }

    async fn mood_history(&self, user_id: i64, limit: i64) -> Result<Vec<MoodEntry>> {
        let mut conn = self.conn().await?;
        mood_log::table
            .filter(mood_log::user_id.eq(user_id))
            .order(mood_log::logged_at.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(|e| db_err("mood_history", e))
    }

    async fn log_sleep(
        &self,
        user_id: i64,
        sleep_date: &str,
        hours: f64,
        quality: Option<i32>,
        ts: i64,
    ) -> Result<()> {
        let mut conn = self.conn().await?;
        diesel::insert_into(sleep_log::table)
            .values(&NewSleep {
                user_id,
                sleep_date,
                hours,
                quality,
                logged_at: ts,
            })
            .on_conflict((sleep_log::user_id, sleep_log::sleep_date))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("log_sleep", e))?;
        Ok(())
    }

    async fn sleep_history(&self, user_id: i64, limit: i64) -> Result<Vec<SleepEntry>> {
        let mut conn = self.conn().await?;
        sleep_log::table
            .filter(sleep_log::user_id.eq(user_id))
            .order(sleep_log::sleep_date.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(|e| db_err("sleep_history", e))
    }

    async fn log_headache(
        &self,
        user_id: i64,
        intensity: i32,
        location: Option<&str>,
        triggers: Option<&str>,
        duration_min: Option<i32>,
        day: &str,
        ts: i64,
    ) -> Result<()> {
        let mut conn = self.conn().await?;
        diesel::insert_into(headache_log::table)
            .values(&NewHeadache {
                user_id,
                intensity,
                location,
                triggers,
                duration_min,
                logged_day: day,
                logged_at: ts,
            })
            .execute(&mut conn)
            .await
            .map_err(|e| db_err("log_headache", e))?;
        Ok(())
    }

    async fn headache_history(&self, user_id: i64, limit: i64) -> Result<Vec<HeadacheEntry>> {
        let mut conn = self.conn().await?;
        headache_log::table
            .filter(headache_log::user_id.eq(user_id))
            .order(headache_log::logged_at.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(|e| db_err("headache_history", e))
    }

    async fn headache_count_today(&self, user_id: i64, day: &str) -> Result<i64> {
        let mut conn = self.conn().await?;
        headache_log::table
            .filter(headache_log::user_id.eq(user_id))
            .filter(headache_log::logged_day.eq(day))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|e| db_err("headache_count_today", e))
    }

    async fn all_water(&self, user_id: i64) -> Result<Vec<WaterEntry>> {
        let mut conn = self.conn().await?;
        water_log::table
            .filter(water_log::user_id.eq(user_id))
            .order(water_log::logged_at.asc())
            .load(&mut conn)
            .await
            .map_err(|e| db_err("all_water", e))
    }

    async fn all_mood(&self, user_id: i64) -> Result<Vec<MoodEntry>> {
        let mut conn = self.conn().await?;
        mood_log::table
            .filter(mood_log::user_id.eq(user_id))
            .order(mood_log::logged_at.asc())
            .load(&mut conn)
            .await
            .map_err(|e| db_err("all_mood", e))
    }

    async fn all_sleep(&self, user_id: i64) -> Result<Vec<SleepEntry>> {
        let mut conn = self.conn().await?;
        sleep_log::table
            .filter(sleep_log::user_id.eq(user_id))
            .order(sleep_log::sleep_date.asc())
            .load(&mut conn)
            .await
            .map_err(|e| db_err("all_sleep", e))
    }

    async fn all_headache(&self, user_id: i64) -> Result<Vec<HeadacheEntry>> {
        let mut conn = self.conn().await?;
        headache_log::table
            .filter(headache_log::user_id.eq(user_id))
            .order(headache_log::logged_at.asc())
            .load(&mut conn)
            .await
            .map_err(|e| db_err("all_headache", e))
    }

    async fn all_user_ids(&self) -> Result<Vec<i64>> {
        let mut conn = self.conn().await?;
        users::table
            .select(users::user_id)
            .order(users::user_id.asc())
            .load(&mut conn)
            .await
            .map_err(|e| db_err("all_user_ids", e))
    }
}

async fn run_migrations(database_url: &str) -> Result<()> {
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)
            .map_err(|e| HealthBotError::Database(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| HealthBotError::Database(e.to_string()))?;
        Ok::<_, HealthBotError>(())
    })
    .await
    .map_err(|e| HealthBotError::Runtime(e.to_string()))??;
    Ok(())
}
