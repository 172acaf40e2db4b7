use diesel::prelude::*;
use serde::Serialize;

/// A user row. Nutrition targets (bmr..carbs) are set together by one
/// profile update and are either all present or all absent.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub fat: Option<i32>,
    pub carbs: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
    pub water_goal_ml: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Serialize)]
pub struct WaterEntry {
    pub id: i32,
    pub user_id: i64,
    pub amount_ml: i32,
    pub logged_day: String,
    pub logged_at: i64,
}

#[derive(Debug, Clone, Queryable, Serialize)]
pub struct MoodEntry {
    pub id: i32,
    pub user_id: i64,
    pub emoji: String,
    pub note: Option<String>,
    pub logged_day: String,
    pub logged_at: i64,
}

#[derive(Debug, Clone, Queryable, Serialize)]
pub struct SleepEntry {
    pub id: i32,
    pub user_id: i64,
    pub sleep_date: String,
    pub hours: f64,
    pub quality: Option<i32>,
    pub logged_at: i64,
}

#[derive(Debug, Clone, Queryable, Serialize)]
pub struct HeadacheEntry {
    pub id: i32,
    pub user_id: i64,
    pub intensity: i32,
    pub location: Option<String>,
    pub triggers: Option<String>,
    pub duration_min: Option<i32>,
    pub logged_day: String,
    pub logged_at: i64,
}

/// Derived daily nutrition targets, computed by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
}

/// Full profile payload written atomically by the profile wizard.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub gender: String,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub goal: String,
    pub targets: NutritionTargets,
}
