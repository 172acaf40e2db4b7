use diesel::prelude::*;

use super::schema::{headache_log, mood_log, sleep_log, water_log};

#[derive(Insertable)]
#[diesel(table_name = water_log)]
pub(crate) struct NewWater<'a> {
    pub user_id: i64,
    pub amount_ml: i32,
    pub logged_day: &'a str,
    pub logged_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = mood_log)]
pub(crate) struct NewMood<'a> {
    pub user_id: i64,
    pub emoji: &'a str,
    pub note: Option<&'a str>,
    pub logged_day: &'a str,
    pub logged_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = sleep_log)]
pub(crate) struct NewSleep<'a> {
    pub user_id: i64,
    pub sleep_date: &'a str,
    pub hours: f64,
    pub quality: Option<i32>,
    pub logged_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = headache_log)]
pub(crate) struct NewHeadache<'a> {
    pub user_id: i64,
    pub intensity: i32,
    pub location: Option<&'a str>,
    pub triggers: Option<&'a str>,
    pub duration_min: Option<i32>,
    pub logged_day: &'a str,
    pub logged_at: i64,
}

pub(crate) fn now_ts() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
