//! Water tracking helpers: default goal, progress bar, weekly chart.

use chrono::{Duration, NaiveDate};

const BLOCKS: usize = 8;
const FILLED: &str = "🟦";
const EMPTY: &str = "⬜";

const DEFAULT_GOAL_FEMALE_ML: i32 = 2500;
const DEFAULT_GOAL_MALE_ML: i32 = 3500;
const WEIGHT_FACTOR_ML: f64 = 30.0;

pub const GOAL_FLOOR_ML: i32 = 1500;
pub const GOAL_CEIL_ML: i32 = 4000;

/// Goal by weight (30 ml/kg) when known, else a flat sex default; always
/// clamped to [1500, 4000] ml.
pub fn calc_default_goal(gender: Option<&str>, weight_kg: Option<f64>) -> i32 {
    let goal = match weight_kg {
        Some(weight) if weight > 0.0 => (weight * WEIGHT_FACTOR_ML) as i32,
        _ if gender == Some("female") => DEFAULT_GOAL_FEMALE_ML,
        _ => DEFAULT_GOAL_MALE_ML,
    };
    goal.clamp(GOAL_FLOOR_ML, GOAL_CEIL_ML)
}

/// `🟦🟦⬜⬜⬜⬜⬜⬜ 375/2000 ml (18%)`
pub fn progress_bar(current_ml: i64, goal_ml: i32) -> String {
    if goal_ml <= 0 {
        return format!("{} {current_ml} ml", EMPTY.repeat(BLOCKS));
    }
    let ratio = (current_ml as f64 / f64::from(goal_ml)).min(1.0);
    let filled = (ratio * BLOCKS as f64).round() as usize;
    let bar = format!("{}{}", FILLED.repeat(filled), EMPTY.repeat(BLOCKS - filled));
    let pct = (ratio * 100.0) as i32;
    format!("{bar} {current_ml}/{goal_ml} ml ({pct}%)")
}

/// Last 7 days including `today`, oldest first, as YYYY-MM-DD strings.
pub fn week_dates(today: NaiveDate) -> Vec<String> {
    (0..7)
        .rev()
        .map(|back| (today - Duration::days(back)).format("%Y-%m-%d").to_string())
        .collect()
}

/// Zero-fill the per-day totals so every requested day has a bucket.
pub fn merge_week(days: &[String], totals: &[(String, i64)]) -> Vec<(String, i64)> {
    days.iter()
        .map(|day| {
            let total = totals
                .iter()
                .find(|(d, _)| d == day)
                .map(|(_, t)| *t)
                .unwrap_or(0);
            (day.clone(), total)
        })
        .collect()
}

pub fn week_chart(week: &[(String, i64)], goal_ml: i32) -> String {
    week.iter()
        .map(|(day, amount)| {
            let label = if day.len() >= 10 { &day[5..10] } else { day.as_str() };
            let ratio = if goal_ml > 0 {
                *amount as f64 / f64::from(goal_ml)
            } else {
                0.0
            };
            let icon = if ratio >= 1.0 {
                "💧"
            } else if ratio >= 0.5 {
                "🔹"
            } else {
                "▫️"
            };
            format!("{label} {icon} {amount} ml")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_water_status(current_ml: i64, goal_ml: i32, week: &[(String, i64)]) -> String {
    let bar = progress_bar(current_ml, goal_ml);
    let avg = if week.is_empty() {
        0
    } else {
        week.iter().map(|(_, amount)| amount).sum::<i64>() / week.len() as i64
    };
    let chart = week_chart(week, goal_ml);
    format!("💧 Water today\n\n{bar}\n\n📅 Last 7 days\n{chart}\n\nWeekly average: {avg} ml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_goal_is_clamped() {
        assert_eq!(calc_default_goal(Some("female"), Some(30.0)), 1500);
        assert_eq!(calc_default_goal(Some("male"), Some(200.0)), 4000);
        assert_eq!(calc_default_goal(Some("female"), None), 2500);
        assert_eq!(calc_default_goal(Some("male"), None), 3500);
        assert_eq!(calc_default_goal(None, None), 3500);
        assert_eq!(calc_default_goal(None, Some(70.0)), 2100);
        // non-positive weight falls through to sex default
        assert_eq!(calc_default_goal(Some("female"), Some(0.0)), 2500);
    }

    #[test]
    fn progress_bar_shape() {
        let bar = progress_bar(375, 2000);
        assert!(bar.contains("375/2000 ml"));
        assert!(bar.contains("(18%)"));
        let full = progress_bar(2500, 2000);
        assert!(full.contains("(100%)"));
        assert!(!full.contains(EMPTY));
        let empty = progress_bar(0, 2000);
        assert!(empty.starts_with(EMPTY));
    }

    #[test]
    fn week_dates_span_seven_days_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let days = week_dates(today);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], "2026-03-04");
        assert_eq!(days[6], "2026-03-10");
    }

    #[test]
    fn merge_week_zero_fills() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let days = week_dates(today);
        let merged = merge_week(&days, &[("2026-03-10".to_string(), 500)]);
        assert_eq!(merged.len(), 7);
        assert_eq!(merged[6], ("2026-03-10".to_string(), 500));
        assert!(merged[..6].iter().all(|(_, total)| *total == 0));
    }
}
