//! Aggregated views: daily summary, weekly report, CSV export.

use chrono::TimeZone;
use chrono_tz::Tz;

use crate::domains::{HeadacheEntry, MoodEntry, SleepEntry, UserRecord, WaterEntry};
use crate::error::{HealthBotError, Result};
use crate::services::headache::format_headache_entry;
use crate::services::mood::{calc_trend, Trend};
use crate::services::sleep::{calc_sleep_avg, fmt_hours, quality_label, sleep_recommendation};
use crate::services::water::{progress_bar, week_chart};

/// UTF-8 byte order mark so spreadsheet apps detect the encoding.
const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub fn format_today_summary(
    user: Option<&UserRecord>,
    water_ml: i64,
    water_goal_ml: i32,
    mood: Option<&MoodEntry>,
    sleep: Option<&SleepEntry>,
    headache_count: i64,
) -> String {
    let mut lines = vec!["📋 Today".to_string(), String::new()];

    lines.push(format!("💧 {}", progress_bar(water_ml, water_goal_ml)));

    match mood {
        Some(entry) => {
            let note = entry
                .note
                .as_deref()
                .map(|n| format!(" — {n}"))
                .unwrap_or_default();
            lines.push(format!("😊 Mood: {}{note}", entry.emoji));
        }
        None => lines.push("😊 Mood: not logged".to_string()),
    }

    match sleep {
        Some(entry) => {
            let quality = entry
                .quality
                .map(|q| format!(" [{}]", quality_label(q)))
                .unwrap_or_default();
            lines.push(format!("😴 Sleep: {}h{quality}", fmt_hours(entry.hours)));
        }
        None => lines.push("😴 Sleep: not logged".to_string()),
    }

    if headache_count > 0 {
        lines.push(format!("🤕 Headaches: {headache_count}"));
    } else {
        lines.push("🤕 Headaches: none".to_string());
    }

    if let Some(user) = user {
        if let (Some(calories), Some(protein), Some(fat), Some(carbs)) =
            (user.calories, user.protein, user.fat, user.carbs)
        {
            lines.push(String::new());
            lines.push(format!(
                "🎯 Targets: {calories} kcal · P {protein}g / F {fat}g / C {carbs}g"
            ));
        }
    }

    lines.join("\n")
}

pub fn format_week_report(
    water_week: &[(String, i64)],
    water_goal_ml: i32,
    moods: &[MoodEntry],
    sleeps: &[SleepEntry],
    headaches: &[HeadacheEntry],
) -> String {
    let mut sections = vec!["📈 Week".to_string()];

    let water_total: i64 = water_week.iter().map(|(_, amount)| amount).sum();
    let water_avg = if water_week.is_empty() {
        0
    } else {
        water_total / water_week.len() as i64
    };
    sections.push(format!(
        "\n💧 Water (avg {water_avg} ml/day)\n{}",
        week_chart(water_week, water_goal_ml)
    ));

    if moods.is_empty() {
        sections.push("\n😊 Mood: no entries".to_string());
    } else {
        let trend = calc_trend(moods);
        let trend_note = match trend {
            Trend::Improving => "improving 📈",
            Trend::Declining => "declining 📉",
            Trend::Steady => "steady ➡️",
        };
        sections.push(format!(
            "\n😊 Mood: {} entries, trend {trend_note}",
            moods.len()
        ));
    }

    if sleeps.is_empty() {
        sections.push("\n😴 Sleep: no entries".to_string());
    } else {
        let avg = calc_sleep_avg(sleeps);
        sections.push(format!("\n😴 Sleep: {}", sleep_recommendation(avg)));
    }

    if headaches.is_empty() {
        sections.push("\n🤕 Headaches: none this week".to_string());
    } else {
        let lines: Vec<String> = headaches.iter().map(format_headache_entry).collect();
        sections.push(format!("\n🤕 Headaches:\n{}", lines.join("\n")));
    }

    sections.join("\n")
}

fn fmt_ts(ts: i64, tz: &Tz) -> String {
    match tz.timestamp_opt(ts, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        _ => ts.to_string(),
    }
}

fn csv_err(err: impl std::fmt::Display) -> HealthBotError {
    HealthBotError::Runtime(format!("csv export failed: {err}"))
}

/// Full history export as a single CSV document with one section per log,
/// prefixed with a UTF-8 BOM.
pub fn build_csv(
    tz: &Tz,
    water: &[WaterEntry],
    moods: &[MoodEntry],
    sleeps: &[SleepEntry],
    headaches: &[HeadacheEntry],
) -> Result<Vec<u8>> {
    // Section headers and per-log rows have different widths.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(BOM.to_vec());

    writer.write_record(["=== WATER LOG ==="]).map_err(csv_err)?;
    writer
        .write_record(["date", "time", "amount_ml"])
        .map_err(csv_err)?;
    for entry in water {
        writer
            .write_record([
                entry.logged_day.clone(),
                fmt_ts(entry.logged_at, tz),
                entry.amount_ml.to_string(),
            ])
            .map_err(csv_err)?;
    }

    writer.write_record([""]).map_err(csv_err)?;
    writer.write_record(["=== MOOD LOG ==="]).map_err(csv_err)?;
    writer
        .write_record(["date", "time", "mood", "note"])
        .map_err(csv_err)?;
    for entry in moods {
        writer
            .write_record([
                entry.logged_day.clone(),
                fmt_ts(entry.logged_at, tz),
                entry.emoji.clone(),
                entry.note.clone().unwrap_or_default(),
            ])
            .map_err(csv_err)?;
    }

    writer.write_record([""]).map_err(csv_err)?;
    writer.write_record(["=== SLEEP LOG ==="]).map_err(csv_err)?;
    writer
        .write_record(["date", "hours", "quality"])
        .map_err(csv_err)?;
    for entry in sleeps {
        writer
            .write_record([
                entry.sleep_date.clone(),
                entry.hours.to_string(),
                entry.quality.map(|q| quality_label(q).to_string()).unwrap_or_default(),
            ])
            .map_err(csv_err)?;
    }

    writer.write_record([""]).map_err(csv_err)?;
    writer
        .write_record(["=== HEADACHE LOG ==="])
        .map_err(csv_err)?;
    writer
        .write_record(["date", "time", "intensity", "location", "triggers", "duration"])
        .map_err(csv_err)?;
    for entry in headaches {
        let triggers = entry
            .triggers
            .as_deref()
            .map(|raw| {
                crate::services::headache::triggers_from_str(raw)
                    .iter()
                    .map(|key| crate::services::headache::trigger_label(key).to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        writer
            .write_record([
                entry.logged_day.clone(),
                fmt_ts(entry.logged_at, tz),
                entry.intensity.to_string(),
                entry
                    .location
                    .as_deref()
                    .map(|key| crate::services::headache::location_label(key).to_string())
                    .unwrap_or_default(),
                triggers,
                entry
                    .duration_min
                    .map(crate::services::headache::format_duration)
                    .unwrap_or_default(),
            ])
            .map_err(csv_err)?;
    }

    writer.into_inner().map_err(csv_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tz() -> Tz {
        "Europe/Belgrade".parse().unwrap()
    }

    fn water_entry(amount: i32) -> WaterEntry {
        WaterEntry {
            id: 0,
            user_id: 1,
            amount_ml: amount,
            logged_day: "2026-05-01".to_string(),
            logged_at: 1_777_000_000,
        }
    }

    #[test]
    fn csv_starts_with_bom_and_has_sections() {
        let bytes = build_csv(&tz(), &[water_entry(500)], &[], &[], &[]).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.contains("=== WATER LOG ==="));
        assert!(text.contains("=== MOOD LOG ==="));
        assert!(text.contains("=== SLEEP LOG ==="));
        assert!(text.contains("=== HEADACHE LOG ==="));
        assert!(text.contains("500"));
    }

    #[test]
    fn today_summary_handles_missing_logs() {
        let text = format_today_summary(None, 750, 2000, None, None, 0);
        assert!(text.contains("750/2000 ml"));
        assert!(text.contains("Mood: not logged"));
        assert!(text.contains("Sleep: not logged"));
        assert!(text.contains("Headaches: none"));
    }

    #[test]
    fn week_report_covers_all_logs() {
        let week = vec![("2026-05-01".to_string(), 2000_i64)];
        let text = format_week_report(&week, 2000, &[], &[], &[]);
        assert!(text.contains("💧 Water"));
        assert!(text.contains("Mood: no entries"));
        assert!(text.contains("Sleep: no entries"));
        assert!(text.contains("Headaches: none this week"));
    }
}
