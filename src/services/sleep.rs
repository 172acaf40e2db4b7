//! Sleep tracking helpers: averages, recommendation against the 7-9h norm.

use crate::domains::SleepEntry;

pub const SLEEP_NORM_MIN: f64 = 7.0;
pub const SLEEP_NORM_MAX: f64 = 9.0;

pub fn quality_label(quality: i32) -> &'static str {
    match quality {
        3 => "excellent",
        2 => "good",
        1 => "poor",
        _ => "—",
    }
}

pub fn calc_sleep_avg(rows: &[SleepEntry]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total: f64 = rows.iter().map(|row| row.hours).sum();
    (total / rows.len() as f64 * 10.0).round() / 10.0
}

pub fn sleep_recommendation(avg_hours: f64) -> String {
    if avg_hours == 0.0 {
        return "Start tracking your sleep — the norm is 7-9 hours.".to_string();
    }
    if avg_hours < SLEEP_NORM_MIN {
        let deficit = ((SLEEP_NORM_MIN - avg_hours) * 10.0).round() / 10.0;
        return format!("Sleep deficit: averaging {avg_hours}h. Add {deficit}h to reach the norm.");
    }
    if avg_hours > SLEEP_NORM_MAX {
        let excess = ((avg_hours - SLEEP_NORM_MAX) * 10.0).round() / 10.0;
        return format!("Oversleeping: averaging {avg_hours}h. Norm is up to {SLEEP_NORM_MAX}h (+{excess}h).");
    }
    format!("Great! Averaging {avg_hours}h — within the norm.")
}

pub fn fmt_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}")
    } else {
        format!("{hours}")
    }
}

pub fn sleep_chart(rows: &[SleepEntry]) -> String {
    if rows.is_empty() {
        return "No entries.".to_string();
    }
    rows.iter()
        .map(|row| {
            let day = if row.sleep_date.len() >= 10 {
                &row.sleep_date[5..10]
            } else {
                row.sleep_date.as_str()
            };
            let quality = row.quality.map(quality_label).unwrap_or("—");
            let icon = if row.hours >= SLEEP_NORM_MIN {
                "🌙"
            } else if row.hours >= 5.0 {
                "🌛"
            } else {
                "😵"
            };
            format!("{day} {icon} {}h [{quality}]", fmt_hours(row.hours))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_sleep_status(rows: &[SleepEntry]) -> String {
    let avg = calc_sleep_avg(rows);
    let rec = sleep_recommendation(avg);
    let chart = sleep_chart(rows);
    format!("😴 Sleep\n\nRecent entries:\n{chart}\n\n💡 {rec}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, hours: f64, quality: Option<i32>) -> SleepEntry {
        SleepEntry {
            id: 0,
            user_id: 1,
            sleep_date: date.to_string(),
            hours,
            quality,
            logged_at: 0,
        }
    }

    #[test]
    fn average_rounds_to_tenth() {
        let rows = vec![
            entry("2026-01-01", 7.0, None),
            entry("2026-01-02", 8.5, None),
        ];
        assert_eq!(calc_sleep_avg(&rows), 7.8);
        assert_eq!(calc_sleep_avg(&[]), 0.0);
    }

    #[test]
    fn recommendation_bands() {
        assert!(sleep_recommendation(0.0).contains("Start tracking"));
        assert!(sleep_recommendation(6.0).contains("deficit"));
        assert!(sleep_recommendation(9.5).contains("Oversleeping"));
        assert!(sleep_recommendation(8.0).contains("within the norm"));
    }

    #[test]
    fn chart_labels_quality() {
        let rows = vec![entry("2026-01-05", 7.5, Some(3))];
        let chart = sleep_chart(&rows);
        assert!(chart.contains("01-05 🌙 7.5h [excellent]"));
        let rows = vec![entry("2026-01-05", 4.0, None)];
        assert!(sleep_chart(&rows).contains("😵"));
    }
}
