//! Headache log helpers: location/trigger vocabularies, entry formatting,
//! simple analytics over the recent history.

use crate::domains::HeadacheEntry;

pub const LOCATIONS: [(&str, &str); 5] = [
    ("whole", "Whole head"),
    ("temples", "Temples"),
    ("forehead", "Forehead"),
    ("occiput", "Back of head"),
    ("one_side", "One side"),
];

pub const TRIGGERS: [(&str, &str); 6] = [
    ("stress", "Stress"),
    ("sleep", "Lack of sleep"),
    ("food", "Food"),
    ("weather", "Weather"),
    ("screens", "Screen time"),
    ("other", "Other"),
];

/// Preset durations offered by the wizard, in minutes.
pub const DURATIONS_MIN: [i32; 6] = [15, 30, 60, 120, 240, 480];

pub fn location_label(key: &str) -> &str {
    LOCATIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

pub fn trigger_label(key: &str) -> &str {
    TRIGGERS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Storage form is a comma-joined key list ("stress,screens").
pub fn triggers_to_str(keys: &[String]) -> Option<String> {
    if keys.is_empty() {
        None
    } else {
        Some(keys.join(","))
    }
}

pub fn triggers_from_str(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_duration(minutes: i32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{hours} h")
    } else {
        format!("{hours} h {rest} min")
    }
}

pub fn intensity_icon(intensity: i32) -> &'static str {
    if intensity >= 8 {
        "🔴"
    } else if intensity >= 5 {
        "🟠"
    } else {
        "🟡"
    }
}

pub fn format_headache_entry(entry: &HeadacheEntry) -> String {
    let mut parts = vec![format!(
        "{} {} {}/10",
        entry.logged_day,
        intensity_icon(entry.intensity),
        entry.intensity
    )];
    if let Some(location) = &entry.location {
        parts.push(location_label(location).to_string());
    }
    if let Some(triggers) = &entry.triggers {
        let labels: Vec<String> = triggers_from_str(triggers)
            .iter()
            .map(|key| trigger_label(key).to_string())
            .collect();
        if !labels.is_empty() {
            parts.push(labels.join(", "));
        }
    }
    if let Some(duration) = entry.duration_min {
        parts.push(format_duration(duration));
    }
    parts.join(" · ")
}

/// (count, average intensity rounded to 1 dp, most frequent trigger label).
pub fn headache_analytics(rows: &[HeadacheEntry]) -> (usize, f64, Option<String>) {
    if rows.is_empty() {
        return (0, 0.0, None);
    }
    let total: i32 = rows.iter().map(|row| row.intensity).sum();
    let avg = (f64::from(total) / rows.len() as f64 * 10.0).round() / 10.0;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        let Some(raw) = &row.triggers else { continue };
        for key in triggers_from_str(raw) {
            match counts.iter_mut().find(|(k, _)| *k == key) {
                Some((_, count)) => *count += 1,
                None => counts.push((key, 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top = counts
        .first()
        .map(|(key, _)| trigger_label(key).to_string());
    (rows.len(), avg, top)
}

pub fn format_headache_status(rows: &[HeadacheEntry]) -> String {
    if rows.is_empty() {
        return "🤕 Headaches\n\nNo entries — great!".to_string();
    }
    let (count, avg, top_trigger) = headache_analytics(rows);
    let lines: Vec<String> = rows.iter().map(format_headache_entry).collect();
    let mut text = format!(
        "🤕 Headaches\n\nRecent entries:\n{}\n\n📊 {count} entries, average intensity {avg}/10",
        lines.join("\n")
    );
    if let Some(trigger) = top_trigger {
        text.push_str(&format!("\n⚡ Most frequent trigger: {trigger}"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(intensity: i32, triggers: Option<&str>) -> HeadacheEntry {
        HeadacheEntry {
            id: 0,
            user_id: 1,
            intensity,
            location: Some("temples".to_string()),
            triggers: triggers.map(str::to_string),
            duration_min: Some(90),
            logged_day: "2026-04-01".to_string(),
            logged_at: 0,
        }
    }

    #[test]
    fn trigger_storage_round_trip() {
        let keys = vec!["stress".to_string(), "screens".to_string()];
        let raw = triggers_to_str(&keys).unwrap();
        assert_eq!(raw, "stress,screens");
        assert_eq!(triggers_from_str(&raw), keys);
        assert_eq!(triggers_to_str(&[]), None);
        assert!(triggers_from_str("").is_empty());
    }

    #[test]
    fn duration_humanized() {
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 h");
        assert_eq!(format_duration(90), "1 h 30 min");
        assert_eq!(format_duration(480), "8 h");
    }

    #[test]
    fn entry_line_carries_labels() {
        let line = format_headache_entry(&entry(8, Some("stress,screens")));
        assert!(line.contains("🔴 8/10"));
        assert!(line.contains("Temples"));
        assert!(line.contains("Stress, Screen time"));
        assert!(line.contains("1 h 30 min"));
        assert!(format_headache_entry(&entry(5, None)).contains("🟠"));
        assert!(format_headache_entry(&entry(2, None)).contains("🟡"));
    }

    #[test]
    fn analytics_average_and_top_trigger() {
        let rows = vec![
            entry(8, Some("stress")),
            entry(5, Some("stress,weather")),
            entry(4, None),
        ];
        let (count, avg, top) = headache_analytics(&rows);
        assert_eq!(count, 3);
        assert_eq!(avg, 5.7);
        assert_eq!(top.as_deref(), Some("Stress"));
        assert_eq!(headache_analytics(&[]), (0, 0.0, None));
    }
}
