//! Mood tracking helpers: fixed emoji palette, trend analysis, history view.

use crate::domains::MoodEntry;

pub const MOOD_EMOJIS: [&str; 8] = ["😄", "😊", "🙂", "😐", "😔", "😢", "😡", "😴"];

/// Numeric score used for trend analysis; higher is better.
pub fn mood_score(emoji: &str) -> i32 {
    match emoji {
        "😄" => 8,
        "😊" => 7,
        "🙂" => 6,
        "😐" => 5,
        "😔" => 4,
        "😢" => 3,
        "😡" => 2,
        "😴" => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Declining,
    Steady,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Steady => "steady",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Trend::Improving => "📈",
            Trend::Declining => "📉",
            Trend::Steady => "➡️",
        }
    }
}

/// Compares the newer half of the history against the older half; a mean
/// delta of at least 0.5 in either direction counts as a trend.
/// `rows` is sorted newest first.
pub fn calc_trend(rows: &[MoodEntry]) -> Trend {
    if rows.len() < 2 {
        return Trend::Steady;
    }
    let scores: Vec<i32> = rows.iter().map(|row| mood_score(&row.emoji)).collect();
    let half = scores.len() / 2;
    let recent_avg = scores[..half].iter().sum::<i32>() as f64 / half as f64;
    let older_avg = scores[half..].iter().sum::<i32>() as f64 / (scores.len() - half) as f64;
    let delta = recent_avg - older_avg;
    if delta >= 0.5 {
        Trend::Improving
    } else if delta <= -0.5 {
        Trend::Declining
    } else {
        Trend::Steady
    }
}

/// Per-emoji counts, most frequent first.
pub fn mood_stats(rows: &[MoodEntry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        match counts.iter_mut().find(|(emoji, _)| *emoji == row.emoji) {
            Some((_, count)) => *count += 1,
            None => counts.push((row.emoji.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn format_mood_history(rows: &[MoodEntry]) -> String {
    if rows.is_empty() {
        return "😊 Mood\n\nNo entries yet.".to_string();
    }

    let trend = calc_trend(rows);
    let stats = mood_stats(rows);

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let note_part = row
                .note
                .as_deref()
                .map(|note| format!(" — {note}"))
                .unwrap_or_default();
            format!("{} {}{}", row.logged_day, row.emoji, note_part)
        })
        .collect();

    let stats_line = stats
        .iter()
        .map(|(emoji, count)| format!("{emoji}×{count}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "😊 Mood\n\nRecent entries:\n{}\n\n{} Trend: {}\n📊 Stats: {stats_line}",
        lines.join("\n"),
        trend.icon(),
        trend.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(emoji: &str, day: &str) -> MoodEntry {
        MoodEntry {
            id: 0,
            user_id: 1,
            emoji: emoji.to_string(),
            note: None,
            logged_day: day.to_string(),
            logged_at: 0,
        }
    }

    #[test]
    fn short_history_is_steady() {
        assert_eq!(calc_trend(&[]), Trend::Steady);
        assert_eq!(calc_trend(&[entry("😄", "2026-01-01")]), Trend::Steady);
    }

    #[test]
    fn improving_and_declining_trends() {
        // newest first: recent half high, older half low
        let rows = vec![
            entry("😄", "d4"),
            entry("😊", "d3"),
            entry("😢", "d2"),
            entry("😡", "d1"),
        ];
        assert_eq!(calc_trend(&rows), Trend::Improving);

        let rows = vec![
            entry("😡", "d4"),
            entry("😢", "d3"),
            entry("😊", "d2"),
            entry("😄", "d1"),
        ];
        assert_eq!(calc_trend(&rows), Trend::Declining);
    }

    #[test]
    fn stats_count_most_frequent_first() {
        let rows = vec![entry("😊", "d3"), entry("😐", "d2"), entry("😊", "d1")];
        let stats = mood_stats(&rows);
        assert_eq!(stats[0], ("😊".to_string(), 2));
        assert_eq!(stats[1], ("😐".to_string(), 1));
    }

    #[test]
    fn history_view_lists_notes() {
        let mut row = entry("😊", "2026-02-01");
        row.note = Some("good run".to_string());
        let text = format_mood_history(&[row]);
        assert!(text.contains("2026-02-01 😊 — good run"));
        assert!(text.contains("Trend: steady"));
    }
}
