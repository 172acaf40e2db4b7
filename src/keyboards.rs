//! Inline keyboard builders. Callback tokens are stable strings the router
//! matches on; labels are presentation only.

use crate::interfaces::transport::{Button, Keyboard};
use crate::services::headache::{DURATIONS_MIN, LOCATIONS, TRIGGERS};
use crate::services::mood::MOOD_EMOJIS;

pub fn cancel_row() -> Vec<Button> {
    vec![Button::new("❌ Cancel", "cancel")]
}

pub fn profile_prompt() -> Keyboard {
    Keyboard::default().row(vec![Button::new("📝 Set up profile", "profile_setup_start")])
}

pub fn gender() -> Keyboard {
    Keyboard::default()
        .row(vec![
            Button::new("👨 Male", "gender:male"),
            Button::new("👩 Female", "gender:female"),
        ])
        .row(cancel_row())
}

pub fn activity() -> Keyboard {
    Keyboard::default()
        .row(vec![Button::new("🪑 Sedentary", "activity:sedentary")])
        .row(vec![Button::new("🚶 Light (1-3 workouts/week)", "activity:light")])
        .row(vec![Button::new("🏃 Moderate (3-5 workouts/week)", "activity:moderate")])
        .row(vec![Button::new("💪 High (6-7 workouts/week)", "activity:high")])
        .row(vec![Button::new("🏋️ Very high (physical job)", "activity:very_high")])
        .row(cancel_row())
}

pub fn goal() -> Keyboard {
    Keyboard::default()
        .row(vec![
            Button::new("📉 Lose weight", "goal:lose"),
            Button::new("⚖️ Maintain", "goal:maintain"),
            Button::new("📈 Gain weight", "goal:gain"),
        ])
        .row(cancel_row())
}

pub fn water() -> Keyboard {
    Keyboard::default()
        .row(vec![
            Button::new("+250 ml", "water_add:250"),
            Button::new("+500 ml", "water_add:500"),
        ])
        .row(vec![
            Button::new("+750 ml", "water_add:750"),
            Button::new("✏️ Custom", "water_custom"),
        ])
        .row(vec![Button::new("🎯 Change goal", "water_set_goal")])
}

pub fn mood() -> Keyboard {
    let mut kb = Keyboard::default();
    for pair in MOOD_EMOJIS.chunks(4) {
        kb = kb.row(
            pair.iter()
                .map(|emoji| Button::new(*emoji, format!("mood_pick:{emoji}")))
                .collect(),
        );
    }
    kb.row(vec![Button::new("📊 History", "mood_history")])
}

pub fn mood_note() -> Keyboard {
    Keyboard::default()
        .row(vec![Button::new("⏭ Skip", "skip")])
        .row(cancel_row())
}

pub fn sleep_hours() -> Keyboard {
    let mut kb = Keyboard::default();
    for pair in [[6, 7], [8, 9]] {
        kb = kb.row(
            pair.iter()
                .map(|hours| Button::new(format!("{hours} h"), format!("sleep_hours:{hours}.0")))
                .collect(),
        );
    }
    kb.row(vec![Button::new("✏️ Custom", "sleep_custom")])
        .row(cancel_row())
}

pub fn sleep_quality() -> Keyboard {
    Keyboard::default()
        .row(vec![
            Button::new("😊 Excellent", "sleep_quality:3"),
            Button::new("🙂 Good", "sleep_quality:2"),
            Button::new("😫 Poor", "sleep_quality:1"),
        ])
        .row(vec![Button::new("⏭ Skip", "sleep_quality:0")])
}

pub fn headache_prompt() -> Keyboard {
    Keyboard::default().row(vec![Button::new("🤕 Log a headache", "hd_start")])
}

pub fn headache_intensity() -> Keyboard {
    let mut kb = Keyboard::default();
    for chunk in (1..=10).collect::<Vec<i32>>().chunks(5) {
        kb = kb.row(
            chunk
                .iter()
                .map(|n| Button::new(n.to_string(), format!("hd_intensity:{n}")))
                .collect(),
        );
    }
    kb.row(cancel_row())
}

pub fn headache_location() -> Keyboard {
    let mut kb = Keyboard::default();
    for (key, label) in LOCATIONS {
        kb = kb.row(vec![Button::new(label, format!("hd_location:{key}"))]);
    }
    kb.row(vec![Button::new("⏭ Skip", "hd_location:skip")])
        .row(cancel_row())
}

/// Trigger picker is a toggle list; chosen keys get a check mark.
pub fn headache_triggers(selected: &[String]) -> Keyboard {
    let mut kb = Keyboard::default();
    for chunk in TRIGGERS.chunks(2) {
        kb = kb.row(
            chunk
                .iter()
                .map(|(key, label)| {
                    let mark = if selected.iter().any(|s| s == key) {
                        "✅ "
                    } else {
                        ""
                    };
                    Button::new(format!("{mark}{label}"), format!("hd_trigger:{key}"))
                })
                .collect(),
        );
    }
    kb.row(vec![
        Button::new("✔️ Done", "hd_triggers_done"),
        Button::new("⏭ Skip", "hd_triggers_skip"),
    ])
    .row(cancel_row())
}

pub fn headache_duration() -> Keyboard {
    let mut kb = Keyboard::default();
    for chunk in DURATIONS_MIN.chunks(3) {
        kb = kb.row(
            chunk
                .iter()
                .map(|minutes| {
                    Button::new(
                        crate::services::headache::format_duration(*minutes),
                        format!("hd_duration:{minutes}"),
                    )
                })
                .collect(),
        );
    }
    kb.row(vec![
        Button::new("✏️ Custom", "hd_duration_custom"),
        Button::new("⏭ Skip", "hd_duration:0"),
    ])
    .row(cancel_row())
}

pub fn water_checkin() -> Keyboard {
    Keyboard::default().row(vec![
        Button::new("+250 ml", "water_add:250"),
        Button::new("+500 ml", "water_add:500"),
    ])
}

pub fn evening_checkin() -> Keyboard {
    Keyboard::default()
        .row(vec![
            Button::new("😊 Log mood", "mood_checkin"),
            Button::new("😴 Log sleep", "sleep_checkin"),
        ])
        .row(vec![Button::new("💧 Log water", "water_checkin")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_palette_covers_all_emojis() {
        let kb = mood();
        let actions: Vec<&str> = kb
            .rows
            .iter()
            .flatten()
            .map(|b| b.action.as_str())
            .collect();
        for emoji in MOOD_EMOJIS {
            assert!(actions.contains(&format!("mood_pick:{emoji}").as_str()));
        }
        assert!(actions.contains(&"mood_history"));
    }

    #[test]
    fn trigger_toggle_marks_selection() {
        let kb = headache_triggers(&["stress".to_string()]);
        let stress = kb
            .rows
            .iter()
            .flatten()
            .find(|b| b.action == "hd_trigger:stress")
            .unwrap();
        assert!(stress.label.starts_with("✅"));
        let weather = kb
            .rows
            .iter()
            .flatten()
            .find(|b| b.action == "hd_trigger:weather")
            .unwrap();
        assert!(!weather.label.starts_with("✅"));
    }

    #[test]
    fn intensity_scale_is_one_to_ten() {
        let kb = headache_intensity();
        let count = kb
            .rows
            .iter()
            .flatten()
            .filter(|b| b.action.starts_with("hd_intensity:"))
            .count();
        assert_eq!(count, 10);
    }
}
