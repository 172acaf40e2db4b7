//! Multi-step conversation state. One active dialog per user; starting a new
//! one silently replaces whatever was in flight. State is cleared only after
//! a successful write, so a failed save leaves the wizard resumable.

use std::collections::HashMap;
use std::sync::Mutex;

pub mod headache;
pub mod mood;
pub mod profile;
pub mod sleep;
pub mod water;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStep {
    Gender,
    Age,
    Height,
    Weight,
    Activity,
    Goal,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadacheStep {
    Intensity,
    Location,
    Triggers,
    Duration,
    DurationCustom,
}

#[derive(Debug, Clone, Default)]
pub struct HeadacheDraft {
    pub intensity: Option<i32>,
    pub location: Option<String>,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepStep {
    Hours,
    Quality,
}

#[derive(Debug, Clone, Default)]
pub struct SleepDraft {
    pub hours: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum DialogState {
    Profile { step: ProfileStep, draft: ProfileDraft },
    Headache { step: HeadacheStep, draft: HeadacheDraft },
    Sleep { step: SleepStep, draft: SleepDraft },
    WaterAmount,
    WaterGoal,
    MoodNote { emoji: String },
}

/// In-memory per-user dialog state. The lock is never held across an await;
/// callers snapshot, act, then write back.
#[derive(Default)]
pub struct DialogStore {
    inner: Mutex<HashMap<i64, DialogState>>,
}

impl DialogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, user_id: i64, state: DialogState) {
        self.inner.lock().unwrap().insert(user_id, state);
    }

    pub fn snapshot(&self, user_id: i64) -> Option<DialogState> {
        self.inner.lock().unwrap().get(&user_id).cloned()
    }

    pub fn clear(&self, user_id: i64) -> bool {
        self.inner.lock().unwrap().remove(&user_id).is_some()
    }

    pub fn is_active(&self, user_id: i64) -> bool {
        self.inner.lock().unwrap().contains_key(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trip() {
        let store = DialogStore::new();
        assert!(!store.is_active(1));
        store.set(1, DialogState::WaterAmount);
        assert!(store.is_active(1));
        assert!(matches!(store.snapshot(1), Some(DialogState::WaterAmount)));
        assert!(store.clear(1));
        assert!(!store.clear(1));
    }

    #[test]
    fn new_dialog_replaces_stale_one() {
        let store = DialogStore::new();
        store.set(7, DialogState::WaterAmount);
        store.set(7, DialogState::WaterGoal);
        assert!(matches!(store.snapshot(7), Some(DialogState::WaterGoal)));
    }
}
