//! Profile setup wizard: gender -> age -> height -> weight -> activity ->
//! goal, ending in one atomic profile write with derived nutrition targets.

use tracing::debug;

use crate::dialogs::{DialogState, ProfileDraft, ProfileStep};
use crate::domains::{ProfileUpdate, UserRecord};
use crate::error::Result;
use crate::keyboards;
use crate::router::Bot;
use crate::services::nutrition;

pub(crate) fn parse_age(text: &str) -> Option<i32> {
    let age: i32 = text.trim().parse().ok()?;
    (10..=100).contains(&age).then_some(age)
}

pub(crate) fn parse_height(text: &str) -> Option<f64> {
    let height: f64 = text.trim().replace(',', ".").parse().ok()?;
    (100.0..=250.0).contains(&height).then_some(height)
}

pub(crate) fn parse_weight(text: &str) -> Option<f64> {
    let weight: f64 = text.trim().replace(',', ".").parse().ok()?;
    (30.0..=300.0).contains(&weight).then_some(weight)
}

pub fn format_profile(user: &UserRecord) -> String {
    let mut lines = vec!["👤 Your profile".to_string(), String::new()];
    if let (Some(gender), Some(age), Some(height), Some(weight)) =
        (&user.gender, user.age, user.height, user.weight)
    {
        lines.push(format!("{gender}, {age} y.o., {height} cm, {weight} kg"));
    }
    if let (Some(activity), Some(goal)) = (&user.activity_level, &user.goal) {
        lines.push(format!("Activity: {activity} · Goal: {goal}"));
    }
    if let (Some(bmr), Some(tdee)) = (user.bmr, user.tdee) {
        lines.push(String::new());
        lines.push(format!("🔥 BMR: {bmr} kcal · TDEE: {tdee} kcal"));
    }
    if let (Some(calories), Some(protein), Some(fat), Some(carbs)) =
        (user.calories, user.protein, user.fat, user.carbs)
    {
        lines.push(format!(
            "🎯 Daily: {calories} kcal · P {protein}g / F {fat}g / C {carbs}g"
        ));
    }
    lines.join("\n")
}

impl Bot {
    pub(crate) async fn start_profile_wizard(&self, user_id: i64) -> Result<()> {
        self.dialogs.set(
            user_id,
            DialogState::Profile {
                step: ProfileStep::Gender,
                draft: ProfileDraft::default(),
            },
        );
        self.send(
            user_id,
            "Let's set up your profile. What's your gender?",
            Some(keyboards::gender()),
        )
        .await
    }

    pub(crate) async fn profile_gender_chosen(&self, user_id: i64, gender: &str) -> Result<()> {
        let Some(DialogState::Profile {
            step: ProfileStep::Gender,
            mut draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            debug!(user_id, "stale gender callback ignored");
            return Ok(());
        };
        if gender != "male" && gender != "female" {
            return Ok(());
        }
        draft.gender = Some(gender.to_string());
        self.dialogs.set(
            user_id,
            DialogState::Profile {
                step: ProfileStep::Age,
                draft,
            },
        );
        self.send(user_id, "How old are you? (10-100)", None).await
    }

    pub(crate) async fn profile_on_text(
        &self,
        user_id: i64,
        step: ProfileStep,
        mut draft: ProfileDraft,
        text: &str,
    ) -> Result<()> {
        let next = match step {
            ProfileStep::Age => match parse_age(text) {
                Some(age) => {
                    draft.age = Some(age);
                    Some((ProfileStep::Height, "What's your height in cm? (100-250)"))
                }
                None => {
                    return self
                        .send(user_id, "Please enter an age between 10 and 100.", None)
                        .await
                }
            },
            ProfileStep::Height => match parse_height(text) {
                Some(height) => {
                    draft.height = Some(height);
                    Some((ProfileStep::Weight, "What's your weight in kg? (30-300)"))
                }
                None => {
                    return self
                        .send(user_id, "Please enter a height between 100 and 250 cm.", None)
                        .await
                }
            },
            ProfileStep::Weight => match parse_weight(text) {
                Some(weight) => {
                    draft.weight = Some(weight);
                    None
                }
                None => {
                    return self
                        .send(user_id, "Please enter a weight between 30 and 300 kg.", None)
                        .await
                }
            },
            // Steps driven by buttons; free text here gets a nudge.
            _ => {
                return self
                    .send(user_id, "Please use the buttons above.", None)
                    .await
            }
        };

        match next {
            Some((step, prompt)) => {
                self.dialogs.set(user_id, DialogState::Profile { step, draft });
                self.send(user_id, prompt, None).await
            }
            None => {
                self.dialogs.set(
                    user_id,
                    DialogState::Profile {
                        step: ProfileStep::Activity,
                        draft,
                    },
                );
                self.send(
                    user_id,
                    "How active are you?",
                    Some(keyboards::activity()),
                )
                .await
            }
        }
    }

    pub(crate) async fn profile_activity_chosen(
        &self,
        user_id: i64,
        activity: &str,
    ) -> Result<()> {
        let Some(DialogState::Profile {
            step: ProfileStep::Activity,
            mut draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        if !nutrition::ACTIVITY_FACTORS.iter().any(|(key, _)| *key == activity) {
            return Ok(());
        }
        draft.activity_level = Some(activity.to_string());
        self.dialogs.set(
            user_id,
            DialogState::Profile {
                step: ProfileStep::Goal,
                draft,
            },
        );
        self.send(user_id, "What's your goal?", Some(keyboards::goal()))
            .await
    }

    pub(crate) async fn profile_goal_chosen(&self, user_id: i64, goal: &str) -> Result<()> {
        let Some(DialogState::Profile {
            step: ProfileStep::Goal,
            draft,
        }) = self.dialogs.snapshot(user_id)
        else {
            return Ok(());
        };
        let (Some(gender), Some(age), Some(height), Some(weight), Some(activity)) = (
            draft.gender.clone(),
            draft.age,
            draft.height,
            draft.weight,
            draft.activity_level.clone(),
        ) else {
            // Draft can only be incomplete if state was corrupted; restart.
            self.dialogs.clear(user_id);
            return self.start_profile_wizard(user_id).await;
        };

        let targets = match nutrition::calculate_targets(&gender, age, height, weight, &activity, goal)
        {
            Ok(targets) => targets,
            Err(_) => return Ok(()),
        };

        let profile = ProfileUpdate {
            gender,
            age,
            height,
            weight,
            activity_level: activity,
            goal: goal.to_string(),
            targets,
        };
        self.repo.update_profile(user_id, &profile).await?;
        self.dialogs.clear(user_id);

        let text = format!(
            "✅ Profile saved!\n\n\
             🔥 BMR: {} kcal\n\
             ⚡ TDEE: {} kcal\n\
             🎯 Daily target: {} kcal\n\
             🥩 Protein: {}g · 🥑 Fat: {}g · 🍚 Carbs: {}g\n\n\
             Now try /water, /mood or /sleep.",
            targets.bmr, targets.tdee, targets.calories, targets.protein, targets.fat,
            targets.carbs
        );
        self.send(user_id, &text, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bounds() {
        assert_eq!(parse_age("30"), Some(30));
        assert_eq!(parse_age(" 10 "), Some(10));
        assert_eq!(parse_age("9"), None);
        assert_eq!(parse_age("101"), None);
        assert_eq!(parse_age("thirty"), None);
    }

    #[test]
    fn height_and_weight_accept_comma_decimal() {
        assert_eq!(parse_height("180,5"), Some(180.5));
        assert_eq!(parse_weight("72,3"), Some(72.3));
        assert_eq!(parse_height("99"), None);
        assert_eq!(parse_weight("301"), None);
    }
}
