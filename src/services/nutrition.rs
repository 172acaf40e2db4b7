//! Nutrition target calculators (Mifflin-St Jeor). Pure, no I/O; inputs are
//! validated upstream by the profile wizard, so a validation error here is a
//! programmer mistake surfacing, not a user typo.

use crate::domains::NutritionTargets;
use crate::error::{HealthBotError, Result};

pub const ACTIVITY_FACTORS: [(&str, f64); 5] = [
    ("sedentary", 1.2),
    ("light", 1.375),
    ("moderate", 1.55),
    ("high", 1.725),
    ("very_high", 1.9),
];

pub const GOAL_CALORIE_FACTOR: [(&str, f64); 3] =
    [("lose", 0.8), ("maintain", 1.0), ("gain", 1.15)];

/// Calorie shares (protein, fat, carbs) per goal. Each triple sums to 1.0.
pub const GOAL_MACRO_SPLIT: [(&str, (f64, f64, f64)); 3] = [
    ("lose", (0.30, 0.30, 0.40)),
    ("maintain", (0.30, 0.25, 0.45)),
    ("gain", (0.25, 0.25, 0.50)),
];

const PROTEIN_KCAL_PER_G: f64 = 4.0;
const FAT_KCAL_PER_G: f64 = 9.0;
const CARB_KCAL_PER_G: f64 = 4.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mifflin-St Jeor:
///   male:   10*w + 6.25*h - 5*a + 5
///   female: 10*w + 6.25*h - 5*a - 161
pub fn calculate_bmr(gender: &str, age: i32, height_cm: f64, weight_kg: f64) -> Result<f64> {
    let gender = gender.trim().to_lowercase();
    let offset = match gender.as_str() {
        "male" => 5.0,
        "female" => -161.0,
        _ => {
            return Err(HealthBotError::Validation(
                "gender must be 'male' or 'female'".to_string(),
            ))
        }
    };
    if age <= 0 || height_cm <= 0.0 || weight_kg <= 0.0 {
        return Err(HealthBotError::Validation(
            "age/height/weight must be positive".to_string(),
        ));
    }
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    Ok(round2(base + offset))
}

pub fn calculate_tdee(bmr: f64, activity_level: &str) -> Result<f64> {
    let activity = activity_level.trim().to_lowercase();
    let factor = ACTIVITY_FACTORS
        .iter()
        .find(|(key, _)| *key == activity)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| {
            HealthBotError::Validation(format!("unknown activity level: {activity_level}"))
        })?;
    if bmr <= 0.0 {
        return Err(HealthBotError::Validation("bmr must be positive".to_string()));
    }
    Ok(round2(bmr * factor))
}

/// Calories -> grams by goal split. Each macro is rounded independently;
/// the grams are not renormalized to sum back to the calorie total.
pub fn macro_split(calories: i32, goal: &str) -> Result<(i32, i32, i32)> {
    let goal = goal.trim().to_lowercase();
    let (p_share, f_share, c_share) = GOAL_MACRO_SPLIT
        .iter()
        .find(|(key, _)| *key == goal)
        .map(|(_, split)| *split)
        .ok_or_else(|| HealthBotError::Validation(format!("unknown goal: {goal}")))?;
    if calories <= 0 {
        return Err(HealthBotError::Validation(
            "calories must be positive".to_string(),
        ));
    }
    let calories = f64::from(calories);
    let protein = (calories * p_share / PROTEIN_KCAL_PER_G).round() as i32;
    let fat = (calories * f_share / FAT_KCAL_PER_G).round() as i32;
    let carbs = (calories * c_share / CARB_KCAL_PER_G).round() as i32;
    Ok((protein, fat, carbs))
}

pub fn calculate_targets(
    gender: &str,
    age: i32,
    height_cm: f64,
    weight_kg: f64,
    activity_level: &str,
    goal: &str,
) -> Result<NutritionTargets> {
    let bmr = calculate_bmr(gender, age, height_cm, weight_kg)?;
    let tdee = calculate_tdee(bmr, activity_level)?;

    let goal = goal.trim().to_lowercase();
    let factor = GOAL_CALORIE_FACTOR
        .iter()
        .find(|(key, _)| *key == goal)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| HealthBotError::Validation(format!("unknown goal: {goal}")))?;
    let calories = (tdee * factor).round() as i32;
    let (protein, fat, carbs) = macro_split(calories, &goal)?;

    Ok(NutritionTargets {
        bmr,
        tdee,
        calories,
        protein,
        fat,
        carbs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmr_reference_values() {
        assert_eq!(calculate_bmr("male", 30, 180.0, 80.0).unwrap(), 1780.0);
        assert_eq!(calculate_bmr("female", 28, 165.0, 60.0).unwrap(), 1330.25);
    }

    #[test]
    fn bmr_rejects_bad_input() {
        assert!(calculate_bmr("other", 30, 180.0, 80.0).is_err());
        assert!(calculate_bmr("male", 0, 180.0, 80.0).is_err());
        assert!(calculate_bmr("male", 30, -1.0, 80.0).is_err());
        assert!(calculate_bmr("male", 30, 180.0, 0.0).is_err());
    }

    #[test]
    fn tdee_uses_activity_table() {
        assert_eq!(calculate_tdee(1780.0, "sedentary").unwrap(), 2136.0);
        assert_eq!(calculate_tdee(1780.0, "very_high").unwrap(), 3382.0);
        assert!(calculate_tdee(1780.0, "heroic").is_err());
        assert!(calculate_tdee(0.0, "light").is_err());
    }

    #[test]
    fn macros_round_independently() {
        // 2000 kcal maintain: 30/25/45 -> 150g protein, 56g fat, 225g carbs
        let (p, f, c) = macro_split(2000, "maintain").unwrap();
        assert_eq!((p, f, c), (150, 56, 225));
        // 4*150 + 9*56 + 4*225 = 2004 != 2000; accepted, not corrected
        assert_ne!(4 * p + 9 * f + 4 * c, 2000);
    }

    #[test]
    fn full_target_calculation() {
        let targets = calculate_targets("female", 30, 165.0, 60.0, "moderate", "maintain").unwrap();
        assert_eq!(targets.bmr, 1320.25);
        assert_eq!(targets.tdee, 2046.39);
        assert_eq!(targets.calories, 2046);
        assert!(targets.protein > 0 && targets.fat > 0 && targets.carbs > 0);
    }

    #[test]
    fn unknown_goal_fails() {
        assert!(calculate_targets("male", 30, 180.0, 80.0, "light", "bulk").is_err());
        assert!(macro_split(0, "lose").is_err());
    }
}
