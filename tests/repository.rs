mod common;

use common::temp_repo;
use vitalog::domains::{NutritionTargets, ProfileUpdate};
use vitalog::providers::SqliteRepo;

fn sample_profile() -> ProfileUpdate {
    ProfileUpdate {
        gender: "male".to_string(),
        age: 30,
        height: 180.0,
        weight: 80.0,
        activity_level: "moderate".to_string(),
        goal: "maintain".to_string(),
        targets: NutritionTargets {
            bmr: 1780.0,
            tdee: 2759.0,
            calories: 2759,
            protein: 207,
            fat: 77,
            carbs: 310,
        },
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let (dir, _repo) = temp_repo().await;
    let path = dir.path().join("health.db");
    // Second connect against the same file must not fail.
    SqliteRepo::connect(path.to_str().unwrap())
        .await
        .expect("reopen");
}

#[tokio::test]
async fn upsert_refreshes_identity_without_touching_profile() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "anna", "Anna A").await.unwrap();
    repo.update_profile(1, &sample_profile()).await.unwrap();
    repo.upsert_user(1, "anna_new", "Anna B").await.unwrap();

    let user = repo.get_user(1).await.unwrap().unwrap();
    assert_eq!(user.username.as_deref(), Some("anna_new"));
    assert_eq!(user.full_name.as_deref(), Some("Anna B"));
    assert_eq!(user.gender.as_deref(), Some("male"));
    assert_eq!(user.calories, Some(2759));
}

#[tokio::test]
async fn has_profile_flips_after_update() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "anna", "Anna").await.unwrap();
    assert!(!repo.has_profile(1).await.unwrap());
    repo.update_profile(1, &sample_profile()).await.unwrap();
    assert!(repo.has_profile(1).await.unwrap());
    assert!(!repo.has_profile(2).await.unwrap());
}

#[tokio::test]
async fn water_totals_sum_per_day() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "u", "U").await.unwrap();
    repo.log_water(1, 250, "2026-03-09", 100).await.unwrap();
    repo.log_water(1, 500, "2026-03-10", 200).await.unwrap();
    repo.log_water(1, 300, "2026-03-10", 300).await.unwrap();
    // another user's entries must not bleed in
    repo.upsert_user(2, "v", "V").await.unwrap();
    repo.log_water(2, 999, "2026-03-10", 400).await.unwrap();

    assert_eq!(repo.water_today(1, "2026-03-10").await.unwrap(), 800);
    assert_eq!(repo.water_today(1, "2026-03-11").await.unwrap(), 0);

    let week = repo.water_week(1, "2026-03-04", "2026-03-10").await.unwrap();
    assert_eq!(week.len(), 2);
    assert!(week.contains(&("2026-03-09".to_string(), 250)));
    assert!(week.contains(&("2026-03-10".to_string(), 800)));
}

#[tokio::test]
async fn duplicate_sleep_date_is_ignored() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "u", "U").await.unwrap();
    repo.log_sleep(1, "2026-03-10", 7.5, Some(3), 100).await.unwrap();
    repo.log_sleep(1, "2026-03-10", 4.0, Some(1), 200).await.unwrap();

    let rows = repo.sleep_history(1, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hours, 7.5);
    assert_eq!(rows[0].quality, Some(3));
}

#[tokio::test]
async fn water_goal_override_round_trip() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "u", "U").await.unwrap();
    assert_eq!(repo.get_water_goal(1).await.unwrap(), None);
    repo.set_water_goal(1, 2800).await.unwrap();
    assert_eq!(repo.get_water_goal(1).await.unwrap(), Some(2800));
    // setting the goal must not clobber identity
    let user = repo.get_user(1).await.unwrap().unwrap();
    assert_eq!(user.username.as_deref(), Some("u"));
}

#[tokio::test]
async fn histories_are_newest_first_and_limited() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "u", "U").await.unwrap();
    for (i, day) in ["2026-03-08", "2026-03-09", "2026-03-10"].iter().enumerate() {
        repo.log_mood(1, "😊", None, day, 100 + i as i64).await.unwrap();
        repo.log_headache(1, 5, None, None, None, day, 100 + i as i64)
            .await
            .unwrap();
    }
    let moods = repo.mood_history(1, 2).await.unwrap();
    assert_eq!(moods.len(), 2);
    assert_eq!(moods[0].logged_day, "2026-03-10");

    let aches = repo.headache_history(1, 10).await.unwrap();
    assert_eq!(aches[0].logged_day, "2026-03-10");
    assert_eq!(repo.headache_count_today(1, "2026-03-10").await.unwrap(), 1);
}

#[tokio::test]
async fn full_dumps_are_oldest_first() {
    let (_dir, repo) = temp_repo().await;
    repo.upsert_user(1, "u", "U").await.unwrap();
    repo.log_water(1, 500, "2026-03-10", 200).await.unwrap();
    repo.log_water(1, 250, "2026-03-09", 100).await.unwrap();

    let dump = repo.all_water(1).await.unwrap();
    assert_eq!(dump.len(), 2);
    assert_eq!(dump[0].logged_day, "2026-03-09");
    assert_eq!(dump[1].logged_day, "2026-03-10");

    assert_eq!(repo.all_user_ids().await.unwrap(), vec![1]);
}
