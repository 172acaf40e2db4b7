mod common;

use chrono::Utc;
use common::{callback, command, test_bot, text};

fn today_in_belgrade() -> String {
    Utc::now()
        .with_timezone(&chrono_tz::Europe::Belgrade)
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn profile_wizard_end_to_end() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "profile")).await;
    assert!(transport.last_text().contains("gender"));

    bot.dispatch(callback(1, "gender:male")).await;
    assert!(transport.last_text().contains("How old"));

    // invalid input leaves the wizard on the same step
    bot.dispatch(text(1, "abc")).await;
    assert!(transport.last_text().contains("between 10 and 100"));

    bot.dispatch(text(1, "30")).await;
    bot.dispatch(text(1, "180")).await;
    bot.dispatch(text(1, "80")).await;
    assert!(transport.last_text().contains("How active"));

    bot.dispatch(callback(1, "activity:moderate")).await;
    bot.dispatch(callback(1, "goal:maintain")).await;
    assert!(transport.last_text().contains("Profile saved"));

    let user = repo.get_user(1).await.unwrap().unwrap();
    assert_eq!(user.gender.as_deref(), Some("male"));
    assert_eq!(user.bmr, Some(1780.0));
    assert_eq!(user.tdee, Some(2759.0));
    assert_eq!(user.calories, Some(2759));
    assert!(repo.has_profile(1).await.unwrap());
}

#[tokio::test]
async fn cancel_aborts_the_wizard() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "profile")).await;
    bot.dispatch(callback(1, "gender:female")).await;
    bot.dispatch(command(1, "cancel")).await;
    assert_eq!(transport.last_text(), "Cancelled.");

    // the age answer now lands outside any dialog
    bot.dispatch(text(1, "30")).await;
    assert!(transport.last_text().contains("/help"));
    assert!(!repo.has_profile(1).await.unwrap());
}

#[tokio::test]
async fn stale_callbacks_are_ignored() {
    let (_dir, repo, transport, bot) = test_bot().await;

    let before = transport.sent_count();
    bot.dispatch(callback(1, "goal:maintain")).await;
    bot.dispatch(callback(1, "sleep_quality:2")).await;
    assert_eq!(transport.sent_count(), before);
    assert!(!repo.has_profile(1).await.unwrap());
}

#[tokio::test]
async fn water_quick_add_and_custom_amount() {
    let (_dir, repo, transport, bot) = test_bot().await;
    let day = today_in_belgrade();

    bot.dispatch(callback(1, "water_add:500")).await;
    assert!(transport.last_text().contains("+500 ml"));
    assert_eq!(repo.water_today(1, &day).await.unwrap(), 500);

    bot.dispatch(callback(1, "water_custom")).await;
    bot.dispatch(text(1, "5")).await;
    assert!(transport.last_text().contains("between 10 and 5000"));
    bot.dispatch(text(1, "650")).await;
    assert_eq!(repo.water_today(1, &day).await.unwrap(), 1150);
}

#[tokio::test]
async fn water_goal_override_applies_to_status() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(callback(1, "water_set_goal")).await;
    bot.dispatch(text(1, "3000")).await;
    assert!(transport.last_text().contains("3000 ml"));
    assert_eq!(repo.get_water_goal(1).await.unwrap(), Some(3000));

    bot.dispatch(command(1, "water")).await;
    assert!(transport.last_text().contains("/3000 ml"));
}

#[tokio::test]
async fn mood_with_and_without_note() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "mood")).await;
    bot.dispatch(callback(1, "mood_pick:😊")).await;
    bot.dispatch(callback(1, "skip")).await;
    assert!(transport.last_text().contains("Mood logged"));

    bot.dispatch(callback(1, "mood_pick:😐")).await;
    bot.dispatch(text(1, "long day")).await;

    let rows = repo.mood_history(1, 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].emoji, "😐");
    assert_eq!(rows[0].note.as_deref(), Some("long day"));
    assert_eq!(rows[1].note, None);
}

#[tokio::test]
async fn sleep_wizard_logs_once_per_day() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "sleep")).await;
    assert!(transport.last_text().contains("How long did you sleep"));
    bot.dispatch(callback(1, "sleep_hours:7.0")).await;
    bot.dispatch(callback(1, "sleep_quality:2")).await;
    assert!(transport.last_text().contains("Sleep logged: 7h [good]"));

    // second entry for the same day is silently dropped by the store
    bot.dispatch(command(1, "sleep")).await;
    bot.dispatch(callback(1, "sleep_custom")).await;
    bot.dispatch(text(1, "4,5")).await;
    bot.dispatch(callback(1, "sleep_quality:0")).await;

    let rows = repo.sleep_history(1, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hours, 7.0);
}

#[tokio::test]
async fn headache_wizard_with_trigger_toggling() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "headache")).await;
    assert!(transport.last_text().contains("No entries"));

    bot.dispatch(callback(1, "hd_start")).await;
    bot.dispatch(callback(1, "hd_intensity:7")).await;
    bot.dispatch(callback(1, "hd_location:temples")).await;
    bot.dispatch(callback(1, "hd_trigger:stress")).await;
    bot.dispatch(callback(1, "hd_trigger:screens")).await;
    // toggling off
    bot.dispatch(callback(1, "hd_trigger:stress")).await;
    bot.dispatch(callback(1, "hd_triggers_done")).await;
    bot.dispatch(callback(1, "hd_duration:120")).await;
    assert!(transport.last_text().contains("Headache logged: 7/10"));

    let rows = repo.headache_history(1, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].intensity, 7);
    assert_eq!(rows[0].location.as_deref(), Some("temples"));
    assert_eq!(rows[0].triggers.as_deref(), Some("screens"));
    assert_eq!(rows[0].duration_min, Some(120));
}

#[tokio::test]
async fn headache_custom_duration_via_text() {
    let (_dir, repo, transport, bot) = test_bot().await;

    bot.dispatch(callback(1, "hd_start")).await;
    bot.dispatch(callback(1, "hd_intensity:3")).await;
    bot.dispatch(callback(1, "hd_location:skip")).await;
    bot.dispatch(callback(1, "hd_triggers_skip")).await;
    bot.dispatch(callback(1, "hd_duration_custom")).await;
    bot.dispatch(text(1, "2000")).await;
    assert!(transport.last_text().contains("between 1 and 1440"));
    bot.dispatch(text(1, "45")).await;

    let rows = repo.headache_history(1, 10).await.unwrap();
    assert_eq!(rows[0].location, None);
    assert_eq!(rows[0].triggers, None);
    assert_eq!(rows[0].duration_min, Some(45));
}

#[tokio::test]
async fn today_and_week_summaries() {
    let (_dir, _repo, transport, bot) = test_bot().await;

    bot.dispatch(callback(1, "water_add:750")).await;
    bot.dispatch(command(1, "today")).await;
    let today = transport.last_text();
    assert!(today.contains("📋 Today"));
    assert!(today.contains("750"));
    assert!(today.contains("Mood: not logged"));

    bot.dispatch(command(1, "week")).await;
    let week = transport.last_text();
    assert!(week.contains("📈 Week"));
    assert!(week.contains("750"));
}

#[tokio::test]
async fn export_produces_bom_prefixed_csv() {
    let (_dir, _repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "export")).await;
    assert!(transport.last_text().contains("Nothing to export"));

    bot.dispatch(callback(1, "water_add:500")).await;
    bot.dispatch(command(1, "export")).await;

    let documents = transport.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    let (filename, bytes) = &documents[0];
    assert!(filename.ends_with(".csv"));
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    let body = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert!(body.contains("=== WATER LOG ==="));
    assert!(body.contains("=== HEADACHE LOG ==="));
    assert!(body.contains("500"));
}

#[tokio::test]
async fn start_prompts_profile_setup_for_new_users() {
    let (_dir, _repo, transport, bot) = test_bot().await;

    bot.dispatch(command(1, "start")).await;
    let messages = transport.messages.lock().unwrap();
    let last = messages.last().unwrap();
    assert!(last.text.contains("health tracking assistant"));
    let keyboard = last.keyboard.as_ref().unwrap();
    assert!(keyboard
        .rows
        .iter()
        .flatten()
        .any(|b| b.action == "profile_setup_start"));
}
