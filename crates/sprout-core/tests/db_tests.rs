use std::collections::BTreeSet;

use jiff::civil::date;
use rusqlite::Connection;
use sprout_core::{
    models::{HistoryEntry, HistoryStatus, Phase, PostHarvest, Schedule},
    AccountStatus, Crop, Database, JourneyError, JourneyState, UserRole,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn millet_journey() -> JourneyState {
    let schedule = Schedule::new(vec![
        Phase::new("Sowing", 0, 29),
        Phase::new("Growth", 30, 89),
        Phase::new("Harvest", 90, 119),
    ])
    .expect("valid schedule");
    JourneyState::start("Millet", schedule, date(2024, 6, 1))
}

#[test]
fn test_database_initialization_seeds_library() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert_eq!(db.list_crops().expect("Failed to list crops").len(), 3);

    // Reopening must not seed twice.
    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.list_crops().unwrap().len(), 3);
}

#[test]
fn test_emptied_library_is_not_reseeded() {
    let (temp_file, mut db) = create_test_db();

    for crop in db.list_crops().unwrap() {
        assert!(db.delete_crop(&crop.name).unwrap());
    }

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert!(db.list_crops().unwrap().is_empty());
}

#[test]
fn test_crop_upsert_is_case_insensitive() {
    let (_temp_file, mut db) = create_test_db();

    let mut crop = Crop::new("Millet", vec![Phase::new("Sowing", 0, 20)]);
    db.upsert_crop(&crop).expect("Failed to insert crop");

    crop.name = "MILLET".to_string();
    crop.growing_season = Some("Kharif".to_string());
    db.upsert_crop(&crop).expect("Failed to update crop");

    let stored = db.get_crop("millet").unwrap().expect("crop exists");
    assert_eq!(stored.growing_season.as_deref(), Some("Kharif"));
    assert_eq!(db.list_crops().unwrap().len(), 4);

    assert!(db.delete_crop("Millet").unwrap());
    assert!(!db.delete_crop("Millet").unwrap());
}

#[test]
fn test_login_creates_and_reuses_accounts() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.login("asha", None).expect("Failed to log in");
    assert_eq!(first.user.role, UserRole::Farmer);

    let second = db.login(" asha ", None).unwrap();
    assert_ne!(first.token, second.token);

    let record = db.user_for_token(&first.token).unwrap().expect("valid token");
    assert_eq!(record.profile.name, "asha");

    assert!(db.logout(&first.token).unwrap());
    assert!(db.user_for_token(&first.token).unwrap().is_none());
    assert!(db.user_for_token(&second.token).unwrap().is_some());
}

#[test]
fn test_login_never_changes_existing_role() {
    let (_temp_file, mut db) = create_test_db();

    let farmer = db.login("ravi", None).unwrap();
    let again = db.login("RAVI", Some(UserRole::Admin)).unwrap();
    assert_eq!(again.user.role, UserRole::Farmer);

    let record = db.user_for_token(&farmer.token).unwrap().unwrap();
    assert_eq!(record.profile.role, UserRole::Farmer);
}

#[test]
fn test_only_first_admin_is_granted_at_login() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.login("asha", Some(UserRole::Admin)).unwrap();
    assert_eq!(first.user.role, UserRole::Admin);

    let second = db.login("meena", Some(UserRole::Admin)).unwrap();
    assert_eq!(second.user.role, UserRole::Farmer);

    let record = db.user_for_token(&second.token).unwrap().unwrap();
    let promoted = db.set_user_role(record.id, UserRole::Admin).unwrap();
    assert_eq!(promoted.role, UserRole::Admin);
    assert_eq!(
        db.user_for_token(&second.token).unwrap().unwrap().profile.role,
        UserRole::Admin
    );
}

#[test]
fn test_blocked_account_cannot_sign_in() {
    let (_temp_file, mut db) = create_test_db();

    let session = db.login("ravi", None).unwrap();
    let record = db.user_for_token(&session.token).unwrap().unwrap();

    let blocked = db.set_user_status(record.id, AccountStatus::Blocked).unwrap();
    assert_eq!(blocked.status, AccountStatus::Blocked);
    assert!(db.user_for_token(&session.token).unwrap().is_none());
    assert!(matches!(
        db.login("ravi", None),
        Err(JourneyError::AccountBlocked { ref name }) if name == "ravi"
    ));

    db.set_user_status(record.id, AccountStatus::Active).unwrap();
    let session = db.login("ravi", None).expect("reactivated account signs in");
    assert!(db.user_for_token(&session.token).unwrap().is_some());
}

#[test]
fn test_list_and_update_users() {
    let (_temp_file, mut db) = create_test_db();
    db.login("ravi", None).unwrap();
    db.login("asha", Some(UserRole::Admin)).unwrap();

    let users = db.list_users().unwrap();
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["asha", "ravi"]);
    assert!(users.iter().all(|u| u.status == AccountStatus::Active));

    assert!(db.get_user(999).unwrap().is_none());
    assert!(matches!(
        db.set_user_status(999, AccountStatus::Blocked),
        Err(JourneyError::UserNotFound { id: 999 })
    ));
    assert!(matches!(
        db.set_user_role(999, UserRole::Admin),
        Err(JourneyError::UserNotFound { id: 999 })
    ));
}

#[test]
fn test_status_column_added_to_existing_database() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    {
        let conn = Connection::open(temp_file.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE users (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 name TEXT NOT NULL UNIQUE COLLATE NOCASE,
                 role TEXT NOT NULL DEFAULT 'farmer',
                 created_at TEXT NOT NULL
             );
             INSERT INTO users (name, role, created_at)
                 VALUES ('asha', 'admin', '2024-06-01T00:00:00Z');",
        )
        .unwrap();
    }

    let mut db = Database::new(temp_file.path()).expect("Failed to open database");
    let users = db.list_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].status, AccountStatus::Active);
    assert_eq!(users[0].role, UserRole::Admin);
    assert!(db.login("asha", None).is_ok());
}

#[test]
fn test_login_rejects_blank_name() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.login("  ", None);
    assert!(matches!(result, Err(JourneyError::InvalidInput { .. })));
}

#[test]
fn test_journey_snapshot_roundtrip() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.login("asha", None).unwrap();
    let record = db.user_for_token(&user.token).unwrap().unwrap();

    assert!(db.get_journey(record.id).unwrap().is_none());

    let mut journey = millet_journey();
    journey.post_harvest = PostHarvest {
        storage: "Dry to 12% moisture".to_string(),
        ..PostHarvest::default()
    };
    db.replace_journey(record.id, &journey).unwrap();

    let titles = BTreeSet::from(["Sowing".to_string()]);
    assert!(db.set_completed_tasks(record.id, &titles).unwrap());

    let stored = db.get_journey(record.id).unwrap().expect("journey exists");
    assert_eq!(stored.schedule, journey.schedule);
    assert_eq!(stored.completed_task_titles, titles);
    assert_eq!(stored.post_harvest.storage, "Dry to 12% moisture");

    // Replacing resets completion.
    db.replace_journey(record.id, &millet_journey()).unwrap();
    let stored = db.get_journey(record.id).unwrap().unwrap();
    assert!(stored.completed_task_titles.is_empty());
}

#[test]
fn test_archive_moves_journey_to_history() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.login("asha", None).unwrap();
    let record = db.user_for_token(&user.token).unwrap().unwrap();

    let journey = millet_journey();
    db.replace_journey(record.id, &journey).unwrap();

    let entry = HistoryEntry::completed(&journey, date(2024, 10, 4));
    assert_eq!(entry.duration, 125);
    assert_eq!(entry.status, HistoryStatus::Completed);
    db.archive_journey(record.id, &entry).unwrap();

    assert!(db.get_journey(record.id).unwrap().is_none());
    assert!(!db.set_completed_tasks(record.id, &BTreeSet::new()).unwrap());

    let second = HistoryEntry {
        crop_name: "Wheat".to_string(),
        start_date: date(2024, 11, 1),
        completion_date: date(2025, 3, 5),
        duration: 124,
        status: HistoryStatus::Completed,
    };
    db.archive_journey(record.id, &second).unwrap();

    let history = db.list_history(record.id).unwrap();
    assert_eq!(history, vec![second, entry]);
}

#[test]
fn test_session_entries() {
    let (_temp_file, db) = create_test_db();

    assert!(db.get_session_entry("sprout_token").unwrap().is_none());
    db.set_session_entry("sprout_token", "abc").unwrap();
    db.set_session_entry("sprout_token", "def").unwrap();
    assert_eq!(
        db.get_session_entry("sprout_token").unwrap().as_deref(),
        Some("def")
    );

    db.delete_session_entry("sprout_token").unwrap();
    assert!(db.get_session_entry("sprout_token").unwrap().is_none());
}
