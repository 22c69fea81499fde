mod common;

use jiff::civil::date;
use sprout_core::{
    params::{CropName, Login, StartJourney, ToggleSubtask, ToggleTask},
    ActivePhase, JourneyError, StartOutcome, UserRole,
};

use common::{create_test_tracker, open_tracker};

fn login(name: &str) -> Login {
    Login {
        name: name.to_string(),
        admin: false,
    }
}

fn start_rice() -> StartJourney {
    StartJourney {
        crop_name: "Rice".to_string(),
        sowing_date: Some(date(2024, 6, 1)),
        force: false,
    }
}

#[tokio::test]
async fn test_seeded_library() {
    let (_temp_dir, tracker) = create_test_tracker(date(2024, 6, 1)).await;

    let crops = tracker.crops().await.expect("Failed to list crops");
    let names: Vec<_> = crops.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Cotton", "Rice", "Wheat"]);

    let rice = tracker
        .crop(&CropName {
            name: "rice".to_string(),
        })
        .await
        .unwrap()
        .expect("Rice should be seeded");
    assert_eq!(rice.routine.len(), 4);
    assert!(rice.post_harvest.is_some());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let (temp_dir, tracker) = create_test_tracker(date(2024, 6, 1)).await;

    let profile = tracker.login(&login("asha")).await.expect("Failed to log in");
    assert_eq!(profile.name, "asha");
    tracker
        .start_journey(&start_rice())
        .await
        .expect("Failed to start");
    drop(tracker);

    let tracker = open_tracker(&temp_dir, date(2024, 7, 16)).await;
    let user = tracker.current_user().unwrap().expect("still signed in");
    assert_eq!(user.name, "asha");

    let view = tracker.status().await.unwrap().expect("journey active");
    assert_eq!(view.days_since_sowing, 45);
    assert_eq!(view.active_phase, ActivePhase::Phase(1));
    assert_eq!(view.current_task.as_ref().unwrap().title, "Tillering");
    assert_eq!(view.progress_percent, 38.0);
}

#[tokio::test]
async fn test_journeys_are_per_user() {
    let (_temp_dir, tracker) = create_test_tracker(date(2024, 6, 1)).await;

    tracker.login(&login("asha")).await.unwrap();
    tracker.start_journey(&start_rice()).await.unwrap();

    tracker.login(&login("ravi")).await.unwrap();
    assert!(tracker.status().await.unwrap().is_none());

    let outcome = tracker.start_journey(&start_rice()).await.unwrap();
    assert!(matches!(outcome, StartOutcome::Started(_)));

    tracker.logout().await.unwrap();
    assert!(matches!(
        tracker.status().await,
        Err(JourneyError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_future_sowing_date_counts_from_zero() {
    let (_temp_dir, tracker) = create_test_tracker(date(2024, 5, 20)).await;
    tracker.login(&login("asha")).await.unwrap();

    let outcome = tracker.start_journey(&start_rice()).await.unwrap();
    let StartOutcome::Started(view) = outcome else {
        panic!("expected a started journey");
    };
    assert_eq!(view.days_since_sowing, 0);
    assert_eq!(view.active_phase, ActivePhase::Phase(0));
    assert_eq!(view.timeline_progress, 0.0);
}

#[tokio::test]
async fn test_full_cycle_to_history() {
    let (temp_dir, tracker) = create_test_tracker(date(2024, 6, 1)).await;
    tracker.login(&login("asha")).await.unwrap();
    tracker.start_journey(&start_rice()).await.unwrap();

    for title in ["Nursery & Transplanting", "Tillering"] {
        tracker
            .toggle_task(&ToggleTask {
                task_title: title.to_string(),
            })
            .await
            .unwrap();
    }
    let done = tracker
        .toggle_daily_subtask(&ToggleSubtask {
            subtask: "Check nursery water film".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(done.len(), 1);

    assert!(matches!(
        tracker.complete_journey().await,
        Err(JourneyError::InvalidState { .. })
    ));

    let tracker = open_tracker(&temp_dir, date(2024, 9, 29)).await;
    let view = tracker.status().await.unwrap().unwrap();
    assert_eq!(view.days_since_sowing, 120);
    assert!(view.harvest_complete);
    assert_eq!(view.journey.completed_task_titles.len(), 2);
    assert!(view.daily_checklist.done.is_empty());

    let entry = tracker.complete_journey().await.expect("Failed to complete");
    assert_eq!(entry.duration, 120);
    assert_eq!(entry.completion_date, date(2024, 9, 29));

    assert!(tracker.status().await.unwrap().is_none());
    assert_eq!(tracker.history().await.unwrap(), vec![entry]);
}

#[tokio::test]
async fn test_farmer_cannot_edit_library() {
    let (_temp_dir, tracker) = create_test_tracker(date(2024, 6, 1)).await;
    let wheat = CropName {
        name: "Wheat".to_string(),
    };
    tracker.login(&login("asha")).await.unwrap();

    let result = tracker.remove_crop(&wheat).await;
    assert!(matches!(result, Err(JourneyError::Forbidden { .. })));

    // Asking for admin again does not promote an existing farmer.
    let profile = tracker
        .login(&Login {
            name: "asha".to_string(),
            admin: true,
        })
        .await
        .unwrap();
    assert_eq!(profile.role, UserRole::Farmer);
    let result = tracker.remove_crop(&wheat).await;
    assert!(matches!(result, Err(JourneyError::Forbidden { .. })));

    // The first admin account is granted at creation.
    let profile = tracker
        .login(&Login {
            name: "root".to_string(),
            admin: true,
        })
        .await
        .unwrap();
    assert_eq!(profile.role, UserRole::Admin);
    let removed = tracker.remove_crop(&wheat).await.unwrap();
    assert!(removed);
    assert_eq!(tracker.crops().await.unwrap().len(), 2);
}
