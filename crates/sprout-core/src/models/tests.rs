#[cfg(test)]
mod model_tests {
    use jiff::civil::date;
    use serde_json::json;

    use crate::{
        error::JourneyError,
        models::{
            AccountStatus, ActiveStatus, Crop, Irregularity, JourneyState, Phase, PostHarvest,
            Protocol, Schedule, Task, UserRole,
        },
    };

    fn three_phase() -> Schedule {
        Schedule::new(vec![
            Phase::new("Sowing", 0, 29),
            Phase::new("Growth", 30, 89),
            Phase::new("Harvest", 90, 119),
        ])
        .unwrap()
    }

    #[test]
    fn test_protocol_accepts_text_or_steps() {
        let text: Protocol = serde_json::from_value(json!("Keep 5 cm of water")).unwrap();
        assert_eq!(text.lines(), vec!["Keep 5 cm of water"]);

        let steps: Protocol = serde_json::from_value(json!(["Drain", "Dry", "Refill"])).unwrap();
        assert_eq!(steps.lines(), vec!["Drain", "Dry", "Refill"]);
    }

    #[test]
    fn test_phase_defaults_and_daily_subtasks() {
        let phase: Phase = serde_json::from_value(json!({
            "title": "Tillering",
            "start_day": 30,
            "end_day": 64,
            "protocol": ["Top dress urea", "Scout for stem borer"]
        }))
        .unwrap();

        assert_eq!(phase.desc, "");
        assert_eq!(phase.period_label(), "Day 30-64");
        assert_eq!(
            phase.daily_subtasks(),
            vec!["Top dress urea", "Scout for stem borer"]
        );

        let task = Task::from(&phase);
        assert_eq!(task.title, "Tillering");
        assert_eq!(task.daily_routine.len(), 2);
    }

    #[test]
    fn test_schedule_rejects_invalid_phases() {
        let empty = Schedule::new(vec![]);
        assert!(matches!(empty, Err(JourneyError::InvalidInput { .. })));

        let inverted = Schedule::new(vec![Phase::new("Late", 10, 5)]);
        assert!(matches!(inverted, Err(JourneyError::InvalidInput { .. })));

        let unordered = Schedule::new(vec![Phase::new("B", 30, 60), Phase::new("A", 0, 29)]);
        assert!(matches!(unordered, Err(JourneyError::InvalidInput { .. })));
    }

    #[test]
    fn test_schedule_tolerates_gaps_and_overlaps() {
        let schedule = Schedule::new(vec![
            Phase::new("A", 0, 10),
            Phase::new("B", 15, 30),
            Phase::new("C", 25, 40),
        ])
        .unwrap();

        assert_eq!(
            schedule.irregularities(),
            vec![
                Irregularity::Gap {
                    after: 0,
                    from_day: 11,
                    to_day: 14
                },
                Irregularity::Overlap {
                    first: 1,
                    second: 2
                },
            ]
        );
        assert!(three_phase().irregularities().is_empty());
        assert_eq!(three_phase().final_day(), 119);
    }

    #[test]
    fn test_schedule_phase_ending_on_last_day() {
        let open_ended = Schedule::new(vec![Phase::new("Fallow", 0, u32::MAX)]).unwrap();
        assert!(open_ended.irregularities().is_empty());
        assert_eq!(open_ended.final_day(), u32::MAX);

        let schedule = Schedule::new(vec![
            Phase::new("Sowing", 0, u32::MAX),
            Phase::new("Harvest", 90, u32::MAX),
        ])
        .unwrap();
        assert_eq!(
            schedule.irregularities(),
            vec![Irregularity::Overlap {
                first: 0,
                second: 1
            }]
        );
    }

    #[test]
    fn test_active_status_with_last_day_routine() {
        let status: ActiveStatus = serde_json::from_value(json!({
            "active": true,
            "crop_name": "Rice",
            "sowing_date": "2024-06-01",
            "routine": [
                { "title": "Nursery", "start_day": 0, "end_day": 4294967295u64 },
                { "title": "Harvest", "start_day": 30, "end_day": 4294967295u64 }
            ]
        }))
        .unwrap();

        let journey = status.into_journey().unwrap().expect("active journey");
        assert_eq!(journey.schedule.len(), 2);
        assert_eq!(journey.schedule.final_day(), u32::MAX);
        assert_eq!(journey.days_since_sowing(date(2024, 6, 11)), 10);
    }

    #[test]
    fn test_schedule_deserialization_validates() {
        let result: Result<Schedule, _> = serde_json::from_value(json!([
            { "title": "Late", "start_day": 9, "end_day": 1 }
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_crop_post_harvest_defaults() {
        let crop: Crop = serde_json::from_value(json!({
            "name": "Gram",
            "routine": [{ "title": "Sowing", "start_day": 0, "end_day": 20 }],
            "post_harvest": { "storage": "Store in jute bags" }
        }))
        .unwrap();

        let post_harvest = crop.post_harvest.unwrap();
        assert_eq!(post_harvest.storage, "Store in jute bags");
        assert_eq!(post_harvest.cleaning, PostHarvest::default().cleaning);
    }

    #[test]
    fn test_journey_days_and_toggle() {
        let mut journey = JourneyState::start("Millet", three_phase(), date(2024, 6, 1));

        assert_eq!(journey.days_since_sowing(date(2024, 7, 16)), 45);
        assert_eq!(journey.days_since_sowing(date(2024, 5, 20)), 0);

        assert!(journey.toggle_task("Growth"));
        assert!(journey.is_task_completed("Growth"));
        assert!(!journey.toggle_task("Growth"));
        assert!(journey.completed_task_titles.is_empty());
    }

    #[test]
    fn test_active_status_roundtrip_through_journey() {
        let journey = JourneyState::start("Millet", three_phase(), date(2024, 6, 1));
        let status = ActiveStatus::from_journey(&journey, date(2024, 7, 16));

        assert!(status.active);
        assert_eq!(status.days_since_sowing, Some(45));
        assert_eq!(status.current_task.as_ref().unwrap().title, "Growth");
        assert_eq!(status.next_task.as_ref().unwrap().title, "Harvest");
        assert!(status.post_harvest.is_none());

        let restored = status.into_journey().unwrap().unwrap();
        assert_eq!(restored, journey);
    }

    #[test]
    fn test_active_status_reports_post_harvest_after_harvest() {
        let journey = JourneyState::start("Millet", three_phase(), date(2024, 6, 1));
        let status = ActiveStatus::from_journey(&journey, date(2024, 10, 4));

        assert!(status.current_task.is_none());
        assert!(status.post_harvest.is_some());
    }

    #[test]
    fn test_inactive_status_has_no_journey() {
        let status: ActiveStatus = serde_json::from_value(json!({ "active": false })).unwrap();
        assert!(status.into_journey().unwrap().is_none());
    }

    #[test]
    fn test_malformed_active_status() {
        let missing_routine: ActiveStatus = serde_json::from_value(json!({
            "active": true,
            "crop_name": "Rice",
            "sowing_date": "2024-06-01"
        }))
        .unwrap();
        assert!(matches!(
            missing_routine.into_journey(),
            Err(JourneyError::MalformedPayload { ref field, .. }) if field == "routine"
        ));

        let empty_routine: ActiveStatus = serde_json::from_value(json!({
            "active": true,
            "crop_name": "Rice",
            "sowing_date": "2024-06-01",
            "routine": []
        }))
        .unwrap();
        assert!(matches!(
            empty_routine.into_journey(),
            Err(JourneyError::MalformedPayload { .. })
        ));

        let missing_crop: ActiveStatus = serde_json::from_value(json!({
            "active": true,
            "sowing_date": "2024-06-01",
            "routine": [{ "title": "Sowing", "start_day": 0, "end_day": 20 }]
        }))
        .unwrap();
        assert!(matches!(
            missing_crop.into_journey(),
            Err(JourneyError::MalformedPayload { ref field, .. }) if field == "crop_name"
        ));
    }

    #[test]
    fn test_user_role_parsing() {
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::Farmer);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_account_status_parsing_and_toggle() {
        assert_eq!("Blocked".parse::<AccountStatus>().unwrap(), AccountStatus::Blocked);
        assert_eq!(AccountStatus::default(), AccountStatus::Active);
        assert_eq!(AccountStatus::Active.toggled(), AccountStatus::Blocked);
        assert_eq!(AccountStatus::Blocked.toggled().as_str(), "active");
        assert!("deleted".parse::<AccountStatus>().is_err());
    }
}
