use std::sync::Arc;

use jiff::civil::Date;
use sprout_core::{FixedClock, LocalTracker, TrackerBuilder};
use tempfile::TempDir;

/// Helper function to create a test tracker whose clock is pinned to `today`
pub async fn create_test_tracker(today: Date) -> (TempDir, LocalTracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = open_tracker(&temp_dir, today).await;
    assert!(db_path.exists());
    (temp_dir, tracker)
}

/// Opens another tracker on the database inside `temp_dir`
pub async fn open_tracker(temp_dir: &TempDir, today: Date) -> LocalTracker {
    TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_clock(Arc::new(FixedClock(today)))
        .build()
        .await
        .expect("Failed to create tracker")
}
