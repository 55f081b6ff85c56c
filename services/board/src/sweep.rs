//! Deadline sweep
//!
//! Periodically examines the work list and moves items whose deadline has
//! passed back to the backlog. Runs one pass immediately on activation and
//! then on a fixed five-second period until the handle is stopped. Each
//! overdue item gets its own fire-and-forget update task; a failed update
//! is logged and the item is picked up again on the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use common::model::Work;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{api::ApiClient, cache::WorkCache};

/// Poll period between sweep passes
pub const SWEEP_PERIOD: Duration = Duration::from_secs(5);

/// Whether the sweep should move a work item to the backlog now
///
/// Items already in backlog, done, or cancelled are never touched, nor are
/// items without a deadline. The comparison is strict: an item is overdue
/// only once the wall clock has passed its deadline.
pub fn is_overdue(work: &Work, now: DateTime<Utc>) -> bool {
    match work.end_date {
        Some(end_date) => !work.status.is_terminal_or_backlog() && now > end_date,
        None => false,
    }
}

/// Deadline sweep over the cached work list
pub struct DeadlineSweep {
    client: Arc<ApiClient>,
    cache: Arc<WorkCache>,
}

impl DeadlineSweep {
    /// Create a new sweep over the given client and cache
    pub fn new(client: Arc<ApiClient>, cache: Arc<WorkCache>) -> Self {
        Self { client, cache }
    }

    /// Start sweeping; the first pass runs immediately
    pub fn spawn(self) -> SweepHandle {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_PERIOD);
            loop {
                ticker.tick().await;
                self.sweep_once().await;
            }
        });

        SweepHandle { handle }
    }

    /// One pass over the list: fan out an update per overdue item
    async fn sweep_once(&self) {
        let works = match self.cache.get_or_refresh(&self.client).await {
            Ok(works) => works,
            Err(e) => {
                error!("Failed to fetch work items: {}", e);
                return;
            }
        };

        let now = Utc::now();

        for work in works.into_iter().filter(|w| is_overdue(w, now)) {
            let client = Arc::clone(&self.client);
            let cache = Arc::clone(&self.cache);

            tokio::spawn(async move {
                match client
                    .update_work(work.id, json!({"status": "backlog"}))
                    .await
                {
                    Ok(_) => {
                        info!("Moved overdue work item {} to backlog", work.id);
                        cache.invalidate().await;
                    }
                    Err(e) => {
                        error!("Failed to move work item {} to backlog: {}", work.id, e);
                    }
                }
            });
        }
    }
}

/// Handle owning the sweep task; stopping it tears the sweep down
pub struct SweepHandle {
    handle: JoinHandle<()>,
}

impl SweepHandle {
    /// Stop the sweep
    pub fn stop(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use common::model::WorkStatus;
    use uuid::Uuid;

    fn work_with(status: WorkStatus, end_date: Option<DateTime<Utc>>) -> Work {
        Work {
            id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status,
            end_date,
            created_at: Utc::now(),
            owner_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_past_deadline_with_active_status_is_overdue() {
        let now = Utc::now();
        let past = Some(now - TimeDelta::hours(1));

        assert!(is_overdue(&work_with(WorkStatus::Todo, past), now));
        assert!(is_overdue(&work_with(WorkStatus::InProgress, past), now));
    }

    #[test]
    fn test_exempt_statuses_are_never_overdue() {
        let now = Utc::now();
        let past = Some(now - TimeDelta::hours(1));

        assert!(!is_overdue(&work_with(WorkStatus::Backlog, past), now));
        assert!(!is_overdue(&work_with(WorkStatus::Done, past), now));
        assert!(!is_overdue(&work_with(WorkStatus::Cancelled, past), now));
    }

    #[test]
    fn test_missing_deadline_is_never_overdue() {
        let now = Utc::now();

        assert!(!is_overdue(&work_with(WorkStatus::Todo, None), now));
        assert!(!is_overdue(&work_with(WorkStatus::InProgress, None), now));
    }

    #[test]
    fn test_future_deadline_is_not_overdue() {
        let now = Utc::now();
        let future = Some(now + TimeDelta::hours(1));

        assert!(!is_overdue(&work_with(WorkStatus::Todo, future), now));
    }

    #[test]
    fn test_deadline_exactly_now_is_not_overdue() {
        let now = Utc::now();
        assert!(!is_overdue(&work_with(WorkStatus::Todo, Some(now)), now));
    }

    #[test]
    fn test_reinstated_item_without_deadline_stays_put() {
        // A cancelled item flipped back to todo with no deadline set must
        // not be swept.
        let now = Utc::now();
        let work = work_with(WorkStatus::Todo, None);
        assert!(!is_overdue(&work, now));
    }
}
