//! Background open/closed monitor.
//!
//! A spawned task re-evaluates the store schedule on a fixed cadence and
//! publishes the result through a `watch` channel. Handlers read the cached
//! value with [`StatusMonitor::current`]; admin edits call
//! [`StatusMonitor::refresh`] so a schedule change shows up immediately.
//!
//! The task exits once every [`StatusMonitor`] handle (and every receiver
//! obtained from [`StatusMonitor::subscribe`]) has been dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use ipizza_core::StoreStatus;

use super::catalog::CatalogService;

/// Source of the store's local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock stuck at one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

struct Evaluator {
    catalog: CatalogService,
    clock: Arc<dyn Clock>,
    sender: watch::Sender<StoreStatus>,
}

impl Evaluator {
    async fn evaluate(&self) -> StoreStatus {
        let schedule = self.catalog.store_profile().await.schedule;
        let status = ipizza_core::evaluate_at(&schedule, &self.clock.now());

        self.sender.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            tracing::info!(from = %current, to = %status, "store status changed");
            *current = status;
            true
        });
        status
    }

    async fn run(self: Arc<Self>, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the monitor already evaluated.
        interval.tick().await;

        loop {
            tokio::select! {
                () = self.sender.closed() => break,
                _ = interval.tick() => {
                    self.evaluate().await;
                }
            }
        }
        tracing::debug!("store status monitor stopped");
    }
}

/// Handle to the running status monitor. Cheap to clone.
#[derive(Clone)]
pub struct StatusMonitor {
    evaluator: Arc<Evaluator>,
    receiver: watch::Receiver<StoreStatus>,
}

impl StatusMonitor {
    /// Evaluate once, then keep re-evaluating every `period` on a spawned
    /// task.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub async fn start(catalog: CatalogService, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (sender, receiver) = watch::channel(StoreStatus::Closed);
        let evaluator = Arc::new(Evaluator {
            catalog,
            clock,
            sender,
        });

        let initial = evaluator.evaluate().await;
        tracing::info!(status = %initial, period_secs = period.as_secs(), "store status monitor started");

        tokio::spawn(Arc::clone(&evaluator).run(period));

        Self {
            evaluator,
            receiver,
        }
    }

    /// The most recently published status.
    #[must_use]
    pub fn current(&self) -> StoreStatus {
        *self.receiver.borrow()
    }

    /// Re-evaluate now and publish the result.
    pub async fn refresh(&self) -> StoreStatus {
        self.evaluator.evaluate().await
    }

    /// A receiver that is notified on every status change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.receiver.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use ipizza_core::{ScheduleInput, StoreProfileUpdate};

    use super::*;
    use crate::db::InMemoryRepository;

    fn at(day: u32, hour: u32, minute: u32) -> Arc<dyn Clock> {
        // June 2024: the 2nd is a Sunday, the 3rd a Monday, the 4th a Tuesday.
        Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 6, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        ))
    }

    /// A clock the test can move forward while the monitor runs.
    struct MovableClock(std::sync::Mutex<NaiveDateTime>);

    impl MovableClock {
        fn set(&self, now: NaiveDateTime) {
            *self.0.lock().unwrap() = now;
        }
    }

    impl Clock for MovableClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    async fn catalog() -> CatalogService {
        CatalogService::load(Arc::new(InMemoryRepository::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initial_status_follows_default_schedule() {
        let open = StatusMonitor::start(catalog().await, at(4, 19, 0), Duration::from_secs(60)).await;
        assert_eq!(open.current(), StoreStatus::Open);

        let monday = StatusMonitor::start(catalog().await, at(3, 19, 0), Duration::from_secs(60)).await;
        assert_eq!(monday.current(), StoreStatus::Closed);

        let early = StatusMonitor::start(catalog().await, at(4, 17, 59), Duration::from_secs(60)).await;
        assert_eq!(early.current(), StoreStatus::Closed);
    }

    #[tokio::test]
    async fn test_refresh_picks_up_schedule_edits() {
        let catalog = catalog().await;
        let monitor = StatusMonitor::start(catalog.clone(), at(4, 19, 0), Duration::from_secs(60)).await;
        let mut changes = monitor.subscribe();
        assert_eq!(monitor.current(), StoreStatus::Open);

        catalog
            .update_store_profile(StoreProfileUpdate {
                schedule: Some(ScheduleInput {
                    opening_time: Some("20:00".to_string()),
                    closing_time: Some("23:00".to_string()),
                    operating_days: Some(vec![2]),
                }),
                ..StoreProfileUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(monitor.refresh().await, StoreStatus::Closed);
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), StoreStatus::Closed);
    }

    #[tokio::test]
    async fn test_task_stops_when_handles_are_dropped() {
        let monitor = StatusMonitor::start(catalog().await, at(4, 19, 0), Duration::from_secs(60)).await;
        let evaluator = Arc::downgrade(&monitor.evaluator);

        drop(monitor);
        for _ in 0..100 {
            if evaluator.upgrade().is_none() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert!(evaluator.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_periodic_tick_opens_store_at_opening_time() {
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let clock = Arc::new(MovableClock(std::sync::Mutex::new(
            tuesday.and_hms_opt(17, 59, 0).unwrap(),
        )));
        let shared: Arc<dyn Clock> = clock.clone();
        let monitor = StatusMonitor::start(catalog().await, shared, Duration::from_millis(10)).await;
        let mut changes = monitor.subscribe();
        assert_eq!(monitor.current(), StoreStatus::Closed);

        clock.set(tuesday.and_hms_opt(18, 0, 0).unwrap());
        tokio::time::timeout(Duration::from_secs(2), changes.changed())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(monitor.current(), StoreStatus::Open);
    }
}
