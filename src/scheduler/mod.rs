//! Background scheduling behind a port.
//!
//! Tasks are unique by name. The period is a hint: a task runs roughly once
//! per period, never more often, and a failing run does not unschedule it.

use crate::errors::{AppError, AppResult};
use crate::models::settings::Settings;
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Name of the periodic reminder check.
pub const REMINDER_TASK: &str = "event-reminder";

/// What to do when a task with the same name is already scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingTaskPolicy {
    Update,
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicRequest {
    pub name: String,
    pub period: Duration,
    pub policy: ExistingTaskPolicy,
}

impl PeriodicRequest {
    pub fn new(name: &str, period: Duration, policy: ExistingTaskPolicy) -> Self {
        Self {
            name: name.to_string(),
            period,
            policy,
        }
    }
}

pub type Job = Arc<dyn Fn() -> AppResult<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Scheduled,
    Replaced,
    Kept,
}

pub trait SchedulerPort {
    fn register(&mut self, request: PeriodicRequest, job: Job) -> AppResult<Registration>;
    fn cancel(&mut self, name: &str) -> bool;
    fn is_registered(&self, name: &str) -> bool;
}

/// Check period for the reminder task: the lead time, but never below `min`.
pub fn reminder_period(settings: &Settings, min: chrono::Duration) -> Duration {
    let period = settings.lead_time().max(min);
    period.to_std().unwrap_or(Duration::from_secs(15 * 60))
}

pub struct TokioScheduler {
    handle: Handle,
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: HashMap::new(),
        }
    }

    /// Scheduler bound to the runtime of the caller.
    pub fn current() -> AppResult<Self> {
        let handle = Handle::try_current().map_err(|e| AppError::Scheduler(e.to_string()))?;
        Ok(Self::new(handle))
    }

    pub fn len(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn spawn(&self, name: String, period: Duration, job: Job) -> JoinHandle<()> {
        self.handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let job = Arc::clone(&job);
                match tokio::task::spawn_blocking(move || job()).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warning(format!("Task '{name}' failed, retrying next period: {e}")),
                    Err(e) => warning(format!("Task '{name}' aborted: {e}")),
                }
            }
        })
    }
}

impl SchedulerPort for TokioScheduler {
    fn register(&mut self, request: PeriodicRequest, job: Job) -> AppResult<Registration> {
        if request.period.is_zero() {
            return Err(AppError::Scheduler(format!(
                "Task '{}' needs a non-zero period",
                request.name
            )));
        }

        let existing = self.tasks.get(&request.name).filter(|t| !t.is_finished());

        let outcome = match (existing, request.policy) {
            (Some(_), ExistingTaskPolicy::Keep) => return Ok(Registration::Kept),
            (Some(task), ExistingTaskPolicy::Update) => {
                task.abort();
                Registration::Replaced
            }
            (None, _) => Registration::Scheduled,
        };

        let task = self.spawn(request.name.clone(), request.period, job);
        self.tasks.insert(request.name, task);
        Ok(outcome)
    }

    fn cancel(&mut self, name: &str) -> bool {
        match self.tasks.remove(name) {
            Some(task) => {
                let was_running = !task.is_finished();
                task.abort();
                was_running
            }
            None => false,
        }
    }

    fn is_registered(&self, name: &str) -> bool {
        self.tasks.get(name).is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_job(counter: &Arc<AtomicUsize>) -> Job {
        let c = Arc::clone(counter);
        Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn every(ms: u64, policy: ExistingTaskPolicy) -> PeriodicRequest {
        PeriodicRequest::new(REMINDER_TASK, Duration::from_millis(ms), policy)
    }

    #[test]
    fn period_is_lead_time_clamped_to_minimum() {
        let min = chrono::Duration::minutes(15);

        let long = Settings {
            first_time_to_start: NaiveTime::from_hms_opt(0, 45, 0).unwrap(),
            ..Settings::default()
        };
        assert_eq!(reminder_period(&long, min), Duration::from_secs(45 * 60));

        let short = Settings {
            first_time_to_start: NaiveTime::from_hms_opt(0, 5, 0).unwrap(),
            ..Settings::default()
        };
        assert_eq!(reminder_period(&short, min), Duration::from_secs(15 * 60));
    }

    #[tokio::test(start_paused = true)]
    async fn runs_job_periodically() {
        let mut sched = TokioScheduler::current().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let r = sched
            .register(every(20, ExistingTaskPolicy::Update), counting_job(&counter))
            .unwrap();
        assert_eq!(r, Registration::Scheduled);
        assert!(sched.is_registered(REMINDER_TASK));

        tokio::time::sleep(Duration::from_millis(150)).await;
        let runs = counter.load(Ordering::SeqCst);
        // ticks at 0, 20, ..., 140 ms at most
        assert!((2..=8).contains(&runs), "runs = {runs}");
    }

    #[tokio::test(start_paused = true)]
    async fn same_name_never_duplicates() {
        let mut sched = TokioScheduler::current().unwrap();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        sched
            .register(every(20, ExistingTaskPolicy::Update), counting_job(&first))
            .unwrap();
        let kept = sched
            .register(every(20, ExistingTaskPolicy::Keep), counting_job(&second))
            .unwrap();
        assert_eq!(kept, Registration::Kept);
        assert_eq!(sched.len(), 1);

        let replaced = sched
            .register(every(20, ExistingTaskPolicy::Update), counting_job(&second))
            .unwrap();
        assert_eq!(replaced, Registration::Replaced);
        assert_eq!(sched.len(), 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let frozen = first.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(first.load(Ordering::SeqCst), frozen);
        assert!(second.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_job_stays_scheduled() {
        let mut sched = TokioScheduler::current().unwrap();
        let attempts = Arc::new(AtomicUsize::new(0));
        let a = Arc::clone(&attempts);

        sched
            .register(
                every(20, ExistingTaskPolicy::Update),
                Arc::new(move || {
                    a.fetch_add(1, Ordering::SeqCst);
                    Err(AppError::Other("store busy".into()))
                }),
            )
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(attempts.load(Ordering::SeqCst) >= 2);
        assert!(sched.is_registered(REMINDER_TASK));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_zero_period() {
        let mut sched = TokioScheduler::current().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        assert!(
            sched
                .register(every(0, ExistingTaskPolicy::Update), counting_job(&counter))
                .is_err()
        );
        assert!(!sched.is_registered(REMINDER_TASK));

        sched
            .register(every(1000, ExistingTaskPolicy::Update), counting_job(&counter))
            .unwrap();
        assert!(sched.cancel(REMINDER_TASK));
        assert!(!sched.cancel(REMINDER_TASK));
        assert!(sched.is_empty());
    }
}
