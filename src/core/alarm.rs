//! Alarm presentation: ring until the user dismisses, or until the stop time
//! when auto-dismiss is enabled.

use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::utils::time::until_time_of_day;
use chrono::NaiveTime;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Delay between two plays of the alarm sound.
pub const REPLAY_EVERY: Duration = Duration::from_secs(3);

pub trait SoundPlayer {
    fn play(&mut self, sound: &str);
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Explicit user action.
    User,
    /// The stop-alerting time was reached.
    Timeout,
    /// The owner went away (shutdown, screen torn down).
    Teardown,
}

impl DismissReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DismissReason::User => "user",
            DismissReason::Timeout => "timeout",
            DismissReason::Teardown => "teardown",
        }
    }
}

/// Auto-dismiss delay: from `now` to the configured stop time of the same
/// day. A stop time already past yields zero, i.e. dismiss right away.
pub fn stop_delay(now: NaiveTime, stop_at: NaiveTime) -> Duration {
    until_time_of_day(now, stop_at).to_std().unwrap_or(Duration::ZERO)
}

#[derive(Debug, Clone)]
pub struct AlarmSession {
    pub event: Event,
    pub sound: String,
    pub auto_dismiss: Option<Duration>,
    pub replay_every: Duration,
}

impl AlarmSession {
    pub fn new(event: Event, settings: &Settings, now: NaiveTime) -> Self {
        let auto_dismiss = settings
            .time_for_stop_alerting_enabled
            .then(|| stop_delay(now, settings.time_for_stop_alerting));

        Self {
            event,
            sound: settings.sound_name.clone(),
            auto_dismiss,
            replay_every: REPLAY_EVERY,
        }
    }

    pub fn replay_every(mut self, every: Duration) -> Self {
        self.replay_every = every.max(Duration::from_millis(1));
        self
    }

    /// Ring until one of the dismiss paths completes. The auto-dismiss timer
    /// is dropped together with the session on user dismissal or teardown.
    pub async fn run<P, U, T>(&self, player: &mut P, user_dismiss: U, teardown: T) -> DismissReason
    where
        P: SoundPlayer,
        U: Future<Output = ()>,
        T: Future<Output = ()>,
    {
        let auto_dismiss = self.auto_dismiss;
        let timeout = async move {
            match auto_dismiss {
                Some(d) if d.is_zero() => {}
                Some(d) => tokio::time::sleep(d).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::pin!(user_dismiss);
        tokio::pin!(teardown);
        tokio::pin!(timeout);

        let mut replay = tokio::time::interval(self.replay_every);
        replay.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let reason = loop {
            tokio::select! {
                biased;
                _ = &mut teardown => break DismissReason::Teardown,
                _ = &mut user_dismiss => break DismissReason::User,
                _ = &mut timeout => break DismissReason::Timeout,
                _ = replay.tick() => player.play(&self.sound),
            }
        };

        player.stop();
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct CountingPlayer {
        plays: Vec<String>,
        stopped: bool,
    }

    impl SoundPlayer for CountingPlayer {
        fn play(&mut self, sound: &str) {
            self.plays.push(sound.to_string());
        }
        fn stop(&mut self) {
            self.stopped = true;
        }
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn event() -> Event {
        Event::new(
            "Wake up",
            "x",
            NaiveDateTime::parse_from_str("2024-01-01 07:00", "%Y-%m-%d %H:%M").unwrap(),
            true,
        )
    }

    fn settings(enabled: bool, stop: &str) -> Settings {
        Settings {
            time_for_stop_alerting: t(stop),
            time_for_stop_alerting_enabled: enabled,
            sound_name: "Rooster".into(),
            ..Settings::default()
        }
    }

    #[test]
    fn stop_delay_is_difference_to_stop_time() {
        assert_eq!(stop_delay(t("10:00"), t("10:05")), Duration::from_secs(300));
        assert_eq!(stop_delay(t("10:05"), t("10:00")), Duration::ZERO);
        assert_eq!(stop_delay(t("10:00"), t("10:00")), Duration::ZERO);
    }

    #[test]
    fn auto_dismiss_only_when_enabled() {
        let off = AlarmSession::new(event(), &settings(false, "10:05"), t("10:00"));
        assert!(off.auto_dismiss.is_none());

        let on = AlarmSession::new(event(), &settings(true, "10:05"), t("10:00"));
        assert_eq!(on.auto_dismiss, Some(Duration::from_secs(300)));
        assert_eq!(on.sound, "Rooster");
    }

    #[tokio::test(start_paused = true)]
    async fn rings_repeatedly_until_timeout() {
        let session = AlarmSession::new(event(), &settings(true, "10:01"), t("10:00"))
            .replay_every(Duration::from_secs(10));
        let mut player = CountingPlayer::default();

        let reason = session
            .run(&mut player, std::future::pending(), std::future::pending())
            .await;

        assert_eq!(reason, DismissReason::Timeout);
        // plays at 0s, 10s, ..., 50s; the 60s tick loses against the timeout
        assert_eq!(player.plays.len(), 6);
        assert!(player.plays.iter().all(|s| s == "Rooster"));
        assert!(player.stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn user_dismissal_cancels_timer() {
        let session = AlarmSession::new(event(), &settings(true, "10:05"), t("10:00"));
        let mut player = CountingPlayer::default();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(7)).await;
            let _ = tx.send(());
        });

        let started = tokio::time::Instant::now();
        let reason = session
            .run(
                &mut player,
                async move {
                    let _ = rx.await;
                },
                std::future::pending(),
            )
            .await;

        assert_eq!(reason, DismissReason::User);
        assert!(started.elapsed() < Duration::from_secs(300));
        assert!(!player.plays.is_empty());
        assert!(player.stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_wins_over_everything() {
        let session = AlarmSession::new(event(), &settings(false, "10:05"), t("10:00"));
        let mut player = CountingPlayer::default();

        let reason = session
            .run(&mut player, std::future::ready(()), std::future::ready(()))
            .await;

        assert_eq!(reason, DismissReason::Teardown);
        assert!(player.stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn past_stop_time_dismisses_immediately() {
        let session = AlarmSession::new(event(), &settings(true, "09:00"), t("10:00"));
        let mut player = CountingPlayer::default();

        let reason = session
            .run(&mut player, std::future::pending(), std::future::pending())
            .await;

        assert_eq!(reason, DismissReason::Timeout);
        assert!(player.plays.is_empty());
    }
}
