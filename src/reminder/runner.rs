//! Reminder loop: ticks the engine on a fixed interval and renders events.

use crate::notify::Notifier;
use crate::reminder::clock::Clock;
use crate::reminder::engine::ReminderEngine;
use crate::reminder::event::NotificationEvent;
use chrono::NaiveDateTime;
use std::io::Write;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Interval between engine ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Loop behaviour.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Time between ticks.
    pub interval: Duration,
    /// Name to greet in every notification.
    pub name: Option<String>,
    /// Redraw the in-place "current time" line on each tick.
    pub status_line: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            name: None,
            status_line: true,
        }
    }
}

/// Drives a [`ReminderEngine`] with a [`Clock`] and hands events to a [`Notifier`].
pub struct ReminderRunner<N, C> {
    engine: ReminderEngine,
    notifier: N,
    clock: C,
    options: RunnerOptions,
}

impl<N: Notifier, C: Clock> ReminderRunner<N, C> {
    pub fn new(engine: ReminderEngine, notifier: N, clock: C, options: RunnerOptions) -> Self {
        Self {
            engine,
            notifier,
            clock,
            options,
        }
    }

    pub fn engine(&self) -> &ReminderEngine {
        &self.engine
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one tick at the clock's current time.
    ///
    /// Events are rendered strictly in order. A failed notification is logged
    /// and not retried; its key stays recorded.
    pub fn step(&mut self) -> Vec<NotificationEvent> {
        let now = self.clock.now();
        let events = self.engine.tick(now);
        for event in &events {
            let text = event.render(self.options.name.as_deref());
            debug!(key = %event.key, "notifying: {text}");
            if let Err(e) = self.notifier.notify(&text) {
                warn!(key = %event.key, "notification failed: {e}");
            }
        }
        events
    }

    /// Tick until `cancel` fires, then hand back the engine.
    pub async fn run(mut self, cancel: CancellationToken) -> ReminderEngine {
        let mut interval = tokio::time::interval(self.options.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            "reminder loop started with {} tasks for {}",
            self.engine.applicable().len(),
            self.engine.current_day()
        );

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("reminder loop stopped");
                    return self.engine;
                }
                _ = interval.tick() => {
                    if self.options.status_line {
                        draw_status(self.clock.now());
                    }
                    self.step();
                }
            }
        }
    }
}

fn draw_status(now: NaiveDateTime) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "\r⏱ Current time: {}", now.format("%H:%M:%S"));
    let _ = stdout.flush();
}
