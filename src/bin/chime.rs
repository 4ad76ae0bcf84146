//! Chime binary: load the weekly schedule and announce today's tasks.

use chime::config::ChimeConfig;
use chime::notify::{ConsoleNotifier, FanoutNotifier, Notifier, SpeechNotifier};
use chime::reminder::agenda::{agenda_announcements, agenda_lines};
use chime::reminder::{ReminderEngine, ReminderRunner, RunnerOptions, SystemClock};
use chime::schedule::load_schedule;
use chrono::{Datelike, Local};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries the agenda and status line.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chime=info")),
        )
        .init();

    let config_path = ChimeConfig::default_config_path();
    let config = ChimeConfig::load_or_default(&config_path)?;

    let tasks = load_schedule(&config.schedule.path)?;
    println!(
        "Loaded {} tasks from {}",
        tasks.len(),
        config.schedule.path.display()
    );

    let today = Local::now().date_naive();
    let engine = ReminderEngine::new(tasks, today, config.reminders.rollover);
    for line in agenda_lines(today.weekday(), engine.applicable()) {
        println!("{line}");
    }

    let name = config.reminders.name.clone();
    let mut speech = SpeechNotifier::from_config(&config.speech);
    if config.reminders.announce_agenda
        && let Some(speech) = speech.as_mut()
    {
        for phrase in agenda_announcements(engine.applicable(), name.as_deref()) {
            if let Err(e) = speech.notify(&phrase) {
                warn!("cannot announce agenda: {e}");
                break;
            }
        }
    }

    let mut notifier = FanoutNotifier::new().with(ConsoleNotifier::stdout());
    if let Some(speech) = speech {
        notifier = notifier.with(speech);
    }

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            cancel_clone.cancel();
        }
    });

    println!("\n⏰ Real-time reminders starting...\n");

    let options = RunnerOptions {
        interval: config.tick_interval(),
        name,
        status_line: config.reminders.status_line,
    };
    ReminderRunner::new(engine, notifier, SystemClock, options)
        .run(cancel)
        .await;
    println!();

    Ok(())
}
