//! Notification sinks.
//!
//! A [`Notifier`] renders one line of text and returns only once rendering is
//! complete, so notifications fired in the same tick play strictly in sequence.

mod console;
mod speech;

pub use console::ConsoleNotifier;
pub use speech::{SpeechEngine, SpeechNotifier};

use crate::error::{ChimeError, Result};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Blocking text sink.
pub trait Notifier {
    /// Render `text`, returning after it has been fully printed or spoken.
    fn notify(&mut self, text: &str) -> Result<()>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, text: &str) -> Result<()> {
        (**self).notify(text)
    }
}

/// Sends every message to each inner notifier in order.
///
/// All sinks are attempted even when one fails; the first error is returned.
#[derive(Default)]
pub struct FanoutNotifier {
    sinks: Vec<Box<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink.
    pub fn with(mut self, sink: impl Notifier + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&mut self, text: &str) -> Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.notify(text) {
                warn!("notification sink failed: {e}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// In-memory notifier that records every message. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that records each message and then reports failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, text: &str) -> Result<()> {
        self.messages
            .lock()
            .map_err(|_| ChimeError::Notify("message log poisoned".to_owned()))?
            .push(text.to_owned());
        if self.fail {
            return Err(ChimeError::Notify("memory notifier set to fail".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn fanout_delivers_to_every_sink_in_order() {
        let a = MemoryNotifier::new();
        let b = MemoryNotifier::new();
        let mut fanout = FanoutNotifier::new().with(a.clone()).with(b.clone());

        fanout.notify("one").unwrap();
        fanout.notify("two").unwrap();

        assert_eq!(a.messages(), vec!["one", "two"]);
        assert_eq!(b.messages(), vec!["one", "two"]);
    }

    #[test]
    fn fanout_keeps_going_after_a_failure() {
        let broken = MemoryNotifier::failing();
        let healthy = MemoryNotifier::new();
        let mut fanout = FanoutNotifier::new()
            .with(broken.clone())
            .with(healthy.clone());

        let result = fanout.notify("hello");
        assert!(matches!(result, Err(ChimeError::Notify(_))));
        assert_eq!(healthy.messages(), vec!["hello"]);
    }

    #[test]
    fn empty_fanout_is_ok() {
        let mut fanout = FanoutNotifier::new();
        assert!(fanout.is_empty());
        assert!(fanout.notify("nobody listens").is_ok());
    }
}
