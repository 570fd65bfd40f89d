//! Engine-scoped input channel.
//!
//! Producers push [`InputEvent`]s through an [`InputSender`]; the engine drains
//! them on its own thread. Dropping the receiving side detaches every sender.

use crate::input::InputEvent;
use std::sync::mpsc::{Receiver, Sender, channel};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Input subscription is closed")]
    Detached,
}

/// Cloneable handle used to feed events to the engine.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Fails once the engine has unsubscribed or been dropped.
    pub fn send(&self, event: InputEvent) -> Result<(), SubscriptionError> {
        self.tx.send(event).map_err(|_| SubscriptionError::Detached)
    }
}

/// Receiving half owned by the engine.
#[derive(Debug)]
pub(crate) struct InputSubscription {
    rx: Receiver<InputEvent>,
}

impl InputSubscription {
    pub(crate) fn open() -> (Self, InputSender) {
        let (tx, rx) = channel();
        (Self { rx }, InputSender { tx })
    }

    /// Take every queued event without blocking.
    pub(crate) fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let (sub, tx) = InputSubscription::open();
        tx.send(InputEvent::down(1.0, 1.0)).unwrap();
        tx.clone().send(InputEvent::up(2.0, 2.0)).unwrap();
        assert_eq!(sub.drain(), vec![InputEvent::down(1.0, 1.0), InputEvent::up(2.0, 2.0)]);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_send_after_drop_fails() {
        let (sub, tx) = InputSubscription::open();
        drop(sub);
        assert_eq!(tx.send(InputEvent::down(0.0, 0.0)), Err(SubscriptionError::Detached));
    }
}
