//! Event bus for cross-component communication.
//!
//! Components that do not own each other communicate through a broadcast
//! channel: the controller publishes, views and notification areas
//! subscribe. Events carry no payload large enough to matter; slow
//! subscribers that lag past the channel capacity miss old events rather
//! than blocking publishers.

use tokio::sync::broadcast;

use crate::domain::Section;

/// Default buffered event capacity per subscriber.
const DEFAULT_CAPACITY: usize = 64;

/// Severity of a transient alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

/// Events published on the bus.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The current section changed.
    SectionChanged(Section),
    /// A transient, auto-dismissing notification.
    Alert {
        level: AlertLevel,
        message: String,
    },
}

/// Broadcast bus for application events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` events per subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event. Events published while nobody is subscribed
    /// are dropped.
    pub fn emit(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
