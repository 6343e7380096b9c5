//! Recording notification dispatcher for integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use backend::notifications::{
    DispatchError, NotificationDispatcher, StoryComplete, TurnNotification,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchedEvent {
    Turn(TurnNotification),
    Complete(StoryComplete),
}

/// Dispatcher that records every event instead of sending mail.
///
/// Optionally fails every send, to verify that dispatch failures never
/// affect submission outcomes.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<DispatchedEvent>>,
    fail_sends: bool,
}

impl RecordingDispatcher {
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn turn_notifications(&self) -> Vec<TurnNotification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DispatchedEvent::Turn(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn story_completes(&self) -> Vec<StoryComplete> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DispatchedEvent::Complete(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: DispatchedEvent) -> Result<(), DispatchError> {
        self.events.lock().unwrap().push(event);
        if self.fail_sends {
            return Err(DispatchError::Http("recording dispatcher set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_turn_notification(&self, note: TurnNotification) -> Result<(), DispatchError> {
        self.record(DispatchedEvent::Turn(note))
    }

    async fn send_story_complete(&self, note: StoryComplete) -> Result<(), DispatchError> {
        self.record(DispatchedEvent::Complete(note))
    }
}
