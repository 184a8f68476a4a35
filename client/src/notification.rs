use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::task::JoinHandle;

const CLEAR_DELAY: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Single transient notification slot. Setting it replaces any prior
/// content immediately; each notification clears itself after a fixed
/// delay.
#[derive(Default)]
pub struct Notifier {
    slot: Arc<Mutex<Option<Notification>>>,
    pending_clear: Option<JoinHandle<()>>,
}

impl Notifier {
    pub fn set(&mut self, message: impl Into<String>, severity: Severity) {
        // A replaced notification must not be wiped by the previous timer.
        if let Some(pending) = self.pending_clear.take() {
            pending.abort();
        }

        *self.slot.lock().unwrap() = Some(Notification {
            message: message.into(),
            severity,
        });

        let slot = Arc::clone(&self.slot);
        self.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(CLEAR_DELAY).await;
            *slot.lock().unwrap() = None;
        }));
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.lock().unwrap().clone()
    }
}
