use std::sync::Mutex;

/// Severity of a transient notification shown beside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// One transient, non-blocking toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications (toasts in the rendered page).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink that queues notifications for the shell to drain each tick.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queued: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn drain(&self) -> Vec<Notification> {
        let mut guard = self.queued.lock().expect("notification mutex poisoned");
        std::mem::take(&mut *guard)
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        let mut guard = self.queued.lock().expect("notification mutex poisoned");
        guard.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let queue = NotificationQueue::default();
        queue.notify(Notification::error("first"));
        queue.notify(Notification::success("second"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Notification::error("first"));
        assert!(queue.drain().is_empty());
    }
}
