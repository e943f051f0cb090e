//! User-visible notices.
//!
//! Every failure path in the crate ends in a short message to the user rather
//! than an error bubbling out of the UI flow. The terminal front end prints them;
//! tests record them.

use std::sync::Mutex;

pub trait Notifier {
    fn notice(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notice(&self, message: &str) {
        (**self).notice(message)
    }
}

/// Keeps every notice in memory, in order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    messages: Mutex<Vec<String>>,
}

impl NoticeLog {
    pub fn new() -> NoticeLog {
        NoticeLog::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|message| message.contains(needle))
    }
}

impl Notifier for NoticeLog {
    fn notice(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_owned());
        }
    }
}
