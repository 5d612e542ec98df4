use tokio::sync::mpsc;
use tracing::{info, warn};

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient user-visible notification (rendered as a toast by the UI)
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Cloneable sender half of the notice channel.
///
/// Session and playback code report every recovered failure here; the view
/// layer consumes the receiver. Sending never fails: notices emitted after
/// the receiver is gone are dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        let _ = self.tx.send(Notice {
            level: NoticeLevel::Info,
            message,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        let _ = self.tx.send(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }
}
