use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short, non-blocking message for the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Notice {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Notice {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// How long a front end should keep the notice on screen.
    pub fn duration(&self) -> Duration {
        match self.level {
            NoticeLevel::Info => Duration::from_secs(3),
            NoticeLevel::Error => Duration::from_secs(4),
        }
    }
}

/// The one place failures reach the user.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}
