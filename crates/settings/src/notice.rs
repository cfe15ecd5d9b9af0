/// The category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    /// Short tag used when printing.
    pub fn tag(&self) -> &'static str {
        match self {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
            NoticeKind::Info => "info",
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: Option<String>,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind.tag(), self.title)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Pending notices, shown once and then dropped.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notice.
    pub fn push(&mut self, kind: NoticeKind, title: impl Into<String>, message: Option<String>) {
        self.notices.push(Notice {
            kind,
            title: title.into(),
            message,
        });
    }

    pub fn success(&mut self, title: impl Into<String>) {
        self.push(NoticeKind::Success, title, None);
    }

    pub fn error(&mut self, title: impl Into<String>) {
        self.push(NoticeKind::Error, title, None);
    }

    pub fn warning(&mut self, title: impl Into<String>) {
        self.push(NoticeKind::Warning, title, None);
    }

    pub fn info(&mut self, title: impl Into<String>) {
        self.push(NoticeKind::Info, title, None);
    }

    /// Queues an error with detail text.
    pub fn error_with(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeKind::Error, title, Some(message.into()));
    }

    /// Queues an info notice with body text.
    pub fn info_with(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeKind::Info, title, Some(message.into()));
    }

    /// Takes every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Whether any pending notice is an error.
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.kind == NoticeKind::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
