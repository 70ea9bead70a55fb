/// Feedback category a presentation layer uses to style a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Nothing went wrong but nothing changed either (e.g. "already at top")
    Info,
    Error,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::Info => "Info",
            Status::Error => "Error",
        }
    }
}

/// Result of a mutation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: Status::Info,
            message: message.into(),
        }
    }

    /// Only successful outcomes change the document and need a save.
    pub fn changed(&self) -> bool {
        self.status == Status::Success
    }
}
