use serde::{Deserialize, Serialize};

/// A single task attached to a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Short title shown in the grid and the list (never empty)
    pub text: String,
    /// Free-form body, may span several lines
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Label for the completion action, as shown on buttons and key hints
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Mark Incomplete"
        } else {
            "Mark Complete"
        }
    }
}
