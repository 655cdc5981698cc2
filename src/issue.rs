//! Issue data as seen by sprig.
//!
//! The issue tracker itself is an external collaborator; sprig only ever
//! reads the three fields it needs and never writes any of them back.

/// A tracked issue, read-only to sprig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Stable tracker-wide identifier (e.g. "PROJ-42").
    pub id: String,
    /// Current summary text; may change over the lifetime of the issue.
    pub summary: String,
    /// Issue category (e.g. "Task", "Bug"); absent on trackers without types.
    pub issue_type: Option<String>,
}

impl Issue {
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        issue_type: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            issue_type,
        }
    }

    /// Summary cropped for single-line display.
    pub fn cropped_summary(&self, max_len: usize) -> String {
        if self.summary.chars().count() > max_len {
            let cropped: String = self.summary.chars().take(max_len).collect();
            format!("{}...", cropped)
        } else {
            self.summary.clone()
        }
    }
}
