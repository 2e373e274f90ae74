//! View state for the dashboard page.
//!
//! The state is owned by whichever request is rendering the page and only
//! changes through the methods below, which mirror the entry and logout flows.

use crate::domain::Entry;
use crate::flows::FlowError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// Accumulated entries, oldest first.
    pub entries: Vec<Entry>,
    /// Text left in the input box.
    pub input: String,
    pub error: Option<String>,
}

impl DashboardState {
    /// Rebuilds the state carried by a previously rendered page.
    pub fn restore(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Applies the outcome of an entry submission.
    ///
    /// Success appends exactly one entry and clears the input. Failure keeps
    /// the entries and what the user typed, and shows the message.
    pub fn record_submission(&mut self, input: &str, outcome: Result<Entry, FlowError>) {
        match outcome {
            Ok(entry) => {
                self.entries.push(entry);
                self.input.clear();
                self.error = None;
            }
            Err(e) => {
                self.input = input.to_string();
                self.error = Some(e.to_string());
            }
        }
    }

    /// A refused logout keeps the entries and what the user typed, and shows the message.
    pub fn record_logout_failure(&mut self, input: &str, error: &FlowError) {
        self.input = input.to_string();
        self.error = Some(error.to_string());
    }
}
