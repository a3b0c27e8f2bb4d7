//! Fallback display for faults raised while rendering

use crate::error::AppResult;

pub const FALLBACK_TITLE: &str = "Something went wrong.";
pub const RETRY_LABEL: &str = "Try again?";

/// Catches the fault of a failing render and keeps showing the fallback
/// until [`ErrorBoundary::reset`] is called.
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    fault: Option<String>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `child`, or the fallback if it (or an earlier render) failed
    pub fn render<F>(&mut self, child: F) -> String
    where
        F: FnOnce() -> AppResult<String>,
    {
        if let Some(message) = &self.fault {
            return render_fallback(message);
        }

        match child() {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Render failed: {}", e);
                let message = e.fault_message();
                let fallback = render_fallback(&message);
                self.fault = Some(message);
                fallback
            }
        }
    }

    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Clear the fault so the next render tries the child again
    pub fn reset(&mut self) {
        self.fault = None;
    }
}

fn render_fallback(message: &str) -> String {
    format!("{}\n{}\n[{}]", FALLBACK_TITLE, message, RETRY_LABEL)
}
