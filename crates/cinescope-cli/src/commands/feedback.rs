use super::prompts;
use crate::output::Output;
use cinescope_core::{Confirmer, Notifier};
use tracing::warn;

/// Manager notifications printed through the CLI output
pub struct OutputNotifier {
    output: Output,
}

impl OutputNotifier {
    pub fn new(output: &Output) -> Self {
        Self { output: *output }
    }
}

impl Notifier for OutputNotifier {
    fn report_error(&self, message: &str) {
        self.output.error(message);
    }

    fn report_success(&self, message: &str) {
        self.output.success(message);
    }
}

/// Asks on the terminal. An unreadable answer counts as "no".
pub struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm(&self, message: &str) -> bool {
        match prompts::prompt_yes_no(message, Some(false)) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Could not read confirmation, treating as declined");
                false
            }
        }
    }
}
