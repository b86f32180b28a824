/// Fire-and-forget user notifications (toasts in a browser, lines in a terminal)
pub trait Notifier: Send + Sync {
    fn report_error(&self, message: &str);
    fn report_success(&self, message: &str);
}

/// Blocking yes/no question put to the user
pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers every confirmation the same way (`--yes`, scripts, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
