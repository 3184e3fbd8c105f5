//! Confirmation port - asks the person at the keyboard before destructive actions

/// Yes/no prompt shown before a delete request is issued
pub trait Confirmer: Send + Sync {
    /// Returns `true` only on explicit acceptance
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmer with a predetermined answer (`--force`, scripted use, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
