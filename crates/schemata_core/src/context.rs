//! Options controlling a validation run.

/// Context for validation operations.
///
/// The default context ignores keys that the schema does not declare.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Whether to reject keys the schema does not declare
    pub strict: bool,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict validation mode.
    ///
    /// In strict mode unknown keys are reported at every nesting level.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
