//! Ordered diagnostic sink shared by the passes of one compilation.

use crate::{Diagnostic, Severity};

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited). Errors past the limit
    /// are counted but dropped.
    pub error_limit: usize,
}

impl DiagnosticConfig {
    /// Keep every diagnostic.
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

/// Diagnostics in emission order.
///
/// Unlike a sorted queue, emission order is preserved: a pass that reports
/// one problem per declaration reports them in declaration order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
    config: DiagnosticConfig,
    error_count: usize,
    dropped: usize,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticList {
            diagnostics: Vec::new(),
            config,
            error_count: 0,
            dropped: 0,
        }
    }

    /// Append a diagnostic. Returns `false` if it was dropped by the error limit.
    pub fn add(&mut self, diagnostic: Diagnostic) -> bool {
        if diagnostic.severity == Severity::Error {
            self.error_count += 1;
            if self.limit_reached_before_this() {
                self.dropped += 1;
                return false;
            }
        }
        self.diagnostics.push(diagnostic);
        true
    }

    fn limit_reached_before_this(&self) -> bool {
        self.config.error_limit > 0 && self.error_count > self.config.error_limit
    }

    /// Whether any error was reported, including dropped ones.
    pub fn contains_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Errors reported so far, including dropped ones.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Errors dropped because of the error limit.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Whether the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Render every diagnostic against `source`, one block per diagnostic.
    ///
    /// ```text
    /// shader.wgsl:3:5 error[E1002]: cyclic dependency found: 'a' -> 'b' -> 'a'
    /// shader.wgsl:1:9 note: var 'a' references var 'b' here
    /// ```
    pub fn render(&self, file: &str, source: &str) -> String {
        crate::span_utils::render(self.as_slice(), file, source)
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
