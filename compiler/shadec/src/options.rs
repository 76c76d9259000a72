//! Options for a whole compilation.

use shade_diagnostic::DiagnosticConfig;
use shade_resolve::ResolveOptions;
use shade_transform::PromoteOptions;

#[derive(Clone, Debug, Default)]
pub struct CompilerOptions {
    pub resolve: ResolveOptions,
    pub promote: PromoteOptions,
    pub diagnostics: DiagnosticConfig,
}

impl CompilerOptions {
    /// Defaults, with the switches that have environment variables read
    /// from the environment.
    pub fn from_env() -> Self {
        CompilerOptions {
            resolve: ResolveOptions::from_env(),
            ..CompilerOptions::default()
        }
    }

    #[must_use]
    pub fn with_error_limit(mut self, error_limit: usize) -> Self {
        self.diagnostics.error_limit = error_limit;
        self
    }
}
