//! Resolver configuration.

/// Environment variable that enables the dependency graph dump.
pub const DUMP_GRAPH_ENV: &str = "SHADE_DUMP_DEPENDENCY_GRAPH";

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ResolveOptions {
    /// Emit the declaration order and dependency lists through `tracing`
    /// (target `shade_resolve::dump`, level `debug`).
    pub dump_graph: bool,
}

impl ResolveOptions {
    /// Options from the environment: the dump is enabled when
    /// `SHADE_DUMP_DEPENDENCY_GRAPH` is set to anything but `0` or the empty string.
    pub fn from_env() -> Self {
        ResolveOptions {
            dump_graph: flag_enabled(std::env::var(DUMP_GRAPH_ENV).ok().as_deref()),
        }
    }
}

fn flag_enabled(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if !v.is_empty() && v != "0")
}
