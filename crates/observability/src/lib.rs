//! Process-wide tracing setup shared by the binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}

/// Like [`init`], with a caller-chosen fallback directive when `RUST_LOG` is unset.
pub fn init_with_default(directive: &str) {
    tracing::init(directive);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
