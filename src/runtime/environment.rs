//! Child process environment derivation
//!
//! Children run with a copy of the harness environment, adjusted so that
//! binaries colocated with the harness can find their shared libraries. The
//! harness's own environment is never mutated.

use std::collections::HashMap;

/// Snapshot of the harness environment, used as the base for children.
pub fn current() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Derive a child environment from `base`.
///
/// On POSIX platforms the current directory is appended to `LD_LIBRARY_PATH`
/// (created if absent). No other entry is touched; on other platforms this is
/// a plain copy.
pub fn build(base: &HashMap<String, String>) -> HashMap<String, String> {
    let mut env = base.clone();
    if cfg!(unix) {
        let mut search_path = env.get("LD_LIBRARY_PATH").cloned().unwrap_or_default();
        if !search_path.is_empty() {
            search_path.push(':');
        }
        search_path.push('.');
        env.insert("LD_LIBRARY_PATH".to_string(), search_path);
    }
    env
}
