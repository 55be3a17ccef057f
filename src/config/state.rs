// Application state module
// Immutable runtime state shared across connections

use std::path::PathBuf;

use super::types::Config;
use crate::logger;

/// Application state
///
/// Configuration is read-only after startup; the only thing computed here is
/// the canonical root directory every request path is resolved against.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    /// Create `AppState`, resolving the serving root to an absolute path.
    ///
    /// A missing or unreadable root directory is a startup error.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = PathBuf::from(&config.serving.root).canonicalize()?;
        if !root.is_dir() {
            logger::log_error(&format!(
                "Serving root is not a directory: {}",
                root.display()
            ));
            return Err(std::io::Error::other(format!(
                "not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { config, root })
    }
}
