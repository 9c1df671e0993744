//! Config file discovery.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::ConfigLayer;

/// File name looked up in the system and current directories.
pub const CONFIG_FILE_NAME: &str = "slackcat.conf";

/// Hidden file name looked up in the home directory.
pub const HOME_CONFIG_FILE_NAME: &str = ".slackcat.conf";

/// System-wide config directory.
const SYSTEM_CONFIG_DIR: &str = "/etc";

/// Standard candidate paths, lowest to highest specificity.
///
/// The home entry is omitted when no home directory can be determined.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![Path::new(SYSTEM_CONFIG_DIR).join(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(HOME_CONFIG_FILE_NAME));
    }
    candidates.push(Path::new(".").join(CONFIG_FILE_NAME));
    candidates
}

/// Parse the first candidate that exists.
///
/// A missing file moves on to the next candidate. A file that exists but
/// cannot be read or parsed aborts the search; later candidates are never
/// consulted as a fallback.
pub fn load_first_existing(
    candidates: &[PathBuf],
) -> Result<Option<(PathBuf, ConfigLayer)>, ConfigError> {
    for path in candidates {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, trying next");
                continue;
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        let layer = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded config file");
        return Ok(Some((path.clone(), layer)));
    }

    Ok(None)
}
