//! Plugin directory resolution and candidate enumeration.

use crate::config::config_home;
use crate::error::WshError;
use crate::protocol::ENV_PLUGIN_DIR;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory to scan for plugins.
///
/// `WSH_PLUGIN_DIR` wins over the configured directory, which wins over
/// `<config dir>/wsh/plugins`.
pub fn resolve_plugin_dir(configured: Option<&Path>) -> PathBuf {
    plugin_dir_from(std::env::var_os(ENV_PLUGIN_DIR), configured)
}

fn plugin_dir_from(env_override: Option<OsString>, configured: Option<&Path>) -> PathBuf {
    if let Some(dir) = env_override.filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }
    default_plugin_dir()
}

/// `<config dir>/wsh/plugins`, or `./plugins` when no home directory is known.
pub fn default_plugin_dir() -> PathBuf {
    config_home()
        .map(|home| home.join("wsh").join("plugins"))
        .unwrap_or_else(|| PathBuf::from("plugins"))
}

/// Executable, non-hidden regular files directly inside `dir`, sorted by path.
///
/// A missing directory yields no candidates.
pub fn find_plugin_scripts(dir: &Path) -> Result<Vec<PathBuf>, WshError> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "plugin directory does not exist");
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(WshError::Config(format!(
            "Plugin path is not a directory: {}",
            dir.display()
        )));
    }

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        // Follows symlinks so a linked script counts as its target.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !metadata.is_file() || !is_executable(&metadata) {
            continue;
        }

        debug!(path = %path.display(), "plugin candidate");
        scripts.push(path);
    }

    scripts.sort();
    Ok(scripts)
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    true
}
