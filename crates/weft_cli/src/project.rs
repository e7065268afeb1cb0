//! Locating the fabric description.

use std::path::{Path, PathBuf};

use weft_config::CONFIG_FILE_NAME;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing
/// `weft.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Returns the config file to load and the directory relative paths in it
/// are resolved against.
///
/// `--config` may name the file or its directory; without it the current
/// directory and its parents are searched.
pub fn resolve_config(global: &GlobalArgs) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
    let root = match &global.config {
        Some(config_path) => {
            let path = PathBuf::from(config_path);
            if path.is_file() {
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                return Ok((path, root));
            }
            path
        }
        None => find_project_root(&std::env::current_dir()?)?,
    };
    Ok((root.join(CONFIG_FILE_NAME), root))
}
