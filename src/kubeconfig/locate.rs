// src/kubeconfig/locate.rs
use std::env;
use std::path::PathBuf;

use crate::types::IssueError;

/// Resolves the conventional kubeconfig location: `$KUBECONFIG` when set and
/// non-empty, else `~/.kube/config`.
pub fn locate_default() -> Result<PathBuf, IssueError> {
    if let Ok(path) = env::var("KUBECONFIG") {
        if !path.is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .ok_or_else(|| {
            IssueError::Validation(
                "cannot resolve a home directory for the default kubeconfig".to_string(),
            )
        })
}
