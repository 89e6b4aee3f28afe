use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal conditions that stop the launch sequence.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("required configuration key `{key}` is not set")]
    MissingKey { key: String },

    #[error("configuration key `{key}` is set but its value is not valid UTF-8")]
    InvalidValue { key: String },

    #[error(
        "model file {} is missing or not a readable file; {}",
        .path.display(),
        describe_candidates(.search_root, .extension, .candidates)
    )]
    ResourceNotFound {
        path: PathBuf,
        search_root: PathBuf,
        extension: String,
        candidates: Vec<PathBuf>,
    },

    #[error("executable `{executable}` not found: {source}")]
    ExecutableNotFound {
        executable: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to start {}: {source}", .executable.display())]
    Exec {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_candidates(search_root: &Path, extension: &str, candidates: &[PathBuf]) -> String {
    if candidates.is_empty() {
        return format!("no .{extension} files found under {}", search_root.display());
    }
    let listing = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        ".{extension} files under {}: {listing}",
        search_root.display()
    )
}

pub type Result<T> = std::result::Result<T, LaunchError>;
