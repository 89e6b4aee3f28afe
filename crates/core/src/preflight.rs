use std::{
    ffi::OsStr,
    fs::{self, File},
    path::{Path, PathBuf},
};

use llama_launch_config::ModelSettings;
use tracing::{info, warn};

use crate::{error::LaunchError, probe::HardwareProbe, source::ParameterSource};

/// Outcome of a single preflight check.
#[derive(Debug)]
pub enum ValidationResult {
    Pass,
    /// Logged; the sequence continues.
    Warn(String),
    /// Halts the sequence.
    Fail(LaunchError),
}

impl ValidationResult {
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

/// Ordered environment checks run before the server is started.
pub struct Preflight<'a, P: HardwareProbe + ?Sized> {
    probe: Option<&'a P>,
    models: &'a ModelSettings,
    model_key: String,
}

impl<'a, P: HardwareProbe + ?Sized> Preflight<'a, P> {
    /// `probe` of `None` records the hardware check as passed without running it.
    pub fn new(probe: Option<&'a P>, models: &'a ModelSettings, model_key: String) -> Self {
        Self {
            probe,
            models,
            model_key,
        }
    }

    /// Runs the hardware check, then the model file check. Only the model
    /// file check can fail.
    pub fn validate(&self, source: &ParameterSource) -> Vec<ValidationResult> {
        let mut results = Vec::with_capacity(2);

        let hardware = match self.probe {
            Some(probe) => check_hardware(probe),
            None => {
                info!("Hardware probe disabled");
                ValidationResult::Pass
            }
        };
        results.push(hardware);

        results.push(check_model_file(source, &self.model_key, self.models));
        results
    }
}

pub fn check_hardware<P: HardwareProbe + ?Sized>(probe: &P) -> ValidationResult {
    match probe.devices() {
        Ok(devices) if devices.is_empty() => {
            info!("Hardware probe reported no accelerator devices");
            ValidationResult::Pass
        }
        Ok(devices) => {
            for device in &devices {
                info!(
                    index = device.index,
                    name = %device.name,
                    memory = %device.memory,
                    "Detected accelerator"
                );
            }
            ValidationResult::Pass
        }
        Err(err) => {
            let message = format!("{err}; continuing without device information");
            warn!("{message}");
            ValidationResult::Warn(message)
        }
    }
}

pub fn check_model_file(
    source: &ParameterSource,
    model_key: &str,
    models: &ModelSettings,
) -> ValidationResult {
    let Some(raw) = source.get(model_key) else {
        return ValidationResult::Fail(LaunchError::MissingKey {
            key: model_key.to_string(),
        });
    };
    let path = PathBuf::from(raw);
    if is_readable_file(&path) {
        info!(path = %path.display(), "Model file found");
        return ValidationResult::Pass;
    }

    let candidates = find_candidates(&models.search_root, &models.extension);
    ValidationResult::Fail(LaunchError::ResourceNotFound {
        path,
        search_root: models.search_root.clone(),
        extension: models.extension.clone(),
        candidates,
    })
}

fn is_readable_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file()) && File::open(path).is_ok()
}

/// Lists files under `root` (recursively, without following directory
/// symlinks) whose extension matches `extension`, sorted. Unreadable
/// directories are skipped, so an inaccessible root yields an empty list.
pub fn find_candidates(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_candidates(root, extension, &mut found);
    found.sort();
    found
}

fn collect_candidates(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if file_type.is_dir() {
            collect_candidates(&path, extension, found);
        } else if has_extension(&path, extension) {
            found.push(path);
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
