use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXECUTABLE: &str = "llama-server";
pub const DEFAULT_KEY_PREFIX: &str = "LLAMA_ARG_";
pub const DEFAULT_MODELS_DIR: &str = "/models";
pub const DEFAULT_MODEL_EXTENSION: &str = "gguf";
pub const DEFAULT_PROBE_PROGRAM: &str = "nvidia-smi";

/// Environment variable consulted for the settings file path when `--config`
/// is not given.
pub const CONFIG_ENV_VAR: &str = "LLAMA_LAUNCH_CONFIG";

/// Overrides the log filter, e.g. `LLAMA_LAUNCH_LOG=debug`.
pub const LOG_ENV_VAR: &str = "LLAMA_LAUNCH_LOG";

/// Variables read by the launcher itself; no key prefix may cover them.
pub const RESERVED_ENV_VARS: [&str; 2] = [CONFIG_ENV_VAR, LOG_ENV_VAR];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Program handed the compiled argument vector.
    pub executable: String,
    /// Environment keys carrying this prefix become server flags.
    pub key_prefix: String,
    pub models: ModelSettings,
    pub probe: ProbeSettings,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            models: ModelSettings::default(),
            probe: ProbeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Mounted directory scanned for candidates when the model path is wrong.
    pub search_root: PathBuf,
    /// Extension (without the dot) that marks a candidate model file.
    pub extension: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            search_root: PathBuf::from(DEFAULT_MODELS_DIR),
            extension: DEFAULT_MODEL_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_PROBE_PROGRAM.to_string(),
            args: vec![
                "--query-gpu=index,name,memory.total".to_string(),
                "--format=csv,noheader".to_string(),
            ],
        }
    }
}

/// Where the effective settings came from.
#[derive(Debug, Clone, Default)]
pub struct SettingsDescriptor {
    pub location: Option<PathBuf>,
}

impl SettingsDescriptor {
    pub fn describe(&self) -> String {
        match &self.location {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        }
    }
}

impl LauncherSettings {
    /// Loads settings from `path` when given, otherwise starts from the
    /// built-in defaults. An explicitly named file that does not exist is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<(Self, SettingsDescriptor)> {
        let Some(path) = path else {
            return Ok((Self::default(), SettingsDescriptor::default()));
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read launcher settings from {}", path.display()))?;
        let settings = Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse launcher settings at {}", path.display()))?;
        Ok((
            settings,
            SettingsDescriptor {
                location: Some(path.to_path_buf()),
            },
        ))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        Ok(settings)
    }

    pub fn load_with_overrides(
        overrides: &SettingsOverrides,
    ) -> Result<(Self, SettingsDescriptor)> {
        let (mut settings, descriptor) = Self::load(overrides.config_path.as_deref())?;
        settings.apply_overrides(overrides);
        settings.normalise()?;
        Ok((settings, descriptor))
    }

    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(executable) = overrides.executable.as_ref() {
            self.executable = executable.clone();
        }
        if let Some(prefix) = overrides.key_prefix.as_ref() {
            self.key_prefix = prefix.clone();
        }
        if let Some(dir) = overrides.models_dir.as_ref() {
            self.models.search_root = dir.clone();
        }
        if let Some(extension) = overrides.model_extension.as_ref() {
            self.models.extension = extension.clone();
        }
        if let Some(program) = overrides.probe_program.as_ref() {
            self.probe.program = program.clone();
        }
        if overrides.skip_hardware_probe {
            self.probe.enabled = false;
        }
    }

    pub fn normalise(&mut self) -> Result<()> {
        self.executable = self.executable.trim().to_string();
        ensure!(!self.executable.is_empty(), "executable must not be empty");
        // An empty prefix would turn every environment variable into a flag.
        ensure!(!self.key_prefix.is_empty(), "key prefix must not be empty");
        if let Some(reserved) = RESERVED_ENV_VARS
            .iter()
            .find(|name| name.starts_with(self.key_prefix.as_str()))
        {
            bail!(
                "key prefix `{}` would turn the launcher's own `{reserved}` into a server flag",
                self.key_prefix
            );
        }
        self.models.extension = self
            .models
            .extension
            .trim()
            .trim_start_matches('.')
            .to_string();
        ensure!(
            !self.models.extension.is_empty(),
            "model extension must not be empty"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub executable: Option<String>,
    pub key_prefix: Option<String>,
    pub models_dir: Option<PathBuf>,
    pub model_extension: Option<String>,
    pub probe_program: Option<String>,
    pub skip_hardware_probe: bool,
}
