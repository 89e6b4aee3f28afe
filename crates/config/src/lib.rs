pub mod args;
pub mod config;

pub use args::{LauncherArgs, PreflightArgs, build_settings_overrides};
pub use config::{
    CONFIG_ENV_VAR, DEFAULT_EXECUTABLE, DEFAULT_KEY_PREFIX, DEFAULT_MODEL_EXTENSION,
    DEFAULT_MODELS_DIR, DEFAULT_PROBE_PROGRAM, LOG_ENV_VAR, LauncherSettings, ModelSettings,
    ProbeSettings, RESERVED_ENV_VARS, SettingsDescriptor, SettingsOverrides,
};
