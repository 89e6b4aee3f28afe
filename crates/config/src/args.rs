use std::path::PathBuf;

use clap::Args;

use crate::config::{CONFIG_ENV_VAR, SettingsOverrides};

#[derive(Args, Debug, Clone, Default)]
pub struct LauncherArgs {
    /// Optional path to a launcher settings file (TOML).
    #[arg(long, value_name = "PATH", env = CONFIG_ENV_VAR, help_heading = "Application")]
    pub config: Option<PathBuf>,

    /// Server executable to hand off to.
    #[arg(long, value_name = "PROGRAM", help_heading = "Application")]
    pub executable: Option<String>,

    /// Prefix marking environment keys that become server flags.
    #[arg(long, value_name = "PREFIX", help_heading = "Application")]
    pub key_prefix: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PreflightArgs {
    /// Directory scanned for candidate model files when the model path is wrong.
    #[arg(long, value_name = "DIR", help_heading = "Preflight")]
    pub models_dir: Option<PathBuf>,

    /// File extension of candidate model files.
    #[arg(long, value_name = "EXT", help_heading = "Preflight")]
    pub model_extension: Option<String>,

    /// Tool used to enumerate accelerator devices.
    #[arg(long, value_name = "PROGRAM", help_heading = "Preflight")]
    pub probe_program: Option<String>,

    /// Do not enumerate accelerator devices before launch.
    #[arg(long, help_heading = "Preflight")]
    pub skip_hardware_probe: bool,
}

pub fn build_settings_overrides(
    launcher: &LauncherArgs,
    preflight: &PreflightArgs,
) -> SettingsOverrides {
    SettingsOverrides {
        config_path: launcher.config.clone(),
        executable: launcher.executable.clone(),
        key_prefix: launcher.key_prefix.clone(),
        models_dir: preflight.models_dir.clone(),
        model_extension: preflight.model_extension.clone(),
        probe_program: preflight.probe_program.clone(),
        skip_hardware_probe: preflight.skip_hardware_probe,
    }
}
