use clap::Parser;
use llama_launch_config::{
    LauncherArgs, PreflightArgs, SettingsOverrides, build_settings_overrides,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Start llama-server from LLAMA_ARG_* environment variables",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub launcher: LauncherArgs,

    #[command(flatten)]
    pub preflight: PreflightArgs,

    /// Print the final argument vector, one token per line, instead of starting the server.
    #[arg(long, help_heading = "Application")]
    pub dry_run: bool,

    /// Quiet mode - only log warnings and errors.
    #[arg(short, long, help_heading = "Application")]
    pub quiet: bool,

    /// Extra arguments appended verbatim after the compiled flags.
    #[arg(last = true, value_name = "ARGS")]
    pub extra: Vec<String>,
}

impl From<&Cli> for SettingsOverrides {
    fn from(cli: &Cli) -> Self {
        build_settings_overrides(&cli.launcher, &cli.preflight)
    }
}
