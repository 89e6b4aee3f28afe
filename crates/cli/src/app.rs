use std::io::{self, Write};

use anyhow::{Context, Result};
use llama_launch_config::{LauncherSettings, SettingsOverrides};
use llama_launch_core::{CommandProbe, LaunchPlan, LaunchSequence, ParameterSource};
use tracing::info;

use crate::args::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let overrides = SettingsOverrides::from(&cli);
    let (settings, descriptor) = LauncherSettings::load_with_overrides(&overrides)?;
    info!(
        "Using launcher settings from {} (executable `{}`, key prefix `{}`)",
        descriptor.describe(),
        settings.executable,
        settings.key_prefix
    );

    let source = ParameterSource::from_env();
    let probe = CommandProbe::from_settings(&settings.probe);
    let plan = LaunchSequence::new(&settings, probe)
        .with_extra_args(cli.extra)
        .prepare(&source)?;

    if cli.dry_run {
        return print_plan(&plan);
    }

    match plan.launch()? {}
}

fn print_plan(plan: &LaunchPlan) -> Result<()> {
    plan.summary().log();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for token in plan.argv() {
        writeln!(out, "{token}").context("failed to write argument vector")?;
    }
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
