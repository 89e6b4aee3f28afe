use llama_launch_config::LauncherSettings;
use tracing::{debug, warn};

use crate::{
    compile::compile,
    defaults,
    error::Result,
    keys,
    launch::{LaunchPlan, LaunchSummary},
    preflight::{Preflight, ValidationResult},
    probe::HardwareProbe,
    source::ParameterSource,
};

/// Progress of one launch. Failures leave the sequence through `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStage {
    Start,
    DefaultsResolved,
    Validated,
    Compiled,
    Launched,
}

/// Runs default resolution, preflight checks and argument compilation.
pub struct LaunchSequence<'a, P: HardwareProbe> {
    settings: &'a LauncherSettings,
    probe: P,
    extra_args: Vec<String>,
}

impl<'a, P: HardwareProbe> LaunchSequence<'a, P> {
    pub fn new(settings: &'a LauncherSettings, probe: P) -> Self {
        Self {
            settings,
            probe,
            extra_args: Vec::new(),
        }
    }

    /// Arguments appended verbatim after the compiled flags.
    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    /// Drives the sequence up to [`LaunchStage::Compiled`]. The returned plan
    /// performs the final hand-off.
    pub fn prepare(&self, source: &ParameterSource) -> Result<LaunchPlan> {
        let prefix = self.settings.key_prefix.as_str();
        debug!(stage = ?LaunchStage::Start, entries = source.len(), "Launch sequence started");

        let resolved = defaults::resolve(source, prefix)?;
        debug!(stage = ?LaunchStage::DefaultsResolved, "Defaults resolved");

        let probe = self.settings.probe.enabled.then_some(&self.probe);
        let preflight = Preflight::new(
            probe,
            &self.settings.models,
            keys::qualified(prefix, keys::MODEL),
        );
        let mut warnings = 0usize;
        for result in preflight.validate(&resolved) {
            match result {
                ValidationResult::Pass => {}
                ValidationResult::Warn(message) => {
                    warnings += 1;
                    debug!(%message, "Preflight warning recorded");
                }
                ValidationResult::Fail(err) => return Err(err),
            }
        }
        debug!(stage = ?LaunchStage::Validated, warnings, "Preflight checks passed");

        let mut args = compile(&resolved, prefix);
        args.extend(self.extra_args.iter().cloned());
        debug!(stage = ?LaunchStage::Compiled, tokens = args.len(), "Arguments compiled");

        if warnings > 0 {
            warn!(warnings, "Launching despite preflight warnings");
        }

        Ok(LaunchPlan::new(
            self.settings.executable.clone(),
            args,
            LaunchSummary::from_source(&resolved, prefix),
        ))
    }
}
