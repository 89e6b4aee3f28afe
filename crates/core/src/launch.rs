use std::{convert::Infallible, path::Path, process::Command};

use tracing::info;

use crate::{
    compile::{ArgumentTokens, FALSE_LITERAL, TRUE_LITERAL},
    error::{LaunchError, Result},
    keys,
    sequence::LaunchStage,
    source::ParameterSource,
};

/// Key settings echoed before hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSummary {
    pub host: String,
    pub port: String,
    pub ctx_size: String,
    pub flash_attn: String,
    pub gpu_layers: String,
    pub tensor_split: Option<String>,
}

impl LaunchSummary {
    pub fn from_source(source: &ParameterSource, prefix: &str) -> Self {
        let value = |suffix: &str| {
            source
                .get(&keys::qualified(prefix, suffix))
                .unwrap_or("unset")
                .to_string()
        };
        let flash_attn = match source.get(&keys::qualified(prefix, keys::FLASH_ATTN)) {
            Some(TRUE_LITERAL) => "enabled".to_string(),
            Some(FALSE_LITERAL) | None => "disabled".to_string(),
            Some(other) => other.to_string(),
        };
        Self {
            host: value(keys::HOST),
            port: value(keys::PORT),
            ctx_size: value(keys::CTX_SIZE),
            flash_attn,
            gpu_layers: value(keys::N_GPU_LAYERS),
            tensor_split: source
                .get(&keys::qualified(prefix, keys::TENSOR_SPLIT))
                .map(str::to_string),
        }
    }

    pub fn log(&self) {
        info!(
            host = %self.host,
            port = %self.port,
            ctx_size = %self.ctx_size,
            flash_attn = %self.flash_attn,
            gpu_layers = %self.gpu_layers,
            "Server settings"
        );
        if let Some(split) = self.tensor_split.as_deref() {
            info!(tensor_split = %split, "Tensor split across devices");
        }
    }
}

/// Fully validated invocation, ready to replace the current process.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    executable: String,
    args: ArgumentTokens,
    summary: LaunchSummary,
}

impl LaunchPlan {
    pub fn new(executable: impl Into<String>, args: ArgumentTokens, summary: LaunchSummary) -> Self {
        Self {
            executable: executable.into(),
            args,
            summary,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &ArgumentTokens {
        &self.args
    }

    pub fn summary(&self) -> &LaunchSummary {
        &self.summary
    }

    /// Program name followed by the argument tokens.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.executable.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Replaces the current process with the server. Only returns on failure.
    pub fn launch(self) -> Result<Infallible> {
        let program =
            which::which(&self.executable).map_err(|source| LaunchError::ExecutableNotFound {
                executable: self.executable.clone(),
                source,
            })?;

        self.summary.log();
        info!(
            stage = ?LaunchStage::Launched,
            program = %program.display(),
            argv = %self.argv().join(" "),
            "Handing off to server"
        );
        replace_process(&program, &self.executable, self.args.as_slice())
    }
}

#[cfg(unix)]
fn replace_process(program: &Path, arg0: &str, args: &[String]) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    let source = Command::new(program).arg0(arg0).args(args).exec();
    Err(LaunchError::Exec {
        executable: program.to_path_buf(),
        source,
    })
}

// Without exec the server runs as a child. Console interrupts reach the whole
// process group, so the child sees them directly; its exit code becomes ours.
#[cfg(not(unix))]
fn replace_process(program: &Path, _arg0: &str, args: &[String]) -> Result<Infallible> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| LaunchError::Exec {
            executable: program.to_path_buf(),
            source,
        })?;
    std::process::exit(status.code().unwrap_or(1))
}
