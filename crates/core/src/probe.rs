use std::{fmt, io, process::Command};

use llama_launch_config::ProbeSettings;
use thiserror::Error;

/// One accelerator as reported by the hardware probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuDevice {
    pub index: u32,
    pub name: String,
    pub memory: String,
}

impl fmt::Display for GpuDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPU {}: {} ({})", self.index, self.name, self.memory)
    }
}

/// Non-fatal failures of hardware enumeration.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("hardware probe `{program}` could not be run: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("hardware probe `{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("hardware probe `{program}` produced an unrecognised line: `{line}`")]
    Malformed { program: String, line: String },
}

pub trait HardwareProbe {
    fn devices(&self) -> Result<Vec<GpuDevice>, ProbeError>;
}

impl<P: HardwareProbe + ?Sized> HardwareProbe for &P {
    fn devices(&self) -> Result<Vec<GpuDevice>, ProbeError> {
        (**self).devices()
    }
}

/// Enumerates devices by running an external tool such as `nvidia-smi` in
/// CSV mode (`index, name, memory` per line).
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &ProbeSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }
}

impl HardwareProbe for CommandProbe {
    fn devices(&self) -> Result<Vec<GpuDevice>, ProbeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| ProbeError::Unavailable {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_device_listing(&self.program, &String::from_utf8_lossy(&output.stdout))
    }
}

pub fn parse_device_listing(program: &str, listing: &str) -> Result<Vec<GpuDevice>, ProbeError> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            parse_device_line(line).ok_or_else(|| ProbeError::Malformed {
                program: program.to_string(),
                line: line.to_string(),
            })
        })
        .collect()
}

fn parse_device_line(line: &str) -> Option<GpuDevice> {
    // Device names may contain commas; index is first and memory last.
    let (index, rest) = line.split_once(',')?;
    let (name, memory) = rest.rsplit_once(',')?;
    let name = name.trim();
    let memory = memory.trim();
    if name.is_empty() || memory.is_empty() {
        return None;
    }
    Some(GpuDevice {
        index: index.trim().parse().ok()?,
        name: name.to_string(),
        memory: memory.to_string(),
    })
}
