#![allow(dead_code)]

use std::{cell::Cell, io, path::Path};

use llama_launch_core::{GpuDevice, HardwareProbe, ParameterSource, ProbeError};

pub const PREFIX: &str = "LLAMA_ARG_";

pub fn source(entries: &[(&str, &str)]) -> ParameterSource {
    entries.iter().copied().collect()
}

pub fn with_model(model: &Path, entries: &[(&str, &str)]) -> ParameterSource {
    let model = model.to_str().expect("utf-8 model path");
    std::iter::once(("LLAMA_ARG_MODEL", model))
        .chain(entries.iter().copied())
        .collect()
}

/// Probe returning canned devices, or failing like a missing tool.
pub struct FakeProbe {
    devices: Option<Vec<GpuDevice>>,
    pub calls: Cell<usize>,
}

impl FakeProbe {
    pub fn with_devices(devices: Vec<GpuDevice>) -> Self {
        Self {
            devices: Some(devices),
            calls: Cell::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            devices: None,
            calls: Cell::new(0),
        }
    }
}

impl HardwareProbe for FakeProbe {
    fn devices(&self) -> Result<Vec<GpuDevice>, ProbeError> {
        self.calls.set(self.calls.get() + 1);
        self.devices.clone().ok_or_else(|| ProbeError::Unavailable {
            program: "fake-smi".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }
}

pub fn a100() -> GpuDevice {
    GpuDevice {
        index: 0,
        name: "NVIDIA A100-SXM4-80GB".to_string(),
        memory: "81920 MiB".to_string(),
    }
}
