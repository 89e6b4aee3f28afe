pub mod compile;
pub mod defaults;
pub mod error;
pub mod keys;
pub mod launch;
pub mod preflight;
pub mod probe;
pub mod sequence;
pub mod source;

pub use compile::{ArgumentTokens, FALSE_LITERAL, TRUE_LITERAL, compile, flag_name};
pub use error::{LaunchError, Result};
pub use launch::{LaunchPlan, LaunchSummary};
pub use preflight::{Preflight, ValidationResult, find_candidates};
pub use probe::{CommandProbe, GpuDevice, HardwareProbe, ProbeError, parse_device_listing};
pub use sequence::{LaunchSequence, LaunchStage};
pub use source::ParameterSource;
