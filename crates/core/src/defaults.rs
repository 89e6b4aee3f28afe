use tracing::{debug, warn};

use crate::{
    error::{LaunchError, Result},
    keys::{self, DEFAULTS},
    source::ParameterSource,
};

/// Returns a copy of `source` in which every well-known key has a value.
///
/// Explicit values are never replaced. The model path has no default: when it
/// is absent (or blank) resolution fails with [`LaunchError::MissingKey`], and
/// when it is set to a non-UTF-8 value with [`LaunchError::InvalidValue`].
/// Other prefixed keys that could not be decoded are reported and treated as
/// unset.
pub fn resolve(source: &ParameterSource, prefix: &str) -> Result<ParameterSource> {
    let model_key = keys::qualified(prefix, keys::MODEL);
    if source.is_invalid(&model_key) {
        return Err(LaunchError::InvalidValue { key: model_key });
    }
    for key in source.invalid_keys().filter(|key| key.starts_with(prefix)) {
        warn!(key = %key, "Ignoring configuration key with a non-UTF-8 key or value");
    }

    let mut resolved = source.clone();
    for (suffix, value) in DEFAULTS {
        let key = keys::qualified(prefix, suffix);
        if resolved.insert_if_absent(key.clone(), value) {
            debug!(key = %key, value, "Injected default");
        }
    }

    match resolved.get(&model_key) {
        Some(value) if !value.trim().is_empty() => Ok(resolved),
        _ => Err(LaunchError::MissingKey { key: model_key }),
    }
}
