mod common;

use common::{PREFIX, source};
use llama_launch_core::{LaunchError, defaults::resolve, keys};

#[test]
fn injects_every_default_for_unset_keys() {
    let input = source(&[("LLAMA_ARG_MODEL", "/models/m.gguf")]);
    let resolved = resolve(&input, PREFIX).expect("resolve");

    let expected = [
        ("LLAMA_ARG_HOST", "0.0.0.0"),
        ("LLAMA_ARG_PORT", "8080"),
        ("LLAMA_ARG_CTX_SIZE", "81920"),
        ("LLAMA_ARG_BATCH_SIZE", "2048"),
        ("LLAMA_ARG_UBATCH_SIZE", "512"),
        ("LLAMA_ARG_N_GPU_LAYERS", "-1"),
        ("LLAMA_ARG_FLASH_ATTN", "true"),
        ("LLAMA_ARG_NO_MMAP", "true"),
        ("LLAMA_ARG_MLOCK", "true"),
        ("LLAMA_ARG_THREADS", "16"),
        ("LLAMA_ARG_THREADS_BATCH", "16"),
        ("LLAMA_ARG_PARALLEL", "4"),
        ("LLAMA_ARG_CONT_BATCHING", "true"),
        ("LLAMA_ARG_N_PREDICT", "-1"),
    ];
    for (key, value) in expected {
        assert_eq!(resolved.get(key), Some(value), "default for {key}");
    }
    assert_eq!(resolved.len(), keys::DEFAULTS.len() + 1);
}

#[test]
fn explicit_values_are_never_overwritten() {
    let input = source(&[
        ("LLAMA_ARG_MODEL", "/models/m.gguf"),
        ("LLAMA_ARG_CTX_SIZE", "4096"),
        ("LLAMA_ARG_FLASH_ATTN", "false"),
    ]);
    let resolved = resolve(&input, PREFIX).expect("resolve");

    assert_eq!(resolved.get("LLAMA_ARG_CTX_SIZE"), Some("4096"));
    assert_eq!(resolved.get("LLAMA_ARG_FLASH_ATTN"), Some("false"));
}

#[test]
fn caller_source_is_left_untouched() {
    let input = source(&[("LLAMA_ARG_MODEL", "/models/m.gguf")]);
    let before = input.clone();
    let _ = resolve(&input, PREFIX).expect("resolve");
    assert_eq!(input, before);
}

#[test]
fn missing_model_key_names_the_key() {
    let err = resolve(&source(&[("LLAMA_ARG_PORT", "9000")]), PREFIX).expect_err("must fail");
    match &err {
        LaunchError::MissingKey { key } => assert_eq!(key, "LLAMA_ARG_MODEL"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("LLAMA_ARG_MODEL"));
}

#[test]
fn blank_model_value_counts_as_missing() {
    let err = resolve(&source(&[("LLAMA_ARG_MODEL", "  ")]), PREFIX).expect_err("must fail");
    assert!(matches!(err, LaunchError::MissingKey { .. }));
}

#[test]
fn values_are_not_content_validated() {
    let input = source(&[
        ("LLAMA_ARG_MODEL", "/models/m.gguf"),
        ("LLAMA_ARG_PORT", "not-a-port"),
    ]);
    let resolved = resolve(&input, PREFIX).expect("resolve");
    assert_eq!(resolved.get("LLAMA_ARG_PORT"), Some("not-a-port"));
}

#[cfg(unix)]
mod non_utf8 {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    use super::*;
    use llama_launch_core::ParameterSource;

    fn os(value: &str) -> OsString {
        OsString::from(value)
    }

    fn garbled(bytes: &[u8]) -> OsString {
        OsString::from_vec(bytes.to_vec())
    }

    #[test]
    fn undecodable_model_value_is_not_reported_as_missing() {
        let input = ParameterSource::from_os_vars([
            (os("LLAMA_ARG_MODEL"), garbled(b"/models/q\xffwen.gguf")),
            (os("LLAMA_ARG_PORT"), os("9000")),
        ]);
        assert!(input.is_invalid("LLAMA_ARG_MODEL"));
        assert_eq!(input.get("LLAMA_ARG_MODEL"), None);

        let err = resolve(&input, PREFIX).expect_err("must fail");
        match &err {
            LaunchError::InvalidValue { key } => assert_eq!(key, "LLAMA_ARG_MODEL"),
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert!(message.contains("LLAMA_ARG_MODEL"), "{message}");
        assert!(message.contains("UTF-8"), "{message}");
    }

    #[test]
    fn undecodable_optional_value_falls_back_to_default() {
        let input = ParameterSource::from_os_vars([
            (os("LLAMA_ARG_MODEL"), os("/models/m.gguf")),
            (os("LLAMA_ARG_HOST"), garbled(b"0.0.0.\xfe")),
            (garbled(b"LLAMA_ARG_\xffALIAS"), os("qwen3")),
        ]);
        assert_eq!(input.invalid_keys().count(), 2);

        let resolved = resolve(&input, PREFIX).expect("resolve");
        assert_eq!(resolved.get("LLAMA_ARG_HOST"), Some("0.0.0.0"));
        assert_eq!(resolved.get("LLAMA_ARG_MODEL"), Some("/models/m.gguf"));
    }
}
