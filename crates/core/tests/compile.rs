mod common;

use common::{PREFIX, source};
use llama_launch_core::{compile, flag_name};

#[test]
fn flag_name_strips_prefix_lowercases_and_hyphenates() {
    assert_eq!(
        flag_name("LLAMA_ARG_CTX_SIZE", PREFIX).as_deref(),
        Some("--ctx-size")
    );
    assert_eq!(
        flag_name("LLAMA_ARG_N_GPU_LAYERS", PREFIX).as_deref(),
        Some("--n-gpu-layers")
    );
    assert_eq!(flag_name("LLAMA_ARG_", PREFIX), None);
    assert_eq!(flag_name("PATH", PREFIX), None);
    assert_eq!(flag_name("llama_arg_port", PREFIX), None);
}

#[test]
fn true_literal_emits_switch_without_value() {
    let tokens = compile(&source(&[("LLAMA_ARG_FLASH_ATTN", "true")]), PREFIX);
    assert_eq!(tokens.as_slice(), ["--flash-attn"]);
}

#[test]
fn false_literal_emits_nothing() {
    let tokens = compile(
        &source(&[("LLAMA_ARG_MLOCK", "false"), ("LLAMA_ARG_PORT", "9000")]),
        PREFIX,
    );
    assert_eq!(tokens.as_slice(), ["--port", "9000"]);
    assert_eq!(tokens.position("--mlock"), None);
}

#[test]
fn other_values_pass_through_unmodified() {
    let tokens = compile(
        &source(&[
            ("LLAMA_ARG_TENSOR_SPLIT", "0.5,0.5"),
            ("LLAMA_ARG_ALIAS", "qwen3 235b"),
            ("LLAMA_ARG_CACHE_TYPE_K", "TRUE"),
            ("LLAMA_ARG_N_PREDICT", "-1"),
        ]),
        PREFIX,
    );
    assert_eq!(
        tokens.as_slice(),
        [
            "--alias",
            "qwen3 235b",
            "--cache-type-k",
            "TRUE",
            "--n-predict",
            "-1",
            "--tensor-split",
            "0.5,0.5",
        ]
    );
}

#[test]
fn keys_without_prefix_are_ignored() {
    let tokens = compile(
        &source(&[
            ("HOME", "/root"),
            ("ARG_PORT", "1"),
            ("LLAMA_ARG_PORT", "8080"),
        ]),
        PREFIX,
    );
    assert_eq!(tokens.as_slice(), ["--port", "8080"]);
}

#[test]
fn custom_prefix_selects_different_keys() {
    let tokens = compile(
        &source(&[("SRV_THREADS", "8"), ("LLAMA_ARG_THREADS", "16")]),
        "SRV_",
    );
    assert_eq!(tokens.as_slice(), ["--threads", "8"]);
}

#[test]
fn compiling_twice_is_identical_and_sorted_by_key() {
    let input = source(&[
        ("LLAMA_ARG_PARALLEL", "4"),
        ("LLAMA_ARG_CONT_BATCHING", "true"),
        ("LLAMA_ARG_BATCH_SIZE", "2048"),
    ]);
    let first = compile(&input, PREFIX);
    let second = compile(&input, PREFIX);

    assert_eq!(first, second);
    assert_eq!(
        first.to_string(),
        "--batch-size 2048 --cont-batching --parallel 4"
    );
}
