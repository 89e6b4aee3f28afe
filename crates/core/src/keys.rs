//! Well-known configuration keys, named by their suffix after the key prefix.

pub const MODEL: &str = "MODEL";

pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const CTX_SIZE: &str = "CTX_SIZE";
pub const BATCH_SIZE: &str = "BATCH_SIZE";
pub const UBATCH_SIZE: &str = "UBATCH_SIZE";
pub const N_GPU_LAYERS: &str = "N_GPU_LAYERS";
pub const FLASH_ATTN: &str = "FLASH_ATTN";
pub const NO_MMAP: &str = "NO_MMAP";
pub const MLOCK: &str = "MLOCK";
pub const THREADS: &str = "THREADS";
pub const THREADS_BATCH: &str = "THREADS_BATCH";
pub const PARALLEL: &str = "PARALLEL";
pub const CONT_BATCHING: &str = "CONT_BATCHING";
pub const N_PREDICT: &str = "N_PREDICT";

/// Only reported in the launch summary; never defaulted.
pub const TENSOR_SPLIT: &str = "TENSOR_SPLIT";

/// Built-in values injected for unset keys. `-1` means "all layers" for
/// `N_GPU_LAYERS` and "unlimited" for `N_PREDICT`.
pub const DEFAULTS: &[(&str, &str)] = &[
    (HOST, "0.0.0.0"),
    (PORT, "8080"),
    (CTX_SIZE, "81920"),
    (BATCH_SIZE, "2048"),
    (UBATCH_SIZE, "512"),
    (N_GPU_LAYERS, "-1"),
    (FLASH_ATTN, "true"),
    (NO_MMAP, "true"),
    (MLOCK, "true"),
    (THREADS, "16"),
    (THREADS_BATCH, "16"),
    (PARALLEL, "4"),
    (CONT_BATCHING, "true"),
    (N_PREDICT, "-1"),
];

pub fn qualified(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{suffix}")
}
