use std::fmt;

use crate::source::ParameterSource;

/// Value that turns a key into a bare switch.
pub const TRUE_LITERAL: &str = "true";
/// Value that drops a key from the argument vector.
pub const FALSE_LITERAL: &str = "false";

/// Ordered argument tokens handed to the server executable (program name
/// excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentTokens(Vec<String>);

impl ArgumentTokens {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Position of `flag` in the token sequence, if emitted.
    pub fn position(&self, flag: &str) -> Option<usize> {
        self.0.iter().position(|token| token == flag)
    }
}

impl Extend<String> for ArgumentTokens {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ArgumentTokens {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArgumentTokens {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ArgumentTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Derives the flag for a prefixed key: `LLAMA_ARG_CTX_SIZE` -> `--ctx-size`.
///
/// Returns `None` for keys without the prefix and for the bare prefix itself.
pub fn flag_name(key: &str, prefix: &str) -> Option<String> {
    let name = key.strip_prefix(prefix)?;
    if name.is_empty() {
        return None;
    }
    Some(format!("--{}", name.to_lowercase().replace('_', "-")))
}

/// Expands one flag/value pair according to the boolean literal rule.
pub fn expand(flag: String, value: &str) -> Vec<String> {
    match value {
        TRUE_LITERAL => vec![flag],
        FALSE_LITERAL => Vec::new(),
        other => vec![flag, other.to_string()],
    }
}

/// Compiles every prefixed key of `source` into argument tokens, in key order.
pub fn compile(source: &ParameterSource, prefix: &str) -> ArgumentTokens {
    let tokens = source
        .iter()
        .filter_map(|(key, value)| flag_name(key, prefix).map(|flag| expand(flag, value)))
        .flatten()
        .collect();
    ArgumentTokens(tokens)
}
