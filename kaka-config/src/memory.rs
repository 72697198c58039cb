//! Memory budgets: the per-request arena and the render buffer.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{self, Validate};

/// Request arena sizing.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Bytes available to one request before allocation fails.
    #[validate(range(min = 1024, max = 67108864))]
    #[serde(default = "default_arena_capacity", deserialize_with = "deserialize_size")]
    pub capacity: usize,
}

fn default_arena_capacity() -> usize {
    65536
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity: default_arena_capacity(),
        }
    }
}

/// Output buffer used when rendering the store back into a header.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Buffer capacity in bytes, terminator included.
    #[validate(range(min = 16, max = 1048576))]
    #[serde(default = "default_buffer_size", deserialize_with = "deserialize_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    8192
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Num(usize),
    Str(String),
}

/// Accepts human-friendly sizes (e.g. "64KiB") or plain numbers.
fn deserialize_size<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeValue::deserialize(deserializer)? {
        SizeValue::Num(n) => Ok(n),
        SizeValue::Str(s) => parse_size(&s).map_err(serde::de::Error::custom),
    }
}

fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (num_part, unit_part) = s.split_at(split);
    let number: f64 = num_part
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    let multiplier = match unit_part.trim().to_lowercase().as_str() {
        "" | "b" => 1.0,
        "kb" | "kib" => 1024.0,
        "mb" | "mib" => 1024.0 * 1024.0,
        other => return Err(format!("unknown size unit '{other}'")),
    };
    Ok((number * multiplier) as usize)
}
