//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Default upper bound on a single payload: 16 MiB.
pub const DEFAULT_MAX_LEN: u64 = 16 * 1024 * 1024;

/// Limits applied by [`crate::NetstringReader`] to every frame it decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct DecoderConfig {
    /// Largest payload length accepted, in bytes. Longer frames fail with
    /// [`crate::Error::Length`] before any payload byte is read.
    pub max_len: u64,
}

impl DecoderConfig {
    /// Create a config with the given payload limit.
    #[must_use]
    pub const fn with_max_len(max_len: u64) -> Self {
        Self { max_len }
    }

    /// Returns `true` if a frame of `len` bytes is within the limit.
    #[must_use]
    pub fn accepts(&self, len: u64) -> bool {
        len <= self.max_len
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { max_len: DEFAULT_MAX_LEN }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_16_mib() {
        assert_eq!(DecoderConfig::default().max_len, 16 * 1024 * 1024);
    }

    #[test]
    fn accepts_is_inclusive() {
        let config = DecoderConfig::with_max_len(4);
        assert!(config.accepts(4));
        assert!(!config.accepts(5));
    }

    #[test]
    fn missing_fields_fall_back_to_default() {
        let config: DecoderConfig = match serde_json::from_str("{}") {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config, DecoderConfig::default());
    }
}
