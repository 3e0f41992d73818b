/// Default upper bound on the uncompressed body: 256 MiB.
///
/// SWF stores its file length as a `u32`, but real movies rarely exceed a
/// few tens of megabytes. The limit stops a tiny zlib payload from inflating
/// into gigabytes before the frame size is even read.
pub const DEFAULT_MAX_BODY_SIZE: usize = 256 * 1024 * 1024;

/// Configuration for a [`Scanner`](crate::Scanner).
///
/// ```text
/// ┌──────────────────┬─────────────┬────────────────────────────────────────┐
/// │ Field            │ Default     │ Purpose                                │
/// ├──────────────────┼─────────────┼────────────────────────────────────────┤
/// │ signature_policy │ Permissive  │ Check the "WS" literal or pass through │
/// │ body_mode        │ Buffered    │ Read the whole body or only the prefix │
/// │ max_body_size    │ 256 MiB     │ Limit on the uncompressed body         │
/// └──────────────────┴─────────────┴────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    pub signature_policy: SignaturePolicy,
    pub body_mode: BodyMode,
    /// Largest body, in bytes after decompression, the scanner will hold.
    pub max_body_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            signature_policy: SignaturePolicy::default(),
            body_mode: BodyMode::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            signature_policy: SignaturePolicy::Strict,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn streaming() -> Self {
        Self {
            body_mode: BodyMode::Streaming,
            ..Self::default()
        }
    }
}

/// What to do when bytes 1–2 of the signature are not "WS".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignaturePolicy {
    /// Fail with `ScanError::InvalidSignature`.
    Strict,
    /// Keep whatever bytes are present and carry on. A warning is logged.
    #[default]
    Permissive,
}

/// How much of the body is pulled off the source.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────────────┐
/// │ Mode      │ Behavior                                                 │
/// ├───────────┼──────────────────────────────────────────────────────────┤
/// │ Buffered  │ Read everything after the header, then decompress it as  │
/// │           │ a whole. A corrupt or cut-off zlib stream fails even if  │
/// │           │ the damage is past the frame size.                       │
/// │ Streaming │ Decompress on the fly and stop once the fields of        │
/// │           │ interest are read. Damage past them goes unnoticed.      │
/// └───────────┴──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyMode {
    #[default]
    Buffered,
    Streaming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_permissive_and_buffered() {
        let config = ScanConfig::default();
        assert_eq!(config.signature_policy, SignaturePolicy::Permissive);
        assert_eq!(config.body_mode, BodyMode::Buffered);
        assert_eq!(config.max_body_size, DEFAULT_MAX_BODY_SIZE);
    }

    #[test]
    fn presets_change_one_field() {
        let strict = ScanConfig::strict();
        assert_eq!(strict.signature_policy, SignaturePolicy::Strict);
        assert_eq!(strict.body_mode, BodyMode::Buffered);

        let streaming = ScanConfig::streaming();
        assert_eq!(streaming.signature_policy, SignaturePolicy::Permissive);
        assert_eq!(streaming.body_mode, BodyMode::Streaming);
    }
}
