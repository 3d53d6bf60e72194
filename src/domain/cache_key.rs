use std::fmt;

use sha2::{Digest, Sha256};

/// Fixed-length digest identifying a cacheable transcription request.
///
/// Built from the raw audio bytes, the upload label (usually the filename) and
/// the rendered instruction text. Every field is length-prefixed before it is
/// hashed, so `("ab", "c")` and `("a", "bc")` never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn fingerprint(content: &[u8], label: &str, context: &str) -> Self {
        let mut hasher = Sha256::new();
        for field in [content, label.as_bytes(), context.as_bytes()] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field);
        }
        Self(hasher.finalize().into())
    }

    /// First 12 hex chars, enough to correlate log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
