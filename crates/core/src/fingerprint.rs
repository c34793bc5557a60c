//! Request fingerprints used as HTTP cache validators.

use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 digest over a request's identifying parameters.
///
/// Deterministic: identical parameter sequences always produce the same
/// fingerprint, so repeated calls against an unchanged source yield an
/// identical `ETag`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute a fingerprint over an ordered parameter sequence.
    ///
    /// Each part is length-prefixed before hashing so that part boundaries
    /// are unambiguous (`["ab", "c"]` never collides with `["a", "bc"]`).
    pub fn compute(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Encode as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Render as a quoted HTTP entity tag.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_parts_produce_identical_fingerprints() {
        let a = Fingerprint::compute(&["path", "docs/a.png", "100", ""]);
        let b = Fingerprint::compute(&["path", "docs/a.png", "100", ""]);
        assert_eq!(a, b);
        assert_eq!(a.etag(), b.etag());
    }

    #[test]
    fn any_changed_part_changes_the_fingerprint() {
        let base = Fingerprint::compute(&["path", "docs/a.png", "100", "50"]);
        assert_ne!(base, Fingerprint::compute(&["path", "docs/a.png", "100", "51"]));
        assert_ne!(base, Fingerprint::compute(&["path", "docs/b.png", "100", "50"]));
    }

    #[test]
    fn part_boundaries_are_unambiguous() {
        assert_ne!(
            Fingerprint::compute(&["ab", "c"]),
            Fingerprint::compute(&["a", "bc"])
        );
    }

    #[test]
    fn etag_is_quoted_hex() {
        let etag = Fingerprint::compute(&["x"]).etag();
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag.len(), 66);
    }
}
