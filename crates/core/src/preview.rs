//! Rendered preview results.

use bytes::Bytes;

/// Media type of an encoded preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
}

impl MediaType {
    /// MIME type string for HTTP responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// An encoded preview bitmap.
///
/// Created per-request and discarded at request end; has no identity
/// beyond its bytes.
#[derive(Clone, Debug)]
pub struct Preview {
    /// Encoded image bytes.
    pub bytes: Bytes,
    /// Encoding of `bytes`.
    pub media_type: MediaType,
}

impl Preview {
    /// Create a new preview from encoded bytes.
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Self {
        Self {
            bytes: Bytes::from(bytes),
            media_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_strings() {
        assert_eq!(MediaType::Jpeg.as_str(), "image/jpeg");
        assert_eq!(MediaType::Png.as_str(), "image/png");
    }
}
