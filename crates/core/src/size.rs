//! Size-constraint resolution.
//!
//! A request may supply width and height independently; each falls back to
//! a configured default. When exactly one dimension is supplied explicitly
//! (and actually differs from its default), the other is derived from the
//! source's own aspect ratio once the source has been opened. Renderers
//! always fit the source inside the resolved box without distortion and
//! never upscale.

use crate::error::{Error, Result};

/// Largest permitted preview dimension on either axis, in pixels.
pub const MAX_DIMENSION: u32 = 1920;

/// Validate a client-supplied dimension at the request boundary.
///
/// The boundary rejects out-of-range values outright; [`SizePolicy`] only
/// clamps values that arrive through internal derivation.
pub fn validate_requested(value: u32) -> Result<()> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(Error::InvalidDimension {
            value,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

fn clamp_dimension(value: u32) -> u32 {
    value.clamp(1, MAX_DIMENSION)
}

/// The dimension that was supplied alone and therefore drives
/// aspect-ratio derivation of the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    Width,
    Height,
}

/// A resolved width/height constraint, both dimensions in `[1, MAX_DIMENSION]`.
///
/// Produced by [`SizePolicy::resolve`], immutable once computed, consumed
/// exactly once by a renderer via [`TargetBox::fit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetBox {
    pub width: u32,
    pub height: u32,
    anchor: Option<Anchor>,
}

impl TargetBox {
    /// Whether the box derives one dimension from the source aspect ratio.
    pub fn preserves_aspect(&self) -> bool {
        self.anchor.is_some()
    }

    /// The anchored dimension, if any.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Compute final output dimensions for a source of `src_w` × `src_h`.
    ///
    /// Anchored boxes derive the free dimension from the source ratio and
    /// clamp it back into range (a very wide or narrow source can otherwise
    /// exceed the bound). In every case the source is max-fit into the
    /// resulting bounds: aspect ratio is preserved and the source is never
    /// upscaled.
    pub fn fit(&self, src_w: u32, src_h: u32) -> (u32, u32) {
        if src_w == 0 || src_h == 0 {
            return (self.width, self.height);
        }
        match self.anchor {
            Some(Anchor::Width) => {
                let derived = (self.width as f64 * src_h as f64 / src_w as f64).round() as u32;
                fit_within(src_w, src_h, self.width, clamp_dimension(derived))
            }
            Some(Anchor::Height) => {
                let derived = (self.height as f64 * src_w as f64 / src_h as f64).round() as u32;
                fit_within(src_w, src_h, clamp_dimension(derived), self.height)
            }
            None => fit_within(src_w, src_h, self.width, self.height),
        }
    }
}

/// Scale `src` to fit inside `max_w` × `max_h`, preserving aspect ratio
/// and never upscaling.
fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = f64::min(max_w as f64 / src_w as f64, max_h as f64 / src_h as f64).min(1.0);
    let width = ((src_w as f64 * scale).round() as u32).max(1);
    let height = ((src_h as f64 * scale).round() as u32).max(1);
    (width, height)
}

/// Resolves requested dimensions into a [`TargetBox`].
#[derive(Clone, Copy, Debug)]
pub struct SizePolicy {
    default_width: u32,
    default_height: u32,
}

impl SizePolicy {
    /// Create a policy with the given per-dimension defaults.
    pub fn new(default_width: u32, default_height: u32) -> Self {
        Self {
            default_width: clamp_dimension(default_width),
            default_height: clamp_dimension(default_height),
        }
    }

    /// Resolve optional requested dimensions into a target box.
    ///
    /// Aspect derivation only engages when exactly one dimension is
    /// supplied and differs from its default while the other falls back to
    /// its default; every other combination takes the explicit-box path,
    /// silently.
    pub fn resolve(&self, width: Option<u32>, height: Option<u32>) -> TargetBox {
        let anchor = match (width, height) {
            (Some(w), None) if w != self.default_width => Some(Anchor::Width),
            (None, Some(h)) if h != self.default_height => Some(Anchor::Height),
            _ => None,
        };
        TargetBox {
            width: clamp_dimension(width.unwrap_or(self.default_width)),
            height: clamp_dimension(height.unwrap_or(self.default_height)),
            anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SizePolicy {
        SizePolicy::new(256, 256)
    }

    #[test]
    fn both_omitted_takes_defaults_without_anchor() {
        let bx = policy().resolve(None, None);
        assert_eq!((bx.width, bx.height), (256, 256));
        assert!(!bx.preserves_aspect());
    }

    #[test]
    fn both_supplied_is_explicit_box() {
        let bx = policy().resolve(Some(100), Some(80));
        assert_eq!((bx.width, bx.height), (100, 80));
        assert!(!bx.preserves_aspect());
    }

    #[test]
    fn width_alone_anchors_width() {
        let bx = policy().resolve(Some(100), None);
        assert_eq!(bx.anchor(), Some(Anchor::Width));
        assert_eq!(bx.width, 100);
    }

    #[test]
    fn height_alone_anchors_height() {
        let bx = policy().resolve(None, Some(90));
        assert_eq!(bx.anchor(), Some(Anchor::Height));
        assert_eq!(bx.height, 90);
    }

    #[test]
    fn supplied_value_equal_to_default_does_not_anchor() {
        let bx = policy().resolve(Some(256), None);
        assert!(!bx.preserves_aspect());
        assert_eq!((bx.width, bx.height), (256, 256));
    }

    #[test]
    fn oversized_values_are_clamped_not_rejected() {
        let bx = policy().resolve(Some(5000), Some(3000));
        assert_eq!((bx.width, bx.height), (MAX_DIMENSION, MAX_DIMENSION));
    }

    #[test]
    fn width_anchor_derives_height_from_source_ratio() {
        // 400x200 source with width=100 -> 100x50.
        let bx = policy().resolve(Some(100), None);
        assert_eq!(bx.fit(400, 200), (100, 50));
    }

    #[test]
    fn height_anchor_derives_width_from_source_ratio() {
        let bx = policy().resolve(None, Some(50));
        assert_eq!(bx.fit(400, 200), (100, 50));
    }

    #[test]
    fn derived_dimension_is_clamped_for_extreme_ratios() {
        // A 100:1 panorama anchored at width 1000 would derive height 10;
        // anchored at height 1000 it would derive width 100_000.
        let bx = policy().resolve(None, Some(1000));
        let (w, h) = bx.fit(100_000, 1000);
        assert!(w <= MAX_DIMENSION);
        assert!(h <= MAX_DIMENSION);
        // Max-fit keeps the source ratio within the clamped bounds.
        assert_eq!(w, MAX_DIMENSION);
    }

    #[test]
    fn explicit_box_max_fits_without_distortion() {
        let bx = policy().resolve(Some(100), Some(100));
        assert_eq!(bx.fit(400, 200), (100, 50));
        assert_eq!(bx.fit(200, 400), (50, 100));
    }

    #[test]
    fn small_sources_are_never_upscaled() {
        let bx = policy().resolve(None, None);
        assert_eq!(bx.fit(80, 40), (80, 40));

        let anchored = policy().resolve(Some(100), None);
        assert_eq!(anchored.fit(50, 50), (50, 50));
    }

    #[test]
    fn degenerate_source_dimensions_fall_back_to_box() {
        let bx = policy().resolve(Some(100), Some(80));
        assert_eq!(bx.fit(0, 100), (100, 80));
    }

    #[test]
    fn validate_requested_bounds() {
        assert!(validate_requested(1).is_ok());
        assert!(validate_requested(MAX_DIMENSION).is_ok());
        assert!(validate_requested(0).is_err());
        assert!(validate_requested(MAX_DIMENSION + 1).is_err());
    }
}
