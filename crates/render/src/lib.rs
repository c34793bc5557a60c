//! Preview renderers for the Vignette preview service.
//!
//! Three renderers share the [`vignette_core::TargetBox`] contract:
//! - [`raster`] decodes and rescales raster images
//! - [`paged`] rasterizes one page of a paginated (PDF) document
//! - [`placeholder`] synthesizes the generic "unavailable" icon and is the
//!   only renderer that cannot fail

pub mod error;
pub mod paged;
pub mod placeholder;
pub mod raster;

pub use error::{RenderError, RenderResult};
