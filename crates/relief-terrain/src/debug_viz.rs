//! Heightmap debug visualization.
//!
//! Renders any [`HeightSource`](crate::HeightSource) to a [`DebugImage`] with
//! one pixel per vertex, either as elevation colour bands or as grayscale.
//! Images can be PNG-encoded for inspection outside the host.

mod image;
mod renderers;

pub use self::image::{DebugImage, ImageEncodeError, Rgba};
pub use renderers::{height_to_color, render_grayscale_debug, render_height_debug};
