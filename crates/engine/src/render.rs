//! Rendering seam.

use blockfall_core::DrawFrame;

/// Anything that can present one frame of draw data.
pub trait RenderSurface {
    type Error;

    fn render(&mut self, frame: &DrawFrame) -> Result<(), Self::Error>;
}
