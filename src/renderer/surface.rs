//! Drawing interface the scene renders through

use glam::Vec2;

use crate::sim::Rgb;

/// A frame being drawn. Calls between `fill_background` and `present` build
/// one frame in painter's order.
pub trait RenderSurface {
    type Error;

    fn fill_background(&mut self, color: Rgb);

    /// Filled convex polygon
    fn draw_polygon(&mut self, fill: Rgb, vertices: &[Vec2]);

    /// One-pixel outline through `vertices`, closing back to the first if `closed`
    fn draw_outline(&mut self, color: Rgb, vertices: &[Vec2], closed: bool);

    /// Finish the frame
    fn present(&mut self) -> Result<(), Self::Error>;
}
