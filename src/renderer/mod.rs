//! Rendering module
//!
//! The game draws through the [`Renderer`] trait: outlines of polygons in
//! screen pixels and lines of text. [`MeshRenderer`] turns those calls into
//! a triangle mesh in normalized device coordinates, ready for upload.

pub mod mesh;
pub mod shapes;
pub mod vertex;

use glam::IVec2;

use crate::error::GameResult;

pub use mesh::{Frame, MeshRenderer, TextRun};
pub use vertex::{Vertex, colors};

/// RGBA, each channel 0.0 - 1.0
pub type Color = [f32; 4];

/// Drawing collaborator
pub trait Renderer {
    /// Start a frame filled with `color`
    fn clear(&mut self, color: Color);

    /// Draw a polygon given by `vertices` relative to `origin` (the top left
    /// of its bounding square). A `stroke` of 0 fills it.
    fn draw_polygon(&mut self, vertices: &[IVec2], origin: IVec2, color: Color, stroke: u32);

    /// Draw one line of text centered on `center`
    fn draw_text(&mut self, text: &str, center: IVec2, size: u32, color: Color);

    /// Finish the frame
    fn present(&mut self) -> GameResult<()>;
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn clear(&mut self, color: Color) {
        (**self).clear(color)
    }

    fn draw_polygon(&mut self, vertices: &[IVec2], origin: IVec2, color: Color, stroke: u32) {
        (**self).draw_polygon(vertices, origin, color, stroke)
    }

    fn draw_text(&mut self, text: &str, center: IVec2, size: u32, color: Color) {
        (**self).draw_text(text, center, size, color)
    }

    fn present(&mut self) -> GameResult<()> {
        (**self).present()
    }
}
