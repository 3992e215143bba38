//! CPU triangle mesh renderer

use glam::{IVec2, Vec2};

use super::shapes;
use super::vertex::Vertex;
use super::{Color, Renderer};
use crate::error::{GameError, GameResult};

/// Vertex buffer budget per frame
const MAX_VERTICES: usize = 65_536;

/// A line of text queued for the frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub center: IVec2,
    pub size: u32,
    pub color: Color,
}

/// One presented frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear: Color,
    /// Triangles in normalized device coordinates
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextRun>,
}

impl Frame {
    pub fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|run| run.text == text)
    }
}

/// Builds a triangle mesh per frame and keeps the last presented one
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    /// Viewport size in pixels
    size: (u32, u32),
    max_vertices: usize,
    pending: Frame,
    last: Frame,
    /// Raw vertex bytes of the last frame
    upload: Vec<u8>,
    frames: u64,
}

impl MeshRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width.max(1), height.max(1)),
            max_vertices: MAX_VERTICES,
            pending: Frame::default(),
            last: Frame::default(),
            upload: Vec::new(),
            frames: 0,
        }
    }

    /// Override the per-frame vertex budget
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Convert screen pixels (origin top left, y down) to normalized device
    /// coordinates (-1 to 1, y up)
    pub fn screen_to_ndc(&self, p: Vec2) -> Vec2 {
        let (w, h) = self.size;
        Vec2::new(p.x / w as f32 * 2.0 - 1.0, 1.0 - p.y / h as f32 * 2.0)
    }

    pub fn last_frame(&self) -> &Frame {
        &self.last
    }

    /// Bytes uploaded for the last frame
    pub fn uploaded_bytes(&self) -> usize {
        self.upload.len()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Renderer for MeshRenderer {
    fn clear(&mut self, color: Color) {
        self.pending.clear = color;
        self.pending.vertices.clear();
        self.pending.texts.clear();
    }

    fn draw_polygon(&mut self, vertices: &[IVec2], origin: IVec2, color: Color, stroke: u32) {
        let points: Vec<Vec2> = vertices
            .iter()
            .map(|&v| (origin + v).as_vec2())
            .collect();
        let mesh = if stroke == 0 {
            shapes::polygon_fill(&points, color)
        } else {
            shapes::polygon_outline(&points, stroke as f32, color)
        };
        self.pending.vertices.extend(mesh);
    }

    fn draw_text(&mut self, text: &str, center: IVec2, size: u32, color: Color) {
        self.pending.texts.push(TextRun {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }

    fn present(&mut self) -> GameResult<()> {
        let count = self.pending.vertices.len();
        if count > self.max_vertices {
            self.pending = Frame::default();
            return Err(GameError::Render {
                reason: format!(
                    "frame needs {} vertices, buffer holds {}",
                    count, self.max_vertices
                ),
            });
        }

        let mut frame = std::mem::take(&mut self.pending);
        for v in &mut frame.vertices {
            let ndc = self.screen_to_ndc(Vec2::from(v.position));
            v.position = ndc.to_array();
        }

        self.upload.clear();
        self.upload
            .extend_from_slice(Vertex::as_bytes(&frame.vertices));
        self.last = frame;
        self.frames += 1;
        log::trace!(
            "Frame {}: {} vertices, {} text runs",
            self.frames,
            count,
            self.last.texts.len()
        );
        Ok(())
    }
}
