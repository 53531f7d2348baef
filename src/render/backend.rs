use crate::{
    foundation::{core::Viewport, error::InklineResult},
    model::StrokeStyle,
};

/// Handle to a polyline primitive owned by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub usize);

/// The drawing surface a stroke animation talks to.
///
/// The contract mirrors a GPU line primitive: vertex slots are preallocated,
/// vertices are written incrementally as the reveal frontier advances, and a
/// visible prefix `[0, k)` bounds what a frame actually draws. The z
/// coordinate of every vertex is fixed at 0 (the drawing plane).
pub trait LineBackend {
    /// Allocate a polyline with `vertex_count` zeroed vertex slots.
    fn alloc_polyline(&mut self, vertex_count: usize, style: &StrokeStyle) -> LineId;

    /// Write vertex `index` of `line` as (x, y, 0).
    fn write_vertex(&mut self, line: LineId, index: usize, x: f64, y: f64);

    /// Mark the visible prefix `[0, visible)` of `line`.
    fn set_draw_range(&mut self, line: LineId, visible: usize);

    /// Render one frame of all allocated primitives for `viewport`'s camera.
    fn render(&mut self, viewport: &Viewport) -> InklineResult<()>;
}

impl<B: LineBackend + ?Sized> LineBackend for Box<B> {
    fn alloc_polyline(&mut self, vertex_count: usize, style: &StrokeStyle) -> LineId {
        (**self).alloc_polyline(vertex_count, style)
    }

    fn write_vertex(&mut self, line: LineId, index: usize, x: f64, y: f64) {
        (**self).write_vertex(line, index, x, y)
    }

    fn set_draw_range(&mut self, line: LineId, visible: usize) {
        (**self).set_draw_range(line, visible)
    }

    fn render(&mut self, viewport: &Viewport) -> InklineResult<()> {
        (**self).render(viewport)
    }
}

/// Available backend kinds.
///
/// - `Buffer` is always available and records draw state in memory.
#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Buffer,
}

/// Create a line-drawing backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn LineBackend> {
    match kind {
        BackendKind::Buffer => Box::new(crate::render::buffer::BufferBackend::new()),
    }
}
