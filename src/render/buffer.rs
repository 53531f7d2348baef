use crate::{
    foundation::{core::Viewport, error::InklineResult},
    model::StrokeStyle,
    render::backend::{LineBackend, LineId},
};

/// One allocated polyline: preallocated vertex slots plus the visible prefix.
#[derive(Clone, Debug)]
pub struct LineRecord {
    pub vertices: Vec<[f64; 3]>,
    pub visible: usize,
    pub style: StrokeStyle,
}

/// In-memory line backend.
///
/// Stands in for a GPU scene during tests and CLI simulation: it keeps every
/// vertex write, draw-range update and rendered-frame count observable.
#[derive(Debug, Default)]
pub struct BufferBackend {
    lines: Vec<LineRecord>,
    frames_rendered: u64,
    last_viewport: Option<Viewport>,
}

impl BufferBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&LineRecord> {
        self.lines.get(id.0)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.last_viewport
    }

    /// Sum of visible vertices across all lines.
    pub fn visible_total(&self) -> usize {
        self.lines.iter().map(|l| l.visible).sum()
    }
}

impl LineBackend for BufferBackend {
    fn alloc_polyline(&mut self, vertex_count: usize, style: &StrokeStyle) -> LineId {
        self.lines.push(LineRecord {
            vertices: vec![[0.0; 3]; vertex_count],
            visible: 0,
            style: *style,
        });
        LineId(self.lines.len() - 1)
    }

    fn write_vertex(&mut self, line: LineId, index: usize, x: f64, y: f64) {
        if let Some(slot) = self
            .lines
            .get_mut(line.0)
            .and_then(|l| l.vertices.get_mut(index))
        {
            *slot = [x, y, 0.0];
        }
    }

    fn set_draw_range(&mut self, line: LineId, visible: usize) {
        if let Some(l) = self.lines.get_mut(line.0) {
            l.visible = visible.min(l.vertices.len());
        }
    }

    fn render(&mut self, viewport: &Viewport) -> InklineResult<()> {
        self.frames_rendered += 1;
        self.last_viewport = Some(*viewport);
        Ok(())
    }
}
