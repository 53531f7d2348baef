use crate::{
    foundation::core::{Fps, Point},
    foundation::error::{InklineError, InklineResult},
    layout::framing::Framing,
};

/// One contiguous polyline derived from a single `<path>` element's commands.
/// Point order is stroke order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub points: Vec<Point>,
}

impl Segment {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A segment that cannot draw a line (<= 1 point) is discarded at load.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() <= 1
    }
}

/// The segments of one SVG document, in document order (= render order).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentSet {
    pub segments: Vec<Segment>,
}

impl SegmentSet {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn total_points(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    pub fn iter_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| s.points.iter().copied())
    }
}

/// Line material handed to the backend when a polyline is allocated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    pub color_rgba8: [u8; 4],
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color_rgba8: [0x5d, 0x40, 0x37, 0xff],
            width: 1.2,
        }
    }
}

/// Reveal duration denominated in display-refresh frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawTiming {
    pub fps: Fps,
    pub seconds: f64,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            seconds: 3.0,
        }
    }
}

impl DrawTiming {
    pub fn total_frames(self) -> u64 {
        self.fps.secs_to_frames_floor(self.seconds)
    }

    pub fn validate(self) -> InklineResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.total_frames() == 0 {
            return Err(InklineError::animation(
                "DrawTiming must span at least one frame",
            ));
        }
        Ok(())
    }
}

pub const PORTRAIT_SCALE: f64 = 2.0;
pub const TITLE_SCALE: f64 = 1.8;
pub const PREVIEW_SCALE: f64 = 1.5;

/// Everything one stroke animation needs: which document to load, how large
/// the normalized geometry is, how it is framed in the viewport, how long the
/// reveal runs and what the line looks like.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelConfig {
    pub svg_url: String,
    pub scale: f64,
    pub framing: Framing,
    pub timing: DrawTiming,
    pub style: StrokeStyle,
}

impl PanelConfig {
    fn with_framing(svg_url: impl Into<String>, scale: f64, framing: Framing) -> Self {
        Self {
            svg_url: svg_url.into(),
            scale,
            framing,
            timing: DrawTiming::default(),
            style: StrokeStyle::default(),
        }
    }

    /// Hero portrait: subject top pinned a third of the way down the viewport.
    pub fn portrait(svg_url: impl Into<String>) -> Self {
        Self::with_framing(svg_url, PORTRAIT_SCALE, Framing::Portrait)
    }

    /// Title band stretched across the bottom of the viewport.
    pub fn title(svg_url: impl Into<String>) -> Self {
        Self::with_framing(svg_url, TITLE_SCALE, Framing::title_band())
    }

    /// Bounded preview box for small project canvases.
    pub fn preview(svg_url: impl Into<String>) -> Self {
        Self::with_framing(svg_url, PREVIEW_SCALE, Framing::preview_box())
    }

    pub fn validate(&self) -> InklineResult<()> {
        if self.svg_url.trim().is_empty() {
            return Err(InklineError::layout("PanelConfig svg_url must be non-empty"));
        }
        if !(self.scale > 0.0) {
            return Err(InklineError::layout("PanelConfig scale must be > 0"));
        }
        self.timing.validate()
    }
}
