#![forbid(unsafe_code)]

pub mod animation;
pub mod foundation;
pub mod layout;
pub mod model;
pub mod path;
pub mod render;
pub mod svg;

pub use animation::panel::{StrokePanel, VisibilityGate};
pub use animation::registry::PanelRegistry;
pub use animation::stroke::{Phase, StrokeAnimator, Tick};
pub use foundation::core::{Fps, Point, Rect, Vec2, Viewport};
pub use foundation::error::{InklineError, InklineResult};
pub use layout::framing::Framing;
pub use model::{DrawTiming, PanelConfig, Segment, SegmentSet, StrokeStyle};
pub use path::flatten::PathFlattener;
pub use path::parser::{PathCommand, PathOp, parse_path_data};
pub use render::backend::{BackendKind, LineBackend, LineId, create_backend};
pub use render::buffer::BufferBackend;
pub use svg::loader::{FsFetcher, TextFetcher, load_all, load_segments, parse_document};
