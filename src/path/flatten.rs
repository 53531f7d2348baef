use crate::{
    foundation::core::Point,
    path::parser::{PathCommand, PathOp, parse_path_data},
};

/// Straight-line samples emitted per complete cubic control sextuple.
pub const CUBIC_SAMPLES: u32 = 12;
/// Straight-line samples emitted per complete quadratic control quadruple.
pub const QUAD_SAMPLES: u32 = 10;

/// Flattens one path's drawing commands into a polyline of normalized points.
///
/// `current` and `subpath_start` are tracked in raw SVG user units (top-left
/// origin, y-down); normalization to the centered y-up space happens only when
/// a point is emitted:
///
/// ```text
/// x' = (x / width  - 0.5) * scale
/// y' = (0.5 - y / height) * scale
/// ```
#[derive(Clone, Debug)]
pub struct PathFlattener {
    width: f64,
    height: f64,
    scale: f64,
    current: Point,
    subpath_start: Point,
    out: Vec<Point>,
}

impl PathFlattener {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
            current: Point::ZERO,
            subpath_start: Point::ZERO,
            out: Vec::new(),
        }
    }

    /// Consume the flattener, producing the polyline for `d`.
    ///
    /// A string with no recognized commands yields an empty list; callers are
    /// expected to discard degenerate (<= 1 point) results.
    pub fn flatten(mut self, d: &str) -> Vec<Point> {
        for cmd in parse_path_data(d) {
            self.apply(&cmd);
        }
        self.out
    }

    fn apply(&mut self, cmd: &PathCommand) {
        match cmd.op {
            PathOp::Move | PathOp::Line => {
                for (i, pair) in cmd.args.chunks_exact(2).enumerate() {
                    let p = self.resolve(pair[0], pair[1], cmd.relative);
                    if cmd.op == PathOp::Move && i == 0 {
                        self.subpath_start = p;
                    }
                    self.current = p;
                    self.emit(p);
                }
            }
            PathOp::Horizontal => {
                for &v in &cmd.args {
                    self.current.x = if cmd.relative { self.current.x + v } else { v };
                    self.emit(self.current);
                }
            }
            PathOp::Vertical => {
                for &v in &cmd.args {
                    self.current.y = if cmd.relative { self.current.y + v } else { v };
                    self.emit(self.current);
                }
            }
            PathOp::Cubic => {
                // Incomplete trailing sextuples are dropped, not padded.
                for ctrl in cmd.args.chunks_exact(6) {
                    let p0 = self.current;
                    let p1 = self.resolve(ctrl[0], ctrl[1], cmd.relative);
                    let p2 = self.resolve(ctrl[2], ctrl[3], cmd.relative);
                    let p3 = self.resolve(ctrl[4], ctrl[5], cmd.relative);
                    for k in 1..=CUBIC_SAMPLES {
                        let t = f64::from(k) / f64::from(CUBIC_SAMPLES);
                        self.emit(cubic_at(p0, p1, p2, p3, t));
                    }
                    self.current = p3;
                }
            }
            PathOp::Quadratic => {
                for ctrl in cmd.args.chunks_exact(4) {
                    let p0 = self.current;
                    let p1 = self.resolve(ctrl[0], ctrl[1], cmd.relative);
                    let p2 = self.resolve(ctrl[2], ctrl[3], cmd.relative);
                    for k in 1..=QUAD_SAMPLES {
                        let t = f64::from(k) / f64::from(QUAD_SAMPLES);
                        self.emit(quadratic_at(p0, p1, p2, t));
                    }
                    self.current = p2;
                }
            }
            PathOp::Close => {
                // Draw back to the subpath start; does not open a new segment.
                self.current = self.subpath_start;
                self.emit(self.subpath_start);
            }
        }
    }

    fn resolve(&self, x: f64, y: f64, relative: bool) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn emit(&mut self, p: Point) {
        self.out.push(Point::new(
            (p.x / self.width - 0.5) * self.scale,
            (0.5 - p.y / self.height) * self.scale,
        ));
    }
}

fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let it = 1.0 - t;
    let (b0, b1, b2, b3) = (it * it * it, 3.0 * it * it * t, 3.0 * it * t * t, t * t * t);
    Point::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

fn quadratic_at(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let it = 1.0 - t;
    let (b0, b1, b2) = (it * it, 2.0 * it * t, t * t);
    Point::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y,
    )
}
