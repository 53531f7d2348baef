use crate::{
    foundation::core::{Point, Viewport},
    model::SegmentSet,
};

/// Extents at or below this are treated as zero when deriving scale factors,
/// so a flat bounding box falls back to identity instead of dividing by a
/// near-zero width or height.
pub const NEAR_ZERO_EXTENT: f64 = 1e-4;

pub const TITLE_WIDTH_FRACTION: f64 = 0.90;
pub const TITLE_BOTTOM_MARGIN: f64 = 0.2;
pub const PREVIEW_WIDTH_FRACTION: f64 = 0.80;
pub const PREVIEW_HEIGHT_FRACTION: f64 = 0.30;

/// Viewport-relative placement policy for a segment set.
///
/// Policies mutate the working copy in place; callers keep a pristine template
/// and re-apply the policy to a fresh clone on every relayout so transforms
/// never compound.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Framing {
    /// Vertical translation only: the topmost point ends up one third of the
    /// viewport height below its top edge.
    Portrait,
    /// Stretch horizontally about the center to a fraction of the viewport
    /// width, then rest the lowest point a fixed margin above the bottom edge.
    TitleBand {
        width_fraction: f64,
        bottom_margin: f64,
    },
    /// Scale x and y independently about the bounding-box center so the box
    /// fills the given fractions of the viewport.
    PreviewBox {
        width_fraction: f64,
        height_fraction: f64,
    },
}

impl Framing {
    pub fn title_band() -> Self {
        Self::TitleBand {
            width_fraction: TITLE_WIDTH_FRACTION,
            bottom_margin: TITLE_BOTTOM_MARGIN,
        }
    }

    pub fn preview_box() -> Self {
        Self::PreviewBox {
            width_fraction: PREVIEW_WIDTH_FRACTION,
            height_fraction: PREVIEW_HEIGHT_FRACTION,
        }
    }

    /// Reposition `set` in place for `viewport`. An empty set is left alone.
    pub fn apply(self, set: &mut SegmentSet, viewport: Viewport) {
        let Some(bounds) = bounds(set) else {
            return;
        };

        match self {
            Self::Portrait => {
                let world_h = viewport.world_height();
                let target_top = world_h / 2.0 - world_h / 3.0;
                let dy = target_top - bounds.max_y;
                for_each_point(set, |p| p.y += dy);
            }
            Self::TitleBand {
                width_fraction,
                bottom_margin,
            } => {
                let width = bounds.max_x - bounds.min_x;
                let center_x = (bounds.min_x + bounds.max_x) / 2.0;
                let target_width = viewport.world_width() * width_fraction;
                let stretch = if width > NEAR_ZERO_EXTENT {
                    target_width / width
                } else {
                    1.0
                };
                for_each_point(set, |p| p.x = (p.x - center_x) * stretch);

                let bottom_edge = -viewport.world_height() / 2.0;
                let dy = (bottom_edge + bottom_margin) - bounds.min_y;
                for_each_point(set, |p| p.y += dy);
            }
            Self::PreviewBox {
                width_fraction,
                height_fraction,
            } => {
                let width = bounds.max_x - bounds.min_x;
                let height = bounds.max_y - bounds.min_y;
                let center_x = (bounds.min_x + bounds.max_x) / 2.0;
                let center_y = (bounds.min_y + bounds.max_y) / 2.0;

                let target_width = viewport.world_width() * width_fraction;
                let target_height = viewport.world_height() * height_fraction;

                let sx = if width > NEAR_ZERO_EXTENT {
                    target_width / width
                } else {
                    1.0
                };
                let sy = if height > NEAR_ZERO_EXTENT {
                    target_height / height
                } else {
                    1.0
                };

                for_each_point(set, |p| {
                    p.x = (p.x - center_x) * sx;
                    p.y = (p.y - center_y) * sy;
                });
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

fn bounds(set: &SegmentSet) -> Option<Bounds> {
    let mut iter = set.iter_points();
    let first = iter.next()?;
    let mut b = Bounds {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    for p in iter {
        b.min_x = b.min_x.min(p.x);
        b.max_x = b.max_x.max(p.x);
        b.min_y = b.min_y.min(p.y);
        b.max_y = b.max_y.max(p.y);
    }
    Some(b)
}

fn for_each_point(set: &mut SegmentSet, mut f: impl FnMut(&mut Point)) {
    for seg in &mut set.segments {
        for p in &mut seg.points {
            f(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;

    fn set_of(points: &[(f64, f64)]) -> SegmentSet {
        SegmentSet::new(vec![Segment::new(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        )])
    }

    // tan(45 deg) = 1 makes world height 2 * distance = 6 and width 12.
    fn viewport() -> Viewport {
        Viewport::new(90.0, 2.0, 3.0).unwrap()
    }

    #[test]
    fn portrait_translates_top_to_one_third_below_top_edge() {
        let mut set = set_of(&[(-1.0, 0.5), (1.0, 2.0), (0.0, -1.0)]);
        Framing::Portrait.apply(&mut set, viewport());

        // world_h = 6: target top y = 3 - 2 = 1.
        let max_y = set
            .iter_points()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((max_y - 1.0).abs() < 1e-12);
        // x untouched.
        assert_eq!(set.segments[0].points[0].x, -1.0);
        // Relative vertical distances preserved.
        let ys: Vec<f64> = set.iter_points().map(|p| p.y).collect();
        assert!((ys[1] - ys[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn title_band_stretches_to_width_fraction_and_rests_on_margin() {
        let mut set = set_of(&[(-1.0, 0.0), (1.0, 1.0)]);
        Framing::title_band().apply(&mut set, viewport());

        // Target width = 12 * 0.9 = 10.8, so x in [-5.4, 5.4].
        let xs: Vec<f64> = set.iter_points().map(|p| p.x).collect();
        assert!((xs[0] + 5.4).abs() < 1e-12);
        assert!((xs[1] - 5.4).abs() < 1e-12);

        // Lowest point sits margin above bottom edge (-3).
        let min_y = set.iter_points().map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert!((min_y - (-3.0 + TITLE_BOTTOM_MARGIN)).abs() < 1e-12);
    }

    #[test]
    fn title_band_with_zero_width_keeps_identity_stretch() {
        let mut set = set_of(&[(2.0, 0.0), (2.0, 1.0)]);
        Framing::title_band().apply(&mut set, viewport());
        let xs: Vec<f64> = set.iter_points().map(|p| p.x).collect();
        // Stretch factor 1 about the (degenerate) center leaves x at 0 offset.
        assert!(xs.iter().all(|x| x.abs() < 1e-12));
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn preview_box_scales_both_axes_about_center() {
        let mut set = set_of(&[(-1.0, -1.0), (1.0, 1.0)]);
        Framing::preview_box().apply(&mut set, viewport());

        // Targets: width 12 * 0.8 = 9.6, height 6 * 0.3 = 1.8.
        let xs: Vec<f64> = set.iter_points().map(|p| p.x).collect();
        let ys: Vec<f64> = set.iter_points().map(|p| p.y).collect();
        assert!((xs[1] - xs[0] - 9.6).abs() < 1e-12);
        assert!((ys[1] - ys[0] - 1.8).abs() < 1e-12);
        // Centered about origin (original center was the origin).
        assert!((xs[0] + xs[1]).abs() < 1e-12);
        assert!((ys[0] + ys[1]).abs() < 1e-12);
    }

    #[test]
    fn preview_box_zero_width_bounding_box_scales_identity_in_x() {
        // A single vertical line: width 0 must not produce inf/NaN.
        let mut set = set_of(&[(0.5, -1.0), (0.5, 1.0)]);
        Framing::preview_box().apply(&mut set, viewport());
        for p in set.iter_points() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
        let xs: Vec<f64> = set.iter_points().map(|p| p.x).collect();
        // x scale factor is exactly 1; points collapse onto the x center.
        assert!((xs[0] - 0.0).abs() < 1e-12 && (xs[1] - 0.0).abs() < 1e-12);
        let ys: Vec<f64> = set.iter_points().map(|p| p.y).collect();
        assert!((ys[1] - ys[0] - 1.8).abs() < 1e-12);
    }

    #[test]
    fn empty_set_is_left_alone() {
        let mut set = SegmentSet::default();
        Framing::Portrait.apply(&mut set, viewport());
        assert!(set.is_empty());
    }

    #[test]
    fn reapplying_to_a_fresh_clone_does_not_compound() {
        let template = set_of(&[(-1.0, 0.0), (1.0, 1.0)]);

        let mut once = template.clone();
        Framing::title_band().apply(&mut once, viewport());

        let mut again = template.clone();
        Framing::title_band().apply(&mut again, viewport());

        assert_eq!(once, again);
    }
}
