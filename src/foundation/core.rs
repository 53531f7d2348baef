use crate::foundation::error::{InklineError, InklineResult};

pub use kurbo::{Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> InklineResult<Self> {
        if den == 0 {
            return Err(InklineError::animation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(InklineError::animation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Perspective-camera view of the drawing plane.
///
/// The backend's camera sits `distance` in front of the plane the polylines live
/// on; `world_height`/`world_width` give the visible extent of that plane in
/// scene units, which is all the layout policies need from the camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub fov_deg: f64,
    pub aspect: f64, // surface width / height
    pub distance: f64,
}

pub const DEFAULT_FOV_DEG: f64 = 75.0;
pub const DEFAULT_CAMERA_DISTANCE: f64 = 4.0;

impl Viewport {
    pub fn new(fov_deg: f64, aspect: f64, distance: f64) -> InklineResult<Self> {
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(InklineError::layout("Viewport fov_deg must be in (0, 180)"));
        }
        if !(aspect > 0.0) {
            return Err(InklineError::layout("Viewport aspect must be > 0"));
        }
        if !(distance > 0.0) {
            return Err(InklineError::layout("Viewport distance must be > 0"));
        }
        Ok(Self {
            fov_deg,
            aspect,
            distance,
        })
    }

    /// Default camera (75 degree fov at distance 4) over a surface of the given aspect.
    pub fn with_aspect(aspect: f64) -> InklineResult<Self> {
        Self::new(DEFAULT_FOV_DEG, aspect, DEFAULT_CAMERA_DISTANCE)
    }

    pub fn world_height(self) -> f64 {
        2.0 * self.distance * (self.fov_deg.to_radians() / 2.0).tan()
    }

    pub fn world_width(self) -> f64 {
        self.world_height() * self.aspect
    }
}
