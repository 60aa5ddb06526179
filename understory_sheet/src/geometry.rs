// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Approximate equality and pixel snapping for sheet geometry.
//!
//! Frames that come back from layout are rarely bit-identical to the frames
//! we computed, and edges that land between device pixels anti-alias against
//! the backdrop. The helpers here let the controller ignore sub-pixel noise
//! and keep edges on the pixel grid.
//!
//! ```
//! use kurbo::Rect;
//! use understory_sheet::geometry::{AlmostEq, PixelGrid};
//!
//! let grid = PixelGrid::new(2.0);
//! assert_eq!(grid.ceil(10.2), 10.5);
//! assert_eq!(grid.pixel_size(), 0.5);
//!
//! let a = Rect::new(0.0, 100.0, 320.0, 480.0);
//! let b = Rect::new(0.0, 100.0 + 1e-3, 320.0, 480.0);
//! assert!(!a.is_almost_equal(&b));
//! assert!(a.is_almost_equal_within(&b, 0.01));
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

/// Distance to the next representable `f64` above `|value|`.
///
/// Returns NaN for non-finite input, so comparisons against it fail.
#[must_use]
pub fn ulp(value: f64) -> f64 {
    let magnitude = value.abs();
    if !magnitude.is_finite() {
        return f64::NAN;
    }
    f64::from_bits(magnitude.to_bits() + 1) - magnitude
}

/// Approximate equality for floating point geometry.
pub trait AlmostEq {
    /// Equal up to one unit in the last place of the combined magnitude.
    ///
    /// This is the strictest comparison; it tolerates rounding noise from a
    /// couple of arithmetic operations and nothing else.
    fn is_almost_equal(&self, other: &Self) -> bool;

    /// Equal when every component differs by at most `error`.
    fn is_almost_equal_within(&self, other: &Self, error: f64) -> bool;
}

impl AlmostEq for f64 {
    fn is_almost_equal(&self, other: &Self) -> bool {
        (self - other).abs() < ulp(self + other)
    }

    fn is_almost_equal_within(&self, other: &Self, error: f64) -> bool {
        (self - other).abs() <= error
    }
}

impl AlmostEq for Point {
    fn is_almost_equal(&self, other: &Self) -> bool {
        self.x.is_almost_equal(&other.x) && self.y.is_almost_equal(&other.y)
    }

    fn is_almost_equal_within(&self, other: &Self, error: f64) -> bool {
        self.x.is_almost_equal_within(&other.x, error)
            && self.y.is_almost_equal_within(&other.y, error)
    }
}

impl AlmostEq for Size {
    fn is_almost_equal(&self, other: &Self) -> bool {
        self.width.is_almost_equal(&other.width) && self.height.is_almost_equal(&other.height)
    }

    fn is_almost_equal_within(&self, other: &Self, error: f64) -> bool {
        self.width.is_almost_equal_within(&other.width, error)
            && self.height.is_almost_equal_within(&other.height, error)
    }
}

impl AlmostEq for Rect {
    fn is_almost_equal(&self, other: &Self) -> bool {
        self.size().is_almost_equal(&other.size()) && self.origin().is_almost_equal(&other.origin())
    }

    fn is_almost_equal_within(&self, other: &Self, error: f64) -> bool {
        self.size().is_almost_equal_within(&other.size(), error)
            && self.origin().is_almost_equal_within(&other.origin(), error)
    }
}

/// Values this close to a pixel boundary (in device pixels) count as on it.
const SNAP_TOLERANCE: f64 = 1e-6;

/// The device pixel grid of the screen a sheet is shown on.
///
/// `scale` is the number of device pixels per layout unit (2.0 on a typical
/// high density phone display).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelGrid {
    scale: f64,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl PixelGrid {
    /// Creates a grid for the given display scale.
    ///
    /// Non-finite or non-positive scales fall back to `1.0`.
    #[must_use]
    pub fn new(scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            log::warn!("ignoring invalid display scale {scale}, using 1.0");
            Self::default()
        }
    }

    /// Device pixels per layout unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The size of one device pixel in layout units.
    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        1.0 / self.scale
    }

    /// Rounds `value` up to the next device pixel boundary.
    ///
    /// Values already within a tiny tolerance of a boundary stay on it, so
    /// snapping is idempotent.
    #[must_use]
    pub fn ceil(&self, value: f64) -> f64 {
        let scaled = value * self.scale;
        let nearest = scaled.round();
        if (scaled - nearest).abs() <= SNAP_TOLERANCE {
            nearest / self.scale
        } else {
            scaled.ceil() / self.scale
        }
    }

    /// Rounds `value` down to the previous device pixel boundary.
    #[must_use]
    pub fn floor(&self, value: f64) -> f64 {
        let scaled = value * self.scale;
        let nearest = scaled.round();
        if (scaled - nearest).abs() <= SNAP_TOLERANCE {
            nearest / self.scale
        } else {
            scaled.floor() / self.scale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ulp_of_one_is_machine_epsilon() {
        assert_eq!(ulp(1.0), f64::EPSILON);
        assert_eq!(ulp(-1.0), f64::EPSILON);
        assert!(ulp(f64::NAN).is_nan());
        assert!(ulp(f64::INFINITY).is_nan());
    }

    #[test]
    fn almost_equal_tolerates_rounding_noise_only() {
        let a: f64 = 0.1 + 0.2;
        assert!(a.is_almost_equal(&0.3));
        assert!(!1.0_f64.is_almost_equal(&1.001));
        assert!(1.0_f64.is_almost_equal_within(&1.001, 0.01));
        assert!(!f64::NAN.is_almost_equal(&f64::NAN));
    }

    #[test]
    fn almost_equal_zero_means_exactly_zero() {
        assert!(0.0_f64.is_almost_equal(&0.0));
        assert!(!1e-12_f64.is_almost_equal(&0.0));
    }

    #[test]
    fn rect_comparison_checks_origin_and_size() {
        let a = Rect::new(0.0, 10.0, 100.0, 60.0);
        assert!(a.is_almost_equal(&a));
        assert!(!a.is_almost_equal(&Rect::new(0.0, 11.0, 100.0, 61.0)));
        assert!(!a.is_almost_equal(&Rect::new(0.0, 10.0, 100.0, 61.0)));
        assert!(a.is_almost_equal_within(&Rect::new(0.0, 10.5, 100.0, 60.5), 0.5));
    }

    #[test]
    fn ceil_snaps_up_to_device_pixels() {
        let grid = PixelGrid::new(3.0);
        assert_eq!(grid.ceil(10.1), 31.0 / 3.0);
        assert_eq!(grid.floor(10.1), 10.0);
        assert_eq!(grid.ceil(-0.2), 0.0);
    }

    #[test]
    fn ceil_is_idempotent() {
        for scale in [1.0, 2.0, 3.0, 2.625] {
            let grid = PixelGrid::new(scale);
            for i in 0..500 {
                let value = f64::from(i) * 0.37;
                let once = grid.ceil(value);
                assert_eq!(grid.ceil(once), once, "scale {scale}, value {value}");
                assert!(once >= value - SNAP_TOLERANCE);
            }
        }
    }

    #[test]
    fn invalid_scale_falls_back_to_one() {
        assert_eq!(PixelGrid::new(0.0).scale(), 1.0);
        assert_eq!(PixelGrid::new(f64::NAN).scale(), 1.0);
        assert_eq!(PixelGrid::new(-2.0).pixel_size(), 1.0);
    }
}
