//! Contain-fit geometry: mapping native image pixels onto a letterboxed or
//! pillarboxed on-screen image.
//!
//! All computation here is pure. Sizes are validated on construction, so a
//! [`Layout`] can only be computed once both the image and its container have
//! a known, positive size.

use serde::{Deserialize, Serialize};

/// Decimal places kept for scale factors and offsets.
pub const LAYOUT_PRECISION: i32 = 4;
/// Decimal places kept for projected screen rectangles.
pub const SCREEN_PRECISION: i32 = 2;

/// Round `value` to `decimals` decimal places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Intrinsic pixel size of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    natural_width: f64,
    natural_height: f64,
}

impl ImageGeometry {
    /// Returns `None` unless both dimensions are positive and finite.
    pub fn new(natural_width: f64, natural_height: f64) -> Option<Self> {
        (is_positive_finite(natural_width) && is_positive_finite(natural_height)).then_some(Self {
            natural_width,
            natural_height,
        })
    }

    pub fn natural_width(&self) -> f64 {
        self.natural_width
    }

    pub fn natural_height(&self) -> f64 {
        self.natural_height
    }

    pub fn aspect(&self) -> f64 {
        self.natural_width / self.natural_height
    }
}

/// On-screen size of the viewport holding the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    width: f64,
    height: f64,
}

impl ContainerGeometry {
    /// Returns `None` unless both dimensions are positive and finite.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        (is_positive_finite(width) && is_positive_finite(height)).then_some(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Check if both axes are within `tolerance` of `other`.
    pub fn is_close_to(&self, other: &ContainerGeometry, tolerance: f64) -> bool {
        (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Scale factors and offsets for one image inside one container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub x_scale: f64,
    pub y_scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub painted_width: f64,
    pub painted_height: f64,
}

/// Fit `image` inside `container` preserving its aspect ratio.
///
/// A relatively wider image fills the container width and is centred
/// vertically; otherwise it fills the height and is centred horizontally.
/// Scales and offsets are rounded to [`LAYOUT_PRECISION`] decimals so that
/// floating-point noise does not leak into repeated renders.
pub fn compute_layout(image: ImageGeometry, container: ContainerGeometry) -> Layout {
    let image_aspect = image.aspect();

    let (painted_width, painted_height, x_offset, y_offset) =
        if image_aspect > container.aspect() {
            let painted_height = container.width / image_aspect;
            (
                container.width,
                painted_height,
                0.0,
                (container.height - painted_height) / 2.0,
            )
        } else {
            let painted_width = container.height * image_aspect;
            (
                painted_width,
                container.height,
                (container.width - painted_width) / 2.0,
                0.0,
            )
        };

    Layout {
        x_scale: round_to(painted_width / image.natural_width, LAYOUT_PRECISION),
        y_scale: round_to(painted_height / image.natural_height, LAYOUT_PRECISION),
        x_offset: round_to(x_offset, LAYOUT_PRECISION),
        y_offset: round_to(y_offset, LAYOUT_PRECISION),
        painted_width,
        painted_height,
    }
}

/// Rectangle in native image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionCoords {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RegionCoords {
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite())
            && self.w >= 0.0
            && self.h >= 0.0
    }
}

/// A clickable hot zone on the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnswerRegion {
    pub index: usize,
    pub coords: RegionCoords,
}

/// An answer region projected into screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScaledRegion {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Project one region through `layout`, rounded to [`SCREEN_PRECISION`].
pub fn project_region(region: &AnswerRegion, layout: &Layout) -> ScaledRegion {
    let c = &region.coords;
    ScaledRegion {
        left: round_to(layout.x_offset + c.x * layout.x_scale, SCREEN_PRECISION),
        top: round_to(layout.y_offset + c.y * layout.y_scale, SCREEN_PRECISION),
        width: round_to(c.w * layout.x_scale, SCREEN_PRECISION),
        height: round_to(c.h * layout.y_scale, SCREEN_PRECISION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(w: f64, h: f64) -> ImageGeometry {
        ImageGeometry::new(w, h).unwrap()
    }

    fn container(w: f64, h: f64) -> ContainerGeometry {
        ContainerGeometry::new(w, h).unwrap()
    }

    #[test]
    fn rejects_unknown_sizes() {
        assert!(ImageGeometry::new(0.0, 100.0).is_none());
        assert!(ImageGeometry::new(100.0, f64::NAN).is_none());
        assert!(ContainerGeometry::new(-1.0, 100.0).is_none());
        assert!(ContainerGeometry::new(100.0, f64::INFINITY).is_none());
    }

    #[test]
    fn wide_image_is_letterboxed() {
        let layout = compute_layout(image(1000.0, 500.0), container(400.0, 400.0));
        assert_eq!(layout.painted_width, 400.0);
        assert_eq!(layout.painted_height, 200.0);
        assert_eq!(layout.x_offset, 0.0);
        assert_eq!(layout.y_offset, 100.0);
        assert_eq!(layout.x_scale, 0.4);
        assert_eq!(layout.y_scale, 0.4);
    }

    #[test]
    fn tall_image_is_pillarboxed() {
        let layout = compute_layout(image(500.0, 1000.0), container(400.0, 400.0));
        assert_eq!(layout.painted_width, 200.0);
        assert_eq!(layout.painted_height, 400.0);
        assert_eq!(layout.x_offset, 100.0);
        assert_eq!(layout.y_offset, 0.0);
    }

    #[test]
    fn equal_aspect_fills_container() {
        let layout = compute_layout(image(800.0, 600.0), container(400.0, 300.0));
        assert_eq!(layout.x_offset, 0.0);
        assert_eq!(layout.y_offset, 0.0);
        assert_eq!(layout.x_scale, 0.5);
        assert_eq!(layout.y_scale, 0.5);
    }

    #[test]
    fn scales_and_offsets_are_rounded() {
        let layout = compute_layout(image(3.0, 7.0), container(10.0, 10.0));
        assert_eq!(layout.x_scale, round_to(layout.x_scale, LAYOUT_PRECISION));
        assert_eq!(layout.x_offset, round_to(layout.x_offset, LAYOUT_PRECISION));
        assert_eq!(layout.x_scale, 1.4286);
    }

    #[test]
    fn projects_region_with_offsets() {
        let layout = compute_layout(image(1000.0, 500.0), container(400.0, 400.0));
        let region = AnswerRegion {
            index: 0,
            coords: RegionCoords { x: 100.0, y: 50.0, w: 200.0, h: 100.0 },
        };
        let scaled = project_region(&region, &layout);
        assert_eq!(
            scaled,
            ScaledRegion { left: 40.0, top: 120.0, width: 80.0, height: 40.0 }
        );
        assert!(scaled.contains(60.0, 130.0));
        assert!(!scaled.contains(10.0, 130.0));
    }

    #[test]
    fn projection_rounds_to_hundredths() {
        let layout = Layout {
            x_scale: 0.3333,
            y_scale: 0.3333,
            x_offset: 0.0,
            y_offset: 10.0,
            painted_width: 100.0,
            painted_height: 100.0,
        };
        let region = AnswerRegion {
            index: 3,
            coords: RegionCoords { x: 10.0, y: 10.0, w: 7.0, h: 7.0 },
        };
        let scaled = project_region(&region, &layout);
        assert_eq!(scaled.left, 3.33);
        assert_eq!(scaled.top, 13.33);
        assert_eq!(scaled.width, 2.33);
    }

    #[test]
    fn region_validation() {
        assert!(RegionCoords { x: 0.0, y: 0.0, w: 1.0, h: 1.0 }.is_valid());
        assert!(!RegionCoords { x: 0.0, y: 0.0, w: -1.0, h: 1.0 }.is_valid());
        assert!(!RegionCoords { x: f64::NAN, y: 0.0, w: 1.0, h: 1.0 }.is_valid());
    }
}
