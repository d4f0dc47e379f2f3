//! Freezes the first computed layout so that resize callbacks reporting
//! sub-pixel container changes do not cause reflow churn.

use crate::geometry::{compute_layout, ContainerGeometry, ImageGeometry, Layout};

/// Default per-axis container tolerance, in screen pixels.
pub const DEFAULT_JITTER_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
struct Locked {
    image: ImageGeometry,
    container: ContainerGeometry,
    layout: Layout,
}

/// Caller-owned lock around [`compute_layout`].
///
/// Reset it whenever the image source changes.
#[derive(Debug, Clone)]
pub struct LayoutLock {
    locked: Option<Locked>,
    tolerance: f64,
}

impl Default for LayoutLock {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_TOLERANCE)
    }
}

impl LayoutLock {
    pub fn new(tolerance: f64) -> Self {
        let tolerance = if tolerance.is_finite() && tolerance >= 0.0 {
            tolerance
        } else {
            DEFAULT_JITTER_TOLERANCE
        };
        Self {
            locked: None,
            tolerance,
        }
    }

    /// Return the locked layout if `container` is within tolerance of the
    /// locked container for the same image; otherwise compute and re-lock.
    ///
    /// The second element is `true` when a new layout was computed.
    pub fn resolve(&mut self, image: ImageGeometry, container: ContainerGeometry) -> (Layout, bool) {
        if let Some(locked) = &self.locked {
            if locked.image == image && locked.container.is_close_to(&container, self.tolerance) {
                return (locked.layout, false);
            }
        }

        let layout = compute_layout(image, container);
        log::debug!(
            "layout locked: container {:.3}x{:.3}, painted {:.3}x{:.3}",
            container.width(),
            container.height(),
            layout.painted_width,
            layout.painted_height
        );
        self.locked = Some(Locked {
            image,
            container,
            layout,
        });
        (layout, true)
    }

    pub fn reset(&mut self) {
        self.locked = None;
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Container size frozen by the current lock.
    pub fn locked_container(&self) -> Option<ContainerGeometry> {
        self.locked.map(|l| l.container)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
