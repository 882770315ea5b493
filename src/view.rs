//! # On-screen size of a chart
//!
//! A chart draws in a fixed coordinate system (the configured `width × height`); only
//! the size it occupies on screen changes. [`ViewHandle`] owns that size for one chart:
//! a resize keeps the configured aspect ratio, and every canvas subscribed through
//! [`ViewHandle::subscribe`] sees the new size.
//!
//! The handle lives as long as the chart that created it. Disposing of it (or dropping
//! it) closes the channel; subscribers then keep the last size they saw.
use log::{debug, warn};
use tokio::sync::watch;

use crate::{constants::Pixel, starpath_errors::StarpathError};

/// Size of a chart on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSize {
    pub width: Pixel,
    pub height: Pixel,
}

impl PixelSize {
    pub fn new(width: Pixel, height: Pixel) -> Self {
        PixelSize { width, height }
    }
}

/// Resize entry point of one chart.
#[derive(Debug)]
pub struct ViewHandle {
    aspect_ratio: f64,
    size: watch::Sender<PixelSize>,
}

impl ViewHandle {
    /// Arguments
    /// -----------------
    /// * `initial` – Starting on-screen size, usually the configured one.
    ///
    /// Return
    /// ----------
    /// * A handle keeping `initial.width / initial.height` on every resize, or
    ///   [`StarpathError::InvalidConfig`] for a non-positive size.
    pub fn new(initial: PixelSize) -> Result<Self, StarpathError> {
        let aspect_ratio = initial.width / initial.height;
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(StarpathError::InvalidConfig(format!(
                "view size {}x{} has no usable aspect ratio",
                initial.width, initial.height
            )));
        }
        let (size, _) = watch::channel(initial);
        Ok(ViewHandle { aspect_ratio, size })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Last published size.
    pub fn current(&self) -> PixelSize {
        *self.size.borrow()
    }

    /// Fit the chart to a new container width.
    ///
    /// Return
    /// ----------
    /// * The published size, its height being `round(width / aspect_ratio)`. A width that
    ///   is not a positive finite number, or whose height rounds to zero, is ignored and
    ///   the current size is returned unchanged.
    pub fn resize(&self, width: Pixel) -> PixelSize {
        let size = PixelSize::new(width, (width / self.aspect_ratio).round());
        if !(width.is_finite() && width > 0.0 && size.height > 0.0) {
            warn!("view resize to width {width} ignored, size stays {:?}", self.current());
            return self.current();
        }
        self.size.send_replace(size);
        debug!("view resized to {}x{}", size.width, size.height);
        size
    }

    /// Receiver of every later size change.
    pub fn subscribe(&self) -> watch::Receiver<PixelSize> {
        self.size.subscribe()
    }

    /// Stop publishing sizes.
    pub fn dispose(self) {}
}
