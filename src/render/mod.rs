//! # Drawing surface
//!
//! The chart never talks to a concrete renderer; it draws through the [`Canvas`] trait.
//! Static elements (links, labels, star dots, the trail) are added once; markers and
//! labels hand back an id so the animation can update them frame after frame.
//!
//! ## Overview
//! -----------------
//! * [`Canvas`] – polylines, text labels, circular markers; `move_marker` / `set_text`
//!   for per-frame updates and `resize` for the view size.
//! * [`svg_canvas::SvgCanvas`] – in-memory SVG document serialized with `quick-xml`.
//! * [`frame_export::export_frames`] – writes one SVG snapshot per frame of a cycle.
//! * [`split_runs`] – cuts a point sequence at its gaps so broken data never draws a
//!   segment across the sky.
use crate::{
    constants::Pixel,
    projection::ScreenPoint,
    starpath_errors::StarpathError,
    style::MarkerStyle,
    view::PixelSize,
};

pub mod frame_export;
#[cfg(feature = "progress")]
pub(crate) mod progress_bar;
pub mod svg_canvas;

/// Handle of a marker added to a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

/// Handle of a text label added to a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub usize);

/// Line appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: Pixel,
    /// SVG dash array, solid line when `None`.
    pub dash: Option<String>,
}

impl Stroke {
    pub fn solid(color: &str, width: Pixel) -> Self {
        Stroke {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &str, width: Pixel, dash: &str) -> Self {
        Stroke {
            dash: Some(dash.to_string()),
            ..Stroke::solid(color, width)
        }
    }
}

/// Horizontal alignment of a label on its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Label appearance.
///
/// Fields
/// -----------------
/// * `fill` – Text color.
/// * `css` – Inline style (font family and size).
/// * `anchor` – Alignment on the anchor point.
/// * `offset` – Shift applied to the anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub fill: String,
    pub css: String,
    pub anchor: TextAnchor,
    pub offset: (Pixel, Pixel),
}

impl TextStyle {
    pub fn new(fill: &str, css: &str) -> Self {
        TextStyle {
            fill: fill.to_string(),
            css: css.to_string(),
            anchor: TextAnchor::Start,
            offset: (0.0, 0.0),
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_offset(mut self, dx: Pixel, dy: Pixel) -> Self {
        self.offset = (dx, dy);
        self
    }
}

/// Rendering backend of a chart.
pub trait Canvas {
    /// Draw a static line through `points`.
    fn add_polyline(&mut self, points: &[ScreenPoint], stroke: &Stroke);

    /// Add a text label anchored at `at`.
    fn add_label(&mut self, at: ScreenPoint, text: &str, style: &TextStyle) -> LabelId;

    /// Add a filled circle centered on `center`.
    fn add_marker(&mut self, center: ScreenPoint, style: &MarkerStyle) -> MarkerId;

    /// Move a marker so that its center lands on `to`.
    fn move_marker(&mut self, id: MarkerId, to: ScreenPoint) -> Result<(), StarpathError>;

    /// Replace the text of a label.
    fn set_text(&mut self, id: LabelId, text: &str) -> Result<(), StarpathError>;

    /// Follow a change of the on-screen size. The drawing coordinates do not change.
    fn resize(&mut self, _size: PixelSize) {}
}

/// Split a sequence of optional points into the runs of consecutive points.
///
/// Return
/// ----------
/// * Every maximal run of `Some` points holding at least two points; a single point
///   cannot draw a line.
pub fn split_runs<I>(points: I) -> Vec<Vec<ScreenPoint>>
where
    I: IntoIterator<Item = Option<ScreenPoint>>,
{
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(p),
            None => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}
