//! # SVG rendering backend
//!
//! [`SvgCanvas`] keeps the scene as a list of elements and serializes it on demand with
//! the `quick-xml` event writer. The document has:
//!
//! * a `viewBox` of the configured chart size, `preserveAspectRatio="xMinYMin"` and a
//!   black background,
//! * `width` / `height` attributes following the last size given to [`Canvas::resize`],
//! * one `<path>` per polyline (`M x,y L x,y …`), one `<text>` per label and one
//!   `<circle>` per marker. Markers are drawn at the origin and placed with
//!   `transform="translate(x,y)"`, so a move rewrites a single attribute.
use std::fmt::Display;

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{
    constants::BACKGROUND_COLOR,
    projection::ScreenPoint,
    render::{Canvas, LabelId, MarkerId, Stroke, TextStyle},
    starpath_errors::StarpathError,
    style::MarkerStyle,
    view::PixelSize,
};

#[derive(Debug, Clone, PartialEq)]
enum SvgElement {
    Path {
        points: Vec<ScreenPoint>,
        stroke: Stroke,
    },
    Text {
        at: ScreenPoint,
        text: String,
        style: TextStyle,
    },
    Circle {
        translate: ScreenPoint,
        style: MarkerStyle,
    },
}

/// In-memory SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    view_box: PixelSize,
    size: PixelSize,
    elements: Vec<SvgElement>,
    markers: Vec<usize>,
    labels: Vec<usize>,
}

fn svg_err<E: Display>(err: E) -> StarpathError {
    StarpathError::SvgWriteError(err.to_string())
}

fn path_data(points: &[ScreenPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}{},{}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl SvgCanvas {
    /// Arguments
    /// -----------------
    /// * `view_box` – Drawing coordinate system, also the initial on-screen size.
    pub fn new(view_box: PixelSize) -> Self {
        SvgCanvas {
            view_box,
            size: view_box,
            elements: Vec::new(),
            markers: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn view_box(&self) -> PixelSize {
        self.view_box
    }

    /// On-screen size written in the `width` / `height` attributes.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Number of drawn elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Current translation of a marker.
    pub fn marker_translation(&self, id: MarkerId) -> Option<ScreenPoint> {
        match self.elements.get(*self.markers.get(id.0)?)? {
            SvgElement::Circle { translate, .. } => Some(*translate),
            _ => None,
        }
    }

    /// Current text of a label.
    pub fn label_text(&self, id: LabelId) -> Option<&str> {
        match self.elements.get(*self.labels.get(id.0)?)? {
            SvgElement::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    fn write_element<W: std::io::Write>(
        writer: &mut Writer<W>,
        element: &SvgElement,
    ) -> Result<(), StarpathError> {
        match element {
            SvgElement::Path { points, stroke } => {
                let mut path = BytesStart::new("path");
                path.push_attribute(("d", path_data(points).as_str()));
                path.push_attribute(("fill", "none"));
                path.push_attribute(("stroke", stroke.color.as_str()));
                path.push_attribute(("stroke-width", stroke.width.to_string().as_str()));
                if let Some(dash) = &stroke.dash {
                    path.push_attribute(("stroke-dasharray", dash.as_str()));
                }
                writer.write_event(Event::Empty(path)).map_err(svg_err)?;
            }
            SvgElement::Text { at, text, style } => {
                let mut elem = BytesStart::new("text");
                elem.push_attribute(("x", (at.x + style.offset.0).to_string().as_str()));
                elem.push_attribute(("y", (at.y + style.offset.1).to_string().as_str()));
                elem.push_attribute(("fill", style.fill.as_str()));
                elem.push_attribute(("text-anchor", style.anchor.as_str()));
                if !style.css.is_empty() {
                    elem.push_attribute(("style", style.css.as_str()));
                }
                writer.write_event(Event::Start(elem)).map_err(svg_err)?;
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(svg_err)?;
                writer
                    .write_event(Event::End(BytesEnd::new("text")))
                    .map_err(svg_err)?;
            }
            SvgElement::Circle { translate, style } => {
                let mut circle = BytesStart::new("circle");
                circle.push_attribute(("r", style.radius.to_string().as_str()));
                circle.push_attribute(("fill", style.fill.as_str()));
                circle.push_attribute((
                    "transform",
                    format!("translate({},{})", translate.x, translate.y).as_str(),
                ));
                writer.write_event(Event::Empty(circle)).map_err(svg_err)?;
            }
        }
        Ok(())
    }

    /// Serialize the scene into a standalone SVG document.
    pub fn to_svg_string(&self) -> Result<String, StarpathError> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute((
            "viewBox",
            format!("0 0 {} {}", self.view_box.width, self.view_box.height).as_str(),
        ));
        svg.push_attribute(("width", self.size.width.to_string().as_str()));
        svg.push_attribute(("height", self.size.height.to_string().as_str()));
        svg.push_attribute(("preserveAspectRatio", "xMinYMin"));
        svg.push_attribute((
            "style",
            format!("background-color: {BACKGROUND_COLOR}").as_str(),
        ));
        writer.write_event(Event::Start(svg)).map_err(svg_err)?;

        for element in &self.elements {
            Self::write_element(&mut writer, element)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(svg_err)?;
        String::from_utf8(buffer).map_err(svg_err)
    }
}

impl Canvas for SvgCanvas {
    fn add_polyline(&mut self, points: &[ScreenPoint], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        self.elements.push(SvgElement::Path {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn add_label(&mut self, at: ScreenPoint, text: &str, style: &TextStyle) -> LabelId {
        self.labels.push(self.elements.len());
        self.elements.push(SvgElement::Text {
            at,
            text: text.to_string(),
            style: style.clone(),
        });
        LabelId(self.labels.len() - 1)
    }

    fn add_marker(&mut self, center: ScreenPoint, style: &MarkerStyle) -> MarkerId {
        self.markers.push(self.elements.len());
        self.elements.push(SvgElement::Circle {
            translate: center,
            style: style.clone(),
        });
        MarkerId(self.markers.len() - 1)
    }

    fn move_marker(&mut self, id: MarkerId, to: ScreenPoint) -> Result<(), StarpathError> {
        let index = self
            .markers
            .get(id.0)
            .copied()
            .ok_or(StarpathError::UnknownMarker(id.0))?;
        match self.elements.get_mut(index) {
            Some(SvgElement::Circle { translate, .. }) => {
                *translate = to;
                Ok(())
            }
            _ => Err(StarpathError::UnknownMarker(id.0)),
        }
    }

    fn set_text(&mut self, id: LabelId, text: &str) -> Result<(), StarpathError> {
        let index = self
            .labels
            .get(id.0)
            .copied()
            .ok_or(StarpathError::UnknownLabel(id.0))?;
        match self.elements.get_mut(index) {
            Some(SvgElement::Text { text: current, .. }) => {
                current.clear();
                current.push_str(text);
                Ok(())
            }
            _ => Err(StarpathError::UnknownLabel(id.0)),
        }
    }

    fn resize(&mut self, size: PixelSize) {
        self.size = size;
    }
}

#[cfg(test)]
mod svg_canvas_test {
    use super::*;
    use crate::render::TextAnchor;

    fn canvas() -> SvgCanvas {
        SvgCanvas::new(PixelSize::new(800.0, 400.0))
    }

    #[test]
    fn test_document_root() {
        let svg = canvas().to_svg_string().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 400""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMinYMin""#));
        assert!(svg.contains(r#"style="background-color: black""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_polyline() {
        let mut c = canvas();
        c.add_polyline(&[ScreenPoint::new(10.0, 20.0)], &Stroke::solid("red", 1.0));
        assert!(c.is_empty());

        c.add_polyline(
            &[
                ScreenPoint::new(10.0, 20.0),
                ScreenPoint::new(30.5, 40.0),
                ScreenPoint::new(50.0, 60.0),
            ],
            &Stroke::dashed("white", 1.0, "5 3"),
        );
        let svg = c.to_svg_string().unwrap();
        assert!(svg.contains(r#"d="M10,20 L30.5,40 L50,60""#));
        assert!(svg.contains(r#"stroke-dasharray="5 3""#));
        assert!(svg.contains(r#"fill="none""#));
    }

    #[test]
    fn test_marker_moves() {
        let mut c = canvas();
        let id = c.add_marker(ScreenPoint::new(1.0, 2.0), &MarkerStyle::new(5.0, "red"));
        assert_eq!(c.marker_translation(id), Some(ScreenPoint::new(1.0, 2.0)));

        c.move_marker(id, ScreenPoint::new(100.0, 50.5)).unwrap();
        assert_eq!(c.marker_translation(id), Some(ScreenPoint::new(100.0, 50.5)));
        let svg = c.to_svg_string().unwrap();
        assert!(svg.contains(r#"transform="translate(100,50.5)""#));
        assert!(svg.contains(r#"r="5""#));

        assert_eq!(
            c.move_marker(MarkerId(3), ScreenPoint::origin()),
            Err(StarpathError::UnknownMarker(3))
        );
    }

    #[test]
    fn test_label_text() {
        let mut c = canvas();
        let style = TextStyle::new("white", "font-size: 90%;")
            .with_anchor(TextAnchor::Middle)
            .with_offset(5.0, 5.0);
        let id = c.add_label(ScreenPoint::new(10.0, 10.0), "2024-01-01", &style);
        c.set_text(id, "2024-01-02 & after").unwrap();
        assert_eq!(c.label_text(id), Some("2024-01-02 & after"));

        let svg = c.to_svg_string().unwrap();
        assert!(svg.contains(r#"x="15""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains("2024-01-02 &amp; after"));

        assert_eq!(c.set_text(LabelId(9), "x"), Err(StarpathError::UnknownLabel(9)));
    }

    #[test]
    fn test_resize_changes_only_size() {
        let mut c = canvas();
        c.resize(PixelSize::new(400.0, 200.0));
        assert_eq!(c.size(), PixelSize::new(400.0, 200.0));
        let svg = c.to_svg_string().unwrap();
        assert!(svg.contains(r#"width="400""#));
        assert!(svg.contains(r#"viewBox="0 0 800 400""#));
    }
}
