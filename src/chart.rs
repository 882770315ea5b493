//! # Star chart
//!
//! [`StarChart`] ties the pieces together: it parses the catalog and the ephemeris
//! tables, computes the projection once, draws the static scene on a [`Canvas`] and
//! builds the [`AnimationLoop`] moving the body markers.
//!
//! ## Drawing order
//! -----------------
//! Back to front:
//! 1. constellation line art (lightblue, width 1),
//! 2. constellation labels (upper case),
//! 3. star notes (grey, offset `(5, 5)`) and star dots (white, `r = 3`),
//! 4. the dashed trail of the primary body,
//! 5. the time label, anchored middle at `(width − 60, height − 20)`,
//! 6. one marker per body, in planet order, so the primary body sits under the others.
//!
//! ## Example
//!
//! ```rust, no_run
//! use starpath::{chart::StarChart, config::ChartConfig, loader::load_sources};
//! use camino::Utf8Path;
//!
//! # async fn run() -> Result<(), starpath::starpath_errors::StarpathError> {
//! let config = ChartConfig::from_file(Utf8Path::new("chart.json"))?;
//! let sources = load_sources(&config, Utf8Path::new(".")).await?;
//! let chart = StarChart::from_sources(config, &sources)?;
//! std::fs::write("chart.svg", chart.snapshot_svg(0.5)?)?;
//! # Ok(())
//! # }
//! ```
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::{
    animation::{
        animation_loop::{AnimationLoop, AnimationTiming},
        Frame, FrameComposer, FrameSink, PRIMARY_BODY,
    },
    catalog::Catalog,
    config::ChartConfig,
    constants::{
        Ratio, CONSTELLATION_COLOR, LINK_COLOR, STAR_COLOR, STAR_LABEL_COLOR,
        STAR_LABEL_OFFSET, STAR_RADIUS, TIME_LABEL_COLOR, TIME_LABEL_INSET, TRAIL_COLOR,
        TRAIL_DASH,
    },
    ephemeris::EphemerisTrack,
    loader::ChartSources,
    projection::{Projection, ScreenPoint, Viewport, ViewportDomain},
    render::{
        split_runs, svg_canvas::SvgCanvas, Canvas, LabelId, MarkerId, Stroke, TextAnchor,
        TextStyle,
    },
    starpath_errors::StarpathError,
    style::MarkerStyle,
    view::{PixelSize, ViewHandle},
};

/// Width of the line art and of the trail.
const LINE_WIDTH: f64 = 1.0;

/// Ids of the elements a frame updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandles {
    pub time_label: LabelId,
    /// One marker per body, in planet order.
    pub markers: Vec<MarkerId>,
}

/// Parsed and projected chart, ready to draw and animate.
#[derive(Debug, Clone)]
pub struct StarChart {
    config: ChartConfig,
    catalog: Catalog,
    composer: Arc<FrameComposer>,
    styles: Vec<MarkerStyle>,
    timing: AnimationTiming,
}

impl StarChart {
    /// Build a chart from its configuration and the texts of its sources.
    ///
    /// Arguments
    /// -----------------
    /// * `config` – Chart configuration, validated again here.
    /// * `catalog_text` – Content of the catalog file.
    /// * `ephemerides` – One ephemeris text per planet, in configuration order.
    ///
    /// Return
    /// ----------
    /// * The chart, or:
    ///   - [`StarpathError::InvalidConfig`] for an invalid configuration or when nothing
    ///     finite is left to frame,
    ///   - [`StarpathError::EphemerisCountMismatch`] when texts and planets differ in number,
    ///   - [`StarpathError::ParsingCatalogError`] for a malformed catalog row,
    ///   - [`StarpathError::EmptyEphemeris`] for an ephemeris without samples.
    pub fn build(
        config: ChartConfig,
        catalog_text: &str,
        ephemerides: &[String],
    ) -> Result<Self, StarpathError> {
        config.validate()?;
        let timing = AnimationTiming::from_config(&config)?;
        if ephemerides.len() != config.planets.len() {
            return Err(StarpathError::EphemerisCountMismatch {
                expected: config.planets.len(),
                found: ephemerides.len(),
            });
        }

        let catalog = Catalog::parse(catalog_text, &config.stars.membership())?;
        let tracks = ephemerides
            .iter()
            .enumerate()
            .map(|(body, text)| EphemerisTrack::parse(body, text))
            .collect::<Result<Vec<_>, _>>()?;
        for (planet, track) in config.planets.iter().zip(&tracks) {
            let broken = track.non_finite_count();
            if broken > 0 {
                warn!(
                    "{}: {broken} of {} samples have no usable coordinates, their frames leave the marker in place",
                    planet.src,
                    track.len()
                );
            }
        }

        let offset = config.offset.ra;
        let framed = catalog
            .stars
            .iter()
            .map(|star| star.coord)
            .chain(tracks[PRIMARY_BODY].iter().map(|sample| sample.coord));
        let domain = ViewportDomain::from_coords(framed, offset).ok_or_else(|| {
            StarpathError::InvalidConfig(
                "no star nor primary sample has finite coordinates".to_string(),
            )
        })?;
        let projection = Projection::new(domain, &Viewport::from_config(&config), offset);
        info!(
            "chart built: {} stars, {} links, {} constellations, {} bodies",
            catalog.stars.len(),
            catalog.links.len(),
            catalog.constellations.len(),
            tracks.len()
        );
        debug!("viewport domain: {domain:?}");

        let styles = config
            .planets
            .iter()
            .map(|planet| planet.style.marker_style())
            .collect();
        Ok(StarChart {
            config,
            catalog,
            composer: Arc::new(FrameComposer::new(projection, tracks)?),
            styles,
            timing,
        })
    }

    /// Build a chart from loaded sources.
    ///
    /// See also
    /// ------------
    /// * [`crate::loader::load_sources`] – reads the sources named by the configuration.
    pub fn from_sources(config: ChartConfig, sources: &ChartSources) -> Result<Self, StarpathError> {
        StarChart::build(config, &sources.catalog, &sources.ephemerides)
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn projection(&self) -> &Projection {
        self.composer.projection()
    }

    /// Cycle length and frame pacing, checked when the chart was built.
    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    pub fn composer(&self) -> &Arc<FrameComposer> {
        &self.composer
    }

    pub fn tracks(&self) -> &[EphemerisTrack] {
        self.composer.tracks()
    }

    /// Configured size, the drawing coordinate system of the chart.
    pub fn view_size(&self) -> PixelSize {
        PixelSize::new(self.config.width, self.config.height)
    }

    /// A resize handle keeping the configured aspect ratio.
    pub fn view_handle(&self) -> Result<ViewHandle, StarpathError> {
        ViewHandle::new(self.view_size())
    }

    /// Frame shown at `ratio` of the first cycle.
    pub fn frame_at(&self, ratio: Ratio) -> Frame {
        self.composer.compose(0, ratio)
    }

    /// Draw the static scene and the markers at the start of a cycle.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> ChartHandles {
        let projection = self.projection();
        let font = &self.config.font;

        let link_stroke = Stroke::solid(LINK_COLOR, LINE_WIDTH);
        for link in &self.catalog.links {
            for run in link.resolved_runs() {
                for points in split_runs(run.iter().map(|star| projection.project_finite(*star))) {
                    canvas.add_polyline(&points, &link_stroke);
                }
            }
        }

        let constellation_style = TextStyle::new(CONSTELLATION_COLOR, &font.constellation);
        for constellation in &self.catalog.constellations {
            canvas.add_label(
                projection.project(constellation),
                &constellation.label(),
                &constellation_style,
            );
        }

        let note_style = TextStyle::new(STAR_LABEL_COLOR, &font.star)
            .with_offset(STAR_LABEL_OFFSET.0, STAR_LABEL_OFFSET.1);
        let star_style = MarkerStyle::new(STAR_RADIUS, STAR_COLOR);
        for star in &self.catalog.stars {
            let at = projection.project(&**star);
            canvas.add_label(at, &star.note, &note_style);
            canvas.add_marker(at, &star_style);
        }

        let trail_stroke = Stroke::dashed(TRAIL_COLOR, LINE_WIDTH, TRAIL_DASH);
        let primary = self.composer.primary();
        for points in split_runs(primary.iter().map(|sample| projection.project_finite(sample))) {
            canvas.add_polyline(&points, &trail_stroke);
        }

        let first = self.frame_at(0.0);
        let time_style = TextStyle::new(TIME_LABEL_COLOR, &font.time).with_anchor(TextAnchor::Middle);
        let time_label = canvas.add_label(
            ScreenPoint::new(
                self.config.width - TIME_LABEL_INSET.0,
                self.config.height - TIME_LABEL_INSET.1,
            ),
            &first.time_label,
            &time_style,
        );

        let markers = first
            .positions
            .iter()
            .zip(&self.styles)
            .map(|(position, style)| {
                canvas.add_marker((*position).unwrap_or_else(ScreenPoint::origin), style)
            })
            .collect();

        ChartHandles {
            time_label,
            markers,
        }
    }

    /// Render the chart as an SVG document with the bodies at `ratio`.
    pub fn snapshot_svg(&self, ratio: Ratio) -> Result<String, StarpathError> {
        let mut canvas = SvgCanvas::new(self.view_size());
        let handles = self.draw(&mut canvas);
        let mut sink = ChartSink::new(canvas, handles);
        sink.apply_frame(&self.frame_at(ratio))?;
        sink.canvas().to_svg_string()
    }

    /// Draw the chart on `canvas` and wrap it in an idle animation loop.
    ///
    /// Arguments
    /// -----------------
    /// * `canvas` – Surface to draw on, moved into the loop.
    /// * `view` – Optional resize handle; the canvas follows its sizes.
    pub fn animation_loop<C>(&self, mut canvas: C, view: Option<&ViewHandle>) -> AnimationLoop<ChartSink<C>>
    where
        C: Canvas + Send + 'static,
    {
        let handles = self.draw(&mut canvas);
        let mut sink = ChartSink::new(canvas, handles);
        if let Some(view) = view {
            sink = sink.with_resize(view.subscribe());
        }
        AnimationLoop::new(
            Arc::clone(&self.composer),
            sink,
            self.timing,
        )
    }
}

/// [`FrameSink`] applying frames to a drawn chart.
#[derive(Debug)]
pub struct ChartSink<C> {
    canvas: C,
    handles: ChartHandles,
    resize: Option<watch::Receiver<PixelSize>>,
    time_label: Option<String>,
    completed_cycles: u64,
}

impl<C: Canvas> ChartSink<C> {
    pub fn new(canvas: C, handles: ChartHandles) -> Self {
        ChartSink {
            canvas,
            handles,
            resize: None,
            time_label: None,
            completed_cycles: 0,
        }
    }

    /// Follow the sizes published on `resize` before each frame.
    pub fn with_resize(mut self, resize: watch::Receiver<PixelSize>) -> Self {
        self.resize = Some(resize);
        self
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn handles(&self) -> &ChartHandles {
        &self.handles
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    fn follow_resize(&mut self) {
        let Some(resize) = &mut self.resize else {
            return;
        };
        match resize.has_changed() {
            Ok(true) => {
                let size = *resize.borrow_and_update();
                self.canvas.resize(size);
            }
            Ok(false) => {}
            // the view handle is gone, keep the last size
            Err(_) => self.resize = None,
        }
    }
}

impl<C: Canvas + Send + 'static> FrameSink for ChartSink<C> {
    fn apply_frame(&mut self, frame: &Frame) -> Result<(), StarpathError> {
        self.follow_resize();

        if self.time_label.as_deref() != Some(frame.time_label.as_str()) {
            self.canvas.set_text(self.handles.time_label, &frame.time_label)?;
            debug!("time label: {}", frame.time_label);
            self.time_label = Some(frame.time_label.clone());
        }

        for (marker, position) in self.handles.markers.iter().zip(&frame.positions) {
            if let Some(position) = position {
                self.canvas.move_marker(*marker, *position)?;
            }
        }
        Ok(())
    }

    fn cycle_completed(&mut self, _cycle: u64) {
        self.completed_cycles += 1;
    }
}
