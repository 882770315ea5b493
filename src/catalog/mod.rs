//! # Star and constellation catalog
//!
//! Records describing the static part of a chart: the stars drawn as dots with a note,
//! the constellation anchors drawn as upper-case labels, and the line art joining stars.
//!
//! ## Overview
//! -----------------
//! * [`Star`] – a named star with its display note.
//! * [`Constellation`] – a named anchor for a constellation label.
//! * [`Link`] – an ordered polyline of star references; references to unknown stars are
//!   kept as holes so the line art survives an incomplete catalog.
//! * [`Catalog`] – everything parsed out of one catalog file, built by
//!   [`catalog_reader::parse_catalog`].
//!
//! Records are immutable once parsed. Stars are shared through [`Arc`] between the visible
//! star list and the links that reference them.
use std::{collections::HashSet, sync::Arc};

use smallvec::SmallVec;

use crate::celestial_coord::{CelestialCoord, Positioned};

pub mod catalog_reader;

/// Prefix marking a star row as an annotation rather than a visible star.
pub const COMMENT_PREFIX: char = '#';

/// A catalog star.
///
/// Fields
/// -----------------
/// * `name` – Identifier used by link rows.
/// * `coord` – Position, arcseconds.
/// * `note` – Free text rendered next to the star dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub name: String,
    pub coord: CelestialCoord,
    pub note: String,
}

impl Star {
    /// Annotation rows (`#name`) are resolvable by links but never drawn as stars.
    pub fn is_comment(&self) -> bool {
        self.name.starts_with(COMMENT_PREFIX)
    }
}

impl Positioned for Star {
    fn coord(&self) -> CelestialCoord {
        self.coord
    }
}

/// Anchor of a constellation label.
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    pub name: String,
    pub coord: CelestialCoord,
}

impl Constellation {
    /// Text drawn on the chart for this constellation.
    pub fn label(&self) -> String {
        self.name.to_uppercase()
    }
}

impl Positioned for Constellation {
    fn coord(&self) -> CelestialCoord {
        self.coord
    }
}

/// One endpoint of a link: `None` when the star name did not resolve.
pub type LinkEndpoint = Option<Arc<Star>>;

/// Polyline of star references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Link {
    endpoints: SmallVec<[LinkEndpoint; 8]>,
}

impl Link {
    pub fn new(endpoints: impl IntoIterator<Item = LinkEndpoint>) -> Self {
        Link {
            endpoints: endpoints.into_iter().collect(),
        }
    }

    pub fn endpoints(&self) -> &[LinkEndpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Number of endpoints whose star name did not resolve.
    pub fn missing_count(&self) -> usize {
        self.endpoints.iter().filter(|e| e.is_none()).count()
    }

    /// Drawable pieces of the polyline.
    ///
    /// A missing endpoint breaks the line: the stars on either side are not joined
    /// across the hole. Pieces holding a single star draw nothing and are dropped.
    ///
    /// Return
    /// ----------
    /// * One `Vec` per contiguous run of at least two resolved stars, in link order.
    pub fn resolved_runs(&self) -> Vec<Vec<&Star>> {
        self.endpoints
            .split(|e| e.is_none())
            .filter(|run| run.len() >= 2)
            .map(|run| run.iter().flatten().map(|s| &**s).collect())
            .collect()
    }
}

/// Everything parsed out of a catalog file.
///
/// Fields
/// -----------------
/// * `stars` – Visible stars in file order (annotation rows excluded).
/// * `links` – Line art, in file order.
/// * `constellations` – Constellation anchors kept by the membership set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub stars: Vec<Arc<Star>>,
    pub links: Vec<Link>,
    pub constellations: Vec<Constellation>,
}

impl Catalog {
    /// Parse catalog text, keeping only the constellations named in `membership`.
    ///
    /// See also
    /// ------------
    /// * [`catalog_reader::parse_catalog`] – the underlying row state machine.
    pub fn parse(
        text: &str,
        membership: &HashSet<String>,
    ) -> Result<Self, catalog_reader::ParseCatalogError> {
        catalog_reader::parse_catalog(text, membership)
    }

    /// Look up a visible star by name.
    pub fn star(&self, name: &str) -> Option<&Arc<Star>> {
        self.stars.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    fn star(name: &str, ra: f64) -> Arc<Star> {
        Arc::new(Star {
            name: name.into(),
            coord: CelestialCoord::new(ra, 0.0),
            note: String::new(),
        })
    }

    #[test]
    fn test_resolved_runs_skip_holes() {
        let link = Link::new([
            Some(star("A", 1.0)),
            Some(star("B", 2.0)),
            None,
            Some(star("C", 3.0)),
            Some(star("D", 4.0)),
            Some(star("E", 5.0)),
        ]);
        let runs = link.resolved_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0].iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            ["A", "B"]
        );
        assert_eq!(
            runs[1].iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            ["C", "D", "E"]
        );
        assert_eq!(link.missing_count(), 1);
    }

    #[test]
    fn test_resolved_runs_drop_singletons() {
        let link = Link::new([Some(star("A", 1.0)), None, Some(star("B", 2.0)), None]);
        assert!(link.resolved_runs().is_empty());

        let link = Link::new([None, None]);
        assert!(link.resolved_runs().is_empty());
        assert_eq!(link.missing_count(), 2);
    }

    #[test]
    fn test_comment_star_and_label() {
        assert!(star("#x", 0.0).is_comment());
        assert!(!star("x", 0.0).is_comment());
        let c = Constellation {
            name: "Ori".into(),
            coord: CelestialCoord::default(),
        };
        assert_eq!(c.label(), "ORI");
    }
}
