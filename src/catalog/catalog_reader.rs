//! # Tab-separated catalog reader
//!
//! Turns the hand-authored star catalog into a [`Catalog`].
//!
//! ## File layout
//! -----------------
//! A catalog is a sequence of blocks separated by blank lines. Each block reads:
//!
//! ```text
//! ORI    5 35 0    5 0 0                 <- constellation rows (name, ra, dec)
//! ---                                    <- separator
//! Betelgeuse  5 55 10  7 24 25  α Ori    <- star rows (name, ra, dec, note)
//! #belt       5 36 0   -1 12 0           <- annotation row: link endpoint only
//! ---
//! Betelgeuse  Bellatrix  Mintaka         <- link rows (ordered star names)
//! ```
//!
//! Right ascension fields are `H M S` and are scaled by 15 into arcseconds of arc;
//! declination fields are `D M S`. Both go through [`from_base60`](crate::conversion::from_base60).
//!
//! ## Parser states
//! -----------------
//! The reader walks rows with a [`ParseState`]:
//!
//! * a row whose first field is empty or only whitespace (blank line included) resets
//!   to `Header`,
//! * a `---` row advances `Header | Constellations → Stars → Links → Ignored`,
//! * a constellation row whose name is not in the membership set switches to `Ignored`,
//!   which swallows everything until the next reset.
//!
//! The star lookup used to resolve link rows is shared by every block of the file.
//!
//! ## Error Handling
//! -----------------
//! Unknown constellations and unknown link stars are not errors. A constellation or star
//! row without its `ra` and `dec` columns is skipped with a warning. A malformed
//! coordinate is reported as a [`ParseCatalogError`] carrying the 1-based line number.
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use log::{debug, warn};
use thiserror::Error;

use crate::{
    catalog::{Catalog, Constellation, Link, Star},
    celestial_coord::CelestialCoord,
    conversion::{parse_catalog_dec, parse_catalog_ra},
};

/// Marker opening the next section of a block.
pub const SECTION_SEPARATOR: &str = "---";

/// Line-level parsing errors for the catalog.
///
/// Variants
/// -----------------
/// * `InvalidRA` – The right ascension field is not a sexagesimal triple.
/// * `InvalidDec` – The declination field is not a sexagesimal triple.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseCatalogError {
    #[error("line {line}: invalid right ascension {value:?}")]
    InvalidRA { line: usize, value: String },
    #[error("line {line}: invalid declination {value:?}")]
    InvalidDec { line: usize, value: String },
}

/// Section of the catalog block the reader is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Start of a block: the next data row is a constellation row.
    Header,
    /// At least one constellation of this block was kept.
    Constellations,
    Stars,
    Links,
    /// Swallows rows until the next blank line.
    Ignored,
}

impl ParseState {
    /// State after a `---` separator row.
    fn advance(self) -> Self {
        match self {
            ParseState::Header | ParseState::Constellations => ParseState::Stars,
            ParseState::Stars => ParseState::Links,
            ParseState::Links | ParseState::Ignored => ParseState::Ignored,
        }
    }
}

/// Row-by-row catalog state machine.
///
/// Feed rows with [`CatalogReader::read_row`] and collect the result with
/// [`CatalogReader::finish`]. [`parse_catalog`] wraps both for whole files.
#[derive(Debug)]
pub struct CatalogReader<'a> {
    membership: &'a HashSet<String>,
    state: ParseState,
    lookup: HashMap<String, Arc<Star>>,
    catalog: Catalog,
    unresolved: usize,
    skipped: usize,
}

impl<'a> CatalogReader<'a> {
    pub fn new(membership: &'a HashSet<String>) -> Self {
        CatalogReader {
            membership,
            state: ParseState::Header,
            lookup: HashMap::new(),
            catalog: Catalog::default(),
            unresolved: 0,
            skipped: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Consume one row of tab-separated fields.
    ///
    /// Arguments
    /// -----------------
    /// * `line` – 1-based line number, used in error reports.
    /// * `fields` – The row split on tabs. A blank line is a single empty field.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` once the row is applied, or a [`ParseCatalogError`] for a malformed data row.
    pub fn read_row(&mut self, line: usize, fields: &[&str]) -> Result<(), ParseCatalogError> {
        let first = fields.first().copied().unwrap_or_default();
        if first.trim().is_empty() {
            self.state = ParseState::Header;
            return Ok(());
        }
        if first.starts_with(SECTION_SEPARATOR) {
            self.state = self.state.advance();
            return Ok(());
        }

        match self.state {
            ParseState::Header | ParseState::Constellations => {
                if !self.membership.contains(first) {
                    self.state = ParseState::Ignored;
                    return Ok(());
                }
                let Some(coord) = self.parse_coord(line, fields)? else {
                    return Ok(());
                };
                self.catalog.constellations.push(Constellation {
                    name: first.to_string(),
                    coord,
                });
                self.state = ParseState::Constellations;
            }
            ParseState::Stars => {
                let Some(coord) = self.parse_coord(line, fields)? else {
                    return Ok(());
                };
                let star = Arc::new(Star {
                    name: first.to_string(),
                    coord,
                    note: fields.get(3).copied().unwrap_or_default().to_string(),
                });
                if !star.is_comment() {
                    self.catalog.stars.push(Arc::clone(&star));
                }
                self.lookup.insert(star.name.clone(), star);
            }
            ParseState::Links => {
                let link = Link::new(fields.iter().map(|name| {
                    let endpoint = self.lookup.get(*name).cloned();
                    if endpoint.is_none() {
                        warn!("line {line}: link references unknown star {name:?}");
                        self.unresolved += 1;
                    }
                    endpoint
                }));
                self.catalog.links.push(link);
            }
            ParseState::Ignored => {}
        }
        Ok(())
    }

    /// Finish reading and return the parsed catalog.
    pub fn finish(self) -> Catalog {
        debug!(
            "catalog parsed: {} constellations, {} stars, {} links ({} unresolved endpoints, {} short rows skipped)",
            self.catalog.constellations.len(),
            self.catalog.stars.len(),
            self.catalog.links.len(),
            self.unresolved,
            self.skipped
        );
        self.catalog
    }

    /// Parse the `ra` / `dec` columns (fields 1 and 2) of a data row.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when the row is too short to hold them (the row is skipped),
    ///   the coordinate, or a [`ParseCatalogError`] for a malformed field.
    fn parse_coord(
        &mut self,
        line: usize,
        fields: &[&str],
    ) -> Result<Option<CelestialCoord>, ParseCatalogError> {
        let (Some(ra_field), Some(dec_field)) = (fields.get(1), fields.get(2)) else {
            warn!(
                "line {line}: row {:?} has no ra/dec columns, skipped",
                fields.join("\t")
            );
            self.skipped += 1;
            return Ok(None);
        };
        let ra = parse_catalog_ra(ra_field).ok_or_else(|| ParseCatalogError::InvalidRA {
            line,
            value: ra_field.to_string(),
        })?;
        let dec = parse_catalog_dec(dec_field).ok_or_else(|| ParseCatalogError::InvalidDec {
            line,
            value: dec_field.to_string(),
        })?;
        Ok(Some(CelestialCoord::new(ra, dec)))
    }
}

/// Parse a whole tab-separated catalog.
///
/// Arguments
/// -----------------
/// * `text` – Catalog contents (`\n` or `\r\n` line endings).
/// * `membership` – Names of the constellations to keep; other blocks are skipped.
///
/// Return
/// ----------
/// * The parsed [`Catalog`], or the first [`ParseCatalogError`] met.
pub fn parse_catalog(
    text: &str,
    membership: &HashSet<String>,
) -> Result<Catalog, ParseCatalogError> {
    let mut reader = CatalogReader::new(membership);
    for (idx, row) in text.lines().enumerate() {
        let fields: Vec<&str> = row.split('\t').collect();
        reader.read_row(idx + 1, &fields)?;
    }
    Ok(reader.finish())
}

#[cfg(test)]
mod catalog_reader_test {
    use super::*;

    fn membership(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    const ORION: &str = "ORI\t5 35 0\t5 0 0\n\
                         ---\n\
                         A\t1 0 0\t10 0 0\tstar a\n\
                         B\t2 0 0\t20 0 0\tstar b\n\
                         ---\n\
                         A\tB\n";

    #[test]
    fn test_parse_orion_block() {
        let catalog = parse_catalog(ORION, &membership(&["ORI"])).unwrap();

        assert_eq!(catalog.constellations.len(), 1);
        assert_eq!(catalog.constellations[0].name, "ORI");
        assert_eq!(
            catalog.constellations[0].coord,
            CelestialCoord::new(15.0 * 20100.0, 18000.0)
        );

        assert_eq!(catalog.stars.len(), 2);
        assert_eq!(catalog.stars[0].name, "A");
        assert_eq!(catalog.stars[0].coord, CelestialCoord::new(54000.0, 36000.0));
        assert_eq!(catalog.stars[0].note, "star a");
        assert_eq!(catalog.stars[1].coord, CelestialCoord::new(108000.0, 72000.0));

        assert_eq!(catalog.links.len(), 1);
        let link = &catalog.links[0];
        assert_eq!(link.len(), 2);
        assert_eq!(link.endpoints()[0].as_deref(), Some(&*catalog.stars[0]));
        assert_eq!(link.endpoints()[1].as_deref(), Some(&*catalog.stars[1]));
    }

    #[test]
    fn test_unknown_constellation_is_ignored_until_blank() {
        let text = format!("CYG\t20 0 0\t40 0 0\n---\nX\t1 0 0\t1 0 0\tx\n---\nX\n\n{ORION}");
        let catalog = parse_catalog(&text, &membership(&["ORI"])).unwrap();

        assert_eq!(catalog.constellations.len(), 1);
        assert_eq!(catalog.stars.len(), 2);
        assert!(catalog.star("X").is_none());
        assert_eq!(catalog.links.len(), 1);
    }

    #[test]
    fn test_ignored_block_does_not_validate_rows() {
        let text = "CYG\tnot\ta coordinate\n---\ngarbage\n";
        let catalog = parse_catalog(text, &membership(&["ORI"])).unwrap();
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn test_comment_star_is_link_endpoint_only() {
        let text = "ORI\t5 35 0\t5 0 0\n---\n\
                    A\t1 0 0\t10 0 0\ta\n\
                    #mid\t1 30 0\t15 0 0\n\
                    ---\n\
                    A\t#mid\tZ\n";
        let catalog = parse_catalog(text, &membership(&["ORI"])).unwrap();

        assert_eq!(catalog.stars.len(), 1);
        let endpoints = catalog.links[0].endpoints();
        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[1].as_ref().map(|s| s.name.as_str()), Some("#mid"));
        assert_eq!(endpoints[1].as_ref().map(|s| s.note.as_str()), Some(""));
        assert!(endpoints[2].is_none());
    }

    #[test]
    fn test_lookup_shared_across_blocks() {
        let text = format!("{ORION}\nORI\t5 35 0\t5 0 0\n---\n---\nB\tA\n");
        let catalog = parse_catalog(&text, &membership(&["ORI"])).unwrap();
        assert_eq!(catalog.constellations.len(), 2);
        assert_eq!(catalog.links.len(), 2);
        assert_eq!(catalog.links[1].missing_count(), 0);
    }

    #[test]
    fn test_state_transitions() {
        let names = membership(&["ORI"]);
        let mut reader = CatalogReader::new(&names);
        assert_eq!(reader.state(), ParseState::Header);

        reader.read_row(1, &["ORI", "5 35 0", "5 0 0"]).unwrap();
        assert_eq!(reader.state(), ParseState::Constellations);
        reader.read_row(2, &["---"]).unwrap();
        assert_eq!(reader.state(), ParseState::Stars);
        reader.read_row(3, &["---"]).unwrap();
        assert_eq!(reader.state(), ParseState::Links);
        reader.read_row(4, &["---"]).unwrap();
        assert_eq!(reader.state(), ParseState::Ignored);
        reader.read_row(5, &["---"]).unwrap();
        assert_eq!(reader.state(), ParseState::Ignored);
        reader.read_row(6, &[""]).unwrap();
        assert_eq!(reader.state(), ParseState::Header);
        reader.read_row(7, &["LYR", "18 0 0", "30 0 0"]).unwrap();
        assert_eq!(reader.state(), ParseState::Ignored);
        reader.read_row(8, &["", "ignored"]).unwrap();
        assert_eq!(reader.state(), ParseState::Header);
    }

    #[test]
    fn test_malformed_rows() {
        let names = membership(&["ORI"]);
        assert_eq!(
            parse_catalog("ORI\t5 35\t5 0 0\n", &names),
            Err(ParseCatalogError::InvalidRA {
                line: 1,
                value: "5 35".into()
            })
        );
        assert_eq!(
            parse_catalog("ORI\t5 35 0\tfive\n", &names),
            Err(ParseCatalogError::InvalidDec {
                line: 1,
                value: "five".into()
            })
        );
    }

    #[test]
    fn test_short_and_whitespace_rows_tolerated() {
        let names = membership(&["ORI"]);
        let text = "ORI\t5 35 0\t5 0 0\n---\n\
                    A\t1 0 0\n\
                    B\t2 0 0\t20 0 0\tb\n\
                    ---\n\
                    A\tB\n\
                    \x20\t\n\
                    ORI\n\
                    ---\n\
                    C\t3 0 0\t30 0 0\tc\n";
        let catalog = parse_catalog(text, &names).unwrap();

        // the short star row is dropped, so its link endpoint is missing
        assert_eq!(catalog.stars.len(), 2);
        assert!(catalog.star("A").is_none());
        assert_eq!(catalog.links[0].missing_count(), 1);

        // the whitespace-only row closed the first block, the short header row kept none
        assert_eq!(catalog.constellations.len(), 1);
        assert_eq!(catalog.stars[1].name, "C");

        let mut reader = CatalogReader::new(&names);
        reader.read_row(1, &["ORI", "5 35 0", "5 0 0"]).unwrap();
        reader.read_row(2, &["   "]).unwrap();
        assert_eq!(reader.state(), ParseState::Header);
    }

    #[test]
    fn test_crlf_and_missing_note() {
        let text = "ORI\t5 35 0\t5 0 0\r\n---\r\nA\t1 0 0\t10 0 0\r\n";
        let catalog = parse_catalog(text, &membership(&["ORI"])).unwrap();
        assert_eq!(catalog.stars[0].note, "");
        assert_eq!(catalog.stars[0].coord.dec, 36000.0);
    }
}
