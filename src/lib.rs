//! # starpath
//!
//! Star charts with constellation line art and animated planet tracks.
//!
//! ## Overview
//! -----------------
//! * [`catalog`] – tab-separated star / constellation / link catalog.
//! * [`ephemeris`] – one whitespace-separated position table per tracked body.
//! * [`projection`] – right ascension / declination → screen, with sky rotation.
//! * [`interpolation`] – discrete pick and continuous blend at an animation ratio.
//! * [`animation`] – frame composition and the repeating animation task.
//! * [`render`] – the [`render::Canvas`] trait and its SVG backend.
//! * [`chart`] – [`chart::StarChart`], tying everything together.
//! * [`loader`] and [`config`] – where the sources live and how the chart looks.
pub mod animation;
pub mod catalog;
pub mod celestial_coord;
pub mod chart;
pub mod config;
pub mod constants;
mod conversion;
pub mod ephemeris;
pub mod interpolation;
pub mod loader;
pub mod projection;
pub mod render;
pub mod starpath_errors;
pub mod style;
pub mod view;

pub use conversion::from_base60;
