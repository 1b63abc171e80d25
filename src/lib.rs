//! Astrophysics calculators with plotting and visualizer handoff.
//!
//! Formula evaluators live in the `astro_orbits` and `astro_stellar` crates. This crate
//! adds the page pipeline on top: scientific-notation inputs with per-page defaults,
//! text reports, charts, and export of records for the external visualizer.

pub mod calculators;
pub mod format;
pub mod input;
pub mod plot;

pub use astro_config as config;
pub use astro_core as core;
pub use astro_export as export;
pub use astro_orbits as orbits;
pub use astro_stellar as stellar;
