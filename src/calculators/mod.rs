//! Calculator pages.
//!
//! Each page wires an input struct, one or more evaluators, a report, an optional plot,
//! and an export record together. [`evaluate`] runs one pass; [`handoff`] writes the
//! record and optionally starts the visualizer.

pub mod binary;
pub mod blackhole;
pub mod escape;
pub mod gravity;
pub mod luminosity;
pub mod orbit;
pub mod parallax;
pub mod roche;
pub mod system;

use std::path::PathBuf;

use astro_config::HandoffConfig;
use astro_export::{ExportError, HandoffError, HandoffTarget, write_record};
use astro_orbits::OrbitError;
use astro_stellar::StellarError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::format::Report;
use crate::input::{FieldSpec, PageInput, ScalarSpec};
use crate::plot::PlotSpec;

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error(transparent)]
    Stellar(#[from] StellarError),
    #[error("export needs at least {required} valid planets (got {valid})")]
    TooFewPlanets { valid: usize, required: usize },
    #[error("page '{page}' has no '{target}' visualizer")]
    UnsupportedTarget {
        page: &'static str,
        target: HandoffTarget,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// One calculator page.
pub trait Calculator {
    /// Subcommand and configuration name.
    const PAGE: &'static str;
    const TITLE: &'static str;

    type Input: PageInput;
    type Output;
    type Record: Serialize;

    /// Scientific inputs in display order.
    fn fields() -> Vec<FieldSpec>;

    /// Plain scalar inputs.
    fn scalars() -> Vec<ScalarSpec> {
        Vec::new()
    }

    fn evaluate(input: &Self::Input) -> Result<Self::Output, PageError>;

    fn report(input: &Self::Input, output: &Self::Output) -> Report;

    fn plot(_input: &Self::Input, _output: &Self::Output) -> Option<PlotSpec> {
        None
    }

    fn record(input: &Self::Input, output: &Self::Output) -> Result<Self::Record, PageError>;

    /// Visualizers this page can hand off to; the first one is the default.
    fn targets() -> &'static [HandoffTarget];
}

/// Result of one calculation pass.
pub struct Evaluation<C: Calculator> {
    pub input: C::Input,
    pub output: C::Output,
}

impl<C: Calculator> Evaluation<C> {
    pub fn report(&self) -> Report {
        C::report(&self.input, &self.output)
    }

    pub fn plot(&self) -> Option<PlotSpec> {
        C::plot(&self.input, &self.output)
    }

    pub fn record(&self) -> Result<C::Record, PageError> {
        C::record(&self.input, &self.output)
    }
}

/// Evaluate `input`; a validation failure yields no partial result.
pub fn evaluate<C: Calculator>(input: C::Input) -> Result<Evaluation<C>, PageError> {
    let output = C::evaluate(&input)?;
    debug!(page = C::PAGE, "calculation pass complete");
    Ok(Evaluation { input, output })
}

/// What a handoff did.
#[derive(Debug)]
pub struct HandoffSummary {
    pub target: HandoffTarget,
    /// Written data file; `None` for launch-only targets.
    pub path: Option<PathBuf>,
    /// Launch result; `None` when no launch was requested.
    pub visualizer: Option<Result<(), HandoffError>>,
}

/// Write the page record for `target` and, when `launch` is set, start the visualizer.
///
/// A visualizer that cannot start is reported in the summary, never as an error.
pub fn handoff<C: Calculator>(
    evaluation: &Evaluation<C>,
    config: &HandoffConfig,
    target: HandoffTarget,
    launch: bool,
) -> Result<HandoffSummary, PageError> {
    if !C::targets().contains(&target) {
        return Err(PageError::UnsupportedTarget {
            page: C::PAGE,
            target,
        });
    }

    let (path, visualizer) = match (target.writes_data(), launch) {
        (true, true) => {
            let record = evaluation.record()?;
            let outcome = astro_export::handoff(
                &config.output_root,
                &config.visualizer,
                target,
                &record,
            )?;
            (Some(outcome.path), Some(outcome.visualizer))
        }
        (true, false) => {
            let record = evaluation.record()?;
            let path = write_record(&target.data_file(&config.output_root), &record)?;
            (Some(path), None)
        }
        (false, _) => {
            let visualizer = launch.then(|| {
                astro_export::launch(&config.visualizer, &target.project_dir(&config.output_root))
            });
            (None, visualizer)
        }
    };
    info!(
        page = C::PAGE,
        %target,
        written = path.is_some(),
        launched = matches!(visualizer, Some(Ok(()))),
        "handoff finished"
    );
    Ok(HandoffSummary {
        target,
        path,
        visualizer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::gravity::{GravityInput, GravityPage};
    use crate::calculators::orbit::{OrbitInput, OrbitPage};

    #[test]
    fn launch_only_target_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = HandoffConfig {
            visualizer: PathBuf::from("definitely-not-an-installed-visualizer"),
            output_root: dir.path().to_path_buf(),
        };
        let eval = evaluate::<OrbitPage>(OrbitInput::default()).expect("orbit");
        let summary = handoff(&eval, &config, HandoffTarget::Kepler, true).expect("handoff");
        assert!(summary.path.is_none());
        assert!(matches!(
            summary.visualizer,
            Some(Err(HandoffError::Unavailable { .. }))
        ));
        assert!(!dir.path().join("kepler").exists());
    }

    #[test]
    fn foreign_target_is_rejected() {
        let config = HandoffConfig::default();
        let eval = evaluate::<GravityPage>(GravityInput::default()).expect("gravity");
        let err = handoff(&eval, &config, HandoffTarget::Roche, false).expect_err("roche");
        assert!(matches!(err, PageError::UnsupportedTarget { .. }), "{err}");
    }

    #[test]
    fn pong_receives_the_gravity_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = HandoffConfig {
            visualizer: PathBuf::from("love"),
            output_root: dir.path().to_path_buf(),
        };
        let eval = evaluate::<GravityPage>(GravityInput::default()).expect("gravity");
        let summary = handoff(&eval, &config, HandoffTarget::Pong, false).expect("handoff");
        assert_eq!(summary.path, Some(dir.path().join("pong").join("data.json")));
        assert!(summary.visualizer.is_none());
    }
}
