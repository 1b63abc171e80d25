//! Input field descriptors and per-page defaults.
//!
//! Every calculator page declares its scientific inputs as [`FieldSpec`]s. A page input
//! struct starts from the built-in defaults, may take configured overrides, and is reset
//! by building a fresh default value.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use tracing::warn;

/// Static description of one scientific-notation input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub default: ScientificValue,
    pub exponents: ExponentRange,
}

impl FieldSpec {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        unit: &'static str,
        default: ScientificValue,
        exponents: ExponentRange,
    ) -> Self {
        Self {
            key,
            label,
            unit,
            default,
            exponents,
        }
    }

    /// Built-in default value.
    pub fn reset(&self) -> ScientificValue {
        self.default
    }

    /// Accept a user value, clamping its exponent into the field's range.
    pub fn accept(&self, value: ScientificValue) -> ScientificValue {
        let accepted = value.clamp_exponent(self.exponents);
        if accepted.exponent != value.exponent {
            warn!(
                field = self.key,
                requested = value.exponent,
                clamped = accepted.exponent,
                "exponent outside permitted range"
            );
        }
        accepted
    }

    /// Configured default when present, otherwise the built-in one.
    pub fn resolve(&self, defaults: Option<&PageDefaults>) -> ScientificValue {
        match defaults.and_then(|d| d.field(self.key)) {
            Some(f) => self.accept(ScientificValue::new(f.coefficient, f.exponent)),
            None => self.reset(),
        }
    }
}

/// Static description of a plain scalar input (e.g. eccentricity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl ScalarSpec {
    pub fn resolve(&self, defaults: Option<&PageDefaults>) -> f64 {
        defaults
            .and_then(|d| d.scalar(self.key))
            .unwrap_or(self.default)
    }
}

/// Input struct of one calculator page.
pub trait PageInput: Clone + Default {
    /// Built-in defaults with any configured overrides applied.
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self;

    /// Fresh built-in defaults.
    fn reset() -> Self {
        Self::default()
    }
}

/// Apply an optional user value to a field, falling back to `current`.
pub fn override_field(
    spec: &FieldSpec,
    current: ScientificValue,
    user: Option<ScientificValue>,
) -> ScientificValue {
    user.map(|v| spec.accept(v)).unwrap_or(current)
}
