//! Display formatting: scientific notation, grouped fixed-point numbers, and page reports.

use std::fmt;

use astro_core::ScientificValue;

/// Shown in place of a value that is NaN or infinite.
pub const UNDEFINED: &str = "undefined";

fn normalized(value: f64, precision: usize) -> (String, i32) {
    let sci = ScientificValue::from_magnitude(value);
    let mut exponent = sci.exponent;
    let mut coefficient = format!("{:.*}", precision, sci.coefficient);
    // 9.9996 rounds to 10.000 at three decimals; carry into the exponent.
    if coefficient.trim_start_matches('-').starts_with("10") {
        exponent += 1;
        coefficient = format!("{:.*}", precision, value / 10f64.powi(exponent));
    }
    (coefficient, exponent)
}

/// LaTeX scientific notation, `c.ccc \times 10^{e}`. Zero is the literal `0`.
pub fn sci_notation(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let (coefficient, exponent) = normalized(value, precision);
    format!("{coefficient} \\times 10^{{{exponent}}}")
}

/// Plain-text scientific notation, `c.ccc × 10^e`. Zero is the literal `0`.
pub fn sci_plain(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let (coefficient, exponent) = normalized(value, precision);
    format!("{coefficient} × 10^{exponent}")
}

/// Fixed-point with thousands separators, e.g. `31,558,149.764`.
pub fn grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// A user input as it appears in a substitution expression, `(c \times 10^{e})`.
pub fn latex_input(value: &ScientificValue) -> String {
    format!(
        "({} \\times 10^{{{}}})",
        value.coefficient, value.exponent
    )
}

/// One line of a result table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub unit: String,
}

impl Row {
    pub fn new(label: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }
}

/// Rendered result of one calculation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub title: String,
    pub rows: Vec<Row>,
    /// Generic formula in LaTeX.
    pub formula: String,
    /// Formula with the user's inputs substituted, in LaTeX; one entry per result.
    pub substitutions: Vec<String>,
    pub notes: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        self.rows.push(Row::new(label, value, unit));
        self
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    pub fn substitution(mut self, substitution: impl Into<String>) -> Self {
        self.substitutions.push(substitution.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Append rows and notes of another report, used by multi-result pages.
    pub fn extend(mut self, other: Report) -> Self {
        self.rows.extend(other.rows);
        self.notes.extend(other.notes);
        self
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        let width = self.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        for row in &self.rows {
            let pad = width - row.label.chars().count();
            if row.unit.is_empty() {
                writeln!(f, "{}{} : {}", row.label, " ".repeat(pad), row.value)?;
            } else {
                writeln!(f, "{}{} : {} {}", row.label, " ".repeat(pad), row.value, row.unit)?;
            }
        }
        if !self.formula.is_empty() {
            writeln!(f, "Formula      : {}", self.formula)?;
        }
        for substitution in &self.substitutions {
            writeln!(f, "Substitution : {substitution}")?;
        }
        for note in &self.notes {
            writeln!(f, "Note         : {note}")?;
        }
        Ok(())
    }
}
