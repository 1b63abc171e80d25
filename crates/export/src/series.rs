//! CSV export of plot samples.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::ExportError;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// A named run of `(x, y)` samples.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColumns<'a> {
    pub name: &'a str,
    pub points: &'a [(f64, f64)],
}

/// Write `series,<x_column>,<y_column>` rows for every sample of every series.
pub fn write_series<W: Write>(
    writer: W,
    x_column: &str,
    y_column: &str,
    series: &[SeriesColumns<'_>],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["series", x_column, y_column])?;
    for s in series {
        for &(x, y) in s.points {
            csv.write_record([s.name.to_string(), x.to_string(), y.to_string()])?;
        }
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// [`write_series`] to a file path, or stdout for `-`.
pub fn write_series_to_path(
    path: &Path,
    x_column: &str,
    y_column: &str,
    series: &[SeriesColumns<'_>],
) -> Result<(), ExportError> {
    let writer = writer_for_path(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_series(writer, x_column, y_column, series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let points = [(1.0, 2.5), (2.0, 5.0)];
        let mut out = Vec::new();
        write_series(
            &mut out,
            "speed_km_s",
            "energy_percent",
            &[SeriesColumns {
                name: "escape",
                points: &points,
            }],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "series,speed_km_s,energy_percent\nescape,1,2.5\nescape,2,5\n"
        );
    }
}
