//! Reader for the legacy columnar reference trajectory format.
//!
//! Each data line holds the elapsed time in seconds followed by a fixed number of
//! whitespace-separated fields. `#` lines are comments. A `NaN` field marks the end of
//! usable data: reading stops there and the partial series is returned.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regress_core::units::{km_to_m, kms_to_ms};
use regress_orbits::OrbitalElements;
use thiserror::Error;

use crate::attitude::Attitude;
use crate::sample::{SampledSeries, SeriesError, TimeSample};
use crate::state::{AngularRates, StateSample};

/// Column layout of a reference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceLayout {
    /// Elements, Cartesian state, quaternion, rotation rate and acceleration (27 fields).
    #[default]
    Full,
    /// Cartesian state expressed in a local orbital frame (6 fields).
    LocalFrame,
}

impl ReferenceLayout {
    /// Number of fields after the time column.
    pub const fn field_count(self) -> usize {
        match self {
            ReferenceLayout::Full => 27,
            ReferenceLayout::LocalFrame => 6,
        }
    }
}

/// Series parsed from one reference file.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub series: SampledSeries<StateSample>,
    /// Line number of the `NaN` that stopped reading, if any.
    pub truncated_at: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line} contains {found} tokens, expected {expected}")]
    MalformedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: {source}")]
    OutOfOrder {
        line: usize,
        #[source]
        source: SeriesError,
    },
}

/// Read and parse a reference file from disk.
pub fn read_reference_file<P: AsRef<Path>>(
    path: P,
    layout: ReferenceLayout,
) -> Result<ReferenceData, ReferenceError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_reference(reader, &name, layout)
}

/// Parse reference data from any buffered reader. `source_name` only feeds log messages.
pub fn parse_reference<R: BufRead>(
    reader: R,
    source_name: &str,
    layout: ReferenceLayout,
) -> Result<ReferenceData, ReferenceError> {
    let expected = layout.field_count() + 1;
    let mut series = SampledSeries::new();
    let mut truncated_at = None;
    let mut values = Vec::with_capacity(expected);

    'lines: for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != expected {
            return Err(ReferenceError::MalformedLine {
                line: line_number,
                expected,
                found: tokens.len(),
            });
        }

        values.clear();
        for token in tokens {
            if token.eq_ignore_ascii_case("nan") {
                log::warn!("NaN found in file {source_name} at line {line_number}!");
                truncated_at = Some(line_number);
                break 'lines;
            }
            values.push(parse_value(token, line_number)?);
        }

        let state = match layout {
            ReferenceLayout::Full => full_state(&values[1..]),
            ReferenceLayout::LocalFrame => local_state(&values[1..]),
        };
        series
            .push(TimeSample::new(values[0], state))
            .map_err(|source| ReferenceError::OutOfOrder {
                line: line_number,
                source,
            })?;
    }

    Ok(ReferenceData {
        series,
        truncated_at,
    })
}

fn parse_value(token: &str, line: usize) -> Result<f64, ReferenceError> {
    // Fortran writers emit `1.0D+03`
    token
        .replace(['D', 'd'], "e")
        .parse()
        .map_err(|_| ReferenceError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}

fn km_vector(values: &[f64]) -> [f64; 3] {
    [km_to_m(values[0]), km_to_m(values[1]), km_to_m(values[2])]
}

fn kms_vector(values: &[f64]) -> [f64; 3] {
    [kms_to_ms(values[0]), kms_to_ms(values[1]), kms_to_ms(values[2])]
}

fn full_state(f: &[f64]) -> StateSample {
    let elements = OrbitalElements {
        semi_major_axis_km: f[0],
        eccentricity: f[1],
        inclination_deg: f[2],
        raan_deg: f[3],
        perigee_argument_deg: f[4],
        mean_anomaly_deg: f[5],
        h: f[6],
        k: f[7],
        p: f[8],
        q: f[9],
        mean_longitude_deg: f[10],
    };
    let rates = AngularRates {
        rate: [f[21], f[22], f[23]],
        acceleration: [f[24], f[25], f[26]],
    };
    let mut state = StateSample::pv(km_vector(&f[11..14]), kms_vector(&f[14..17]))
        .with_elements(elements)
        .with_rates(rates);
    match Attitude::from_components(f[17], f[18], f[19], f[20]) {
        Ok(attitude) => state.attitude = Some(attitude),
        Err(err) => log::debug!("skipping attitude: {err}"),
    }
    state
}

fn local_state(f: &[f64]) -> StateSample {
    StateSample::pv(km_vector(&f[0..3]), kms_vector(&f[3..6]))
}
