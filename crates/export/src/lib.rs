//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

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

/// Per-sample difference tables.
pub mod diffs {
    use std::path::Path;

    use regress_compare::{Alignment, ChannelComparison};
    use regress_core::time::TimeAxis;
    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    #[derive(Debug, Serialize)]
    struct PairRow {
        index: usize,
        time_s: f64,
        time: f64,
        time_offset_s: f64,
        position_m: f64,
        velocity_m_s: f64,
        attitude_deg: Option<f64>,
    }

    #[derive(Debug, Serialize)]
    struct ChannelRow<'a> {
        channel: &'a str,
        time_s: f64,
        time: f64,
        difference: f64,
    }

    /// Write one row per aligned pair: time, time offset, position, velocity and attitude
    /// differences. `time` is expressed in the requested axis unit.
    pub fn write_pair_diffs(
        path: &Path,
        alignment: &Alignment,
        axis: TimeAxis,
    ) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
        for pair in &alignment.samples {
            writer.serialize(PairRow {
                index: pair.index,
                time_s: pair.time_s,
                time: axis.convert(pair.time_s),
                time_offset_s: pair.time_offset_s,
                position_m: pair.position_m,
                velocity_m_s: pair.velocity_m_s,
                attitude_deg: pair.attitude_deg,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write channel differences in long format, one row per channel and sample.
    pub fn write_channel_diffs(
        path: &Path,
        comparisons: &[ChannelComparison],
        axis: TimeAxis,
    ) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
        for comparison in comparisons {
            let channel = comparison.channel.key();
            for sample in &comparison.samples {
                writer.serialize(ChannelRow {
                    channel,
                    time_s: sample.time_s,
                    time: axis.convert(sample.time_s),
                    difference: sample.difference,
                })?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// JSON run summaries.
pub mod summary {
    use std::io::Write;
    use std::path::Path;

    use regress_compare::{Report, ReportEntry};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    #[derive(Debug, Clone, Serialize)]
    pub struct MetricSummary {
        pub label: String,
        pub unit: String,
        pub max_absolute: f64,
        pub max_relative: Option<f64>,
    }

    impl From<&ReportEntry> for MetricSummary {
        fn from(entry: &ReportEntry) -> Self {
            Self {
                label: entry.label.clone(),
                unit: entry.unit.clone(),
                max_absolute: entry.result.max_absolute,
                max_relative: entry.result.max_relative,
            }
        }
    }

    /// Outcome of comparing one series against the reference.
    #[derive(Debug, Clone, Serialize)]
    pub struct SeriesSummary {
        pub label: String,
        pub file: String,
        pub compared: usize,
        pub dropped_reference: usize,
        pub dropped_other: usize,
        /// Line at which a data gap stopped reading the series file.
        pub truncated_at: Option<usize>,
        pub metrics: Vec<MetricSummary>,
    }

    impl SeriesSummary {
        pub fn with_report(mut self, report: &Report) -> Self {
            self.metrics = report.entries().iter().map(MetricSummary::from).collect();
            self
        }
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct CaseSummary {
        pub case: String,
        pub reference: String,
        /// Line at which a data gap stopped reading the reference file.
        pub reference_truncated_at: Option<usize>,
        pub series: Vec<SeriesSummary>,
    }

    /// Write a pretty-printed JSON summary of a case.
    pub fn write_summary(path: &Path, summary: &CaseSummary) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
