//! Test-case runner.
//!
//! A case loads its reference once, then compares every configured series against it.
//! All trackers and loaded series live inside the run; nothing is shared between cases.

use std::path::{Path, PathBuf};

use regress_compare::{
    Alignment, AlignmentPolicy, ChannelComparison, CompareError, Report, SeriesAligner,
};
use regress_config::{CaseConfig, LayoutConfig, SeriesConfig};
use regress_core::time::TimeAxis;
use regress_export::ExportError;
use regress_export::summary::{CaseSummary, SeriesSummary};
use regress_series::{Channel, ReferenceData, ReferenceError, ReferenceLayout, read_reference_file};
use thiserror::Error;

use crate::chart::{ChartError, LineChart, render_line_chart};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ReferenceError,
    },
    #[error("failed to compare series '{label}': {source}")]
    Compare {
        label: String,
        #[source]
        source: CompareError,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Comparison results of one series against the case reference.
#[derive(Debug, Clone)]
pub struct SeriesOutcome {
    pub label: String,
    pub file: PathBuf,
    pub alignment: Alignment,
    pub channels: Vec<ChannelComparison>,
    pub report: Report,
    pub truncated_at: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    pub output_dir: PathBuf,
    pub reference_truncated_at: Option<usize>,
    pub series: Vec<SeriesOutcome>,
}

/// Names of cases that ran to completion and of those that failed, with the failure.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Run every case in order; a failing case is logged and the batch moves on.
pub fn run_batch(cases: &[CaseConfig], output_dir: &Path) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for case in cases {
        log::info!("running case '{}'", case.name);
        match run_case(case, output_dir) {
            Ok(outcome) => {
                log::info!(
                    "case '{}' done, artifacts in {}",
                    outcome.name,
                    outcome.output_dir.display()
                );
                summary.succeeded.push(case.name.clone());
            }
            Err(err) => {
                log::error!("case '{}' failed: {err}", case.name);
                summary.failed.push((case.name.clone(), err.to_string()));
            }
        }
    }
    summary
}

/// Compare every series of `case` against its reference and write the artifacts under
/// `output_dir/<case name>`.
pub fn run_case(case: &CaseConfig, output_dir: &Path) -> Result<CaseOutcome, RunError> {
    let case_dir = output_dir.join(file_safe(&case.name));
    let axis = TimeAxis::from(case.time_axis);
    let policy = if case.strict_length {
        AlignmentPolicy::Strict
    } else {
        AlignmentPolicy::Truncate
    };
    let aligner = SeriesAligner::new(policy);
    let channels: &[Channel] = if case.channels { &Channel::ALL } else { &[] };

    let reference = load_series(&case.reference)?;
    let reference_label = case.reference.display_label();

    let mut outcomes = Vec::with_capacity(case.series.len());
    for series in &case.series {
        let label = series.display_label();
        let data = load_series(series)?;
        let compare_error = |source| RunError::Compare {
            label: label.clone(),
            source,
        };
        let alignment = aligner
            .compare(&reference.series, &data.series)
            .map_err(compare_error)?;
        let comparisons = aligner
            .compare_channels(&reference.series, &data.series, channels)
            .map_err(compare_error)?;

        let report = build_report(&case.name, &label, &alignment, &comparisons);
        report.log();

        let stem = file_safe(&label);
        regress_export::diffs::write_pair_diffs(
            &case_dir.join(format!("{stem}_diffs.csv")),
            &alignment,
            axis,
        )?;
        if !comparisons.is_empty() {
            regress_export::diffs::write_channel_diffs(
                &case_dir.join(format!("{stem}_channels.csv")),
                &comparisons,
                axis,
            )?;
        }

        outcomes.push(SeriesOutcome {
            label,
            file: series.file.clone(),
            alignment,
            channels: comparisons,
            report,
            truncated_at: data.truncated_at,
        });
    }

    if case.charts {
        write_charts(&case_dir, &reference_label, &outcomes, axis)?;
    }

    let summary = CaseSummary {
        case: case.name.clone(),
        reference: case.reference.file.display().to_string(),
        reference_truncated_at: reference.truncated_at,
        series: outcomes.iter().map(series_summary).collect(),
    };
    regress_export::summary::write_summary(&case_dir.join("summary.json"), &summary)?;

    Ok(CaseOutcome {
        name: case.name.clone(),
        output_dir: case_dir,
        reference_truncated_at: reference.truncated_at,
        series: outcomes,
    })
}

fn load_series(series: &SeriesConfig) -> Result<ReferenceData, RunError> {
    let layout = match series.layout {
        LayoutConfig::Full => ReferenceLayout::Full,
        LayoutConfig::LocalFrame => ReferenceLayout::LocalFrame,
    };
    read_reference_file(&series.file, layout).map_err(|source| RunError::Load {
        path: series.file.clone(),
        source,
    })
}

/// Report for one series: position, velocity, occurrence and attitude first, then every
/// channel that was present in at least one pair.
pub fn build_report(
    case: &str,
    label: &str,
    alignment: &Alignment,
    comparisons: &[ChannelComparison],
) -> Report {
    let mut report = Report::new(format!("{case} [{label}]"));
    report.push("position", "m", alignment.position);
    report.push("velocity", "m/s", alignment.velocity);
    report.push("occurrence", "s", alignment.occurrence);
    if let Some(attitude) = alignment.attitude {
        report.push("attitude", "°", attitude);
    }
    for comparison in comparisons.iter().filter(|c| !c.is_empty()) {
        report.push(
            comparison.channel.title(),
            comparison.channel.unit(),
            comparison.result,
        );
    }
    report
}

fn series_summary(outcome: &SeriesOutcome) -> SeriesSummary {
    SeriesSummary {
        label: outcome.label.clone(),
        file: outcome.file.display().to_string(),
        compared: outcome.alignment.compared,
        dropped_reference: outcome.alignment.dropped_reference,
        dropped_other: outcome.alignment.dropped_other,
        truncated_at: outcome.truncated_at,
        metrics: Vec::new(),
    }
    .with_report(&outcome.report)
}

fn write_charts(
    case_dir: &Path,
    reference_label: &str,
    outcomes: &[SeriesOutcome],
    axis: TimeAxis,
) -> Result<(), RunError> {
    let x_desc = format!("time ({})", axis.unit_label());
    let title = |what: &str| format!("{what} difference against {reference_label}");

    let mut position = LineChart::new(title("Position"), &x_desc, "m");
    let mut velocity = LineChart::new(title("Velocity"), &x_desc, "m/s");
    let mut attitude = LineChart::new(title("Attitude"), &x_desc, "deg");
    for outcome in outcomes {
        let pairs = &outcome.alignment.samples;
        position.push_line(
            &outcome.label,
            pairs.iter().map(|p| (axis.convert(p.time_s), p.position_m)).collect(),
        );
        velocity.push_line(
            &outcome.label,
            pairs.iter().map(|p| (axis.convert(p.time_s), p.velocity_m_s)).collect(),
        );
        if outcome.alignment.attitude.is_some() {
            attitude.push_line(
                &outcome.label,
                pairs
                    .iter()
                    .filter_map(|p| Some((axis.convert(p.time_s), p.attitude_deg?)))
                    .collect(),
            );
        }
    }
    render_line_chart(&case_dir.join("POSITION_DIFF.png"), &position)?;
    render_line_chart(&case_dir.join("VELOCITY_DIFF.png"), &velocity)?;
    if !attitude.lines.is_empty() {
        render_line_chart(&case_dir.join("ATTITUDE_DIFF.png"), &attitude)?;
    }

    for channel in Channel::ALL {
        let mut chart = LineChart::new(title(channel.title()), &x_desc, channel.unit());
        for outcome in outcomes {
            let Some(comparison) = outcome
                .channels
                .iter()
                .find(|c| c.channel == channel && !c.is_empty())
            else {
                continue;
            };
            chart.push_line(
                &outcome.label,
                comparison
                    .samples
                    .iter()
                    .map(|s| (axis.convert(s.time_s), s.difference))
                    .collect(),
            );
        }
        if !chart.lines.is_empty() {
            render_line_chart(&case_dir.join(format!("{}.png", channel.key())), &chart)?;
        }
    }
    Ok(())
}

/// Replace characters that are awkward in file names.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
