//! Human-readable summary of maximum differences.

use crate::tracker::DiffResult;

/// Format a non-negative magnitude the way the regression logs print it.
///
/// Values below 0.001 use scientific notation with three decimals (`1.234E-5`), anything
/// larger uses fixed point with three decimals.
pub fn format_magnitude(value: f64) -> String {
    if value < 0.001 {
        format!("{value:.3E}")
    } else {
        format!("{value:.3}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub label: String,
    pub unit: String,
    pub result: DiffResult,
}

impl ReportEntry {
    pub fn absolute_text(&self) -> String {
        with_unit(&format_magnitude(self.result.max_absolute), &self.unit)
    }

    /// Relative maximum as a percentage, if one was recorded.
    pub fn relative_text(&self) -> Option<String> {
        self.result
            .max_relative
            .map(|ratio| format!("{}%", format_magnitude(ratio * 100.0)))
    }
}

fn with_unit(value: &str, unit: &str) -> String {
    match unit {
        "" => value.to_string(),
        "°" | "deg" => format!("{value}°"),
        unit => format!("{value} {unit}"),
    }
}

/// Ordered collection of maximum differences for one compared series.
#[derive(Debug, Clone, Default)]
pub struct Report {
    title: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn push(&mut self, label: impl Into<String>, unit: impl Into<String>, result: DiffResult) {
        self.entries.push(ReportEntry {
            label: label.into(),
            unit: unit.into(),
            result,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// One line per absolute maximum, plus one per relative maximum when set.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() * 2);
        for entry in &self.entries {
            lines.push(format!(
                "{}: max {} difference: {}",
                self.title,
                entry.label,
                entry.absolute_text()
            ));
            if let Some(relative) = entry.relative_text() {
                lines.push(format!(
                    "{}: max relative {} difference: {}",
                    self.title, entry.label, relative
                ));
            }
        }
        lines
    }

    pub fn log(&self) {
        for line in self.lines() {
            log::info!("{line}");
        }
    }
}
