use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{DateRange, Period, PeriodAggregate, ZoneId, ZonePercentages, ZoneVolumeMap};

/// Machine-readable zone report
#[derive(Debug, Clone, Serialize)]
pub struct MachineReport {
    /// Whole requested range
    pub range: DateRange,
    /// Bucket granularity, if the range was split
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// One entry per bucket (or a single entry for the whole range)
    pub periods: Vec<PeriodSummary>,
    /// Totals over the whole range
    pub totals: PeriodSummary,
}

/// Aggregate without the per-session detail
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub range: DateRange,
    pub session_count: usize,
    pub total_distance_m: u64,
    pub volumes: ZoneVolumeMap,
    pub percentages: ZonePercentages,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_zone: Option<ZoneId>,
}

impl From<&PeriodAggregate> for PeriodSummary {
    fn from(aggregate: &PeriodAggregate) -> Self {
        Self {
            range: aggregate.range,
            session_count: aggregate.session_count,
            total_distance_m: aggregate.total_distance_m,
            volumes: aggregate.volumes,
            percentages: aggregate.percentages,
            dominant_zone: aggregate.dominant_zone(),
        }
    }
}

impl MachineReport {
    pub fn new(
        range: DateRange,
        period: Option<Period>,
        periods: &[PeriodAggregate],
        totals: &PeriodAggregate,
    ) -> Self {
        Self {
            range,
            period,
            periods: periods.iter().map(PeriodSummary::from).collect(),
            totals: PeriodSummary::from(totals),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable zone report
pub struct HumanReport<'a> {
    periods: &'a [PeriodAggregate],
    totals: &'a PeriodAggregate,
}

impl<'a> HumanReport<'a> {
    pub fn new(periods: &'a [PeriodAggregate], totals: &'a PeriodAggregate) -> Self {
        Self { periods, totals }
    }

    /// Format the report as plain text
    pub fn format(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Zone Report: {}\n", self.totals.range));
        output.push_str("==========================================\n\n");

        if self.periods.len() > 1 {
            for aggregate in self.periods {
                output.push_str(&format_aggregate(aggregate));
                output.push('\n');
            }
            output.push_str("Totals\n------\n");
        }
        output.push_str(&format_aggregate(self.totals));

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn format_aggregate(aggregate: &PeriodAggregate) -> String {
    let mut output = format!(
        "[{}] {} sessions, {}\n",
        aggregate.range,
        aggregate.session_count,
        format_distance(aggregate.total_distance_m)
    );

    if aggregate.is_empty() {
        output.push_str("  no sessions\n");
        return output;
    }

    for zone in ZoneId::ALL {
        output.push_str(&format!(
            "  {} {:<16} {:>8}m {:>5.1}%\n",
            zone,
            zone.description(),
            aggregate.volumes.get(zone),
            aggregate.percentages.get(zone)
        ));
    }
    output
}

/// Format meters as "850m" or "12.4km"
fn format_distance(meters: u64) -> String {
    if meters >= 1000 {
        format!("{:.1}km", meters as f64 / 1000.0)
    } else {
        format!("{}m", meters)
    }
}
