use std::io::{self, Write};
use std::path::Path;

use crate::sim::runner::TrajectoryPoint;

/// Summary statistics computed from a relative trajectory.
#[derive(Debug, Clone)]
pub struct ApproachSummary {
    pub initial_range: f64,  // m
    pub final_range: f64,    // m
    pub min_range: f64,      // m
    pub min_range_time: f64, // s
    pub max_speed: f64,      // relative, m/s
    pub max_rate: f64,       // relative angular rate, rad/s
    pub final_mrp_norm: f64, // dimensionless
    pub duration: f64,       // s
}

impl ApproachSummary {
    /// Compute summary from trajectory data. `None` for an empty trajectory.
    pub fn from_trajectory(trajectory: &[TrajectoryPoint]) -> Option<Self> {
        let first = trajectory.first()?;
        let last = trajectory.last()?;

        let closest = trajectory
            .iter()
            .min_by(|a, b| a.state.range().total_cmp(&b.state.range()))?;

        let max_speed = trajectory
            .iter()
            .map(|p| p.state.v.norm())
            .fold(0.0_f64, f64::max);

        let max_rate = trajectory
            .iter()
            .map(|p| p.state.omega.norm())
            .fold(0.0_f64, f64::max);

        Some(ApproachSummary {
            initial_range: first.state.range(),
            final_range: last.state.range(),
            min_range: closest.state.range(),
            min_range_time: closest.time,
            max_speed,
            max_rate,
            final_mrp_norm: last.state.sigma.norm(),
            duration: last.time - first.time,
        })
    }
}

/// Write approach summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    scenario: &str,
    summary: &ApproachSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    let scenario = scenario.replace('\\', "\\\\").replace('"', "\\\"");
    writeln!(writer, "  \"scenario\": \"{}\",", scenario)?;
    writeln!(writer, "  \"approach\": {{")?;
    writeln!(writer, "    \"initial_range_m\": {:.3},", summary.initial_range)?;
    writeln!(writer, "    \"final_range_m\": {:.3},", summary.final_range)?;
    writeln!(writer, "    \"min_range_m\": {:.3},", summary.min_range)?;
    writeln!(writer, "    \"min_range_time_s\": {:.2},", summary.min_range_time)?;
    writeln!(writer, "    \"max_speed_ms\": {:.4},", summary.max_speed)?;
    writeln!(writer, "    \"max_rate_rads\": {:.6},", summary.max_rate)?;
    writeln!(writer, "    \"final_mrp_norm\": {:.6},", summary.final_mrp_norm)?;
    writeln!(writer, "    \"duration_s\": {:.2}", summary.duration)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write approach summary JSON to a file.
pub fn write_summary_file(
    path: impl AsRef<Path>,
    scenario: &str,
    summary: &ApproachSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, scenario, summary)
}
