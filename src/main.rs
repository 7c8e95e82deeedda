use std::process::ExitCode;

use nalgebra::Vector3;

use rendezvous_sim::io::{self, ApproachSummary, StateLogger};
use rendezvous_sim::sim::{
    self, CircularOrbitTarget, ClosestApproachDetector, EventDetector, EventKind, RangeDetector,
    SimConfig,
};
use rendezvous_sim::gnc::ZeroControl;
use rendezvous_sim::{ChaserParams, RelativeDynamicsModel, RelativeState, SimError, EARTH};

const SCENARIO: &str = "Along-track drift past a target in 400 km LEO";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimError> {
    // -----------------------------------------------------------------------
    // Chaser: 100 kg smallsat, principal axes aligned with body frame
    // -----------------------------------------------------------------------
    let chaser = ChaserParams::diagonal(100.0, 50.0, 50.0, 80.0)?;

    // Target on a circular 400 km orbit
    let target = CircularOrbitTarget::from_altitude(EARTH, 400_000.0)?;

    // Start 150 m out along the orbit track, drifting back at 0.2 m/s,
    // with a small attitude offset and tumble.
    let initial = RelativeState::new(
        Vector3::new(0.02, -0.01, 0.05),
        Vector3::new(0.0, 0.0, 0.002),
        Vector3::new(20.0, 150.0, 0.0),
        Vector3::new(0.0, -0.2, 0.0),
    );

    let config = SimConfig {
        dt: 0.5,
        max_time: 1800.0,
        log_every: 10,
        ..Default::default()
    };

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let mut model = RelativeDynamicsModel::new(chaser, initial);
    let mut logger = StateLogger::create("logs")?;
    let out = sim::simulate_with(
        &mut model,
        &target,
        &mut ZeroControl,
        &config,
        Some(&mut logger as &mut dyn io::StepLogger),
    )?;
    logger.flush()?;

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(RangeDetector::new(100.0, true)),
        Box::new(ClosestApproachDetector),
        Box::new(RangeDetector::new(100.0, false)),
    ];
    let events = sim::scan_events(&out.trajectory, &mut detectors);

    let Some(summary) = ApproachSummary::from_trajectory(&out.trajectory) else {
        return Ok(());
    };

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  RELATIVE DYNAMICS: {}", SCENARIO);
    println!("====================================================================");
    println!();
    println!("  Setup");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Chaser mass:   {:>8.1} kg    Target orbit: {:>8.1} km",
        model.params().mass(),
        target.radius() / 1000.0
    );
    println!(
        "  Mean motion:   {:>8.3e} rad/s  Period:     {:>8.1} min",
        target.mean_motion(),
        target.period() / 60.0
    );
    println!();

    println!("  Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    if events.is_empty() {
        println!("  (none)");
    }
    for e in &events {
        let label = match &e.kind {
            EventKind::RangeInbound { threshold } => format!("INBOUND  {threshold:.0} m"),
            EventKind::RangeOutbound { threshold } => format!("OUTBOUND {threshold:.0} m"),
            EventKind::ClosestApproach { range } => format!("CLOSEST  {range:.2} m"),
        };
        println!("  t={:>7.1}s   {}", e.time, label);
    }
    println!();

    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Initial range: {:>10.2} m", summary.initial_range);
    println!(
        "  Min range:     {:>10.2} m   at t={:.1} s",
        summary.min_range, summary.min_range_time
    );
    println!("  Final range:   {:>10.2} m", summary.final_range);
    println!("  Max speed:     {:>10.4} m/s", summary.max_speed);
    println!("  Max rate:      {:>10.6} rad/s", summary.max_rate);
    println!("  Final |sigma|: {:>10.6}", summary.final_mrp_norm);
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}  {:>8}",
        "t (s)", "x (m)", "y (m)", "z (m)", "range", "|sigma|"
    );
    println!("  {}", "─".repeat(62));

    let sample_interval = (out.trajectory.len() / 20).max(1);
    for (i, p) in out.trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != out.trajectory.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.1}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}  {:>8.4}",
            p.time,
            p.state.rho.x,
            p.state.rho.y,
            p.state.rho.z,
            p.state.range(),
            p.state.sigma.norm()
        );
    }

    println!();
    println!(
        "  Simulation: {} points, dt={} s, {} rows logged to {}",
        out.trajectory.len(),
        config.dt,
        logger.rows(),
        logger.path().map(|p| p.display().to_string()).unwrap_or_default()
    );
    println!("====================================================================");
    println!();

    io::write_summary_file("logs/summary.json", SCENARIO, &summary)
        .map_err(|e| SimError::Log(e.into()))?;
    Ok(())
}
