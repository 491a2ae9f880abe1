use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use beacon_sim::config::Scenario;
use beacon_sim::io::{self, DirectoryStore, RunStore, RunSummary};
use beacon_sim::sim::{self, EventKind, RunOutput};
use beacon_sim::Result;

/// Simulate a drone sweeping a slope for a buried beacon.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario TOML file. The reference 35 deg slope run is used if omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Write the pose history as CSV.
    #[arg(long)]
    trajectory: Option<PathBuf>,

    /// Write the signal samples as CSV.
    #[arg(long)]
    measurements: Option<PathBuf>,

    /// Write the run summary as JSON.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Store the run under this directory.
    #[arg(long)]
    store: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };

    let output = sim::simulate(&scenario)?;
    let summary = RunSummary::from_run(scenario.description.clone(), &output);

    print_report(&scenario, &output, &summary);

    if let Some(path) = &cli.trajectory {
        io::csv::write_pose_history_file(path, &output.pose_history)?;
    }
    if let Some(path) = &cli.measurements {
        io::csv::write_measurements_file(path, &output.measurements)?;
    }
    if let Some(path) = &cli.summary {
        io::json::write_summary_file(path, &summary)?;
    }
    if let Some(dir) = &cli.store {
        let mut store = DirectoryStore::open(dir)?;
        let id = store.save(&scenario.description, &output)?;
        println!("  Stored as run {} in {}", id, store.run_dir(id).display());
    }
    Ok(())
}

fn print_report(scenario: &Scenario, out: &RunOutput, summary: &RunSummary) {
    let v = &scenario.vehicle;
    let s = &scenario.slope;

    println!();
    println!("====================================================================");
    println!("  BEACON SEARCH SIMULATION — {}", scenario.description);
    println!("====================================================================");
    println!();
    println!("  Setup");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Slope:         {:>6.0} x {:<6.0}  angle {:>5.1} deg",
        s.width, s.height, s.angle
    );
    println!(
        "  Speed limit:   {:>8.2}       Turn rate:    {:>8.2} deg",
        v.speed_limit, v.angular_rate_limit
    );
    println!("  Start:         {}", out.start);
    match &out.beacon {
        Some(b) => println!("  Beacon:        {}", b),
        None => println!("  Beacon:        none"),
    }
    println!(
        "  Timestep:      {:>8.3}       Waypoints:    {:>8}",
        scenario.sim.dt,
        out.report.reached.len() + out.report.abandoned.len()
    );
    println!();

    println!("  Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &out.events {
        let label = match &e.kind {
            EventKind::WaypointReached { index } => format!("REACHED    wp {}", index),
            EventKind::WaypointAbandoned { index } => format!("ABANDONED  wp {}", index),
            EventKind::ClosestApproach { distance } => format!("CLOSEST    {:.2}", distance),
            EventKind::StrengthCrossed { threshold, rising } => format!(
                "STRENGTH   {} {:.2}",
                if *rising { "above" } else { "below" },
                threshold
            ),
            EventKind::Custom(s) => s.clone(),
        };
        println!("  {:<24} t={:>7.2}   {}", label, e.time, e.pose);
    }
    println!();

    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Steps:         {:>8}   (accepted {}, rejected {})",
        out.report.steps, out.report.accepted, out.report.rejected
    );
    println!("  Flight time:   {:>8.2}", summary.flight_time);
    println!("  Path length:   {:>8.2}", summary.path_length);
    if let Some(d) = summary.closest_approach {
        println!("  Closest:       {:>8.2}", d);
    }
    println!("  Samples:       {:>8}", summary.samples);
    println!("  Final pose:    {}", out.final_pose);
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>8}  {:>8}  {:>8}  {:>7}  {:>10}",
        "t", "x", "y", "z", "yaw", "strength"
    );
    println!("  {}", "─".repeat(60));

    let sample_interval = (out.measurements.len() / 30).max(1);
    let last = out.measurements.len().saturating_sub(1);
    for (i, m) in out.measurements.iter().enumerate() {
        if i % sample_interval != 0 && i != last {
            continue;
        }
        println!(
            "  {:>7.2}  {:>8.2}  {:>8.2}  {:>8.2}  {:>7.1}  {:>10.3}",
            m.timestamp,
            m.pose.x(),
            m.pose.y(),
            m.pose.z(),
            m.pose.yaw(),
            m.strength
        );
    }

    println!();
    println!("  Simulation: {} poses, dt={}", out.pose_history.len(), scenario.sim.dt);
    println!("====================================================================");
    println!();
}
