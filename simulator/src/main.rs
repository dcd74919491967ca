use anyhow::Context;
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

use bridge::SpectrumBridge;
use workflow::{Runner, ScanJobConfig};

mod bridge;
mod hardware;
mod rf;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline spectrum scan driver")]
struct Args {
    /// Run one scan job against the synthetic band and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a scan job from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 144_000_000)]
    start_hz: u32,
    #[arg(long, default_value_t = 148_000_000)]
    end_hz: u32,
    /// Index into the scan step table
    #[arg(long, default_value_t = 5)]
    step_index: usize,
    #[arg(long, default_value_t = 4)]
    passes: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep the HTTP bridge alive for incoming scan jobs
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let job = if let Some(path) = args.workflow {
        ScanJobConfig::load(path)?
    } else {
        ScanJobConfig::from_args(args.start_hz, args.end_hz, args.step_index, args.passes, args.seed)
    };

    let runner = Runner::new(job.clone());
    let spectrum_bridge = SpectrumBridge::new();

    if args.offline {
        let report = runner.execute()?;

        println!(
            "Offline scan -> {} passes, {} squelch opens, {} loot entries, {} columns filled",
            report.passes_completed,
            report.squelch_opens,
            report.loot.len(),
            report.filled_points
        );

        spectrum_bridge.publish(&report.model)?;
        spectrum_bridge.publish_status("Offline scan results ready.");

        let summary = format!(
            "range={}..{} passes={} opens={} loot={:?}\n",
            job.start_hz,
            job.end_hz,
            report.passes_completed,
            report.squelch_opens,
            report.caught_frequencies()
        );
        let report_path = PathBuf::from("tools/data/offline_scan.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(summary.as_bytes())?;
    }
    if args.serve {
        spectrum_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
