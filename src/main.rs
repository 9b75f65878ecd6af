use anyhow::Result;
use clap::Parser;

use stepnav::analytics::{FunnelCollector, TracingCollector};
use stepnav::app::{App, WizardOutcome};
use stepnav::config::Config;
use stepnav::{logging, ui};

#[derive(Parser)]
#[command(name = "stepnav")]
#[command(about = "Demo host for the wizard step navigator")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Allow skipping ahead to unvisited steps
    #[arg(long)]
    allow_skip_to: bool,

    /// Milliseconds of simulated validation delay before forward commits
    #[arg(long)]
    commit_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.allow_skip_to {
        config.wizard.allow_skip_to = true;
    }
    if let Some(ms) = cli.commit_delay_ms {
        config.demo.commit_delay_ms = ms;
    }

    let logging_handle = logging::init_logging(&config, true, cli.debug)?;
    ui::terminal_guard::install_panic_hook();

    let mut app = App::new(config)?;
    app.run().await?;

    // Flush the collected funnel into the log for inspection
    let mut tracer = TracingCollector;
    for event in app.funnel_events() {
        tracer.record(event);
    }

    match app.outcome() {
        Some(WizardOutcome::Submitted) => eprintln!("Wizard submitted."),
        Some(WizardOutcome::Cancelled) => eprintln!("Wizard cancelled."),
        None => {}
    }
    if let Some(path) = &logging_handle.log_file_path {
        eprintln!("Log file: {}", path.display());
    }

    Ok(())
}
