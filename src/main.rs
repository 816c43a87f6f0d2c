use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paydispatch::app::PaymentSystem;
use paydispatch::config::Settings;
use paydispatch::interfaces::csv::request_reader::RequestReader;
use paydispatch::interfaces::json::response_writer::ResponseWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Requests CSV file with header `action,amount,method`
    input: PathBuf,

    /// TOML settings file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Method selected at startup, overriding the settings file
    #[arg(long)]
    default_method: Option<String>,

    /// Complete simulated backend steps immediately
    #[arg(long)]
    no_latency: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).into_diagnostic()?;
    if let Some(method) = cli.default_method {
        settings.payment.default_method = method;
    }
    if cli.no_latency {
        settings.payment.simulate_latency = false;
    }

    let system = PaymentSystem::from_settings(&settings).into_diagnostic()?;

    // Ctrl-C interrupts whatever backend step is in flight
    let interrupt = system.interrupt.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received");
            interrupt.interrupt();
        }
    });

    let api = system.api();
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    for request in reader.requests() {
        match request {
            Ok(request) => {
                let response = api.handle(&request).await;
                writer.write_response(&response).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading request: {}", e);
            }
        }
    }

    Ok(())
}
