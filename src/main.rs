use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tripcanvas::application::workflow::OutpaintSession;
use tripcanvas::config::WorkflowConfig;
use tripcanvas::domain::image::SourceImage;
use tripcanvas::domain::location::{DEFAULT_LANDMARK, Landmark};
use tripcanvas::infrastructure::http::http_ports;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Photo to outpaint (raster image, at most 10 MiB)
    input: PathBuf,

    /// Landmark backdrop to composite against
    #[arg(long, default_value = DEFAULT_LANDMARK)]
    location: String,

    /// JSON file overriding endpoints and fee (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the result.png is saved into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WorkflowConfig::from_file(path).into_diagnostic()?,
        None => WorkflowConfig::default(),
    };

    // Both are local validations; neither touches the network.
    let source = SourceImage::from_path(&cli.input).into_diagnostic()?;
    let location = Landmark::parse(&cli.location).into_diagnostic()?;

    let (store, payments, confirmer, service) = http_ports(&config).into_diagnostic()?;
    let mut session = OutpaintSession::new(store, payments, confirmer, service, config);

    session.process(&source, &location).await.into_diagnostic()?;

    if let Some(path) = session.download_to(&cli.output_dir).into_diagnostic()? {
        println!("saved {}", path.display());
    }
    Ok(())
}
