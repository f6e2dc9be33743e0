use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use kit_core::{CampaignSpec, SourceAsset};
use kit_engine::KitOrchestrator;
use kit_studio::{AppState, StudioConfig, app, write_kit};
use kit_telemetry::TelemetryConfig;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "kit-studio")]
#[command(about = "Turn a campaign brief into a gallery of marketing assets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API and, optionally, the frontend
    Serve(ServeArgs),
    /// Generate one kit from the command line and write it to a directory
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "KIT_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "KIT_PORT", default_value_t = 3000)]
    port: u16,

    /// Directory with the built frontend
    #[arg(long = "static", value_name = "DIR")]
    static_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Campaign JSON file, same shape as the form submission
    #[arg(long, value_name = "FILE")]
    campaign: PathBuf,

    /// Source photo
    #[arg(long, value_name = "FILE", required_unless_present = "generate_source")]
    image: Option<PathBuf>,

    /// Synthesize the source photo from the campaign description instead
    #[arg(long, conflicts_with = "image")]
    generate_source: bool,

    /// Customer selfie for the customer-ad stage
    #[arg(long, value_name = "FILE")]
    selfie: Option<PathBuf>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    kit_telemetry::init_with_config(TelemetryConfig::from_env())?;

    let config = StudioConfig::from_env()?;
    let result = match cli.command {
        Command::Serve(args) => serve(config, args).await,
        Command::Run(args) => run(config, args).await,
    };
    kit_telemetry::shutdown_telemetry();
    result
}

async fn serve(config: StudioConfig, args: ServeArgs) -> anyhow::Result<()> {
    let state = match config.generator() {
        Ok(generator) => AppState::new(Arc::new(generator)),
        Err(e) => {
            warn!(error = %e, "generation disabled until an API key is configured");
            AppState::unconfigured()
        }
    };

    let router = app(state, args.static_dir.as_deref());
    let addr = SocketAddr::new(args.host, args.port);
    info!(%addr, model = %config.image_model, "kit studio listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router).await?;
    Ok(())
}

async fn run(config: StudioConfig, args: RunArgs) -> anyhow::Result<()> {
    let orchestrator = KitOrchestrator::new(config.generator()?);

    let raw = std::fs::read(&args.campaign)
        .with_context(|| format!("failed to read {}", args.campaign.display()))?;
    let spec: CampaignSpec = serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not a valid campaign", args.campaign.display()))?;

    let source = match (&args.image, args.generate_source) {
        (Some(path), _) => SourceAsset::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        (None, true) => orchestrator.generate_source_image(&spec).await?,
        (None, false) => bail!("either --image or --generate-source is required"),
    };
    let selfie = args
        .selfie
        .as_deref()
        .map(SourceAsset::from_path)
        .transpose()
        .context("failed to load selfie")?;

    let kit = orchestrator.generate_kit(&spec, &source, selfie.as_ref()).await?;
    let written = write_kit(&kit, &args.out)?;
    info!(kit.id = %kit.id, files = written.len(), out = %args.out.display(), "kit written");
    println!("Wrote {} files to {}", written.len(), args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_requires_an_image_source() {
        let err = Cli::try_parse_from(["kit-studio", "run", "--campaign", "c.json", "--out", "o"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from([
            "kit-studio",
            "run",
            "--campaign",
            "c.json",
            "--generate-source",
            "--out",
            "o",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Run(RunArgs { generate_source: true, .. })));
    }

    #[test]
    fn serve_defaults_to_loopback() {
        let cli = Cli::try_parse_from(["kit-studio", "serve"]).unwrap();
        let Command::Serve(args) = cli.command else { panic!("expected serve") };
        assert_eq!(args.host, IpAddr::from([127, 0, 0, 1]));
        assert!(args.static_dir.is_none());
    }
}
