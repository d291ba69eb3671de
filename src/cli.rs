use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use paystub_underwriter::api::{create_router, AppState};
use paystub_underwriter::config::{ConfigLoader, UnderwriterConfig};
use paystub_underwriter::error::{UnderwritingError, UnderwritingResult};
use paystub_underwriter::extraction::extract_from_documents;
use paystub_underwriter::models::BorrowerFact;
use paystub_underwriter::pipeline::UnderwritingPipeline;
use paystub_underwriter::telemetry;
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "paystub-underwriter",
    about = "Extract paystub facts and evaluate qualifying income",
    version
)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the payroll facts found in one or more paystub text files
    Extract(ExtractArgs),
    /// Extract payroll facts and evaluate qualifying income
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Paystub text files, combined in the order given
    #[arg(long = "text", required = true, num_args = 1..)]
    text: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Paystub text files, combined in the order given
    #[arg(long = "text", required = true, num_args = 1..)]
    text: Vec<PathBuf>,
    /// JSON file holding the borrower record
    #[arg(long)]
    borrower: Option<PathBuf>,
}

pub(crate) async fn run() -> UnderwritingResult<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load(cli.config.as_deref())?;
    telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(config, args).await,
        Command::Extract(args) => {
            let documents = read_documents(&args.text)?;
            print_json(&extract_from_documents(&documents))
        }
        Command::Evaluate(args) => {
            let documents = read_documents(&args.text)?;
            let borrower = match &args.borrower {
                Some(path) => BorrowerFact::from_json_str(&read_file(path)?)?,
                None => BorrowerFact::new(),
            };
            let pipeline = UnderwritingPipeline::from_config(&config)?;
            let outcome = pipeline.underwrite_documents(&documents, &borrower).await;
            print_json(&outcome.decision)
        }
    }
}

async fn serve(mut config: UnderwriterConfig, mut args: ServeArgs) -> UnderwritingResult<()> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let pipeline = UnderwritingPipeline::from_config(&config)?;
    let model_configured = pipeline.evaluator().is_configured();
    let app = create_router(AppState::new(pipeline));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(server_error)?;

    info!(%addr, model = %config.model.model, model_configured, "Paystub underwriter ready");

    axum::serve(listener, app).await.map_err(server_error)
}

fn read_documents(paths: &[PathBuf]) -> UnderwritingResult<Vec<String>> {
    paths.iter().map(|path| read_file(path)).collect()
}

fn read_file(path: &Path) -> UnderwritingResult<String> {
    fs::read_to_string(path).map_err(|e| UnderwritingError::DocumentRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn print_json<T: Serialize>(value: &T) -> UnderwritingResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(output_error)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).map_err(output_error)
}

fn server_error(error: io::Error) -> UnderwritingError {
    UnderwritingError::Server {
        message: error.to_string(),
    }
}

fn output_error(error: impl ToString) -> UnderwritingError {
    UnderwritingError::Output {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["paystub-underwriter"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_evaluate_accepts_several_documents() {
        let cli = Cli::try_parse_from([
            "paystub-underwriter",
            "evaluate",
            "--text",
            "jan.txt",
            "feb.txt",
            "--borrower",
            "borrower.json",
            "--config",
            "config/underwriter.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("config/underwriter.yaml")));
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.text.len(), 2);
                assert_eq!(args.borrower, Some(PathBuf::from("borrower.json")));
            }
            other => panic!("expected evaluate, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_requires_text() {
        assert!(Cli::try_parse_from(["paystub-underwriter", "extract"]).is_err());
    }

    #[test]
    fn test_missing_file_is_document_read_error() {
        let error = read_file(Path::new("/nonexistent/paystub.txt")).unwrap_err();
        assert!(matches!(error, UnderwritingError::DocumentRead { .. }));
        assert!(error.to_string().starts_with("Failed to read '/nonexistent/paystub.txt'"));
    }
}
