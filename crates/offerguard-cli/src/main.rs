mod display;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use offerguard_client::{AnalysisClient, ClientConfig, DEFAULT_BASE_URL};
use offerguard_core::{
    DocumentFormat, FileCandidate, InertReason, ResultScreen, SubmissionInput, SubmissionMode,
    SubmissionWorkflow, SubmitOutcome,
};
use tracing_subscriber::EnvFilter;

const EXIT_ANALYSIS_FAILED: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;

/// Verify the authenticity of an offer letter.
///
/// Submits a document or pasted text to the OfferGuard analysis service and
/// prints its verdict.
#[derive(Parser, Debug)]
#[command(name = "offerguard", version, about = "Verify the authenticity of offer letters", long_about = None)]
struct Cli {
    /// Analysis service API root.
    #[arg(long, env = "OFFERGUARD_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// Emit the report as JSON instead of a card.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Log request progress to stderr.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PDF, DOC or DOCX document.
    File {
        /// Path to the document.
        path: PathBuf,
    },

    /// Submit offer letter text.
    ///
    /// Reads TEXT, or the file given with `--from`, or stdin when neither is set.
    Text {
        text: Option<String>,

        /// Read the text from a file.
        #[arg(long, conflicts_with = "text")]
        from: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::info!("offerguard v{}", env!("CARGO_PKG_VERSION"));

    let mut input = SubmissionInput::new();
    match &cli.command {
        Command::File { path } => {
            input.select_mode(SubmissionMode::File);
            if let Err(e) = input.accept_file(read_candidate(path)?) {
                eprintln!("error: {e}");
                return Ok(ExitCode::from(EXIT_INVALID_INPUT));
            }
        }
        Command::Text { text, from } => {
            input.select_mode(SubmissionMode::Text);
            input.update_text(read_text(text.as_deref(), from.as_deref())?);
        }
    }

    let client = AnalysisClient::new(ClientConfig {
        base_url: cli.api_url.clone(),
    });
    let mut workflow = SubmissionWorkflow::new();

    match workflow.submit(&input, &client).await {
        SubmitOutcome::HandedOff(result) => {
            let screen = ResultScreen::from_handoff(Some(result));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&screen)?);
            } else {
                display::print_result_card(&screen)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed(message) => {
            eprintln!("error: {message}");
            Ok(ExitCode::from(EXIT_ANALYSIS_FAILED))
        }
        SubmitOutcome::Inert(reason) => {
            let why = match reason {
                InertReason::NothingToSubmit => match input.mode() {
                    SubmissionMode::File => "no document selected",
                    SubmissionMode::Text => "text is empty",
                },
                InertReason::InFlight => "a submission is already in progress",
            };
            eprintln!("Nothing to submit: {why}");
            Ok(ExitCode::from(EXIT_INVALID_INPUT))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load a file from disk as an upload candidate, typing it by extension.
fn read_candidate(path: &Path) -> anyhow::Result<FileCandidate> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading document {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = DocumentFormat::from_file_name(&file_name)
        .map(|f| f.mime_type().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(FileCandidate {
        bytes,
        file_name,
        mime_type,
    })
}

fn read_text(text: Option<&str>, from: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    if let Some(path) = from {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading text from {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading text from stdin")?;
    Ok(buf)
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
    fn candidate_is_typed_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Offer.DOCX");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let candidate = read_candidate(&path).unwrap();
        assert_eq!(candidate.file_name, "Offer.DOCX");
        assert_eq!(candidate.mime_type, DocumentFormat::Docx.mime_type());
        assert_eq!(candidate.bytes, b"PK\x03\x04");
    }

    #[test]
    fn unknown_extension_gets_opaque_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let candidate = read_candidate(&path).unwrap();
        assert_eq!(candidate.mime_type, "application/octet-stream");
    }

    #[test]
    fn text_argument_wins() {
        assert_eq!(read_text(Some("offer"), None).unwrap(), "offer");
    }

    #[test]
    fn text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letter.txt");
        std::fs::write(&path, "Dear John").unwrap();
        assert_eq!(read_text(None, Some(&path)).unwrap(), "Dear John");
    }

    #[test]
    fn missing_document_is_an_error() {
        let err = read_candidate(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(err.to_string().contains("reading document"));
    }
}
