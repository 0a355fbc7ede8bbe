//! XClipper CLI - Clip X posts into markdown notes

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xclipper::{ClipError, ClipResult, Clipper};

/// Output format when printing instead of saving
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown document
    #[default]
    Md,
    /// JSON clip result
    Json,
}

/// XClipper - save X posts as markdown notes
#[derive(Parser, Debug)]
#[command(name = "xclipper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a post and save it as a note
    Clip {
        /// Post URL (https://x.com/<user>/status/<id>)
        url: String,

        /// X API bearer token
        #[arg(long, env = "X_BEARER_TOKEN", hide_env_values = true)]
        token: String,

        /// Vault root directory
        #[arg(long, default_value = ".")]
        vault: PathBuf,

        /// Folder inside the vault (empty for the vault root)
        #[arg(long, default_value = "")]
        folder: String,

        /// Print the note instead of saving it
        #[arg(long)]
        stdout: bool,

        /// Output format for --stdout
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Clip {
            url,
            token,
            vault,
            folder,
            stdout,
            output,
            user_agent,
        }) => {
            let mut builder = Clipper::builder()
                .bearer_token(token)
                .save_path(folder)
                .vault_root(vault);
            if let Some(ua) = user_agent {
                builder = builder.user_agent(ua);
            }
            let clipper = builder.build();

            let result = if stdout {
                clipper.preview(&url).await
            } else {
                clipper.clip(&url).await
            };

            match result {
                Ok(result) if stdout => print_result(&result, output),
                Ok(result) => writeln_safe(&format!("Clipped: {}", result.filename)),
                Err(e) => {
                    eprintln!("Error: {}", error_message(&e));
                    std::process::exit(1);
                }
            }
        }
        None => {
            eprintln!("Usage: xclipper clip <URL> --token <TOKEN>");
            eprintln!("   or: xclipper --help");
            std::process::exit(1);
        }
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "xclipper=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// User-facing message for a failed clip
fn error_message(err: &ClipError) -> String {
    if err.is_url_error() {
        "Please provide a valid x.com url".to_string()
    } else {
        err.to_string()
    }
}

fn print_result(result: &ClipResult, output: OutputFormat) {
    match output {
        OutputFormat::Md => writeln_safe(&result.body),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                eprintln!("Error serializing result: {}", e);
                std::process::exit(1);
            });
            writeln_safe(&json);
        }
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clip_args() {
        let cli = Cli::try_parse_from([
            "xclipper",
            "clip",
            "https://x.com/ada/status/1",
            "--token",
            "abc",
            "--folder",
            "Clippings",
            "--stdout",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Clip {
                url,
                token,
                vault,
                folder,
                stdout,
                output,
                user_agent,
            }) => {
                assert_eq!(url, "https://x.com/ada/status/1");
                assert_eq!(token, "abc");
                assert_eq!(vault, PathBuf::from("."));
                assert_eq!(folder, "Clippings");
                assert!(stdout);
                assert!(matches!(output, OutputFormat::Json));
                assert!(user_agent.is_none());
            }
            None => panic!("expected clip command"),
        }
    }

    #[test]
    fn test_url_errors_use_generic_prompt() {
        assert_eq!(
            error_message(&ClipError::WrongDomain),
            "Please provide a valid x.com url"
        );
        assert_eq!(
            error_message(&ClipError::IdNotFound),
            "Please provide a valid x.com url"
        );
    }

    #[test]
    fn test_api_errors_keep_their_message() {
        assert_eq!(
            error_message(&ClipError::RateLimited),
            "Rate limited by X API. Try again later."
        );
        assert_eq!(
            error_message(&ClipError::AuthenticationFailed(403)),
            "Authentication failed (403). Check your Bearer Token in settings."
        );
    }

    #[test]
    fn test_json_result_omits_missing_path() {
        let result = ClipResult {
            post_id: "1".to_string(),
            filename: "Ada on X - hi".to_string(),
            path: None,
            body: "---\n---\nhi".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"path\""));
        assert!(json.contains("\"filename\":\"Ada on X - hi\""));
    }
}
