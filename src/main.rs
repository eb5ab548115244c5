//! Purpose: `jsonecho` CLI entry point.
//! Role: Binary crate root; parses args, runs the server or a local echo, emits results on stdout.
//! Invariants: Echo output bytes are written verbatim (no re-encoding).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use jsonecho::serve::{DEFAULT_MAX_BODY_BYTES, error_envelope};
use jsonecho::{Error, ErrorKind, to_exit_code};

mod command_dispatch;

fn main() {
    let exit_code = match run() {
        Ok(exit_code) => exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(exit_code);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage).with_message(clap_error_summary(&err)));
            }
        },
    };

    command_dispatch::dispatch_command(cli.command)
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or("invalid arguments");
    first.trim_start_matches("error: ").to_string()
}

#[derive(Parser)]
#[command(
    name = "jsonecho",
    version,
    about = "JSON round-trip echo service for comparing parser behavior",
    long_about = None,
    after_help = r#"EXAMPLES
  $ jsonecho serve --bind 127.0.0.1:8181
  $ curl -s --data-binary '{"x":+1.10}' http://127.0.0.1:8181/hapiecho
  $ jsonecho echo --variant ibmecho payload.json
  $ jsonecho compare payload.json
  $ jsonecho variants"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(about = "Serve every echo variant over HTTP (POST /<variant>)")]
    Serve(ServeArgs),
    #[command(about = "Echo one document through a single variant")]
    Echo {
        #[arg(long, default_value = "echo", help = "Variant name (see `jsonecho variants`)")]
        variant: String,
        #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    #[command(about = "Echo one document through every variant, one line per variant")]
    Compare {
        #[arg(help = "Input file (default: stdin)", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    #[command(about = "List configured variants and their policies as JSON")]
    Variants,
}

#[derive(Args)]
pub(crate) struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:8181", help = "Bind address (host:port)")]
    pub(crate) bind: String,
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_BODY_BYTES,
        help = "Maximum request body size in bytes"
    )]
    pub(crate) max_body_bytes: u64,
    #[arg(long, help = "Allow binding to a non-loopback address")]
    pub(crate) allow_non_loopback: bool,
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        return;
    }

    let json = serde_json::to_string(&error_envelope(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}
