//! Purpose: Execute parsed CLI commands.
//! Role: Maps `Command` variants onto the library (server, variant echo, comparison).
//! Invariants: Input is read fully before any transform runs.
//! Invariants: `compare` reports per-variant failures inline and still exits 0.
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::net::SocketAddr;
use std::path::Path;

use jsonecho::serve::{ServeConfig, init_tracing, serve};
use jsonecho::{Error, ErrorKind, Variant};
use serde_json::json;

use super::Command;

pub(super) fn dispatch_command(command: Command) -> Result<i32, Error> {
    match command {
        Command::Serve(args) => {
            let bind: SocketAddr = args.bind.parse().map_err(|_| {
                Error::new(ErrorKind::Usage)
                    .with_message("invalid bind address, expected host:port like 127.0.0.1:8181")
            })?;
            let config = ServeConfig {
                bind,
                max_body_bytes: args.max_body_bytes,
                allow_non_loopback: args.allow_non_loopback,
            };
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to start runtime")
                        .with_source(err)
                })?;
            runtime.block_on(serve(config))?;
            Ok(0)
        }
        Command::Echo { variant, file } => {
            init_tracing("warn");
            let variant = lookup_variant(&variant)?;
            let input = read_input(file.as_deref())?;
            let output = variant.echo(&input)?;
            let mut body = output.body;
            if io::stdout().is_terminal() {
                body.push(b'\n');
            }
            write_stdout(&body)?;
            Ok(0)
        }
        Command::Compare { file } => {
            init_tracing("warn");
            let input = read_input(file.as_deref())?;
            write_stdout(compare_report(&input).as_bytes())?;
            Ok(0)
        }
        Command::Variants => {
            let variants: Vec<serde_json::Value> =
                Variant::all().iter().map(Variant::describe).collect();
            let text = serde_json::to_string_pretty(&json!({ "variants": variants })).map_err(
                |err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to encode variants")
                        .with_source(err)
                },
            )?;
            write_stdout(format!("{text}\n").as_bytes())?;
            Ok(0)
        }
    }
}

fn lookup_variant(name: &str) -> Result<&'static Variant, Error> {
    Variant::lookup(name).ok_or_else(|| {
        let known: Vec<&str> = Variant::all().iter().map(|variant| variant.name).collect();
        Error::new(ErrorKind::NotFound).with_message(format!(
            "unknown echo variant '{name}' (known: {})",
            known.join(", ")
        ))
    })
}

/// One `name: output` line per variant, sorted by name.
fn compare_report(input: &[u8]) -> String {
    let mut variants: Vec<&Variant> = Variant::all().iter().collect();
    variants.sort_by_key(|variant| variant.name);

    let mut report = String::new();
    for variant in variants {
        match variant.echo(input) {
            Ok(output) => {
                report.push_str(variant.name);
                report.push_str(": ");
                report.push_str(&String::from_utf8_lossy(&output.body));
            }
            Err(err) => report.push_str(&format!("{}: error: {err}", variant.name)),
        }
        report.push('\n');
    }
    report
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>, Error> {
    match file {
        Some(path) => fs::read(path).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
        None => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(input)
        }
    }
}

fn write_stdout(bytes: &[u8]) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write stdout")
                .with_source(err)
        })
}
