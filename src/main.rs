mod bookings;
mod catalog;
mod config;
mod engine;
mod filter;
mod ipc;
mod metrics;
mod mock;
mod query;
mod schedule;

use anyhow::Context;
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // stdout carries responses; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roombookd=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = config::Config::from_env().context("failed to load configuration")?;
    let mut state = ipc::AppState::new(config);
    info!(version = env!("CARGO_PKG_VERSION"), "roombookd ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = stdin.lock();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        // Raw bytes: one undecodable line must not end the session.
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let parsed = std::str::from_utf8(&buf)
            .map_err(|e| e.to_string())
            .and_then(|line| serde_json::from_str::<ipc::Request>(line).map_err(|e| e.to_string()));
        let req = match parsed {
            Ok(v) => v,
            Err(message) => {
                // Can't reply with an id.
                warn!(error = %message, "unparseable request");
                let resp = json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": message }
                });
                writeln!(stdout, "{}", resp)?;
                stdout.flush()?;
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        writeln!(stdout, "{}", resp)?;
        stdout.flush()?;
    }

    info!("stdin closed, exiting");
    Ok(())
}
