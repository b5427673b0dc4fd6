//! Terminal narrator for the reconciliation explainer.
//!
//! Reads commands from stdin, drives an [`Explainer`](reconcile_lab::Explainer)
//! with real timers and prints each panel as plain text. Logs go to stderr
//! (`RUST_LOG` controls the filter).

mod commands;
mod error;
mod paths;
mod render;
mod scheduler;
mod session;

use reconcile_lab::Era;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::parse;
use crate::error::PlayerError;
use crate::paths::{apply_env_overrides, AppPaths};
use crate::scheduler::TokioScheduler;
use crate::session::{Reply, Session};

// ═══════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PlayerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths = AppPaths::new()?;
    let settings = match paths.load_settings() {
        Ok(s) => s,
        Err(e) => {
            warn!("Could not load settings: {}", e);
            info!("Starting with default settings");
            Default::default()
        }
    };
    let settings = apply_env_overrides(settings, |key| std::env::var(key).ok());

    let (tx, mut timers) = mpsc::unbounded_channel();
    let mut session = Session::new(TokioScheduler::new(tx), settings, Era::default());

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_out(&mut stdout, &session.panel()).await?;
    write_out(&mut stdout, "type `help` for commands\n").await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let cmd = match parse(&line) {
                    Ok(Some(cmd)) => cmd,
                    Ok(None) => continue,
                    Err(e) => {
                        write_out(&mut stdout, &format!("{e}\n")).await?;
                        continue;
                    }
                };
                match session.apply(cmd) {
                    Reply::Text(text) => write_out(&mut stdout, &text).await?,
                    Reply::SaveSettings => {
                        let msg = match paths.save_settings(session.settings()) {
                            Ok(path) => format!("saved {}\n", path.display()),
                            Err(e) => {
                                error!("Settings save failed: {}", e);
                                format!("save failed: {e}\n")
                            }
                        };
                        write_out(&mut stdout, &msg).await?;
                    }
                    Reply::Quit => break,
                }
            }
            Some(id) = timers.recv() => {
                if let Some(text) = session.on_timer(id) {
                    write_out(&mut stdout, &text).await?;
                }
            }
        }
    }

    info!(era = session.explainer().era().key(), "bye");
    Ok(())
}

async fn write_out(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), PlayerError> {
    stdout.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}
