//! `simulate` subcommand: runs real files through the mock pipeline.

use std::path::PathBuf;

use anyhow::Context;
use log::{info, warn};
use tokio::sync::broadcast::error::RecvError;
use trafficwatch::upload::SimulatorHost;
use trafficwatch::{CandidateFile, Config, UploadEventKind};

use crate::state::AppState;

pub async fn run(config: Config, files: &[PathBuf]) -> anyhow::Result<()> {
    let candidates = files
        .iter()
        .map(|path| {
            CandidateFile::from_path(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let state = AppState::new(config)?;
    let mut events = state.broadcaster.subscribe();
    state.start().await;

    let accepted = state.dashboard.write().await.accept_uploads(&candidates);
    if accepted.len() < candidates.len() {
        warn!(
            "{} of {} files skipped (unsupported type or too large)",
            candidates.len() - accepted.len(),
            candidates.len()
        );
    }
    if accepted.is_empty() {
        state.shutdown().await;
        println!("Nothing to analyze.");
        return Ok(());
    }
    state.wake().await;
    info!("Analyzing {} file(s)", accepted.len());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted, stopping pipeline");
                break;
            }
            event = events.recv() => match event {
                Ok(event) if event.kind != UploadEventKind::Completed => continue,
                Ok(_) | Err(RecvError::Lagged(_)) => {
                    if pending(&state).await == 0 {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    state.shutdown().await;

    let dashboard = state.dashboard.read().await;
    for item in dashboard.uploads() {
        println!(
            "{:<32} {:>12} bytes  {:<10} {:>3}%",
            item.name,
            item.byte_size,
            item.status.to_string(),
            item.progress
        );
    }
    Ok(())
}

async fn pending(state: &AppState) -> usize {
    let summary = state.dashboard.read().await.simulator().summary();
    summary.uploading + summary.processing
}
