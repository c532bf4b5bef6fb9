use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::checker::check_host;
use crate::config::RunConfig;
use crate::progress::ProgressSink;
use crate::transport::Transport;
use crate::types::HostResult;

/// Check every host with at most `config.workers` checks in flight.
///
/// - Limits concurrent checks using a `Semaphore`; a permit is taken before each spawn
///   and held by the task until its check is done.
/// - Results come back in input order, whatever order the checks finish in.
/// - Sends one progress signal per finished host to `sink`, which is drained by a
///   separate task; the call returns after the sink has seen all of them.
/// - A check task that panics leaves its host marked unreachable.
pub async fn run_checks<T, S>(
    transport: Arc<T>,
    hosts: &[String],
    config: &RunConfig,
    sink: S,
) -> Vec<HostResult>
where
    T: Transport,
    S: ProgressSink,
{
    let mut out: Vec<HostResult> = hosts.iter().map(HostResult::unreachable).collect();
    if hosts.is_empty() {
        return out;
    }

    info!(hosts = hosts.len(), workers = config.workers, "run started");

    let (progress_tx, progress_rx) = mpsc::channel::<()>(hosts.len());
    let drain = tokio::spawn(drain_progress(progress_rx, sink));

    let sem = Arc::new(Semaphore::new(config.workers.max(1)));
    let mut set = JoinSet::new();
    let mut index_of = HashMap::with_capacity(hosts.len());
    let timeouts = config.timeouts;

    for (idx, host) in hosts.iter().enumerate() {
        let permit = match sem.clone().acquire_owned().await {
            Ok(p) => p,
            // Never closed while the run holds `sem`.
            Err(_) => break,
        };
        let transport = transport.clone();
        let progress = progress_tx.clone();
        let host = host.clone();

        let handle = set.spawn(async move {
            let _permit = permit;
            let r = check_host(transport.as_ref(), &host, &timeouts).await;
            // Capacity equals the host count, so this never waits.
            let _ = progress.send(()).await;
            (idx, r)
        });
        index_of.insert(handle.id(), idx);
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, r)) => out[idx] = r,
            Err(e) => {
                let host = index_of.get(&e.id()).map(|&i| hosts[i].as_str()).unwrap_or("?");
                error!(host, error = %e, "host check aborted");
                let _ = progress_tx.try_send(());
            }
        }
    }

    drop(progress_tx);
    if let Err(e) = drain.await {
        error!(error = %e, "progress sink failed");
    }

    info!(hosts = hosts.len(), "run finished");
    out
}

async fn drain_progress<S: ProgressSink>(mut rx: mpsc::Receiver<()>, mut sink: S) {
    while rx.recv().await.is_some() {
        sink.advance();
    }
    sink.finish();
}
