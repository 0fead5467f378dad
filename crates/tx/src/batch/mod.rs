// Path: crates/tx/src/batch/mod.rs
//! The batch submission supervisor.
//!
//! A run spreads its attempt budget over a pool of workers. Each worker opens
//! its own connection, then repeatedly resolves a private copy of the field
//! table, packs, signs and submits it. Any failure is recorded as an outcome
//! and the worker moves on to its next attempt. Workers check the shutdown
//! signal between attempts, so stopping lets at most one in-flight attempt per
//! worker finish.

use crate::compress::zlib_compress;
use crate::pack::{pack_and_sign, too_large_marker, PackOptions};
use crate::resolve::generate_payloads;
use crate::table::FieldSpecTable;
use cryptonym_api::chain::{ChainConnection, ConnectionFactory};
use cryptonym_api::error::{BatchError, EncodeError, ErrorCode, PackError};
use cryptonym_api::identity::SignerIdentity;
use cryptonym_telemetry::time::Timer;
use cryptonym_telemetry::{batch_metrics, error_metrics};
use cryptonym_types::config::{BatchConfig, ChainConfig, Repeat, LOOP_ITERATIONS};
use cryptonym_types::outcome::{FailureKind, SubmissionOutcome, TxSummary};
use cryptonym_types::HISTORY_LIMIT;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, Notify};
use tokio::task::JoinHandle;

/// How often the running totals are pushed to the metrics sink.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Default)]
struct BatchState {
    succeeded: AtomicU64,
    failed: AtomicU64,
    next_index: AtomicU64,
    active_workers: AtomicUsize,
    history: parking_lot::Mutex<Vec<SubmissionOutcome>>,
    finished: Notify,
}

impl BatchState {
    fn report(&self) {
        let sink = batch_metrics();
        sink.set_outcome_totals(
            self.succeeded.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
        );
        sink.set_active_workers(self.active_workers.load(Ordering::Relaxed));
    }
}

/// What a run keeps of each outcome.
#[derive(Debug, Clone, Copy)]
struct Retention {
    hide_request: bool,
    hide_response: bool,
    hide_failed: bool,
    hide_succeeded: bool,
    compress: bool,
}

impl From<&BatchConfig> for Retention {
    fn from(cfg: &BatchConfig) -> Self {
        Self {
            hide_request: cfg.hide_request,
            hide_response: cfg.hide_response,
            hide_failed: cfg.hide_failed,
            hide_succeeded: cfg.hide_succeeded,
            compress: cfg.compress_history,
        }
    }
}

/// An attempt's result before it is numbered and stored.
struct Attempt {
    success: bool,
    failure: Option<FailureKind>,
    request: Vec<u8>,
    response: Vec<u8>,
    summary: String,
    tx_summary: Option<TxSummary>,
}

impl Attempt {
    fn failed(kind: FailureKind, request: Vec<u8>, response: Vec<u8>, summary: String) -> Self {
        Self {
            success: false,
            failure: Some(kind),
            request,
            response,
            summary,
            tx_summary: None,
        }
    }
}

/// Decrements the live worker count when a worker exits, however it exits.
struct WorkerGuard {
    state: Arc<BatchState>,
    is_running: Arc<AtomicBool>,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        if self.state.active_workers.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.is_running.store(false, Ordering::SeqCst);
            self.state.finished.notify_one();
            tracing::info!(
                target: "batch",
                succeeded = self.state.succeeded.load(Ordering::SeqCst),
                failed = self.state.failed.load(Ordering::SeqCst),
                "batch run finished"
            );
        }
    }
}

struct Worker {
    id: usize,
    attempts: u64,
    table: Arc<FieldSpecTable>,
    identity: SignerIdentity,
    factory: Arc<dyn ConnectionFactory>,
    endpoint: String,
    opts: PackOptions,
    retention: Retention,
    state: Arc<BatchState>,
}

impl Worker {
    async fn run(self, shutdown_rx: watch::Receiver<bool>, _guard: WorkerGuard) {
        let conn = match self.factory.connect(self.id).await {
            Ok(conn) => conn,
            Err(source) => {
                let err = BatchError::Connect {
                    worker: self.id,
                    source,
                };
                tracing::error!(target: "batch", worker = self.id, error = %err, "worker could not connect");
                error_metrics().inc_error("batch", err.code());
                self.record(Attempt::failed(
                    FailureKind::Preparation,
                    Vec::new(),
                    Vec::new(),
                    err.to_string(),
                ));
                return;
            }
        };
        tracing::debug!(target: "batch", worker = self.id, attempts = self.attempts, "worker started");
        for _ in 0..self.attempts {
            if *shutdown_rx.borrow() {
                tracing::debug!(target: "batch", worker = self.id, "worker stopping");
                break;
            }
            let attempt = self.attempt(conn.as_ref()).await;
            self.record(attempt);
        }
    }

    async fn attempt(&self, conn: &dyn ChainConnection) -> Attempt {
        let _timer = Timer::new(batch_metrics());
        let table = self.table.detached_copy();

        if let Err(e) = generate_payloads(&table, &self.identity, conn).await {
            error_metrics().inc_error("payload", e.code());
            return Attempt::failed(FailureKind::Preparation, Vec::new(), Vec::new(), e.to_string());
        }
        let signed = match pack_and_sign(&table, &self.identity, conn, &self.opts).await {
            Ok(signed) => signed,
            Err(e) => {
                error_metrics().inc_error("pack", e.code());
                let request = match &e {
                    PackError::Encode(EncodeError::PayloadTooLarge { size, .. }) => {
                        too_large_marker(*size).into_bytes()
                    }
                    _ => Vec::new(),
                };
                return Attempt::failed(FailureKind::Preparation, request, Vec::new(), e.to_string());
            }
        };
        let request = serde_json::to_vec_pretty(&signed.request).unwrap_or_default();

        match conn.submit(&self.endpoint, &signed.packed).await {
            Ok(response) => {
                let tx_summary = TxSummary::from_response(&response).ok();
                let summary = match &tx_summary {
                    Some(s) => format!(
                        "{} {} in block {} ({} bytes)",
                        s.transaction_id, s.status, s.block_num, s.total_bytes
                    ),
                    None => "accepted".to_string(),
                };
                Attempt {
                    success: true,
                    failure: None,
                    request,
                    response,
                    summary,
                    tx_summary,
                }
            }
            Err(e) => {
                error_metrics().inc_error("chain", e.code());
                let response = e.body().map(|b| b.as_bytes().to_vec()).unwrap_or_default();
                Attempt::failed(FailureKind::Remote, request, response, e.to_string())
            }
        }
    }

    fn record(&self, attempt: Attempt) {
        let counter = if attempt.success {
            &self.state.succeeded
        } else {
            &self.state.failed
        };
        counter.fetch_add(1, Ordering::SeqCst);

        let r = self.retention;
        let hidden = if attempt.success {
            r.hide_succeeded
        } else {
            r.hide_failed
        };
        if hidden {
            self.state.next_index.fetch_add(1, Ordering::SeqCst);
            return;
        }
        let request = if r.hide_request { Vec::new() } else { attempt.request };
        let response = if r.hide_response { Vec::new() } else { attempt.response };
        let store = |body: &[u8]| -> Vec<u8> {
            if !r.compress || body.is_empty() {
                return body.to_vec();
            }
            zlib_compress(body).unwrap_or_else(|_| body.to_vec())
        };
        let request_stored = store(&request);
        let response_stored = store(&response);

        let mut history = self.state.history.lock();
        if history.len() >= HISTORY_LIMIT {
            tracing::debug!(target: "batch", "history limit reached, clearing");
            history.clear();
        }
        history.push(SubmissionOutcome {
            index: self.state.next_index.fetch_add(1, Ordering::SeqCst),
            success: attempt.success,
            failure: attempt.failure,
            request,
            request_stored,
            response,
            response_stored,
            summary: attempt.summary,
            tx_summary: attempt.tx_summary,
        });
    }
}

async fn run_reporter(state: Arc<BatchState>) {
    let mut interval = tokio::time::interval(REPORT_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = interval.tick() => state.report(),
            _ = state.finished.notified() => {
                state.report();
                break;
            }
        }
    }
}

/// Splits `total` attempts over `workers`, dropping workers with no share.
fn split_budget(total: u64, workers: usize) -> Vec<u64> {
    let n = workers as u64;
    (0..n)
        .map(|i| total / n + u64::from(i < total % n))
        .filter(|share| *share > 0)
        .collect()
}

/// Runs batches of submissions for one action.
pub struct BatchSupervisor {
    table: parking_lot::RwLock<Arc<FieldSpecTable>>,
    identity: SignerIdentity,
    factory: Arc<dyn ConnectionFactory>,
    chain: ChainConfig,
    state: Arc<BatchState>,
    /// Sender for the shutdown signal.
    pub shutdown_sender: Arc<watch::Sender<bool>>,
    task_handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
    is_running: Arc<AtomicBool>,
}

impl BatchSupervisor {
    /// Creates a supervisor submitting `table` through connections from `factory`.
    pub fn new(
        table: Arc<FieldSpecTable>,
        identity: SignerIdentity,
        factory: Arc<dyn ConnectionFactory>,
        chain: ChainConfig,
    ) -> Self {
        let (shutdown_sender, _) = watch::channel(false);
        Self {
            table: parking_lot::RwLock::new(table),
            identity,
            factory,
            chain,
            state: Arc::new(BatchState::default()),
            shutdown_sender: Arc::new(shutdown_sender),
            task_handles: Arc::new(Mutex::new(Vec::new())),
            is_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The table attempts are built from.
    pub fn table(&self) -> Arc<FieldSpecTable> {
        self.table.read().clone()
    }

    /// Switches to another action's table and clears the history.
    pub fn set_table(&self, table: Arc<FieldSpecTable>) -> Result<(), BatchError> {
        if self.is_running() {
            return Err(BatchError::AlreadyRunning);
        }
        *self.table.write() = table;
        self.reset();
        Ok(())
    }

    /// Starts a run. Fails if workers from a previous run are still alive.
    pub async fn start(&self, cfg: &BatchConfig) -> Result<(), BatchError> {
        cfg.validate()?;
        let mut handles = self.task_handles.lock().await;
        if self.is_running.load(Ordering::SeqCst) {
            return Err(BatchError::AlreadyRunning);
        }
        for handle in handles.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(target: "batch", "previous batch task failed: {e}");
            }
        }

        let budget = match cfg.repeat {
            Repeat::Count(n) => split_budget(n, cfg.workers),
            Repeat::Loop => vec![LOOP_ITERATIONS; cfg.workers],
        };
        let table = self.table();
        let opts = PackOptions::from_batch(cfg, &self.chain);
        let retention = Retention::from(cfg);

        self.shutdown_sender.send_replace(false);
        self.state.active_workers.store(budget.len(), Ordering::SeqCst);
        self.is_running.store(true, Ordering::SeqCst);
        tracing::info!(
            target: "batch",
            contract = table.contract(),
            action = table.action(),
            workers = budget.len(),
            repeat = ?cfg.repeat,
            "batch run starting"
        );

        handles.push(tokio::spawn(run_reporter(self.state.clone())));
        for (id, attempts) in budget.into_iter().enumerate() {
            let worker = Worker {
                id,
                attempts,
                table: table.clone(),
                identity: self.identity.clone(),
                factory: self.factory.clone(),
                endpoint: self.chain.push_endpoint.clone(),
                opts: opts.clone(),
                retention,
                state: self.state.clone(),
            };
            let guard = WorkerGuard {
                state: self.state.clone(),
                is_running: self.is_running.clone(),
            };
            handles.push(tokio::spawn(worker.run(self.shutdown_sender.subscribe(), guard)));
        }
        Ok(())
    }

    /// Signals workers to stop after their current attempt, without waiting.
    pub fn request_stop(&self) {
        if self.is_running() {
            tracing::info!(target: "batch", "batch run stopping...");
        }
        self.shutdown_sender.send_replace(true);
    }

    /// Signals workers to stop and waits for all of them to exit.
    pub async fn stop(&self) {
        self.request_stop();
        self.wait().await;
    }

    /// Waits for the current run to finish on its own.
    pub async fn wait(&self) {
        let mut handles = self.task_handles.lock().await;
        for handle in handles.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(target: "batch", "batch task failed: {e}");
            }
        }
    }

    /// Whether any worker of the current run is alive.
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Successful attempts since the last reset.
    pub fn succeeded(&self) -> u64 {
        self.state.succeeded.load(Ordering::SeqCst)
    }

    /// Failed attempts since the last reset.
    pub fn failed(&self) -> u64 {
        self.state.failed.load(Ordering::SeqCst)
    }

    /// A copy of the retained outcomes, oldest first.
    pub fn history(&self) -> Vec<SubmissionOutcome> {
        self.state.history.lock().clone()
    }

    /// Clears the counters and the history.
    pub fn reset(&self) {
        self.state.history.lock().clear();
        self.state.succeeded.store(0, Ordering::SeqCst);
        self.state.failed.store(0, Ordering::SeqCst);
        self.state.next_index.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests;
