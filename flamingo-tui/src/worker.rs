//! Background worker thread: every network fetch and analytics pass runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns the cached sources, so the TTL caches live exactly as long as the app.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use flamingo_core::dashboard::{load_snapshot, symbols_or_empty};
use flamingo_core::data::{
    history_source, symbol_source, CachedHistorySource, CachedSymbolSource, HistorySource,
    NseSymbolSource, SymbolSource, YahooHistorySource,
};
use flamingo_core::domain::LookbackPeriod;
use flamingo_core::{AnalyticsSettings, DashboardConfig, DashboardSnapshot};

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    LoadSymbols {
        force: bool,
    },
    LoadDashboard {
        request_id: u64,
        symbol: String,
        period: LookbackPeriod,
        force: bool,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    /// Sorted listing; empty when the symbol source failed.
    Symbols(Vec<String>),
    Dashboard {
        request_id: u64,
        snapshot: Box<DashboardSnapshot>,
    },
    /// No data for this selection (fetch failed or returned nothing).
    Unavailable {
        request_id: u64,
        symbol: String,
        period: LookbackPeriod,
    },
}

/// The cached sources and analytics settings the worker serves from.
pub struct Sources<S, H> {
    pub symbols: CachedSymbolSource<S>,
    pub history: CachedHistorySource<H>,
    pub settings: AnalyticsSettings,
}

impl<S: SymbolSource, H: HistorySource> Sources<S, H> {
    pub fn new(
        symbols: S,
        history: H,
        symbols_ttl: Duration,
        history_ttl: Duration,
        settings: AnalyticsSettings,
    ) -> Self {
        Self {
            symbols: CachedSymbolSource::new(symbols, symbols_ttl),
            history: CachedHistorySource::new(history, history_ttl),
            settings,
        }
    }
}

/// Build the live NSE + Yahoo sources described by `config`.
pub fn live_sources(
    config: &DashboardConfig,
) -> anyhow::Result<Sources<NseSymbolSource, YahooHistorySource>> {
    Ok(Sources {
        symbols: symbol_source(config)?,
        history: history_source(config)?,
        settings: config.analytics(),
    })
}

/// Spawn the background worker thread.
pub fn spawn_worker<S, H>(
    sources: Sources<S, H>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>>
where
    S: SymbolSource + 'static,
    H: HistorySource + 'static,
{
    thread::Builder::new()
        .name("flamingo-worker".into())
        .spawn(move || worker_loop(sources, rx, tx))
}

fn worker_loop<S: SymbolSource, H: HistorySource>(
    sources: Sources<S, H>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                if let Some(resp) = handle_command(&sources, cmd) {
                    if tx.send(resp).is_err() {
                        // UI has gone away.
                        break;
                    }
                }
            }
        }
    }
    log::debug!("worker stopped");
}

/// Execute one command against the sources. Pure with respect to channels.
pub fn handle_command<S: SymbolSource, H: HistorySource>(
    sources: &Sources<S, H>,
    cmd: WorkerCommand,
) -> Option<WorkerResponse> {
    match cmd {
        WorkerCommand::LoadSymbols { force } => {
            if force {
                sources.symbols.invalidate();
            }
            Some(WorkerResponse::Symbols(symbols_or_empty(&sources.symbols)))
        }
        WorkerCommand::LoadDashboard {
            request_id,
            symbol,
            period,
            force,
        } => {
            if force {
                sources.history.invalidate(&symbol, period);
            }
            log::info!("loading {symbol} {period}");
            let resp = match load_snapshot(&sources.history, &symbol, period, &sources.settings) {
                Some(snapshot) => WorkerResponse::Dashboard {
                    request_id,
                    snapshot: Box::new(snapshot),
                },
                None => WorkerResponse::Unavailable {
                    request_id,
                    symbol,
                    period,
                },
            };
            Some(resp)
        }
        WorkerCommand::Shutdown => None,
    }
}
