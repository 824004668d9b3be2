//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! every dashboard request carries an id so a late answer for a previous
//! selection is never shown.

use std::sync::mpsc::{Receiver, Sender};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use flamingo_core::domain::LookbackPeriod;
use flamingo_core::insights::SimulatedInsights;
use flamingo_core::DashboardSnapshot;

use crate::theme::Theme;
use crate::worker::{WorkerCommand, WorkerResponse};

/// How the main price chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartStyle {
    #[default]
    Candlestick,
    Line,
    Area,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 3] = [ChartStyle::Candlestick, ChartStyle::Line, ChartStyle::Area];

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Candlestick => "Candlestick",
            ChartStyle::Line => "Line",
            ChartStyle::Area => "Area",
        }
    }

    pub fn next(self) -> ChartStyle {
        match self {
            ChartStyle::Candlestick => ChartStyle::Line,
            ChartStyle::Line => ChartStyle::Area,
            ChartStyle::Area => ChartStyle::Candlestick,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Filter,
}

/// What the main area is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// Nothing requested yet.
    Idle,
    Loading { symbol: String, period: LookbackPeriod },
    Ready(Box<DashboardSnapshot>),
    Unavailable { symbol: String, period: LookbackPeriod },
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Selection
    pub symbols: Vec<String>,
    pub symbols_loaded: bool,
    pub filter: String,
    pub cursor: usize,
    pub period: LookbackPeriod,
    pub chart_style: ChartStyle,
    /// Symbol to select once the listing arrives (restored from disk).
    pub preferred_symbol: Option<String>,

    // Dashboard
    pub view: DashboardView,
    pub insights: SimulatedInsights,
    rng: StdRng,
    request_id: u64,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub overlay: Overlay,
    pub theme: Theme,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        period: LookbackPeriod,
    ) -> Self {
        Self::with_rng(worker_tx, worker_rx, period, StdRng::from_entropy())
    }

    /// As [`AppState::new`] with a caller-supplied generator for the placeholder figures.
    pub fn with_rng(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        period: LookbackPeriod,
        mut rng: StdRng,
    ) -> Self {
        let insights = SimulatedInsights::generate(&mut rng);
        Self {
            running: true,
            symbols: Vec::new(),
            symbols_loaded: false,
            filter: String::new(),
            cursor: 0,
            period,
            chart_style: ChartStyle::default(),
            preferred_symbol: None,
            view: DashboardView::Idle,
            insights,
            rng,
            request_id: 0,
            worker_tx,
            worker_rx,
            status_message: None,
            overlay: Overlay::None,
            theme: Theme::default(),
        }
    }

    /// Symbols matching the filter (case-insensitive substring).
    pub fn visible_symbols(&self) -> Vec<&str> {
        let needle = self.filter.trim().to_uppercase();
        self.symbols
            .iter()
            .filter(|s| needle.is_empty() || s.to_uppercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn highlighted_symbol(&self) -> Option<&str> {
        self.visible_symbols().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.visible_symbols().len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let max = count as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Keep the cursor inside the filtered list after the filter changes.
    pub fn clamp_cursor(&mut self) {
        self.move_cursor(0);
    }

    /// Symbol and period of the dashboard on screen (or being loaded).
    pub fn current_selection(&self) -> Option<(&str, LookbackPeriod)> {
        match &self.view {
            DashboardView::Idle => None,
            DashboardView::Loading { symbol, period }
            | DashboardView::Unavailable { symbol, period } => Some((symbol.as_str(), *period)),
            DashboardView::Ready(snap) => Some((snap.symbol.as_str(), snap.period)),
        }
    }

    pub fn request_symbols(&mut self, force: bool) {
        self.send(WorkerCommand::LoadSymbols { force });
        self.set_status("Loading NSE symbol list…");
    }

    /// Ask the worker for `symbol` at the current period.
    pub fn request_dashboard(&mut self, symbol: &str, force: bool) {
        self.request_id += 1;
        self.view = DashboardView::Loading {
            symbol: symbol.to_string(),
            period: self.period,
        };
        self.send(WorkerCommand::LoadDashboard {
            request_id: self.request_id,
            symbol: symbol.to_string(),
            period: self.period,
            force,
        });
        self.set_status(format!("Loading {symbol} ({})…", self.period));
    }

    /// Load the highlighted symbol.
    pub fn load_highlighted(&mut self) {
        match self.highlighted_symbol().map(str::to_string) {
            Some(symbol) => self.request_dashboard(&symbol, false),
            None => self.set_warning("No symbol selected"),
        }
    }

    /// Re-request the current selection, bypassing the cache when `force`.
    pub fn reload(&mut self, force: bool) {
        match self.current_selection().map(|(s, _)| s.to_string()) {
            Some(symbol) => self.request_dashboard(&symbol, force),
            None => self.load_highlighted(),
        }
    }

    pub fn set_period(&mut self, period: LookbackPeriod) {
        if period == self.period {
            return;
        }
        self.period = period;
        self.reload(false);
    }

    pub fn cycle_chart_style(&mut self) {
        self.chart_style = self.chart_style.next();
        self.set_status(format!("Chart: {}", self.chart_style.label()));
    }

    pub fn reroll_insights(&mut self) {
        self.insights = SimulatedInsights::generate(&mut self.rng);
    }

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Symbols(symbols) => self.apply_symbols(symbols),
            WorkerResponse::Dashboard {
                request_id,
                snapshot,
            } => {
                if request_id != self.request_id {
                    log::debug!("dropping stale dashboard for {}", snapshot.symbol);
                    return;
                }
                self.set_status(format!(
                    "{} · {} · {} sessions",
                    snapshot.symbol,
                    snapshot.period,
                    snapshot.series.len()
                ));
                if snapshot.returns.has_gaps() {
                    self.set_warning(format!(
                        "{}: {} returns skipped (zero, negative or missing close)",
                        snapshot.symbol,
                        snapshot.returns.gaps().len()
                    ));
                }
                self.view = DashboardView::Ready(snapshot);
                self.reroll_insights();
            }
            WorkerResponse::Unavailable {
                request_id,
                symbol,
                period,
            } => {
                if request_id != self.request_id {
                    return;
                }
                self.set_warning(format!("No data available for {symbol} ({period})"));
                self.view = DashboardView::Unavailable { symbol, period };
            }
        }
    }

    fn apply_symbols(&mut self, symbols: Vec<String>) {
        self.symbols_loaded = true;
        if symbols.is_empty() {
            self.symbols.clear();
            self.cursor = 0;
            self.set_error("Symbol list unavailable (press R to retry)");
            return;
        }
        self.set_status(format!("{} NSE symbols", symbols.len()));
        self.symbols = symbols;
        self.clamp_cursor();

        if let Some(preferred) = self.preferred_symbol.take() {
            if let Some(pos) = self.visible_symbols().iter().position(|s| *s == preferred) {
                self.cursor = pos;
            }
        }
        if self.view == DashboardView::Idle {
            self.load_highlighted();
        }
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if self.worker_tx.send(cmd).is_err() {
            self.set_error("Background worker stopped");
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
