//! App state persistence: JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use flamingo_core::domain::LookbackPeriod;

use crate::app::{AppState, ChartStyle};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub last_symbol: Option<String>,
    pub period: Option<LookbackPeriod>,
    pub chart_style: ChartStyle,
}

/// `<config dir>/flamingo/state.json`, or `./flamingo/state.json` without one.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flamingo")
        .join("state.json")
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable state file {}: {e}", path.display());
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    let last_symbol = app
        .current_selection()
        .map(|(s, _)| s.to_string())
        .or_else(|| app.highlighted_symbol().map(str::to_string));
    PersistedState {
        last_symbol,
        period: Some(app.period),
        chart_style: app.chart_style,
    }
}

pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(period) = state.period {
        app.period = period;
    }
    app.chart_style = state.chart_style;
    app.preferred_symbol = state.last_symbol;
}
