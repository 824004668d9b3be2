//! Flamingo CLI: scripting access to the dashboard's data and analytics.
//!
//! Commands:
//! - `symbols`: list NSE equity symbols
//! - `history`: print OHLCV bars for a symbol and lookback period
//! - `returns`: returns distribution (histogram + KDE) for a symbol or a local CSV
//! - `cards`: headline and secondary metric cards with the company overview

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use flamingo_core::analytics::{
    compute_returns, default_bin_count, estimate_density_with, histogram, Bandwidth,
    DensityCurve, Histogram, ReturnSeries,
};
use flamingo_core::dashboard::load_snapshot;
use flamingo_core::data::{history_source, symbol_source, HistorySource, SymbolSource};
use flamingo_core::domain::LookbackPeriod;
use flamingo_core::metrics::MetricCard;
use flamingo_core::{AnalyticsSettings, DashboardConfig};

#[derive(Parser)]
#[command(name = "flamingo", about = "Flamingo CLI: NSE prices and returns analytics")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List NSE equity symbols.
    Symbols {
        /// Case-insensitive substring filter.
        #[arg(long)]
        filter: Option<String>,

        /// Print at most this many symbols.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print daily bars for a symbol.
    History {
        /// NSE symbol (e.g., RELIANCE).
        symbol: String,

        /// Lookback period: 1mo, 3mo, 6mo, 1y, 5y. Defaults to the config value.
        #[arg(long)]
        period: Option<LookbackPeriod>,

        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Returns distribution: summary, density histogram and KDE.
    Returns {
        /// NSE symbol. Omit when using --closes-csv.
        #[arg(required_unless_present = "closes_csv")]
        symbol: Option<String>,

        /// Lookback period: 1mo, 3mo, 6mo, 1y, 5y. Defaults to the config value.
        #[arg(long)]
        period: Option<LookbackPeriod>,

        /// Number of KDE evaluation points.
        #[arg(long)]
        samples: Option<usize>,

        /// Bandwidth rule: scott, silverman, or a fixed positive width.
        #[arg(long)]
        bandwidth: Option<Bandwidth>,

        /// Histogram bins. Defaults to Sturges' rule.
        #[arg(long)]
        bins: Option<usize>,

        /// Read closes from a local CSV instead of fetching (offline).
        #[arg(long, conflicts_with = "symbol")]
        closes_csv: Option<PathBuf>,

        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Metric cards and company overview for a symbol.
    Cards {
        /// NSE symbol (e.g., TCS).
        symbol: String,

        /// Lookback period used for the current price.
        #[arg(long)]
        period: Option<LookbackPeriod>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = DashboardConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Symbols { filter, limit } => run_symbols(&config, filter.as_deref(), limit),
        Commands::History {
            symbol,
            period,
            json,
        } => run_history(&config, &symbol, period.unwrap_or(config.default_period), json),
        Commands::Returns {
            symbol,
            period,
            samples,
            bandwidth,
            bins,
            closes_csv,
            json,
        } => {
            let mut settings = config.analytics();
            if let Some(n) = samples {
                if n == 0 {
                    bail!("--samples must be at least 1");
                }
                settings.density_samples = n;
            }
            if let Some(rule) = bandwidth {
                settings.bandwidth = rule;
            }
            if let Some(b) = bins {
                if b == 0 {
                    bail!("--bins must be at least 1");
                }
                settings.histogram_bins = Some(b);
            }
            let period = period.unwrap_or(config.default_period);
            let report = match (closes_csv, symbol) {
                (Some(path), _) => {
                    let closes = read_closes_file(&path)?;
                    ReturnsReport::compute(path.display().to_string(), None, &closes, &settings)
                }
                (None, Some(symbol)) => {
                    let history = history_source(&config)?.fetch_history(&symbol, period)?;
                    if history.series.is_empty() {
                        bail!("no data available for {symbol} ({period})");
                    }
                    ReturnsReport::compute(symbol, Some(period), &history.series.closes(), &settings)
                }
                (None, None) => bail!("either SYMBOL or --closes-csv is required"),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_returns(&report);
            }
            Ok(())
        }
        Commands::Cards { symbol, period } => {
            run_cards(&config, &symbol, period.unwrap_or(config.default_period))
        }
    }
}

fn run_symbols(config: &DashboardConfig, filter: Option<&str>, limit: Option<usize>) -> Result<()> {
    let symbols = symbol_source(config)?.list_symbols()?;
    let needle = filter.map(str::to_uppercase);
    let matching: Vec<&String> = symbols
        .iter()
        .filter(|s| needle.as_deref().map_or(true, |n| s.to_uppercase().contains(n)))
        .collect();

    for s in matching.iter().take(limit.unwrap_or(usize::MAX)) {
        println!("{s}");
    }
    log::info!("{} of {} symbols matched", matching.len(), symbols.len());
    Ok(())
}

fn run_history(config: &DashboardConfig, symbol: &str, period: LookbackPeriod, json: bool) -> Result<()> {
    let history = history_source(config)?.fetch_history(symbol, period)?;
    if history.series.is_empty() {
        bail!("no data available for {symbol} ({period})");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&history.series)?);
        return Ok(());
    }

    println!("{symbol} · {period} · {} sessions", history.series.len());
    println!();
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>14}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    println!("{}", "-".repeat(69));
    for bar in history.series.bars() {
        println!(
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>14}",
            bar.date.format("%Y-%m-%d"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        );
    }
    Ok(())
}

fn run_cards(config: &DashboardConfig, symbol: &str, period: LookbackPeriod) -> Result<()> {
    let source = history_source(config)?;
    let Some(snapshot) = load_snapshot(&source, symbol, period, &config.analytics()) else {
        bail!("no data available for {symbol} ({period})");
    };

    println!();
    println!("=== {} ===", snapshot.symbol);
    print_cards(snapshot.visible_top_cards());
    println!();
    print_cards(snapshot.visible_secondary_cards());

    if let Some(overview) = &snapshot.overview {
        println!();
        println!("--- Company Overview ---");
        if let Some(name) = &overview.name {
            println!("{name}");
        }
        println!("Industry: {}", overview.industry);
        println!("Sector:   {}", overview.sector);
        println!();
        println!("{}", overview.summary);
    }
    println!();
    Ok(())
}

fn print_cards<'a>(cards: impl Iterator<Item = &'a MetricCard>) {
    for card in cards {
        println!("{:<16}{}", format!("{}:", card.label), card.display_value());
    }
}

/// Returns distribution for one close-price series, ready to print or serialize.
#[derive(Debug, Serialize)]
struct ReturnsReport {
    source: String,
    period: Option<LookbackPeriod>,
    closes: usize,
    bandwidth_rule: String,
    returns: ReturnSeries,
    density: DensityCurve,
    histogram: Histogram,
}

impl ReturnsReport {
    fn compute(
        source: String,
        period: Option<LookbackPeriod>,
        closes: &[f64],
        settings: &AnalyticsSettings,
    ) -> Self {
        let returns = compute_returns(closes);
        let density =
            estimate_density_with(returns.values(), settings.density_samples, settings.bandwidth);
        let bins = settings
            .histogram_bins
            .unwrap_or_else(|| default_bin_count(returns.len()));
        let histogram = histogram(returns.values(), bins);
        Self {
            source,
            period,
            closes: closes.len(),
            bandwidth_rule: settings.bandwidth.to_string(),
            returns,
            density,
            histogram,
        }
    }

    fn mean(&self) -> Option<f64> {
        let values = self.returns.values();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn print_returns(report: &ReturnsReport) {
    println!();
    match report.period {
        Some(period) => println!("=== Returns: {} · {period} ===", report.source),
        None => println!("=== Returns: {} ===", report.source),
    }
    println!("Closes:         {}", report.closes);
    println!(
        "Returns:        {} ({} skipped)",
        report.returns.len(),
        report.returns.gaps().len()
    );

    let (Some(min), Some(max), Some(mean)) =
        (report.returns.min(), report.returns.max(), report.mean())
    else {
        println!();
        println!("Not enough data for a distribution.");
        return;
    };
    println!("Min / Max:      {:+.2}% / {:+.2}%", min * 100.0, max * 100.0);
    println!("Mean:           {:+.3}%", mean * 100.0);

    match (report.density.bandwidth(), report.density.peak()) {
        (Some(h), Some((x, _))) => {
            println!("Bandwidth:      {h:.5} ({})", report.bandwidth_rule);
            println!("Mode (KDE):     {:+.2}%", x * 100.0);
        }
        _ => println!("Density:        flat series, no KDE"),
    }

    let hist = &report.histogram;
    if hist.is_empty() {
        return;
    }
    println!();
    println!("--- Density histogram ---");
    let max_count = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    for (i, count) in hist.counts.iter().enumerate() {
        let (lo, hi) = hist.bin_edges(i);
        let bar = "#".repeat(count * 40 / max_count);
        println!(
            "{:>+8.2}% .. {:>+8.2}%  {:>5}  {bar}",
            lo * 100.0,
            hi * 100.0,
            count
        );
    }
    println!();
}

fn read_closes_file(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let closes = read_closes(file)?;
    if closes.len() < 2 {
        bail!("{} has fewer than two usable closes", path.display());
    }
    Ok(closes)
}

/// Closes from a CSV with a header row: the `close` column when present
/// (case-insensitive, `adj close` is not used), otherwise the first column
/// whose first value is numeric. Rows whose value does not parse are skipped.
fn read_closes<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let named = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("close"));

    let mut records = rdr.records();
    let mut closes = Vec::new();
    let mut skipped = 0usize;

    let column = match named {
        Some(c) => c,
        None => {
            // Locate the first numeric column from the first data row.
            let Some(first) = records.next().transpose()? else {
                return Ok(closes);
            };
            let Some(c) = first.iter().position(|f| f.parse::<f64>().is_ok()) else {
                bail!("no close column and no numeric column found");
            };
            closes.extend(first.get(c).and_then(|f| f.parse::<f64>().ok()));
            c
        }
    };

    for record in records {
        let record = record?;
        match record.get(column).and_then(|f| f.parse::<f64>().ok()) {
            Some(v) => closes.push(v),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} rows without a numeric close");
    }
    Ok(closes)
}
