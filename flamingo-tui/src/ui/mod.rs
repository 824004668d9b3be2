//! Top-level UI layout: header, selector bar, symbol list + dashboard, status bar.

pub mod overlays;
pub mod selector_bar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use flamingo_core::DashboardSnapshot;

use crate::app::{AppState, ChartStyle, DashboardView, Overlay};
use crate::panels::{
    CandleChart, InsightsPanel, MetricCards, OverviewPanel, OwnershipPanel, PriceChart,
    PriceChartKind, ReturnsDistribution, SymbolList, VolumeBars,
};

const SYMBOL_LIST_WIDTH: u16 = 18;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    selector_bar::render(f, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SYMBOL_LIST_WIDTH), Constraint::Min(20)])
        .split(chunks[2]);

    let visible = app.visible_symbols();
    f.render_widget(
        SymbolList::new(&visible, app.cursor, &app.filter, app.symbols_loaded, &app.theme),
        body[0],
    );
    draw_dashboard(f, body[1], app);

    status_bar::render(f, chunks[3], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[2], &app.theme),
        Overlay::Filter => overlays::render_filter(f, chunks[2], &app.filter, &app.theme),
        Overlay::None => {}
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(" Flamingo ", theme.highlight()),
        Span::styled(" NSE Stock Dashboard", theme.title()),
    ];
    if let DashboardView::Ready(snap) = &app.view {
        if let Some(name) = snap.overview.as_ref().and_then(|o| o.name.as_deref()) {
            spans.push(Span::styled(format!("  {name}"), theme.muted()));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let message = |text: String, style: Style| {
        Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.block_border(false)),
            )
            .wrap(Wrap { trim: true })
    };

    match &app.view {
        DashboardView::Idle => f.render_widget(
            message(
                "Select a symbol and press Enter. Press ? for help.".into(),
                theme.muted(),
            ),
            area,
        ),
        DashboardView::Loading { symbol, period } => f.render_widget(
            message(
                format!("Loading {symbol} ({period})…"),
                Style::default().fg(theme.accent),
            ),
            area,
        ),
        DashboardView::Unavailable { symbol, period } => f.render_widget(
            message(
                format!(
                    "No data available for {symbol} ({period}). \
                     Try another period, another symbol, or press r to retry."
                ),
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            area,
        ),
        DashboardView::Ready(snap) => draw_snapshot(f, area, app, snap),
    }
}

fn draw_snapshot(f: &mut Frame, area: Rect, app: &AppState, snap: &DashboardSnapshot) {
    let theme = &app.theme;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(5),
        ])
        .split(area);

    f.render_widget(MetricCards::new(&snap.top_cards, theme), rows[0]);

    let title = format!("{} · {}", snap.symbol, snap.period);
    let bars = snap.series.bars();
    match app.chart_style {
        ChartStyle::Candlestick => f.render_widget(CandleChart::new(bars, &title, theme), rows[1]),
        ChartStyle::Line => f.render_widget(
            PriceChart::new(bars, &title, PriceChartKind::Line, theme),
            rows[1],
        ),
        ChartStyle::Area => f.render_widget(
            PriceChart::new(bars, &title, PriceChartKind::Area, theme),
            rows[1],
        ),
    }

    // Secondary cards sit beside the overview and only appear with it.
    if snap.overview.is_some() {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(rows[2]);
        f.render_widget(OverviewPanel::new(snap.overview.as_ref(), theme), middle[0]);
        f.render_widget(
            MetricCards::new(&snap.secondary_cards, theme).vertical(),
            middle[1],
        );
    } else {
        f.render_widget(OverviewPanel::new(None, theme), rows[2]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(40),
        ])
        .split(rows[3]);
    f.render_widget(VolumeBars::new(bars, theme), bottom[0]);
    f.render_widget(OwnershipPanel::new(theme), bottom[1]);
    f.render_widget(
        ReturnsDistribution::new(&snap.histogram, &snap.density, theme),
        bottom[2],
    );

    f.render_widget(InsightsPanel::new(&app.insights, theme), rows[4]);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
