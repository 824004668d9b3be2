//! Keyboard input dispatch: overlays first, then dashboard keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use flamingo_core::domain::LookbackPeriod;

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Filter => {
            handle_filter_key(app, key);
            return;
        }
        Overlay::None => {}
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('/') => app.overlay = Overlay::Filter,
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::Home | KeyCode::Char('g') => app.move_cursor(isize::MIN / 2),
        KeyCode::End | KeyCode::Char('G') => app.move_cursor(isize::MAX / 2),
        KeyCode::Enter => app.load_highlighted(),
        KeyCode::Char('p') => app.set_period(app.period.next()),
        KeyCode::Char('P') => app.set_period(app.period.prev()),
        KeyCode::Char(d @ '1'..='5') => {
            let idx = d as usize - '1' as usize;
            app.set_period(LookbackPeriod::ALL[idx]);
        }
        KeyCode::Char('c') => app.cycle_chart_style(),
        KeyCode::Char('r') => app.reload(true),
        KeyCode::Char('R') => app.request_symbols(true),
        KeyCode::Char('i') => app.reroll_insights(),
        KeyCode::Esc => {
            if !app.filter.is_empty() {
                app.filter.clear();
                app.clamp_cursor();
            }
        }
        _ => {}
    }
}

fn handle_filter_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.filter.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            app.overlay = Overlay::None;
            app.load_highlighted();
        }
        KeyCode::Backspace => {
            app.filter.pop();
        }
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char(c) => {
            app.filter.push(c);
        }
        _ => {}
    }
    app.clamp_cursor();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ChartStyle, DashboardView};
    use crate::worker::WorkerCommand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_with_symbols() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let mut app = AppState::with_rng(
            cmd_tx,
            resp_rx,
            LookbackPeriod::OneYear,
            StdRng::seed_from_u64(3),
        );
        app.symbols = ["ASIANPAINT", "AXISBANK", "BAJFINANCE", "BHARTIARTL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        (app, cmd_rx)
    }

    #[test]
    fn q_quits() {
        let (mut app, _rx) = app_with_symbols();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let (mut app, _rx) = app_with_symbols();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn filter_then_enter_loads_match() {
        let (mut app, rx) = app_with_symbols();
        press(&mut app, KeyCode::Char('/'));
        for c in "bh".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.visible_symbols(), vec!["BHARTIARTL"]);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.overlay, Overlay::None);
        match rx.try_recv().unwrap() {
            WorkerCommand::LoadDashboard { symbol, .. } => assert_eq!(symbol, "BHARTIARTL"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(app.view, DashboardView::Loading { .. }));
    }

    #[test]
    fn navigation_and_toggles() {
        let (mut app, _rx) = app_with_symbols();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.highlighted_symbol(), Some("BAJFINANCE"));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.highlighted_symbol(), Some("BHARTIARTL"));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.highlighted_symbol(), Some("ASIANPAINT"));

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.chart_style, ChartStyle::Line);
    }

    #[test]
    fn period_keys() {
        let (mut app, _rx) = app_with_symbols();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.period, LookbackPeriod::FiveYears);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.period, LookbackPeriod::OneMonth);
        press(&mut app, KeyCode::Char('P'));
        assert_eq!(app.period, LookbackPeriod::FiveYears);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.period, LookbackPeriod::SixMonths);
    }

    #[test]
    fn reload_forces_refetch() {
        let (mut app, rx) = app_with_symbols();
        app.request_dashboard("AXISBANK", false);
        let _ = rx.try_recv();

        press(&mut app, KeyCode::Char('r'));
        match rx.try_recv().unwrap() {
            WorkerCommand::LoadDashboard { symbol, force, .. } => {
                assert_eq!(symbol, "AXISBANK");
                assert!(force);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
