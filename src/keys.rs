use crate::app::{App, MenuItem, Requests};
use crate::state::app_state::InputField;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    let requests = if guard.state.editing.is_some() {
        handle_editing(&mut guard, key_event)
    } else {
        handle_navigation(&mut guard, key_event)
    };
    drop(guard);

    for request in requests {
        let _ = network_requests.send(request).await;
    }
}

/// While a text field has focus every printable key goes to it.
fn handle_editing(app: &mut App, key_event: KeyEvent) -> Requests {
    match (key_event.code, key_event.modifiers) {
        (Char('c'), KeyModifiers::CONTROL) => quit(),
        (KeyCode::Enter | KeyCode::Esc | KeyCode::Tab, _) => {
            app.stop_editing();
            Vec::new()
        }
        (KeyCode::Backspace, _) => app.input_backspace(),
        (Char(c), _) => app.input_char(c),
        _ => Vec::new(),
    }
}

fn handle_navigation(app: &mut App, key_event: KeyEvent) -> Requests {
    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::League),
        (_, Char('2'), _) => app.update_tab(MenuItem::Team),
        (_, Char('3'), _) => app.update_tab(MenuItem::Lookup),
        (_, Char('4'), _) => app.update_tab(MenuItem::Schedule),
        (_, Char('5'), _) => app.update_tab(MenuItem::Regression),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // League
        (MenuItem::League, Char('l') | KeyCode::Right, _) => return app.league_next_stat(),
        (MenuItem::League, Char('h') | KeyCode::Left, _) => return app.league_prev_stat(),
        (MenuItem::League, Char('s'), _) => return app.league_next_season(),

        // Team
        (MenuItem::Team, Char('/'), _) => app.start_editing(InputField::TeamSearch),
        (MenuItem::Team, Char('o'), _) => app.start_editing(InputField::OpponentSearch),
        (MenuItem::Team, Char('x'), _) => return app.clear_opponent(),
        (MenuItem::Team, Char('l') | KeyCode::Right, _) => return app.team_next_stat(),
        (MenuItem::Team, Char('h') | KeyCode::Left, _) => return app.team_prev_stat(),
        (MenuItem::Team, Char('s'), _) => return app.team_next_season(),
        (MenuItem::Team, Char('S'), _) => return app.team_prev_season(),
        (MenuItem::Team, Char('j') | KeyCode::Down, _) => app.scroll_games_down(),
        (MenuItem::Team, Char('k') | KeyCode::Up, _) => app.scroll_games_up(),

        // Lookup
        (MenuItem::Lookup, Char('/'), _) => app.start_editing(InputField::LookupTeam),
        (MenuItem::Lookup, Char('d'), _) => app.start_editing(InputField::LookupDate),
        (MenuItem::Lookup, Char('l') | KeyCode::Right, _) => return app.lookup_next_stat(),
        (MenuItem::Lookup, Char('h') | KeyCode::Left, _) => return app.lookup_prev_stat(),

        // Schedule
        (MenuItem::Schedule, Char('d'), _) => app.start_editing(InputField::ScheduleDate),
        (MenuItem::Schedule, Char('l') | KeyCode::Right, _) => app.schedule_next_book(),
        (MenuItem::Schedule, Char('h') | KeyCode::Left, _) => app.schedule_prev_book(),
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => app.schedule_down(),
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => app.schedule_up(),

        // Regression
        (MenuItem::Regression, Char('/'), _) => app.start_editing(InputField::RegressionTeam),
        (MenuItem::Regression, Char('j') | KeyCode::Down, _) => app.regression_down(),
        (MenuItem::Regression, Char('k') | KeyCode::Up, _) => app.regression_up(),
        (MenuItem::Regression, Char(' '), _) => app.regression_toggle(),
        (MenuItem::Regression, Char('t'), _) => app.regression_cycle_target(),
        (MenuItem::Regression, KeyCode::Enter, _) => app.regression_run(),

        // Global
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    Vec::new()
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}
