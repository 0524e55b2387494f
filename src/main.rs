mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use anyhow::Context;
use courtside_api::client::{ApiConfig, StatsApi};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::info;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    // Fail on missing credentials before the terminal is touched.
    let config = ApiConfig::from_env().context("database connection is not configured")?;
    let client = StatsApi::new(config);

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal().context("failed to prepare the terminal")?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let app = Arc::new(Mutex::new(App::new()));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Roster first; every view fires once it lands
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("courtside {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "courtside - college basketball stats in the terminal

Usage:
  courtside
  courtside --help
  courtside --version

Environment (also read from .env.local and .env):
  COURTSIDE_DB_URL         Base URL of the stats database (required)
  COURTSIDE_DB_KEY         API key for the stats database (required)
  COURTSIDE_TIMEOUT_SECS   Request timeout in seconds (default 10)
  COURTSIDE_TEAM           Initial team id (default KP076)
  COURTSIDE_SEASON         Initial season, one of 2022-2025 (default 2025)
  COURTSIDE_DATE           Initial lookup and schedule date, YYYY-MM-DD
  COURTSIDE_BOOK           Sportsbook of record for schedule lines (default DraftKings)
  COURTSIDE_LOG            Log level: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                if handle_ui_event(ui_event, &app, &network_requests).await {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                if handle_network_response(response, &app, &network_requests, &mut loading).await {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            info!("loading team roster");
            let _ = network_requests.send(NetworkRequest::LoadRoster).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) -> bool {
    let mut guard = app.lock().await;
    let requests = match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            Vec::new()
        }
        NetworkResponse::RosterLoaded { result } => guard.on_roster_loaded(result),
        NetworkResponse::LookupLoaded { ticket, result } => {
            guard.on_lookup_loaded(ticket, result);
            Vec::new()
        }
        NetworkResponse::LeagueSeriesLoaded { ticket, result } => {
            guard.on_league_series_loaded(ticket, result);
            Vec::new()
        }
        NetworkResponse::TeamSeriesLoaded { ticket, result } => {
            guard.on_team_series_loaded(ticket, result);
            Vec::new()
        }
        NetworkResponse::StyleProfileLoaded { ticket, result } => {
            guard.on_profile_loaded(ticket, result);
            Vec::new()
        }
        NetworkResponse::GameLogLoaded { ticket, result } => {
            guard.on_game_log_loaded(ticket, result);
            Vec::new()
        }
        NetworkResponse::ScheduleLoaded { ticket, result } => {
            guard.on_schedule_loaded(ticket, result);
            Vec::new()
        }
    };
    drop(guard);

    for request in requests {
        let _ = network_requests.send(request).await;
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort: also runs from the panic hook, where there is nobody to
/// report a failure to.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
