use crate::state::fetch::Ticket;
use crate::state::network::LoadingState;
use courtside_api::lookup::Comparison;
use courtside_api::params::{GameLogParams, LeagueParams, LookupParams, ProfileParams, ScheduleParams, TrendParams};
use courtside_api::roster::Roster;
use courtside_api::series::ProfileValue;
use courtside_api::{GameRow, LeagueDailyAggregate, ScheduleEntry, SeriesPoint};
use crossterm::event::KeyEvent;
use std::sync::Arc;

pub type FetchResult<T> = Result<T, String>;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadRoster,
    Lookup { ticket: Ticket<LookupParams> },
    LeagueSeries { ticket: Ticket<LeagueParams> },
    TeamSeries { ticket: Ticket<TrendParams> },
    StyleProfile { ticket: Ticket<ProfileParams> },
    GameLog { ticket: Ticket<GameLogParams>, roster: Arc<Roster> },
    Schedule { ticket: Ticket<ScheduleParams>, roster: Arc<Roster> },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RosterLoaded { result: FetchResult<Roster> },
    LookupLoaded { ticket: Ticket<LookupParams>, result: FetchResult<Comparison> },
    LeagueSeriesLoaded { ticket: Ticket<LeagueParams>, result: FetchResult<Vec<LeagueDailyAggregate>> },
    TeamSeriesLoaded { ticket: Ticket<TrendParams>, result: FetchResult<Vec<SeriesPoint>> },
    StyleProfileLoaded { ticket: Ticket<ProfileParams>, result: FetchResult<Vec<ProfileValue>> },
    GameLogLoaded { ticket: Ticket<GameLogParams>, result: FetchResult<Vec<GameRow>> },
    ScheduleLoaded { ticket: Ticket<ScheduleParams>, result: FetchResult<Vec<ScheduleEntry>> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
