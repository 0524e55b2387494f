use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputField};
use crate::state::fetch::{Ticket, Tracked};
use crate::state::messages::{FetchResult, NetworkRequest};
use courtside_api::lookup::Comparison;
use courtside_api::params::{
    GameLogParams, LeagueParams, LookupParams, ProfileParams, ScheduleParams, TrendParams, next_season,
    prev_season,
};
use courtside_api::regression::FEATURES;
use courtside_api::roster::Roster;
use courtside_api::series::ProfileValue;
use courtside_api::{GameRow, LeagueDailyAggregate, ScheduleEntry, SeriesPoint, StatKey};
use log::{debug, error, info};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    League,
    Team,
    Lookup,
    Schedule,
    Regression,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

/// Requests produced by a state change, sent once the app lock is released.
pub type Requests = Vec<NetworkRequest>;

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let app = Self { state: AppState::new(&settings), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Install the roster and fire the first fetch for every widget. A failed
    /// roster still loads the data views; names then show as unknown.
    pub fn on_roster_loaded(&mut self, result: FetchResult<Roster>) -> Requests {
        match result {
            Ok(roster) => {
                info!("loaded {} teams", roster.len());
                self.state.last_error = None;
                self.state.roster = Arc::new(roster);
            }
            Err(message) => {
                error!("team roster unavailable: {message}");
                self.state.last_error = Some(message);
            }
        }
        self.state.roster_loaded = true;

        let roster = self.state.roster.clone();
        if let Some(name) = roster.name_of(&self.state.team.team_id) {
            self.state.team.search.value = name.to_owned();
        }
        if let Some(name) = roster.name_of(&self.state.lookup.team_id) {
            self.state.lookup.search.value = name.to_owned();
            self.state.regression.search.value = name.to_owned();
            self.state.regression.setup.team = name.to_owned();
        }

        let mut requests = self.request_league();
        requests.extend(self.request_team());
        requests.extend(self.request_lookup());
        requests.extend(self.request_schedule());
        requests
    }

    pub fn on_lookup_loaded(&mut self, ticket: Ticket<LookupParams>, result: FetchResult<Comparison>) {
        commit("lookup", &mut self.state.lookup.result, &ticket, result);
    }

    pub fn on_league_series_loaded(
        &mut self,
        ticket: Ticket<LeagueParams>,
        result: FetchResult<Vec<LeagueDailyAggregate>>,
    ) {
        commit("league series", &mut self.state.league.series, &ticket, result);
    }

    pub fn on_team_series_loaded(&mut self, ticket: Ticket<TrendParams>, result: FetchResult<Vec<SeriesPoint>>) {
        commit("team series", &mut self.state.team.series, &ticket, result);
    }

    pub fn on_profile_loaded(&mut self, ticket: Ticket<ProfileParams>, result: FetchResult<Vec<ProfileValue>>) {
        commit("style profile", &mut self.state.team.profile, &ticket, result);
    }

    pub fn on_game_log_loaded(&mut self, ticket: Ticket<GameLogParams>, result: FetchResult<Vec<GameRow>>) {
        if commit("game log", &mut self.state.team.games, &ticket, result) {
            self.state.team.game_scroll = 0;
        }
    }

    pub fn on_schedule_loaded(&mut self, ticket: Ticket<ScheduleParams>, result: FetchResult<Vec<ScheduleEntry>>) {
        if commit("schedule", &mut self.state.schedule.entries, &ticket, result) {
            self.state.schedule.selected = 0;
        }
    }

    // -----------------------------------------------------------------------
    // Fetch triggers
    // -----------------------------------------------------------------------

    // Nothing is fetched before the roster settles: game logs and the
    // schedule resolve names through it.

    pub fn request_league(&mut self) -> Requests {
        if !self.state.roster_loaded {
            return Vec::new();
        }
        let params = self.state.league.params();
        let ticket = self.state.league.series.begin(params);
        vec![NetworkRequest::LeagueSeries { ticket }]
    }

    /// Everything on the Team tab: trend, profile and game log.
    pub fn request_team(&mut self) -> Requests {
        if !self.state.roster_loaded {
            return Vec::new();
        }
        let mut requests = self.request_trend();
        let profile = self.state.team.profile_params();
        requests.push(NetworkRequest::StyleProfile { ticket: self.state.team.profile.begin(profile) });
        requests.extend(self.request_games());
        requests
    }

    pub fn request_trend(&mut self) -> Requests {
        if !self.state.roster_loaded {
            return Vec::new();
        }
        let params = self.state.team.trend_params();
        vec![NetworkRequest::TeamSeries { ticket: self.state.team.series.begin(params) }]
    }

    pub fn request_games(&mut self) -> Requests {
        if !self.state.roster_loaded {
            return Vec::new();
        }
        let params = self.state.team.game_log_params();
        let ticket = self.state.team.games.begin(params);
        vec![NetworkRequest::GameLog { ticket, roster: self.state.roster.clone() }]
    }

    pub fn request_lookup(&mut self) -> Requests {
        if !self.state.roster_loaded {
            return Vec::new();
        }
        let params = self.state.lookup.params();
        vec![NetworkRequest::Lookup { ticket: self.state.lookup.result.begin(params) }]
    }

    pub fn request_schedule(&mut self) -> Requests {
        if !self.state.roster_loaded {
            return Vec::new();
        }
        let params = self.state.schedule.params();
        let ticket = self.state.schedule.entries.begin(params);
        vec![NetworkRequest::Schedule { ticket, roster: self.state.roster.clone() }]
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.editing = None;
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Free-text inputs
    // -----------------------------------------------------------------------

    pub fn start_editing(&mut self, field: InputField) {
        if field.tab() == self.state.active_tab {
            self.state.editing = Some(field);
        }
    }

    pub fn stop_editing(&mut self) {
        self.state.editing = None;
    }

    pub fn input_char(&mut self, c: char) -> Requests {
        let Some(field) = self.state.editing else {
            return Vec::new();
        };
        self.state.input_mut(field).push(c);
        self.on_input_changed(field)
    }

    pub fn input_backspace(&mut self) -> Requests {
        let Some(field) = self.state.editing else {
            return Vec::new();
        };
        self.state.input_mut(field).backspace();
        self.on_input_changed(field)
    }

    /// Re-resolve after each keystroke. Nothing is fetched until the text
    /// names a team (or a full date) that differs from the current one.
    fn on_input_changed(&mut self, field: InputField) -> Requests {
        let roster = self.state.roster.clone();
        let text = self.state.input(field).as_str().to_owned();

        match field {
            InputField::TeamSearch => match roster.resolve(&text) {
                Some(team) if team.id != self.state.team.team_id => {
                    self.state.team.team_id = team.id.clone();
                    if self.state.team.opponent_id.as_deref() == Some(team.id.as_str()) {
                        self.state.team.opponent_id = None;
                        self.state.team.opponent_search.clear();
                    }
                    self.request_team()
                }
                _ => Vec::new(),
            },
            InputField::OpponentSearch => {
                if self.state.input(field).is_empty() {
                    return self.clear_opponent();
                }
                match roster.resolve(&text) {
                    Some(team)
                        if team.id != self.state.team.team_id
                            && self.state.team.opponent_id.as_deref() != Some(team.id.as_str()) =>
                    {
                        self.state.team.opponent_id = Some(team.id.clone());
                        self.request_games()
                    }
                    _ => Vec::new(),
                }
            }
            InputField::LookupTeam => match roster.resolve(&text) {
                Some(team) if team.id != self.state.lookup.team_id => {
                    self.state.lookup.team_id = team.id.clone();
                    self.request_lookup()
                }
                _ => Vec::new(),
            },
            InputField::LookupDate => match self.state.lookup.date_input.as_date() {
                Some(date) if date != self.state.lookup.date => {
                    self.state.lookup.date = date;
                    self.request_lookup()
                }
                _ => Vec::new(),
            },
            InputField::ScheduleDate => match self.state.schedule.date_input.as_date() {
                Some(date) if date != self.state.schedule.date => {
                    self.state.schedule.date = date;
                    self.request_schedule()
                }
                _ => Vec::new(),
            },
            InputField::RegressionTeam => {
                self.state.regression.setup.team = text;
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // League tab
    // -----------------------------------------------------------------------

    pub fn league_next_stat(&mut self) -> Requests {
        self.state.league.stat = self.state.league.stat.next_in(&StatKey::ALL);
        self.request_league()
    }

    pub fn league_prev_stat(&mut self) -> Requests {
        self.state.league.stat = self.state.league.stat.prev_in(&StatKey::ALL);
        self.request_league()
    }

    pub fn league_next_season(&mut self) -> Requests {
        self.state.league.season = next_season(self.state.league.season);
        self.request_league()
    }

    // -----------------------------------------------------------------------
    // Team tab
    // -----------------------------------------------------------------------

    pub fn team_next_stat(&mut self) -> Requests {
        self.state.team.trend_stat = self.state.team.trend_stat.next_in(&StatKey::TREND);
        self.request_trend()
    }

    pub fn team_prev_stat(&mut self) -> Requests {
        self.state.team.trend_stat = self.state.team.trend_stat.prev_in(&StatKey::TREND);
        self.request_trend()
    }

    /// The season selector is hidden while comparing against an opponent.
    pub fn team_next_season(&mut self) -> Requests {
        if self.state.team.is_comparing() {
            return Vec::new();
        }
        self.state.team.season = next_season(self.state.team.season);
        self.request_team()
    }

    pub fn team_prev_season(&mut self) -> Requests {
        if self.state.team.is_comparing() {
            return Vec::new();
        }
        self.state.team.season = prev_season(self.state.team.season);
        self.request_team()
    }

    /// Back to the single-season log.
    pub fn clear_opponent(&mut self) -> Requests {
        self.state.team.opponent_search.clear();
        if self.state.team.opponent_id.take().is_none() {
            return Vec::new();
        }
        self.request_games()
    }

    pub fn scroll_games_down(&mut self) {
        let rows = self.state.team.games.state().value().map_or(0, Vec::len);
        if self.state.team.game_scroll + 1 < rows {
            self.state.team.game_scroll += 1;
        }
    }

    pub fn scroll_games_up(&mut self) {
        self.state.team.game_scroll = self.state.team.game_scroll.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Lookup tab
    // -----------------------------------------------------------------------

    pub fn lookup_next_stat(&mut self) -> Requests {
        self.state.lookup.stat = self.state.lookup.stat.next_in(&StatKey::LOOKUP);
        self.request_lookup()
    }

    pub fn lookup_prev_stat(&mut self) -> Requests {
        self.state.lookup.stat = self.state.lookup.stat.prev_in(&StatKey::LOOKUP);
        self.request_lookup()
    }

    // -----------------------------------------------------------------------
    // Schedule tab
    // -----------------------------------------------------------------------

    pub fn schedule_next_book(&mut self) {
        self.state.schedule.book = self.state.schedule.book.next();
    }

    pub fn schedule_prev_book(&mut self) {
        self.state.schedule.book = self.state.schedule.book.prev();
    }

    pub fn schedule_down(&mut self) {
        let rows = self.state.schedule.entries.state().value().map_or(0, Vec::len);
        if self.state.schedule.selected + 1 < rows {
            self.state.schedule.selected += 1;
        }
    }

    pub fn schedule_up(&mut self) {
        self.state.schedule.selected = self.state.schedule.selected.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Regression tab
    // -----------------------------------------------------------------------

    pub fn regression_down(&mut self) {
        self.state.regression.cursor = (self.state.regression.cursor + 1).min(FEATURES.len() - 1);
    }

    pub fn regression_up(&mut self) {
        self.state.regression.cursor = self.state.regression.cursor.saturating_sub(1);
    }

    pub fn regression_toggle(&mut self) {
        if let Some(feature) = FEATURES.get(self.state.regression.cursor) {
            self.state.regression.setup.toggle_feature(*feature);
        }
    }

    pub fn regression_cycle_target(&mut self) {
        self.state.regression.setup.cycle_target();
    }

    pub fn regression_run(&mut self) {
        let status = self.state.regression.setup.describe();
        info!("{status}");
        self.state.regression.status = Some(status);
    }
}

/// Apply `result` to `tracked`, logging when it arrives too late.
fn commit<P, T>(what: &str, tracked: &mut Tracked<P, T>, ticket: &Ticket<P>, result: FetchResult<T>) -> bool
where
    P: Clone + PartialEq,
    T: crate::state::fetch::Payload,
{
    let applied = tracked.commit(ticket, result);
    if !applied {
        debug!("dropped stale {what} response (generation {})", ticket.generation);
    }
    applied
}
