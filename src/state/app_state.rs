use crate::app::MenuItem;
use crate::state::app_settings::AppSettings;
use crate::state::fetch::Tracked;
use chrono::NaiveDate;
use courtside_api::lookup::Comparison;
use courtside_api::odds::{BookOfRecord, Sportsbook};
use courtside_api::params::{
    GameLogParams, LeagueParams, LookupParams, ProfileParams, ScheduleParams, TrendParams,
};
use courtside_api::regression::RegressionSetup;
use courtside_api::roster::Roster;
use courtside_api::series::ProfileValue;
use courtside_api::{GameRow, LeagueDailyAggregate, ScheduleEntry, SeriesPoint, StatKey};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Text input
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputField {
    TeamSearch,
    OpponentSearch,
    LookupTeam,
    LookupDate,
    ScheduleDate,
    RegressionTeam,
}

impl InputField {
    /// The tab that owns the field.
    pub fn tab(&self) -> MenuItem {
        match self {
            InputField::TeamSearch | InputField::OpponentSearch => MenuItem::Team,
            InputField::LookupTeam | InputField::LookupDate => MenuItem::Lookup,
            InputField::ScheduleDate => MenuItem::Schedule,
            InputField::RegressionTeam => MenuItem::Regression,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// `YYYY-MM-DD` only; anything else is still being typed.
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value.trim(), "%Y-%m-%d").ok()
    }
}

// ---------------------------------------------------------------------------
// League tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LeagueState {
    pub season: u16,
    pub stat: StatKey,
    pub series: Tracked<LeagueParams, Vec<LeagueDailyAggregate>>,
}

impl LeagueState {
    pub fn params(&self) -> LeagueParams {
        LeagueParams { season: self.season, stat: self.stat }
    }
}

// ---------------------------------------------------------------------------
// Team tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamState {
    pub search: TextInput,
    pub opponent_search: TextInput,
    /// Last search that resolved. Kept while the text does not match.
    pub team_id: String,
    pub opponent_id: Option<String>,
    pub season: u16,
    pub trend_stat: StatKey,
    pub series: Tracked<TrendParams, Vec<SeriesPoint>>,
    pub profile: Tracked<ProfileParams, Vec<ProfileValue>>,
    pub games: Tracked<GameLogParams, Vec<GameRow>>,
    pub game_scroll: usize,
}

impl TeamState {
    pub fn is_comparing(&self) -> bool {
        self.opponent_id.is_some()
    }

    pub fn trend_params(&self) -> TrendParams {
        TrendParams { team_id: self.team_id.clone(), season: self.season, stat: self.trend_stat }
    }

    pub fn profile_params(&self) -> ProfileParams {
        ProfileParams { team_id: self.team_id.clone(), season: self.season }
    }

    pub fn game_log_params(&self) -> GameLogParams {
        GameLogParams {
            team_id: self.team_id.clone(),
            opponent_id: self.opponent_id.clone(),
            season: self.season,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LookupState {
    pub search: TextInput,
    pub team_id: String,
    pub date_input: TextInput,
    pub date: NaiveDate,
    pub stat: StatKey,
    pub result: Tracked<LookupParams, Comparison>,
}

impl LookupState {
    pub fn params(&self) -> LookupParams {
        LookupParams { team_id: self.team_id.clone(), date: self.date, stat: self.stat }
    }
}

// ---------------------------------------------------------------------------
// Schedule tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub date_input: TextInput,
    pub date: NaiveDate,
    pub book: Sportsbook,
    pub source: BookOfRecord,
    pub entries: Tracked<ScheduleParams, Vec<ScheduleEntry>>,
    pub selected: usize,
}

impl ScheduleState {
    pub fn params(&self) -> ScheduleParams {
        ScheduleParams { date: self.date }
    }
}

// ---------------------------------------------------------------------------
// Regression tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RegressionState {
    pub search: TextInput,
    pub setup: RegressionSetup,
    /// Index into the feature list.
    pub cursor: usize,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub editing: Option<InputField>,
    pub last_error: Option<String>,
    pub roster: Arc<Roster>,
    pub roster_loaded: bool,
    pub league: LeagueState,
    pub team: TeamState,
    pub lookup: LookupState,
    pub schedule: ScheduleState,
    pub regression: RegressionState,
}

impl AppState {
    pub fn new(settings: &AppSettings) -> Self {
        let lookup_date = settings.lookup_date();
        let schedule_date = settings.schedule_date();
        Self {
            league: LeagueState { season: settings.season, ..LeagueState::default() },
            team: TeamState {
                team_id: settings.team_id.clone(),
                season: settings.season,
                ..TeamState::default()
            },
            lookup: LookupState {
                team_id: settings.team_id.clone(),
                date_input: TextInput::new(lookup_date.format("%Y-%m-%d").to_string()),
                date: lookup_date,
                ..LookupState::default()
            },
            schedule: ScheduleState {
                date_input: TextInput::new(schedule_date.format("%Y-%m-%d").to_string()),
                date: schedule_date,
                book: settings.book,
                source: BookOfRecord::new(settings.book),
                ..ScheduleState::default()
            },
            ..Self::default()
        }
    }

    pub fn input(&self, field: InputField) -> &TextInput {
        match field {
            InputField::TeamSearch => &self.team.search,
            InputField::OpponentSearch => &self.team.opponent_search,
            InputField::LookupTeam => &self.lookup.search,
            InputField::LookupDate => &self.lookup.date_input,
            InputField::ScheduleDate => &self.schedule.date_input,
            InputField::RegressionTeam => &self.regression.search,
        }
    }

    pub fn input_mut(&mut self, field: InputField) -> &mut TextInput {
        match field {
            InputField::TeamSearch => &mut self.team.search,
            InputField::OpponentSearch => &mut self.team.opponent_search,
            InputField::LookupTeam => &mut self.lookup.search,
            InputField::LookupDate => &mut self.lookup.date_input,
            InputField::ScheduleDate => &mut self.schedule.date_input,
            InputField::RegressionTeam => &mut self.regression.search,
        }
    }

    pub fn is_editing(&self, field: InputField) -> bool {
        self.editing == Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_input_only_parses_complete_iso_dates() {
        let mut input = TextInput::new("2024-11-0");
        assert_eq!(input.as_date(), None);
        input.push('4');
        assert_eq!(input.as_date(), NaiveDate::from_ymd_opt(2024, 11, 4));
        input.push('x');
        assert_eq!(input.as_date(), None);
    }

    #[test]
    fn initial_state_follows_settings() {
        let settings = AppSettings {
            team_id: "KP150".into(),
            season: 2023,
            date: NaiveDate::from_ymd_opt(2025, 1, 2),
            book: Sportsbook::Caesars,
            ..AppSettings::default()
        };
        let state = AppState::new(&settings);
        assert_eq!(state.team.team_id, "KP150");
        assert_eq!(state.league.season, 2023);
        assert_eq!(state.lookup.date_input.as_str(), "2025-01-02");
        assert_eq!(state.schedule.date, settings.schedule_date());
        assert_eq!(state.schedule.source.book, Sportsbook::Caesars);
        assert!(!state.team.is_comparing());
    }

    #[test]
    fn every_field_belongs_to_a_tab() {
        assert_eq!(InputField::OpponentSearch.tab(), MenuItem::Team);
        assert_eq!(InputField::LookupDate.tab(), MenuItem::Lookup);
        assert_eq!(InputField::RegressionTeam.tab(), MenuItem::Regression);
    }
}
