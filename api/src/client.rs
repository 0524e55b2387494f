use crate::games::{derive_game_rows, parse_date};
use crate::lookup::Comparison;
use crate::params::GameLogParams;
use crate::query::{between, either_slot, Direction, Query};
use crate::roster::Roster;
use crate::series::{merge_series, season_profile, ProfileValue, PROFILE_AXES};
use crate::wire::{LeagueTrendRow, RawGame, ScheduleRow, TeamRow, TeamStatRow};
use crate::{
    DailyStatPoint, GameRow, LeagueDailyAggregate, OddsLine, ScheduleEntry, Scope, SeriesPoint,
    StatKey, Team, TeamRef,
};
use chrono::NaiveDate;
use log::debug;
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const TEAMS: &str = "teams";
const TEAM_DAILY_STATS: &str = "tr_team_daily_stats";
const LEAGUE_DAILY_TRENDS: &str = "league_daily_trends";
const GAMES: &str = "games";
const DAY_SCHEDULE: &str = "day_schedule";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the backing store lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            api_key: api_key.trim().to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `COURTSIDE_DB_URL`, `COURTSIDE_DB_KEY` and the optional
    /// `COURTSIDE_TIMEOUT_SECS`.
    pub fn from_env() -> ApiResult<Self> {
        let base_url = required_var("COURTSIDE_DB_URL")?;
        let api_key = required_var("COURTSIDE_DB_KEY")?;
        let mut config = Self::new(&base_url, &api_key);
        if let Ok(raw) = std::env::var("COURTSIDE_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ApiError::Config(format!("COURTSIDE_TIMEOUT_SECS is not a number: {raw}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn required_var(name: &str) -> ApiResult<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Config(format!("{name} is not set"))),
    }
}

/// Read-only client for the stats tables, served over PostgREST.
#[derive(Debug, Clone)]
pub struct StatsApi {
    client: Client,
    config: ApiConfig,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Config(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl StatsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("courtside/0.1 (terminal stats dashboard)")
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Every team, ordered by name.
    pub async fn fetch_teams(&self) -> ApiResult<Vec<Team>> {
        let query = Query::table(TEAMS).select("team_id,team_name").order("team_name", Direction::Asc);
        let rows: Vec<TeamRow> = self.get(query).await?;
        Ok(rows
            .into_iter()
            .filter(|r| !r.team_id.is_empty())
            .map(|r| Team { id: r.team_id, name: r.team_name })
            .collect())
    }

    pub async fn fetch_roster(&self) -> ApiResult<Roster> {
        self.fetch_teams().await.map(Roster::new)
    }

    /// One stat on one date. Exactly one matching row yields its value;
    /// zero rows, several rows, or a null value yield `None`.
    pub async fn fetch_scalar(&self, scope: &Scope, date: NaiveDate, stat: StatKey) -> ApiResult<Option<f64>> {
        let day = date.format("%Y-%m-%d").to_string();
        match scope {
            Scope::Team(team_id) => {
                let query = Query::table(TEAM_DAILY_STATS)
                    .select("stat_value")
                    .eq("team_id", team_id)
                    .eq("stat_date", &day)
                    .eq("stat_name", stat.external_key());
                let rows: Vec<TeamStatRow> = self.get(query).await?;
                Ok(single(rows).and_then(|r| r.stat_value))
            }
            Scope::League => {
                let query = Query::table(LEAGUE_DAILY_TRENDS)
                    .select("avg_value")
                    .eq("stat_date", &day)
                    .eq("stat_name", stat.external_key());
                let rows: Vec<LeagueTrendRow> = self.get(query).await?;
                Ok(single(rows).and_then(|r| r.avg_value))
            }
        }
    }

    /// Team and league scalars for the same (date, stat), fetched together.
    pub async fn fetch_comparison(&self, team_id: &str, date: NaiveDate, stat: StatKey) -> ApiResult<Comparison> {
        let team_scope = Scope::Team(team_id.to_owned());
        let (team, league) = futures_util::join!(
            self.fetch_scalar(&team_scope, date, stat),
            self.fetch_scalar(&Scope::League, date, stat)
        );
        Ok(Comparison { team_value: team?, league_value: league? })
    }

    /// Ascending by date. Rows with an unparseable date or no value are skipped.
    pub async fn fetch_team_series(&self, team_id: &str, season: u16, stat: StatKey) -> ApiResult<Vec<DailyStatPoint>> {
        let query = Query::table(TEAM_DAILY_STATS)
            .select("stat_date,stat_value")
            .eq("team_id", team_id)
            .eq("season_year", season)
            .eq("stat_name", stat.external_key())
            .order("stat_date", Direction::Asc);
        let rows: Vec<TeamStatRow> = self.get(query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                Some(DailyStatPoint { date: parse_date(r.stat_date.as_deref()?)?, value: r.stat_value? })
            })
            .collect())
    }

    pub async fn fetch_league_series(&self, season: u16, stat: StatKey) -> ApiResult<Vec<LeagueDailyAggregate>> {
        let query = Query::table(LEAGUE_DAILY_TRENDS)
            .select("stat_date,avg_value")
            .eq("season_year", season)
            .eq("stat_name", stat.external_key())
            .order("stat_date", Direction::Asc);
        let rows: Vec<LeagueTrendRow> = self.get(query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                Some(LeagueDailyAggregate { date: parse_date(r.stat_date.as_deref()?)?, value: r.avg_value? })
            })
            .collect())
    }

    /// Team series merged with the league series for the same (season, stat).
    pub async fn fetch_series(&self, team_id: &str, season: u16, stat: StatKey) -> ApiResult<Vec<SeriesPoint>> {
        let (team, league) = futures_util::join!(
            self.fetch_team_series(team_id, season, stat),
            self.fetch_league_series(season, stat)
        );
        Ok(merge_series(&team?, &league?))
    }

    /// Season averages on the five style axes, team against league.
    pub async fn fetch_style_profile(&self, team_id: &str, season: u16) -> ApiResult<Vec<ProfileValue>> {
        let names: Vec<&str> = PROFILE_AXES.iter().map(|a| a.stat.external_key()).collect();
        let team_query = Query::table(TEAM_DAILY_STATS)
            .select("stat_name,stat_value")
            .eq("team_id", team_id)
            .eq("season_year", season)
            .in_list("stat_name", &names);
        let league_query = Query::table(LEAGUE_DAILY_TRENDS)
            .select("stat_name,avg_value")
            .eq("season_year", season)
            .in_list("stat_name", &names);

        let (team, league) = futures_util::join!(
            self.get::<Vec<TeamStatRow>>(team_query),
            self.get::<Vec<LeagueTrendRow>>(league_query)
        );
        let team_rows: Vec<(StatKey, f64)> = team?
            .into_iter()
            .filter_map(|r| Some((StatKey::from_external_key(r.stat_name.as_deref()?)?, r.stat_value?)))
            .collect();
        let league_rows: Vec<(StatKey, f64)> = league?
            .into_iter()
            .filter_map(|r| Some((StatKey::from_external_key(r.stat_name.as_deref()?)?, r.avg_value?)))
            .collect();
        Ok(season_profile(&team_rows, &league_rows))
    }

    /// Games involving `team_id`, newest first. With an opponent, every
    /// meeting across all seasons; without, `season` only.
    pub async fn fetch_raw_games(&self, team_id: &str, opponent_id: Option<&str>, season: u16) -> ApiResult<Vec<RawGame>> {
        let query = match opponent_id {
            Some(opponent) => Query::table(GAMES).or(&between(team_id, opponent)),
            None => Query::table(GAMES).eq("season", season).or(&either_slot(team_id)),
        };
        self.get(query.order("game_date", Direction::Desc)).await
    }

    pub async fn fetch_game_log(&self, params: &GameLogParams, roster: &Roster) -> ApiResult<Vec<GameRow>> {
        let raw = self
            .fetch_raw_games(&params.team_id, params.opponent_id.as_deref(), params.season)
            .await?;
        Ok(derive_game_rows(&raw, &params.team_id, roster))
    }

    /// The slate for one day, with team names resolved through `roster`.
    pub async fn fetch_schedule(&self, date: NaiveDate, roster: &Roster) -> ApiResult<Vec<ScheduleEntry>> {
        let query = Query::table(DAY_SCHEDULE).eq("game_date", date.format("%Y-%m-%d"));
        let rows: Vec<ScheduleRow> = self.get(query).await?;
        Ok(rows.into_iter().map(|r| map_schedule_row(r, roster)).collect())
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, query: Query) -> ApiResult<T> {
        let base = format!("{}/rest/v1/{}", self.config.base_url, query.table_name());
        let endpoint = Url::parse_with_params(&base, query.into_params())
            .map_err(|e| ApiError::Config(format!("invalid base url {base}: {e}")))?;
        let url = endpoint.to_string();
        debug!("GET {url}");

        let response = self
            .client
            .get(endpoint)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        match response.error_for_status() {
            Ok(res) => res.json::<T>().await.map_err(|e| ApiError::Parsing(e, url)),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url))
                }
            }
        }
    }
}

/// The only row, or `None` when there are zero or several.
fn single<T>(mut rows: Vec<T>) -> Option<T> {
    if rows.len() == 1 { rows.pop() } else { None }
}

fn map_schedule_row(r: ScheduleRow, roster: &Roster) -> ScheduleEntry {
    let team = |id: String| TeamRef { name: roster.name_or_unknown(&id), id };
    ScheduleEntry {
        game_date: r.game_date.as_deref().and_then(parse_date),
        team1: team(r.team1_id),
        team2: team(r.team2_id),
        predicted_winner: r.predicted_winner,
        predicted_score: r.predicted_score,
        predicted_possessions: r.predicted_possessions,
        location: r.location,
        home_team_id: r.home_team_id,
        book_of_record: OddsLine {
            open_total: r.open_total,
            close_total: r.close_total,
            side_open: r.side_open,
            side_close: r.side_close,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_requires_exactly_one_row() {
        assert_eq!(single::<u8>(vec![]), None);
        assert_eq!(single(vec![7]), Some(7));
        assert_eq!(single(vec![7, 8]), None);
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = ApiConfig::new("https://example.supabase.co/ ", " key ");
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn schedule_rows_resolve_team_names() {
        let roster = Roster::new(vec![Team { id: "KP076".into(), name: "Duke".into() }]);
        let row = ScheduleRow {
            game_date: Some("2024-11-04".into()),
            team1_id: "KP076".into(),
            team2_id: "KP999".into(),
            close_total: Some(141.5),
            ..Default::default()
        };
        let entry = map_schedule_row(row, &roster);
        assert_eq!(entry.team1.name, "Duke");
        assert_eq!(entry.team2.name, "Unknown");
        assert_eq!(entry.game_date, NaiveDate::from_ymd_opt(2024, 11, 4));
        assert_eq!(entry.book_of_record.close_total, Some(141.5));
    }

    #[test]
    fn config_error_names_the_variable() {
        let err = ApiError::Config("COURTSIDE_DB_URL is not set".into());
        assert_eq!(err.to_string(), "Configuration error: COURTSIDE_DB_URL is not set");
    }
}
