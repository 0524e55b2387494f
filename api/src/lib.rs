pub mod client;
pub mod games;
pub mod lookup;
pub mod odds;
pub mod params;
pub mod query;
pub mod regression;
pub mod roster;
pub mod series;
pub mod summary;
pub mod wire;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types, independent of the backend row format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: String,   // "KP076"
    pub name: String, // "Duke"
}

/// The daily stats tracked per team and pre-averaged per league.
///
/// Both daily tables key rows by `external_key()`; the regression panel names
/// its variables by `internal_key()`. Both projections live on this one
/// enum so the two naming conventions cannot drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    #[default]
    ThreePointPct,
    TwoPointPct,
    FreeThrowPct,
    ThreePointRate,
    FreeThrowsMadePerGame,
    OppThreePointPct,
    OppTwoPointPct,
    OppFreeThrowPct,
    OppFreeThrowsMadePerGame,
    OppThreePointRate,
}

impl StatKey {
    pub const ALL: [StatKey; 10] = [
        StatKey::ThreePointPct,
        StatKey::TwoPointPct,
        StatKey::FreeThrowPct,
        StatKey::ThreePointRate,
        StatKey::FreeThrowsMadePerGame,
        StatKey::OppThreePointPct,
        StatKey::OppTwoPointPct,
        StatKey::OppFreeThrowPct,
        StatKey::OppFreeThrowsMadePerGame,
        StatKey::OppThreePointRate,
    ];

    /// Offensive stats offered by the daily lookup.
    pub const LOOKUP: [StatKey; 5] = [
        StatKey::ThreePointPct,
        StatKey::TwoPointPct,
        StatKey::FreeThrowPct,
        StatKey::ThreePointRate,
        StatKey::FreeThrowsMadePerGame,
    ];

    /// Shooting stats offered on the team-vs-league trend chart.
    pub const TREND: [StatKey; 3] = [
        StatKey::ThreePointPct,
        StatKey::TwoPointPct,
        StatKey::FreeThrowPct,
    ];

    pub fn external_key(&self) -> &'static str {
        match self {
            StatKey::ThreePointPct => "three-point-pct",
            StatKey::TwoPointPct => "two-point-pct",
            StatKey::FreeThrowPct => "free-throw-pct",
            StatKey::ThreePointRate => "three-point-rate",
            StatKey::FreeThrowsMadePerGame => "free-throws-made-per-game",
            StatKey::OppThreePointPct => "opponent-three-point-pct",
            StatKey::OppTwoPointPct => "opponent-two-point-pct",
            StatKey::OppFreeThrowPct => "opponent-free-throw-pct",
            StatKey::OppFreeThrowsMadePerGame => "opponent-free-throws-made-per-game",
            StatKey::OppThreePointRate => "opponent-three-point-rate",
        }
    }

    pub fn internal_key(&self) -> &'static str {
        match self {
            StatKey::ThreePointPct => "three_p_pct",
            StatKey::TwoPointPct => "two_p_pct",
            StatKey::FreeThrowPct => "ft_pct",
            StatKey::ThreePointRate => "three_point_rate",
            StatKey::FreeThrowsMadePerGame => "ftm_pg",
            StatKey::OppThreePointPct => "opp_three_p_pct",
            StatKey::OppTwoPointPct => "opp_two_p_pct",
            StatKey::OppFreeThrowPct => "opp_ft_pct",
            StatKey::OppFreeThrowsMadePerGame => "opp_ftm_pg",
            StatKey::OppThreePointRate => "opp_three_point_rate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::ThreePointPct => "3P%",
            StatKey::TwoPointPct => "2P%",
            StatKey::FreeThrowPct => "FT%",
            StatKey::ThreePointRate => "3P Rate",
            StatKey::FreeThrowsMadePerGame => "FT Made/G",
            StatKey::OppThreePointPct => "Opp 3P%",
            StatKey::OppTwoPointPct => "Opp 2P%",
            StatKey::OppFreeThrowPct => "Opp FT%",
            StatKey::OppFreeThrowsMadePerGame => "Opp FT Made/G",
            StatKey::OppThreePointRate => "Opp 3P Rate",
        }
    }

    pub fn from_external_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.external_key() == key)
    }

    /// Next entry of `cycle` after `self`, wrapping. Falls back to the first
    /// entry when `self` is not part of the cycle.
    pub fn next_in(self, cycle: &[StatKey]) -> StatKey {
        let pos = cycle.iter().position(|s| *s == self);
        match pos {
            Some(i) => cycle[(i + 1) % cycle.len()],
            None => cycle.first().copied().unwrap_or(self),
        }
    }

    pub fn prev_in(self, cycle: &[StatKey]) -> StatKey {
        let pos = cycle.iter().position(|s| *s == self);
        match pos {
            Some(0) => cycle.last().copied().unwrap_or(self),
            Some(i) => cycle[i - 1],
            None => cycle.first().copied().unwrap_or(self),
        }
    }
}

/// Whether a scalar request targets one team or the league-wide aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Team(String),
    League,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyStatPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// League value pre-averaged across teams by the backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueDailyAggregate {
    pub date: NaiveDate,
    pub value: f64,
}

/// One point of a team-vs-league comparison chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub team_value: f64,
    pub league_value: Option<f64>, // None = gap on the chart, never zero
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HomeAway {
    #[default]
    Home,
    Away,
    Neutral,
}

impl HomeAway {
    pub fn label(&self) -> &'static str {
        match self {
            HomeAway::Home => "Home",
            HomeAway::Away => "Away",
            HomeAway::Neutral => "Neutral",
        }
    }
}

/// Period scores for one side of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxLine {
    pub h1: u16,
    pub h2: u16,
    pub ot: Option<u16>,
    pub total: u16,
}

impl BoxLine {
    pub fn new(h1: u16, h2: u16, ot: Option<u16>) -> Self {
        Self { h1, h2, ot, total: h1.saturating_add(h2).saturating_add(ot.unwrap_or(0)) }
    }
}

/// A game seen from one team's perspective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRow {
    pub id: String,
    pub team_id: String,
    pub opponent_id: String,
    pub opponent_name: String,
    pub game_date: Option<NaiveDate>,
    pub home_away: HomeAway,
    pub team_score: u16,
    pub opponent_score: u16,
    pub team_box: Option<BoxLine>,
    pub opp_box: Option<BoxLine>,
    pub has_ot: bool,
    pub winner_id: String,
    pub open_total: Option<f64>,
    pub close_total: Option<f64>,
    pub game_total: Option<f64>,
    pub kp_total: Option<f64>,
    pub predicted_score: Option<f64>,
    pub predicted_possessions: Option<f64>,
    pub win_probability: Option<String>, // "78%" as stored
}

impl GameRow {
    pub fn is_win(&self) -> bool {
        self.team_score > self.opponent_score
    }

    pub fn margin(&self) -> i32 {
        i32::from(self.team_score) - i32::from(self.opponent_score)
    }

    /// "team-opponent", e.g. "78-70".
    pub fn actual_score(&self) -> String {
        format!("{}-{}", self.team_score, self.opponent_score)
    }

    /// Win probability as a 0–100 number, accepting "78%", "78" or "0.78".
    pub fn win_probability_pct(&self) -> Option<f64> {
        let raw = self.win_probability.as_deref()?.trim().trim_end_matches('%').trim();
        let value = raw.parse::<f64>().ok()?;
        let pct = if value <= 1.0 { value * 100.0 } else { value };
        Some(pct.clamp(0.0, 100.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

/// Totals and sides posted by one sportsbook.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OddsLine {
    pub open_total: Option<f64>,
    pub close_total: Option<f64>,
    pub side_open: Option<f64>,
    pub side_close: Option<f64>,
}

/// A game on the day's slate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleEntry {
    pub game_date: Option<NaiveDate>,
    pub team1: TeamRef,
    pub team2: TeamRef,
    pub predicted_winner: Option<String>,
    pub predicted_score: Option<String>,
    pub predicted_possessions: Option<f64>,
    pub location: Option<String>,
    pub home_team_id: Option<String>,
    /// Lines for the single book whose columns the table carries.
    pub book_of_record: OddsLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_key_projections_round_trip_through_the_enum() {
        for stat in StatKey::ALL {
            assert_eq!(StatKey::from_external_key(stat.external_key()), Some(stat));
        }
        assert_eq!(StatKey::from_external_key("three_p_pct"), None);
    }

    #[test]
    fn stat_key_mapping_matches_backend_names() {
        assert_eq!(StatKey::FreeThrowsMadePerGame.external_key(), "free-throws-made-per-game");
        assert_eq!(StatKey::FreeThrowsMadePerGame.internal_key(), "ftm_pg");
        assert_eq!(StatKey::OppThreePointRate.external_key(), "opponent-three-point-rate");
        assert_eq!(StatKey::OppThreePointRate.internal_key(), "opp_three_point_rate");
    }

    #[test]
    fn stat_cycling_wraps() {
        assert_eq!(StatKey::FreeThrowPct.next_in(&StatKey::TREND), StatKey::ThreePointPct);
        assert_eq!(StatKey::ThreePointPct.prev_in(&StatKey::TREND), StatKey::FreeThrowPct);
        // Not in the cycle: snap to the first entry.
        assert_eq!(StatKey::OppTwoPointPct.next_in(&StatKey::LOOKUP), StatKey::ThreePointPct);
    }

    #[test]
    fn box_line_total_includes_overtime() {
        assert_eq!(BoxLine::new(35, 40, None).total, 75);
        assert_eq!(BoxLine::new(35, 40, Some(9)).total, 84);
    }

    #[test]
    fn win_probability_accepts_several_shapes() {
        let mut row = GameRow { win_probability: Some("78%".into()), ..Default::default() };
        assert_eq!(row.win_probability_pct(), Some(78.0));
        row.win_probability = Some("0.5".into());
        assert_eq!(row.win_probability_pct(), Some(50.0));
        row.win_probability = Some("n/a".into());
        assert_eq!(row.win_probability_pct(), None);
    }
}
