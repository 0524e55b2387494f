//! Immutable fetch parameters, one value per widget.
//!
//! Every fetch is a function of one of these values. Any change in the UI
//! produces a new value; the view compares values to decide whether a
//! response still belongs to the current selection.

use crate::StatKey;
use chrono::NaiveDate;

pub const AVAILABLE_SEASONS: [u16; 4] = [2025, 2024, 2023, 2022];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupParams {
    pub team_id: String,
    pub date: NaiveDate,
    pub stat: StatKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrendParams {
    pub team_id: String,
    pub season: u16,
    pub stat: StatKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeagueParams {
    pub season: u16,
    pub stat: StatKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileParams {
    pub team_id: String,
    pub season: u16,
}

/// With an opponent the log spans every season of the matchup; without one
/// it covers `season` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameLogParams {
    pub team_id: String,
    pub opponent_id: Option<String>,
    pub season: u16,
}

impl GameLogParams {
    pub fn is_head_to_head(&self) -> bool {
        self.opponent_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleParams {
    pub date: NaiveDate,
}

pub fn next_season(season: u16) -> u16 {
    let i = AVAILABLE_SEASONS.iter().position(|s| *s == season).unwrap_or(0);
    AVAILABLE_SEASONS[(i + 1) % AVAILABLE_SEASONS.len()]
}

pub fn prev_season(season: u16) -> u16 {
    let i = AVAILABLE_SEASONS.iter().position(|s| *s == season).unwrap_or(0);
    AVAILABLE_SEASONS[(i + AVAILABLE_SEASONS.len() - 1) % AVAILABLE_SEASONS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_selector_wraps() {
        assert_eq!(next_season(2025), 2024);
        assert_eq!(next_season(2022), 2025);
        assert_eq!(prev_season(2025), 2022);
        assert_eq!(next_season(1999), 2024);
    }

    #[test]
    fn params_compare_by_value() {
        let a = TrendParams { team_id: "KP076".into(), season: 2025, stat: StatKey::ThreePointPct };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.stat = StatKey::TwoPointPct;
        assert_ne!(a, b);
    }

    #[test]
    fn head_to_head_is_driven_by_opponent() {
        let mut p = GameLogParams { team_id: "KP076".into(), opponent_id: None, season: 2025 };
        assert!(!p.is_head_to_head());
        p.opponent_id = Some("KP150".into());
        assert!(p.is_head_to_head());
    }
}
