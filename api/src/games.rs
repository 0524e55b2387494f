use crate::roster::Roster;
use crate::wire::RawGame;
use crate::{BoxLine, GameRow, HomeAway};
use chrono::NaiveDate;
use log::warn;
use std::collections::HashSet;
use std::fmt;

/// Scores from the outcome-keyed columns disagree with the slot-keyed
/// period columns of the same game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub game_id: String,
    pub score_total: u32,
    pub box_total: u32,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "game {}: final scores sum to {} but period scores sum to {}",
            self.game_id, self.score_total, self.box_total
        )
    }
}

impl GameRow {
    /// `team_score + opponent_score` must equal the sum of both box totals
    /// when both boxes are present.
    pub fn integrity_check(&self) -> Option<IntegrityWarning> {
        let (team_box, opp_box) = (self.team_box?, self.opp_box?);
        let score_total = u32::from(self.team_score) + u32::from(self.opponent_score);
        let box_total = u32::from(team_box.total) + u32::from(opp_box.total);
        (score_total != box_total).then(|| IntegrityWarning {
            game_id: self.id.clone(),
            score_total,
            box_total,
        })
    }
}

/// Rebuild raw game records from one team's perspective, in input order.
pub fn derive_game_rows(raw: &[RawGame], perspective_team_id: &str, roster: &Roster) -> Vec<GameRow> {
    let rows: Vec<GameRow> = raw
        .iter()
        .map(|g| {
            let row = derive_game_row(g, perspective_team_id, roster);
            if let Some(warning) = row.integrity_check() {
                warn!("data integrity: {warning}");
            }
            row
        })
        .collect();
    for id in duplicate_ids(&rows) {
        warn!("data integrity: game {id} appears more than once");
    }
    rows
}

/// Ids shared by more than one row, each reported once, in first-seen order.
pub fn duplicate_ids(rows: &[GameRow]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    rows.iter()
        .map(|r| r.id.as_str())
        .filter(|id| !seen.insert(*id) && reported.insert(*id))
        .collect()
}

/// Every row whose scores and period scores disagree.
pub fn integrity_warnings(rows: &[GameRow]) -> Vec<IntegrityWarning> {
    rows.iter().filter_map(GameRow::integrity_check).collect()
}

fn derive_game_row(g: &RawGame, team_id: &str, roster: &Roster) -> GameRow {
    let is_team1 = g.team1_id == team_id;
    let opponent_id = if is_team1 { &g.team2_id } else { &g.team1_id };

    // Scores are keyed by outcome, not by slot.
    let winner_score = score(g.winner_score);
    let loser_score = score(g.loser_score);
    let (team_score, opponent_score) = if g.winner_id == team_id {
        (winner_score, loser_score)
    } else {
        (loser_score, winner_score)
    };

    // Period scores are keyed by slot.
    let team1_box = box_line(g.team1_h1, g.team1_h2, g.team1_ot);
    let team2_box = box_line(g.team2_h1, g.team2_h2, g.team2_ot);
    let (team_box, opp_box) = if is_team1 { (team1_box, team2_box) } else { (team2_box, team1_box) };
    let has_ot = [g.team1_ot, g.team2_ot].iter().any(|ot| ot.is_some_and(|v| v > 0.0));

    let home_away = if g.is_neutral_site {
        HomeAway::Neutral
    } else if g.home_team_id.as_deref() == Some(team_id) {
        HomeAway::Home
    } else {
        HomeAway::Away
    };

    GameRow {
        id: g.game_id.clone(),
        team_id: team_id.to_owned(),
        opponent_id: opponent_id.clone(),
        opponent_name: roster.name_or_unknown(opponent_id),
        game_date: g.game_date.as_deref().and_then(parse_date),
        home_away,
        team_score,
        opponent_score,
        team_box,
        opp_box,
        has_ot,
        winner_id: g.winner_id.clone(),
        open_total: g.open_total,
        close_total: g.close_total,
        game_total: g.game_total,
        kp_total: g.kp_total,
        predicted_score: g.predicted_score,
        predicted_possessions: g.predicted_possessions,
        win_probability: g.win_probability.clone(),
    }
}

/// Missing or malformed scores count as zero.
fn score(value: Option<f64>) -> u16 {
    value.map(|v| v.round().clamp(0.0, f64::from(u16::MAX)) as u16).unwrap_or(0)
}

fn box_line(h1: Option<f64>, h2: Option<f64>, ot: Option<f64>) -> Option<BoxLine> {
    let (h1, h2) = (h1?, h2?);
    let ot = ot.filter(|v| *v > 0.0).map(|v| score(Some(v)));
    Some(BoxLine::new(score(Some(h1)), score(Some(h2)), ot))
}

/// Accepts `2024-11-04` and timestamp forms such as `2024-11-04T19:00:00`.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    fn roster() -> Roster {
        Roster::new(vec![
            Team { id: "KP076".into(), name: "Duke".into() },
            Team { id: "KP150".into(), name: "North Carolina".into() },
            Team { id: "KP200".into(), name: "Kansas".into() },
        ])
    }

    fn raw(id: &str, team1: &str, team2: &str, winner: &str, w: f64, l: f64) -> RawGame {
        RawGame {
            game_id: id.into(),
            team1_id: team1.into(),
            team2_id: team2.into(),
            winner_id: winner.into(),
            winner_score: Some(w),
            loser_score: Some(l),
            ..Default::default()
        }
    }

    #[test]
    fn repeated_game_ids_are_reported_once() {
        let rows = derive_game_rows(
            &[
                raw("g1", "KP076", "KP150", "KP076", 80.0, 70.0),
                raw("g2", "KP076", "KP200", "KP076", 75.0, 60.0),
                raw("g1", "KP076", "KP150", "KP076", 80.0, 70.0),
                raw("g1", "KP076", "KP150", "KP076", 80.0, 70.0),
            ],
            "KP076",
            &roster(),
        );
        assert_eq!(rows.len(), 4);
        assert_eq!(duplicate_ids(&rows), vec!["g1"]);
        assert!(duplicate_ids(&rows[..2]).is_empty());
    }

    #[test]
    fn scores_follow_outcome_not_slot() {
        // Duke in slot 2, won 78-70.
        let won = raw("g1", "KP150", "KP076", "KP076", 78.0, 70.0);
        // Duke in slot 1, lost 65-72.
        let lost = raw("g2", "KP076", "KP200", "KP200", 72.0, 65.0);
        let rows = derive_game_rows(&[won, lost], "KP076", &roster());

        assert_eq!((rows[0].team_score, rows[0].opponent_score), (78, 70));
        assert_eq!(rows[0].opponent_name, "North Carolina");
        assert_eq!(rows[0].opponent_id, "KP150");
        assert_eq!((rows[1].team_score, rows[1].opponent_score), (65, 72));
        assert_eq!(rows[1].opponent_name, "Kansas");
        assert!(rows[0].is_win() && !rows[1].is_win());
    }

    #[test]
    fn box_scores_follow_slot() {
        let mut g = raw("g1", "KP150", "KP076", "KP076", 84.0, 80.0);
        g.team1_h1 = Some(35.0);
        g.team1_h2 = Some(38.0);
        g.team1_ot = Some(7.0);
        g.team2_h1 = Some(40.0);
        g.team2_h2 = Some(33.0);
        g.team2_ot = Some(11.0);
        let row = &derive_game_rows(&[g], "KP076", &roster())[0];

        assert_eq!(row.team_box, Some(BoxLine::new(40, 33, Some(11))));
        assert_eq!(row.opp_box, Some(BoxLine::new(35, 38, Some(7))));
        assert!(row.has_ot);
        assert!(row.integrity_check().is_none());
    }

    #[test]
    fn mismatched_totals_raise_a_warning() {
        let mut g = raw("g9", "KP076", "KP150", "KP076", 80.0, 70.0);
        g.team1_h1 = Some(40.0);
        g.team1_h2 = Some(40.0);
        g.team2_h1 = Some(30.0);
        g.team2_h2 = Some(30.0);
        let rows = derive_game_rows(&[g], "KP076", &roster());
        let warnings = integrity_warnings(&rows);

        assert_eq!(
            warnings,
            vec![IntegrityWarning { game_id: "g9".into(), score_total: 150, box_total: 140 }]
        );
        assert!(!rows[0].has_ot);
    }

    #[test]
    fn missing_period_scores_skip_the_check() {
        let mut g = raw("g1", "KP076", "KP150", "KP076", 80.0, 70.0);
        g.team1_h1 = Some(40.0);
        let row = &derive_game_rows(&[g], "KP076", &roster())[0];
        assert!(row.team_box.is_none());
        assert!(row.integrity_check().is_none());
    }

    #[test]
    fn home_away_distinguishes_neutral_site() {
        let mut home = raw("g1", "KP076", "KP150", "KP076", 80.0, 70.0);
        home.home_team_id = Some("KP076".into());
        let mut away = raw("g2", "KP076", "KP150", "KP076", 80.0, 70.0);
        away.home_team_id = Some("KP150".into());
        let mut neutral = raw("g3", "KP076", "KP150", "KP076", 80.0, 70.0);
        neutral.home_team_id = Some("KP076".into());
        neutral.is_neutral_site = true;
        let unknown_home = raw("g4", "KP076", "KP150", "KP076", 80.0, 70.0);

        let rows = derive_game_rows(&[home, away, neutral, unknown_home], "KP076", &roster());
        let sides: Vec<HomeAway> = rows.iter().map(|r| r.home_away).collect();
        assert_eq!(sides, vec![HomeAway::Home, HomeAway::Away, HomeAway::Neutral, HomeAway::Away]);
    }

    #[test]
    fn unknown_opponent_and_missing_scores_fall_back() {
        let mut g = raw("g1", "KP076", "KP999", "KP999", 0.0, 0.0);
        g.winner_score = None;
        g.loser_score = None;
        let row = &derive_game_rows(&[g], "KP076", &roster())[0];
        assert_eq!(row.opponent_name, "Unknown");
        assert_eq!((row.team_score, row.opponent_score), (0, 0));
    }

    #[test]
    fn derivation_preserves_input_order() {
        let mut games = Vec::new();
        for (i, date) in ["2025-03-01", "2025-02-20", "2025-02-20", "2025-01-05"].iter().enumerate() {
            let mut g = raw(&format!("g{i}"), "KP076", "KP150", "KP076", 70.0, 60.0);
            g.game_date = Some((*date).into());
            games.push(g);
        }
        let rows = derive_game_rows(&games, "KP076", &roster());
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g0", "g1", "g2", "g3"]);
        assert_eq!(rows[3].game_date, NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn dates_parse_with_or_without_time() {
        assert_eq!(parse_date("2024-11-04"), NaiveDate::from_ymd_opt(2024, 11, 4));
        assert_eq!(parse_date("2024-11-04T19:00:00+00:00"), NaiveDate::from_ymd_opt(2024, 11, 4));
        assert_eq!(parse_date("11/04/2024"), None);
        assert_eq!(parse_date(""), None);
    }
}
