//! Aggregates over a derived game log: record and margin for the
//! head-to-head bar, over/under and model-beating rates for the Vegas tracker.

use crate::GameRow;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Record {
    pub wins: usize,
    pub losses: usize,
    /// Mean of `team_score - opponent_score`; 0 for an empty log.
    pub avg_margin: f64,
}

impl Record {
    pub fn from_rows(rows: &[GameRow]) -> Self {
        let wins = rows.iter().filter(|g| g.is_win()).count();
        let total_margin: i64 = rows.iter().map(|g| i64::from(g.margin())).sum();
        let avg_margin = if rows.is_empty() { 0.0 } else { total_margin as f64 / rows.len() as f64 };
        Self { wins, losses: rows.len() - wins, avg_margin }
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses
    }

    /// In `[0, 1]`; 0 when no games were played.
    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.wins as f64 / n as f64,
        }
    }

    /// "12-3"
    pub fn display(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    /// "+4.5", "-2.0", "0.0"
    pub fn margin_display(&self) -> String {
        let rounded = (self.avg_margin * 10.0).round() / 10.0;
        if rounded > 0.0 { format!("+{rounded:.1}") } else { format!("{:.1}", rounded + 0.0) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalOutcome {
    Over,
    Under,
    Push,
}

impl GameRow {
    /// Over/under result against the closing total. `None` when the row has
    /// no usable closing line. A missing game total counts as zero.
    pub fn total_outcome(&self) -> Option<TotalOutcome> {
        let close = self.close_total.filter(|c| *c > 0.0)?;
        let actual = self.game_total.unwrap_or(0.0);
        Some(if actual > close {
            TotalOutcome::Over
        } else if actual < close {
            TotalOutcome::Under
        } else {
            TotalOutcome::Push
        })
    }

    pub fn beat_prediction(&self) -> bool {
        self.predicted_score.is_some_and(|p| f64::from(self.team_score) > p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingTrend {
    Over,
    Under,
    Balanced,
}

impl BettingTrend {
    pub fn label(&self) -> &'static str {
        match self {
            BettingTrend::Over => "↑ Over",
            BettingTrend::Under => "↓ Under",
            BettingTrend::Balanced => "→ Balanced",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BettingSummary {
    pub overs: usize,
    pub unders: usize,
    pub pushes: usize,
    /// Rows with a closing total above zero; denominator of the O/U rates.
    pub counted: usize,
    pub beat_prediction: usize,
    /// All rows; denominator of the beat-prediction rate.
    pub total_games: usize,
}

impl BettingSummary {
    pub fn from_rows(rows: &[GameRow]) -> Self {
        let mut summary = Self { total_games: rows.len(), ..Self::default() };
        for g in rows {
            if let Some(outcome) = g.total_outcome() {
                summary.counted += 1;
                match outcome {
                    TotalOutcome::Over => summary.overs += 1,
                    TotalOutcome::Under => summary.unders += 1,
                    TotalOutcome::Push => summary.pushes += 1,
                }
            }
            if g.beat_prediction() {
                summary.beat_prediction += 1;
            }
        }
        summary
    }

    pub fn over_pct(&self) -> f64 {
        pct(self.overs, self.counted)
    }

    pub fn under_pct(&self) -> f64 {
        pct(self.unders, self.counted)
    }

    pub fn push_pct(&self) -> f64 {
        pct(self.pushes, self.counted)
    }

    /// Share of ALL games where the team outscored its predicted score,
    /// including games that carry no prediction.
    pub fn beat_prediction_rate(&self) -> f64 {
        pct(self.beat_prediction, self.total_games) / 100.0
    }

    /// Whether any row carried a closing line. Without one the O/U rates
    /// are meaningless and must not be shown as zeros.
    pub fn has_lines(&self) -> bool {
        self.counted > 0
    }

    /// `None` when no row has a usable closing line.
    pub fn trend(&self) -> Option<BettingTrend> {
        if !self.has_lines() {
            return None;
        }
        let over = self.over_pct();
        Some(if over > 55.0 {
            BettingTrend::Over
        } else if over < 45.0 {
            BettingTrend::Under
        } else {
            BettingTrend::Balanced
        })
    }

    /// "O-U-P", e.g. "9-6-1".
    pub fn display(&self) -> String {
        format!("{}-{}-{}", self.overs, self.unders, self.pushes)
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: u16, opp: u16, close: Option<f64>, total: Option<f64>) -> GameRow {
        GameRow {
            team_score: team,
            opponent_score: opp,
            close_total: close,
            game_total: total,
            ..Default::default()
        }
    }

    #[test]
    fn worked_example_two_games() {
        let rows = [row(70, 65, Some(130.0), Some(140.0)), row(60, 75, Some(120.0), Some(110.0))];
        let record = Record::from_rows(&rows);
        assert_eq!((record.wins, record.losses), (1, 1));
        assert_eq!(record.avg_margin, -5.0);

        let betting = BettingSummary::from_rows(&rows);
        assert_eq!((betting.overs, betting.unders, betting.pushes), (1, 1, 0));
        assert_eq!(betting.over_pct(), 50.0);
        assert_eq!(betting.trend(), Some(BettingTrend::Balanced));
    }

    #[test]
    fn record_on_empty_log_is_zero() {
        let record = Record::from_rows(&[]);
        assert_eq!(record.games(), 0);
        assert_eq!(record.win_rate(), 0.0);
        assert_eq!(record.avg_margin, 0.0);
        assert_eq!(record.margin_display(), "0.0");
    }

    #[test]
    fn wins_plus_losses_equals_games_and_rate_is_bounded() {
        let rows = [row(70, 60, None, None), row(60, 70, None, None), row(65, 65, None, None)];
        let record = Record::from_rows(&rows);
        assert_eq!(record.wins + record.losses, rows.len());
        assert_eq!(record.wins, 1);
        assert!((0.0..=1.0).contains(&record.win_rate()));
        assert_eq!(record.display(), "1-2");
    }

    #[test]
    fn margin_display_is_signed() {
        let up = Record::from_rows(&[row(80, 70, None, None), row(71, 70, None, None)]);
        assert_eq!(up.margin_display(), "+5.5");
        let down = Record::from_rows(&[row(60, 62, None, None)]);
        assert_eq!(down.margin_display(), "-2.0");
    }

    #[test]
    fn rows_without_valid_close_are_not_counted() {
        let rows = [
            row(70, 65, Some(130.0), Some(135.0)), // over
            row(70, 65, Some(135.0), Some(135.0)), // push
            row(70, 65, None, Some(135.0)),        // no line
            row(70, 65, Some(0.0), Some(135.0)),   // zero line
            row(70, 65, Some(140.0), None),        // line, no total -> under
        ];
        let s = BettingSummary::from_rows(&rows);
        assert_eq!(s.counted, 3);
        assert_eq!(s.overs + s.unders + s.pushes, s.counted);
        assert!(s.counted <= rows.len());
        assert_eq!((s.overs, s.unders, s.pushes), (1, 1, 1));
        assert!((s.push_pct() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn beat_prediction_uses_every_row_as_denominator() {
        let mut a = row(80, 70, None, None);
        a.predicted_score = Some(75.0);
        let mut b = row(70, 72, None, None);
        b.predicted_score = Some(74.0);
        let c = row(90, 60, None, None); // no prediction
        let d = row(85, 60, None, None); // no prediction

        let s = BettingSummary::from_rows(&[a, b, c, d]);
        assert_eq!(s.beat_prediction, 1);
        assert_eq!(s.total_games, 4);
        assert_eq!(s.beat_prediction_rate(), 0.25);
    }

    #[test]
    fn trend_thresholds() {
        let mut mostly_over: Vec<GameRow> = (0..3).map(|_| row(1, 0, Some(100.0), Some(120.0))).collect();
        mostly_over.push(row(1, 0, Some(100.0), Some(90.0)));
        assert_eq!(BettingSummary::from_rows(&mostly_over).trend(), Some(BettingTrend::Over));

        let mostly_under: Vec<GameRow> = (0..4).map(|_| row(1, 0, Some(100.0), Some(90.0))).collect();
        assert_eq!(BettingSummary::from_rows(&mostly_under).trend(), Some(BettingTrend::Under));
    }

    #[test]
    fn no_closing_lines_means_no_trend() {
        assert_eq!(BettingSummary::from_rows(&[]).trend(), None);

        let rows: Vec<GameRow> = (0..5).map(|_| row(80, 70, None, Some(150.0))).collect();
        let s = BettingSummary::from_rows(&rows);
        assert_eq!(s.counted, 0);
        assert_eq!(s.total_games, 5);
        assert!(!s.has_lines());
        assert_eq!(s.trend(), None);
    }
}
