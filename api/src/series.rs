use crate::{DailyStatPoint, LeagueDailyAggregate, SeriesPoint, StatKey};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Merge a team series with the league series for the same (season, stat).
///
/// Output has one point per team row, in team order. A team date with no
/// league row on that exact date gets `league_value: None`; nothing is
/// interpolated. Pure: same inputs, same output.
pub fn merge_series(team: &[DailyStatPoint], league: &[LeagueDailyAggregate]) -> Vec<SeriesPoint> {
    let league_by_date: HashMap<NaiveDate, f64> = league.iter().map(|l| (l.date, l.value)).collect();

    team.iter()
        .map(|t| SeriesPoint {
            date: t.date,
            team_value: t.value,
            league_value: league_by_date.get(&t.date).copied(),
        })
        .collect()
}

/// Split the league line of a merged series into contiguous runs, as
/// `(x, y)` pairs indexed by position, so a chart can draw the gaps.
pub fn league_segments(points: &[SeriesPoint]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (i, p) in points.iter().enumerate() {
        match p.league_value {
            Some(v) => current.push((i as f64, v)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Latest value of a league series, the "current league average" card.
pub fn current_value(series: &[LeagueDailyAggregate]) -> Option<f64> {
    series.last().map(|l| l.value)
}

/// Min/max over every present value, padded for chart bounds.
pub fn value_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values.into_iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let pad = ((hi - lo) * 0.1).max(0.005);
    Some((lo - pad, hi + pad))
}

// ---------------------------------------------------------------------------
// Style profile: season averages on five shooting axes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileAxis {
    pub stat: StatKey,
    pub label: &'static str,
    /// Reference "elite" level on the 0–100 scale.
    pub full_mark: f64,
}

pub const PROFILE_AXES: [ProfileAxis; 5] = [
    ProfileAxis { stat: StatKey::ThreePointPct, label: "3P%", full_mark: 45.0 },
    ProfileAxis { stat: StatKey::TwoPointPct, label: "2P%", full_mark: 60.0 },
    ProfileAxis { stat: StatKey::FreeThrowPct, label: "FT%", full_mark: 85.0 },
    ProfileAxis { stat: StatKey::OppThreePointPct, label: "Opp 3P%", full_mark: 40.0 },
    ProfileAxis { stat: StatKey::OppTwoPointPct, label: "Opp 2P%", full_mark: 60.0 },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileValue {
    pub axis: ProfileAxis,
    pub team: f64,
    pub league: f64,
}

/// Average each axis over a season of `(stat, value)` rows, scaled to 0–100
/// and rounded to one decimal. An axis with no rows averages to 0.
pub fn season_profile(team_rows: &[(StatKey, f64)], league_rows: &[(StatKey, f64)]) -> Vec<ProfileValue> {
    PROFILE_AXES
        .iter()
        .map(|axis| ProfileValue {
            axis: *axis,
            team: scaled_average(team_rows, axis.stat),
            league: scaled_average(league_rows, axis.stat),
        })
        .collect()
}

fn scaled_average(rows: &[(StatKey, f64)], stat: StatKey) -> f64 {
    let (sum, count) = rows
        .iter()
        .filter(|(s, _)| *s == stat)
        .fold((0.0, 0usize), |(sum, n), (_, v)| (sum + v, n + 1));
    if count == 0 {
        return 0.0;
    }
    ((sum / count as f64) * 100.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, day).unwrap()
    }

    fn team(day: u32, value: f64) -> DailyStatPoint {
        DailyStatPoint { date: d(day), value }
    }

    fn league(day: u32, value: f64) -> LeagueDailyAggregate {
        LeagueDailyAggregate { date: d(day), value }
    }

    #[test]
    fn merge_keeps_team_length_and_marks_missing_league_dates() {
        let t = [team(4, 0.40), team(5, 0.38), team(7, 0.36)];
        let l = [league(4, 0.34), league(6, 0.33), league(7, 0.35)];
        let merged = merge_series(&t, &l);

        assert_eq!(merged.len(), t.len());
        assert_eq!(merged[0].league_value, Some(0.34));
        assert_eq!(merged[1].league_value, None, "no league row on 11/05, must not interpolate");
        assert_eq!(merged[2].league_value, Some(0.35));
        assert_eq!(merged.iter().map(|p| p.date).collect::<Vec<_>>(), vec![d(4), d(5), d(7)]);
    }

    #[test]
    fn merge_is_deterministic() {
        let t = [team(4, 0.40), team(5, 0.38)];
        let l = [league(5, 0.30), league(4, 0.31)];
        assert_eq!(merge_series(&t, &l), merge_series(&t, &l));
    }

    #[test]
    fn merge_with_no_league_rows_is_all_gaps() {
        let merged = merge_series(&[team(4, 0.4)], &[]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].league_value.is_none());
        assert!(merge_series(&[], &[league(4, 0.3)]).is_empty());
    }

    #[test]
    fn league_segments_break_on_gaps() {
        let merged = merge_series(
            &[team(1, 0.1), team(2, 0.1), team(3, 0.1), team(4, 0.1), team(5, 0.1)],
            &[league(1, 0.3), league(2, 0.31), league(4, 0.32), league(5, 0.33)],
        );
        let segments = league_segments(&merged);
        assert_eq!(segments, vec![vec![(0.0, 0.3), (1.0, 0.31)], vec![(3.0, 0.32), (4.0, 0.33)]]);
    }

    #[test]
    fn current_value_is_latest_point() {
        assert_eq!(current_value(&[league(1, 0.3), league(2, 0.31)]), Some(0.31));
        assert_eq!(current_value(&[]), None);
    }

    #[test]
    fn bounds_pad_and_reject_empty() {
        let (lo, hi) = value_bounds([0.30, 0.40]).unwrap();
        assert!(lo < 0.30 && hi > 0.40);
        assert!(value_bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn profile_averages_scale_and_default_to_zero() {
        let team_rows = [
            (StatKey::ThreePointPct, 0.36),
            (StatKey::ThreePointPct, 0.38),
            (StatKey::FreeThrowPct, 0.7512),
        ];
        let league_rows = [(StatKey::ThreePointPct, 0.34)];
        let profile = season_profile(&team_rows, &league_rows);

        assert_eq!(profile.len(), 5);
        assert_eq!(profile[0].axis.label, "3P%");
        assert_eq!(profile[0].team, 37.0);
        assert_eq!(profile[0].league, 34.0);
        assert_eq!(profile[1].team, 0.0, "no 2P% rows");
        assert_eq!(profile[2].team, 75.1);
    }
}
