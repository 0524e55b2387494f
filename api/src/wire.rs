/// Backend row shapes, as serde structs for the JSON arrays PostgREST returns.
/// These map to the clean domain types in `games`, `series` and `client`.
///
/// Numeric columns arrive as JSON numbers, numeric strings (Postgres
/// `numeric`), or null depending on the column type, so every number decodes
/// leniently: anything unusable becomes `None` instead of failing the whole
/// response.
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// teams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamRow {
    #[serde(deserialize_with = "lenient_string")]
    pub team_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team_name: String,
}

// ---------------------------------------------------------------------------
// tr_team_daily_stats / league_daily_trends
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamStatRow {
    #[serde(default)]
    pub stat_date: Option<String>,
    #[serde(default)]
    pub stat_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stat_value: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeagueTrendRow {
    #[serde(default)]
    pub stat_date: Option<String>,
    #[serde(default)]
    pub stat_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_value: Option<f64>,
}

// ---------------------------------------------------------------------------
// games
// ---------------------------------------------------------------------------

/// One game as stored: teams by slot, scores by outcome.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawGame {
    #[serde(deserialize_with = "lenient_string")]
    pub game_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team1_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team2_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub winner_id: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub winner_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub loser_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub home_team_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_neutral_site: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub season: Option<f64>,
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub open_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub game_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub kp_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub predicted_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub predicted_possessions: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub win_probability: Option<String>,
    // Period scores, keyed by team slot.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub team1_h1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub team1_h2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub team1_ot: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub team2_h1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub team2_h2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub team2_ot: Option<f64>,
}

// ---------------------------------------------------------------------------
// day_schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleRow {
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team1_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team2_id: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub predicted_winner: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub predicted_score: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub predicted_possessions: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub home_team_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub open_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_total: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub side_open: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub side_close: Option<f64>,
}

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value))
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_string(deserializer).map(Option::unwrap_or_default)
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "t" | "1" | "yes"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_columns_accept_numbers_strings_and_null() {
        let rows: Vec<TeamStatRow> = serde_json::from_str(
            r#"[
                {"stat_date": "2024-11-04", "stat_value": 0.385},
                {"stat_date": "2024-11-05", "stat_value": "0.41"},
                {"stat_date": "2024-11-06", "stat_value": null},
                {"stat_date": "2024-11-07", "stat_value": "abc"},
                {"stat_date": "2024-11-08"}
            ]"#,
        )
        .unwrap();
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.stat_value).collect();
        assert_eq!(values, vec![Some(0.385), Some(0.41), None, None, None]);
    }

    #[test]
    fn raw_game_decodes_integer_ids_and_flags() {
        let raw: RawGame = serde_json::from_str(
            r#"{
                "game_id": 9001, "team1_id": "KP076", "team2_id": "KP150",
                "winner_id": "KP076", "winner_score": 78, "loser_score": "70",
                "home_team_id": "KP076", "is_neutral_site": "false",
                "close_total": "141.5", "win_probability": "81%",
                "team1_h1": 40, "team1_h2": 38, "team2_h1": 31, "team2_h2": 39
            }"#,
        )
        .unwrap();
        assert_eq!(raw.game_id, "9001");
        assert_eq!(raw.loser_score, Some(70.0));
        assert!(!raw.is_neutral_site);
        assert_eq!(raw.close_total, Some(141.5));
        assert_eq!(raw.win_probability.as_deref(), Some("81%"));
        assert_eq!(raw.team1_ot, None);
    }

    #[test]
    fn neutral_flag_accepts_truthy_shapes() {
        for flag in ["true", "1", "\"t\"", "\"true\""] {
            let raw: RawGame =
                serde_json::from_str(&format!(r#"{{"game_id": "g", "is_neutral_site": {flag}}}"#)).unwrap();
            assert!(raw.is_neutral_site, "{flag} should be neutral");
        }
    }

    #[test]
    fn blank_strings_become_none() {
        let row: ScheduleRow =
            serde_json::from_str(r#"{"team1_id": "A", "team2_id": "B", "location": "  "}"#).unwrap();
        assert_eq!(row.location, None);
    }
}
