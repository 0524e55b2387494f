use chrono::NaiveDate;
use courtside_api::odds::Sportsbook;
use courtside_api::params::AVAILABLE_SEASONS;
use log::LevelFilter;

pub const DEFAULT_TEAM_ID: &str = "KP076";
pub const DEFAULT_SEASON: u16 = 2025;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Focus team for the Team, Lookup and Regression tabs.
    pub team_id: String,
    pub season: u16,
    /// `COURTSIDE_DATE`; when unset Lookup opens on 2024-11-04 and Schedule
    /// on today.
    pub date: Option<NaiveDate>,
    pub book: Sportsbook,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            team_id: DEFAULT_TEAM_ID.to_owned(),
            season: DEFAULT_SEASON,
            date: None,
            book: Sportsbook::default(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values keep their defaults.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let var = |key: &str| var(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        if let Some(team) = var("COURTSIDE_TEAM") {
            settings.team_id = team;
        }
        if let Some(season) = var("COURTSIDE_SEASON")
            .and_then(|s| s.parse::<u16>().ok())
            .filter(|s| AVAILABLE_SEASONS.contains(s))
        {
            settings.season = season;
        }
        settings.date = var("COURTSIDE_DATE").and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());
        if let Some(book) = var("COURTSIDE_BOOK").and_then(|b| Sportsbook::parse(&b)) {
            settings.book = book;
        }
        settings.log_level = var("COURTSIDE_LOG").and_then(|l| l.parse::<LevelFilter>().ok());
        settings
    }

    pub fn lookup_date(&self) -> NaiveDate {
        self.date
            .or_else(|| NaiveDate::from_ymd_opt(2024, 11, 4))
            .unwrap_or_default()
    }

    pub fn schedule_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.team_id, "KP076");
        assert_eq!(s.season, 2025);
        assert_eq!(s.book, Sportsbook::DraftKings);
        assert_eq!(s.log_level, None);
        assert_eq!(s.lookup_date(), NaiveDate::from_ymd_opt(2024, 11, 4).unwrap());
    }

    #[test]
    fn environment_overrides() {
        let s = settings(&[
            ("COURTSIDE_TEAM", "KP150"),
            ("COURTSIDE_SEASON", "2023"),
            ("COURTSIDE_DATE", "2025-01-15"),
            ("COURTSIDE_BOOK", "fanduel"),
            ("COURTSIDE_LOG", "debug"),
        ]);
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(s.team_id, "KP150");
        assert_eq!(s.season, 2023);
        assert_eq!(s.lookup_date(), date);
        assert_eq!(s.schedule_date(), date);
        assert_eq!(s.book, Sportsbook::FanDuel);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn invalid_values_fall_back() {
        let s = settings(&[
            ("COURTSIDE_TEAM", "   "),
            ("COURTSIDE_SEASON", "1999"),
            ("COURTSIDE_DATE", "yesterday"),
            ("COURTSIDE_BOOK", "pinnacle"),
            ("COURTSIDE_LOG", "loud"),
        ]);
        assert_eq!(s.team_id, "KP076");
        assert_eq!(s.season, 2025);
        assert_eq!(s.date, None);
        assert_eq!(s.book, Sportsbook::DraftKings);
        assert_eq!(s.log_level, None);
    }
}
