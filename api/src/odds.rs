use crate::{OddsLine, ScheduleEntry};

/// Books offered by the schedule's sportsbook selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sportsbook {
    #[default]
    DraftKings,
    FanDuel,
    BetMgm,
    Caesars,
    EspnBet,
    BetRivers,
    Bovada,
}

impl Sportsbook {
    pub const ALL: [Sportsbook; 7] = [
        Sportsbook::DraftKings,
        Sportsbook::FanDuel,
        Sportsbook::BetMgm,
        Sportsbook::Caesars,
        Sportsbook::EspnBet,
        Sportsbook::BetRivers,
        Sportsbook::Bovada,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sportsbook::DraftKings => "DraftKings",
            Sportsbook::FanDuel => "FanDuel",
            Sportsbook::BetMgm => "BetMGM",
            Sportsbook::Caesars => "Caesars",
            Sportsbook::EspnBet => "ESPN BET",
            Sportsbook::BetRivers => "BetRivers",
            Sportsbook::Bovada => "Bovada",
        }
    }

    /// Case-insensitive match on the label, ignoring spaces.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted: String = raw.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        Self::ALL.into_iter().find(|b| b.label().replace(' ', "").to_lowercase() == wanted)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Where per-book lines come from. The schedule table only carries columns
/// for one book; other sources plug in here without touching the views.
pub trait OddsSource: Send + Sync {
    fn lines(&self, entry: &ScheduleEntry, book: Sportsbook) -> Option<OddsLine>;
}

/// The book whose columns `day_schedule` carries. Every other book has no
/// data yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookOfRecord {
    pub book: Sportsbook,
}

impl BookOfRecord {
    pub fn new(book: Sportsbook) -> Self {
        Self { book }
    }
}

impl OddsSource for BookOfRecord {
    fn lines(&self, entry: &ScheduleEntry, book: Sportsbook) -> Option<OddsLine> {
        (book == self.book).then_some(entry.book_of_record)
    }
}

/// "-3.5", "+2.0", "PK", or "-" when absent.
pub fn format_side(side: Option<f64>) -> String {
    match side {
        Some(s) if s == 0.0 => "PK".to_owned(),
        Some(s) if s > 0.0 => format!("+{s:.1}"),
        Some(s) => format!("{s:.1}"),
        None => "-".to_owned(),
    }
}

pub fn format_total(total: Option<f64>) -> String {
    total.map_or_else(|| "-".to_owned(), |t| format!("{t:.1}"))
}
