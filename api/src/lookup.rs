//! Team-vs-league scalar comparison for a single date.

pub const NO_VALUE: &str = "N/A";
pub const NO_DELTA: &str = "—";

/// A team value and the league value for the same (date, stat).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Comparison {
    pub team_value: Option<f64>,
    pub league_value: Option<f64>,
}

impl Comparison {
    /// `team - league`, only when both sides are present.
    pub fn delta(&self) -> Option<f64> {
        Some(self.team_value? - self.league_value?)
    }

    pub fn is_empty(&self) -> bool {
        self.team_value.is_none() && self.league_value.is_none()
    }

    /// True when the team beats the league average.
    pub fn is_favorable(&self) -> bool {
        self.delta().is_some_and(|d| d > 0.0)
    }
}

pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| NO_VALUE.to_owned(), |v| format!("{v:.3}"))
}

/// "+0.043", "-0.012", "0.000", or the neutral placeholder.
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        // Sign is decided at display precision: 0.0004 renders as "0.000".
        Some(d) if (d * 1000.0).round() > 0.0 => format!("+{d:.3}"),
        Some(d) if (d * 1000.0).round() == 0.0 => format!("{:.3}", 0.0),
        Some(d) => format!("{d:.3}"),
        None => NO_DELTA.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_needs_both_sides() {
        let both = Comparison { team_value: Some(0.385), league_value: Some(0.342) };
        assert!((both.delta().unwrap() - 0.043).abs() < 1e-9);
        assert!(both.is_favorable());

        let team_only = Comparison { team_value: Some(0.385), league_value: None };
        assert_eq!(team_only.delta(), None);
        assert!(!team_only.is_favorable());
        assert!(Comparison::default().is_empty());
    }

    #[test]
    fn delta_renders_signed_with_three_decimals() {
        let c = Comparison { team_value: Some(0.385), league_value: Some(0.342) };
        assert_eq!(format_delta(c.delta()), "+0.043");
        assert_eq!(format_delta(Some(-0.0126)), "-0.013");
        assert_eq!(format_delta(Some(0.0)), "0.000");
        assert_eq!(format_delta(Some(-0.0001)), "0.000");
        assert_eq!(format_delta(None), "—");
    }

    #[test]
    fn missing_values_render_as_placeholder_not_zero() {
        assert_eq!(format_value(None), "N/A");
        assert_eq!(format_value(Some(0.0)), "0.000");
        assert_eq!(format_value(Some(0.3421)), "0.342");
    }
}
