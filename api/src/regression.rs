//! Regression panel setup. Collects a team, feature set and target; running a
//! model is not wired to any service yet, so `describe` only echoes the setup.

use crate::StatKey;
use std::fmt;

/// A regression input or output: one of the daily stats, or a season-level
/// team rating that has no daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegressionVar {
    Stat(StatKey),
    OffEff,
    DefEff,
    KpTotal,
}

impl RegressionVar {
    /// Pivoted column name. Daily stats go through `StatKey::internal_key`.
    pub fn key(&self) -> &'static str {
        match self {
            RegressionVar::Stat(stat) => stat.internal_key(),
            RegressionVar::OffEff => "off_eff",
            RegressionVar::DefEff => "def_eff",
            RegressionVar::KpTotal => "kp_total",
        }
    }
}

impl fmt::Display for RegressionVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub const FEATURES: [RegressionVar; 6] = [
    RegressionVar::Stat(StatKey::ThreePointPct),
    RegressionVar::Stat(StatKey::TwoPointPct),
    RegressionVar::Stat(StatKey::FreeThrowPct),
    RegressionVar::OffEff,
    RegressionVar::DefEff,
    RegressionVar::KpTotal,
];

pub const TARGETS: [RegressionVar; 4] = [
    RegressionVar::OffEff,
    RegressionVar::DefEff,
    RegressionVar::KpTotal,
    RegressionVar::Stat(StatKey::ThreePointPct),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionSetup {
    pub team: String,
    pub features: Vec<RegressionVar>,
    pub target: RegressionVar,
}

impl Default for RegressionSetup {
    fn default() -> Self {
        Self {
            team: String::new(),
            features: vec![FEATURES[0], FEATURES[1]],
            target: RegressionVar::OffEff,
        }
    }
}

impl RegressionSetup {
    pub fn is_selected(&self, feature: RegressionVar) -> bool {
        self.features.contains(&feature)
    }

    /// Add or remove a feature. Selection keeps `FEATURES` order; anything
    /// outside the catalog is ignored.
    pub fn toggle_feature(&mut self, feature: RegressionVar) {
        if !FEATURES.contains(&feature) {
            return;
        }
        if self.is_selected(feature) {
            self.features.retain(|f| *f != feature);
        } else {
            self.features.push(feature);
            self.features.sort_by_key(|f| FEATURES.iter().position(|k| k == f));
        }
    }

    pub fn cycle_target(&mut self) {
        let i = TARGETS.iter().position(|t| *t == self.target).unwrap_or(0);
        self.target = TARGETS[(i + 1) % TARGETS.len()];
    }

    pub fn describe(&self) -> String {
        let team = if self.team.trim().is_empty() { "ALL" } else { self.team.trim() };
        let features: Vec<&str> = self.features.iter().map(|f| f.key()).collect();
        format!(
            "Regression not wired yet: team \"{team}\" with features [{}] → target \"{}\".",
            features.join(", "),
            self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(vars: &[RegressionVar]) -> Vec<&'static str> {
        vars.iter().map(|v| v.key()).collect()
    }

    #[test]
    fn stat_features_share_the_pivot_keys() {
        assert_eq!(keys(&FEATURES), vec!["three_p_pct", "two_p_pct", "ft_pct", "off_eff", "def_eff", "kp_total"]);
        for feature in FEATURES {
            if let RegressionVar::Stat(stat) = feature {
                assert_eq!(feature.key(), stat.internal_key());
            }
        }
    }

    #[test]
    fn toggling_adds_and_removes_in_catalog_order() {
        let mut setup = RegressionSetup::default();
        setup.toggle_feature(RegressionVar::OffEff);
        setup.toggle_feature(RegressionVar::Stat(StatKey::FreeThrowPct));
        assert_eq!(keys(&setup.features), vec!["three_p_pct", "two_p_pct", "ft_pct", "off_eff"]);
        setup.toggle_feature(RegressionVar::Stat(StatKey::TwoPointPct));
        assert_eq!(keys(&setup.features), vec!["three_p_pct", "ft_pct", "off_eff"]);
        setup.toggle_feature(RegressionVar::Stat(StatKey::OppThreePointRate));
        assert_eq!(setup.features.len(), 3);
    }

    #[test]
    fn target_cycles() {
        let mut setup = RegressionSetup::default();
        let seen: Vec<&str> = (0..4)
            .map(|_| {
                setup.cycle_target();
                setup.target.key()
            })
            .collect();
        assert_eq!(seen, vec!["def_eff", "kp_total", "three_p_pct", "off_eff"]);
    }

    #[test]
    fn describe_defaults_team_to_all() {
        let setup = RegressionSetup::default();
        assert_eq!(
            setup.describe(),
            "Regression not wired yet: team \"ALL\" with features [three_p_pct, two_p_pct] → target \"off_eff\"."
        );
    }
}
