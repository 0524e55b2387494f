use crate::Team;
use std::collections::HashMap;

pub const UNKNOWN_TEAM: &str = "Unknown";

/// The full team list, loaded once per session.
///
/// Free-text input resolves by exact, case-sensitive name. A miss is not an
/// error: callers keep their previous selection and fire nothing until the
/// text matches a team.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: Vec<Team>,
    by_id: HashMap<String, usize>,
}

impl Roster {
    pub fn new(mut teams: Vec<Team>) -> Self {
        teams.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let by_id = teams.iter().enumerate().map(|(i, t)| (t.id.clone(), i)).collect();
        Self { teams, by_id }
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Teams ordered by name.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn resolve(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn get(&self, id: &str) -> Option<&Team> {
        self.by_id.get(id).and_then(|&i| self.teams.get(i))
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|t| t.name.as_str())
    }

    pub fn name_or_unknown(&self, id: &str) -> String {
        self.name_of(id).unwrap_or(UNKNOWN_TEAM).to_owned()
    }

    /// Up to `limit` names starting with `prefix`, for the search hint line.
    /// Case-insensitive since it only guides typing; resolution stays exact.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let needle = prefix.to_lowercase();
        self.teams
            .iter()
            .filter(|t| t.name.to_lowercase().starts_with(&needle))
            .take(limit)
            .map(|t| t.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, name: &str) -> Team {
        Team { id: id.into(), name: name.into() }
    }

    fn roster() -> Roster {
        Roster::new(vec![
            team("KP150", "North Carolina"),
            team("KP076", "Duke"),
            team("KP001", "Abilene Christian"),
            team("KP077", "Duquesne"),
        ])
    }

    #[test]
    fn teams_are_sorted_by_name() {
        let r = roster();
        let names: Vec<&str> = r.teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Abilene Christian", "Duke", "Duquesne", "North Carolina"]);
    }

    #[test]
    fn resolve_is_exact_and_case_sensitive() {
        let r = roster();
        assert_eq!(r.resolve("Duke").map(|t| t.id.as_str()), Some("KP076"));
        assert!(r.resolve("duke").is_none());
        assert!(r.resolve("Duk").is_none());
        assert!(r.resolve("Duke ").is_none());
    }

    #[test]
    fn id_lookup_falls_back_to_unknown() {
        let r = roster();
        assert_eq!(r.name_of("KP150"), Some("North Carolina"));
        assert_eq!(r.name_or_unknown("KP999"), "Unknown");
    }

    #[test]
    fn suggestions_are_prefix_hints() {
        let r = roster();
        assert_eq!(r.suggestions("du", 5), vec!["Duke", "Duquesne"]);
        assert_eq!(r.suggestions("du", 1), vec!["Duke"]);
        assert!(r.suggestions("", 5).is_empty());
    }

    #[test]
    fn empty_roster_resolves_nothing() {
        let r = Roster::default();
        assert!(r.is_empty());
        assert!(r.resolve("Duke").is_none());
    }
}
