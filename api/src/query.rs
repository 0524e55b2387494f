//! PostgREST query builder.
//!
//! Builds the query-string pairs for a read against `/rest/v1/{table}`:
//! column selection, equality and membership filters, `or` groups and
//! ordering. Values are passed through verbatim; reqwest percent-encodes them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
}

impl Query {
    pub fn table(name: &str) -> Self {
        Self { table: name.to_owned(), select: None, filters: Vec::new(), order: None }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_owned());
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_owned(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn in_list<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values.into_iter().map(|v| v.as_ref().to_owned()).collect::<Vec<_>>().join(",");
        self.filters.push((column.to_owned(), format!("in.({joined})")));
        self
    }

    /// Raw `or=(...)` group, e.g. `team1_id.eq.A,team2_id.eq.A`.
    pub fn or(mut self, group: &str) -> Self {
        self.filters.push(("or".to_owned(), format!("({group})")));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_owned(), direction));
        self
    }

    pub fn into_params(self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        params.push(("select".to_owned(), self.select.unwrap_or_else(|| "*".to_owned())));
        params.extend(self.filters);
        if let Some((column, direction)) = self.order {
            params.push(("order".to_owned(), format!("{column}.{}", direction.as_str())));
        }
        params
    }
}

/// `or` group matching games where `team` sits in either slot.
pub fn either_slot(team: &str) -> String {
    format!("team1_id.eq.{team},team2_id.eq.{team}")
}

/// `or` group matching games between `a` and `b` in either slot ordering.
pub fn between(a: &str, b: &str) -> String {
    format!("and(team1_id.eq.{a},team2_id.eq.{b}),and(team1_id.eq.{b},team2_id.eq.{a})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(q: Query) -> Vec<(String, String)> {
        q.into_params()
    }

    fn p(k: &str, v: &str) -> (String, String) {
        (k.to_owned(), v.to_owned())
    }

    #[test]
    fn defaults_to_select_star() {
        assert_eq!(pairs(Query::table("teams")), vec![p("select", "*")]);
    }

    #[test]
    fn builds_filters_in_call_order_with_order_last() {
        let q = Query::table("tr_team_daily_stats")
            .order("stat_date", Direction::Asc)
            .select("stat_date,stat_value")
            .eq("team_id", "KP076")
            .eq("season_year", 2025)
            .eq("stat_name", "three-point-pct");
        assert_eq!(
            pairs(q),
            vec![
                p("select", "stat_date,stat_value"),
                p("team_id", "eq.KP076"),
                p("season_year", "eq.2025"),
                p("stat_name", "eq.three-point-pct"),
                p("order", "stat_date.asc"),
            ]
        );
    }

    #[test]
    fn membership_and_or_groups() {
        let q = Query::table("games")
            .in_list("stat_name", ["a", "b"])
            .or(&between("KP076", "KP150"))
            .order("game_date", Direction::Desc);
        assert_eq!(
            pairs(q),
            vec![
                p("select", "*"),
                p("stat_name", "in.(a,b)"),
                p(
                    "or",
                    "(and(team1_id.eq.KP076,team2_id.eq.KP150),and(team1_id.eq.KP150,team2_id.eq.KP076))"
                ),
                p("order", "game_date.desc"),
            ]
        );
    }

    #[test]
    fn either_slot_group() {
        assert_eq!(either_slot("KP076"), "team1_id.eq.KP076,team2_id.eq.KP076");
    }
}
