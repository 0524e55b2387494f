use courtside_api::lookup::Comparison;
use std::marker::PhantomData;

/// Lifecycle of one widget's data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Empty,
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Success(v) => Some(v),
            _ => None,
        }
    }
}

/// Results that may legitimately come back with nothing in them.
pub trait Payload {
    fn is_empty_payload(&self) -> bool;
}

impl<T> Payload for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Payload for Comparison {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

/// Issued by `Tracked::begin` and carried through the network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<P> {
    pub generation: u64,
    pub params: P,
}

/// Data for one widget, keyed to the request that produced it.
///
/// Every `begin` bumps the generation; a result is only applied when its
/// ticket carries the current generation, so a slow response for an old
/// selection can never overwrite a newer one.
#[derive(Debug, Clone)]
pub struct Tracked<P, T> {
    generation: u64,
    state: FetchState<T>,
    _params: PhantomData<P>,
}

impl<P, T> Default for Tracked<P, T> {
    fn default() -> Self {
        Self { generation: 0, state: FetchState::Idle, _params: PhantomData }
    }
}

impl<P, T: Payload> Tracked<P, T> {
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start a fetch for `params`, discarding whatever was shown before.
    pub fn begin(&mut self, params: P) -> Ticket<P> {
        self.generation += 1;
        self.state = FetchState::Loading;
        Ticket { generation: self.generation, params }
    }

    /// Apply a result. Returns false when the ticket is stale and the result
    /// was dropped.
    pub fn commit(&mut self, ticket: &Ticket<P>, result: Result<T, String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.state = match result {
            Ok(v) if v.is_empty_payload() => FetchState::Empty,
            Ok(v) => FetchState::Success(v),
            Err(message) => FetchState::Error(message),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Series = Tracked<&'static str, Vec<u32>>;

    #[test]
    fn begin_moves_to_loading_and_clears_previous_data() {
        let mut t = Series::default();
        let ticket = t.begin("a");
        assert!(t.commit(&ticket, Ok(vec![1, 2])));
        assert_eq!(t.state().value(), Some(&vec![1, 2]));

        let ticket = t.begin("b");
        assert!(t.state().is_loading());
        assert_eq!(ticket.params, "b");
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut t = Series::default();
        let first = t.begin("a");
        let second = t.begin("b");

        assert!(t.commit(&second, Ok(vec![2])));
        assert!(!t.commit(&first, Ok(vec![1])));
        assert_eq!(t.state(), &FetchState::Success(vec![2]));
    }

    #[test]
    fn late_response_after_newer_request_does_not_overwrite_loading() {
        let mut t = Series::default();
        let first = t.begin("a");
        t.begin("b");
        assert!(!t.commit(&first, Ok(vec![1])));
        assert!(t.state().is_loading());
    }

    #[test]
    fn empty_and_error_results() {
        let mut t = Series::default();
        let ticket = t.begin("a");
        t.commit(&ticket, Ok(vec![]));
        assert_eq!(t.state(), &FetchState::Empty);

        let ticket = t.begin("a");
        t.commit(&ticket, Err("boom".into()));
        assert_eq!(t.state(), &FetchState::Error("boom".into()));
    }

    #[test]
    fn empty_comparison_is_empty() {
        let mut t: Tracked<u8, Comparison> = Tracked::default();
        let ticket = t.begin(1);
        t.commit(&ticket, Ok(Comparison::default()));
        assert_eq!(t.state(), &FetchState::Empty);

        let ticket = t.begin(2);
        t.commit(&ticket, Ok(Comparison { team_value: Some(0.4), league_value: None }));
        assert!(t.state().value().is_some());
    }
}
