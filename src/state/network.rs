use crate::state::messages::{FetchResult, NetworkRequest, NetworkResponse};
use courtside_api::client::{ApiResult, StatsApi};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    requests: mpsc::Receiver<NetworkRequest>,
    handler: RequestHandler,
}

/// Shared by every in-flight request task.
#[derive(Clone)]
struct RequestHandler {
    client: StatsApi,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: StatsApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            requests,
            handler: RequestHandler {
                client,
                responses,
                in_flight: Arc::new(AtomicUsize::new(0)),
                is_loading: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    /// One task per request: a slow query never holds up a newer one.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let handler = self.handler.clone();
            tokio::spawn(async move { handler.handle(request).await });
        }
    }
}

impl RequestHandler {
    async fn handle(self, request: NetworkRequest) {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.start_loading_animation().await;
        }

        let response = self.dispatch(request).await;
        let is_ok = !is_failure(&response);

        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.stop_loading_animation(is_ok).await;
        }

        if let Err(e) = self.responses.send(response).await {
            error!("Failed to send network response: {e}");
        }
    }

    async fn dispatch(&self, request: NetworkRequest) -> NetworkResponse {
        match request {
            NetworkRequest::LoadRoster => {
                debug!("loading team roster");
                let result = settle(self.client.fetch_roster().await);
                NetworkResponse::RosterLoaded { result }
            }
            NetworkRequest::Lookup { ticket } => {
                let p = &ticket.params;
                debug!("lookup {} {} {}", p.team_id, p.date, p.stat.external_key());
                let result = settle(self.client.fetch_comparison(&p.team_id, p.date, p.stat).await);
                NetworkResponse::LookupLoaded { ticket, result }
            }
            NetworkRequest::LeagueSeries { ticket } => {
                let p = &ticket.params;
                debug!("league series {} {}", p.season, p.stat.external_key());
                let result = settle(self.client.fetch_league_series(p.season, p.stat).await);
                NetworkResponse::LeagueSeriesLoaded { ticket, result }
            }
            NetworkRequest::TeamSeries { ticket } => {
                let p = &ticket.params;
                debug!("team series {} {} {}", p.team_id, p.season, p.stat.external_key());
                let result = settle(self.client.fetch_series(&p.team_id, p.season, p.stat).await);
                NetworkResponse::TeamSeriesLoaded { ticket, result }
            }
            NetworkRequest::StyleProfile { ticket } => {
                let p = &ticket.params;
                debug!("style profile {} {}", p.team_id, p.season);
                let result = settle(self.client.fetch_style_profile(&p.team_id, p.season).await);
                NetworkResponse::StyleProfileLoaded { ticket, result }
            }
            NetworkRequest::GameLog { ticket, roster } => {
                debug!("game log {:?}", ticket.params);
                let result = settle(self.client.fetch_game_log(&ticket.params, &roster).await);
                NetworkResponse::GameLogLoaded { ticket, result }
            }
            NetworkRequest::Schedule { ticket, roster } => {
                debug!("schedule for {}", ticket.params.date);
                let result = settle(self.client.fetch_schedule(ticket.params.date, &roster).await);
                NetworkResponse::ScheduleLoaded { ticket, result }
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        // A request that started during the pause owns the spinner now.
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            return;
        }

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Widget-bound failures travel as text and render inline.
fn settle<T>(result: ApiResult<T>) -> FetchResult<T> {
    result.map_err(|e| {
        warn!("{e}");
        e.to_string()
    })
}

fn is_failure(response: &NetworkResponse) -> bool {
    match response {
        NetworkResponse::RosterLoaded { result } => result.is_err(),
        NetworkResponse::LookupLoaded { result, .. } => result.is_err(),
        NetworkResponse::LeagueSeriesLoaded { result, .. } => result.is_err(),
        NetworkResponse::TeamSeriesLoaded { result, .. } => result.is_err(),
        NetworkResponse::StyleProfileLoaded { result, .. } => result.is_err(),
        NetworkResponse::GameLogLoaded { result, .. } => result.is_err(),
        NetworkResponse::ScheduleLoaded { result, .. } => result.is_err(),
        NetworkResponse::LoadingStateChanged { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_api::client::ApiConfig;

    fn handler(in_flight: usize) -> (RequestHandler, mpsc::Receiver<NetworkResponse>) {
        let (responses, rx) = mpsc::channel(8);
        let handler = RequestHandler {
            client: StatsApi::new(ApiConfig::new("http://localhost:1", "key")),
            responses,
            in_flight: Arc::new(AtomicUsize::new(in_flight)),
            is_loading: Arc::new(AtomicBool::new(true)),
        };
        (handler, rx)
    }

    #[tokio::test]
    async fn last_request_out_clears_the_spinner() {
        let (handler, mut rx) = handler(0);
        handler.stop_loading_animation(false).await;

        let Ok(NetworkResponse::LoadingStateChanged { loading_state }) = rx.try_recv() else {
            panic!("expected a loading state change");
        };
        assert!(!loading_state.is_loading);
        assert_eq!(loading_state.spinner_char, ERROR_CHAR);
        assert!(!handler.is_loading.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn request_started_during_the_pause_keeps_the_spinner() {
        let (handler, mut rx) = handler(0);
        let in_flight = handler.in_flight.clone();
        let stopping = tokio::spawn(async move { handler.stop_loading_animation(true).await });

        in_flight.fetch_add(1, Ordering::SeqCst);
        stopping.await.unwrap();

        assert!(rx.try_recv().is_err());
    }
}
