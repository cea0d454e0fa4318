//! API Client
//!
//! The data boundary used by every view. `SchoolBusApi` describes the
//! operations a backend must offer; `MockApiClient` answers them from the
//! in-memory dataset after a simulated network delay. The mock never fails
//! on its own, but every call is bounded by the request timeout, and the
//! error type already carries the failure kinds a real backend needs.

use crate::client_span;
use crate::models::{
    Child, RouteEvent, RouteHistory, RouteLocations, Schedule, ServiceException, StatusFilterOption,
};
use crate::services::history_filter::{filter_history, HistoryQuery};
use crate::store::MockDataStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn, Instrument};

/// Default upper bound for a single call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client operations, used for latency lookup and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    GetChildren,
    GetChildById,
    GetRouteEvents,
    GetRouteHistory,
    GetRouteHistoryByChild,
    QueryRouteHistory,
    GetSchedules,
    GetExceptions,
    GetRouteLocations,
    GetStatusFilters,
}

impl Operation {
    /// Delay the mock waits before answering
    pub fn default_latency(&self) -> Duration {
        let millis = match self {
            Operation::GetChildren | Operation::GetChildById => 300,
            Operation::GetRouteEvents => 350,
            Operation::GetRouteHistory => 400,
            Operation::GetRouteHistoryByChild
            | Operation::QueryRouteHistory
            | Operation::GetSchedules
            | Operation::GetExceptions => 350,
            Operation::GetRouteLocations => 250,
            // Static UI configuration, answered immediately
            Operation::GetStatusFilters => 0,
        };
        Duration::from_millis(millis)
    }
}

/// How long the mock pretends the network takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulatedLatency {
    /// Per-operation delays of the reference front-end
    #[default]
    PerOperation,
    /// Same delay for every call
    Fixed(Duration),
}

impl SimulatedLatency {
    pub fn none() -> Self {
        SimulatedLatency::Fixed(Duration::ZERO)
    }

    pub fn for_operation(&self, operation: Operation) -> Duration {
        match self {
            SimulatedLatency::PerOperation => operation.default_latency(),
            SimulatedLatency::Fixed(delay) => *delay,
        }
    }
}

/// Client errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("{operation} timed out after {timeout_ms} ms")]
    Timeout { operation: Operation, timeout_ms: u64 },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Operations offered by a school bus data backend
pub trait SchoolBusApi: Send + Sync {
    fn get_children(&self) -> impl Future<Output = ClientResult<Vec<Child>>> + Send;

    /// `None` when no child has that id
    fn get_child_by_id(&self, id: &str) -> impl Future<Output = ClientResult<Option<Child>>> + Send;

    /// Empty when the child has no live events
    fn get_route_events(&self, child_id: &str) -> impl Future<Output = ClientResult<Vec<RouteEvent>>> + Send;

    fn get_route_history(&self) -> impl Future<Output = ClientResult<Vec<RouteHistory>>> + Send;

    fn get_route_history_by_child(
        &self,
        child_id: &str,
    ) -> impl Future<Output = ClientResult<Vec<RouteHistory>>> + Send;

    fn query_route_history(
        &self,
        query: &HistoryQuery,
    ) -> impl Future<Output = ClientResult<Vec<RouteHistory>>> + Send;

    fn get_schedules(&self) -> impl Future<Output = ClientResult<Vec<Schedule>>> + Send;

    fn get_exceptions(&self) -> impl Future<Output = ClientResult<Vec<ServiceException>>> + Send;

    fn get_route_locations(
        &self,
        child_id: &str,
    ) -> impl Future<Output = ClientResult<Option<RouteLocations>>> + Send;

    fn get_status_filters(&self) -> impl Future<Output = ClientResult<Vec<StatusFilterOption>>> + Send;

    /// Like `get_child_by_id`, but a missing child is an error
    fn require_child(&self, id: &str) -> impl Future<Output = ClientResult<Child>> + Send {
        async move {
            self.get_child_by_id(id).await?.ok_or_else(|| ClientError::NotFound {
                resource: "child",
                id: id.to_string(),
            })
        }
    }
}

/// Client answering from the mock dataset
#[derive(Debug, Clone)]
pub struct MockApiClient {
    store: Arc<MockDataStore>,
    latency: SimulatedLatency,
    timeout: Duration,
}

impl MockApiClient {
    pub fn new(store: Arc<MockDataStore>) -> Self {
        Self {
            store,
            latency: SimulatedLatency::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &MockDataStore {
        &self.store
    }

    /// Wait out the simulated latency, then hand back `value`
    async fn respond<T: Send>(&self, operation: Operation, value: T) -> ClientResult<T> {
        let delay = self.latency.for_operation(operation);
        let timeout = self.timeout;

        async move {
            if !delay.is_zero() && tokio::time::timeout(timeout, tokio::time::sleep(delay)).await.is_err() {
                warn!(timeout_ms = timeout.as_millis() as u64, "Client call timed out");
                return Err(ClientError::Timeout {
                    operation,
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            debug!(delay_ms = delay.as_millis() as u64, "Client call answered");
            Ok(value)
        }
        .instrument(client_span!(operation))
        .await
    }
}

impl SchoolBusApi for MockApiClient {
    async fn get_children(&self) -> ClientResult<Vec<Child>> {
        let children = self.store.children().to_vec();
        self.respond(Operation::GetChildren, children).await
    }

    async fn get_child_by_id(&self, id: &str) -> ClientResult<Option<Child>> {
        let child = self.store.child(id).cloned();
        self.respond(Operation::GetChildById, child).await
    }

    async fn get_route_events(&self, child_id: &str) -> ClientResult<Vec<RouteEvent>> {
        let events = self.store.route_events(child_id).to_vec();
        self.respond(Operation::GetRouteEvents, events).await
    }

    async fn get_route_history(&self) -> ClientResult<Vec<RouteHistory>> {
        let history = self.store.route_history().to_vec();
        self.respond(Operation::GetRouteHistory, history).await
    }

    async fn get_route_history_by_child(&self, child_id: &str) -> ClientResult<Vec<RouteHistory>> {
        let query = HistoryQuery::for_child(child_id);
        let history = filter_history(self.store.route_history(), &query)
            .into_iter()
            .cloned()
            .collect();
        self.respond(Operation::GetRouteHistoryByChild, history).await
    }

    async fn query_route_history(&self, query: &HistoryQuery) -> ClientResult<Vec<RouteHistory>> {
        let history = filter_history(self.store.route_history(), query)
            .into_iter()
            .cloned()
            .collect();
        self.respond(Operation::QueryRouteHistory, history).await
    }

    async fn get_schedules(&self) -> ClientResult<Vec<Schedule>> {
        let schedules = self.store.schedules().to_vec();
        self.respond(Operation::GetSchedules, schedules).await
    }

    async fn get_exceptions(&self) -> ClientResult<Vec<ServiceException>> {
        let exceptions = self.store.exceptions().to_vec();
        self.respond(Operation::GetExceptions, exceptions).await
    }

    async fn get_route_locations(&self, child_id: &str) -> ClientResult<Option<RouteLocations>> {
        let locations = self.store.route_locations(child_id).cloned();
        self.respond(Operation::GetRouteLocations, locations).await
    }

    async fn get_status_filters(&self) -> ClientResult<Vec<StatusFilterOption>> {
        let filters = self.store.status_filters().to_vec();
        self.respond(Operation::GetStatusFilters, filters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChildFilter, StatusFilter, TripStatus};
    use strum::IntoEnumIterator;
    use tokio::time::Instant;

    fn client() -> MockApiClient {
        let store = Arc::new(MockDataStore::sample().unwrap());
        MockApiClient::new(store).with_latency(SimulatedLatency::none())
    }

    #[tokio::test]
    async fn test_get_children() {
        let children = client().get_children().await.unwrap();
        let ids: Vec<_> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["alfonso", "luis"]);
    }

    #[tokio::test]
    async fn test_get_child_by_id() {
        let client = client();
        let luis = client.get_child_by_id("luis").await.unwrap().unwrap();
        assert_eq!(luis.short_name(), "Luis Lopez");
        assert!(client.get_child_by_id("maria").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_require_child_reports_not_found() {
        let err = client().require_child("maria").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::NotFound {
                resource: "child",
                id: "maria".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_route_events_default_to_empty() {
        let client = client();
        assert_eq!(client.get_route_events("luis").await.unwrap().len(), 5);
        assert!(client.get_route_events("maria").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_by_child() {
        let history = client().get_route_history_by_child("alfonso").await.unwrap();
        let ids: Vec<_> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["2", "4", "6"]);
    }

    #[tokio::test]
    async fn test_query_luis_completed_trips() {
        let query = HistoryQuery::new(
            ChildFilter::Child("luis".to_string()),
            StatusFilter::Status(TripStatus::Completed),
        );
        let history = client().query_route_history(&query).await.unwrap();

        let ids: Vec<_> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn test_query_all_is_unfiltered() {
        let client = client();
        let all = client.query_route_history(&HistoryQuery::default()).await.unwrap();
        assert_eq!(all, client.get_route_history().await.unwrap());
    }

    #[tokio::test]
    async fn test_route_locations() {
        let client = client();
        assert!(client.get_route_locations("luis").await.unwrap().is_some());
        assert!(client.get_route_locations("maria").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_operation_latency_is_applied() {
        let store = Arc::new(MockDataStore::sample().unwrap());
        let client = MockApiClient::new(store);

        let started = Instant::now();
        client.get_route_history().await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(400) && elapsed < Duration::from_millis(450));

        let started = Instant::now();
        client.get_route_locations("luis").await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(250) && elapsed < Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let store = Arc::new(MockDataStore::sample().unwrap());
        let client = MockApiClient::new(store)
            .with_latency(SimulatedLatency::Fixed(Duration::from_secs(5)))
            .with_timeout(Duration::from_secs(1));

        let err = client.get_schedules().await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Timeout {
                operation: Operation::GetSchedules,
                timeout_ms: 1000
            }
        );
    }

    #[test]
    fn test_only_static_config_is_instant() {
        let instant: Vec<_> = Operation::iter()
            .filter(|op| op.default_latency().is_zero())
            .collect();
        assert_eq!(instant, [Operation::GetStatusFilters]);
    }
}
