//! Scenario state and runtime/server initialisation for the repository data
//! BDD tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use repolens::{
    ClientConfig, OctocrabRepositoryDataGateway, RepoDataBundle, RepoDataError,
    RepositoryAggregator,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Path prefix of the repository under test on the mock server.
pub(crate) const REPO_PATH: &str = "/api/v3/repos/octocat/Hello-World";

/// Client timeout; mocks that should time out delay well beyond it.
const CLIENT_TIMEOUT: Duration = Duration::from_millis(500);

/// Shared runtime wrapper that can be stored in rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct AggregationState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) bundle: Slot<RepoDataBundle>,
    pub(crate) error: Slot<RepoDataError>,
}

impl AggregationState {
    /// Mounts a mock on the scenario's server.
    pub(crate) fn mount(&self, mock: Mock) {
        let runtime = ensure_runtime_and_server(self);
        self.server
            .with_ref(|server| runtime.block_on(mock.mount(server)))
            .unwrap_or_else(|| panic!("mock server not initialised"));
    }

    /// Number of requests the mock server has seen so far.
    pub(crate) fn received_request_count(&self) -> usize {
        let runtime = ensure_runtime_and_server(self);
        self.server
            .with_ref(|server| runtime.block_on(server.received_requests()))
            .flatten()
            .map_or(0, |requests| requests.len())
    }
}

/// Ensures the runtime and server are initialised in `AggregationState`.
pub(crate) fn ensure_runtime_and_server(state: &AggregationState) -> SharedRuntime {
    if state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if state.server.with_ref(|_| ()).is_none() {
        state.server.set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Runs one aggregation against the scenario's mock server.
pub(crate) fn run_load(
    state: &AggregationState,
    owner: &str,
    repo: &str,
) -> Result<RepoDataBundle, RepoDataError> {
    let runtime = ensure_runtime_and_server(state);
    let server_url = state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| RepoDataError::Unknown("mock server URL missing".to_owned()))?;

    runtime.block_on(async {
        let config = ClientConfig::parse(&format!("{server_url}/api/v3"))?
            .with_timeout(Some(CLIENT_TIMEOUT));
        let gateway = OctocrabRepositoryDataGateway::from_config(&config)?;
        RepositoryAggregator::new(&gateway).load(owner, repo).await
    })
}
