use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use airmon_core::connector::MonitorConnector;
use airmon_core::{AirmonError, Provider, RawResources, Timespan};

/// Instruction for how a fetch should behave for a given provider.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(AirmonError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    fetch_rules: HashMap<Provider, MockBehavior<RawResources>>,
    fetch_log: Vec<(Provider, Timespan)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `fetch` calls for a specific provider.
    pub async fn set_fetch_behavior(
        &self,
        provider: Provider,
        behavior: MockBehavior<RawResources>,
    ) {
        let mut guard = self.state.lock().await;
        guard.fetch_rules.insert(provider, behavior);
    }

    /// Every `(provider, timespan)` fetched so far, in call order.
    pub async fn fetch_log(&self) -> Vec<(Provider, Timespan)> {
        let guard = self.state.lock().await;
        guard.fetch_log.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.fetch_rules.clear();
        guard.fetch_log.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    providers: Vec<Provider>,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector serving every provider, and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn MonitorConnector>, DynamicMockController) {
        Self::new_for_providers(name, &Provider::ALL)
    }

    /// Like [`new_with_controller`](Self::new_with_controller), but only
    /// claiming support for `providers`.
    #[must_use]
    pub fn new_for_providers(
        name: &'static str,
        providers: &[Provider],
    ) -> (Arc<dyn MonitorConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            providers: providers.to_vec(),
            state,
        });
        (me as Arc<dyn MonitorConnector>, controller)
    }
}

#[async_trait]
impl MonitorConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn supports_provider(&self, provider: Provider) -> bool {
        self.providers.contains(&provider)
    }

    async fn fetch(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<RawResources, AirmonError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.fetch_log.push((provider, timespan));
            guard.fetch_rules.get(&provider).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(raw)) => Ok(raw),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(AirmonError::unsupported("fetch")),
        }
    }
}
