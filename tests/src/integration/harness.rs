//! In-memory implementations of the verifier's outbound ports.
//!
//! These stand in for the pieces a real host engine provides: the
//! connection registry, the shared work-item session, the persistent
//! result store, and the message transport. Everything records what went
//! through it so flows can assert on the full choreography.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use swid_imv::{
    ConnectionState, ImvError, ImvHost, ImvResult, ImvTransport, OutboundBatch,
    SharedConnectionState, WorkItem, WorkItemSession, WorkItemStore,
};
use tnc_types::{ActionRecommendation, ConnectionId, ConnectionStateChange, EvaluationResult, ImvId};

static INIT: Once = Once::new();

/// Route verifier log output through the test harness, once per process.
/// Honors `RUST_LOG` like the production subscriber setup.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Connection registry plus recommendation sink.
#[derive(Default)]
pub struct InMemoryHost {
    states: Mutex<HashMap<ConnectionId, SharedConnectionState>>,
    recommendations: Mutex<Vec<(ConnectionId, ActionRecommendation, EvaluationResult)>>,
}

impl InMemoryHost {
    pub fn recommendations(
        &self,
    ) -> Vec<(ConnectionId, ActionRecommendation, EvaluationResult)> {
        self.recommendations.lock().clone()
    }

    pub fn state(&self, connection: ConnectionId) -> Option<SharedConnectionState> {
        self.states.lock().get(&connection).cloned()
    }
}

impl ImvHost for InMemoryHost {
    fn create_state(&self, state: ConnectionState) -> ImvResult<()> {
        let connection = state.connection();
        self.states.lock().insert(connection, state.into_shared());
        Ok(())
    }

    fn delete_state(&self, connection: ConnectionId) -> ImvResult<()> {
        self.states.lock().remove(&connection);
        Ok(())
    }

    fn change_state(
        &self,
        _connection: ConnectionId,
        _change: ConnectionStateChange,
    ) -> ImvResult<()> {
        Ok(())
    }

    fn get_state(&self, connection: ConnectionId) -> Option<SharedConnectionState> {
        self.states.lock().get(&connection).cloned()
    }

    fn provide_recommendation(
        &self,
        connection: ConnectionId,
        rec: ActionRecommendation,
        eval: EvaluationResult,
    ) -> ImvResult<()> {
        self.recommendations.lock().push((connection, rec, eval));
        Ok(())
    }
}

/// Work-item registry shared by all verifier modules of one session.
#[derive(Default)]
pub struct InMemoryRegistry {
    items: Mutex<Vec<WorkItem>>,
}

impl InMemoryRegistry {
    pub fn seeded(items: Vec<WorkItem>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
        })
    }

    pub fn pending(&self) -> Vec<WorkItem> {
        self.items.lock().clone()
    }
}

impl WorkItemSession for InMemoryRegistry {
    fn workitems(&self) -> Vec<WorkItem> {
        self.items.lock().clone()
    }

    fn claim(&self, id: u32, owner: ImvId) -> bool {
        let mut items = self.items.lock();
        match items.iter_mut().find(|i| i.id == id && i.is_unclaimed()) {
            Some(item) => {
                item.owner = owner;
                true
            }
            None => false,
        }
    }

    fn complete(&self, id: u32) -> Option<WorkItem> {
        let mut items = self.items.lock();
        let pos = items.iter().position(|i| i.id == id)?;
        Some(items.remove(pos))
    }

    fn owned_count(&self, owner: ImvId) -> usize {
        self.items.lock().iter().filter(|i| i.owner == owner).count()
    }
}

/// Finalized work-item sink.
#[derive(Default)]
pub struct InMemoryStore {
    finalized: Mutex<Vec<WorkItem>>,
    fail: Mutex<bool>,
}

impl InMemoryStore {
    pub fn finalized(&self) -> Vec<WorkItem> {
        self.finalized.lock().clone()
    }

    /// Make every subsequent finalize call fail.
    pub fn break_storage(&self) {
        *self.fail.lock() = true;
    }
}

impl WorkItemStore for InMemoryStore {
    fn finalize(&self, item: &WorkItem) -> ImvResult<()> {
        if *self.fail.lock() {
            return Err(ImvError::Store {
                reason: "database unavailable".to_string(),
            });
        }
        self.finalized.lock().push(item.clone());
        Ok(())
    }
}

/// Transport that records every outbound batch.
#[derive(Default)]
pub struct RecordingTransport {
    batches: Mutex<Vec<OutboundBatch>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<OutboundBatch> {
        self.batches.lock().clone()
    }

    pub fn last(&self) -> Option<OutboundBatch> {
        self.batches.lock().last().cloned()
    }
}

impl ImvTransport for RecordingTransport {
    fn send(&self, batch: OutboundBatch) -> ImvResult<()> {
        self.batches.lock().push(batch);
        Ok(())
    }
}
