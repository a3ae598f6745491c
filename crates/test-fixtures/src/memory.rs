//! In-memory collaborators with failure injection.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use revkeep_core::errors::{QueueError, RevkeepResult, StorageError};
use revkeep_core::models::{ContentItemMeta, PolicyConfig, VersionId, VersionMeta, WorkItem};
use revkeep_core::traits::{IPolicyStore, IVersionStorage, IWorkQueue};

#[derive(Debug, Default)]
struct StorageState {
    items: BTreeMap<String, (ContentItemMeta, Vec<VersionMeta>)>,
    failing_deletes: HashSet<(String, VersionId)>,
    failing_lists: HashSet<String>,
    delete_log: Vec<(String, VersionId)>,
}

/// `IVersionStorage` over a `Mutex<BTreeMap>`.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: Mutex<StorageState>,
    list_calls: AtomicUsize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, item: ContentItemMeta, versions: Vec<VersionMeta>) {
        let mut state = self.state.lock().unwrap();
        state.items.insert(item.id.clone(), (item, versions));
    }

    pub fn remove_item(&self, item_id: &str) {
        self.state.lock().unwrap().items.remove(item_id);
    }

    /// Make every delete of `version_id` fail until cleared.
    pub fn fail_delete(&self, item_id: &str, version_id: VersionId) {
        self.state
            .lock()
            .unwrap()
            .failing_deletes
            .insert((item_id.to_string(), version_id));
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.failing_deletes.clear();
        state.failing_lists.clear();
    }

    /// Make listing `item_id` fail until cleared.
    pub fn fail_list(&self, item_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_lists
            .insert(item_id.to_string());
    }

    /// Version ids currently stored for an item, ascending.
    pub fn version_ids(&self, item_id: &str) -> Vec<VersionId> {
        let state = self.state.lock().unwrap();
        let mut ids: Vec<VersionId> = state
            .items
            .get(item_id)
            .map(|(_, versions)| versions.iter().map(|v| v.id).collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Every successful delete call, in order.
    pub fn delete_log(&self) -> Vec<(String, VersionId)> {
        self.state.lock().unwrap().delete_log.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl IVersionStorage for InMemoryStorage {
    fn describe_item(&self, item_id: &str) -> RevkeepResult<Option<ContentItemMeta>> {
        let state = self.state.lock().unwrap();
        Ok(state.items.get(item_id).map(|(meta, _)| meta.clone()))
    }

    fn list_versions(&self, item_id: &str) -> RevkeepResult<Vec<VersionMeta>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        if state.failing_lists.contains(item_id) {
            return Err(StorageError::ListFailed {
                item_id: item_id.to_string(),
                reason: "injected list failure".to_string(),
            }
            .into());
        }
        Ok(state
            .items
            .get(item_id)
            .map(|(_, versions)| versions.clone())
            .unwrap_or_default())
    }

    fn delete_version(&self, item_id: &str, version_id: VersionId) -> RevkeepResult<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .failing_deletes
            .contains(&(item_id.to_string(), version_id))
        {
            return Err(StorageError::DeleteFailed {
                item_id: item_id.to_string(),
                version_id,
                reason: "injected delete failure".to_string(),
            }
            .into());
        }
        if let Some((_, versions)) = state.items.get_mut(item_id) {
            versions.retain(|v| v.id != version_id);
        }
        state.delete_log.push((item_id.to_string(), version_id));
        Ok(())
    }
}

/// `IPolicyStore` keyed by item type. Counts lookups so tests can verify
/// policies are re-read on every run.
#[derive(Debug, Default)]
pub struct StaticPolicyStore {
    policies: Mutex<HashMap<String, Vec<PolicyConfig>>>,
    lookups: AtomicUsize,
}

impl StaticPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policies(item_type: &str, policies: Vec<PolicyConfig>) -> Self {
        let store = Self::new();
        store.set(item_type, policies);
        store
    }

    pub fn set(&self, item_type: &str, policies: Vec<PolicyConfig>) {
        self.policies
            .lock()
            .unwrap()
            .insert(item_type.to_string(), policies);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl IPolicyStore for StaticPolicyStore {
    fn list_enabled_policies(&self, item_type: &str) -> RevkeepResult<Vec<PolicyConfig>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .policies
            .lock()
            .unwrap()
            .get(item_type)
            .map(|ps| ps.iter().filter(|p| p.enabled).cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Debug, Default)]
struct QueueState {
    ready: VecDeque<(String, u32)>,
    claimed: HashMap<String, (String, u32)>,
    buried: Vec<(String, String)>,
    acked: Vec<String>,
    failing_acks: HashSet<String>,
}

/// FIFO `IWorkQueue` with at-least-once semantics.
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    state: Mutex<QueueState>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(item_id, reason)` for every buried delivery.
    pub fn buried(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().buried.clone()
    }

    pub fn acked(&self) -> Vec<String> {
        self.state.lock().unwrap().acked.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.state.lock().unwrap().claimed.len()
    }

    /// Make every ack of `item_id` fail with a backend error. The claim is
    /// left in place, as a lost round trip would leave it.
    pub fn fail_ack(&self, item_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_acks
            .insert(item_id.to_string());
    }

    /// Simulate a consumer crash: every claimed item becomes ready again.
    pub fn expire_claims(&self) {
        let mut state = self.state.lock().unwrap();
        let claimed: Vec<(String, u32)> = state.claimed.drain().map(|(_, v)| v).collect();
        state.ready.extend(claimed);
    }
}

impl IWorkQueue for InMemoryQueue {
    fn enqueue(&self, item_id: &str) -> RevkeepResult<()> {
        self.state
            .lock()
            .unwrap()
            .ready
            .push_back((item_id.to_string(), 0));
        Ok(())
    }

    fn claim(&self) -> RevkeepResult<Option<WorkItem>> {
        let mut state = self.state.lock().unwrap();
        let Some((item_id, attempts)) = state.ready.pop_front() else {
            return Ok(None);
        };
        let claim_id = uuid::Uuid::new_v4().to_string();
        let attempts = attempts + 1;
        state
            .claimed
            .insert(claim_id.clone(), (item_id.clone(), attempts));
        Ok(Some(WorkItem {
            claim_id,
            item_id,
            attempts,
        }))
    }

    fn ack(&self, item: &WorkItem) -> RevkeepResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.failing_acks.contains(&item.item_id) {
            return Err(QueueError::Backend {
                message: format!("injected ack failure for {}", item.item_id),
            }
            .into());
        }
        let (item_id, _) = take_claim(&mut state, item)?;
        state.acked.push(item_id);
        Ok(())
    }

    fn release(&self, item: &WorkItem) -> RevkeepResult<()> {
        let mut state = self.state.lock().unwrap();
        let entry = take_claim(&mut state, item)?;
        state.ready.push_back(entry);
        Ok(())
    }

    fn bury(&self, item: &WorkItem, reason: &str) -> RevkeepResult<()> {
        let mut state = self.state.lock().unwrap();
        let (item_id, _) = take_claim(&mut state, item)?;
        state.buried.push((item_id, reason.to_string()));
        Ok(())
    }

    fn depth(&self) -> RevkeepResult<usize> {
        Ok(self.state.lock().unwrap().ready.len())
    }
}

fn take_claim(state: &mut QueueState, item: &WorkItem) -> RevkeepResult<(String, u32)> {
    state.claimed.remove(&item.claim_id).ok_or_else(|| {
        QueueError::UnknownClaim {
            claim_id: item.claim_id.clone(),
        }
        .into()
    })
}
