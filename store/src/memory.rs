//! In-memory store implementation.
//!
//! Backs the integration tests and doubles as executable documentation of
//! the store contract. Every mutating call is recorded in an operation log
//! so tests can assert batching behavior (how many bulk calls, in which
//! order). `fail_next_op` injects a backend failure into the next matching
//! call; `reverse_version_results` returns bulk-version results out of
//! input order, which callers must tolerate.

use crate::{
    ApplyAction, ApplyRequest, Record, StagedRow, Store, StoreError, StoreResult, TypedId,
    ANY_TYPE,
};
use parking_lot::Mutex;
use redline_core::RecordId;
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    records: HashMap<RecordId, Record>,
    next_id: u64,
    ops: Vec<String>,
    fail_next: Option<String>,
    reverse_version_results: bool,
    staged: Vec<StagedRow>,
}

impl Inner {
    fn alloc_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId::new(self.next_id)
    }

    fn log(&mut self, op: String) {
        self.ops.push(op);
    }

    /// Consume a pending injected failure if it targets `op`.
    fn check_fail(&mut self, op: &str) -> StoreResult<()> {
        if self.fail_next.as_deref() == Some(op) {
            self.fail_next = None;
            return Err(StoreError::backend(format!("injected failure: {op}")));
        }
        Ok(())
    }

    fn existing(&self, item_type: &str, id: RecordId) -> StoreResult<&Record> {
        let record = self
            .records
            .get(&id)
            .ok_or_else(|| StoreError::not_found(item_type, id))?;
        if item_type != ANY_TYPE && record.item_type != item_type {
            return Err(StoreError::type_mismatch(item_type, id));
        }
        Ok(record)
    }

    fn version_record(&mut self, item_type: &str, id: RecordId) -> StoreResult<(RecordId, Record)> {
        let source = self.existing(item_type, id)?.clone();
        let new_id = self.alloc_id();
        let mut next = source.clone();
        next.id = new_id;
        next.state = redline_core::PRELIMINARY.to_string();
        next.locked = true;
        next.set("generation", source.int("generation") + 1);
        next.set("is_released", false);
        next.properties.remove("effective_date");
        self.records.insert(new_id, next.clone());
        self.clone_children(id, new_id);
        Ok((id, next))
    }

    /// Child relationship rows follow a record to its new generation or
    /// copy, re-sourced to the new id.
    fn clone_children(&mut self, source_id: RecordId, new_source_id: RecordId) {
        let children: Vec<Record> = self
            .records
            .values()
            .filter(|record| record.id_ref("source_id") == Some(source_id))
            .cloned()
            .collect();
        for mut child in children {
            child.id = self.alloc_id();
            child.set("source_id", new_source_id);
            self.records.insert(child.id, child);
        }
    }

    fn copy_record(&mut self, item_type: &str, id: RecordId) -> StoreResult<Record> {
        let source = self.existing(item_type, id)?.clone();
        let new_id = self.alloc_id();
        let mut copy = source.clone();
        copy.id = new_id;
        copy.state = redline_core::PRELIMINARY.to_string();
        copy.locked = true;
        copy.set("config_id", format!("CFG-{}", new_id.raw()));
        copy.set("generation", 1i64);
        copy.set("is_released", false);
        copy.set(
            "item_number",
            format!("{}-R{}", source.text("item_number"), new_id.raw()),
        );
        self.records.insert(new_id, copy.clone());
        self.clone_children(id, new_id);
        Ok(copy)
    }
}

/// The in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, assigning an id if the placeholder is still set,
    /// and defaulting `config_id` and `generation`. Returns the id.
    pub fn seed(&self, mut record: Record) -> RecordId {
        let mut inner = self.inner.lock();
        if record.id.raw() == 0 {
            record.id = inner.alloc_id();
        } else {
            inner.next_id = inner.next_id.max(record.id.raw());
        }
        let id = record.id;
        if record.get("config_id").is_none() {
            record.set("config_id", format!("CFG-{}", id.raw()));
        }
        if record.get("generation").is_none() {
            record.set("generation", 1i64);
        }
        inner.records.insert(id, record);
        id
    }

    /// Snapshot of a record, for test assertions.
    pub fn record(&self, id: RecordId) -> Option<Record> {
        self.inner.lock().records.get(&id).cloned()
    }

    /// The operation log so far.
    pub fn ops(&self) -> Vec<String> {
        self.inner.lock().ops.clone()
    }

    /// Number of logged operations whose name starts with `prefix`.
    pub fn count_ops(&self, prefix: &str) -> usize {
        self.inner
            .lock()
            .ops
            .iter()
            .filter(|op| op.starts_with(prefix))
            .count()
    }

    /// Clear the operation log.
    pub fn clear_ops(&self) {
        self.inner.lock().ops.clear();
    }

    /// Make the next call of the named operation fail with a backend error.
    pub fn fail_next_op(&self, op: &str) {
        self.inner.lock().fail_next = Some(op.to_string());
    }

    /// Return bulk-version results in reverse input order.
    pub fn reverse_version_results(&self, yes: bool) {
        self.inner.lock().reverse_version_results = yes;
    }
}

impl Store for MemoryStore {
    fn get_by_id(&self, item_type: &str, id: RecordId) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.lock();
        inner.check_fail("get_by_id")?;
        Ok(inner.records.get(&id).cloned().filter(|record| {
            item_type == ANY_TYPE || record.item_type == item_type
        }))
    }

    fn apply(&self, request: &ApplyRequest) -> StoreResult<Record> {
        let mut inner = self.inner.lock();
        inner.check_fail("apply")?;

        match request.action {
            ApplyAction::Add => {
                let id = inner.alloc_id();
                let mut record = Record::new(request.item_type.clone());
                record.id = id;
                record.state = redline_core::PRELIMINARY.to_string();
                record.properties = request.properties.clone();
                if record.get("config_id").is_none() {
                    record.set("config_id", format!("CFG-{}", id.raw()));
                }
                if record.get("generation").is_none() {
                    record.set("generation", 1i64);
                }
                inner.log(format!("apply:add:{}", request.item_type));
                inner.records.insert(id, record.clone());
                Ok(record)
            }
            ApplyAction::Edit => {
                let id = required_id(request)?;
                inner.existing(&request.item_type, id)?;
                inner.log(format!("apply:edit:{}:{}", request.item_type, id));
                let properties = request.properties.clone();
                let record = inner.records.get_mut(&id).unwrap();
                for (name, value) in properties {
                    record.properties.insert(name, value);
                }
                Ok(record.clone())
            }
            ApplyAction::Delete => {
                let id = required_id(request)?;
                inner.existing(&request.item_type, id)?;
                inner.log(format!("apply:delete:{}:{}", request.item_type, id));
                Ok(inner.records.remove(&id).unwrap())
            }
            ApplyAction::Version => {
                let id = required_id(request)?;
                inner.log(format!("apply:version:{}", request.item_type));
                inner.version_record(&request.item_type, id).map(|(_, r)| r)
            }
            ApplyAction::Copy => {
                let id = required_id(request)?;
                inner.log(format!("apply:copy:{}", request.item_type));
                inner.copy_record(&request.item_type, id)
            }
            ApplyAction::Lock | ApplyAction::Unlock => {
                let id = required_id(request)?;
                let locked = request.action == ApplyAction::Lock;
                inner.existing(&request.item_type, id)?;
                inner.log(format!(
                    "apply:{}:{}:{}",
                    if locked { "lock" } else { "unlock" },
                    request.item_type,
                    id
                ));
                let record = inner.records.get_mut(&id).unwrap();
                record.locked = locked;
                Ok(record.clone())
            }
        }
    }

    fn promote(
        &self,
        item_type: &str,
        id: RecordId,
        to_state: &str,
        _comment: &str,
    ) -> StoreResult<Record> {
        let mut inner = self.inner.lock();
        inner.check_fail("promote")?;
        inner.existing(item_type, id)?;
        inner.log(format!("promote:{item_type}:{to_state}"));
        Ok(promote_in_place(&mut inner, id, to_state))
    }

    fn promote_set(
        &self,
        item_type: &str,
        ids: &[RecordId],
        to_state: &str,
        _comment: &str,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.check_fail("promote_set")?;
        for &id in ids {
            inner.existing(item_type, id)?;
        }
        inner.log(format!("promote_set:{item_type}:{to_state}:{}", ids.len()));
        for &id in ids {
            promote_in_place(&mut inner, id, to_state);
        }
        Ok(())
    }

    fn version_set(
        &self,
        item_type: &str,
        ids: &[RecordId],
    ) -> StoreResult<Vec<(RecordId, Record)>> {
        let mut inner = self.inner.lock();
        inner.check_fail("version_set")?;
        inner.log(format!("version_set:{item_type}:{}", ids.len()));
        let mut results = Vec::with_capacity(ids.len());
        for &id in ids {
            results.push(inner.version_record(item_type, id)?);
        }
        if inner.reverse_version_results {
            results.reverse();
        }
        Ok(results)
    }

    fn lock_set(&self, item_type: &str, ids: &[RecordId]) -> StoreResult<()> {
        self.set_lock_flag("lock_set", item_type, ids, true)
    }

    fn unlock_set(&self, item_type: &str, ids: &[RecordId]) -> StoreResult<()> {
        self.set_lock_flag("unlock_set", item_type, ids, false)
    }

    fn stage_update_rows(&self, columns: &[String], rows: &[StagedRow]) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.check_fail("stage_update_rows")?;
        inner.log(format!("stage_rows:{}x{}", columns.len(), rows.len()));
        inner.staged = rows.to_vec();
        Ok(())
    }

    fn apply_staged_update(&self, item_type: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.check_fail("apply_staged_update")?;
        inner.log(format!("apply_staged:{item_type}"));
        let staged = inner.staged.clone();
        for row in staged {
            // Set-based join: rows whose target is absent or of another
            // type fall out of the join rather than failing the update.
            let Some(record) = inner.records.get_mut(&row.id) else {
                continue;
            };
            if record.item_type != item_type {
                continue;
            }
            for (name, value) in &row.columns {
                record.properties.insert(name.clone(), value.clone());
            }
        }
        Ok(())
    }

    fn touch_all(&self, targets: &[TypedId]) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.check_fail("touch_all")?;
        for target in targets {
            inner.existing(&target.item_type, target.id)?;
        }
        inner.log(format!("touch:{}", targets.len()));
        Ok(())
    }

    fn children(&self, relationship: &str, source_id: RecordId) -> StoreResult<Vec<Record>> {
        let inner = self.inner.lock();
        let mut rows: Vec<Record> = inner
            .records
            .values()
            .filter(|record| {
                record.item_type == relationship
                    && record.id_ref("source_id") == Some(source_id)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|record| (record.sort_order(), record.id));
        Ok(rows)
    }

    fn has_released_generation(&self, item_type: &str, config_id: &str) -> StoreResult<bool> {
        let inner = self.inner.lock();
        Ok(inner.records.values().any(|record| {
            record.item_type == item_type
                && record.text("config_id") == config_id
                && record.flag("is_released")
        }))
    }
}

impl MemoryStore {
    fn set_lock_flag(
        &self,
        op: &str,
        item_type: &str,
        ids: &[RecordId],
        locked: bool,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.check_fail(op)?;
        for &id in ids {
            inner.existing(item_type, id)?;
        }
        inner.log(format!("{op}:{item_type}:{}", ids.len()));
        for &id in ids {
            inner.records.get_mut(&id).unwrap().locked = locked;
        }
        Ok(())
    }
}

fn promote_in_place(inner: &mut Inner, id: RecordId, to_state: &str) -> Record {
    let record = inner.records.get_mut(&id).unwrap();
    record.state = to_state.to_string();
    if to_state == redline_core::RELEASED {
        record.set("is_released", true);
    }
    record.clone()
}

fn required_id(request: &ApplyRequest) -> StoreResult<RecordId> {
    request
        .id
        .ok_or_else(|| StoreError::rejected(format!("{:?} requires a target id", request.action)))
}
