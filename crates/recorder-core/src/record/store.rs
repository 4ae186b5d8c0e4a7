//! Records store seam and an in-memory implementation

use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};

use super::Record;

/// Library of recordings with one optional active record
pub trait RecordsStore: Send {
    /// Record currently selected for playback
    fn active_record(&self) -> Option<Record>;

    /// Select a record for playback
    fn set_active(&mut self, id: u64) -> StoreResult<()>;

    /// Clear the active selection
    fn clear_active(&mut self);

    /// Add a record and return its assigned id (the incoming id is ignored)
    fn insert(&mut self, record: Record) -> u64;

    fn get(&self, id: u64) -> Option<Record>;

    /// Store freshly decoded gains and mark the waveform as processed
    fn update_amplitudes(&mut self, id: u64, amplitudes: Vec<u32>) -> StoreResult<()>;

    fn rename(&mut self, id: u64, name: &str) -> StoreResult<()>;
}

/// `RecordsStore` kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryRecordsStore {
    records: BTreeMap<u64, Record>,
    active: Option<u64>,
    next_id: u64,
}

impl InMemoryRecordsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records ordered by id
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    fn record_mut(&mut self, id: u64) -> StoreResult<&mut Record> {
        self.records.get_mut(&id).ok_or(StoreError::RecordNotFound(id))
    }
}

impl RecordsStore for InMemoryRecordsStore {
    fn active_record(&self) -> Option<Record> {
        self.active.and_then(|id| self.records.get(&id)).cloned()
    }

    fn set_active(&mut self, id: u64) -> StoreResult<()> {
        if !self.records.contains_key(&id) {
            return Err(StoreError::RecordNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    fn clear_active(&mut self) {
        self.active = None;
    }

    fn insert(&mut self, mut record: Record) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        record.id = id;
        log::debug!("InMemoryRecordsStore: inserted record {} ({})", id, record.name);
        self.records.insert(id, record);
        id
    }

    fn get(&self, id: u64) -> Option<Record> {
        self.records.get(&id).cloned()
    }

    fn update_amplitudes(&mut self, id: u64, amplitudes: Vec<u32>) -> StoreResult<()> {
        let record = self.record_mut(id)?;
        record.amplitudes = amplitudes;
        record.waveform_processed = true;
        Ok(())
    }

    fn rename(&mut self, id: u64, name: &str) -> StoreResult<()> {
        self.record_mut(id)?.name = name.to_string();
        Ok(())
    }
}
