use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{RecordSession, RecordStore, StoreError};
use crate::models::FinalTableRecord;

#[derive(Debug, Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// In-memory store that counts session opens and closes.
pub struct MemoryStore {
    records: Vec<FinalTableRecord>,
    connect_error: Option<String>,
    query_error: Option<String>,
    counters: Arc<Counters>,
}

impl MemoryStore {
    pub fn new(records: Vec<FinalTableRecord>) -> Self {
        Self {
            records,
            connect_error: None,
            query_error: None,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn failing_connect(mut self, message: impl Into<String>) -> Self {
        self.connect_error = Some(message.into());
        self
    }

    pub fn failing_query(mut self, message: impl Into<String>) -> Self {
        self.query_error = Some(message.into());
        self
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }
}

struct MemorySession {
    records: Vec<FinalTableRecord>,
    query_error: Option<String>,
    counters: Arc<Counters>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn connect(&self) -> Result<Box<dyn RecordSession>, StoreError> {
        if let Some(message) = &self.connect_error {
            return Err(StoreError::Connect(message.clone()));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            records: self.records.clone(),
            query_error: self.query_error.clone(),
            counters: Arc::clone(&self.counters),
        }))
    }
}

#[async_trait]
impl RecordSession for MemorySession {
    async fn find_all(&self, _collection: &str) -> Result<Vec<FinalTableRecord>, StoreError> {
        match &self.query_error {
            Some(message) => Err(StoreError::Query(message.clone())),
            None => Ok(self.records.clone()),
        }
    }

    async fn close(&self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
