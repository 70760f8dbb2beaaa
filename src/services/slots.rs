// src/services/slots.rs
//
// Publish side of one coordinator slot.
//
// CRITICAL RULES:
// - Only the coordinator publishes; subscribers hold read-only receivers
// - Loading is published exactly once per request, before the call goes out
// - A completion publishes only while its request is still the latest issued

use std::sync::Mutex;
use tokio::sync::watch;

use crate::domain::{QueryKey, ResultState};

/// One addressable observable slot.
///
/// Wraps the watch channel holding the slot's current `ResultState` plus
/// the sequence counter ordering requests that target the slot. A request
/// superseded before its completion arrives is discarded, so a stale,
/// slower completion can never overwrite a fresher result. Late
/// subscribers see the latest published state, not history.
pub struct Slot<T> {
    key: QueryKey,
    tx: watch::Sender<ResultState<T>>,
    issued: Mutex<u64>,
}

impl<T> Slot<T> {
    pub fn new(key: QueryKey) -> Self {
        let (tx, _) = watch::channel(ResultState::Loading);
        Self {
            key,
            tx,
            issued: Mutex::new(0),
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Start a new request lifecycle: publish `Loading` and hand out the
    /// sequence number the eventual completion must present.
    pub fn begin(&self) -> u64 {
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;
        self.tx.send_replace(ResultState::Loading);
        *issued
    }

    /// Publish the terminal state for request `seq`.
    ///
    /// Returns false when the request was superseded in the meantime and
    /// the completion was discarded.
    pub fn complete(&self, seq: u64, state: ResultState<T>) -> bool {
        let issued = self.issued.lock().unwrap();
        if *issued != seq {
            log::debug!(
                "{}: discarding stale completion (request {}, latest {})",
                self.key,
                seq,
                *issued
            );
            return false;
        }
        self.tx.send_replace(state);
        true
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultState<T>> {
        self.tx.subscribe()
    }
}
