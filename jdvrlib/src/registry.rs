// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide table of live handles.
//!
//! A handle is an opaque token drawn from a process-wide counter; no value is
//! ever issued twice, so a handle stays invalid once its wrapper has been
//! destroyed, whatever is created afterwards. Lookups hand out a clone of the
//! `Arc`, so a wrapper that is destroyed while a call or an event is still
//! using it is released only when that use finishes.

use std::{
    ffi::c_void,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::{Error, HandleKind, Result};

/// Next token to hand out, shared by all registries. Zero is never issued,
/// so a null handle is always invalid.
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(1);

fn next_handle() -> usize {
    NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)
}

/// Registry for one kind of wrapper.
///
/// Validation and event routing are linear scans; handle counts are expected
/// to stay small (a few recordings and one or two players).
pub struct Registry<T> {
    kind: HandleKind,
    entries: Mutex<Vec<(usize, Arc<T>)>>,
}

impl<T> Registry<T> {
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            entries: Mutex::new(Vec::new()),
        }
    }

    // A panic while holding the lock cannot leave the Vec half-updated, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<(usize, Arc<T>)>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn invalid(&self, handle: *const c_void) -> Error {
        Error::InvalidHandle {
            kind: self.kind,
            addr: handle as usize,
        }
    }

    /// Registers a wrapper and returns its handle.
    pub fn insert(&self, value: T) -> *mut c_void {
        let token = next_handle();
        self.lock().push((token, Arc::new(value)));
        token as *mut c_void
    }

    /// Returns the wrapper behind `handle` if it is registered.
    pub fn get(&self, handle: *const c_void) -> Result<Arc<T>> {
        let token = handle as usize;
        self.lock()
            .iter()
            .find(|(entry, _)| *entry == token)
            .map(|(_, value)| Arc::clone(value))
            .ok_or_else(|| self.invalid(handle))
    }

    /// Unregisters `handle`, invalidating it for good.
    ///
    /// The returned `Arc` is usually the last owner; dropping it releases the
    /// wrapper.
    pub fn remove(&self, handle: *const c_void) -> Result<Arc<T>> {
        let token = handle as usize;
        let mut entries = self.lock();
        let position = entries
            .iter()
            .position(|(entry, _)| *entry == token)
            .ok_or_else(|| self.invalid(handle))?;
        Ok(entries.remove(position).1)
    }

    /// Finds the first wrapper matching `predicate`, together with its handle.
    ///
    /// The predicate runs on a snapshot, outside the lock, because it
    /// typically calls into the VM.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<(*mut c_void, Arc<T>)> {
        let snapshot: Vec<(usize, Arc<T>)> = self.lock().clone();
        snapshot
            .into_iter()
            .find(|(_, value)| predicate(&**value))
            .map(|(token, value)| (token as *mut c_void, value))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
