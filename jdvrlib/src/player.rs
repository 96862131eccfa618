// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Player wrapper.

use std::ffi::c_void;

use jdvrlib_sys::{PlayerEvent, PlayerHandle};

use crate::PlayerOps;

/// Non-null form of [`jdvrlib_sys::OnPlayerEventCallback`].
pub type PlayerCallback = unsafe extern "C" fn(PlayerHandle, PlayerEvent, *mut c_void);

/// A registered player: the Java proxy plus the native event sink.
pub struct DvrPlayer<P> {
    ops: P,
    callback: PlayerCallback,
}

impl<P: PlayerOps> DvrPlayer<P> {
    pub(crate) fn new(ops: P, callback: PlayerCallback) -> Self {
        Self { ops, callback }
    }

    pub fn ops(&self) -> &P {
        &self.ops
    }

    /// # Safety
    ///
    /// See [`crate::DvrRecorder`]; the same contract applies to player
    /// callbacks.
    pub(crate) unsafe fn notify(&self, handle: PlayerHandle, event: PlayerEvent, data: *mut c_void) {
        unsafe { (self.callback)(handle, event, data) }
    }
}
