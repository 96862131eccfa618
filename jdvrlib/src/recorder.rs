// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Recorder wrapper.

use std::ffi::c_void;

use jdvrlib_sys::{RecorderEvent, RecorderHandle};

use crate::RecorderOps;

/// Non-null form of [`jdvrlib_sys::OnRecorderEventCallback`].
pub type RecorderCallback = unsafe extern "C" fn(RecorderHandle, RecorderEvent, *mut c_void);

/// A registered recorder: the Java proxy plus the native event sink.
pub struct DvrRecorder<R> {
    ops: R,
    callback: RecorderCallback,
}

impl<R: RecorderOps> DvrRecorder<R> {
    pub(crate) fn new(ops: R, callback: RecorderCallback) -> Self {
        Self { ops, callback }
    }

    pub fn ops(&self) -> &R {
        &self.ops
    }

    /// Hands one event to the native callback.
    ///
    /// # Safety
    ///
    /// The callback is foreign code; it must accept `handle` and take
    /// ownership of `data` as documented for the event code.
    pub(crate) unsafe fn notify(&self, handle: RecorderHandle, event: RecorderEvent, data: *mut c_void) {
        unsafe { (self.callback)(handle, event, data) }
    }
}
