// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Helpers for the raw pointers the C ABI passes in.

use std::ffi::{CStr, c_char};

use crate::{Error, Result};

/// A checked, non-null output pointer.
pub struct Out<T> {
    ptr: *mut T,
}

impl<T> Out<T> {
    /// Validates `ptr`. `what` names the pointee in the error message.
    pub fn new(ptr: *mut T, what: &'static str) -> Result<Self> {
        if ptr.is_null() {
            Err(Error::NullPointer(what))
        } else {
            Ok(Self { ptr })
        }
    }

    /// Stores `value`.
    ///
    /// # Safety
    ///
    /// The pointer given to [`Out::new`] must be valid for a write of `T`.
    pub unsafe fn write(self, value: T) {
        unsafe { self.ptr.write(value) }
    }
}

/// Reads a NUL-terminated path argument.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
pub unsafe fn read_str(ptr: *const c_char, what: &'static str) -> Result<String> {
    if ptr.is_null() {
        return Err(Error::NullPointer(what));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(str::to_owned)
        .map_err(|err| Error::InvalidString(err.to_string()))
}

/// Copies `value` into a caller buffer of `buf_len` bytes.
///
/// At most `buf_len - 1` bytes are copied and the result is always
/// NUL-terminated; longer strings are truncated.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `buf_len` bytes.
pub unsafe fn copy_str(buf: *mut c_char, buf_len: i32, value: &str) -> Result<()> {
    if buf.is_null() {
        return Err(Error::NullPointer("char"));
    }
    let capacity = usize::try_from(buf_len)
        .ok()
        .filter(|len| *len > 0)
        .ok_or_else(|| Error::InvalidString(format!("buffer length {buf_len}")))?;
    let bytes = value.as_bytes();
    let count = bytes.len().min(capacity - 1);
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), count);
        buf.add(count).write(0);
    }
    Ok(())
}
