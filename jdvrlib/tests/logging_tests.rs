// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics emitted for rejected calls.
//!
//! The C result carries no detail, so these messages are all a caller gets.
//! `traced_test` installs its own global subscriber; nothing in this binary
//! may call `Config::init_logging`.

mod common;

use std::ffi::c_void;

use common::{MockBackend, persistent};
use jdvrlib::{Dvr, Error};
use jdvrlib_sys::RecorderInitParams;
use tracing_test::traced_test;

#[traced_test]
#[test]
fn stale_handle_is_logged_with_call_and_kind() {
    let dvr = Dvr::new(MockBackend::default());
    let handle = dvr.create_file(persistent("/data/rec/log")).unwrap();
    assert!(logs_contain("created file handle"));

    dvr.destroy_file(handle).unwrap();
    let code = Error::code(dvr.destroy_file(handle), "AmDvr_File_destroy");
    assert_eq!(code, jdvrlib_sys::JDVRLIB_JNI_ERR);
    assert!(logs_contain("AmDvr_File_destroy, given file handle"));
    assert!(logs_contain("is invalid"));
}

#[traced_test]
#[test]
fn null_callback_is_logged() {
    let dvr = Dvr::new(MockBackend::default());
    let file = dvr.create_file(persistent("/data/rec/log2")).unwrap();
    let params = RecorderInitParams {
        jdvrfile_handle: file,
        ..Default::default()
    };
    let code = Error::code(dvr.create_recorder(&params).map(drop), "AmDvr_Recorder_create");
    assert_eq!(code, jdvrlib_sys::JDVRLIB_JNI_ERR);
    assert!(logs_contain("AmDvr_Recorder_create, given callback is null"));
}

#[traced_test]
#[test]
fn only_failures_are_logged() {
    let dvr = Dvr::new(MockBackend::default());
    let bogus = 0x40 as *mut c_void;
    let code = Error::code(dvr.file(bogus).map(drop), "AmDvr_File_duration");
    assert_eq!(code, jdvrlib_sys::JDVRLIB_JNI_ERR);
    assert!(logs_contain("given file handle 0x40 is invalid"));

    let code = Error::code(Ok(()), "AmDvr_File_size");
    assert_eq!(code, jdvrlib_sys::JDVRLIB_JNI_OK);
    assert!(!logs_contain("AmDvr_File_size"));
}
