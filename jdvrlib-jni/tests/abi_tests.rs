// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! The C ABI without a VM: nothing is initialized, so every export has to
//! fail cleanly and leave its outputs alone.

use std::ffi::c_char;

use jdvrlib_jni::*;
use jdvrlib_sys::{
    AM_DVR_STREAM_TYPE_VIDEO, FileHandle, JDVRLIB_JNI_ERR, PlayerHandle, PlayerInitParams,
    RecorderHandle, RecorderInitParams,
};

const PATH: &std::ffi::CStr = c"/data/rec/00000001";

fn bogus<T>() -> *mut T {
    0x1000 as *mut T
}

#[test]
fn register_rejects_null_env() {
    assert_eq!(unsafe { AmDvr_registerJNI(std::ptr::null_mut()) }, JDVRLIB_JNI_ERR);
}

#[test]
fn file_creation_fails_before_registration() {
    let mut handle: FileHandle = bogus();
    unsafe {
        assert_eq!(AmDvr_File_create1(PATH.as_ptr(), true, &mut handle), JDVRLIB_JNI_ERR);
        assert_eq!(
            AmDvr_File_create2(PATH.as_ptr(), 1 << 30, 3600, true, &mut handle),
            JDVRLIB_JNI_ERR
        );
        assert_eq!(AmDvr_File_create3(PATH.as_ptr(), &mut handle), JDVRLIB_JNI_ERR);
    }
    assert_eq!(handle, bogus());
}

#[test]
fn null_arguments_are_rejected() {
    let mut handle: FileHandle = bogus();
    unsafe {
        assert_eq!(AmDvr_File_create1(std::ptr::null(), false, &mut handle), JDVRLIB_JNI_ERR);
        assert_eq!(
            AmDvr_File_create3(PATH.as_ptr(), std::ptr::null_mut()),
            JDVRLIB_JNI_ERR
        );
        assert_eq!(AmDvr_deleteRecord(std::ptr::null()), JDVRLIB_JNI_ERR);
        assert_eq!(
            AmDvr_getRecordSize(PATH.as_ptr(), std::ptr::null_mut()),
            JDVRLIB_JNI_ERR
        );
        let mut recorder: RecorderHandle = bogus();
        assert_eq!(
            AmDvr_Recorder_create(std::ptr::null_mut(), &mut recorder),
            JDVRLIB_JNI_ERR
        );
        assert_eq!(recorder, bogus());
        let mut player: PlayerHandle = bogus();
        assert_eq!(
            AmDvr_Player_create(std::ptr::null_mut(), &mut player),
            JDVRLIB_JNI_ERR
        );
        assert_eq!(player, bogus());
    }
    assert_eq!(handle, bogus());
}

#[test]
fn accessors_leave_outputs_untouched() {
    let file: FileHandle = bogus();
    let mut duration = -7_i64;
    let mut segment = -7_i32;
    let mut timeshift = true;
    let mut mime = [b'x' as c_char; 8];
    unsafe {
        assert_eq!(AmDvr_File_duration(file, &mut duration), JDVRLIB_JNI_ERR);
        assert_eq!(AmDvr_File_getCurrSegmentId(file, &mut segment), JDVRLIB_JNI_ERR);
        assert_eq!(AmDvr_File_isTimeshift(file, &mut timeshift), JDVRLIB_JNI_ERR);
        assert_eq!(
            AmDvr_File_getVideoMIMEType(file, mime.as_mut_ptr(), mime.len() as i32),
            JDVRLIB_JNI_ERR
        );
        assert_eq!(AmDvr_getRecordDuration(PATH.as_ptr(), &mut duration), JDVRLIB_JNI_ERR);
    }
    assert_eq!(duration, -7);
    assert_eq!(segment, -7);
    assert!(timeshift);
    assert!(mime.iter().all(|c| *c == b'x' as c_char));
}

#[test]
fn actions_on_unknown_handles_fail() {
    let recorder: RecorderHandle = bogus();
    let player: PlayerHandle = bogus();
    assert_eq!(
        AmDvr_Recorder_addStream(recorder, 0x100, AM_DVR_STREAM_TYPE_VIDEO, 0),
        JDVRLIB_JNI_ERR
    );
    assert_eq!(AmDvr_Recorder_start(recorder), JDVRLIB_JNI_ERR);
    assert_eq!(AmDvr_Recorder_destroy(recorder), JDVRLIB_JNI_ERR);
    assert_eq!(AmDvr_Player_setSpeed(player, -2.0), JDVRLIB_JNI_ERR);
    assert_eq!(AmDvr_Player_seek(player, 30), JDVRLIB_JNI_ERR);
    assert_eq!(AmDvr_Player_destroy(player), JDVRLIB_JNI_ERR);
    assert_eq!(AmDvr_File_close(bogus()), JDVRLIB_JNI_ERR);
    assert_eq!(AmDvr_File_destroy(bogus()), JDVRLIB_JNI_ERR);
}

#[test]
fn default_create_params_are_rejected() {
    let mut params = RecorderInitParams::default();
    let mut handle: RecorderHandle = bogus();
    assert_eq!(
        unsafe { AmDvr_Recorder_create(&mut params, &mut handle) },
        JDVRLIB_JNI_ERR
    );
    assert_eq!(handle, bogus());

    let mut params = PlayerInitParams::default();
    let mut handle: PlayerHandle = bogus();
    assert_eq!(
        unsafe { AmDvr_Player_create(&mut params, &mut handle) },
        JDVRLIB_JNI_ERR
    );
    assert_eq!(handle, bogus());
}

#[test]
fn freeing_null_progress_is_a_no_op() {
    unsafe {
        AmDvr_RecordingProgress_free(std::ptr::null_mut());
        AmDvr_PlaybackProgress_free(std::ptr::null_mut());
    }
}
