// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! The exported `AmDvr_*` functions declared in `JDvrLibJNI.h`.
//!
//! Every export returns `JDVRLIB_JNI_OK` or `JDVRLIB_JNI_ERR`; the reason of
//! a failure only reaches the log. Output pointers are written on success
//! only.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int};

use jdvrlib::{
    Error, FileOps, FileSpec, PlayerOps, RecorderOps, Result, accepted, event,
    out::{Out, copy_str, read_str},
};
use jdvrlib_sys::{
    DvrResult, FileHandle, PlaybackProgress, PlayerHandle, PlayerInitParams, RecorderHandle,
    RecorderInitParams, RecordingProgress, StreamType,
};

use crate::{JavaFile, JavaPlayer, JavaRecorder, dvr};

/// Runs `query` on a registered file and stores its value in `out`.
unsafe fn write_file_query<T>(
    handle: FileHandle,
    out: *mut T,
    what: &'static str,
    query: impl FnOnce(&JavaFile) -> Result<T>,
) -> Result<()> {
    let out = Out::new(out, what)?;
    let file = dvr()?.file(handle)?;
    let value = query(file.ops())?;
    unsafe { out.write(value) };
    Ok(())
}

unsafe fn create_file(
    path_prefix: *const c_char,
    phandle: *mut FileHandle,
    spec: impl FnOnce(String) -> FileSpec,
) -> Result<()> {
    let out = Out::new(phandle, "handle")?;
    let path_prefix = unsafe { read_str(path_prefix, "path_prefix") }?;
    let handle = dvr()?.create_file(spec(path_prefix))?;
    unsafe { out.write(handle) };
    Ok(())
}

unsafe fn copy_mime_type(
    handle: FileHandle,
    buf: *mut c_char,
    buf_len: c_int,
    query: impl FnOnce(&JavaFile) -> Result<String>,
) -> Result<()> {
    let file = dvr()?.file(handle)?;
    let mime_type = query(file.ops())?;
    unsafe { copy_str(buf, buf_len, &mime_type) }
}

fn recorder_action(
    handle: RecorderHandle,
    call: &'static str,
    action: impl FnOnce(&JavaRecorder) -> Result<bool>,
) -> Result<()> {
    let recorder = dvr()?.recorder(handle)?;
    accepted(call, action(recorder.ops()))
}

fn player_action(
    handle: PlayerHandle,
    call: &'static str,
    action: impl FnOnce(&JavaPlayer) -> Result<bool>,
) -> Result<()> {
    let player = dvr()?.player(handle)?;
    accepted(call, action(player.ops()))
}

// Files

/// Creates a persistent recording file.
///
/// # Safety
///
/// `path_prefix` must be null or NUL-terminated; `phandle` must be null or
/// writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_File_create1(
    path_prefix: *const c_char,
    trunc: bool,
    phandle: *mut FileHandle,
) -> DvrResult {
    let result = unsafe {
        create_file(path_prefix, phandle, |path_prefix| FileSpec::Persistent {
            path_prefix,
            trunc,
        })
    };
    Error::code(result, "AmDvr_File_create1")
}

/// Creates a timeshift file bounded by `limit_size` bytes and
/// `limit_seconds`.
///
/// # Safety
///
/// As for [`AmDvr_File_create1`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_File_create2(
    path_prefix: *const c_char,
    limit_size: i64,
    limit_seconds: i32,
    trunc: bool,
    phandle: *mut FileHandle,
) -> DvrResult {
    let result = unsafe {
        create_file(path_prefix, phandle, |path_prefix| FileSpec::Timeshift {
            path_prefix,
            limit_size,
            limit_seconds,
            trunc,
        })
    };
    Error::code(result, "AmDvr_File_create2")
}

/// Opens an existing recording for playback.
///
/// # Safety
///
/// As for [`AmDvr_File_create1`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_File_create3(
    path_prefix: *const c_char,
    phandle: *mut FileHandle,
) -> DvrResult {
    let result = unsafe {
        create_file(path_prefix, phandle, |path_prefix| FileSpec::Existing {
            path_prefix,
        })
    };
    Error::code(result, "AmDvr_File_create3")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_File_destroy(handle: FileHandle) -> DvrResult {
    let result = dvr().and_then(|dvr| dvr.destroy_file(handle));
    Error::code(result, "AmDvr_File_destroy")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_File_close(handle: FileHandle) -> DvrResult {
    let result = dvr()
        .and_then(|dvr| dvr.file(handle))
        .and_then(|file| file.ops().close());
    Error::code(result, "AmDvr_File_close")
}

/// Generates an accessor export writing one value through an output
/// pointer.
macro_rules! file_query {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $what:literal, $method:ident) => {
        $(#[$doc])*
        ///
        /// # Safety
        ///
        /// The output pointer must be null or writable.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(handle: FileHandle, out: *mut $ty) -> DvrResult {
            let result = unsafe { write_file_query(handle, out, $what, |file| file.$method()) };
            Error::code(result, stringify!($name))
        }
    };
}

file_query!(AmDvr_File_isTimeshift, bool, "bool", is_timeshift);
file_query!(
    /// Recorded duration in ms. 0 for a file whose Java object is missing.
    AmDvr_File_duration, i64, "int64_t", duration
);
file_query!(
    /// Recorded size in bytes. 0 for a file whose Java object is missing.
    AmDvr_File_size, i64, "int64_t", size
);
file_query!(AmDvr_File_getPlayingTime, i64, "int64_t", playing_time);
file_query!(AmDvr_File_getStartTime, i64, "int64_t", start_time);
file_query!(
    /// Id of the segment currently being read.
    AmDvr_File_getCurrSegmentId, i32, "int32_t", segment_id_being_read
);
file_query!(AmDvr_File_getFirstSegmentId, i32, "int32_t", first_segment_id);
file_query!(AmDvr_File_getLastSegmentId, i32, "int32_t", last_segment_id);
file_query!(AmDvr_File_getNumberOfSegments, i32, "int32_t", number_of_segments);
file_query!(AmDvr_File_getVideoPID, c_int, "int", video_pid);
file_query!(AmDvr_File_getVideoFormat, c_int, "int", video_format);
file_query!(AmDvr_File_getAudioPID, c_int, "int", audio_pid);
file_query!(AmDvr_File_getAudioFormat, c_int, "int", audio_format);

/// Copies the video MIME type into `buf`, truncated to `buf_len - 1` bytes
/// and NUL-terminated.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `buf_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_File_getVideoMIMEType(
    handle: FileHandle,
    buf: *mut c_char,
    buf_len: c_int,
) -> DvrResult {
    let result = unsafe { copy_mime_type(handle, buf, buf_len, |file| file.video_mime_type()) };
    Error::code(result, "AmDvr_File_getVideoMIMEType")
}

/// Copies the audio MIME type into `buf`. See
/// [`AmDvr_File_getVideoMIMEType`].
///
/// # Safety
///
/// `buf` must be null or valid for writes of `buf_len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_File_getAudioMIMEType(
    handle: FileHandle,
    buf: *mut c_char,
    buf_len: c_int,
) -> DvrResult {
    let result = unsafe { copy_mime_type(handle, buf, buf_len, |file| file.audio_mime_type()) };
    Error::code(result, "AmDvr_File_getAudioMIMEType")
}

// Recordings by path

/// Deletes every file belonging to the recording at `path_prefix`.
///
/// # Safety
///
/// `path_prefix` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_deleteRecord(path_prefix: *const c_char) -> DvrResult {
    let result = unsafe { read_str(path_prefix, "path_prefix") }
        .and_then(|path_prefix| dvr()?.delete_record(&path_prefix));
    Error::code(result, "AmDvr_deleteRecord")
}

/// Duration in ms of the recording at `path_prefix`, without opening it.
///
/// # Safety
///
/// `path_prefix` must be null or NUL-terminated; `pduration` must be null
/// or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_getRecordDuration(
    path_prefix: *const c_char,
    pduration: *mut i64,
) -> DvrResult {
    let result = (|| -> Result<()> {
        let out = Out::new(pduration, "int64_t")?;
        let path_prefix = unsafe { read_str(path_prefix, "path_prefix") }?;
        let duration = dvr()?.record_duration(&path_prefix)?;
        unsafe { out.write(duration) };
        Ok(())
    })();
    Error::code(result, "AmDvr_getRecordDuration")
}

/// Size in bytes of the recording at `path_prefix`, without opening it.
///
/// # Safety
///
/// `path_prefix` must be null or NUL-terminated; `psize` must be null or
/// writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_getRecordSize(path_prefix: *const c_char, psize: *mut i64) -> DvrResult {
    let result = (|| -> Result<()> {
        let out = Out::new(psize, "int64_t")?;
        let path_prefix = unsafe { read_str(path_prefix, "path_prefix") }?;
        let size = dvr()?.record_size(&path_prefix)?;
        unsafe { out.write(size) };
        Ok(())
    })();
    Error::code(result, "AmDvr_getRecordSize")
}

// Recorders

/// Creates a recorder writing into the file of `params.jdvrfile_handle`.
///
/// # Safety
///
/// `params` must be null or point to initialized parameters whose `tuner`
/// and `settings` are valid references; `phandle` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_Recorder_create(
    params: *mut RecorderInitParams,
    phandle: *mut RecorderHandle,
) -> DvrResult {
    let result = (|| -> Result<()> {
        let out = Out::new(phandle, "handle")?;
        let params = unsafe { params.as_ref() }
            .ok_or(Error::NullPointer("am_dvr_recorder_init_params"))?;
        let handle = dvr()?.create_recorder(params)?;
        unsafe { out.write(handle) };
        Ok(())
    })();
    Error::code(result, "AmDvr_Recorder_create")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Recorder_destroy(handle: RecorderHandle) -> DvrResult {
    let result = dvr().and_then(|dvr| dvr.destroy_recorder(handle));
    Error::code(result, "AmDvr_Recorder_destroy")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Recorder_addStream(
    handle: RecorderHandle,
    pid: c_int,
    stream_type: StreamType,
    format: c_int,
) -> DvrResult {
    let result = recorder_action(handle, "addStream", |recorder| {
        recorder.add_stream(pid, stream_type, format)
    });
    Error::code(result, "AmDvr_Recorder_addStream")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Recorder_removeStream(handle: RecorderHandle, pid: c_int) -> DvrResult {
    let result = recorder_action(handle, "removeStream", |recorder| recorder.remove_stream(pid));
    Error::code(result, "AmDvr_Recorder_removeStream")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Recorder_start(handle: RecorderHandle) -> DvrResult {
    let result = recorder_action(handle, "start", JavaRecorder::start);
    Error::code(result, "AmDvr_Recorder_start")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Recorder_pause(handle: RecorderHandle) -> DvrResult {
    let result = recorder_action(handle, "pause", JavaRecorder::pause);
    Error::code(result, "AmDvr_Recorder_pause")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Recorder_stop(handle: RecorderHandle) -> DvrResult {
    let result = recorder_action(handle, "stop", JavaRecorder::stop);
    Error::code(result, "AmDvr_Recorder_stop")
}

// Players

/// Creates a player reading from the file of `params.jdvrfile_handle`.
///
/// # Safety
///
/// `params` must be null or point to initialized parameters whose
/// `asplayer` and `settings` are valid references; `phandle` must be null or
/// writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_Player_create(
    params: *mut PlayerInitParams,
    phandle: *mut PlayerHandle,
) -> DvrResult {
    let result = (|| -> Result<()> {
        let out = Out::new(phandle, "handle")?;
        let params = unsafe { params.as_ref() }
            .ok_or(Error::NullPointer("am_dvr_player_init_params"))?;
        let handle = dvr()?.create_player(params)?;
        unsafe { out.write(handle) };
        Ok(())
    })();
    Error::code(result, "AmDvr_Player_create")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Player_destroy(handle: PlayerHandle) -> DvrResult {
    let result = dvr().and_then(|dvr| dvr.destroy_player(handle));
    Error::code(result, "AmDvr_Player_destroy")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Player_play(handle: PlayerHandle) -> DvrResult {
    let result = player_action(handle, "play", JavaPlayer::play);
    Error::code(result, "AmDvr_Player_play")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Player_pause(handle: PlayerHandle) -> DvrResult {
    let result = player_action(handle, "pause", JavaPlayer::pause);
    Error::code(result, "AmDvr_Player_pause")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Player_stop(handle: PlayerHandle) -> DvrResult {
    let result = player_action(handle, "stop", JavaPlayer::stop);
    Error::code(result, "AmDvr_Player_stop")
}

#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Player_seek(handle: PlayerHandle, seconds: c_int) -> DvrResult {
    let result = player_action(handle, "seek", |player| player.seek(seconds));
    Error::code(result, "AmDvr_Player_seek")
}

/// Sets the playback speed. Negative values play in reverse.
#[unsafe(no_mangle)]
pub extern "C" fn AmDvr_Player_setSpeed(handle: PlayerHandle, speed: f64) -> DvrResult {
    let result = player_action(handle, "setSpeed", |player| player.set_speed(speed));
    Error::code(result, "AmDvr_Player_setSpeed")
}

// Event payloads

/// Releases a recording progress handed to a recorder callback. Null is
/// ignored.
///
/// # Safety
///
/// `progress` must be null or a payload received from a callback and not
/// freed before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_RecordingProgress_free(progress: *mut RecordingProgress) {
    unsafe { event::free_recording_progress(progress) }
}

/// Releases a playback progress handed to a player callback. Null is
/// ignored.
///
/// # Safety
///
/// `progress` must be null or a payload received from a callback and not
/// freed before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_PlaybackProgress_free(progress: *mut PlaybackProgress) {
    unsafe { event::free_playback_progress(progress) }
}
