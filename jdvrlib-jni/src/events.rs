// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Native methods of the Java listener classes.
//!
//! Recorders and players created by the bridge get a `JNIJDvr*Listener`,
//! which forwards every `android.os.Message` to the entry points below on the
//! listener's executor thread. The message's `what` is the event code and,
//! for progress events, `obj` holds the progress value object.

use std::{cell::RefCell, ffi::c_void};

use jdvrlib::{Error, Result};
use jdvrlib_sys::{PlaybackProgress, RecordingProgress};
use jni::{
    JNIEnv, NativeMethod,
    objects::{JFieldID, JObject},
};
use tracing::error;

use crate::{
    ids::{self, Ids, PlaybackProgressIds, RecordingProgressIds},
    java::{double_field, int_field, long_field, object_field},
};

/// Registers both entry points on their listener classes.
///
/// A failure is logged and leaves events undelivered; every other call keeps
/// working.
pub(crate) fn register(env: &mut JNIEnv<'static>) {
    let natives = [
        (
            ids::RECORDER_LISTENER_CLASS,
            ids::NOTIFY_RECORDER_EVENT,
            ids::NOTIFY_RECORDER_EVENT_SIG,
            native_notify_recorder_event as *mut c_void,
        ),
        (
            ids::PLAYER_LISTENER_CLASS,
            ids::NOTIFY_PLAYER_EVENT,
            ids::NOTIFY_PLAYER_EVENT_SIG,
            native_notify_player_event as *mut c_void,
        ),
    ];
    for (class, name, sig, fn_ptr) in natives {
        let method = NativeMethod {
            name: name.into(),
            sig: sig.into(),
            fn_ptr,
        };
        if let Err(err) = env.register_native_methods(class, &[method]) {
            let _ = env.exception_clear();
            error!("RegisterNatives failed for '{class}': {err}");
        }
    }
}

extern "system" fn native_notify_recorder_event(
    mut env: JNIEnv,
    _listener: JObject,
    recorder: JObject,
    message: JObject,
) {
    let result = notify_recorder_event(&mut env, &recorder, &message);
    Error::code(result, "native_notifyJDvrRecorderEvent");
}

extern "system" fn native_notify_player_event(
    mut env: JNIEnv,
    _listener: JObject,
    player: JObject,
    message: JObject,
) {
    let result = notify_player_event(&mut env, &player, &message);
    Error::code(result, "native_notifyJDvrPlayerEvent");
}

fn notify_recorder_event(
    env: &mut JNIEnv<'_>,
    source: &JObject<'_>,
    message: &JObject<'_>,
) -> Result<()> {
    let dvr = crate::dvr()?;
    let ids = ids::ids()?;
    let event = int_field(env, message, ids.message.what)?;
    // The source match and the payload read both need the environment;
    // they never run at the same time.
    let env = RefCell::new(env);
    dvr.dispatch_recorder_event(
        |recorder| recorder.ops().is(&env.borrow(), source),
        event,
        || recording_progress(&mut env.borrow_mut(), ids, message),
    )
}

fn notify_player_event(
    env: &mut JNIEnv<'_>,
    source: &JObject<'_>,
    message: &JObject<'_>,
) -> Result<()> {
    let dvr = crate::dvr()?;
    let ids = ids::ids()?;
    let event = int_field(env, message, ids.message.what)?;
    let env = RefCell::new(env);
    dvr.dispatch_player_event(
        |player| player.ops().is(&env.borrow(), source),
        event,
        || playback_progress(&mut env.borrow_mut(), ids, message),
    )
}

/// Typed reads of one Java object's fields.
trait FieldSource {
    fn int(&mut self, field: JFieldID) -> Result<i32>;
    fn long(&mut self, field: JFieldID) -> Result<i64>;
    fn double(&mut self, field: JFieldID) -> Result<f64>;
}

struct ObjectFields<'a, 'env, 'obj> {
    env: &'a mut JNIEnv<'env>,
    object: &'a JObject<'obj>,
}

impl FieldSource for ObjectFields<'_, '_, '_> {
    fn int(&mut self, field: JFieldID) -> Result<i32> {
        int_field(self.env, self.object, field)
    }

    fn long(&mut self, field: JFieldID) -> Result<i64> {
        long_field(self.env, self.object, field)
    }

    fn double(&mut self, field: JFieldID) -> Result<f64> {
        double_field(self.env, self.object, field)
    }
}

fn read_recording_progress(
    fields: &RecordingProgressIds,
    source: &mut impl FieldSource,
) -> Result<RecordingProgress> {
    Ok(RecordingProgress {
        duration: source.long(fields.duration)?,
        startTime: source.long(fields.start_time)?,
        endTime: source.long(fields.end_time)?,
        numberOfSegments: source.int(fields.number_of_segments)?,
        firstSegmentId: source.int(fields.first_segment_id)?,
        lastSegmentId: source.int(fields.last_segment_id)?,
        size: source.long(fields.size)?,
    })
}

fn read_playback_progress(
    fields: &PlaybackProgressIds,
    source: &mut impl FieldSource,
) -> Result<PlaybackProgress> {
    Ok(PlaybackProgress {
        sessionNumber: source.int(fields.session_number)?,
        state: source.int(fields.state)?,
        speed: source.double(fields.speed)?,
        currTime: source.long(fields.curr_time)?,
        startTime: source.long(fields.start_time)?,
        endTime: source.long(fields.end_time)?,
        duration: source.long(fields.duration)?,
        currSegmentId: source.int(fields.curr_segment_id)?,
        firstSegmentId: source.int(fields.first_segment_id)?,
        lastSegmentId: source.int(fields.last_segment_id)?,
        numberOfSegments: source.int(fields.number_of_segments)?,
    })
}

/// Reads `message.obj` as a `JDvrRecordingProgress`.
fn recording_progress(
    env: &mut JNIEnv<'_>,
    ids: &Ids,
    message: &JObject<'_>,
) -> Result<RecordingProgress> {
    let progress = object_field(env, message, ids.message.obj)?;
    if progress.is_null() {
        return Err(Error::NullPointer("JDvrRecordingProgress"));
    }
    let result = read_recording_progress(
        &ids.recording_progress,
        &mut ObjectFields {
            env: &mut *env,
            object: &progress,
        },
    );
    let _ = env.delete_local_ref(progress);
    result
}

/// Reads `message.obj` as a `JDvrPlaybackProgress`.
fn playback_progress(
    env: &mut JNIEnv<'_>,
    ids: &Ids,
    message: &JObject<'_>,
) -> Result<PlaybackProgress> {
    let progress = object_field(env, message, ids.message.obj)?;
    if progress.is_null() {
        return Err(Error::NullPointer("JDvrPlaybackProgress"));
    }
    let result = read_playback_progress(
        &ids.playback_progress,
        &mut ObjectFields {
            env: &mut *env,
            object: &progress,
        },
    );
    let _ = env.delete_local_ref(progress);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A progress object whose fields are addressed by the ids handed out
    /// while resolving, each one remembering its Java name and signature.
    struct JavaObject {
        fields: Vec<(&'static str, &'static str)>,
        values: &'static [(&'static str, i64)],
    }

    impl JavaObject {
        fn resolve<T>(
            values: &'static [(&'static str, i64)],
            resolve: impl FnOnce(&mut dyn FnMut(&'static str, &'static str) -> JFieldID) -> T,
        ) -> (T, Self) {
            let mut fields = Vec::new();
            let ids = resolve(&mut |name, sig| {
                fields.push((name, sig));
                unsafe { JFieldID::from_raw(fields.len() as jni::sys::jfieldID) }
            });
            (ids, Self { fields, values })
        }

        fn read(&self, field: JFieldID, sig: &str) -> Result<i64> {
            let (name, declared) = self.fields[field.into_raw() as usize - 1];
            if declared != sig {
                return Err(Error::java("GetField", format!("{name} is {declared}, read as {sig}")));
            }
            self.values
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| Error::java("GetField", format!("no value for {name}")))
        }
    }

    impl FieldSource for JavaObject {
        fn int(&mut self, field: JFieldID) -> Result<i32> {
            self.read(field, "I").map(|value| value as i32)
        }

        fn long(&mut self, field: JFieldID) -> Result<i64> {
            self.read(field, "J")
        }

        fn double(&mut self, field: JFieldID) -> Result<f64> {
            self.read(field, "D").map(|value| value as f64)
        }
    }

    #[test]
    fn recording_progress_fields_land_in_their_own_slots() {
        let (ids, mut object) = JavaObject::resolve(
            &[
                ("duration", 120_000),
                ("startTime", 1_000),
                ("endTime", 121_000),
                ("numberOfSegments", 6),
                ("firstSegmentId", 2),
                ("lastSegmentId", 7),
                ("size", 3 << 30),
            ],
            |field| RecordingProgressIds::resolve(field),
        );
        let progress = read_recording_progress(&ids, &mut object).unwrap();
        assert_eq!(
            progress,
            RecordingProgress {
                duration: 120_000,
                startTime: 1_000,
                endTime: 121_000,
                numberOfSegments: 6,
                firstSegmentId: 2,
                lastSegmentId: 7,
                size: 3 << 30,
            }
        );
    }

    #[test]
    fn playback_progress_fields_land_in_their_own_slots() {
        let (ids, mut object) = JavaObject::resolve(
            &[
                ("sessionNumber", 3),
                ("state", 4),
                ("speed", -8),
                ("currTime", 45_000),
                ("startTime", 5_000),
                ("endTime", 95_000),
                ("duration", 90_000),
                ("currSegmentId", 11),
                ("firstSegmentId", 10),
                ("lastSegmentId", 19),
                ("numberOfSegments", 10),
            ],
            |field| PlaybackProgressIds::resolve(field),
        );
        let progress = read_playback_progress(&ids, &mut object).unwrap();
        assert_eq!(
            progress,
            PlaybackProgress {
                sessionNumber: 3,
                state: 4,
                speed: -8.0,
                currTime: 45_000,
                startTime: 5_000,
                endTime: 95_000,
                duration: 90_000,
                currSegmentId: 11,
                firstSegmentId: 10,
                lastSegmentId: 19,
                numberOfSegments: 10,
            }
        );
    }

    #[test]
    fn missing_java_field_fails_the_read() {
        let (ids, mut object) = JavaObject::resolve(&[("duration", 1)], |field| {
            RecordingProgressIds::resolve(field)
        });
        assert!(matches!(
            read_recording_progress(&ids, &mut object),
            Err(Error::Java { .. })
        ));
    }
}
