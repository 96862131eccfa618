// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! [`jdvrlib::Backend`] over the Java DVR library.
//!
//! Each proxy owns one global reference to its Java object. The reference is
//! released when the proxy is dropped, i.e. when the last user of a destroyed
//! handle lets go of it.

use jdvrlib::{Backend, Error, FileOps, FileSpec, PlayerOps, RecorderOps, Result};
use jdvrlib_sys::jobject;
use jni::{
    JNIEnv,
    objects::{GlobalRef, JMethodID, JObject, JValue},
    signature::{Primitive, ReturnType},
    sys::jvalue,
};
use tracing::debug;

use crate::{
    ids::{self, FileIds, PlayerIds, RecorderIds, as_class},
    java, loader,
};

fn object(global: &Option<GlobalRef>) -> Result<&GlobalRef> {
    global.as_ref().ok_or(Error::Unbound)
}

/// Whether `global` refers to the same Java object as `other`.
fn same_object(env: &JNIEnv<'_>, global: &Option<GlobalRef>, other: &JObject<'_>) -> bool {
    global
        .as_ref()
        .is_some_and(|global| env.is_same_object(global, other).unwrap_or(false))
}

/// Proxy for a `JDvrFile`.
pub struct JavaFile {
    object: Option<GlobalRef>,
}

impl JavaFile {
    pub(crate) fn unbound() -> Self {
        Self { object: None }
    }

    pub fn is_bound(&self) -> bool {
        self.object.is_some()
    }

    fn int(&self, name: &'static str, method: fn(&FileIds) -> JMethodID) -> Result<i32> {
        let object = object(&self.object)?;
        let method = method(&ids::ids()?.file);
        java::call_int(&mut loader::env()?, name, object, method)
    }

    fn long(&self, name: &'static str, method: fn(&FileIds) -> JMethodID) -> Result<i64> {
        let object = object(&self.object)?;
        let method = method(&ids::ids()?.file);
        java::call_long(&mut loader::env()?, name, object, method)
    }

    fn string(&self, name: &'static str, method: fn(&FileIds) -> JMethodID) -> Result<String> {
        let object = object(&self.object)?;
        let method = method(&ids::ids()?.file);
        java::call_string(&mut loader::env()?, name, object, method)
    }
}

impl FileOps for JavaFile {
    fn is_timeshift(&self) -> Result<bool> {
        let object = object(&self.object)?;
        let method = ids::ids()?.file.is_timeshift;
        java::call_bool(&mut loader::env()?, "isTimeshift", object, method, &[])
    }

    fn duration(&self) -> Result<i64> {
        if !self.is_bound() {
            return Ok(0);
        }
        self.long("duration", |ids| ids.duration)
    }

    fn size(&self) -> Result<i64> {
        if !self.is_bound() {
            return Ok(0);
        }
        self.long("size", |ids| ids.size)
    }

    fn playing_time(&self) -> Result<i64> {
        self.long("getPlayingTime", |ids| ids.playing_time)
    }

    fn start_time(&self) -> Result<i64> {
        self.long("getStartTime", |ids| ids.start_time)
    }

    fn segment_id_being_read(&self) -> Result<i32> {
        self.int("getSegmentIdBeingRead", |ids| ids.segment_id_being_read)
    }

    fn first_segment_id(&self) -> Result<i32> {
        self.int("getFirstSegmentId", |ids| ids.first_segment_id)
    }

    fn last_segment_id(&self) -> Result<i32> {
        self.int("getLastSegmentId", |ids| ids.last_segment_id)
    }

    fn number_of_segments(&self) -> Result<i32> {
        self.int("getNumberOfSegments", |ids| ids.number_of_segments)
    }

    fn video_pid(&self) -> Result<i32> {
        self.int("getVideoPID", |ids| ids.video_pid)
    }

    fn video_format(&self) -> Result<i32> {
        self.int("getVideoFormat", |ids| ids.video_format)
    }

    fn video_mime_type(&self) -> Result<String> {
        self.string("getVideoMIMEType", |ids| ids.video_mime_type)
    }

    fn audio_pid(&self) -> Result<i32> {
        self.int("getAudioPID", |ids| ids.audio_pid)
    }

    fn audio_format(&self) -> Result<i32> {
        self.int("getAudioFormat", |ids| ids.audio_format)
    }

    fn audio_mime_type(&self) -> Result<String> {
        self.string("getAudioMIMEType", |ids| ids.audio_mime_type)
    }

    fn close(&self) -> Result<()> {
        let object = object(&self.object)?;
        let method = ids::ids()?.file.close;
        let value = java::call(
            &mut loader::env()?,
            "close",
            object,
            method,
            ReturnType::Primitive(Primitive::Void),
            &[],
        )?;
        value.v().map_err(|err| Error::java("close", err))
    }
}

/// Proxy for a `JDvrRecorder`.
pub struct JavaRecorder {
    object: Option<GlobalRef>,
}

impl JavaRecorder {
    /// Whether this proxy wraps `other`, the source of an event.
    pub fn is(&self, env: &JNIEnv<'_>, other: &JObject<'_>) -> bool {
        same_object(env, &self.object, other)
    }

    fn action(
        &self,
        name: &'static str,
        method: fn(&RecorderIds) -> JMethodID,
        args: &[jvalue],
    ) -> Result<bool> {
        let object = object(&self.object)?;
        let method = method(&ids::ids()?.recorder);
        java::call_bool(&mut loader::env()?, name, object, method, args)
    }
}

impl RecorderOps for JavaRecorder {
    fn add_stream(&self, pid: i32, stream_type: i32, format: i32) -> Result<bool> {
        let args = [
            JValue::Int(pid).as_jni(),
            JValue::Int(stream_type).as_jni(),
            JValue::Int(format).as_jni(),
        ];
        self.action("addStream", |ids| ids.add_stream, &args)
    }

    fn remove_stream(&self, pid: i32) -> Result<bool> {
        let args = [JValue::Int(pid).as_jni()];
        self.action("removeStream", |ids| ids.remove_stream, &args)
    }

    fn start(&self) -> Result<bool> {
        debug!("JDvrRecorder.start");
        self.action("start", |ids| ids.start, &[])
    }

    fn pause(&self) -> Result<bool> {
        debug!("JDvrRecorder.pause");
        self.action("pause", |ids| ids.pause, &[])
    }

    fn stop(&self) -> Result<bool> {
        debug!("JDvrRecorder.stop");
        self.action("stop", |ids| ids.stop, &[])
    }
}

/// Proxy for a `JDvrPlayer`.
pub struct JavaPlayer {
    object: Option<GlobalRef>,
}

impl JavaPlayer {
    /// Whether this proxy wraps `other`, the source of an event.
    pub fn is(&self, env: &JNIEnv<'_>, other: &JObject<'_>) -> bool {
        same_object(env, &self.object, other)
    }

    fn action(
        &self,
        name: &'static str,
        method: fn(&PlayerIds) -> JMethodID,
        args: &[jvalue],
    ) -> Result<bool> {
        let object = object(&self.object)?;
        let method = method(&ids::ids()?.player);
        java::call_bool(&mut loader::env()?, name, object, method, args)
    }
}

impl PlayerOps for JavaPlayer {
    fn play(&self) -> Result<bool> {
        debug!("JDvrPlayer.play");
        self.action("play", |ids| ids.play, &[])
    }

    fn pause(&self) -> Result<bool> {
        debug!("JDvrPlayer.pause");
        self.action("pause", |ids| ids.pause, &[])
    }

    fn stop(&self) -> Result<bool> {
        debug!("JDvrPlayer.stop");
        self.action("stop", |ids| ids.stop, &[])
    }

    fn seek(&self, seconds: i32) -> Result<bool> {
        let args = [JValue::Int(seconds).as_jni()];
        self.action("seek", |ids| ids.seek, &args)
    }

    /// Negative speeds mean reverse play and are passed on as they are.
    fn set_speed(&self, speed: f64) -> Result<bool> {
        let args = [JValue::Double(speed).as_jni()];
        self.action("setSpeed", |ids| ids.set_speed, &args)
    }
}

/// Runs a static `JDvrFile` helper taking the path prefix.
fn static_file_call(
    name: &'static str,
    method: jni::objects::JStaticMethodID,
    ret: Primitive,
    path_prefix: &str,
) -> Result<jni::objects::JValueOwned<'static>> {
    let ids = ids::ids()?;
    let mut env = loader::env()?;
    let path = env.new_string(path_prefix);
    let path = java::check(&mut env, "NewStringUTF", path)?;
    let args = [JValue::Object(&path).as_jni()];
    let result = unsafe {
        env.call_static_method_unchecked(
            as_class(&ids.file.class),
            method,
            ReturnType::Primitive(ret),
            &args,
        )
    };
    let _ = env.delete_local_ref(path);
    java::check(&mut env, name, result)
}

/// Passes a caller-owned reference straight through as a call argument.
fn passthrough(object: jobject) -> jvalue {
    jvalue { l: object }
}

fn null() -> jvalue {
    jvalue {
        l: std::ptr::null_mut(),
    }
}

/// The Java DVR library as seen through JNI.
///
/// Requires the id table to be resolved; every method fails with
/// [`Error::NotInitialized`] before that.
pub struct JniBackend;

impl Backend for JniBackend {
    type File = JavaFile;
    type Recorder = JavaRecorder;
    type Player = JavaPlayer;

    fn create_file(&self, spec: &FileSpec) -> Result<JavaFile> {
        let ids = ids::ids()?;
        let mut env = loader::env()?;
        debug!("JDvrFile.<init> {spec:?}");
        let path = env.new_string(spec.path_prefix());
        let path = java::check(&mut env, "NewStringUTF", path)?;
        let path_arg = JValue::Object(&path).as_jni();
        let (ctor, args) = match spec {
            FileSpec::Persistent { trunc, .. } => (
                ids.file.ctor_persistent,
                vec![path_arg, JValue::Bool(u8::from(*trunc)).as_jni()],
            ),
            FileSpec::Timeshift {
                limit_size,
                limit_seconds,
                trunc,
                ..
            } => (
                ids.file.ctor_timeshift,
                vec![
                    path_arg,
                    JValue::Long(*limit_size).as_jni(),
                    JValue::Int(*limit_seconds).as_jni(),
                    JValue::Bool(u8::from(*trunc)).as_jni(),
                ],
            ),
            FileSpec::Existing { .. } => (ids.file.ctor_existing, vec![path_arg]),
        };
        let object = unsafe { env.new_object_unchecked(as_class(&ids.file.class), ctor, &args) };
        let _ = env.delete_local_ref(path);
        let object = java::check(&mut env, "JDvrFile.<init>", object)?;
        Ok(JavaFile {
            object: java::into_global(&mut env, "JDvrFile.<init>", object)?,
        })
    }

    fn create_recorder(
        &self,
        tuner: jobject,
        file: &JavaFile,
        settings: jobject,
    ) -> Result<JavaRecorder> {
        let ids = ids::ids()?;
        let file = object(&file.object)?;
        let mut env = loader::env()?;
        debug!("JDvrRecorder.<init> tuner:{tuner:p}, settings:{settings:p}");
        // Executor and listener stay null so the recorder installs its
        // native-forwarding listener on its own executor.
        let args = [
            passthrough(tuner),
            passthrough(file.as_obj().as_raw()),
            passthrough(settings),
            null(),
            null(),
        ];
        let object = unsafe {
            env.new_object_unchecked(as_class(&ids.recorder.class), ids.recorder.ctor, &args)
        };
        let object = java::check(&mut env, "JDvrRecorder.<init>", object)?;
        Ok(JavaRecorder {
            object: java::into_global(&mut env, "JDvrRecorder.<init>", object)?,
        })
    }

    fn create_player(
        &self,
        asplayer: jobject,
        file: &JavaFile,
        settings: jobject,
    ) -> Result<JavaPlayer> {
        let ids = ids::ids()?;
        let file = object(&file.object)?;
        let mut env = loader::env()?;
        debug!("JDvrPlayer.<init> asplayer:{asplayer:p}, settings:{settings:p}");
        let args = [
            passthrough(asplayer),
            passthrough(file.as_obj().as_raw()),
            passthrough(settings),
            null(),
            null(),
        ];
        let object = unsafe {
            env.new_object_unchecked(as_class(&ids.player.class), ids.player.ctor, &args)
        };
        let object = java::check(&mut env, "JDvrPlayer.<init>", object)?;
        Ok(JavaPlayer {
            object: java::into_global(&mut env, "JDvrPlayer.<init>", object)?,
        })
    }

    fn delete_record(&self, path_prefix: &str) -> Result<bool> {
        let method = ids::ids()?.file.delete2;
        static_file_call("delete2", method, Primitive::Boolean, path_prefix)?
            .z()
            .map_err(|err| Error::java("delete2", err))
    }

    fn record_duration(&self, path_prefix: &str) -> Result<i64> {
        let method = ids::ids()?.file.duration2;
        static_file_call("duration2", method, Primitive::Long, path_prefix)?
            .j()
            .map_err(|err| Error::java("duration2", err))
    }

    fn record_size(&self, path_prefix: &str) -> Result<i64> {
        let method = ids::ids()?.file.size2;
        static_file_call("size2", method, Primitive::Long, path_prefix)?
            .j()
            .map_err(|err| Error::java("size2", err))
    }
}
