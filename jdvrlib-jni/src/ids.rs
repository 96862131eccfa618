// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Java classes, method IDs and field IDs used by the bridge.
//!
//! Everything is resolved once, when the library is registered, and is
//! immutable afterwards. A missing class or member means the native library
//! and the Java library do not match; that is not recoverable and aborts the
//! process.

use std::sync::OnceLock;

use jdvrlib::{Error, Result};
use jni::{
    JNIEnv,
    objects::{GlobalRef, JClass, JFieldID, JMethodID, JStaticMethodID},
};
use tracing::{debug, error};

pub const FILE_CLASS: &str = "com/droidlogic/jdvrlib/JDvrFile";
pub const RECORDER_CLASS: &str = "com/droidlogic/jdvrlib/JDvrRecorder";
pub const PLAYER_CLASS: &str = "com/droidlogic/jdvrlib/JDvrPlayer";
pub const RECORDER_LISTENER_CLASS: &str = "com/droidlogic/jdvrlib/JNIJDvrRecorderListener";
pub const PLAYER_LISTENER_CLASS: &str = "com/droidlogic/jdvrlib/JNIJDvrPlayerListener";
pub const MESSAGE_CLASS: &str = "android/os/Message";
pub const RECORDING_PROGRESS_CLASS: &str =
    "com/droidlogic/jdvrlib/JDvrRecorder$JDvrRecordingProgress";
pub const PLAYBACK_PROGRESS_CLASS: &str = "com/droidlogic/jdvrlib/JDvrPlayer$JDvrPlaybackProgress";

pub const RECORDER_CTOR_SIG: &str = concat!(
    "(",
    "Landroid/media/tv/tuner/Tuner;",
    "Lcom/droidlogic/jdvrlib/JDvrFile;",
    "Lcom/droidlogic/jdvrlib/JDvrRecorderSettings;",
    "Ljava/util/concurrent/Executor;",
    "Lcom/droidlogic/jdvrlib/OnJDvrRecorderEventListener;",
    ")V"
);
pub const PLAYER_CTOR_SIG: &str = concat!(
    "(",
    "Lcom/amlogic/asplayer/api/ASPlayer;",
    "Lcom/droidlogic/jdvrlib/JDvrFile;",
    "Lcom/droidlogic/jdvrlib/JDvrPlayerSettings;",
    "Ljava/util/concurrent/Executor;",
    "Lcom/droidlogic/jdvrlib/OnJDvrPlayerEventListener;",
    ")V"
);

pub const NOTIFY_RECORDER_EVENT: &str = "native_notifyJDvrRecorderEvent";
pub const NOTIFY_RECORDER_EVENT_SIG: &str =
    "(Lcom/droidlogic/jdvrlib/JDvrRecorder;Landroid/os/Message;)V";
pub const NOTIFY_PLAYER_EVENT: &str = "native_notifyJDvrPlayerEvent";
pub const NOTIFY_PLAYER_EVENT_SIG: &str =
    "(Lcom/droidlogic/jdvrlib/JDvrPlayer;Landroid/os/Message;)V";

pub(crate) struct FileIds {
    pub class: GlobalRef,
    pub ctor_persistent: JMethodID,
    pub ctor_timeshift: JMethodID,
    pub ctor_existing: JMethodID,
    pub is_timeshift: JMethodID,
    pub duration: JMethodID,
    pub size: JMethodID,
    pub playing_time: JMethodID,
    pub start_time: JMethodID,
    pub segment_id_being_read: JMethodID,
    pub first_segment_id: JMethodID,
    pub last_segment_id: JMethodID,
    pub number_of_segments: JMethodID,
    pub video_pid: JMethodID,
    pub video_format: JMethodID,
    pub video_mime_type: JMethodID,
    pub audio_pid: JMethodID,
    pub audio_format: JMethodID,
    pub audio_mime_type: JMethodID,
    pub close: JMethodID,
    pub delete2: JStaticMethodID,
    pub duration2: JStaticMethodID,
    pub size2: JStaticMethodID,
}

pub(crate) struct RecorderIds {
    pub class: GlobalRef,
    pub ctor: JMethodID,
    pub add_stream: JMethodID,
    pub remove_stream: JMethodID,
    pub start: JMethodID,
    pub pause: JMethodID,
    pub stop: JMethodID,
}

pub(crate) struct PlayerIds {
    pub class: GlobalRef,
    pub ctor: JMethodID,
    pub play: JMethodID,
    pub pause: JMethodID,
    pub stop: JMethodID,
    pub seek: JMethodID,
    pub set_speed: JMethodID,
}

/// `android.os.Message`; only `what` and `obj` carry information.
pub(crate) struct MessageIds {
    pub what: JFieldID,
    pub obj: JFieldID,
}

pub(crate) struct RecordingProgressIds {
    pub duration: JFieldID,
    pub start_time: JFieldID,
    pub end_time: JFieldID,
    pub number_of_segments: JFieldID,
    pub first_segment_id: JFieldID,
    pub last_segment_id: JFieldID,
    pub size: JFieldID,
}

pub(crate) struct PlaybackProgressIds {
    pub session_number: JFieldID,
    pub state: JFieldID,
    pub speed: JFieldID,
    pub curr_time: JFieldID,
    pub start_time: JFieldID,
    pub end_time: JFieldID,
    pub duration: JFieldID,
    pub curr_segment_id: JFieldID,
    pub first_segment_id: JFieldID,
    pub last_segment_id: JFieldID,
    pub number_of_segments: JFieldID,
}

impl RecordingProgressIds {
    /// Looks every field up by its Java name and signature.
    pub(crate) fn resolve(mut field: impl FnMut(&'static str, &'static str) -> JFieldID) -> Self {
        Self {
            duration: field("duration", "J"),
            start_time: field("startTime", "J"),
            end_time: field("endTime", "J"),
            number_of_segments: field("numberOfSegments", "I"),
            first_segment_id: field("firstSegmentId", "I"),
            last_segment_id: field("lastSegmentId", "I"),
            size: field("size", "J"),
        }
    }
}

impl PlaybackProgressIds {
    pub(crate) fn resolve(mut field: impl FnMut(&'static str, &'static str) -> JFieldID) -> Self {
        Self {
            session_number: field("sessionNumber", "I"),
            state: field("state", "I"),
            speed: field("speed", "D"),
            curr_time: field("currTime", "J"),
            start_time: field("startTime", "J"),
            end_time: field("endTime", "J"),
            duration: field("duration", "J"),
            curr_segment_id: field("currSegmentId", "I"),
            first_segment_id: field("firstSegmentId", "I"),
            last_segment_id: field("lastSegmentId", "I"),
            number_of_segments: field("numberOfSegments", "I"),
        }
    }
}

pub(crate) struct Ids {
    pub file: FileIds,
    pub recorder: RecorderIds,
    pub player: PlayerIds,
    pub message: MessageIds,
    pub recording_progress: RecordingProgressIds,
    pub playback_progress: PlaybackProgressIds,
}

static IDS: OnceLock<Ids> = OnceLock::new();

/// The resolved table, or [`Error::NotInitialized`] before registration.
pub(crate) fn ids() -> Result<&'static Ids> {
    IDS.get().ok_or(Error::NotInitialized)
}

/// Resolves the table on first use. Concurrent first callers wait for the
/// one doing the work.
pub(crate) fn init(env: &mut JNIEnv<'static>) -> &'static Ids {
    IDS.get_or_init(|| {
        let ids = Resolver { env }.resolve();
        debug!("resolved java class and member ids");
        ids
    })
}

/// Borrows a cached class reference as a class.
pub(crate) fn as_class(global: &GlobalRef) -> &JClass<'static> {
    global.as_obj().into()
}

fn or_die<T>(kind: &str, name: &str, result: jni::errors::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!("failed to resolve {kind} {name}: {err}");
            std::process::abort()
        }
    }
}

struct Resolver<'a> {
    env: &'a mut JNIEnv<'static>,
}

impl Resolver<'_> {
    fn class(&mut self, name: &str) -> GlobalRef {
        let local = or_die("class", name, self.env.find_class(name));
        let global = or_die("class", name, self.env.new_global_ref(&local));
        let _ = self.env.delete_local_ref(local);
        global
    }

    fn method(&mut self, class: &GlobalRef, name: &str, sig: &str) -> JMethodID {
        or_die("method", name, self.env.get_method_id(as_class(class), name, sig))
    }

    fn static_method(&mut self, class: &GlobalRef, name: &str, sig: &str) -> JStaticMethodID {
        or_die(
            "static method",
            name,
            self.env.get_static_method_id(as_class(class), name, sig),
        )
    }

    fn field(&mut self, class: &GlobalRef, name: &str, sig: &str) -> JFieldID {
        or_die("field", name, self.env.get_field_id(as_class(class), name, sig))
    }

    fn resolve(mut self) -> Ids {
        Ids {
            file: self.file(),
            recorder: self.recorder(),
            player: self.player(),
            message: self.message(),
            recording_progress: self.recording_progress(),
            playback_progress: self.playback_progress(),
        }
    }

    fn file(&mut self) -> FileIds {
        let class = self.class(FILE_CLASS);
        FileIds {
            ctor_persistent: self.method(&class, "<init>", "(Ljava/lang/String;Z)V"),
            ctor_timeshift: self.method(&class, "<init>", "(Ljava/lang/String;JIZ)V"),
            ctor_existing: self.method(&class, "<init>", "(Ljava/lang/String;)V"),
            is_timeshift: self.method(&class, "isTimeshift", "()Z"),
            duration: self.method(&class, "duration", "()J"),
            size: self.method(&class, "size", "()J"),
            playing_time: self.method(&class, "getPlayingTime", "()J"),
            start_time: self.method(&class, "getStartTime", "()J"),
            segment_id_being_read: self.method(&class, "getSegmentIdBeingRead", "()I"),
            first_segment_id: self.method(&class, "getFirstSegmentId", "()I"),
            last_segment_id: self.method(&class, "getLastSegmentId", "()I"),
            number_of_segments: self.method(&class, "getNumberOfSegments", "()I"),
            video_pid: self.method(&class, "getVideoPID", "()I"),
            video_format: self.method(&class, "getVideoFormat", "()I"),
            video_mime_type: self.method(&class, "getVideoMIMEType", "()Ljava/lang/String;"),
            audio_pid: self.method(&class, "getAudioPID", "()I"),
            audio_format: self.method(&class, "getAudioFormat", "()I"),
            audio_mime_type: self.method(&class, "getAudioMIMEType", "()Ljava/lang/String;"),
            close: self.method(&class, "close", "()V"),
            delete2: self.static_method(&class, "delete2", "(Ljava/lang/String;)Z"),
            duration2: self.static_method(&class, "duration2", "(Ljava/lang/String;)J"),
            size2: self.static_method(&class, "size2", "(Ljava/lang/String;)J"),
            class,
        }
    }

    fn recorder(&mut self) -> RecorderIds {
        let class = self.class(RECORDER_CLASS);
        RecorderIds {
            ctor: self.method(&class, "<init>", RECORDER_CTOR_SIG),
            add_stream: self.method(&class, "addStream", "(III)Z"),
            remove_stream: self.method(&class, "removeStream", "(I)Z"),
            start: self.method(&class, "start", "()Z"),
            pause: self.method(&class, "pause", "()Z"),
            stop: self.method(&class, "stop", "()Z"),
            class,
        }
    }

    fn player(&mut self) -> PlayerIds {
        let class = self.class(PLAYER_CLASS);
        PlayerIds {
            ctor: self.method(&class, "<init>", PLAYER_CTOR_SIG),
            play: self.method(&class, "play", "()Z"),
            pause: self.method(&class, "pause", "()Z"),
            stop: self.method(&class, "stop", "()Z"),
            seek: self.method(&class, "seek", "(I)Z"),
            set_speed: self.method(&class, "setSpeed", "(D)Z"),
            class,
        }
    }

    fn message(&mut self) -> MessageIds {
        let class = self.class(MESSAGE_CLASS);
        MessageIds {
            what: self.field(&class, "what", "I"),
            obj: self.field(&class, "obj", "Ljava/lang/Object;"),
        }
    }

    fn recording_progress(&mut self) -> RecordingProgressIds {
        let class = self.class(RECORDING_PROGRESS_CLASS);
        RecordingProgressIds::resolve(|name, sig| self.field(&class, name, sig))
    }

    fn playback_progress(&mut self) -> PlaybackProgressIds {
        let class = self.class(PLAYBACK_PROGRESS_CLASS);
        PlaybackProgressIds::resolve(|name, sig| self.field(&class, name, sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_fail_before_registration() {
        assert!(matches!(ids(), Err(Error::NotInitialized)));
    }

    #[test]
    fn constructor_signatures_take_executor_and_listener() {
        for sig in [RECORDER_CTOR_SIG, PLAYER_CTOR_SIG] {
            assert!(sig.starts_with('(') && sig.ends_with(")V"));
            assert_eq!(sig.matches(';').count(), 5);
            assert!(sig.contains("Ljava/util/concurrent/Executor;"));
        }
        assert!(PLAYER_CTOR_SIG.starts_with("(Lcom/amlogic/asplayer/api/ASPlayer;"));
        assert!(RECORDER_CTOR_SIG.starts_with("(Landroid/media/tv/tuner/Tuner;"));
    }
}
