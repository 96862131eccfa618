// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! In-memory backend standing in for the Java library.
//!
//! Every constructed object gets a numeric id that plays the role of the
//! Java object identity when routing events.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU32, AtomicUsize, Ordering},
};

use jdvrlib::{Backend, Error, FileOps, FileSpec, PlayerOps, RecorderOps, Result};
use jdvrlib_sys::jobject;

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

pub fn init_logging() {
    LOG_ONCE.call_once(|| {
        jdvrlib::Config::default().init_logging();
    });
}

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

fn next_id() -> u32 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Recorded side effects, shared between the backend and its objects.
#[derive(Default)]
pub struct Journal {
    pub files_created: AtomicUsize,
    pub recorders_created: AtomicUsize,
    pub players_created: AtomicUsize,
    pub calls: Mutex<Vec<String>>,
}

impl Journal {
    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub struct MockFile {
    pub id: u32,
    /// `false` models a constructor that returned null without throwing.
    pub bound: bool,
    pub spec: FileSpec,
    pub duration: i64,
    pub size: i64,
    journal: Arc<Journal>,
}

impl MockFile {
    fn bound(&self) -> Result<()> {
        if self.bound { Ok(()) } else { Err(Error::Unbound) }
    }
}

impl FileOps for MockFile {
    fn is_timeshift(&self) -> Result<bool> {
        self.bound()?;
        Ok(matches!(self.spec, FileSpec::Timeshift { .. }))
    }

    fn duration(&self) -> Result<i64> {
        Ok(if self.bound { self.duration } else { 0 })
    }

    fn size(&self) -> Result<i64> {
        Ok(if self.bound { self.size } else { 0 })
    }

    fn playing_time(&self) -> Result<i64> {
        self.bound()?;
        Ok(1_500)
    }

    fn start_time(&self) -> Result<i64> {
        self.bound()?;
        Ok(0)
    }

    fn segment_id_being_read(&self) -> Result<i32> {
        self.bound()?;
        Ok(3)
    }

    fn first_segment_id(&self) -> Result<i32> {
        self.bound()?;
        Ok(2)
    }

    fn last_segment_id(&self) -> Result<i32> {
        self.bound()?;
        Ok(5)
    }

    fn number_of_segments(&self) -> Result<i32> {
        self.bound()?;
        Ok(4)
    }

    fn video_pid(&self) -> Result<i32> {
        self.bound()?;
        Ok(0x100)
    }

    fn video_format(&self) -> Result<i32> {
        self.bound()?;
        Ok(2)
    }

    fn video_mime_type(&self) -> Result<String> {
        self.bound()?;
        Ok("video/hevc".to_string())
    }

    fn audio_pid(&self) -> Result<i32> {
        self.bound()?;
        Ok(0x101)
    }

    fn audio_format(&self) -> Result<i32> {
        self.bound()?;
        Ok(3)
    }

    fn audio_mime_type(&self) -> Result<String> {
        self.bound()?;
        Ok("audio/mp4a-latm".to_string())
    }

    fn close(&self) -> Result<()> {
        self.bound()?;
        self.journal.log(format!("file {} close", self.id));
        Ok(())
    }
}

pub struct MockRecorder {
    pub id: u32,
    pub file_id: u32,
    journal: Arc<Journal>,
}

impl MockRecorder {
    fn act(&self, call: String) -> Result<bool> {
        self.journal.log(format!("recorder {} {call}", self.id));
        Ok(true)
    }
}

impl RecorderOps for MockRecorder {
    fn add_stream(&self, pid: i32, stream_type: i32, format: i32) -> Result<bool> {
        self.act(format!("addStream({pid},{stream_type},{format})"))
    }

    fn remove_stream(&self, pid: i32) -> Result<bool> {
        self.act(format!("removeStream({pid})"))
    }

    fn start(&self) -> Result<bool> {
        self.act("start".into())
    }

    fn pause(&self) -> Result<bool> {
        self.act("pause".into())
    }

    fn stop(&self) -> Result<bool> {
        self.act("stop".into())
    }
}

pub struct MockPlayer {
    pub id: u32,
    journal: Arc<Journal>,
}

impl MockPlayer {
    fn act(&self, call: String) -> Result<bool> {
        self.journal.log(format!("player {} {call}", self.id));
        Ok(true)
    }
}

impl PlayerOps for MockPlayer {
    fn play(&self) -> Result<bool> {
        self.act("play".into())
    }

    fn pause(&self) -> Result<bool> {
        self.act("pause".into())
    }

    fn stop(&self) -> Result<bool> {
        self.act("stop".into())
    }

    fn seek(&self, seconds: i32) -> Result<bool> {
        self.act(format!("seek({seconds})"))
    }

    fn set_speed(&self, speed: f64) -> Result<bool> {
        self.act(format!("setSpeed({speed})"))
    }
}

/// Knobs for the next constructions.
#[derive(Default)]
pub struct MockBackend {
    pub journal: Arc<Journal>,
    /// Makes every constructor throw.
    pub fail_construction: bool,
    /// Makes file constructors return null without throwing.
    pub unbound_files: bool,
    /// Prefixes `delete_record` reports as existing.
    pub existing_records: Mutex<Vec<String>>,
}

impl MockBackend {
    fn construct(&self, what: &'static str) -> Result<()> {
        if self.fail_construction {
            Err(Error::java(what, "java.lang.IllegalStateException"))
        } else {
            Ok(())
        }
    }
}

impl Backend for MockBackend {
    type File = MockFile;
    type Recorder = MockRecorder;
    type Player = MockPlayer;

    fn create_file(&self, spec: &FileSpec) -> Result<MockFile> {
        self.construct("JDvrFile.<init>")?;
        self.journal.files_created.fetch_add(1, Ordering::SeqCst);
        Ok(MockFile {
            id: next_id(),
            bound: !self.unbound_files,
            spec: spec.clone(),
            duration: 60_000,
            size: 4 * 1024 * 1024,
            journal: self.journal.clone(),
        })
    }

    fn create_recorder(
        &self,
        _tuner: jobject,
        file: &MockFile,
        _settings: jobject,
    ) -> Result<MockRecorder> {
        self.construct("JDvrRecorder.<init>")?;
        self.journal.recorders_created.fetch_add(1, Ordering::SeqCst);
        Ok(MockRecorder {
            id: next_id(),
            file_id: file.id,
            journal: self.journal.clone(),
        })
    }

    fn create_player(
        &self,
        _asplayer: jobject,
        _file: &MockFile,
        _settings: jobject,
    ) -> Result<MockPlayer> {
        self.construct("JDvrPlayer.<init>")?;
        self.journal.players_created.fetch_add(1, Ordering::SeqCst);
        Ok(MockPlayer {
            id: next_id(),
            journal: self.journal.clone(),
        })
    }

    fn delete_record(&self, path_prefix: &str) -> Result<bool> {
        let mut existing = self.existing_records.lock().unwrap();
        let before = existing.len();
        existing.retain(|prefix| prefix != path_prefix);
        Ok(existing.len() != before)
    }

    fn record_duration(&self, path_prefix: &str) -> Result<i64> {
        Ok(if path_prefix.is_empty() { 0 } else { 30_000 })
    }

    fn record_size(&self, path_prefix: &str) -> Result<i64> {
        Ok(if path_prefix.is_empty() { 0 } else { 188 * 1000 })
    }
}

pub fn persistent(path_prefix: &str) -> FileSpec {
    FileSpec::Persistent {
        path_prefix: path_prefix.to_string(),
        trunc: true,
    }
}
