// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! The bridge state: one backend and the three handle registries.
//!
//! This module provides [`Dvr`], which every C entry point goes through. It
//! validates handles, owns the wrappers, and routes events coming back from
//! the Java side to the right native callback.

use std::sync::Arc;

use jdvrlib_sys::{
    FileHandle, PlaybackProgress, PlayerEvent, PlayerHandle, PlayerInitParams, RecorderEvent,
    RecorderHandle, RecorderInitParams, RecordingProgress,
};
use tracing::{debug, trace};

use crate::{
    Backend, DvrFile, DvrPlayer, DvrRecorder, Error, FileSpec, HandleKind, Registry, Result,
    event::{into_event_data, player_event_name, recorder_event_name},
};

/// Turns the boolean a Java action returns into a result.
///
/// `true` means the action was accepted.
pub fn accepted(call: &'static str, result: Result<bool>) -> Result<()> {
    match result? {
        true => Ok(()),
        false => Err(Error::Rejected(call)),
    }
}

/// Bridge state shared by all entry points.
///
/// A handle handed out by one of the `create_*` methods stays valid until
/// the matching `destroy_*` call; afterwards every method given that handle
/// fails with [`Error::InvalidHandle`] and has no side effects.
///
/// `Dvr` is `Send + Sync`. Registry locks are never held while the backend
/// or a native callback runs, so callbacks may call back into the bridge,
/// including destroying their own handle.
///
/// # Examples
///
/// ```ignore
/// let dvr = Dvr::new(backend);
/// let file = dvr.create_file(FileSpec::Persistent {
///     path_prefix: "/data/rec/0001".into(),
///     trunc: true,
/// })?;
/// let duration = dvr.file(file)?.ops().duration()?;
/// dvr.destroy_file(file)?;
/// ```
pub struct Dvr<B: Backend> {
    backend: B,
    files: Registry<DvrFile<B::File>>,
    recorders: Registry<DvrRecorder<B::Recorder>>,
    players: Registry<DvrPlayer<B::Player>>,
}

impl<B: Backend> Dvr<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            files: Registry::new(HandleKind::File),
            recorders: Registry::new(HandleKind::Recorder),
            players: Registry::new(HandleKind::Player),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Opens a recording file and registers it.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the Java constructor threw. Nothing is
    /// registered in that case.
    pub fn create_file(&self, spec: FileSpec) -> Result<FileHandle> {
        let ops = self.backend.create_file(&spec)?;
        let handle = self.files.insert(DvrFile::new(ops, spec));
        debug!("created file handle {handle:p}");
        Ok(handle)
    }

    /// Looks up a registered file.
    pub fn file(&self, handle: FileHandle) -> Result<Arc<DvrFile<B::File>>> {
        self.files.get(handle)
    }

    /// Unregisters a file and releases its Java reference.
    ///
    /// The Java object is not closed; see [`crate::FileOps::close`].
    pub fn destroy_file(&self, handle: FileHandle) -> Result<()> {
        drop(self.files.remove(handle)?);
        debug!("destroyed file handle {handle:p}");
        Ok(())
    }

    /// Deletes every on-disk artifact of the recording at `path_prefix`.
    ///
    /// # Errors
    ///
    /// [`Error::Rejected`] if the Java side reports that nothing was deleted.
    pub fn delete_record(&self, path_prefix: &str) -> Result<()> {
        accepted("delete2", self.backend.delete_record(path_prefix))
    }

    pub fn record_duration(&self, path_prefix: &str) -> Result<i64> {
        self.backend.record_duration(path_prefix)
    }

    pub fn record_size(&self, path_prefix: &str) -> Result<i64> {
        self.backend.record_size(path_prefix)
    }

    /// Creates a recorder bound to a registered file.
    ///
    /// Validation happens in order: the file handle, then the callback. The
    /// backend is only asked to construct the recorder once both passed.
    ///
    /// # Arguments
    ///
    /// * `params` - Tuner and settings references are passed through to the
    ///   Java constructor untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHandle`] if `jdvrfile_handle` is not a live file
    /// - [`Error::NullCallback`] if no callback was given
    /// - the backend error if construction failed
    pub fn create_recorder(&self, params: &RecorderInitParams) -> Result<RecorderHandle> {
        let file = self.files.get(params.jdvrfile_handle)?;
        let callback = params.callback.ok_or(Error::NullCallback)?;
        let ops = self
            .backend
            .create_recorder(params.tuner, file.ops(), params.settings)?;
        let handle = self.recorders.insert(DvrRecorder::new(ops, callback));
        debug!(
            "created recorder handle {handle:p} on file {:?}",
            file.path_prefix()
        );
        Ok(handle)
    }

    pub fn recorder(&self, handle: RecorderHandle) -> Result<Arc<DvrRecorder<B::Recorder>>> {
        self.recorders.get(handle)
    }

    /// Unregisters a recorder. The recording itself is not stopped.
    pub fn destroy_recorder(&self, handle: RecorderHandle) -> Result<()> {
        drop(self.recorders.remove(handle)?);
        debug!("destroyed recorder handle {handle:p}");
        Ok(())
    }

    /// Creates a player bound to a registered file.
    ///
    /// Same validation order and errors as [`Dvr::create_recorder`].
    pub fn create_player(&self, params: &PlayerInitParams) -> Result<PlayerHandle> {
        let file = self.files.get(params.jdvrfile_handle)?;
        let callback = params.callback.ok_or(Error::NullCallback)?;
        let ops = self
            .backend
            .create_player(params.asplayer, file.ops(), params.settings)?;
        let handle = self.players.insert(DvrPlayer::new(ops, callback));
        debug!(
            "created player handle {handle:p} on file {:?}",
            file.path_prefix()
        );
        Ok(handle)
    }

    pub fn player(&self, handle: PlayerHandle) -> Result<Arc<DvrPlayer<B::Player>>> {
        self.players.get(handle)
    }

    /// Unregisters a player. Playback is not stopped.
    pub fn destroy_player(&self, handle: PlayerHandle) -> Result<()> {
        drop(self.players.remove(handle)?);
        debug!("destroyed player handle {handle:p}");
        Ok(())
    }

    /// Routes a recorder event to the callback of its wrapper.
    ///
    /// The wrapper is the first registered recorder for which `is_source`
    /// holds. For [`jdvrlib_sys::AM_DVR_RECORDER_EVENT_PROGRESS`] the payload
    /// is read with `progress` and passed as a heap allocation the callback
    /// owns; every other event carries a null pointer and `progress` is not
    /// called.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSource`] if no registered recorder matches
    /// - the error of `progress`; the callback is not invoked then
    pub fn dispatch_recorder_event(
        &self,
        is_source: impl FnMut(&DvrRecorder<B::Recorder>) -> bool,
        event: RecorderEvent,
        progress: impl FnOnce() -> Result<RecordingProgress>,
    ) -> Result<()> {
        let (handle, recorder) = self
            .recorders
            .find(is_source)
            .ok_or(Error::UnknownSource(HandleKind::Recorder))?;
        let data = if event == jdvrlib_sys::AM_DVR_RECORDER_EVENT_PROGRESS {
            let progress = progress()?;
            trace!("recorder {handle:p} progress {progress:?}");
            into_event_data(progress)
        } else {
            trace!("recorder {handle:p} event {}", recorder_event_name(event));
            std::ptr::null_mut()
        };
        unsafe { recorder.notify(handle, event, data) };
        Ok(())
    }

    /// Routes a player event to the callback of its wrapper.
    ///
    /// Works like [`Dvr::dispatch_recorder_event`], with
    /// [`jdvrlib_sys::AM_DVR_PLAYER_EVENT_PROGRESS`] as the payload event.
    pub fn dispatch_player_event(
        &self,
        is_source: impl FnMut(&DvrPlayer<B::Player>) -> bool,
        event: PlayerEvent,
        progress: impl FnOnce() -> Result<PlaybackProgress>,
    ) -> Result<()> {
        let (handle, player) = self
            .players
            .find(is_source)
            .ok_or(Error::UnknownSource(HandleKind::Player))?;
        let data = if event == jdvrlib_sys::AM_DVR_PLAYER_EVENT_PROGRESS {
            let progress = progress()?;
            trace!("player {handle:p} progress {progress:?}");
            into_event_data(progress)
        } else {
            trace!("player {handle:p} event {}", player_event_name(event));
            std::ptr::null_mut()
        };
        unsafe { player.notify(handle, event, data) };
        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn recorder_count(&self) -> usize {
        self.recorders.len()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
