// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Access to the VM from arbitrary native threads.

use std::sync::OnceLock;

use jdvrlib::{Error, Result};
use jni::{JNIEnv, JavaVM};
use tracing::debug;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// Remembers the VM the library was loaded into. Later calls are ignored;
/// a process hosts at most one VM.
pub(crate) fn set_vm(vm: JavaVM) {
    if JAVA_VM.set(vm).is_err() {
        debug!("java vm already set");
    }
}

pub(crate) fn vm() -> Result<&'static JavaVM> {
    JAVA_VM.get().ok_or(Error::NotInitialized)
}

/// Returns the environment of the calling thread, attaching it first if
/// needed.
///
/// Threads attached here stay attached for their remaining lifetime and are
/// detached by the `jni` crate when they exit, so worker threads calling into
/// the bridge repeatedly pay for the attachment once.
pub(crate) fn env() -> Result<JNIEnv<'static>> {
    let vm = vm()?;
    match vm.get_env() {
        Ok(env) => Ok(env),
        Err(_) => {
            debug!("attaching current thread to the java vm");
            vm.attach_current_thread_permanently()
                .map_err(|err| Error::EnvUnavailable(err.to_string()))
        }
    }
}
