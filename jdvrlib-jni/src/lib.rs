// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! # jdvrlib-jni: the `AmDvr_*` C ABI over JNI
//!
//! Built as `libjdvrlib_jni.so`. The library is either loaded by the Java
//! side (`System.loadLibrary`, which runs [`JNI_OnLoad`]) or linked into a
//! native process that hands over an environment with
//! [`AmDvr_registerJNI`]. Both paths store the VM, resolve the Java classes
//! and members once, and register the listener entry points.
//!
//! Class lookup uses the class loader of the calling thread, so
//! initialization has to happen on a thread that can see the application
//! classes. After that, every export may be called from any native thread.

use std::{
    ffi::c_void,
    sync::{Once, OnceLock},
};

use jdvrlib::{Config, Dvr, Error, Result};
use jdvrlib_sys::DvrResult;
use jni::{
    JNIEnv, JavaVM,
    sys::{JNI_ERR, JNI_VERSION_1_4, jint},
};
use tracing::{debug, info};

mod backend;
mod events;
mod exports;
mod ids;
mod java;
mod loader;

pub use backend::{JavaFile, JavaPlayer, JavaRecorder, JniBackend};
pub use exports::*;

static DVR: OnceLock<Dvr<JniBackend>> = OnceLock::new();
static LOGGING: Once = Once::new();

/// The bridge state, available once initialization has run.
pub(crate) fn dvr() -> Result<&'static Dvr<JniBackend>> {
    DVR.get().ok_or(Error::NotInitialized)
}

fn init_logging() {
    LOGGING.call_once(|| {
        Config::from_env().init_logging();
    });
}

/// Resolves the Java surface and creates the bridge state. Runs once; later
/// calls return immediately.
fn initialize(env: &mut JNIEnv<'static>) -> Result<()> {
    if loader::vm().is_err() {
        let vm = env
            .get_java_vm()
            .map_err(|err| Error::java("GetJavaVM", err))?;
        loader::set_vm(vm);
    }
    DVR.get_or_init(|| {
        ids::init(env);
        events::register(env);
        info!("jdvrlib bridge initialized");
        Dvr::new(JniBackend)
    });
    Ok(())
}

/// Called by the VM when the library is loaded from Java.
///
/// # Safety
///
/// `vm` must be the VM pointer handed over by `System.loadLibrary`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    init_logging();
    let vm = match unsafe { JavaVM::from_raw(vm) } {
        Ok(vm) => vm,
        Err(err) => {
            tracing::error!("JNI_OnLoad, invalid java vm: {err}");
            return JNI_ERR;
        }
    };
    loader::set_vm(vm);
    let result = loader::env().and_then(|mut env| {
        debug!("JNI_OnLoad, env:{:p}", env.get_raw());
        initialize(&mut env)
    });
    match Error::code(result, "JNI_OnLoad") {
        jdvrlib_sys::JDVRLIB_JNI_OK => JNI_VERSION_1_4,
        _ => JNI_ERR,
    }
}

/// Initializes the bridge from a native process.
///
/// Must be called before any other `AmDvr_*` function when the library was
/// not loaded through `System.loadLibrary`. Calling it again is harmless.
///
/// # Safety
///
/// `env` must be null or the valid environment of the calling thread.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn AmDvr_registerJNI(env: *mut jdvrlib_sys::JNIEnv) -> DvrResult {
    init_logging();
    let result = if env.is_null() {
        Err(Error::NullPointer("JNIEnv"))
    } else {
        unsafe { JNIEnv::from_raw(env) }
            .map_err(|err| Error::EnvUnavailable(err.to_string()))
            .and_then(|mut env| initialize(&mut env))
    };
    Error::code(result, "AmDvr_registerJNI")
}
