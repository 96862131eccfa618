// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Typed wrappers around the unchecked JNI calls.
//!
//! Method and field IDs come from [`crate::ids`] and already carry their
//! signature, so the unchecked variants are used throughout. A pending Java
//! exception is described and cleared before the error is returned, leaving
//! the thread usable for the next call.

use jdvrlib::{Error, Result};
use jni::{
    JNIEnv,
    objects::{GlobalRef, JFieldID, JMethodID, JObject, JString, JValueOwned},
    signature::{Primitive, ReturnType},
    sys::jvalue,
};
use tracing::warn;

/// Converts a `jni` error, clearing the pending exception if there is one.
pub(crate) fn check<T>(
    env: &mut JNIEnv<'_>,
    call: &'static str,
    result: jni::errors::Result<T>,
) -> Result<T> {
    result.map_err(|err| {
        if matches!(err, jni::errors::Error::JavaException) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        Error::java(call, err)
    })
}

/// Promotes a freshly constructed local reference to a global one.
///
/// A null object without a pending exception yields `None`; the wrapper is
/// still created but stays unbound.
pub(crate) fn into_global(
    env: &mut JNIEnv<'static>,
    call: &'static str,
    object: JObject<'static>,
) -> Result<Option<GlobalRef>> {
    if object.is_null() {
        warn!("{call} returned null");
        return Ok(None);
    }
    let global = env.new_global_ref(&object);
    let _ = env.delete_local_ref(object);
    check(env, call, global).map(Some)
}

/// Calls an instance method.
pub(crate) fn call(
    env: &mut JNIEnv<'static>,
    name: &'static str,
    object: &GlobalRef,
    method: JMethodID,
    ret: ReturnType,
    args: &[jvalue],
) -> Result<JValueOwned<'static>> {
    let result = unsafe { env.call_method_unchecked(object, method, ret, args) };
    check(env, name, result)
}

pub(crate) fn call_bool(
    env: &mut JNIEnv<'static>,
    name: &'static str,
    object: &GlobalRef,
    method: JMethodID,
    args: &[jvalue],
) -> Result<bool> {
    let value = call(env, name, object, method, ReturnType::Primitive(Primitive::Boolean), args)?;
    value.z().map_err(|err| Error::java(name, err))
}

pub(crate) fn call_int(
    env: &mut JNIEnv<'static>,
    name: &'static str,
    object: &GlobalRef,
    method: JMethodID,
) -> Result<i32> {
    let value = call(env, name, object, method, ReturnType::Primitive(Primitive::Int), &[])?;
    value.i().map_err(|err| Error::java(name, err))
}

pub(crate) fn call_long(
    env: &mut JNIEnv<'static>,
    name: &'static str,
    object: &GlobalRef,
    method: JMethodID,
) -> Result<i64> {
    let value = call(env, name, object, method, ReturnType::Primitive(Primitive::Long), &[])?;
    value.j().map_err(|err| Error::java(name, err))
}

/// Calls a method returning `String`. A null result reads as empty.
pub(crate) fn call_string(
    env: &mut JNIEnv<'static>,
    name: &'static str,
    object: &GlobalRef,
    method: JMethodID,
) -> Result<String> {
    let value = call(env, name, object, method, ReturnType::Object, &[])?;
    let object = value.l().map_err(|err| Error::java(name, err))?;
    if object.is_null() {
        return Ok(String::new());
    }
    let string = JString::from(object);
    let result = env.get_string(&string).map(String::from);
    let _ = env.delete_local_ref(string);
    check(env, name, result)
}

pub(crate) fn int_field(env: &mut JNIEnv<'_>, object: &JObject<'_>, field: JFieldID) -> Result<i32> {
    let result = unsafe {
        env.get_field_unchecked(object, field, ReturnType::Primitive(Primitive::Int))
    };
    check(env, "GetIntField", result)?
        .i()
        .map_err(|err| Error::java("GetIntField", err))
}

pub(crate) fn long_field(env: &mut JNIEnv<'_>, object: &JObject<'_>, field: JFieldID) -> Result<i64> {
    let result = unsafe {
        env.get_field_unchecked(object, field, ReturnType::Primitive(Primitive::Long))
    };
    check(env, "GetLongField", result)?
        .j()
        .map_err(|err| Error::java("GetLongField", err))
}

pub(crate) fn double_field(
    env: &mut JNIEnv<'_>,
    object: &JObject<'_>,
    field: JFieldID,
) -> Result<f64> {
    let result = unsafe {
        env.get_field_unchecked(object, field, ReturnType::Primitive(Primitive::Double))
    };
    check(env, "GetDoubleField", result)?
        .d()
        .map_err(|err| Error::java("GetDoubleField", err))
}

pub(crate) fn object_field<'local>(
    env: &mut JNIEnv<'local>,
    object: &JObject<'_>,
    field: JFieldID,
) -> Result<JObject<'local>> {
    let result = unsafe { env.get_field_unchecked(object, field, ReturnType::Object) };
    check(env, "GetObjectField", result)?
        .l()
        .map_err(|err| Error::java("GetObjectField", err))
}
