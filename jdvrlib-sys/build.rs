// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Build script for the `jdvrlib-sys` crate.
//!
//! Publishes the location of the public C header to dependent crates
//! (`DEP_JDVRLIB_INCLUDE`) so packaging steps can ship it next to the
//! shared library.

use std::env;
use std::path::PathBuf;

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("failed to get current directory"));
    let include_dir = manifest_dir.join("include");

    println!("cargo:rerun-if-changed={}", include_dir.display());
    println!("cargo:include={}", include_dir.display());
}
