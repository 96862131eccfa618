// SPDX-FileCopyrightText: 2025 Contributors to the JDvrLib native bridge project.
// SPDX-License-Identifier: Apache-2.0

//! Recording file wrapper.

use crate::{FileOps, FileSpec};

/// A registered recording file.
///
/// Owns the proxy to the Java `JDvrFile` for as long as the handle is
/// registered. Recorders and players created from it hold their own
/// reference on the Java side, so destroying the file handle does not stop
/// them.
pub struct DvrFile<F> {
    ops: F,
    spec: FileSpec,
}

impl<F: FileOps> DvrFile<F> {
    pub(crate) fn new(ops: F, spec: FileSpec) -> Self {
        Self { ops, spec }
    }

    pub fn ops(&self) -> &F {
        &self.ops
    }

    pub fn path_prefix(&self) -> &str {
        self.spec.path_prefix()
    }

    /// How the file was opened.
    pub fn spec(&self) -> &FileSpec {
        &self.spec
    }
}
