//! Mapping host (Rust) types to Go symbols.
//!
//! Go's reflection-driven symbol lookup has no Rust equivalent, so the
//! mapping is an explicit table supplied by the caller: each registered
//! type records the Go module path and exported name it corresponds to.
//! Requesting a symbol ensures the import and returns the qualified name.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use crate::base::{Ident, Symbol};
use crate::error::{Error, Result};
use crate::unit::Imports;

/// Caller-supplied table mapping Rust types to Go `(module path, name)`
/// pairs.
#[derive(Debug, Clone, Default)]
pub struct HostTypeMap {
    entries: HashMap<TypeId, HostType>,
}

#[derive(Debug, Clone)]
struct HostType {
    path: String,
    name: String,
}

impl HostTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the Go symbol corresponding to `T`.
    pub fn register<T: 'static>(
        &mut self,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> &mut Self {
        self.entries.insert(
            TypeId::of::<T>(),
            HostType {
                path: path.into(),
                name: name.into(),
            },
        );
        self
    }

    /// Resolve the symbol for `T`, ensuring its import on the way.
    ///
    /// Fails with [`Error::UnmappedHostType`] when `T` was never
    /// registered.
    pub fn symbol_for<T: 'static>(&self, imports: &mut Imports) -> Result<Symbol> {
        let entry = self
            .entries
            .get(&TypeId::of::<T>())
            .ok_or(Error::UnmappedHostType {
                type_name: type_name::<T>(),
            })?;

        let package = imports.ensure("", &entry.path)?;
        Ok(Symbol::in_package(package, Ident::new(entry.name.clone())))
    }
}
