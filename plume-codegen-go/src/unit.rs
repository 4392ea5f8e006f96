//! Whole-document assembly: the import table and the `Unit` render
//! entrypoints.

use std::io;
use std::path::Path;

use indexmap::IndexMap;
use plume_codegen::Writer;

use crate::base::{Comment, PkgName, PkgRef};
use crate::decl::Decl;
use crate::error::{Error, Result};

/// One source document: header comment, package clause, import table, and
/// the ordered declaration groups.
///
/// A unit is built completely, then rendered exactly once per sink; the
/// writer state is scratch for that single pass.
#[derive(Debug, Clone, Default)]
pub struct Unit {
    pub prefix: Comment,
    pub package: PkgName,
    pub imports: Imports,
    pub decls: Vec<Decl>,
}

/// The import table, partitioned into the platform group (standard library
/// style paths) and the external group.
///
/// Classification is structural: a path whose first component carries no
/// dot is a platform import. Both groups preserve registration order.
#[derive(Debug, Clone, Default)]
pub struct Imports {
    platform: IndexMap<String, PkgName>,
    external: IndexMap<String, PkgName>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an import and return its reference.
    ///
    /// An empty `alias` derives the alias from the last path segment.
    /// Re-registering the same path with the same alias is a no-op; with a
    /// different alias it is a conflict, unless the existing alias is the
    /// placeholder `_`, which upgrades in place. Forcing one alias onto two
    /// distinct paths within a group is a conflict as well (the placeholder
    /// may repeat).
    pub fn ensure(&mut self, alias: &str, path: &str) -> Result<PkgRef> {
        if path.is_empty() {
            return Err(Error::MissingNode("import path must not be empty"));
        }

        let alias = if alias.is_empty() {
            PkgName::new(path.rsplit_once('/').map_or(path, |(_, last)| last))
        } else {
            PkgName::new(alias)
        };

        alias.check()?;

        let group = if is_platform_import(path) {
            &mut self.platform
        } else {
            &mut self.external
        };

        if let Some(existing) = group.get_mut(path) {
            if *existing == alias {
                return Ok(PkgRef::new(alias, path));
            }

            if existing.is_ignore() {
                *existing = alias.clone();
                return Ok(PkgRef::new(alias, path));
            }

            return Err(Error::ImportAliasConflict {
                alias: alias.as_str().to_string(),
                path: path.to_string(),
            });
        }

        if !alias.is_ignore() {
            if let Some((taken, _)) = group.iter().find(|(p, a)| **a == alias && p.as_str() != path) {
                return Err(Error::ImportAliasConflict {
                    alias: alias.as_str().to_string(),
                    path: taken.clone(),
                });
            }
        }

        group.insert(path.to_string(), alias.clone());
        Ok(PkgRef::new(alias, path))
    }

    /// The registered alias for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&PkgName> {
        self.platform.get(path).or_else(|| self.external.get(path))
    }

    pub fn len(&self) -> usize {
        self.platform.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platform.is_empty() && self.external.is_empty()
    }

    fn refs(group: &IndexMap<String, PkgName>) -> impl Iterator<Item = PkgRef> + '_ {
        group
            .iter()
            .map(|(path, alias)| PkgRef::new(alias.clone(), path.clone()))
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        match self.len() {
            0 => Ok(()),
            1 => {
                let item = Self::refs(&self.platform)
                    .chain(Self::refs(&self.external))
                    .next();

                w.newline()?;
                w.write_str("import ")?;

                if let Some(item) = item {
                    item.write(w)?;
                }

                w.newline()?;
                Ok(())
            }
            _ => {
                w.newline()?;
                w.write_str("import (")?;
                w.newline()?;
                w.indent(|w| -> Result<()> {
                    for item in Self::refs(&self.platform) {
                        item.write(w)?;
                        w.newline()?;
                    }

                    if !self.platform.is_empty() && !self.external.is_empty() {
                        w.newline()?;
                    }

                    for item in Self::refs(&self.external) {
                        item.write(w)?;
                        w.newline()?;
                    }

                    Ok(())
                })?;
                w.write_char(')')?;
                w.newline()?;
                Ok(())
            }
        }
    }
}

impl Unit {
    pub fn new(package: impl Into<PkgName>) -> Self {
        Self {
            prefix: Comment::default(),
            package: package.into(),
            imports: Imports::new(),
            decls: Vec::new(),
        }
    }

    /// Set the header comment emitted before the package clause.
    pub fn prefix(mut self, prefix: impl Into<Comment>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a declaration group.
    pub fn decl(&mut self, decl: impl Into<Decl>) -> &mut Self {
        self.decls.push(decl.into());
        self
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        self.prefix.write(w)?;

        if !self.prefix.is_empty() {
            w.newline()?;
        }

        w.write_str("package ")?;
        self.package.write(w)?;
        w.newline()?;

        self.imports.write(w)?;

        for decl in &self.decls {
            decl.write(w)?;
        }

        w.newline()?;
        Ok(())
    }

    /// Render the document into `sink`, using `indent_unit` for
    /// indentation (empty falls back to a tab).
    ///
    /// This is the single depth-first render pass: the first validation
    /// failure or sink error aborts it, and already flushed output stays in
    /// the sink.
    pub fn render<W: io::Write>(&self, sink: W, indent_unit: &str) -> Result<()> {
        let mut w = Writer::new(sink, indent_unit);
        self.write(&mut w)?;
        w.flush()?;
        Ok(())
    }

    /// Render the document to a string.
    pub fn render_to_string(&self, indent_unit: &str) -> Result<String> {
        plume_codegen::write_string(indent_unit, |w| self.write(w))
    }

    /// Render the document into the file at `path`, creating parent
    /// directories as needed.
    pub fn render_to_file(&self, path: impl AsRef<Path>, indent_unit: &str) -> Result<()> {
        plume_codegen::write_file(path, indent_unit, |w| self.write(w))
    }
}

fn is_platform_import(path: &str) -> bool {
    !path.split('/').next().unwrap_or(path).contains('.')
}
