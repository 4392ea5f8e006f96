//! Render-to-string and render-to-file conveniences.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use crate::writer::Writer;

/// Render the content produced by `f` as a string.
///
/// The callback receives a fresh [`Writer`] over an in-memory buffer; its
/// error type is whatever the caller's render logic produces.
pub fn write_string<E, F>(indent_unit: &str, f: F) -> Result<String, E>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<(), E>,
{
    let mut w = Writer::new(Vec::new(), indent_unit);
    f(&mut w)?;

    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

/// Render the content produced by `f` into the file at `path`.
///
/// Ensures the parent directory exists, creates (or truncates) the file,
/// streams the callback's output through a buffered [`Writer`], and flushes
/// before returning.
pub fn write_file<E, F>(path: impl AsRef<Path>, indent_unit: &str, f: F) -> Result<(), E>
where
    E: From<io::Error>,
    F: FnOnce(&mut Writer<BufWriter<File>>) -> Result<(), E>,
{
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(E::from)?;
        }
    }

    let file = File::create(path).map_err(E::from)?;
    let mut w = Writer::new(BufWriter::new(file), indent_unit);

    f(&mut w)?;
    w.flush().map_err(E::from)
}
