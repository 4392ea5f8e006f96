//! Indentation-aware streaming writer.

use std::io;

/// Streaming sink wrapper that turns write calls into correctly indented
/// text.
///
/// Indentation is materialized lazily: the writer tracks whether it sits at
/// the start of a line and emits the pending indentation immediately before
/// the first non-newline byte of that line. Blank lines therefore never
/// carry trailing whitespace.
///
/// The writer is scratch state for a single render pass; it is not meant to
/// be shared across threads or reused concurrently.
pub struct Writer<W: io::Write> {
    out: W,
    unit: String,
    depth: u16,
    at_line_start: bool,
}

/// One row of a column-aligned table.
///
/// The optional prefix is written verbatim before the columns and is forced
/// onto its own line; it is expected to be pre-rendered text such as
/// `//`-prefixed comment lines.
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub prefix: String,
    pub columns: Vec<String>,
}

impl TableRow {
    /// Create a row from its column strings.
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefix: String::new(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a prefix written on its own line before the columns.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append one column.
    pub fn push(&mut self, column: impl Into<String>) {
        self.columns.push(column.into());
    }
}

impl<W: io::Write> Writer<W> {
    /// Create a writer over `out` using `unit` as the indentation unit.
    ///
    /// An empty `unit` falls back to a single tab.
    pub fn new(out: W, unit: &str) -> Self {
        let unit = if unit.is_empty() { "\t" } else { unit };

        Self {
            out,
            unit: unit.to_string(),
            depth: 0,
            at_line_start: true,
        }
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a string, splitting on newline boundaries so that every line
    /// fragment is indented independently.
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        for (idx, frag) in s.split('\n').enumerate() {
            if idx > 0 {
                self.newline()?;
            }

            if !frag.is_empty() {
                self.ensure_indented()?;
                self.out.write_all(frag.as_bytes())?;
            }
        }

        Ok(())
    }

    /// Write a single character. `'\n'` only marks the line boundary; any
    /// other character materializes pending indentation first.
    pub fn write_char(&mut self, c: char) -> io::Result<()> {
        if c == '\n' {
            self.at_line_start = true;
        } else {
            self.ensure_indented()?;
        }

        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Terminate the current line.
    pub fn newline(&mut self) -> io::Result<()> {
        self.write_char('\n')
    }

    /// Write a single space.
    pub fn space(&mut self) -> io::Result<()> {
        self.write_char(' ')
    }

    /// Run `f` with the indentation depth increased by one.
    ///
    /// The previous depth is restored on every exit path, including when
    /// `f` returns an error.
    pub fn indent<E, F>(&mut self, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    /// Whether the writer sits at the start of a line (indentation pending).
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Render rows as a column-aligned table.
    ///
    /// Pass one computes the maximum width of every column index across all
    /// rows; pass two emits each row with its non-final columns right-padded
    /// to that width and separated by a single space. A row with a non-empty
    /// prefix writes the prefix first and forces the columns onto a fresh
    /// line.
    pub fn table(&mut self, rows: &[TableRow]) -> io::Result<()> {
        let mut widths: Vec<usize> = Vec::new();

        for row in rows {
            for (idx, col) in row.columns.iter().enumerate() {
                if idx < widths.len() {
                    widths[idx] = widths[idx].max(col.len());
                } else {
                    widths.push(col.len());
                }
            }
        }

        for row in rows {
            if !row.prefix.is_empty() {
                self.write_str(&row.prefix)?;

                if !self.at_line_start {
                    self.newline()?;
                }
            }

            let last = row.columns.len().saturating_sub(1);

            for (idx, col) in row.columns.iter().enumerate() {
                self.write_str(col)?;

                if idx < last {
                    for _ in col.len()..widths[idx] {
                        self.space()?;
                    }

                    self.space()?;
                }
            }

            self.newline()?;
        }

        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn ensure_indented(&mut self) -> io::Result<()> {
        if !self.at_line_start {
            return Ok(());
        }

        for _ in 0..self.depth {
            self.out.write_all(self.unit.as_bytes())?;
        }

        self.at_line_start = false;
        Ok(())
    }
}

impl<W: io::Write> io::Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (idx, frag) in buf.split(|b| *b == b'\n').enumerate() {
            if idx > 0 {
                self.newline()?;
            }

            if !frag.is_empty() {
                self.ensure_indented()?;
                self.out.write_all(frag)?;
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn render(f: impl FnOnce(&mut Writer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = Writer::new(Vec::new(), "\t");
        f(&mut w).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn test_indented_lines() {
        let out = render(|w| {
            w.write_str("a {")?;
            w.newline()?;
            w.indent(|w| {
                w.write_str("b")?;
                w.newline()
            })?;
            w.write_str("}")?;
            w.newline()
        });

        assert_eq!(out, "a {\n\tb\n}\n");
    }

    #[test]
    fn test_blank_lines_carry_no_indentation() {
        let out = render(|w| {
            w.indent(|w| {
                w.write_str("a\n\nb")?;
                w.newline()
            })
        });

        assert_eq!(out, "\ta\n\n\tb\n");
    }

    #[test]
    fn test_embedded_newlines_split_lines() {
        let out = render(|w| {
            w.indent(|w| w.write_str("a\nb\n"))
        });

        assert_eq!(out, "\ta\n\tb\n");
    }

    #[test]
    fn test_write_char_newline_defers_indent() {
        let out = render(|w| {
            w.indent(|w| {
                w.write_char('{')?;
                w.write_char('\n')?;
                w.write_char('}')?;
                w.newline()
            })
        });

        assert_eq!(out, "\t{\n\t}\n");
    }

    #[test]
    fn test_custom_indent_unit() {
        let mut w = Writer::new(Vec::new(), "  ");
        w.indent(|w| {
            w.write_str("x")?;
            w.newline()
        })
        .unwrap();

        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "  x\n");
    }

    #[test]
    fn test_empty_unit_falls_back_to_tab() {
        let mut w = Writer::new(Vec::new(), "");
        w.indent(|w| w.write_str("x")).unwrap();

        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "\tx");
    }

    #[test]
    fn test_io_write_impl_splits_lines() {
        let out = render(|w| {
            w.indent(|w| {
                write!(w, "x = {};\ny = {};", 1, 2)?;
                w.newline()
            })
        });

        assert_eq!(out, "\tx = 1;\n\ty = 2;\n");
    }

    #[test]
    fn test_indent_restores_depth_on_error() {
        let out = render(|w| {
            let res: Result<(), io::Error> = w.indent(|w| {
                w.write_str("in")?;
                w.newline()?;
                Err(io::Error::other("boom"))
            });
            assert!(res.is_err());

            w.write_str("out")?;
            w.newline()
        });

        assert_eq!(out, "\tin\nout\n");
    }

    #[test]
    fn test_table_pads_all_but_last_column() {
        let out = render(|w| {
            w.write_str("type MyStruct struct {")?;
            w.newline()?;
            w.indent(|w| {
                w.table(&[
                    TableRow::new(["Object"]),
                    TableRow::new(["ID", "ID", "`json:\"id\"`"]),
                    TableRow::new(["Name", "string", "`json:\"name\"`"]),
                ])
            })?;
            w.write_char('}')?;
            w.newline()
        });

        assert_eq!(
            out,
            "type MyStruct struct {\n\tObject\n\tID     ID     `json:\"id\"`\n\tName   string `json:\"name\"`\n}\n"
        );
    }

    #[test]
    fn test_table_prefix_forces_own_line() {
        let out = render(|w| {
            w.table(&[
                TableRow::new(["a", "1"]).with_prefix("// first\n"),
                TableRow::new(["bb", "2"]).with_prefix("// second"),
            ])
        });

        assert_eq!(out, "// first\na  1\n// second\nbb 2\n");
    }

    #[test]
    fn test_table_empty_row_emits_blank_line() {
        let out = render(|w| {
            w.table(&[
                TableRow::new(["a"]),
                TableRow::default(),
                TableRow::new(["b"]),
            ])
        });

        assert_eq!(out, "a\n\nb\n");
    }

    #[test]
    fn test_table_short_row_last_column_unpadded() {
        let out = render(|w| {
            w.table(&[
                TableRow::new(["x", "yyyy", "z"]),
                TableRow::new(["x"]),
            ])
        });

        // The lone column is the row's last and receives no padding.
        assert_eq!(out, "x yyyy z\nx\n");
    }
}
