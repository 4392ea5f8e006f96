//! Identifiers, package names, comments, and qualified symbols.
//!
//! All name validation happens at render time, not at construction time:
//! models are plain values and only a render pass can reject them.

use std::borrow::Cow;
use std::io;

use plume_codegen::Writer;

use crate::error::{Error, Result};
use crate::ty::Type;

/// The 25 reserved Go keywords. None of them is a legal identifier.
const KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Whether `s` is a legal bare Go identifier (and not a keyword).
pub fn is_identifier(s: &str) -> bool {
    if s.is_empty() || is_keyword(s) {
        return false;
    }

    s.chars().enumerate().all(|(idx, c)| {
        if idx == 0 {
            c.is_alphabetic() || c == '_'
        } else {
            c.is_alphanumeric() || c == '_'
        }
    })
}

/// Whether `s` is a reserved Go keyword.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Whether `s` names an exported Go symbol (first character uppercase).
pub fn is_exported(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// A bare identifier, validated when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(Cow<'static, str>);

impl Default for Ident {
    fn default() -> Self {
        Ident(Cow::Borrowed(""))
    }
}

impl Ident {
    /// The blank identifier `_`.
    pub const IGNORE: Ident = Ident::from_static("_");

    pub const fn from_static(s: &'static str) -> Self {
        Ident(Cow::Borrowed(s))
    }

    pub fn new(s: impl Into<String>) -> Self {
        Ident(Cow::Owned(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_ignore(&self) -> bool {
        self.0 == "_"
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        if !is_identifier(&self.0) {
            return Err(Error::InvalidIdentifier {
                name: self.0.to_string(),
                context: "identifier",
            });
        }

        w.write_str(&self.0)?;
        Ok(())
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Ident::new(s)
    }
}

impl From<String> for Ident {
    fn from(s: String) -> Self {
        Ident::new(s)
    }
}

/// A package name or import alias: a lowercase identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PkgName(Cow<'static, str>);

impl Default for PkgName {
    fn default() -> Self {
        PkgName(Cow::Borrowed(""))
    }
}

impl PkgName {
    /// The blank import alias `_`, upgradable to a real alias later.
    pub const IGNORE: PkgName = PkgName::from_static("_");

    pub const fn from_static(s: &'static str) -> Self {
        PkgName(Cow::Borrowed(s))
    }

    pub fn new(s: impl Into<String>) -> Self {
        PkgName(Cow::Owned(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_ignore(&self) -> bool {
        self.0 == "_"
    }

    pub(crate) fn check(&self) -> Result<()> {
        if !is_identifier(&self.0) || *self.0 != self.0.to_lowercase() {
            return Err(Error::InvalidIdentifier {
                name: self.0.to_string(),
                context: "package name",
            });
        }

        Ok(())
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        self.check()?;
        w.write_str(&self.0)?;
        Ok(())
    }
}

impl From<&str> for PkgName {
    fn from(s: &str) -> Self {
        PkgName::new(s)
    }
}

impl From<String> for PkgName {
    fn from(s: String) -> Self {
        PkgName::new(s)
    }
}

/// A line comment, possibly spanning several lines.
///
/// Every line renders with a `//` prefix; the text is emitted verbatim after
/// it, so callers control the leading space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment(text.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render to a string, one `//` line per text line. Empty comments
    /// render to nothing.
    pub(crate) fn render(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(self.0.len() + 8);

        for line in self.0.split('\n') {
            out.push_str("//");
            out.push_str(line);
            out.push('\n');
        }

        out
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        w.write_str(&self.render())?;
        Ok(())
    }
}

impl From<&str> for Comment {
    fn from(s: &str) -> Self {
        Comment::new(s)
    }
}

impl From<String> for Comment {
    fn from(s: String) -> Self {
        Comment::new(s)
    }
}

/// A registered import: alias plus module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgRef {
    alias: PkgName,
    path: String,
}

impl PkgRef {
    pub(crate) fn new(alias: PkgName, path: impl Into<String>) -> Self {
        Self {
            alias,
            path: path.into(),
        }
    }

    pub fn alias(&self) -> &PkgName {
        &self.alias
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        self.alias.check()?;
        w.write_str(self.alias.as_str())?;
        w.space()?;
        w.write_str(&quote_string(&self.path))?;
        Ok(())
    }
}

/// A possibly package-qualified, possibly generic name.
///
/// Referencing a symbol through a package alias requires the name to be
/// exported; the check runs at render time.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub package: Option<PkgRef>,
    pub id: Ident,
    pub gen_args: Vec<Type>,
}

impl Symbol {
    /// A bare, unqualified symbol known at compile time (used for the
    /// built-in type constants).
    pub const fn global(id: &'static str) -> Self {
        Symbol {
            package: None,
            id: Ident::from_static(id),
            gen_args: Vec::new(),
        }
    }

    /// A bare, unqualified symbol.
    pub fn new(id: impl Into<Ident>) -> Self {
        Symbol {
            package: None,
            id: id.into(),
            gen_args: Vec::new(),
        }
    }

    /// A symbol qualified by an imported package.
    pub fn in_package(package: PkgRef, id: impl Into<Ident>) -> Self {
        Symbol {
            package: Some(package),
            id: id.into(),
            gen_args: Vec::new(),
        }
    }

    /// Attach generic arguments (`Name[T, U]`).
    pub fn with_gen_args(mut self, args: impl IntoIterator<Item = Type>) -> Self {
        self.gen_args = args.into_iter().collect();
        self
    }

    pub(crate) fn is_simple(&self) -> bool {
        self.gen_args.iter().all(Type::is_simple)
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        if let Some(pkg) = &self.package {
            pkg.alias().check()?;

            if !is_exported(self.id.as_str()) {
                return Err(Error::UnexportedSymbol {
                    id: self.id.as_str().to_string(),
                    alias: pkg.alias().as_str().to_string(),
                    path: pkg.path().to_string(),
                });
            }

            w.write_str(pkg.alias().as_str())?;
            w.write_char('.')?;
        }

        self.id.write(w)?;
        write_gen_args(w, &self.gen_args)
    }
}

pub(crate) fn write_gen_args<W: io::Write>(w: &mut Writer<W>, args: &[Type]) -> Result<()> {
    if args.is_empty() {
        return Ok(());
    }

    w.write_char('[')?;

    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            w.write_str(", ")?;
        }

        arg.write(w)?;
    }

    w.write_char(']')?;
    Ok(())
}

/// Render a writer callback to a string with the default indent unit.
pub(crate) fn render_string<F>(f: F) -> Result<String>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    plume_codegen::write_string("\t", f)
}

/// Quote `s` as a Go string literal.
pub(crate) fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    for c in s.chars() {
        push_escaped(&mut out, c, '"');
    }

    out.push('"');
    out
}

/// Quote `c` as a Go rune literal.
pub(crate) fn quote_char(c: char) -> String {
    let mut out = String::with_capacity(4);
    out.push('\'');
    push_escaped(&mut out, c, '\'');
    out.push('\'');
    out
}

fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\u{07}' => out.push_str("\\a"),
        '\u{08}' => out.push_str("\\b"),
        '\u{0c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{0b}' => out.push_str("\\v"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if (c as u32) < 0x20 || c == '\u{7f}' => {
            out.push_str("\\x");
            out.push_str(&format!("{:02x}", c as u32));
        }
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_"));
        assert!(is_identifier("fooBar2"));
        assert!(is_identifier("_private"));

        assert!(!is_identifier(""));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier("foo-bar"));
        assert!(!is_identifier("foo bar"));
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        for kw in ["func", "type", "range", "fallthrough"] {
            assert!(is_keyword(kw));
            assert!(!is_identifier(kw));
        }
    }

    #[test]
    fn test_is_exported() {
        assert!(is_exported("Name"));
        assert!(!is_exported("name"));
        assert!(!is_exported("_"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_ident_write_rejects_invalid() {
        let res = render_string(|w| Ident::new("not valid").write(w));
        assert!(matches!(
            res,
            Err(Error::InvalidIdentifier { context: "identifier", .. })
        ));
    }

    #[test]
    fn test_pkg_name_must_be_lowercase() {
        assert!(PkgName::new("fmt").check().is_ok());
        assert!(PkgName::new("Fmt").check().is_err());
        assert!(PkgName::IGNORE.check().is_ok());
    }

    #[test]
    fn test_comment_render() {
        assert_eq!(Comment::new(" hi").render(), "// hi\n");
        assert_eq!(Comment::new("a\nb").render(), "//a\n//b\n");
        assert_eq!(Comment::default().render(), "");
    }

    #[test]
    fn test_symbol_unqualified() {
        let out = render_string(|w| Symbol::new("thing").write(w)).unwrap();
        assert_eq!(out, "thing");
    }

    #[test]
    fn test_symbol_qualified_requires_export() {
        let pkg = PkgRef::new(PkgName::new("fmt"), "fmt");

        let out = render_string(|w| Symbol::in_package(pkg.clone(), "Sprintf").write(w)).unwrap();
        assert_eq!(out, "fmt.Sprintf");

        let res = render_string(|w| Symbol::in_package(pkg, "sprintf").write(w));
        assert!(matches!(res, Err(Error::UnexportedSymbol { .. })));
    }

    #[test]
    fn test_symbol_gen_args() {
        use crate::ty;

        let sym = Symbol::new("Pair").with_gen_args([
            Type::from(ty::INT),
            Type::from(ty::STRING),
        ]);
        let out = render_string(|w| sym.write(w)).unwrap();
        assert_eq!(out, "Pair[int, string]");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("hi"), "\"hi\"");
        assert_eq!(quote_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote_string("line\nnext\t."), "\"line\\nnext\\t.\"");
        assert_eq!(quote_string("\u{1}"), "\"\\x01\"");
    }

    #[test]
    fn test_quote_char() {
        assert_eq!(quote_char('a'), "'a'");
        assert_eq!(quote_char('\''), "'\\''");
        assert_eq!(quote_char('\n'), "'\\n'");
        assert_eq!(quote_char('"'), "'\"'");
    }
}
