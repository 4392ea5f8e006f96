//! The Go type model: symbol references, pointers, slices, maps,
//! interfaces, and structs.

use std::io;

use plume_codegen::{TableRow, Writer};

use crate::base::{Symbol, render_string};
use crate::decl::{GenConstraint, Param, write_params, write_return_params};
use crate::error::{Error, Result};
use crate::expr::{Expr, write_expr};

pub const ANY: Symbol = Symbol::global("any");
pub const BOOL: Symbol = Symbol::global("bool");
pub const BYTE: Symbol = Symbol::global("byte");
pub const COMPARABLE: Symbol = Symbol::global("comparable");
pub const COMPLEX64: Symbol = Symbol::global("complex64");
pub const COMPLEX128: Symbol = Symbol::global("complex128");
pub const ERROR: Symbol = Symbol::global("error");
pub const FLOAT32: Symbol = Symbol::global("float32");
pub const FLOAT64: Symbol = Symbol::global("float64");
pub const INT: Symbol = Symbol::global("int");
pub const INT8: Symbol = Symbol::global("int8");
pub const INT16: Symbol = Symbol::global("int16");
pub const INT32: Symbol = Symbol::global("int32");
pub const INT64: Symbol = Symbol::global("int64");
pub const RUNE: Symbol = Symbol::global("rune");
pub const STRING: Symbol = Symbol::global("string");
pub const UINT: Symbol = Symbol::global("uint");
pub const UINT8: Symbol = Symbol::global("uint8");
pub const UINT16: Symbol = Symbol::global("uint16");
pub const UINT32: Symbol = Symbol::global("uint32");
pub const UINT64: Symbol = Symbol::global("uint64");
pub const UINTPTR: Symbol = Symbol::global("uintptr");

/// A Go type reference.
#[derive(Debug, Clone)]
pub enum Type {
    Symbol(Symbol),
    Ptr(PtrType),
    Slice(SliceType),
    Map(MapType),
    Interface(InterfaceType),
    Struct(StructType),
}

/// `*T`
#[derive(Debug, Clone, Default)]
pub struct PtrType {
    pub item: Option<Box<Type>>,
}

/// `[]T` or `[N]T` when a size expression is present.
#[derive(Debug, Clone, Default)]
pub struct SliceType {
    pub items: Option<Box<Type>>,
    pub size: Option<Box<Expr>>,
}

/// `map[K]V`
#[derive(Debug, Clone, Default)]
pub struct MapType {
    pub key: Option<Box<Type>>,
    pub value: Option<Box<Type>>,
}

/// `interface { ... }` — a constraint union and/or a method set.
#[derive(Debug, Clone, Default)]
pub struct InterfaceType {
    pub constraints: Vec<GenConstraint>,
    pub methods: Vec<InterfaceMethod>,
}

/// One method signature inside an interface.
#[derive(Debug, Clone)]
pub struct InterfaceMethod {
    pub id: crate::base::Ident,
    pub params: Vec<Param>,
    pub ret: Vec<Param>,
}

/// `struct { ... }` — embedded bases followed by named fields.
#[derive(Debug, Clone, Default)]
pub struct StructType {
    pub bases: Vec<Type>,
    pub fields: Vec<StructField>,
}

/// One named struct field with optional tags.
#[derive(Debug, Clone)]
pub struct StructField {
    pub comment: crate::base::Comment,
    pub id: crate::base::Ident,
    pub ty: Option<Type>,
    pub tags: Vec<Tag>,
}

/// One struct tag entry, rendered as `name:"value"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// The body of a type declaration: a definition (`type X T`) or an alias
/// (`type X = T`).
#[derive(Debug, Clone)]
pub enum TypeSpec {
    Define(Type),
    Alias(Option<Type>),
}

impl Type {
    pub fn ptr(item: impl Into<Type>) -> Type {
        Type::Ptr(PtrType {
            item: Some(Box::new(item.into())),
        })
    }

    pub fn slice(items: impl Into<Type>) -> Type {
        Type::Slice(SliceType {
            items: Some(Box::new(items.into())),
            size: None,
        })
    }

    pub fn array(size: impl Into<Expr>, items: impl Into<Type>) -> Type {
        Type::Slice(SliceType {
            items: Some(Box::new(items.into())),
            size: Some(Box::new(size.into())),
        })
    }

    pub fn map(key: impl Into<Type>, value: impl Into<Type>) -> Type {
        Type::Map(MapType {
            key: Some(Box::new(key.into())),
            value: Some(Box::new(value.into())),
        })
    }

    /// Whether this type can be rendered compactly on one line.
    pub fn is_simple(&self) -> bool {
        match self {
            Type::Symbol(s) => s.is_simple(),
            Type::Ptr(t) => opt_simple(&t.item),
            Type::Slice(t) => {
                t.size.as_deref().is_none_or(Expr::is_simple) && opt_simple(&t.items)
            }
            Type::Map(t) => opt_simple(&t.key) && opt_simple(&t.value),
            Type::Interface(t) => t.constraints.is_empty() && t.methods.is_empty(),
            Type::Struct(t) => t.bases.is_empty() && t.fields.is_empty(),
        }
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            Type::Symbol(s) => s.write(w),
            Type::Ptr(t) => {
                w.write_char('*')?;
                write_type(w, t.item.as_deref(), "pointer type requires an item type")
            }
            Type::Slice(t) => {
                w.write_char('[')?;
                write_expr(w, t.size.as_deref(), true, "")?;
                w.write_char(']')?;
                write_type(w, t.items.as_deref(), "slice type requires an item type")
            }
            Type::Map(t) => {
                w.write_str("map[")?;
                write_type(w, t.key.as_deref(), "map type requires a key type")?;
                w.write_char(']')?;
                write_type(w, t.value.as_deref(), "map type requires a value type")
            }
            Type::Interface(t) => t.write(w),
            Type::Struct(t) => t.write(w),
        }
    }
}

impl From<Symbol> for Type {
    fn from(s: Symbol) -> Self {
        Type::Symbol(s)
    }
}

impl InterfaceType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constraint(mut self, c: GenConstraint) -> Self {
        self.constraints.push(c);
        self
    }

    pub fn method(mut self, m: InterfaceMethod) -> Self {
        self.methods.push(m);
        self
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        w.write_str("interface {")?;

        if !self.constraints.is_empty() || !self.methods.is_empty() {
            w.newline()?;
            w.indent(|w| -> Result<()> {
                if !self.constraints.is_empty() {
                    for (idx, c) in self.constraints.iter().enumerate() {
                        if idx > 0 {
                            w.write_str(" | ")?;
                        }

                        c.write(w)?;
                    }

                    w.newline()?;

                    if !self.methods.is_empty() {
                        w.newline()?;
                    }
                }

                for m in &self.methods {
                    m.write(w)?;
                    w.newline()?;
                }

                Ok(())
            })?;
        }

        w.write_char('}')?;
        Ok(())
    }
}

impl InterfaceMethod {
    pub fn new(id: impl Into<crate::base::Ident>) -> Self {
        Self {
            id: id.into(),
            params: Vec::new(),
            ret: Vec::new(),
        }
    }

    pub fn param(mut self, p: Param) -> Self {
        self.params.push(p);
        self
    }

    pub fn returns(mut self, p: Param) -> Self {
        self.ret.push(p);
        self
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        self.id.write(w)?;
        write_params(w, &self.params)?;
        write_return_params(w, &self.ret)
    }
}

impl StructType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, t: impl Into<Type>) -> Self {
        self.bases.push(t.into());
        self
    }

    pub fn field(mut self, f: StructField) -> Self {
        self.fields.push(f);
        self
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        w.write_str("struct {")?;

        if !self.bases.is_empty() || !self.fields.is_empty() {
            let mut rows = Vec::with_capacity(self.bases.len() + self.fields.len() + 1);

            for base in &self.bases {
                rows.push(TableRow::new([render_string(|w| base.write(w))?]));
            }

            if !self.bases.is_empty() && !self.fields.is_empty() {
                rows.push(TableRow::default());
            }

            for fld in &self.fields {
                let mut row = TableRow::new([
                    render_string(|w| fld.id.write(w))?,
                    type_string(fld.ty.as_ref(), "struct field requires a type")?,
                ])
                .with_prefix(fld.comment.render());

                let tag = tags_string(&fld.tags)?;
                if !tag.is_empty() {
                    row.push(tag);
                }

                rows.push(row);
            }

            w.newline()?;
            w.indent(|w| w.table(&rows).map_err(Error::from))?;
        }

        w.write_char('}')?;
        Ok(())
    }
}

impl StructField {
    pub fn new(id: impl Into<crate::base::Ident>, ty: impl Into<Type>) -> Self {
        Self {
            comment: crate::base::Comment::default(),
            id: id.into(),
            ty: Some(ty.into()),
            tags: Vec::new(),
        }
    }

    pub fn comment(mut self, c: impl Into<crate::base::Comment>) -> Self {
        self.comment = c.into();
        self
    }

    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl TypeSpec {
    pub fn alias(target: impl Into<Type>) -> Self {
        TypeSpec::Alias(Some(target.into()))
    }

    pub fn is_simple(&self) -> bool {
        match self {
            TypeSpec::Define(t) => t.is_simple(),
            TypeSpec::Alias(t) => t.as_ref().is_none_or(Type::is_simple),
        }
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            TypeSpec::Define(t) => t.write(w),
            TypeSpec::Alias(t) => {
                w.write_str("= ")?;
                write_type(w, t.as_ref(), "type alias requires a target type")
            }
        }
    }
}

impl From<Type> for TypeSpec {
    fn from(t: Type) -> Self {
        TypeSpec::Define(t)
    }
}

impl From<Symbol> for TypeSpec {
    fn from(s: Symbol) -> Self {
        TypeSpec::Define(Type::Symbol(s))
    }
}

fn opt_simple(t: &Option<Box<Type>>) -> bool {
    t.as_deref().is_none_or(Type::is_simple)
}

/// Write an optional type, failing with `required` when it is absent.
/// An empty `required` message marks the type as genuinely optional.
pub(crate) fn write_type<W: io::Write>(
    w: &mut Writer<W>,
    ty: Option<&Type>,
    required: &'static str,
) -> Result<()> {
    match ty {
        Some(t) => t.write(w),
        None if required.is_empty() => Ok(()),
        None => Err(Error::MissingNode(required)),
    }
}

/// Render an optional type to a string, failing with `required` when absent.
pub(crate) fn type_string(ty: Option<&Type>, required: &'static str) -> Result<String> {
    render_string(|w| write_type(w, ty, required))
}

/// Render tags as a backtick-quoted, space-separated tag string.
fn tags_string(tags: &[Tag]) -> Result<String> {
    if tags.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::from("`");

    for (idx, tag) in tags.iter().enumerate() {
        if tag.name.is_empty() {
            return Err(Error::MissingNode("struct tag requires a name"));
        }

        if idx > 0 {
            out.push(' ');
        }

        out.push_str(&tag.name);
        out.push(':');
        out.push_str(&crate::base::quote_string(&tag.value));
    }

    out.push('`');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(t: &Type) -> String {
        render_string(|w| t.write(w)).unwrap()
    }

    #[test]
    fn test_symbol_types() {
        assert_eq!(render(&Type::from(INT)), "int");
        assert_eq!(render(&Type::from(STRING)), "string");
    }

    #[test]
    fn test_ptr_slice_map() {
        assert_eq!(render(&Type::ptr(INT)), "*int");
        assert_eq!(render(&Type::slice(BYTE)), "[]byte");
        assert_eq!(render(&Type::array(Expr::Int(4), BYTE)), "[4]byte");
        assert_eq!(render(&Type::map(STRING, Type::ptr(INT))), "map[string]*int");
    }

    #[test]
    fn test_missing_item_type() {
        let res = render_string(|w| Type::Ptr(PtrType::default()).write(w));
        assert!(matches!(
            res,
            Err(Error::MissingNode("pointer type requires an item type"))
        ));
    }

    #[test]
    fn test_struct_fields_align_type_column() {
        let t = Type::Struct(
            StructType::new()
                .field(StructField::new("ID", INT))
                .field(StructField::new("Name", STRING)),
        );

        assert_eq!(render(&t), "struct {\n\tID   int\n\tName string\n}");
    }

    #[test]
    fn test_struct_bases_render_before_fields() {
        let t = Type::Struct(
            StructType::new()
                .base(Symbol::new("Object"))
                .field(StructField::new("ID", INT).tag("json", "id")),
        );

        assert_eq!(
            render(&t),
            "struct {\n\tObject\n\n\tID int `json:\"id\"`\n}"
        );
    }

    #[test]
    fn test_empty_struct_and_interface_stay_inline() {
        assert_eq!(render(&Type::Struct(StructType::new())), "struct {}");
        assert_eq!(render(&Type::Interface(InterfaceType::new())), "interface {}");
        assert!(Type::Struct(StructType::new()).is_simple());
    }

    #[test]
    fn test_interface_methods() {
        let t = Type::Interface(
            InterfaceType::new()
                .method(
                    InterfaceMethod::new("Read")
                        .param(Param::new("p", Type::slice(BYTE)))
                        .returns(Param::unnamed(INT))
                        .returns(Param::unnamed(ERROR)),
                )
                .method(InterfaceMethod::new("Close").returns(Param::unnamed(ERROR))),
        );

        assert_eq!(
            render(&t),
            "interface {\n\tRead(p []byte) (int, error)\n\tClose() error\n}"
        );
    }

    #[test]
    fn test_interface_constraint_union() {
        let t = Type::Interface(
            InterfaceType::new()
                .constraint(GenConstraint::base(INT))
                .constraint(GenConstraint::approx(INT64)),
        );

        assert_eq!(render(&t), "interface {\n\tint | ~int64\n}");
    }

    #[test]
    fn test_type_alias_spec() {
        let out = render_string(|w| TypeSpec::alias(Type::slice(BYTE)).write(w)).unwrap();
        assert_eq!(out, "= []byte");

        let res = render_string(|w| TypeSpec::Alias(None).write(w));
        assert!(matches!(
            res,
            Err(Error::MissingNode("type alias requires a target type"))
        ));
    }

    #[test]
    fn test_struct_field_comment_prefixes_row() {
        let t = Type::Struct(
            StructType::new()
                .field(StructField::new("ID", INT).comment(" primary key"))
                .field(StructField::new("Name", STRING)),
        );

        assert_eq!(
            render(&t),
            "struct {\n\t// primary key\n\tID   int\n\tName string\n}"
        );
    }
}
