//! The Go expression model.
//!
//! Expressions are immutable tree values exposing two capabilities: a
//! compositional [`Expr::is_simple`] predicate (can this subtree be rendered
//! compactly) and a renderer. Comma-separated lists (call arguments,
//! composite-literal elements, map entries) derive their layout from their
//! own elements: they collapse onto one line whenever every element is
//! simple, even inside an otherwise multi-line context.

use std::io;

use plume_codegen::Writer;

use crate::base::{Ident, Symbol, quote_char, quote_string};
use crate::decl::{Param, write_params, write_return_params};
use crate::error::{Error, Result};
use crate::stmt::Block;
use crate::ty::{Type, write_type};

pub const NIL: Expr = Expr::Nil;
pub const IOTA: Expr = Expr::Iota;
pub const TRUE: Expr = Expr::Bool(true);
pub const FALSE: Expr = Expr::Bool(false);

/// A Go expression.
#[derive(Debug, Clone)]
pub enum Expr {
    Nil,
    Iota,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    String(String),
    Symbol(Symbol),
    Paren(ParenExpr),
    Cast(CastExpr),
    SliceLit(SliceExpr),
    MapLit(MapExpr),
    StructLit(StructExpr),
    Func(FuncExpr),
    New(NewExpr),
    Make(MakeExpr),
    Member(MemberExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Range(RangeExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

/// `(expr)`
#[derive(Debug, Clone, Default)]
pub struct ParenExpr {
    pub expr: Option<Box<Expr>>,
}

/// `(T)(value)`
#[derive(Debug, Clone, Default)]
pub struct CastExpr {
    pub ty: Option<Type>,
    pub value: Option<Box<Expr>>,
}

/// A slice or array composite literal: `[]T{a, b}`.
#[derive(Debug, Clone, Default)]
pub struct SliceExpr {
    pub ty: Option<Type>,
    pub items: Vec<Expr>,
}

/// A map composite literal: `map[K]V{k: v}`.
#[derive(Debug, Clone, Default)]
pub struct MapExpr {
    pub ty: Option<Type>,
    pub entries: Vec<MapEntry>,
}

/// One `key: value` entry of a map literal.
#[derive(Debug, Clone, Default)]
pub struct MapEntry {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
}

/// A struct composite literal: `T{Field: value}`.
#[derive(Debug, Clone, Default)]
pub struct StructExpr {
    pub ty: Option<Type>,
    pub fields: Vec<FieldInit>,
}

/// One `Field: value` initializer of a struct literal.
#[derive(Debug, Clone)]
pub struct FieldInit {
    pub id: Ident,
    pub value: Option<Expr>,
}

/// A function literal: `func(params) ret { body }`.
#[derive(Debug, Clone, Default)]
pub struct FuncExpr {
    pub params: Vec<Param>,
    pub ret: Vec<Param>,
    pub body: Block,
}

/// `new(T)`
#[derive(Debug, Clone, Default)]
pub struct NewExpr {
    pub ty: Option<Type>,
}

/// `make(T, sizes...)`
#[derive(Debug, Clone, Default)]
pub struct MakeExpr {
    pub ty: Option<Type>,
    pub sizes: Vec<Expr>,
}

/// `value.id`
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub value: Option<Box<Expr>>,
    pub id: Ident,
}

/// `func(args...)`
#[derive(Debug, Clone, Default)]
pub struct CallExpr {
    pub func: Option<Box<Expr>>,
    pub args: Vec<Expr>,
}

/// `value[index]`
#[derive(Debug, Clone, Default)]
pub struct IndexExpr {
    pub value: Option<Box<Expr>>,
    pub index: Option<Box<Expr>>,
}

/// `value[low:high]`
#[derive(Debug, Clone, Default)]
pub struct RangeExpr {
    pub value: Option<Box<Expr>>,
    pub low: Option<Box<Expr>>,
    pub high: Option<Box<Expr>>,
}

/// A prefix operator applied to one operand.
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Option<Box<Expr>>,
}

/// An infix operator applied to two operands.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Option<Box<Expr>>,
    pub rhs: Option<Box<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
    Complement,
    AddrOf,
    Deref,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl UnaryOp {
    fn token(self) -> char {
        match self {
            UnaryOp::Pos => '+',
            UnaryOp::Neg => '-',
            UnaryOp::Not => '!',
            UnaryOp::Complement => '^',
            UnaryOp::AddrOf => '&',
            UnaryOp::Deref => '*',
        }
    }

    fn missing_operand(self) -> &'static str {
        match self {
            UnaryOp::Pos => "identity expression requires an operand expression",
            UnaryOp::Neg => "negation expression requires an operand expression",
            UnaryOp::Not => "not expression requires an operand expression",
            UnaryOp::Complement => "complement expression requires an operand expression",
            UnaryOp::AddrOf => "address-of expression requires an operand expression",
            UnaryOp::Deref => "dereference expression requires an operand expression",
        }
    }
}

impl BinaryOp {
    fn token(self) -> &'static str {
        match self {
            BinaryOp::Add => " + ",
            BinaryOp::Sub => " - ",
            BinaryOp::Mul => " * ",
            BinaryOp::Div => " / ",
            BinaryOp::Rem => " % ",
            BinaryOp::Shl => " << ",
            BinaryOp::Shr => " >> ",
            BinaryOp::Eq => " == ",
            BinaryOp::Ne => " != ",
            BinaryOp::Lt => " < ",
            BinaryOp::Le => " <= ",
            BinaryOp::Gt => " > ",
            BinaryOp::Ge => " >= ",
            BinaryOp::BitAnd => " & ",
            BinaryOp::BitXor => " ^ ",
            BinaryOp::BitOr => " | ",
            BinaryOp::And => " && ",
            BinaryOp::Or => " || ",
        }
    }

    fn missing_operands(self) -> (&'static str, &'static str) {
        match self {
            BinaryOp::Add => (
                "add expression requires a left-hand operand expression",
                "add expression requires a right-hand operand expression",
            ),
            BinaryOp::Sub => (
                "subtract expression requires a left-hand operand expression",
                "subtract expression requires a right-hand operand expression",
            ),
            BinaryOp::Mul => (
                "multiply expression requires a left-hand operand expression",
                "multiply expression requires a right-hand operand expression",
            ),
            BinaryOp::Div => (
                "divide expression requires a left-hand operand expression",
                "divide expression requires a right-hand operand expression",
            ),
            BinaryOp::Rem => (
                "modulus expression requires a left-hand operand expression",
                "modulus expression requires a right-hand operand expression",
            ),
            BinaryOp::Shl => (
                "shift-left expression requires a left-hand operand expression",
                "shift-left expression requires a right-hand operand expression",
            ),
            BinaryOp::Shr => (
                "shift-right expression requires a left-hand operand expression",
                "shift-right expression requires a right-hand operand expression",
            ),
            BinaryOp::Eq => (
                "equal expression requires a left-hand operand expression",
                "equal expression requires a right-hand operand expression",
            ),
            BinaryOp::Ne => (
                "not-equal expression requires a left-hand operand expression",
                "not-equal expression requires a right-hand operand expression",
            ),
            BinaryOp::Lt => (
                "less-than expression requires a left-hand operand expression",
                "less-than expression requires a right-hand operand expression",
            ),
            BinaryOp::Le => (
                "less-or-equal expression requires a left-hand operand expression",
                "less-or-equal expression requires a right-hand operand expression",
            ),
            BinaryOp::Gt => (
                "more-than expression requires a left-hand operand expression",
                "more-than expression requires a right-hand operand expression",
            ),
            BinaryOp::Ge => (
                "more-or-equal expression requires a left-hand operand expression",
                "more-or-equal expression requires a right-hand operand expression",
            ),
            BinaryOp::BitAnd => (
                "bit-and expression requires a left-hand operand expression",
                "bit-and expression requires a right-hand operand expression",
            ),
            BinaryOp::BitXor => (
                "bit-xor expression requires a left-hand operand expression",
                "bit-xor expression requires a right-hand operand expression",
            ),
            BinaryOp::BitOr => (
                "bit-or expression requires a left-hand operand expression",
                "bit-or expression requires a right-hand operand expression",
            ),
            BinaryOp::And => (
                "logical-and expression requires a left-hand operand expression",
                "logical-and expression requires a right-hand operand expression",
            ),
            BinaryOp::Or => (
                "logical-or expression requires a left-hand operand expression",
                "logical-or expression requires a right-hand operand expression",
            ),
        }
    }
}

impl Expr {
    pub fn symbol(id: impl Into<Ident>) -> Expr {
        Expr::Symbol(Symbol::new(id))
    }

    pub fn str(s: impl Into<String>) -> Expr {
        Expr::String(s.into())
    }

    pub fn paren(expr: Expr) -> Expr {
        Expr::Paren(ParenExpr {
            expr: Some(Box::new(expr)),
        })
    }

    pub fn cast(ty: impl Into<Type>, value: Expr) -> Expr {
        Expr::Cast(CastExpr {
            ty: Some(ty.into()),
            value: Some(Box::new(value)),
        })
    }

    pub fn call(func: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Call(CallExpr {
            func: Some(Box::new(func)),
            args: args.into_iter().collect(),
        })
    }

    pub fn member(value: Expr, id: impl Into<Ident>) -> Expr {
        Expr::Member(MemberExpr {
            value: Some(Box::new(value)),
            id: id.into(),
        })
    }

    pub fn index(value: Expr, index: Expr) -> Expr {
        Expr::Index(IndexExpr {
            value: Some(Box::new(value)),
            index: Some(Box::new(index)),
        })
    }

    pub fn range(value: Expr, low: Option<Expr>, high: Option<Expr>) -> Expr {
        Expr::Range(RangeExpr {
            value: Some(Box::new(value)),
            low: low.map(Box::new),
            high: high.map(Box::new),
        })
    }

    pub fn new_of(ty: impl Into<Type>) -> Expr {
        Expr::New(NewExpr { ty: Some(ty.into()) })
    }

    pub fn make(ty: impl Into<Type>, sizes: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Make(MakeExpr {
            ty: Some(ty.into()),
            sizes: sizes.into_iter().collect(),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(UnaryExpr {
            op,
            operand: Some(Box::new(operand)),
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            op,
            lhs: Some(Box::new(lhs)),
            rhs: Some(Box::new(rhs)),
        })
    }

    pub fn addr_of(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::AddrOf, operand)
    }

    pub fn deref(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Deref, operand)
    }

    pub fn not(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Not, operand)
    }

    pub fn neg(operand: Expr) -> Expr {
        Expr::unary(UnaryOp::Neg, operand)
    }

    /// Whether this subtree can be rendered compactly on one line.
    pub fn is_simple(&self) -> bool {
        match self {
            Expr::Nil
            | Expr::Iota
            | Expr::Bool(_)
            | Expr::Int(_)
            | Expr::Uint(_)
            | Expr::Float(_)
            | Expr::Char(_)
            | Expr::String(_) => true,
            Expr::Symbol(s) => s.is_simple(),
            Expr::Paren(e) => opt_simple(&e.expr),
            Expr::Cast(e) => opt_type_simple(&e.ty) && opt_simple(&e.value),
            Expr::SliceLit(e) => opt_type_simple(&e.ty) && e.items.iter().all(Expr::is_simple),
            Expr::MapLit(e) => opt_type_simple(&e.ty) && e.entries.iter().all(MapEntry::is_simple),
            Expr::StructLit(e) => {
                opt_type_simple(&e.ty)
                    && e.fields
                        .iter()
                        .all(|f| f.value.as_ref().is_none_or(Expr::is_simple))
            }
            Expr::Func(e) => {
                e.params.iter().all(Param::is_simple)
                    && e.ret.iter().all(Param::is_simple)
                    && e.body.is_simple()
            }
            Expr::New(e) => opt_type_simple(&e.ty),
            Expr::Make(e) => opt_type_simple(&e.ty) && e.sizes.iter().all(Expr::is_simple),
            Expr::Member(e) => opt_simple(&e.value),
            Expr::Call(e) => opt_simple(&e.func) && e.args.iter().all(Expr::is_simple),
            Expr::Index(e) => opt_simple(&e.value) && opt_simple(&e.index),
            Expr::Range(e) => {
                opt_simple(&e.value) && opt_simple(&e.low) && opt_simple(&e.high)
            }
            Expr::Unary(e) => opt_simple(&e.operand),
            Expr::Binary(e) => opt_simple(&e.lhs) && opt_simple(&e.rhs),
        }
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        match self {
            Expr::Nil => write_token(w, "nil"),
            Expr::Iota => write_token(w, "iota"),
            Expr::Bool(v) => write_token(w, if *v { "true" } else { "false" }),
            Expr::Int(v) => write_token(w, &v.to_string()),
            Expr::Uint(v) => write_token(w, &v.to_string()),
            Expr::Float(v) => write_token(w, &v.to_string()),
            Expr::Char(v) => write_token(w, &quote_char(*v)),
            Expr::String(v) => write_token(w, &quote_string(v)),
            Expr::Symbol(s) => s.write(w),
            Expr::Paren(e) => {
                w.write_char('(')?;
                write_expr(
                    w,
                    e.expr.as_deref(),
                    single_line,
                    "parenthesis expression requires an inner expression",
                )?;
                w.write_char(')')?;
                Ok(())
            }
            Expr::Cast(e) => {
                w.write_char('(')?;
                write_type(w, e.ty.as_ref(), "cast expression requires a target type")?;
                w.write_str(")(")?;
                write_expr(
                    w,
                    e.value.as_deref(),
                    single_line,
                    "cast expression requires a value expression",
                )?;
                w.write_char(')')?;
                Ok(())
            }
            Expr::SliceLit(e) => {
                write_type(w, e.ty.as_ref(), "")?;
                w.write_char('{')?;
                write_exprs(w, &e.items)?;
                w.write_char('}')?;
                Ok(())
            }
            Expr::MapLit(e) => e.write(w),
            Expr::StructLit(e) => e.write(w),
            Expr::Func(e) => {
                w.write_str("func")?;
                write_params(w, &e.params)?;
                write_return_params(w, &e.ret)?;
                w.space()?;
                e.body.write(w, single_line)
            }
            Expr::New(e) => {
                w.write_str("new(")?;
                write_type(w, e.ty.as_ref(), "new function requires a type")?;
                w.write_char(')')?;
                Ok(())
            }
            Expr::Make(e) => {
                w.write_str("make(")?;
                write_type(w, e.ty.as_ref(), "make function requires a type")?;

                for size in &e.sizes {
                    w.write_str(", ")?;
                    size.write(w, single_line)?;
                }

                w.write_char(')')?;
                Ok(())
            }
            Expr::Member(e) => {
                write_expr(
                    w,
                    e.value.as_deref(),
                    single_line,
                    "member expression requires a value expression",
                )?;
                w.write_char('.')?;
                e.id.write(w)
            }
            Expr::Call(e) => {
                write_expr(
                    w,
                    e.func.as_deref(),
                    single_line,
                    "call expression requires a function expression",
                )?;
                w.write_char('(')?;
                write_exprs(w, &e.args)?;
                w.write_char(')')?;
                Ok(())
            }
            Expr::Index(e) => {
                write_expr(
                    w,
                    e.value.as_deref(),
                    single_line,
                    "index expression requires a slice expression",
                )?;
                w.write_char('[')?;
                write_expr(
                    w,
                    e.index.as_deref(),
                    single_line,
                    "index expression requires an index expression",
                )?;
                w.write_char(']')?;
                Ok(())
            }
            Expr::Range(e) => {
                write_expr(
                    w,
                    e.value.as_deref(),
                    single_line,
                    "range expression requires a slice expression",
                )?;
                w.write_char('[')?;
                write_expr(w, e.low.as_deref(), single_line, "")?;
                w.write_char(':')?;
                write_expr(w, e.high.as_deref(), single_line, "")?;
                w.write_char(']')?;
                Ok(())
            }
            Expr::Unary(e) => {
                w.write_char(e.op.token())?;
                write_expr(w, e.operand.as_deref(), single_line, e.op.missing_operand())
            }
            Expr::Binary(e) => {
                let (lhs_msg, rhs_msg) = e.op.missing_operands();

                write_expr(w, e.lhs.as_deref(), single_line, lhs_msg)?;
                w.write_str(e.op.token())?;
                write_expr(w, e.rhs.as_deref(), single_line, rhs_msg)
            }
        }
    }
}

impl MapEntry {
    pub fn new(key: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    fn is_simple(&self) -> bool {
        self.key.as_ref().is_none_or(Expr::is_simple)
            && self.value.as_ref().is_none_or(Expr::is_simple)
    }
}

impl MapExpr {
    pub fn new(ty: impl Into<Type>) -> Self {
        Self {
            ty: Some(ty.into()),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, key: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        self.entries.push(MapEntry::new(key, value));
        self
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        write_type(w, self.ty.as_ref(), "")?;
        w.write_char('{')?;

        if !self.entries.is_empty() {
            if self.entries.iter().all(MapEntry::is_simple) {
                for (idx, entry) in self.entries.iter().enumerate() {
                    if idx > 0 {
                        w.write_str(", ")?;
                    }

                    entry.write(w, true)?;
                }
            } else {
                w.newline()?;
                w.indent(|w| -> Result<()> {
                    for entry in &self.entries {
                        entry.write(w, false)?;
                        w.write_char(',')?;
                        w.newline()?;
                    }

                    Ok(())
                })?;
            }
        }

        w.write_char('}')?;
        Ok(())
    }
}

impl MapEntry {
    fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        write_expr(
            w,
            self.key.as_ref(),
            single_line,
            "key in map entry must not be nil",
        )?;
        w.write_str(": ")?;
        write_expr(
            w,
            self.value.as_ref(),
            single_line,
            "value in map entry must not be nil",
        )
    }
}

impl StructExpr {
    pub fn new(ty: impl Into<Type>) -> Self {
        Self {
            ty: Some(ty.into()),
            fields: Vec::new(),
        }
    }

    /// A composite literal with an elided type (for nested literals).
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn field(mut self, id: impl Into<Ident>, value: impl Into<Expr>) -> Self {
        self.fields.push(FieldInit {
            id: id.into(),
            value: Some(value.into()),
        });
        self
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        write_type(w, self.ty.as_ref(), "")?;
        w.write_char('{')?;

        if !self.fields.is_empty() {
            let simple = self
                .fields
                .iter()
                .all(|f| f.value.as_ref().is_none_or(Expr::is_simple));

            if simple {
                for (idx, fld) in self.fields.iter().enumerate() {
                    if idx > 0 {
                        w.write_str(", ")?;
                    }

                    fld.write(w, true)?;
                }
            } else {
                w.newline()?;
                w.indent(|w| -> Result<()> {
                    for fld in &self.fields {
                        fld.write(w, false)?;
                        w.write_char(',')?;
                        w.newline()?;
                    }

                    Ok(())
                })?;
            }
        }

        w.write_char('}')?;
        Ok(())
    }
}

impl FieldInit {
    fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        self.id.write(w)?;
        w.write_str(": ")?;
        write_expr(
            w,
            self.value.as_ref(),
            single_line,
            "value in struct field must not be nil",
        )
    }
}

impl FuncExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, p: Param) -> Self {
        self.params.push(p);
        self
    }

    pub fn returns(mut self, p: Param) -> Self {
        self.ret.push(p);
        self
    }

    pub fn body(mut self, body: impl Into<Block>) -> Self {
        self.body = body.into();
        self
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Expr::Symbol(s)
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Expr::Bool(v)
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Int(v)
    }
}

impl From<u64> for Expr {
    fn from(v: u64) -> Self {
        Expr::Uint(v)
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Float(v)
    }
}

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Expr::String(v.to_string())
    }
}

fn write_token<W: io::Write>(w: &mut Writer<W>, s: &str) -> Result<()> {
    w.write_str(s)?;
    Ok(())
}

fn opt_simple(e: &Option<Box<Expr>>) -> bool {
    e.as_deref().is_none_or(Expr::is_simple)
}

fn opt_type_simple(t: &Option<Type>) -> bool {
    t.as_ref().is_none_or(Type::is_simple)
}

/// Write an optional expression, failing with `required` when it is absent.
/// An empty `required` message marks the expression as genuinely optional.
pub(crate) fn write_expr<W: io::Write>(
    w: &mut Writer<W>,
    e: Option<&Expr>,
    single_line: bool,
    required: &'static str,
) -> Result<()> {
    match e {
        Some(e) => e.write(w, single_line),
        None if required.is_empty() => Ok(()),
        None => Err(Error::MissingNode(required)),
    }
}

/// Render an optional expression to a single-line string.
pub(crate) fn expr_string(e: Option<&Expr>, required: &'static str) -> Result<String> {
    crate::base::render_string(|w| write_expr(w, e, true, required))
}

/// Write a comma-separated expression list.
///
/// The list collapses onto one line whenever every element is simple; any
/// non-simple element explodes the whole list, one element per line.
pub(crate) fn write_exprs<W: io::Write>(w: &mut Writer<W>, items: &[Expr]) -> Result<()> {
    if items.iter().all(Expr::is_simple) {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                w.write_str(", ")?;
            }

            item.write(w, true)?;
        }

        return Ok(());
    }

    w.newline()?;
    w.indent(|w| {
        for item in items {
            item.write(w, false)?;
            w.write_char(',')?;
            w.newline()?;
        }

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::render_string;
    use crate::stmt::Stmt;
    use crate::ty::{self, Type};

    fn render(e: &Expr) -> String {
        render_string(|w| e.write(w, false)).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(render(&NIL), "nil");
        assert_eq!(render(&IOTA), "iota");
        assert_eq!(render(&TRUE), "true");
        assert_eq!(render(&Expr::Int(-7)), "-7");
        assert_eq!(render(&Expr::Uint(42)), "42");
        assert_eq!(render(&Expr::Float(2.5)), "2.5");
        assert_eq!(render(&Expr::Char('\n')), "'\\n'");
        assert_eq!(render(&Expr::str("hi\n")), "\"hi\\n\"");
    }

    #[test]
    fn test_operators() {
        let e = Expr::binary(
            BinaryOp::Add,
            Expr::symbol("a"),
            Expr::binary(BinaryOp::Mul, Expr::symbol("b"), Expr::Int(2)),
        );
        assert_eq!(render(&e), "a + b * 2");

        assert_eq!(render(&Expr::not(Expr::symbol("ok"))), "!ok");
        assert_eq!(render(&Expr::addr_of(Expr::symbol("v"))), "&v");
    }

    #[test]
    fn test_member_call_index() {
        let e = Expr::call(
            Expr::member(Expr::symbol("fmt"), "Println"),
            [Expr::str("hello"), Expr::Int(1)],
        );
        assert_eq!(render(&e), "fmt.Println(\"hello\", 1)");

        let e = Expr::index(Expr::symbol("xs"), Expr::Int(0));
        assert_eq!(render(&e), "xs[0]");

        let e = Expr::range(Expr::symbol("xs"), Some(Expr::Int(1)), None);
        assert_eq!(render(&e), "xs[1:]");
    }

    #[test]
    fn test_cast_new_make() {
        let e = Expr::cast(Type::ptr(ty::INT), NIL);
        assert_eq!(render(&e), "(*int)(nil)");

        assert_eq!(render(&Expr::new_of(ty::INT)), "new(int)");

        let e = Expr::make(Type::slice(ty::BYTE), [Expr::Int(0), Expr::symbol("n")]);
        assert_eq!(render(&e), "make([]byte, 0, n)");
    }

    #[test]
    fn test_simple_call_stays_on_one_line_in_multiline_context() {
        let e = Expr::call(Expr::symbol("f"), [Expr::Int(1), Expr::Int(2)]);
        assert_eq!(render_string(|w| e.write(w, false)).unwrap(), "f(1, 2)");
    }

    #[test]
    fn test_call_with_func_literal_explodes() {
        let lit = Expr::Func(
            FuncExpr::new().body(vec![
                Stmt::expr(Expr::call(Expr::symbol("a"), [])),
                Stmt::expr(Expr::call(Expr::symbol("b"), [])),
                Stmt::expr(Expr::call(Expr::symbol("c"), [])),
            ]),
        );
        let e = Expr::call(Expr::symbol("go"), [lit]);

        assert_eq!(
            render(&e),
            "go(\n\tfunc() {\n\t\ta()\n\t\tb()\n\t\tc()\n\t},\n)"
        );
    }

    #[test]
    fn test_struct_literal_layouts() {
        let simple = Expr::StructLit(
            StructExpr::new(Symbol::new("Point"))
                .field("X", Expr::Int(1))
                .field("Y", Expr::Int(2)),
        );
        assert_eq!(render(&simple), "Point{X: 1, Y: 2}");

        let nested = Expr::StructLit(StructExpr::new(Symbol::new("Wrapper")).field(
            "Fn",
            Expr::Func(FuncExpr::new().body(vec![
                Stmt::expr(Expr::call(Expr::symbol("a"), [])),
                Stmt::expr(Expr::call(Expr::symbol("b"), [])),
                Stmt::expr(Expr::call(Expr::symbol("c"), [])),
            ])),
        ));
        assert_eq!(
            render(&nested),
            "Wrapper{\n\tFn: func() {\n\t\ta()\n\t\tb()\n\t\tc()\n\t},\n}"
        );
    }

    #[test]
    fn test_map_literal_layouts() {
        let e = Expr::MapLit(
            MapExpr::new(Type::map(ty::STRING, ty::INT))
                .entry(Expr::str("a"), Expr::Int(1))
                .entry(Expr::str("b"), Expr::Int(2)),
        );
        assert_eq!(render(&e), "map[string]int{\"a\": 1, \"b\": 2}");
    }

    #[test]
    fn test_slice_literal() {
        let e = Expr::SliceLit(SliceExpr {
            ty: Some(Type::slice(ty::INT)),
            items: vec![Expr::Int(1), Expr::Int(2), Expr::Int(3)],
        });
        assert_eq!(render(&e), "[]int{1, 2, 3}");
    }

    #[test]
    fn test_missing_children() {
        let res = render_string(|w| Expr::Cast(CastExpr::default()).write(w, false));
        assert!(matches!(
            res,
            Err(Error::MissingNode("cast expression requires a target type"))
        ));

        let res = render_string(|w| Expr::Paren(ParenExpr::default()).write(w, false));
        assert!(matches!(
            res,
            Err(Error::MissingNode(
                "parenthesis expression requires an inner expression"
            ))
        ));

        let res = render_string(|w| {
            Expr::Binary(BinaryExpr {
                op: BinaryOp::Add,
                lhs: None,
                rhs: Some(Box::new(Expr::Int(1))),
            })
            .write(w, false)
        });
        assert!(matches!(
            res,
            Err(Error::MissingNode(
                "add expression requires a left-hand operand expression"
            ))
        ));
    }

    #[test]
    fn test_absent_operand_counts_as_simple() {
        assert!(Expr::Binary(BinaryExpr {
            op: BinaryOp::Add,
            lhs: None,
            rhs: None,
        })
        .is_simple());
        assert!(Expr::Paren(ParenExpr::default()).is_simple());
    }

    #[test]
    fn test_func_literal_single_line_body() {
        let e = Expr::Func(
            FuncExpr::new()
                .returns(Param::unnamed(ty::INT))
                .body(vec![Stmt::ret(Expr::Int(1))]),
        );
        assert_eq!(
            render_string(|w| e.write(w, true)).unwrap(),
            "func() int { return 1 }"
        );
    }
}
