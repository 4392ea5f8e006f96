//! Strongly-typed Go source model and pretty-printer.
//!
//! This crate builds an in-memory model of a Go source file — imports,
//! declarations, statements, expressions, and types — and renders it
//! deterministically as formatted, compilable Go through the
//! `plume-codegen` writer.
//!
//! Layout follows one rule, applied recursively: a node that is *simple*
//! may render compactly on one line, anything else explodes into an
//! indented block. Grouped declarations and struct fields align into
//! columns. Identifier, keyword, and export validation runs at render
//! time, so any value can be constructed freely and rejected only when it
//! would produce illegal Go.
//!
//! # Example
//!
//! ```
//! use plume_codegen_go::{ConstDecl, Expr, Unit, INT};
//!
//! let mut unit = Unit::new("example").prefix(" Code generated by plume; DO NOT EDIT.");
//! unit.imports.ensure("", "fmt")?;
//! unit.decl(ConstDecl::new("answer").ty(INT).value(Expr::Int(42)));
//!
//! let src = unit.render_to_string("\t")?;
//! assert!(src.starts_with("// Code generated by plume; DO NOT EDIT.\n"));
//! assert!(src.contains("const answer int = 42\n"));
//! # Ok::<(), plume_codegen_go::Error>(())
//! ```

mod base;
mod decl;
mod error;
mod expr;
mod host;
mod stmt;
mod ty;
mod unit;

pub use base::{Comment, Ident, PkgName, PkgRef, Symbol, is_exported, is_identifier, is_keyword};
pub use decl::{
    ConstDecl, Decl, FuncDecl, GenConstraint, GenParam, MethDecl, Param, TypeDecl, VarDecl,
};
pub use error::{Error, Result};
pub use expr::{
    BinaryExpr, BinaryOp, CallExpr, CastExpr, Expr, FALSE, FieldInit, FuncExpr, IOTA, IndexExpr,
    MakeExpr, MapEntry, MapExpr, MemberExpr, NIL, NewExpr, ParenExpr, RangeExpr, SliceExpr,
    StructExpr, TRUE, UnaryExpr, UnaryOp,
};
pub use host::HostTypeMap;
pub use stmt::{
    AssignStmt, Block, DeferStmt, ElseBranch, ExprStmt, ForStmt, IfStmt, InitStmt, ReturnStmt,
    Stmt, SwitchCase, SwitchStmt,
};
pub use ty::{
    ANY, BOOL, BYTE, COMPARABLE, COMPLEX64, COMPLEX128, ERROR, FLOAT32, FLOAT64, INT, INT8,
    INT16, INT32, INT64, InterfaceMethod, InterfaceType, MapType, PtrType, RUNE, STRING,
    SliceType, StructField, StructType, Tag, Type, TypeSpec, UINT, UINT8, UINT16, UINT32, UINT64,
    UINTPTR,
};
pub use unit::{Imports, Unit};
