//! The Go statement model.
//!
//! Statements share the same two capabilities as expressions: a
//! compositional simplicity predicate and a renderer taking a single-line
//! hint. A block honors the hint only after re-deriving simplicity from its
//! own statements; blocks of three or more statements always explode.

use std::io;

use plume_codegen::Writer;

use crate::decl::{ConstDecl, DeclItem, FuncDecl, TypeDecl, VarDecl, write_section};
use crate::error::Result;
use crate::expr::{Expr, write_expr, write_exprs};

/// A Go statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    Assign(AssignStmt),
    Block(Block),
    Break,
    Continue,
    Defer(DeferStmt),
    Expr(ExprStmt),
    Fallthrough,
    For(ForStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Switch(SwitchStmt),
    Const(ConstDecl),
    Consts(Vec<ConstDecl>),
    Func(FuncDecl),
    Type(TypeDecl),
    Types(Vec<TypeDecl>),
    Var(VarDecl),
    Vars(Vec<VarDecl>),
}

/// An ordered statement list enclosed in braces.
#[derive(Debug, Clone, Default)]
pub struct Block(pub Vec<Stmt>);

/// A (possibly multi-target) assignment; `define` renders `:=`.
#[derive(Debug, Clone, Default)]
pub struct AssignStmt {
    pub define: bool,
    pub dests: Vec<Expr>,
    pub srcs: Vec<Expr>,
}

/// `defer expr`
#[derive(Debug, Clone, Default)]
pub struct DeferStmt {
    pub expr: Option<Expr>,
}

/// A bare expression in statement position.
#[derive(Debug, Clone, Default)]
pub struct ExprStmt {
    pub expr: Option<Expr>,
}

/// `for init; cond; post { body }` — the three-clause form renders whenever
/// `init` or `post` is present, the while-like form otherwise.
#[derive(Debug, Clone, Default)]
pub struct ForStmt {
    pub init: Option<InitStmt>,
    pub cond: Option<Expr>,
    pub post: Option<AssignStmt>,
    pub body: Block,
}

/// `if init; cond { then } else ...` — the condition is required at render
/// time.
#[derive(Debug, Clone, Default)]
pub struct IfStmt {
    pub init: Option<InitStmt>,
    pub cond: Option<Expr>,
    pub then: Block,
    pub els: Option<ElseBranch>,
}

/// `return` with an optional value.
#[derive(Debug, Clone, Default)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}

/// A multi-way branch. Never simple; always explodes into one case per
/// line.
#[derive(Debug, Clone, Default)]
pub struct SwitchStmt {
    pub value: Option<Expr>,
    pub cases: Vec<SwitchCase>,
}

/// One arm of a switch; a missing value marks the `default` arm.
#[derive(Debug, Clone, Default)]
pub struct SwitchCase {
    pub value: Option<Expr>,
    pub stmts: Vec<Stmt>,
}

/// Statements allowed in the init clause of `if` and `for`.
#[derive(Debug, Clone)]
pub enum InitStmt {
    Assign(AssignStmt),
    Var(VarDecl),
}

/// The else branch of an `if`: a plain block or a chained `if`.
#[derive(Debug, Clone)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStmt>),
}

impl Stmt {
    pub fn expr(e: Expr) -> Stmt {
        Stmt::Expr(ExprStmt { expr: Some(e) })
    }

    pub fn defer(e: Expr) -> Stmt {
        Stmt::Defer(DeferStmt { expr: Some(e) })
    }

    pub fn ret(value: Expr) -> Stmt {
        Stmt::Return(ReturnStmt { value: Some(value) })
    }

    pub fn assign(
        dests: impl IntoIterator<Item = Expr>,
        srcs: impl IntoIterator<Item = Expr>,
    ) -> Stmt {
        Stmt::Assign(AssignStmt {
            define: false,
            dests: dests.into_iter().collect(),
            srcs: srcs.into_iter().collect(),
        })
    }

    /// A short variable declaration (`:=`).
    pub fn define(
        dests: impl IntoIterator<Item = Expr>,
        srcs: impl IntoIterator<Item = Expr>,
    ) -> Stmt {
        Stmt::Assign(AssignStmt {
            define: true,
            dests: dests.into_iter().collect(),
            srcs: srcs.into_iter().collect(),
        })
    }

    /// Whether this statement can take part in a single-line rendering.
    pub fn is_simple(&self) -> bool {
        match self {
            Stmt::Assign(s) => s.is_simple(),
            Stmt::Block(b) => b.is_simple(),
            Stmt::Break | Stmt::Continue | Stmt::Fallthrough => true,
            Stmt::Defer(s) => s.expr.as_ref().is_none_or(Expr::is_simple),
            Stmt::Expr(s) => s.expr.as_ref().is_none_or(Expr::is_simple),
            Stmt::For(s) => s.is_simple(),
            Stmt::If(s) => s.is_simple(),
            Stmt::Return(s) => s.value.as_ref().is_none_or(Expr::is_simple),
            Stmt::Switch(_) => false,
            Stmt::Const(d) => d.is_simple_item(),
            Stmt::Func(d) => d.is_simple_item(),
            Stmt::Type(d) => d.is_simple_item(),
            Stmt::Var(d) => d.is_simple_item(),
            Stmt::Consts(v) => v.len() < 2,
            Stmt::Types(v) => v.len() < 2,
            Stmt::Vars(v) => v.len() < 2,
        }
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        match self {
            Stmt::Assign(s) => s.write(w),
            Stmt::Block(b) => b.write(w, single_line),
            Stmt::Break => token(w, "break"),
            Stmt::Continue => token(w, "continue"),
            Stmt::Fallthrough => token(w, "fallthrough"),
            Stmt::Defer(s) => {
                w.write_str("defer ")?;
                write_expr(
                    w,
                    s.expr.as_ref(),
                    single_line,
                    "defer statement requires an expression",
                )
            }
            Stmt::Expr(s) => write_expr(
                w,
                s.expr.as_ref(),
                single_line,
                "expression statement requires an expression",
            ),
            Stmt::For(s) => s.write(w, single_line),
            Stmt::If(s) => s.write(w, single_line),
            Stmt::Return(s) => {
                w.write_str("return")?;

                if s.value.is_some() {
                    w.space()?;
                    write_expr(w, s.value.as_ref(), single_line, "")?;
                }

                Ok(())
            }
            Stmt::Switch(s) => s.write(w),
            Stmt::Const(d) => d.write_item(w, true, single_line),
            Stmt::Func(d) => d.write_item(w, true, single_line),
            Stmt::Type(d) => d.write_item(w, true, single_line),
            Stmt::Var(d) => d.write_item(w, true, single_line),
            Stmt::Consts(v) => write_section(w, v, "const"),
            Stmt::Types(v) => write_section(w, v, "type"),
            Stmt::Vars(v) => write_section(w, v, "var"),
        }
    }
}

impl Block {
    pub fn new(stmts: impl IntoIterator<Item = Stmt>) -> Self {
        Block(stmts.into_iter().collect())
    }

    /// Simple iff every statement is simple and the block holds fewer than
    /// three statements.
    pub fn is_simple(&self) -> bool {
        self.0.iter().all(Stmt::is_simple) && self.0.len() < 3
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        let single = single_line && self.is_simple();

        w.write_char('{')?;

        if !self.0.is_empty() {
            if single {
                w.space()?;

                for (idx, stmt) in self.0.iter().enumerate() {
                    if idx > 0 {
                        w.write_str("; ")?;
                    }

                    stmt.write(w, true)?;
                }

                w.space()?;
            } else {
                w.newline()?;
                w.indent(|w| -> Result<()> {
                    for stmt in &self.0 {
                        stmt.write(w, false)?;
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

impl From<Vec<Stmt>> for Block {
    fn from(stmts: Vec<Stmt>) -> Self {
        Block(stmts)
    }
}

impl AssignStmt {
    fn is_simple(&self) -> bool {
        self.dests.iter().all(Expr::is_simple) && self.srcs.iter().all(Expr::is_simple)
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        write_exprs(w, &self.dests)?;
        w.space()?;
        w.write_str(if self.define { ":=" } else { "=" })?;
        w.space()?;
        write_exprs(w, &self.srcs)
    }
}

impl ForStmt {
    fn is_simple(&self) -> bool {
        self.init.as_ref().is_none_or(InitStmt::is_simple)
            && self.cond.as_ref().is_none_or(Expr::is_simple)
            && self.post.as_ref().is_none_or(AssignStmt::is_simple)
            && self.body.is_simple()
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        w.write_str("for ")?;

        if self.init.is_some() || self.post.is_some() {
            if let Some(init) = &self.init {
                init.write(w)?;
            }

            w.write_str("; ")?;
            write_expr(w, self.cond.as_ref(), true, "")?;
            w.write_str("; ")?;

            if let Some(post) = &self.post {
                post.write(w)?;
                w.space()?;
            }
        } else if let Some(cond) = &self.cond {
            cond.write(w, true)?;
            w.space()?;
        }

        self.body.write(w, single_line)
    }
}

impl IfStmt {
    fn is_simple(&self) -> bool {
        self.cond.as_ref().is_none_or(Expr::is_simple)
            && self.then.is_simple()
            && self.els.as_ref().is_none_or(ElseBranch::is_simple)
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        w.write_str("if ")?;

        if let Some(init) = &self.init {
            init.write(w)?;
            w.write_str("; ")?;
        }

        write_expr(w, self.cond.as_ref(), true, "if statement requires a condition")?;
        w.space()?;
        self.then.write(w, single_line)?;

        if let Some(els) = &self.els {
            w.write_str(" else ")?;
            els.write(w, single_line)?;
        }

        Ok(())
    }
}

impl SwitchStmt {
    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        w.write_str("switch ")?;
        write_expr(
            w,
            self.value.as_ref(),
            true,
            "switch statement requires an expression",
        )?;
        w.write_str(" {")?;
        w.newline()?;

        for case in &self.cases {
            if let Some(value) = &case.value {
                w.write_str("case ")?;
                value.write(w, true)?;
                w.write_char(':')?;
            } else {
                w.write_str("default:")?;
            }

            w.newline()?;
            w.indent(|w| -> Result<()> {
                for stmt in &case.stmts {
                    stmt.write(w, false)?;
                    w.newline()?;
                }

                Ok(())
            })?;
        }

        w.write_char('}')?;
        Ok(())
    }
}

impl SwitchCase {
    pub fn when(value: impl Into<Expr>, stmts: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            value: Some(value.into()),
            stmts: stmts.into_iter().collect(),
        }
    }

    /// The `default` arm.
    pub fn otherwise(stmts: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            value: None,
            stmts: stmts.into_iter().collect(),
        }
    }
}

impl InitStmt {
    fn is_simple(&self) -> bool {
        match self {
            InitStmt::Assign(s) => s.is_simple(),
            InitStmt::Var(d) => d.is_simple_item(),
        }
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            InitStmt::Assign(s) => s.write(w),
            InitStmt::Var(d) => d.write_item(w, true, true),
        }
    }
}

impl ElseBranch {
    fn is_simple(&self) -> bool {
        match self {
            ElseBranch::Block(b) => b.is_simple(),
            ElseBranch::If(i) => i.is_simple(),
        }
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>, single_line: bool) -> Result<()> {
        match self {
            ElseBranch::Block(b) => b.write(w, single_line),
            ElseBranch::If(i) => i.write(w, single_line),
        }
    }
}

fn token<W: io::Write>(w: &mut Writer<W>, s: &str) -> Result<()> {
    w.write_str(s)?;
    Ok(())
}
