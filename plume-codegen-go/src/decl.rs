//! Top-level declarations, generic parameters, and the grouped-table
//! rendering shared by top-level and statement-level declarations.
//!
//! A run of two or more same-kind declarations renders as one keyworded
//! block (`const ( ... )`); inside it, maximal runs of individually simple
//! items collapse into a single column-aligned table, while non-simple
//! items render standalone. Function and method declarations are never
//! parenthesized but tabulate the same way when simple.

use std::io;

use plume_codegen::{TableRow, Writer};

use crate::base::{Comment, Ident, render_string};
use crate::error::{Error, Result};
use crate::expr::{Expr, expr_string};
use crate::stmt::Block;
use crate::ty::{Type, TypeSpec, type_string, write_type};

/// `const name type = value`
#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub comment: Comment,
    pub id: Ident,
    pub ty: Option<Type>,
    pub value: Option<Expr>,
}

/// `var name type = value`
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub comment: Comment,
    pub id: Ident,
    pub ty: Option<Type>,
    pub value: Option<Expr>,
}

/// `type name[params] spec`
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub comment: Comment,
    pub id: Ident,
    pub gen_params: Vec<GenParam>,
    pub spec: Option<TypeSpec>,
}

/// `func name[params](args) ret { body }`
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub comment: Comment,
    pub id: Ident,
    pub gen_params: Vec<GenParam>,
    pub params: Vec<Param>,
    pub ret: Vec<Param>,
    pub body: Block,
}

/// `func (receiver) name(args) ret { body }`
#[derive(Debug, Clone)]
pub struct MethDecl {
    pub comment: Comment,
    pub receiver: Param,
    pub id: Ident,
    pub params: Vec<Param>,
    pub ret: Vec<Param>,
    pub body: Block,
}

/// One top-level declaration group, rendered blank-line separated from its
/// neighbors and in the caller's order.
#[derive(Debug, Clone)]
pub enum Decl {
    Comment(Comment),
    Consts(Vec<ConstDecl>),
    Funcs(Vec<FuncDecl>),
    Methods(Vec<MethDecl>),
    Types(Vec<TypeDecl>),
    Vars(Vec<VarDecl>),
}

/// A generic type parameter: `ID constraint`.
#[derive(Debug, Clone)]
pub struct GenParam {
    pub id: Ident,
    pub constraint: GenConstraint,
}

/// A generic constraint term; `tilde` renders the `~` approximation prefix.
#[derive(Debug, Clone, Default)]
pub struct GenConstraint {
    pub tilde: bool,
    pub base: Option<Type>,
}

/// One function parameter or result: an optional name plus a type.
#[derive(Debug, Clone, Default)]
pub struct Param {
    pub id: Option<Ident>,
    pub ty: Option<Type>,
}

/// Shared declaration-item behavior: the simplicity test, the aligned table
/// row, and the standalone rendering.
pub(crate) trait DeclItem {
    fn is_simple_item(&self) -> bool;
    fn table_row(&self) -> Result<TableRow>;
    fn write_item<W: io::Write>(
        &self,
        w: &mut Writer<W>,
        keyword: bool,
        single_line: bool,
    ) -> Result<()>;
}

impl ConstDecl {
    pub fn new(id: impl Into<Ident>) -> Self {
        Self {
            comment: Comment::default(),
            id: id.into(),
            ty: None,
            value: None,
        }
    }

    pub fn comment(mut self, c: impl Into<Comment>) -> Self {
        self.comment = c.into();
        self
    }

    pub fn ty(mut self, ty: impl Into<Type>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn value(mut self, value: impl Into<Expr>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl DeclItem for ConstDecl {
    fn is_simple_item(&self) -> bool {
        self.ty.as_ref().is_none_or(Type::is_simple)
            && self.value.as_ref().is_none_or(Expr::is_simple)
    }

    fn table_row(&self) -> Result<TableRow> {
        let mut row = TableRow::new([
            render_string(|w| self.id.write(w))?,
            type_string(self.ty.as_ref(), "constant declaration requires a type")?,
        ])
        .with_prefix(self.comment.render());

        if self.value.is_some() {
            row.push(format!("= {}", expr_string(self.value.as_ref(), "")?));
        }

        Ok(row)
    }

    fn write_item<W: io::Write>(
        &self,
        w: &mut Writer<W>,
        keyword: bool,
        single_line: bool,
    ) -> Result<()> {
        self.comment.write(w)?;

        if keyword {
            w.write_str("const ")?;
        }

        self.id.write(w)?;
        w.space()?;
        write_type(w, self.ty.as_ref(), "constant declaration requires a type")?;

        if let Some(value) = &self.value {
            w.write_str(" = ")?;
            value.write(w, single_line)?;
        }

        Ok(())
    }
}

impl VarDecl {
    pub fn new(id: impl Into<Ident>) -> Self {
        Self {
            comment: Comment::default(),
            id: id.into(),
            ty: None,
            value: None,
        }
    }

    pub fn comment(mut self, c: impl Into<Comment>) -> Self {
        self.comment = c.into();
        self
    }

    pub fn ty(mut self, ty: impl Into<Type>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn value(mut self, value: impl Into<Expr>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl DeclItem for VarDecl {
    fn is_simple_item(&self) -> bool {
        self.ty.as_ref().is_none_or(Type::is_simple)
            && self.value.as_ref().is_none_or(Expr::is_simple)
    }

    fn table_row(&self) -> Result<TableRow> {
        let mut row = TableRow::new([
            render_string(|w| self.id.write(w))?,
            type_string(self.ty.as_ref(), "variable declaration requires a type")?,
        ])
        .with_prefix(self.comment.render());

        if self.value.is_some() {
            row.push(format!("= {}", expr_string(self.value.as_ref(), "")?));
        }

        Ok(row)
    }

    fn write_item<W: io::Write>(
        &self,
        w: &mut Writer<W>,
        keyword: bool,
        single_line: bool,
    ) -> Result<()> {
        self.comment.write(w)?;

        if keyword {
            w.write_str("var ")?;
        }

        self.id.write(w)?;
        w.space()?;
        write_type(w, self.ty.as_ref(), "variable declaration requires a type")?;

        if let Some(value) = &self.value {
            w.write_str(" = ")?;
            value.write(w, single_line)?;
        }

        Ok(())
    }
}

impl TypeDecl {
    pub fn new(id: impl Into<Ident>) -> Self {
        Self {
            comment: Comment::default(),
            id: id.into(),
            gen_params: Vec::new(),
            spec: None,
        }
    }

    pub fn comment(mut self, c: impl Into<Comment>) -> Self {
        self.comment = c.into();
        self
    }

    pub fn gen_param(mut self, p: GenParam) -> Self {
        self.gen_params.push(p);
        self
    }

    pub fn spec(mut self, spec: impl Into<TypeSpec>) -> Self {
        self.spec = Some(spec.into());
        self
    }
}

impl DeclItem for TypeDecl {
    fn is_simple_item(&self) -> bool {
        self.gen_params.iter().all(GenParam::is_simple)
            && self.spec.as_ref().is_none_or(TypeSpec::is_simple)
    }

    fn table_row(&self) -> Result<TableRow> {
        let name = format!(
            "{}{}",
            render_string(|w| self.id.write(w))?,
            gen_params_string(&self.gen_params)?
        );

        let spec = match &self.spec {
            Some(spec) => render_string(|w| spec.write(w))?,
            None => return Err(Error::MissingNode("type specifier missing")),
        };

        Ok(TableRow::new([name, spec]).with_prefix(self.comment.render()))
    }

    fn write_item<W: io::Write>(
        &self,
        w: &mut Writer<W>,
        keyword: bool,
        _single_line: bool,
    ) -> Result<()> {
        self.comment.write(w)?;

        if keyword {
            w.write_str("type ")?;
        }

        self.id.write(w)?;
        write_gen_params(w, &self.gen_params)?;
        w.space()?;

        match &self.spec {
            Some(spec) => spec.write(w),
            None => Err(Error::MissingNode("type specifier missing")),
        }
    }
}

impl FuncDecl {
    pub fn new(id: impl Into<Ident>) -> Self {
        Self {
            comment: Comment::default(),
            id: id.into(),
            gen_params: Vec::new(),
            params: Vec::new(),
            ret: Vec::new(),
            body: Block::default(),
        }
    }

    pub fn comment(mut self, c: impl Into<Comment>) -> Self {
        self.comment = c.into();
        self
    }

    pub fn gen_param(mut self, p: GenParam) -> Self {
        self.gen_params.push(p);
        self
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

impl DeclItem for FuncDecl {
    fn is_simple_item(&self) -> bool {
        self.gen_params.iter().all(GenParam::is_simple)
            && self.params.iter().all(Param::is_simple)
            && self.ret.iter().all(Param::is_simple)
            && self.body.is_simple()
    }

    fn table_row(&self) -> Result<TableRow> {
        let signature = format!(
            "{}{}{}{}",
            render_string(|w| self.id.write(w))?,
            gen_params_string(&self.gen_params)?,
            params_string(&self.params)?,
            return_params_string(&self.ret)?
        );

        Ok(TableRow::new([
            "func".to_string(),
            signature,
            render_string(|w| self.body.write(w, true))?,
        ])
        .with_prefix(self.comment.render()))
    }

    fn write_item<W: io::Write>(
        &self,
        w: &mut Writer<W>,
        _keyword: bool,
        _single_line: bool,
    ) -> Result<()> {
        self.comment.write(w)?;

        w.write_str("func ")?;
        self.id.write(w)?;
        write_gen_params(w, &self.gen_params)?;
        write_params(w, &self.params)?;
        write_return_params(w, &self.ret)?;
        w.space()?;
        self.body.write(w, false)
    }
}

impl MethDecl {
    pub fn new(receiver: Param, id: impl Into<Ident>) -> Self {
        Self {
            comment: Comment::default(),
            receiver,
            id: id.into(),
            params: Vec::new(),
            ret: Vec::new(),
            body: Block::default(),
        }
    }

    pub fn comment(mut self, c: impl Into<Comment>) -> Self {
        self.comment = c.into();
        self
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

impl DeclItem for MethDecl {
    fn is_simple_item(&self) -> bool {
        self.receiver.is_simple()
            && self.params.iter().all(Param::is_simple)
            && self.ret.iter().all(Param::is_simple)
            && self.body.is_simple()
    }

    fn table_row(&self) -> Result<TableRow> {
        let receiver = render_string(|w| {
            w.write_char('(')?;
            self.receiver.write(w)?;
            w.write_char(')')?;
            Ok(())
        })?;

        let signature = format!(
            "{}{}{}",
            render_string(|w| self.id.write(w))?,
            params_string(&self.params)?,
            return_params_string(&self.ret)?
        );

        Ok(TableRow::new([
            "func".to_string(),
            receiver,
            signature,
            render_string(|w| self.body.write(w, true))?,
        ])
        .with_prefix(self.comment.render()))
    }

    fn write_item<W: io::Write>(
        &self,
        w: &mut Writer<W>,
        _keyword: bool,
        _single_line: bool,
    ) -> Result<()> {
        self.comment.write(w)?;

        w.write_str("func (")?;
        self.receiver.write(w)?;
        w.write_str(") ")?;
        self.id.write(w)?;
        write_params(w, &self.params)?;
        write_return_params(w, &self.ret)?;
        w.space()?;
        self.body.write(w, false)
    }
}

impl Decl {
    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            Decl::Comment(c) => c.write(w),
            Decl::Consts(items) => write_section(w, items, "const"),
            Decl::Types(items) => write_section(w, items, "type"),
            Decl::Vars(items) => write_section(w, items, "var"),
            Decl::Funcs(items) => write_item_group(w, items),
            Decl::Methods(items) => write_item_group(w, items),
        }
    }
}

impl From<Comment> for Decl {
    fn from(c: Comment) -> Self {
        Decl::Comment(c)
    }
}

impl From<ConstDecl> for Decl {
    fn from(d: ConstDecl) -> Self {
        Decl::Consts(vec![d])
    }
}

impl From<Vec<ConstDecl>> for Decl {
    fn from(items: Vec<ConstDecl>) -> Self {
        Decl::Consts(items)
    }
}

impl From<VarDecl> for Decl {
    fn from(d: VarDecl) -> Self {
        Decl::Vars(vec![d])
    }
}

impl From<Vec<VarDecl>> for Decl {
    fn from(items: Vec<VarDecl>) -> Self {
        Decl::Vars(items)
    }
}

impl From<TypeDecl> for Decl {
    fn from(d: TypeDecl) -> Self {
        Decl::Types(vec![d])
    }
}

impl From<Vec<TypeDecl>> for Decl {
    fn from(items: Vec<TypeDecl>) -> Self {
        Decl::Types(items)
    }
}

impl From<FuncDecl> for Decl {
    fn from(d: FuncDecl) -> Self {
        Decl::Funcs(vec![d])
    }
}

impl From<Vec<FuncDecl>> for Decl {
    fn from(items: Vec<FuncDecl>) -> Self {
        Decl::Funcs(items)
    }
}

impl From<MethDecl> for Decl {
    fn from(d: MethDecl) -> Self {
        Decl::Methods(vec![d])
    }
}

impl From<Vec<MethDecl>> for Decl {
    fn from(items: Vec<MethDecl>) -> Self {
        Decl::Methods(items)
    }
}

impl GenParam {
    pub fn new(id: impl Into<Ident>, constraint: GenConstraint) -> Self {
        Self {
            id: id.into(),
            constraint,
        }
    }

    pub(crate) fn is_simple(&self) -> bool {
        self.constraint.is_simple()
    }

    fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        self.id.write(w)?;
        w.space()?;
        self.constraint.write(w)
    }
}

impl GenConstraint {
    /// Constrain to a base type.
    pub fn base(ty: impl Into<Type>) -> Self {
        Self {
            tilde: false,
            base: Some(ty.into()),
        }
    }

    /// Constrain to the underlying-type approximation (`~T`).
    pub fn approx(ty: impl Into<Type>) -> Self {
        Self {
            tilde: true,
            base: Some(ty.into()),
        }
    }

    pub(crate) fn is_simple(&self) -> bool {
        self.base.as_ref().is_none_or(Type::is_simple)
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        if self.tilde {
            w.write_char('~')?;
        }

        write_type(w, self.base.as_ref(), "generic constraint requires a base type")
    }
}

impl Param {
    pub fn new(id: impl Into<Ident>, ty: impl Into<Type>) -> Self {
        Self {
            id: Some(id.into()),
            ty: Some(ty.into()),
        }
    }

    pub fn unnamed(ty: impl Into<Type>) -> Self {
        Self {
            id: None,
            ty: Some(ty.into()),
        }
    }

    pub(crate) fn is_simple(&self) -> bool {
        self.ty.as_ref().is_none_or(Type::is_simple)
    }

    pub(crate) fn write<W: io::Write>(&self, w: &mut Writer<W>) -> Result<()> {
        let mut required = "unnamed parameter requires a type";

        if let Some(id) = &self.id {
            id.write(w)?;
            required = "";

            if self.ty.is_some() {
                w.space()?;
            }
        }

        write_type(w, self.ty.as_ref(), required)
    }
}

/// Write a parenthesized parameter list.
pub(crate) fn write_params<W: io::Write>(w: &mut Writer<W>, params: &[Param]) -> Result<()> {
    w.write_char('(')?;

    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            w.write_str(", ")?;
        }

        param.write(w)?;
    }

    w.write_char(')')?;
    Ok(())
}

/// Write a result list: nothing when empty, a bare type for a single
/// unnamed result, a parenthesized list otherwise. A leading space
/// separates the results from the parameter list.
pub(crate) fn write_return_params<W: io::Write>(w: &mut Writer<W>, params: &[Param]) -> Result<()> {
    if params.is_empty() {
        return Ok(());
    }

    w.space()?;

    let parens = params.len() > 1 || params[0].id.is_some();

    if parens {
        w.write_char('(')?;
    }

    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            w.write_str(", ")?;
        }

        param.write(w)?;
    }

    if parens {
        w.write_char(')')?;
    }

    Ok(())
}

pub(crate) fn params_string(params: &[Param]) -> Result<String> {
    render_string(|w| write_params(w, params))
}

pub(crate) fn return_params_string(params: &[Param]) -> Result<String> {
    render_string(|w| write_return_params(w, params))
}

/// Write a generic parameter list in brackets; nothing when empty.
pub(crate) fn write_gen_params<W: io::Write>(w: &mut Writer<W>, params: &[GenParam]) -> Result<()> {
    if params.is_empty() {
        return Ok(());
    }

    w.write_char('[')?;

    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            w.write_str(", ")?;
        }

        param.write(w)?;
    }

    w.write_char(']')?;
    Ok(())
}

pub(crate) fn gen_params_string(params: &[GenParam]) -> Result<String> {
    render_string(|w| write_gen_params(w, params))
}

/// Render a keyworded declaration section: nothing when empty, a standalone
/// declaration with its inline keyword for one item, a `keyword ( ... )`
/// block for two or more.
pub(crate) fn write_section<W: io::Write, T: DeclItem>(
    w: &mut Writer<W>,
    items: &[T],
    keyword: &str,
) -> Result<()> {
    match items.len() {
        0 => Ok(()),
        1 => {
            w.newline()?;
            items[0].write_item(w, true, false)?;
            w.newline()?;
            Ok(())
        }
        _ => {
            w.newline()?;
            w.write_str(keyword)?;
            w.write_str(" (")?;
            w.newline()?;
            w.indent(|w| write_items(w, items))?;
            w.write_char(')')?;
            w.newline()?;
            Ok(())
        }
    }
}

/// Render an unparenthesized declaration group, blank-line separated from
/// the preceding output.
pub(crate) fn write_item_group<W: io::Write, T: DeclItem>(
    w: &mut Writer<W>,
    items: &[T],
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    w.newline()?;
    write_items(w, items)
}

/// Render declaration items, collapsing maximal leading runs of simple
/// items into aligned tables and writing the rest standalone. Chunks are
/// blank-line separated.
pub(crate) fn write_items<W: io::Write, T: DeclItem>(
    w: &mut Writer<W>,
    mut items: &[T],
) -> Result<()> {
    let mut first = true;

    while !items.is_empty() {
        if first {
            first = false;
        } else {
            w.newline()?;
        }

        let simple = items
            .iter()
            .take_while(|item| item.is_simple_item())
            .count();

        if simple > 0 {
            let rows = items[..simple]
                .iter()
                .map(DeclItem::table_row)
                .collect::<Result<Vec<_>>>()?;

            w.table(&rows)?;
            items = &items[simple..];
        } else {
            items[0].write_item(w, false, false)?;
            w.newline()?;
            items = &items[1..];
        }
    }

    Ok(())
}
