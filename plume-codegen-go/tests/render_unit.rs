//! Whole-document render tests.
//!
//! These build complete units through the public API and check the exact
//! emitted Go source. Run `cargo insta review` to update snapshots when
//! making intentional layout changes.

use plume_codegen_go::{
    BYTE, CastExpr, ConstDecl, Error, Expr, FuncDecl, HostTypeMap, IOTA, INT, MethDecl, NIL,
    Param, Stmt, StructExpr, StructField, StructType, SwitchCase, SwitchStmt, Symbol, Type,
    TypeDecl, Unit, VarDecl,
};

struct Uuid;
struct TextMarshaler;
struct TextUnmarshaler;

fn host_types() -> HostTypeMap {
    let mut map = HostTypeMap::new();
    map.register::<Uuid>("github.com/google/uuid", "UUID")
        .register::<TextMarshaler>("encoding", "TextMarshaler")
        .register::<TextUnmarshaler>("encoding", "TextUnmarshaler");
    map
}

/// The marshaller-assertion document: a wrapped id type plus interface
/// compliance checks.
fn id_unit() -> Unit {
    let map = host_types();
    let mut unit = Unit::new("test").prefix(" Code generated by plume; DO NOT EDIT.");

    let uuid = map.symbol_for::<Uuid>(&mut unit.imports).unwrap();
    let marshaler = map.symbol_for::<TextMarshaler>(&mut unit.imports).unwrap();
    let unmarshaler = map.symbol_for::<TextUnmarshaler>(&mut unit.imports).unwrap();

    unit.decl(vec![TypeDecl::new("ID").spec(Type::Struct(
        StructType::new().field(StructField::new("Value", uuid).tag("json", "value")),
    ))]);

    unit.decl(vec![
        VarDecl::new("_")
            .ty(marshaler)
            .value(Expr::StructLit(StructExpr::new(Symbol::new("ID")))),
        VarDecl::new("_")
            .ty(unmarshaler)
            .value(Expr::cast(Type::ptr(Symbol::new("ID")), NIL)),
    ]);

    unit
}

#[test]
fn id_unit_renders_exactly() {
    let expected = concat!(
        "// Code generated by plume; DO NOT EDIT.\n",
        "\n",
        "package test\n",
        "\n",
        "import (\n",
        "\tencoding \"encoding\"\n",
        "\n",
        "\tuuid \"github.com/google/uuid\"\n",
        ")\n",
        "\n",
        "type ID struct {\n",
        "\tValue uuid.UUID `json:\"value\"`\n",
        "}\n",
        "\n",
        "var (\n",
        "\t_ encoding.TextMarshaler   = ID{}\n",
        "\t_ encoding.TextUnmarshaler = (*ID)(nil)\n",
        ")\n",
        "\n",
    );

    assert_eq!(id_unit().render_to_string("\t").unwrap(), expected);
}

#[test]
fn rendering_is_deterministic() {
    let unit = id_unit();
    assert_eq!(
        unit.render_to_string("\t").unwrap(),
        unit.render_to_string("\t").unwrap()
    );
}

#[test]
fn render_to_file_writes_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gen/id.go");

    id_unit().render_to_file(&path, "\t").unwrap();

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, id_unit().render_to_string("\t").unwrap());
}

#[test]
fn missing_node_aborts_before_trailing_syntax() {
    let mut unit = Unit::new("broken");
    unit.decl(vec![VarDecl::new("x")
        .ty(INT)
        .value(Expr::Cast(CastExpr::default()))]);

    let mut sink = Vec::new();
    let res = unit.render(&mut sink, "\t");

    assert!(matches!(
        res,
        Err(Error::MissingNode("cast expression requires a target type"))
    ));

    let partial = String::from_utf8(sink).unwrap();
    assert!(partial.ends_with("var x int = ("));
}

fn member(value: Expr, id: &str) -> Expr {
    Expr::member(value, id)
}

fn store_unit() -> Unit {
    let mut unit = Unit::new("storage").prefix(" Code generated by plume; DO NOT EDIT.");
    let sync = unit.imports.ensure("", "sync").unwrap();

    let state = Symbol::new("state");

    unit.decl(vec![
        ConstDecl::new("stateIdle").ty(state.clone()).value(IOTA),
        ConstDecl::new("stateBusy").ty(state.clone()),
        ConstDecl::new("stateClosed").ty(state.clone()),
    ]);

    unit.decl(vec![
        TypeDecl::new("state").spec(Type::from(INT)),
        TypeDecl::new("Store").spec(Type::Struct(
            StructType::new()
                .field(StructField::new(
                    "mu",
                    Symbol::in_package(sync, "Mutex"),
                ))
                .field(StructField::new(
                    "entries",
                    Type::map(plume_codegen_go::STRING, Type::slice(BYTE)),
                )),
        )),
    ]);

    let entries_map = Type::map(plume_codegen_go::STRING, Type::slice(BYTE));

    unit.decl(vec![
        FuncDecl::new("New")
            .returns(Param::unnamed(Type::ptr(Symbol::new("Store"))))
            .body(vec![Stmt::ret(Expr::unary(
                plume_codegen_go::UnaryOp::AddrOf,
                Expr::StructLit(
                    StructExpr::new(Symbol::new("Store"))
                        .field("entries", Expr::make(entries_map, [])),
                ),
            ))]),
        FuncDecl::new("describe")
            .param(Param::new("st", state))
            .returns(Param::unnamed(plume_codegen_go::STRING))
            .body(vec![Stmt::Switch(SwitchStmt {
                value: Some(Expr::symbol("st")),
                cases: vec![
                    SwitchCase::when(Expr::symbol("stateIdle"), [Stmt::ret(Expr::str("idle"))]),
                    SwitchCase::when(Expr::symbol("stateBusy"), [Stmt::ret(Expr::str("busy"))]),
                    SwitchCase::otherwise([Stmt::ret(Expr::str("closed"))]),
                ],
            })]),
    ]);

    let recv = Param::new("s", Type::ptr(Symbol::new("Store")));
    let lock = Stmt::expr(Expr::call(
        member(member(Expr::symbol("s"), "mu"), "Lock"),
        [],
    ));
    let unlock = Stmt::defer(Expr::call(
        member(member(Expr::symbol("s"), "mu"), "Unlock"),
        [],
    ));

    unit.decl(vec![
        MethDecl::new(recv.clone(), "Get")
            .param(Param::new("key", plume_codegen_go::STRING))
            .returns(Param::unnamed(Type::slice(BYTE)))
            .body(vec![
                lock.clone(),
                unlock.clone(),
                Stmt::ret(Expr::index(
                    member(Expr::symbol("s"), "entries"),
                    Expr::symbol("key"),
                )),
            ]),
        MethDecl::new(recv, "Put")
            .param(Param::new("key", plume_codegen_go::STRING))
            .param(Param::new("value", Type::slice(BYTE)))
            .body(vec![
                lock,
                unlock,
                Stmt::assign(
                    [Expr::index(
                        member(Expr::symbol("s"), "entries"),
                        Expr::symbol("key"),
                    )],
                    [Expr::symbol("value")],
                ),
            ]),
    ]);

    unit
}

#[test]
fn store_unit_snapshot() {
    let src = store_unit().render_to_string("    ").unwrap();

    insta::assert_snapshot!(src, @r#"
    // Code generated by plume; DO NOT EDIT.

    package storage

    import sync "sync"

    const (
        stateIdle   state = iota
        stateBusy   state
        stateClosed state
    )

    type (
        state int

        Store struct {
            mu      sync.Mutex
            entries map[string][]byte
        }
    )

    func New() *Store { return &Store{entries: make(map[string][]byte)} }

    func describe(st state) string {
        switch st {
        case stateIdle:
            return "idle"
        case stateBusy:
            return "busy"
        default:
            return "closed"
        }
    }

    func (s *Store) Get(key string) []byte {
        s.mu.Lock()
        defer s.mu.Unlock()
        return s.entries[key]
    }

    func (s *Store) Put(key string, value []byte) {
        s.mu.Lock()
        defer s.mu.Unlock()
        s.entries[key] = value
    }
    "#);
}

#[test]
fn grouped_decl_table_pads_every_row() {
    let unit = {
        let mut unit = Unit::new("widths");
        unit.decl(vec![
            VarDecl::new("a").ty(INT).value(Expr::Int(1)),
            VarDecl::new("medium").ty(plume_codegen_go::STRING),
            VarDecl::new("longest").ty(BYTE).value(Expr::Int(0)),
        ]);
        unit
    };

    let src = unit.render_to_string("\t").unwrap();

    // Name column padded to the longest name; type column starts at one
    // offset on every row.
    assert!(src.contains("\ta       int    = 1\n"));
    assert!(src.contains("\tmedium  string\n"));
    assert!(src.contains("\tlongest byte   = 0\n"));
}
