use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while rendering a code model.
///
/// Every variant except [`Error::Sink`] is a defect in the caller's model:
/// rendering fails fast on the first one and performs no recovery. Output
/// already flushed to the sink stays there.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("'{name}' is not a valid {context}")]
    #[diagnostic(
        code(plume_go::invalid_identifier),
        help(
            "use letters, digits, and underscores, starting with a letter or underscore, and avoid Go keywords"
        )
    )]
    InvalidIdentifier { name: String, context: &'static str },

    #[error("unexported symbol '{id}' referenced through package '{alias}' ({path})")]
    #[diagnostic(
        code(plume_go::unexported_symbol),
        help("exported Go names start with an uppercase letter")
    )]
    UnexportedSymbol {
        id: String,
        alias: String,
        path: String,
    },

    #[error("import alias '{alias}' conflicts with an existing registration for '{path}'")]
    #[diagnostic(code(plume_go::import_alias_conflict))]
    ImportAliasConflict { alias: String, path: String },

    #[error("{0}")]
    #[diagnostic(code(plume_go::missing_node))]
    MissingNode(&'static str),

    #[error("host type '{type_name}' has no registered symbol mapping")]
    #[diagnostic(
        code(plume_go::unmapped_host_type),
        help("register the type on the HostTypeMap before requesting its symbol")
    )]
    UnmappedHostType { type_name: &'static str },

    #[error("output sink failed")]
    #[diagnostic(code(plume_go::sink))]
    Sink(#[from] io::Error),
}
