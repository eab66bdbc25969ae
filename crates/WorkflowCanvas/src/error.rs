use thiserror::Error;

use crate::model::NodeId;

/// Errors raised while loading a module catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse module catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("module `{0}` is defined more than once")]
    DuplicateModule(String),
    #[error("field `{field}` of module `{module}` is a choice field without options")]
    MissingOptions { module: String, field: String },
}

/// Errors raised by editor operations that the caller asked for explicitly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("module `{0}` is not in the catalog")]
    UnknownModule(String),
    #[error("node `{0}` does not exist")]
    UnknownNode(NodeId),
    #[error("node `{0}` already exists")]
    DuplicateNode(NodeId),
}
