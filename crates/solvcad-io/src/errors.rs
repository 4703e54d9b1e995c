//! Error types for every format this crate reads or writes.

use thiserror::Error;

/// Failure parsing or reconstructing a `.slvs` document.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("not a .slvs file: missing or unrecognized header")]
    BadHeader,
    #[error("{0} record is missing required field '{1}'")]
    MissingField(String, String),
    #[error("{0} record has an unparseable value for field '{1}'")]
    BadField(String, String),
    #[error("{0} record has unrecognized type code {1}")]
    UnknownTypeCode(String, u32),
    #[error(transparent)]
    Mesh(#[from] solvcad_polymesh::errors::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure parsing an IDF v3 board-outline file.
#[derive(Debug, Error)]
pub enum IdfError {
    #[error("line {0}: expected a `.HEADER`/`.BOARD_OUTLINE`/`.DRILLED_HOLES` section")]
    ExpectedSection(usize),
    #[error("line {0}: malformed record: {1}")]
    Malformed(usize, String),
    #[error("board outline has no loops")]
    EmptyOutline,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
