use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural failure while reading a level document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} (at byte {offset})")]
pub struct XmlError {
    /// What went wrong.
    pub kind: XmlErrorKind,
    /// Byte offset into the source where the problem was detected.
    pub offset: usize,
}

/// Kinds of structural document errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlErrorKind {
    /// No element in the input.
    #[error("document has no root element")]
    MissingRoot,
    /// Non-whitespace text before or after the root.
    #[error("text outside of the root element")]
    TextOutsideRoot,
    /// A second top-level element.
    #[error("more than one root element")]
    MultipleRoots,
    /// `<` without a matching `>`.
    #[error("input ends inside a tag")]
    UnterminatedTag,
    /// Input ended with this element still open.
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),
    /// Closing tag names a different element.
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// Innermost open element.
        expected: String,
        /// Name in the closing tag.
        found: String,
    },
    /// Closing tag with nothing open.
    #[error("closing tag </{0}> has no matching opening tag")]
    UnexpectedClose(String),
    /// `<>` or `</>`.
    #[error("empty tag name")]
    EmptyTagName,
    /// `=value` with no key.
    #[error("attribute value has no key")]
    MissingAttributeKey,
    /// Same key twice on one element.
    #[error("attribute `{0}` appears twice")]
    DuplicateAttribute(String),
    /// Quoted value runs to the end of input.
    #[error("attribute value is not terminated")]
    UnterminatedValue,
    /// A specific character was required here.
    #[error("expected `{0}`")]
    Expected(char),
    /// Nesting exceeds the parser limit.
    #[error("elements nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Error type for level loading and saving.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a well-formed document.
    #[error("malformed level file {}: {source}", .path.display())]
    Xml {
        /// File being read.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: XmlError,
    },
    /// In-memory text is not a well-formed document.
    #[error("malformed level document: {0}")]
    Document(#[from] XmlError),
    /// Required child element is absent.
    #[error("level document has no <{0}> node")]
    MissingNode(&'static str),
    /// Required attribute is absent.
    #[error("<{tag}> is missing the `{key}` attribute")]
    MissingAttribute {
        /// Element missing the attribute.
        tag: String,
        /// Attribute name.
        key: &'static str,
    },
    /// Attribute value does not parse.
    #[error("attribute `{key}` has invalid value {value:?}")]
    InvalidAttribute {
        /// Attribute name.
        key: String,
        /// Raw value as written.
        value: String,
    },
    /// Tile data has the wrong number of cells.
    #[error("tile data holds {found} cells, expected {expected}")]
    TileCount {
        /// Cells in the grid.
        expected: usize,
        /// Cells in the data.
        found: usize,
    },
    /// Cell value is not a valid tile code.
    #[error("invalid tile code {0:?}")]
    InvalidTileCode(String),
    /// Spawn tile outside the grid.
    #[error("spawn point ({x}, {y}) lies outside the grid")]
    SpawnOutOfBounds {
        /// Tile column.
        x: i64,
        /// Tile row.
        y: i64,
    },
    /// Header size differs from this build.
    #[error("level {key} is {found} but this build uses {expected}")]
    DimensionMismatch {
        /// Header attribute name.
        key: &'static str,
        /// Value this build uses.
        expected: usize,
        /// Value in the file.
        found: usize,
    },
}

impl LevelError {
    /// Attach the file a document error came from.
    pub(crate) fn in_file(self, path: PathBuf) -> Self {
        match self {
            LevelError::Document(source) => LevelError::Xml { path, source },
            other => other,
        }
    }
}
