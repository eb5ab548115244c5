//! Purpose: Typed failures shared by the echo transform, HTTP boundary, and CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: One error struct with a stable kind plus optional positional context.
//! Invariants: Transform failures carry exactly one kind; no partial success.
//! Invariants: Kind labels (`{:?}`) are part of the wire envelope and stay stable.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Encoding,
    Syntax,
    DuplicateKey,
    TrailingContent,
    NumberSyntax,
    ShapeMismatch,
    Usage,
    NotFound,
    Io,
    Internal,
}

impl ErrorKind {
    /// True for kinds produced while turning request bytes into a value.
    pub fn is_transform_failure(self) -> bool {
        matches!(
            self,
            ErrorKind::Encoding
                | ErrorKind::Syntax
                | ErrorKind::DuplicateKey
                | ErrorKind::TrailingContent
                | ErrorKind::NumberSyntax
                | ErrorKind::ShapeMismatch
        )
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    key: Option<String>,
    offset: Option<u64>,
    line: Option<u64>,
    column: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            key: None,
            offset: None,
            line: None,
            column: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn column(&self) -> Option<u64> {
        self.column
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attach a 1-based line/column pair.
    pub fn with_position(mut self, line: u64, column: u64) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {key:?})")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
        }
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " (line: {line}, column: {column})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Io => 4,
        ErrorKind::Encoding
        | ErrorKind::Syntax
        | ErrorKind::DuplicateKey
        | ErrorKind::TrailingContent
        | ErrorKind::NumberSyntax
        | ErrorKind::ShapeMismatch => 5,
    }
}
