use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which stage of decoding rejected a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeCategory {
    Syntax,
    Data,
    Eof,
    Io,
}

impl From<serde_json::error::Category> for DecodeCategory {
    fn from(category: serde_json::error::Category) -> Self {
        use serde_json::error::Category;
        match category {
            Category::Syntax => DecodeCategory::Syntax,
            Category::Data => DecodeCategory::Data,
            Category::Eof => DecodeCategory::Eof,
            Category::Io => DecodeCategory::Io,
        }
    }
}

impl fmt::Display for DecodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecodeCategory::Syntax => "syntax error",
            DecodeCategory::Data => "invalid value",
            DecodeCategory::Eof => "unexpected end of input",
            DecodeCategory::Io => "read error",
        })
    }
}

/// Location of a decode failure inside a JSON document, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDiagnostic {
    pub line: usize,
    pub character: usize,
    pub category: DecodeCategory,
    pub message: String,
}

impl From<&serde_json::Error> for JsonDiagnostic {
    fn from(err: &serde_json::Error) -> Self {
        // serde_json reports 0 when the failure is not tied to a position.
        Self {
            line: err.line().max(1),
            character: err.column().max(1),
            category: err.classify().into(),
            message: strip_position(&err.to_string()),
        }
    }
}

impl fmt::Display for JsonDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at line {}, character {}: {}: {}",
            self.line, self.character, self.category, self.message
        )
    }
}

fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{}: unable to read file: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {diagnostic}", .path.display())]
    Decode {
        path: PathBuf,
        diagnostic: JsonDiagnostic,
    },

    #[error("{}: expected geometry file is missing", .path.display())]
    Missing { path: PathBuf },
}
