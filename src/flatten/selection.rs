use serde::Deserialize;
use serde_json::Value;

pub const PATH_SEPARATOR: char = '.';
pub const COLUMN_SEPARATOR: &str = "_";

/// A column picked out of each record by a dot-separated key path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawFieldSpec")]
pub struct FieldSpec {
    pub path: String,
    pub column: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldSpec {
    Path(String),
    Detailed { path: String, column: Option<String> },
}

impl From<RawFieldSpec> for FieldSpec {
    fn from(value: RawFieldSpec) -> Self {
        match value {
            RawFieldSpec::Path(path) => FieldSpec { path, column: None },
            RawFieldSpec::Detailed { path, column } => FieldSpec { path, column },
        }
    }
}

impl FieldSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: None,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn column_name(&self) -> String {
        match &self.column {
            Some(column) => column.clone(),
            None => self
                .path
                .split(PATH_SEPARATOR)
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR),
        }
    }

    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.path
            .split(PATH_SEPARATOR)
            .try_fold(record, |current, key| current.as_object()?.get(key))
    }
}
