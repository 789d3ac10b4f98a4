use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// The file handed to a preprocessor: where the source lives, where the
/// processed output should go, and whatever else the bundler attached to it.
///
/// Fields other than the two paths are kept as-is in `extra` so that a
/// descriptor read from JSON can be passed on without losing anything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub file_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileDescriptor {
    pub fn new(file_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            output_path: output_path.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
