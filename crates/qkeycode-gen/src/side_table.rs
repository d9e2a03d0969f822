use crate::error::{KeycodeError, Result};
use crate::keycodes::KeyCodeList;
use crate::naming::EnumNaming;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// One side-table record: the names a key code has in other systems
///
/// Empty fields mean the key has no mapping in that system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyCodeMapRow {
    /// Enumeration constant, e.g. `Q_KEY_CODE_ESC`
    pub qkeycode: String,
    /// PearPC key name as used in `ppccfg` key bindings
    #[serde(default)]
    pub pearpc: String,
    /// macOS virtual key code expression, e.g. `kVK_Escape`
    #[serde(default)]
    pub mac: String,
    /// Label drawn for the key in the macOS UI
    #[serde(default)]
    pub glyph: String,
    #[serde(skip)]
    line: u64,
}

impl KeyCodeMapRow {
    pub fn pearpc(&self) -> Option<&str> {
        non_empty(&self.pearpc)
    }

    pub fn mac(&self) -> Option<&str> {
        non_empty(&self.mac)
    }

    pub fn glyph(&self) -> Option<&str> {
        non_empty(&self.glyph)
    }

    /// Line of this record in the CSV file
    pub fn line(&self) -> u64 {
        self.line
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

/// Side table validated against a [`KeyCodeList`]
///
/// Row `i` always describes key code `i`.
#[derive(Debug, Clone)]
pub struct SideTable {
    rows: Vec<KeyCodeMapRow>,
}

impl SideTable {
    /// Load the CSV at `path` and validate it against `keys`
    pub fn load(path: impl AsRef<Path>, keys: &KeyCodeList, naming: EnumNaming<'_>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| KeycodeError::read(e, path))?;
        Self::from_reader(file, path, keys, naming)
    }

    /// Read CSV from `reader`; `path` is only used for error reporting
    pub fn from_reader<R: io::Read>(
        reader: R,
        path: impl Into<PathBuf>,
        keys: &KeyCodeList,
        naming: EnumNaming<'_>,
    ) -> Result<Self> {
        let path: PathBuf = path.into();
        let csv_error = |source: csv::Error| KeycodeError::SideTable {
            source,
            path: path.clone(),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers().map_err(&csv_error)?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(&csv_error)?;
            let mut row: KeyCodeMapRow = record.deserialize(Some(&headers)).map_err(&csv_error)?;
            row.line = record.position().map_or(0, |p| p.line());
            rows.push(row);
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "read side table");

        let table = Self { rows };
        table.validate(&path, keys, naming)?;
        Ok(table)
    }

    /// Check row count, then row-by-row enumeration names
    fn validate(&self, path: &Path, keys: &KeyCodeList, naming: EnumNaming<'_>) -> Result<()> {
        if self.rows.len() != keys.len() {
            return Err(KeycodeError::RowCount {
                path: path.to_path_buf(),
                expected: keys.len(),
                found: self.rows.len(),
            });
        }

        for (position, (row, key)) in self.rows.iter().zip(keys.iter()).enumerate() {
            let expected = naming.enum_name(key);
            if row.qkeycode != expected {
                return Err(KeycodeError::RowMismatch {
                    position,
                    line: row.line,
                    expected,
                    found: row.qkeycode.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn rows(&self) -> &[KeyCodeMapRow] {
        &self.rows
    }

    /// Row describing key code `position`
    pub fn get(&self, position: usize) -> Option<&KeyCodeMapRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
