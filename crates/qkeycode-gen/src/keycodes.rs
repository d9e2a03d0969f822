use crate::config::GeneratorConfig;
use crate::error::{KeycodeError, Result};
use crate::naming::EnumNaming;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The QAPI enum literal as it appears in `qapi/ui.json`
#[derive(Debug, Deserialize)]
struct QapiEnum {
    #[serde(rename = "enum", default)]
    name: Option<String>,
    data: Vec<String>,
}

/// Ordered key code identifiers; position `i` is enum value `i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodeList {
    name: Option<String>,
    keys: Vec<String>,
}

impl KeyCodeList {
    /// Build a list, rejecting identifiers whose enumeration names collide
    pub fn new(keys: Vec<String>, naming: EnumNaming<'_>) -> Result<Self> {
        let mut derived: HashMap<String, &str> = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            let name = naming.enum_name(key);
            if let Some(first) = derived.get(&name) {
                return Err(KeycodeError::DuplicateEnumName {
                    name,
                    first: first.to_string(),
                    second: key.clone(),
                    position,
                });
            }
            derived.insert(name, key.as_str());
        }

        Ok(Self { name: None, keys })
    }

    /// Read `path` and extract the key code literal from it
    pub fn load(path: impl AsRef<Path>, config: &GeneratorConfig) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| KeycodeError::read(e, path))?;
        Self::from_source(&text, path, config)
    }

    /// Extract and parse the key code literal from file contents
    ///
    /// `path` is only used for error reporting.
    pub fn from_source(text: &str, path: impl AsRef<Path>, config: &GeneratorConfig) -> Result<Self> {
        let block = extract_block(text, &config.marker);
        let parsed: QapiEnum = serde_json::from_str(&block).map_err(|e| {
            KeycodeError::parse_error_with_source(e, path.as_ref(), config.marker.as_str(), block.clone())
        })?;

        tracing::debug!(
            name = parsed.name.as_deref().unwrap_or("<unnamed>"),
            keys = parsed.data.len(),
            "parsed key code list"
        );

        let mut list = Self::new(parsed.data, EnumNaming::from_config(config))?;
        list.name = parsed.name;
        Ok(list)
    }

    /// QAPI enum name, e.g. `QKeyCode`, when the literal carried one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Capture the brace-delimited literal introduced by `marker`
///
/// Capture starts on the first line that begins with `{` and mentions
/// `marker` past its first column, and stops after the first captured line
/// whose trimmed content ends with `}`. Single quotes are rewritten to
/// double quotes so the result can be read as JSON. Returns an empty string
/// if no line qualifies.
pub fn extract_block(text: &str, marker: &str) -> String {
    let mut block = String::new();
    let mut capturing = false;

    for line in text.split_inclusive('\n') {
        if !capturing && line.starts_with('{') && line.find(marker).is_some_and(|pos| pos > 0) {
            capturing = true;
        }
        if capturing {
            block.push_str(&line.replace('\'', "\""));
            if line.trim().ends_with('}') {
                break;
            }
        }
    }

    if block.is_empty() {
        tracing::debug!(marker, "no line opened a key code literal");
    } else {
        tracing::debug!(marker, lines = block.lines().count(), "captured key code literal");
    }

    block
}
