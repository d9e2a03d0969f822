use crate::error::{KeycodeError, Result};
use std::path::{Path, PathBuf};

/// Literal names used when extracting, validating and rendering key codes
///
/// The defaults reproduce the tables PearPC ships in `system/qkeycode.h`,
/// `system/qkeycode.cc` and the macOS keyboard sources. A KDL file can
/// override any of them:
///
/// ```kdl
/// marker "QKeyCode"
/// enum-prefix "Q_KEY_CODE_"
/// side-table "tools/qkeycode.csv"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Token that must appear on the opening line of the key code literal
    pub marker: String,
    /// Prefix prepended to every uppercased identifier
    pub enum_prefix: String,
    /// Name of the generated C enum type
    pub enum_type: String,
    /// Trailing enum member holding the number of key codes
    pub sentinel: String,
    /// Variable name of the names and cross-reference arrays
    pub names_var: String,
    /// Struct name of the cross-reference array elements
    pub names_struct: String,
    /// Variable name of the macOS virtual key map
    pub mac_map_var: String,
    /// Variable name of the glyph map
    pub glyph_map_var: String,
    /// Location of the CSV side table
    pub side_table: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: "QKeyCode".to_string(),
            enum_prefix: "Q_KEY_CODE_".to_string(),
            enum_type: "QKeyCode".to_string(),
            sentinel: "Q_KEY_CODE__MAX".to_string(),
            names_var: "qkeycode_names".to_string(),
            names_struct: "QKeyCodeNames".to_string(),
            mac_map_var: "mac_to_qkeycode_map".to_string(),
            glyph_map_var: "qkeycode_glyphs".to_string(),
            side_table: PathBuf::from("qkeycode.csv"),
        }
    }
}

impl GeneratorConfig {
    /// Read a KDL config file and overlay it on the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| KeycodeError::read(e, path))?;
        let config = Self::from_kdl(&text)?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Ok(config)
    }

    /// Parse a KDL document, starting from [`GeneratorConfig::default`]
    pub fn from_kdl(text: &str) -> Result<Self> {
        let doc = text
            .parse::<kdl::KdlDocument>()
            .map_err(|e| KeycodeError::config(format!("Failed to parse KDL: {}", e)))?;

        let mut config = Self::default();
        let mut seen: Vec<&str> = Vec::new();

        for node in doc.nodes() {
            let name = node.name().value();
            if seen.contains(&name) {
                return Err(KeycodeError::config(format!("Duplicate config node: {}", name)));
            }
            seen.push(name);

            let value = node
                .entries()
                .get(0)
                .and_then(|e| e.value().as_string())
                .ok_or_else(|| KeycodeError::config(format!("{} expects a string value", name)))?
                .to_string();

            match name {
                "marker" => config.marker = value,
                "enum-prefix" => config.enum_prefix = value,
                "enum-type" => config.enum_type = value,
                "sentinel" => config.sentinel = value,
                "names-var" => config.names_var = value,
                "names-struct" => config.names_struct = value,
                "mac-map-var" => config.mac_map_var = value,
                "glyph-map-var" => config.glyph_map_var = value,
                "side-table" => config.side_table = PathBuf::from(value),
                other => {
                    return Err(KeycodeError::config(format!("Unknown config node: {}", other)));
                }
            }
        }

        if config.marker.is_empty() {
            return Err(KeycodeError::config("marker must not be empty"));
        }

        Ok(config)
    }
}
