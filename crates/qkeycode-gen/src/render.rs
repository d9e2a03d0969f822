use crate::config::GeneratorConfig;
use crate::error::{KeycodeError, Result};
use crate::keycodes::KeyCodeList;
use crate::naming::EnumNaming;
use crate::side_table::{KeyCodeMapRow, SideTable};
use std::fmt::Write;

/// The artifact shapes the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `typedef enum QKeyCode { ... } QKeyCode;`
    Enum,
    /// `const char *qkeycode_names[]`, QEMU names only
    Names,
    /// QEMU/PearPC name pairs
    PearpcNames,
    /// macOS virtual key code to enum map
    MacKeymap,
    /// enum to macOS key glyph map
    Glyphs,
}

impl OutputMode {
    /// Whether rendering this mode needs the validated side table
    pub fn needs_side_table(self) -> bool {
        matches!(self, Self::PearpcNames | Self::MacKeymap | Self::Glyphs)
    }
}

/// Renders C/C++ tables for a key code list
pub struct Renderer<'a> {
    config: &'a GeneratorConfig,
    keys: &'a KeyCodeList,
    naming: EnumNaming<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a GeneratorConfig, keys: &'a KeyCodeList) -> Self {
        Self {
            config,
            keys,
            naming: EnumNaming::from_config(config),
        }
    }

    /// Enum members numbered from zero, then the sentinel holding the count
    pub fn render_enum(&self) -> Result<String> {
        let names: Vec<String> = self.keys.iter().map(|k| self.naming.enum_name(k)).collect();
        let width = names
            .iter()
            .map(String::len)
            .chain([self.config.sentinel.len()])
            .max()
            .unwrap_or(0);
        let enum_type = &self.config.enum_type;

        let mut out = String::new();
        writeln!(out, "typedef enum {} {{", enum_type)?;
        for (code, name) in names.iter().enumerate() {
            writeln!(out, "\t{:<width$} = {},", name, code)?;
        }
        writeln!(out, "\t{:<width$} = {}", self.config.sentinel, names.len())?;
        writeln!(out, "}} {};", enum_type)?;
        Ok(out)
    }

    /// QEMU names indexed by enum value
    pub fn render_names(&self) -> Result<String> {
        let var = &self.config.names_var;

        let mut out = String::new();
        writeln!(out, "const char *{}[{}] = {{", var, self.config.sentinel)?;
        for key in self.keys.iter() {
            writeln!(out, "\t{}, // {}", c_string_literal(key), self.naming.enum_name(key))?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
        self.write_len(&mut out)?;
        Ok(out)
    }

    /// QEMU and PearPC names indexed by enum value, `NULL` where PearPC has none
    pub fn render_pearpc_names(&self, table: &SideTable) -> Result<String> {
        let pairs: Vec<(String, String, String)> = self
            .rows(table)
            .map(|(key, row)| {
                let qemu = c_string_literal(key);
                let pearpc = row.pearpc().map_or_else(|| "NULL".to_string(), c_string_literal);
                (qemu, pearpc, self.naming.enum_name(key))
            })
            .collect();
        let qemu_width = pairs.iter().map(|(q, _, _)| q.len()).max().unwrap_or(0);
        let pearpc_width = pairs.iter().map(|(_, p, _)| p.len()).max().unwrap_or(0);

        let mut out = String::new();
        writeln!(
            out,
            "struct {} {{ const char *qemu; const char *pearpc; }} {}[{}] = {{",
            self.config.names_struct, self.config.names_var, self.config.sentinel
        )?;
        for (qemu, pearpc, name) in &pairs {
            writeln!(
                out,
                "\t{{ {:<qemu_width$}, {:<pearpc_width$} }}, // {}",
                qemu, pearpc, name
            )?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
        self.write_len(&mut out)?;
        Ok(out)
    }

    /// macOS virtual key code to enum value, mapped keys only
    pub fn render_mac_keymap(&self, table: &SideTable) -> Result<String> {
        let entries: Vec<(&str, String)> = self
            .rows(table)
            .filter_map(|(key, row)| row.mac().map(|mac| (mac, self.naming.enum_name(key))))
            .collect();
        tracing::debug!(
            mapped = entries.len(),
            omitted = self.keys.len() - entries.len(),
            "rendering mac keymap"
        );
        let width = entries.iter().map(|(mac, _)| mac.len()).max().unwrap_or(0);

        let mut out = String::new();
        writeln!(
            out,
            "const std::unordered_map<int, {}> {} = {{",
            self.config.enum_type, self.config.mac_map_var
        )?;
        for (mac, name) in &entries {
            writeln!(out, "\t{{ {:<width$}, {} }},", mac, name)?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
        Ok(out)
    }

    /// Enum value to key glyph, keys with a glyph only
    pub fn render_glyphs(&self, table: &SideTable) -> Result<String> {
        let entries: Vec<(String, String)> = self
            .rows(table)
            .filter_map(|(key, row)| {
                row.glyph()
                    .map(|glyph| (self.naming.enum_name(key), c_string_literal(glyph)))
            })
            .collect();
        tracing::debug!(
            mapped = entries.len(),
            omitted = self.keys.len() - entries.len(),
            "rendering glyph map"
        );
        let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        let mut out = String::new();
        writeln!(
            out,
            "const std::unordered_map<{}, NSString *> {} = {{",
            self.config.enum_type, self.config.glyph_map_var
        )?;
        for (name, glyph) in &entries {
            writeln!(out, "\t{{ {:<width$}, @{} }},", name, glyph)?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
        Ok(out)
    }

    /// Render `mode`; `table` must be `Some` when the mode needs it
    pub fn render(&self, mode: OutputMode, table: Option<&SideTable>) -> Result<String> {
        let table_for = |mode: OutputMode| {
            table.ok_or_else(|| {
                KeycodeError::config(format!("{:?} output needs a side table", mode))
            })
        };

        match mode {
            OutputMode::Enum => self.render_enum(),
            OutputMode::Names => self.render_names(),
            OutputMode::PearpcNames => self.render_pearpc_names(table_for(mode)?),
            OutputMode::MacKeymap => self.render_mac_keymap(table_for(mode)?),
            OutputMode::Glyphs => self.render_glyphs(table_for(mode)?),
        }
    }

    fn rows<'t>(&'t self, table: &'t SideTable) -> impl Iterator<Item = (&'t str, &'t KeyCodeMapRow)> {
        self.keys.iter().zip(table.rows())
    }

    fn write_len(&self, out: &mut String) -> std::fmt::Result {
        let var = &self.config.names_var;
        writeln!(
            out,
            "const size_t {}_len = sizeof({}) / sizeof({}[0]);",
            var, var, var
        )
    }
}

/// Quote `s` as a C string literal
///
/// Backslashes, double quotes and control characters are escaped; everything
/// else, including non-ASCII text, is emitted as UTF-8.
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
