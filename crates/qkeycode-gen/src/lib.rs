//! # QKeyCode table generation for PearPC
//!
//! PearPC reuses QEMU's `QKeyCode` enumeration for keyboard input. This crate
//! turns the enum literal in QEMU's `qapi/ui.json` into the C/C++ tables PearPC
//! compiles in, and joins it against a CSV side table (`qkeycode.csv`) holding
//! each key's PearPC name, macOS virtual key code and macOS glyph.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p qkeycode-gen --bin qkeycode -- --enum ../qemu/qapi/ui.json > src/system/qkeycode.h
//! cargo run -p qkeycode-gen --bin qkeycode -- --pearpc-names ../qemu/qapi/ui.json
//! ```
//!
//! Exactly one of `--enum`, `--names`, `--pearpc-names`, `--mac-keymap` or
//! `--glyphs` selects the artifact, which is written to stdout.
//!
//! ## Modules
//!
//! - [`keycodes`] - Extracts the key code list from the QAPI schema
//! - [`side_table`] - Loads and validates the CSV cross-reference table
//! - [`render`] - Renders the generated tables
//! - [`config`] - Literal names and paths, optionally read from KDL
//! - [`naming`] - Enumeration constant naming

pub mod cli;
pub mod config;
pub mod error;
pub mod keycodes;
pub mod naming;
pub mod render;
pub mod side_table;

pub use config::GeneratorConfig;
pub use error::{KeycodeError, Result};
pub use keycodes::KeyCodeList;
pub use render::{OutputMode, Renderer};
pub use side_table::SideTable;

use naming::EnumNaming;
use std::path::Path;

/// Run the whole pipeline for `mode` and return the generated source
///
/// The side table at `config.side_table` is only read for modes that need it.
/// Nothing is returned unless every step succeeded.
pub fn generate(input: impl AsRef<Path>, mode: OutputMode, config: &GeneratorConfig) -> Result<String> {
    let input = input.as_ref();
    tracing::info!(?mode, input = %input.display(), "generating key code table");

    let keys = KeyCodeList::load(input, config)?;
    let table = if mode.needs_side_table() {
        Some(SideTable::load(
            &config.side_table,
            &keys,
            EnumNaming::from_config(config),
        )?)
    } else {
        None
    };

    Renderer::new(config, &keys).render(mode, table.as_ref())
}

impl From<&cli::OutputArgs> for OutputMode {
    fn from(args: &cli::OutputArgs) -> Self {
        if args.gen_enum {
            Self::Enum
        } else if args.gen_names {
            Self::Names
        } else if args.gen_pearpc {
            Self::PearpcNames
        } else if args.gen_mac_keymap {
            Self::MacKeymap
        } else {
            Self::Glyphs
        }
    }
}
