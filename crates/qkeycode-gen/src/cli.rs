use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "QEMU QKeyCode generator")]
pub struct QkeycodeArgs {
    /// QEMU qapi/ui.json input file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// KDL file overriding the generated names and side-table location
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Output options; exactly one must be given
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct OutputArgs {
    /// Generate QKeyCode enum
    #[arg(short = 'e', long = "enum")]
    pub gen_enum: bool,

    /// Generate QKeyCode names
    #[arg(short = 'n', long = "names")]
    pub gen_names: bool,

    /// Generate QKeyCode and PearPC names
    #[arg(short = 'p', long = "pearpc-names")]
    pub gen_pearpc: bool,

    /// Generate macOS virtual key code to QKeyCode map
    #[arg(short = 'm', long = "mac-keymap")]
    pub gen_mac_keymap: bool,

    /// Generate QKeyCode to macOS key glyph map
    #[arg(short = 'g', long = "glyphs")]
    pub gen_glyphs: bool,
}
