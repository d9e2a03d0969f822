use qkeycode_gen::{GeneratorConfig, KeyCodeList, KeycodeError, OutputMode, generate};
use std::fs;
use std::path::{Path, PathBuf};

const UI_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/ui.json");
const SIDE_TABLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/qkeycode.csv");

fn pearpc_config() -> GeneratorConfig {
    GeneratorConfig {
        side_table: PathBuf::from(SIDE_TABLE),
        ..Default::default()
    }
}

fn config_with_table(dir: &Path, csv: &str) -> GeneratorConfig {
    let path = dir.join("qkeycode.csv");
    fs::write(&path, csv).expect("write side table");
    GeneratorConfig {
        side_table: path,
        ..Default::default()
    }
}

fn write_input(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("ui.json");
    fs::write(&path, text).expect("write input");
    path
}

#[test]
fn fixture_has_full_key_code_list() {
    let keys = KeyCodeList::load(UI_JSON, &GeneratorConfig::default()).expect("load");
    assert_eq!(keys.len(), 148);
    assert_eq!(keys.keys().first().map(String::as_str), Some("unmapped"));
    assert_eq!(keys.keys().last().map(String::as_str), Some("ac_bookmarks"));
}

#[test]
fn enum_matches_pearpc_header_layout() {
    let out = generate(UI_JSON, OutputMode::Enum, &GeneratorConfig::default()).expect("generate");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.first(), Some(&"typedef enum QKeyCode {"));
    assert_eq!(lines[1], "\tQ_KEY_CODE_UNMAPPED         = 0,");
    assert_eq!(lines[148], "\tQ_KEY_CODE_AC_BOOKMARKS     = 147,");
    assert_eq!(lines[149], "\tQ_KEY_CODE__MAX             = 148");
    assert_eq!(lines.last(), Some(&"} QKeyCode;"));
    assert_eq!(lines.len(), 151);
}

#[test]
fn enum_does_not_need_side_table() {
    let config = GeneratorConfig {
        side_table: PathBuf::from("/nonexistent/qkeycode.csv"),
        ..Default::default()
    };
    assert!(generate(UI_JSON, OutputMode::Enum, &config).is_ok());
    assert!(generate(UI_JSON, OutputMode::Names, &config).is_ok());
}

#[test]
fn pearpc_names_match_shipped_table() {
    let out = generate(UI_JSON, OutputMode::PearpcNames, &pearpc_config()).expect("generate");

    for line in [
        "\t{ \"unmapped\"        , NULL           }, // Q_KEY_CODE_UNMAPPED",
        "\t{ \"esc\"             , \"Escape\"       }, // Q_KEY_CODE_ESC",
        "\t{ \"ret\"             , \"Return\"       }, // Q_KEY_CODE_RET",
        "\t{ \"backslash\"       , \"\\\\\"           }, // Q_KEY_CODE_BACKSLASH",
        "\t{ \"comma\"           , \",\"            }, // Q_KEY_CODE_COMMA",
        "\t{ \"kp_enter\"        , \"Keypad-Enter\" }, // Q_KEY_CODE_KP_ENTER",
    ] {
        assert!(out.lines().any(|l| l == line), "missing line: {line}");
    }
    assert!(out.ends_with(
        "const size_t qkeycode_names_len = sizeof(qkeycode_names) / sizeof(qkeycode_names[0]);\n"
    ));
}

#[test]
fn mac_keymap_lists_only_mapped_keys() {
    let out = generate(UI_JSON, OutputMode::MacKeymap, &pearpc_config()).expect("generate");
    let entries: Vec<&str> = out.lines().filter(|l| l.starts_with("\t{")).collect();

    assert_eq!(entries.len(), 105);
    assert!(entries.iter().any(|l| l.contains("kVK_Escape") && l.ends_with("Q_KEY_CODE_ESC },")));
    assert!(!out.contains("Q_KEY_CODE_UNMAPPED"));
}

#[test]
fn glyph_map_lists_only_labelled_keys() {
    let out = generate(UI_JSON, OutputMode::Glyphs, &pearpc_config()).expect("generate");
    assert!(out.starts_with("const std::unordered_map<QKeyCode, NSString *> qkeycode_glyphs = {\n"));
    assert!(out.contains("{ Q_KEY_CODE_META_L   , @\"⌘\" },"));
    assert!(!out.contains("Q_KEY_CODE_A "));
}

#[test]
fn escape_mapped_return_unmapped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "{ 'enum': 'QKeyCode',\n  'data': [ 'esc', 'ret' ] }\n");
    let config = config_with_table(
        dir.path(),
        "qkeycode,pearpc,mac,glyph\nQ_KEY_CODE_ESC,Escape,kVK_Escape,\nQ_KEY_CODE_RET,,,\n",
    );

    let names = generate(&input, OutputMode::PearpcNames, &config).expect("pearpc names");
    let entries: Vec<&str> = names.lines().filter(|l| l.starts_with("\t{")).collect();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].contains("\"Escape\""));
    assert!(entries[1].contains("NULL"));

    let map = generate(&input, OutputMode::MacKeymap, &config).expect("mac keymap");
    let entries: Vec<&str> = map.lines().filter(|l| l.starts_with("\t{")).collect();
    assert_eq!(entries, ["\t{ kVK_Escape, Q_KEY_CODE_ESC },"]);
}

#[test]
fn row_count_mismatch_aborts_every_table_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "{ 'enum': 'QKeyCode', 'data': [ 'esc', 'ret' ] }\n");
    let config = config_with_table(dir.path(), "qkeycode,pearpc\nQ_KEY_CODE_ESC,Escape\n");

    for mode in [OutputMode::PearpcNames, OutputMode::MacKeymap, OutputMode::Glyphs] {
        let err = generate(&input, mode, &config).unwrap_err();
        assert!(
            matches!(err, KeycodeError::RowCount { expected: 2, found: 1, .. }),
            "{mode:?}: {err:?}"
        );
    }
}

#[test]
fn identity_mismatch_reports_position() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "{ 'enum': 'QKeyCode', 'data': [ 'esc', 'ret', 'tab' ] }\n");
    let config = config_with_table(
        dir.path(),
        "qkeycode,pearpc\nQ_KEY_CODE_ESC,Escape\nQ_KEY_CODE_RET,Return\nQ_KEY_CODE_SPC,Space\n",
    );

    let err = generate(&input, OutputMode::Glyphs, &config).unwrap_err();
    match err {
        KeycodeError::RowMismatch { position, expected, found, .. } => {
            assert_eq!(position, 2);
            assert_eq!(expected, "Q_KEY_CODE_TAB");
            assert_eq!(found, "Q_KEY_CODE_SPC");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn input_without_marker_fails_to_parse() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "# nothing to see here\n{ 'enum': 'KeyValue' }\n");

    let err = generate(&input, OutputMode::Names, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, KeycodeError::ParseError { .. }));
}

#[test]
fn missing_input_is_a_read_error() {
    let err = generate("/nonexistent/ui.json", OutputMode::Enum, &GeneratorConfig::default())
        .unwrap_err();
    assert!(matches!(err, KeycodeError::Read { .. }));
}

#[test]
fn output_is_deterministic() {
    let config = pearpc_config();
    for mode in [
        OutputMode::Enum,
        OutputMode::Names,
        OutputMode::PearpcNames,
        OutputMode::MacKeymap,
        OutputMode::Glyphs,
    ] {
        let first = generate(UI_JSON, mode, &config).expect("first");
        let second = generate(UI_JSON, mode, &config).expect("second");
        assert_eq!(first, second, "{mode:?}");
    }
}
