//! Integration tests for scanning sys_config trees

use fexlcd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn render(entries: &[ScanEntry], options: &ScanOptions) -> String {
    entries
        .iter()
        .filter_map(|e| e.render(options.report_unsupported))
        .collect()
}

fn write_board(root: &Path, family: &str, board: &str, content: &str) {
    let dir = root.join(family);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.fex", board)), content).unwrap();
}

const HV_PANEL: &str = "\
[lcd0_para]
lcd_used = 1
lcd_if = 0
lcd_frm = 1
lcd_x = 480
lcd_y = 272
lcd_dclk_freq = 9
lcd_hbp = 43
lcd_ht = 531
lcd_vbp = 12
lcd_vt = 576
lcd_hspw = 41
lcd_vspw = 10
";

#[test]
fn test_scan_fixture_tree_matches_expected_report() {
    let options = ScanOptions::default();
    let entries = FexLcdCore::scan_tree(&fixture_path("sys_config"), &options)
        .expect("Fixture tree should scan");

    let expected = fs::read_to_string(fixture_path("expected_report.txt")).unwrap();
    assert_eq!(render(&entries, &options), expected);
}

#[test]
fn test_scan_is_repeatable() {
    let options = ScanOptions::default();
    let first = FexLcdCore::scan_tree(&fixture_path("sys_config"), &options).unwrap();
    let second = FexLcdCore::scan_tree(&fixture_path("sys_config"), &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(render(&first, &options), render(&second, &options));
}

#[test]
fn test_skipped_boards_produce_no_block() {
    let options = ScanOptions::default();
    let entries = FexLcdCore::scan_tree(&fixture_path("sys_config"), &options).unwrap();
    let output = render(&entries, &options);

    for board in ["no_lcd", "unused_lcd", "lvds_panel", "cpu_panel"] {
        assert!(!output.contains(board), "{} should not be reported", board);
    }

    let skipped: Vec<_> = entries
        .iter()
        .filter_map(|e| match e {
            ScanEntry::Skipped { board, reason } => Some((board.board.as_str(), reason)),
            ScanEntry::Report(_) => None,
        })
        .collect();
    assert_eq!(skipped.len(), 4);
    assert!(skipped.contains(&("no_lcd", &SkipReason::NoPanel)));
    assert!(skipped.contains(&("unused_lcd", &SkipReason::LcdUnused)));
}

#[test]
fn test_report_unsupported_adds_warnings() {
    let options = ScanOptions {
        report_unsupported: true,
        ..ScanOptions::default()
    };
    let entries = FexLcdCore::scan_tree(&fixture_path("sys_config"), &options).unwrap();
    let output = render(&entries, &options);

    assert!(output.contains("# warning: unsupported 'lcd_if' : LCD_IF_LVDS (3)\n\n"));
    assert!(output.contains("# warning: unsupported 'lcd_if' : LCD_IF_CPU (1)\n\n"));
    // Boards without a panel stay silent
    assert!(!output.contains("no_lcd"));
}

#[test]
fn test_unknown_family_aborts_after_earlier_boards() {
    let dir = tempfile::tempdir().unwrap();
    write_board(dir.path(), "a10", "first", HV_PANEL);
    write_board(dir.path(), "h3", "orangepi", HV_PANEL);
    write_board(dir.path(), "zz", "never_seen", HV_PANEL);

    let mut seen = Vec::new();
    let result = FexLcdCore::scan_tree_with(dir.path(), &ScanOptions::default(), |entry| {
        seen.push(entry.board().board.clone());
        Ok(())
    });

    match result {
        Err(FexLcdError::UnknownChipFamily { family, board }) => {
            assert_eq!(family, "h3");
            assert_eq!(board, "orangepi");
        }
        other => panic!("Expected unknown family error, got {:?}", other),
    }
    assert_eq!(seen, vec!["first".to_string()]);
}

#[test]
fn test_unknown_family_can_be_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_board(dir.path(), "a10", "first", HV_PANEL);
    write_board(dir.path(), "h3", "orangepi", HV_PANEL);
    write_board(dir.path(), "a31", "last", HV_PANEL);

    let options = ScanOptions {
        unknown_family: UnknownFamilyPolicy::Skip,
        ..ScanOptions::default()
    };
    let entries = FexLcdCore::scan_tree(dir.path(), &options).unwrap();
    let reported: Vec<_> = entries
        .iter()
        .filter_map(|e| e.report())
        .map(|r| r.board.board.as_str())
        .collect();
    assert_eq!(reported, vec!["first", "last"]);
}

#[test]
fn test_board_layout_rules() {
    let dir = tempfile::tempdir().unwrap();
    write_board(dir.path(), "a20", "good", HV_PANEL);
    fs::write(dir.path().join("a20").join("good.fex.bak"), HV_PANEL).unwrap();
    fs::write(dir.path().join("a20").join("notes.txt"), HV_PANEL).unwrap();

    let entries = FexLcdCore::scan_tree(dir.path(), &ScanOptions::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].board(), &BoardIdentity::new("a20", "good"));
}

#[test]
fn test_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    let family = dir.path().join("a13");
    fs::create_dir_all(&family).unwrap();
    fs::write(family.join("board.cfg"), HV_PANEL).unwrap();
    fs::write(family.join("other.fex"), HV_PANEL).unwrap();

    let options = ScanOptions {
        extension: "cfg".to_string(),
        ..ScanOptions::default()
    };
    let entries = FexLcdCore::scan_tree(dir.path(), &options).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].board().board, "board");
}

#[test]
fn test_missing_root_is_an_error() {
    let result = FexLcdCore::scan_tree(Path::new("does/not/exist"), &ScanOptions::default());
    assert!(matches!(result, Err(FexLcdError::Walk(_))));
}

#[test]
fn test_scan_single_file() {
    let entry = fexlcd::scan_file(
        &fixture_path("sys_config").join("a31s").join("mid_tablet.fex"),
        &ScanOptions::default(),
    )
    .expect("Should scan");
    let report = entry.report().expect("Should be reported");
    assert_eq!(report.config("CONFIG_VIDEO_LCD_POWER"), Some("PH27"));
    assert_eq!(report.config("CONFIG_VIDEO_LCD_BL_EN"), None);
}
