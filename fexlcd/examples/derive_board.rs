//! Derive the LCD settings of one board file and print them.

use fexlcd::prelude::*;
use std::path::Path;

fn main() -> Result<(), FexLcdError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/sys_config/a10/hv_tablet.fex".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example derive_board [path/to/<family>/<board>.fex]");
        std::process::exit(1);
    }

    match fexlcd::scan_file(path, &ScanOptions::default())? {
        ScanEntry::Report(report) => {
            print!("{}", report);
            println!("{} warning(s)", report.warnings().count());
        }
        ScanEntry::Skipped { board, reason } => {
            println!("{} skipped: {}", board, reason);
        }
    }
    Ok(())
}
