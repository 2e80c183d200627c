//! fexlcd - U-Boot LCD configuration from sunxi `.fex` board descriptions
//!
//! Allwinner's `sys_config` trees describe each board in a `.fex` file. This
//! library reads the `lcd0_para` section of every board, derives the
//! `CONFIG_VIDEO_LCD_MODE` timing string and resolves the power, backlight
//! and backlight PWM pins U-Boot needs to drive the panel.
//!
//! # Quick Start
//!
//! ```no_run
//! use fexlcd::{FexLcdCore, ScanOptions};
//! use std::path::Path;
//!
//! let entries = FexLcdCore::scan_tree(Path::new("sys_config"), &ScanOptions::default()).unwrap();
//!
//! for report in entries.iter().filter_map(|e| e.report()) {
//!     print!("{}", report);
//! }
//! ```
//!
//! # Features
//!
//! - **Section reader**: typed access to `.fex` sections
//! - **Pin decoding**: `port:PB07<...>` descriptors to `PB7`
//! - **Timing derivation**: margins and sync widths per chip family
//! - **Peripheral resolution**: power, backlight enable and PWM pins

pub mod core;
pub mod gpio;
pub mod lcd;
pub mod parser;
pub mod report;

// Re-export main types
pub use crate::core::{
    board_identity, discover_board_files, FexLcdCore, FexLcdError, ScanOptions,
    UnknownFamilyPolicy,
};
pub use gpio::{decode_gpio, GpioPin};
pub use lcd::{derive_lcd_mode, ChipFamily, PanelDescriptor, TimingError, TimingResult};
pub use parser::fex::{read_section, Document, FexValue, SectionRecord};
pub use report::{BoardIdentity, BoardReport, ReportLine, ScanEntry, SkipReason};

/// Scan a single board file, taking the chip family from its parent directory.
pub fn scan_file(
    path: &std::path::Path,
    options: &ScanOptions,
) -> Result<ScanEntry, FexLcdError> {
    let board = board_identity(path, &options.extension).ok_or_else(|| {
        FexLcdError::Other(format!(
            "{} is not a <family>/<board>.{} path",
            path.display(),
            options.extension
        ))
    })?;
    FexLcdCore::scan_board(path, board, options)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BoardIdentity, BoardReport, FexLcdCore, FexLcdError, ReportLine, ScanEntry, ScanOptions,
        SkipReason, UnknownFamilyPolicy,
    };
}
