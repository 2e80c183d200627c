//! Board scanning shared by the library API and the CLI.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::lcd::{derive_lcd_mode, resolve_peripherals, PanelDescriptor, TimingError};
use crate::parser::fex::Document;
use crate::report::{BoardIdentity, BoardReport, ReportLine, ScanEntry, SkipReason};

#[derive(Debug, thiserror::Error)]
pub enum FexLcdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("unknown soc name {family} (board {board})")]
    UnknownChipFamily { family: String, board: String },
    #[error("{0}")]
    Other(String),
}

/// What to do with a board whose chip family has no timing rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownFamilyPolicy {
    /// Stop the whole scan
    #[default]
    Abort,
    /// Log an error and leave the board out
    Skip,
}

/// Options for scan runs.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Extension of board files, without the dot
    pub extension: String,
    pub panel_section: String,
    /// Print warnings for boards skipped over `lcd_if` / `lcd_frm`
    pub report_unsupported: bool,
    pub unknown_family: UnknownFamilyPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: "fex".to_string(),
            panel_section: "lcd0_para".to_string(),
            report_unsupported: false,
            unknown_family: UnknownFamilyPolicy::Abort,
        }
    }
}

/// Identity of `<family>/<board>.<extension>`, or `None` for any other path.
pub fn board_identity(path: &Path, extension: &str) -> Option<BoardIdentity> {
    let file_name = path.file_name()?.to_str()?;
    let board = file_name.strip_suffix(extension)?.strip_suffix('.')?;
    let family = path.parent()?.file_name()?.to_str()?;
    if board.is_empty() || family.is_empty() {
        return None;
    }
    Some(BoardIdentity::new(family, board))
}

/// Recursively find board files under `root`, in file name order.
pub fn discover_board_files(
    root: &Path,
    extension: &str,
) -> Result<Vec<(PathBuf, BoardIdentity)>, FexLcdError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match board_identity(entry.path(), extension) {
            Some(identity) => files.push((entry.into_path(), identity)),
            None => tracing::trace!("Ignoring {}", entry.path().display()),
        }
    }
    Ok(files)
}

/// Core scanning API used by the CLI.
pub struct FexLcdCore;

impl FexLcdCore {
    /// Derive the LCD configuration of one already loaded board file.
    pub fn scan_document(
        doc: &Document,
        board: BoardIdentity,
        options: &ScanOptions,
    ) -> Result<ScanEntry, FexLcdError> {
        let skip = |reason: SkipReason, board: BoardIdentity| -> Result<ScanEntry, FexLcdError> {
            tracing::debug!("Skipping {}: {:?}", board, reason);
            Ok(ScanEntry::Skipped { board, reason })
        };

        let Some(record) = doc.section(&options.panel_section) else {
            return skip(SkipReason::NoPanel, board);
        };
        let panel = PanelDescriptor::new(record);
        if !panel.is_used() {
            return skip(SkipReason::LcdUnused, board);
        }
        // Only the HV (parallel RGB) interface maps onto CONFIG_VIDEO_LCD_MODE
        if !panel.interface().is_some_and(|v| v.is_int(0)) {
            return skip(SkipReason::UnsupportedInterface(panel.interface().cloned()), board);
        }
        if !panel.frame_format().is_some_and(|v| v.is_int(1)) {
            return skip(SkipReason::UnsupportedFrameFormat(panel.frame_format().cloned()), board);
        }

        let mut lines = Vec::new();
        match derive_lcd_mode(&panel, &board.family) {
            Ok(mode) => {
                lines.push(ReportLine::config(crate::lcd::timing::CONFIG_VIDEO_LCD_MODE, mode));
                lines.extend(resolve_peripherals(&panel, doc));
            }
            Err(TimingError::UnknownChipFamily(family)) => match options.unknown_family {
                UnknownFamilyPolicy::Abort => {
                    return Err(FexLcdError::UnknownChipFamily {
                        family,
                        board: board.board,
                    });
                }
                UnknownFamilyPolicy::Skip => {
                    tracing::error!("Unknown soc name {} for board {}, skipping", family, board.board);
                    return Ok(ScanEntry::Skipped {
                        board,
                        reason: SkipReason::UnknownChipFamily(family),
                    });
                }
            },
            Err(e @ TimingError::MissingField(_)) => {
                tracing::warn!("Cannot derive LCD mode for {}: {}", board, e);
                lines.push(ReportLine::warning(e.to_string()));
            }
        }

        Ok(ScanEntry::Report(BoardReport { board, lines }))
    }

    /// Load and scan a single board file.
    pub fn scan_board(
        path: &Path,
        board: BoardIdentity,
        options: &ScanOptions,
    ) -> Result<ScanEntry, FexLcdError> {
        let doc = Document::load(path)?;
        Self::scan_document(&doc, board, options)
    }

    /// Scan every board under `root`, handing each entry to `sink` as soon as
    /// it is ready.
    ///
    /// Unreadable board files are logged and left out. A fatal error stops
    /// the scan after the entries before it have reached `sink`.
    pub fn scan_tree_with<F>(root: &Path, options: &ScanOptions, mut sink: F) -> Result<(), FexLcdError>
    where
        F: FnMut(ScanEntry) -> Result<(), FexLcdError>,
    {
        let files = discover_board_files(root, &options.extension)?;
        tracing::info!("Found {} board files under {}", files.len(), root.display());

        let mut reported = 0;
        for (path, board) in files {
            let entry = match Self::scan_board(&path, board, options) {
                Ok(entry) => entry,
                Err(FexLcdError::Io(e)) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            if entry.report().is_some() {
                reported += 1;
            }
            sink(entry)?;
        }

        tracing::info!("Derived LCD configuration for {} boards", reported);
        Ok(())
    }

    /// Scan every board under `root` and collect the entries.
    pub fn scan_tree(root: &Path, options: &ScanOptions) -> Result<Vec<ScanEntry>, FexLcdError> {
        let mut entries = Vec::new();
        Self::scan_tree_with(root, options, |entry| {
            entries.push(entry);
            Ok(())
        })?;
        Ok(entries)
    }
}
