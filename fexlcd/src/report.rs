//! Per-board output of a scan.

use std::fmt;

use serde::Serialize;

use crate::parser::fex::FexValue;

/// (chip family, board name), taken from `<family>/<board>.fex`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoardIdentity {
    pub family: String,
    pub board: String,
}

impl BoardIdentity {
    pub fn new(family: impl Into<String>, board: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            board: board.into(),
        }
    }
}

impl fmt::Display for BoardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.board, self.family)
    }
}

/// One line of a board block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportLine {
    Config { key: String, value: String },
    Warning { message: String },
}

impl ReportLine {
    pub fn config(key: impl Into<String>, value: impl ToString) -> Self {
        ReportLine::Config {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        ReportLine::Warning {
            message: message.into(),
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Config { key, value } => write!(f, "{}=\"{}\"", key, value),
            ReportLine::Warning { message } => write!(f, "# warning: {}", message),
        }
    }
}

/// Everything derived for one eligible board, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardReport {
    pub board: BoardIdentity,
    pub lines: Vec<ReportLine>,
}

impl BoardReport {
    /// Value of config `key`, if it was emitted.
    pub fn config(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            ReportLine::Config { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn configs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            ReportLine::Config { key, value } => Some((key.as_str(), value.as_str())),
            ReportLine::Warning { .. } => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ReportLine::Warning { message } => Some(message.as_str()),
            ReportLine::Config { .. } => None,
        })
    }
}

impl fmt::Display for BoardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.board)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Why a candidate board has no report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "value", rename_all = "snake_case")]
pub enum SkipReason {
    /// No `lcd0_para` section
    NoPanel,
    LcdUnused,
    UnsupportedInterface(Option<FexValue>),
    UnsupportedFrameFormat(Option<FexValue>),
    UnknownChipFamily(String),
}

impl SkipReason {
    /// Warning text for skips that can be reported on request.
    pub fn unsupported_warning(&self) -> Option<String> {
        match self {
            SkipReason::UnsupportedInterface(value) => {
                let name = value
                    .as_ref()
                    .and_then(FexValue::as_int)
                    .and_then(crate::lcd::LcdInterface::from_value)
                    .map_or("unknown", |i| i.name());
                Some(format!(
                    "unsupported 'lcd_if' : {} ({})",
                    name,
                    display_or_missing(value)
                ))
            }
            SkipReason::UnsupportedFrameFormat(value) => Some(format!(
                "unsupported 'lcd_frm' : {}",
                display_or_missing(value)
            )),
            _ => None,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPanel => f.write_str("no LCD panel section"),
            SkipReason::LcdUnused => f.write_str("'lcd_used' is not 1"),
            SkipReason::UnknownChipFamily(family) => write!(f, "unknown soc name {}", family),
            _ => f.write_str(&self.unsupported_warning().unwrap_or_default()),
        }
    }
}

fn display_or_missing(value: &Option<FexValue>) -> String {
    value
        .as_ref()
        .map_or_else(|| "missing".to_string(), FexValue::to_string)
}

/// Result for one candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanEntry {
    Report(BoardReport),
    Skipped {
        board: BoardIdentity,
        reason: SkipReason,
    },
}

impl ScanEntry {
    pub fn board(&self) -> &BoardIdentity {
        match self {
            ScanEntry::Report(report) => &report.board,
            ScanEntry::Skipped { board, .. } => board,
        }
    }

    pub fn report(&self) -> Option<&BoardReport> {
        match self {
            ScanEntry::Report(report) => Some(report),
            ScanEntry::Skipped { .. } => None,
        }
    }

    /// Text of this entry in the human report; `None` when it prints nothing.
    pub fn render(&self, report_unsupported: bool) -> Option<String> {
        match self {
            ScanEntry::Report(report) => Some(report.to_string()),
            ScanEntry::Skipped { reason, .. } if report_unsupported => reason
                .unsupported_warning()
                .map(|w| format!("{}\n\n", ReportLine::warning(w))),
            ScanEntry::Skipped { .. } => None,
        }
    }
}
