//! fexlcd CLI - U-Boot LCD configuration for sunxi boards from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use fexlcd::{
    BoardIdentity, ChipFamily, FexLcdCore, FexLcdError, ReportLine, ScanEntry, ScanOptions,
    UnknownFamilyPolicy,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "fexlcd")]
#[command(about = "Derive U-Boot LCD settings from sunxi .fex board files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug messages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a sys_config tree of <family>/<board>.fex files
    Scan {
        /// Root of the tree
        #[arg(value_name = "DIR", default_value = "sys_config")]
        dir: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Derive the settings of a single board file
    Board {
        /// Path to the .fex file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chip family (defaults to the parent directory name)
        #[arg(long)]
        family: Option<String>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// List supported chip families
    Families,
}

#[derive(clap::Args)]
struct ScanArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Warn about boards skipped for their lcd_if or lcd_frm value
    #[arg(long)]
    report_unsupported: bool,

    /// Skip boards of unknown chip families instead of aborting
    #[arg(long)]
    skip_unknown_family: bool,

    /// Extension of board files
    #[arg(long, default_value = "fex")]
    extension: String,
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        ScanOptions {
            extension: self.extension.clone(),
            report_unsupported: self.report_unsupported,
            unknown_family: if self.skip_unknown_family {
                UnknownFamilyPolicy::Skip
            } else {
                UnknownFamilyPolicy::Abort
            },
            ..ScanOptions::default()
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// U-Boot style config lines
    Human,
    /// JSON output
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Scan { dir, scan } => handle_scan(&dir, &scan),
        Commands::Board { file, family, scan } => handle_board(&file, family, &scan),
        Commands::Families => {
            handle_families();
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(e: FexLcdError) -> i32 {
    eprintln!("Error: {}", e);
    1
}

/// Human output of a run that aborted on a board: its header goes out before
/// the error, as the board was already being reported.
fn fail_human(out: &mut impl Write, e: FexLcdError) -> i32 {
    if let FexLcdError::UnknownChipFamily { family, board } = &e {
        let header = BoardIdentity::new(family.as_str(), board.as_str());
        let _ = writeln!(out, "=== {} ===", header).and_then(|()| out.flush());
    }
    fail(e)
}

fn handle_scan(dir: &Path, args: &ScanArgs) -> i32 {
    let options = args.options();

    match args.format {
        OutputFormat::Human => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let result = FexLcdCore::scan_tree_with(dir, &options, |entry| {
                if let Some(text) = entry.render(options.report_unsupported) {
                    out.write_all(text.as_bytes())?;
                }
                Ok(())
            });
            match result.and_then(|()| out.flush().map_err(FexLcdError::from)) {
                Ok(()) => 0,
                Err(e) => fail_human(&mut out, e),
            }
        }
        OutputFormat::Json => match FexLcdCore::scan_tree(dir, &options) {
            Ok(entries) => output_json(&entries),
            Err(e) => fail(e),
        },
    }
}

fn handle_board(file: &Path, family: Option<String>, args: &ScanArgs) -> i32 {
    let options = args.options();

    let board = match family {
        Some(family) => {
            let name = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            BoardIdentity::new(family, name)
        }
        None => match fexlcd::board_identity(file, &options.extension) {
            Some(board) => board,
            None => {
                eprintln!(
                    "Error: Cannot tell the chip family of {}; pass --family",
                    file.display()
                );
                return 1;
            }
        },
    };

    let entry = match FexLcdCore::scan_board(file, board, &options) {
        Ok(entry) => entry,
        Err(e) => {
            return match args.format {
                OutputFormat::Human => fail_human(&mut std::io::stdout().lock(), e),
                OutputFormat::Json => fail(e),
            }
        }
    };

    match args.format {
        OutputFormat::Human => {
            if let Some(text) = entry.render(options.report_unsupported) {
                print!("{}", text);
            } else if let ScanEntry::Skipped { board, reason } = &entry {
                eprintln!("{}: skipped, {}", board, reason);
            }
            0
        }
        OutputFormat::Json => output_json(std::slice::from_ref(&entry)),
    }
}

fn output_json(entries: &[ScanEntry]) -> i32 {
    let mut boards = Vec::new();
    let mut skipped = Vec::new();
    let mut warnings = 0;

    for entry in entries {
        match entry {
            ScanEntry::Report(report) => {
                warnings += report.warnings().count();
                boards.push(serde_json::json!({
                    "family": report.board.family,
                    "board": report.board.board,
                    "config": report.lines.iter().filter_map(|line| match line {
                        ReportLine::Config { key, value } => Some(serde_json::json!({
                            "key": key,
                            "value": value,
                        })),
                        ReportLine::Warning { .. } => None,
                    }).collect::<Vec<_>>(),
                    "warnings": report.warnings().collect::<Vec<_>>(),
                }));
            }
            ScanEntry::Skipped { board, reason } => {
                skipped.push(serde_json::json!({
                    "family": board.family,
                    "board": board.board,
                    "reason": reason,
                }));
            }
        }
    }

    let output = serde_json::json!({
        "summary": {
            "total_files": entries.len(),
            "reported": boards.len(),
            "skipped": skipped.len(),
            "warnings": warnings,
        },
        "boards": boards,
        "skipped": skipped,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_families() {
    println!("Supported chip families:\n");
    for family in ChipFamily::ALL {
        println!("  {:<6} lcd_vt divisor {}", family.name(), family.vt_divisor());
    }
}
