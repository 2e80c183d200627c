//! Display mode derivation.
//!
//! Converts the Allwinner-style timing fields (`lcd_ht`, `lcd_hbp`, ...) of a
//! panel into the margin/sync layout U-Boot expects in
//! `CONFIG_VIDEO_LCD_MODE`. Values are not range-checked: a bogus .fex file
//! produces a bogus (possibly negative) mode and that is left visible.
//! The arithmetic is done in `i128`, wide enough for any pair of `i64`
//! fields, so the printed numbers are always the exact ones.

use std::fmt;

use thiserror::Error;

use super::family::ChipFamily;
use super::panel::*;

pub const CONFIG_VIDEO_LCD_MODE: &str = "CONFIG_VIDEO_LCD_MODE";

const DEPTH: i128 = 18;
const SYNC: i128 = 3;
const VMODE: i128 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("unknown soc name {0}")]
    UnknownChipFamily(String),
    #[error("missing or non-integer '{0}'")]
    MissingField(&'static str),
}

/// A derived U-Boot LCD mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingResult {
    pub x: i128,
    pub y: i128,
    pub depth: i128,
    pub pclk_khz: i128,
    pub le: i128,
    pub ri: i128,
    pub up: i128,
    pub lo: i128,
    pub hs: i128,
    pub vs: i128,
    pub sync: i128,
    pub vmode: i128,
}

impl fmt::Display for TimingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x:{},y:{},depth:{},pclk_khz:{},le:{},ri:{},up:{},lo:{},hs:{},vs:{},sync:{},vmode:{}",
            self.x,
            self.y,
            self.depth,
            self.pclk_khz,
            self.le,
            self.ri,
            self.up,
            self.lo,
            self.hs,
            self.vs,
            self.sync,
            self.vmode
        )
    }
}

fn required(panel: &PanelDescriptor, key: &'static str) -> Result<i128, TimingError> {
    panel
        .int_field(key)
        .map(i128::from)
        .ok_or(TimingError::MissingField(key))
}

/// Sync width from the `lcd_hv_*` field, falling back to the plain one.
/// Never less than 1.
fn sync_width(panel: &PanelDescriptor, hv_key: &str, key: &str) -> i128 {
    let width = match panel.field(hv_key) {
        Some(value) => value.as_int(),
        None => panel.int_field(key),
    };
    i128::from(width.unwrap_or(0)).max(1)
}

/// Derive the display mode of `panel` for a board of chip family `family`.
pub fn derive_lcd_mode(panel: &PanelDescriptor, family: &str) -> Result<TimingResult, TimingError> {
    let vt_div = i128::from(
        ChipFamily::from_name(family)
            .ok_or_else(|| TimingError::UnknownChipFamily(family.to_string()))?
            .vt_divisor(),
    );

    let x = required(panel, LCD_X)?;
    let y = required(panel, LCD_Y)?;
    let dclk_mhz = required(panel, LCD_DCLK_FREQ)?;
    let hbp = required(panel, LCD_HBP)?;
    let ht = required(panel, LCD_HT)?;
    let vbp = required(panel, LCD_VBP)?;
    let vt = required(panel, LCD_VT)?;

    let hs = sync_width(panel, LCD_HV_HSPW, LCD_HSPW);
    let vs = sync_width(panel, LCD_HV_VSPW, LCD_VSPW);

    Ok(TimingResult {
        x,
        y,
        depth: DEPTH,
        pclk_khz: dclk_mhz * 1000,
        le: hbp - hs,
        ri: ht - x - hbp,
        up: vbp - vs,
        lo: vt / vt_div - y - vbp,
        hs,
        vs,
        sync: SYNC,
        vmode: VMODE,
    })
}
