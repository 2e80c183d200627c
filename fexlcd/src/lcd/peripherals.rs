//! Power, backlight and PWM pin resolution for an LCD panel.
//!
//! Every outcome is a [`ReportLine`]: either a `CONFIG_VIDEO_LCD_*` pin or a
//! warning. Nothing here is fatal.

use crate::gpio::decode_gpio;
use crate::parser::fex::{Document, FexValue};
use crate::report::ReportLine;

use super::panel::*;

pub const CONFIG_VIDEO_LCD_POWER: &str = "CONFIG_VIDEO_LCD_POWER";
pub const CONFIG_VIDEO_LCD_BL_EN: &str = "CONFIG_VIDEO_LCD_BL_EN";
pub const CONFIG_VIDEO_LCD_BL_PWM: &str = "CONFIG_VIDEO_LCD_BL_PWM";

const PWM_POSITIVE: &str = "pwm_positive";

/// Where the backlight PWM pin comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PwmSource<'a> {
    /// `lcd_pwm` in the panel section
    Direct(&'a FexValue),
    /// `pwm_positive` in the `pwm<N>_para` section for channel `lcd_pwm_ch`
    Channel(Option<&'a FexValue>),
    Unused,
}

pub fn pwm_section_name(channel: i64) -> String {
    format!("pwm{}_para", channel)
}

/// Decide how the backlight PWM pin is found. The two lookups are exclusive:
/// the channel section is only consulted when `lcd_pwm` is absent.
pub fn select_pwm_source(panel: &PanelDescriptor) -> PwmSource<'_> {
    let not_disabled = !panel.field_is(LCD_PWM_NOT_USED, 1);
    match panel.field(LCD_PWM) {
        Some(pwm) if panel.flag_set(LCD_PWM_USED) && not_disabled => PwmSource::Direct(pwm),
        None if panel.field_is(LCD_PWM_USED, 1) && not_disabled => {
            PwmSource::Channel(panel.field(LCD_PWM_CH))
        }
        _ => PwmSource::Unused,
    }
}

fn decoded_pin(config_key: &str, field: &str, raw: Option<&FexValue>) -> ReportLine {
    let raw = raw.map(FexValue::to_string).unwrap_or_default();
    match decode_gpio(&raw) {
        Some(pin) => ReportLine::config(config_key, pin),
        None => ReportLine::warning(format!("could not decode '{}' ({})", field, raw)),
    }
}

/// A pin guarded by a `*_used` flag.
fn gated_pin(panel: &PanelDescriptor, used: &str, field: &str, config_key: &str) -> Option<ReportLine> {
    if !panel.flag_set(used) {
        return None;
    }
    let raw = panel.field(field)?;
    Some(decoded_pin(config_key, field, Some(raw)))
}

fn backlight_pwm(panel: &PanelDescriptor, doc: &Document, lines: &mut Vec<ReportLine>) {
    if let (Some(used), Some(not_used)) = (panel.field(LCD_PWM_USED), panel.field(LCD_PWM_NOT_USED)) {
        if used == not_used {
            lines.push(ReportLine::warning(
                "contradicting 'lcd_pwm_used' and 'lcd_pwm_not_used'",
            ));
        }
    }

    match select_pwm_source(panel) {
        PwmSource::Direct(raw) => {
            lines.push(decoded_pin(CONFIG_VIDEO_LCD_BL_PWM, LCD_PWM, Some(raw)));
        }
        PwmSource::Channel(channel) => {
            let Some(channel) = channel.and_then(FexValue::as_int) else {
                lines.push(ReportLine::warning(format!(
                    "could not determine pwm channel from '{}' ({})",
                    LCD_PWM_CH,
                    channel.map(FexValue::to_string).unwrap_or_default()
                )));
                return;
            };
            let section_name = pwm_section_name(channel);
            match doc.section(&section_name) {
                Some(pwm_para) => {
                    lines.push(ReportLine::warning(format!(
                        "'lcd_pwm' gpio extracted from '{}' section",
                        section_name
                    )));
                    lines.push(decoded_pin(
                        CONFIG_VIDEO_LCD_BL_PWM,
                        PWM_POSITIVE,
                        pwm_para.get(PWM_POSITIVE),
                    ));
                }
                None => {
                    lines.push(ReportLine::warning(format!(
                        "no '{}' section found",
                        section_name
                    )));
                }
            }
        }
        PwmSource::Unused => {}
    }
}

/// Resolve the auxiliary pins of `panel`. `doc` is the board's whole file,
/// used for the `pwm<N>_para` fallback.
pub fn resolve_peripherals(panel: &PanelDescriptor, doc: &Document) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    lines.extend(gated_pin(panel, LCD_POWER_USED, LCD_POWER, CONFIG_VIDEO_LCD_POWER));
    lines.extend(gated_pin(panel, LCD_BL_EN_USED, LCD_BL_EN, CONFIG_VIDEO_LCD_BL_EN));
    backlight_pwm(panel, doc, &mut lines);

    for field in LEGACY_GPIO_FIELDS {
        if let Some(raw) = panel.field(field) {
            lines.push(ReportLine::warning(format!("'{}' = '{}'", field, raw)));
        }
    }

    lines
}
