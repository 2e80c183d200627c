//! Typed access to the `lcd0_para` section.

use std::fmt;

use crate::parser::fex::{FexValue, SectionRecord};

pub const LCD_USED: &str = "lcd_used";
pub const LCD_IF: &str = "lcd_if";
pub const LCD_FRM: &str = "lcd_frm";

pub const LCD_X: &str = "lcd_x";
pub const LCD_Y: &str = "lcd_y";
pub const LCD_DCLK_FREQ: &str = "lcd_dclk_freq";
pub const LCD_HBP: &str = "lcd_hbp";
pub const LCD_HT: &str = "lcd_ht";
pub const LCD_VBP: &str = "lcd_vbp";
pub const LCD_VT: &str = "lcd_vt";
pub const LCD_HV_HSPW: &str = "lcd_hv_hspw";
pub const LCD_HSPW: &str = "lcd_hspw";
pub const LCD_HV_VSPW: &str = "lcd_hv_vspw";
pub const LCD_VSPW: &str = "lcd_vspw";

pub const LCD_POWER_USED: &str = "lcd_power_used";
pub const LCD_POWER: &str = "lcd_power";
pub const LCD_BL_EN_USED: &str = "lcd_bl_en_used";
pub const LCD_BL_EN: &str = "lcd_bl_en";
pub const LCD_PWM_USED: &str = "lcd_pwm_used";
pub const LCD_PWM_NOT_USED: &str = "lcd_pwm_not_used";
pub const LCD_PWM: &str = "lcd_pwm";
pub const LCD_PWM_CH: &str = "lcd_pwm_ch";

/// Legacy GPIO fields that are reported but never decoded.
pub const LEGACY_GPIO_FIELDS: [&str; 6] = [
    "lcd_gpio_0",
    "lcd_gpio_1",
    "lcd_gpio_2",
    "lcd_gpio_3",
    "lcd_gpio_scl",
    "lcd_gpio_sda",
];

/// Panel interface selected by `lcd_if`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdInterface {
    /// Parallel RGB with HSYNC/VSYNC
    Hv,
    Cpu,
    Lvds,
    Dsi,
    Edp,
    ExtDsi,
}

impl LcdInterface {
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(LcdInterface::Hv),
            1 => Some(LcdInterface::Cpu),
            3 => Some(LcdInterface::Lvds),
            4 => Some(LcdInterface::Dsi),
            5 => Some(LcdInterface::Edp),
            6 => Some(LcdInterface::ExtDsi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LcdInterface::Hv => "LCD_IF_HV",
            LcdInterface::Cpu => "LCD_IF_CPU",
            LcdInterface::Lvds => "LCD_IF_LVDS",
            LcdInterface::Dsi => "LCD_IF_DSI",
            LcdInterface::Edp => "LCD_IF_EDP",
            LcdInterface::ExtDsi => "LCD_IF_EXT_DSI",
        }
    }
}

impl fmt::Display for LcdInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The LCD panel description of one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDescriptor {
    record: SectionRecord,
}

impl PanelDescriptor {
    pub fn new(record: SectionRecord) -> Self {
        Self { record }
    }

    pub fn field(&self, key: &str) -> Option<&FexValue> {
        self.record.get(key)
    }

    pub fn int_field(&self, key: &str) -> Option<i64> {
        self.record.get_int(key)
    }

    /// `true` when `key` is present and exactly the integer `n`.
    pub fn field_is(&self, key: &str, n: i64) -> bool {
        self.field(key).is_some_and(|v| v.is_int(n))
    }

    /// `true` when `key` is present and anything other than the integer 0.
    pub fn flag_set(&self, key: &str) -> bool {
        self.field(key).is_some_and(|v| !v.is_int(0))
    }

    pub fn is_used(&self) -> bool {
        self.field_is(LCD_USED, 1)
    }

    pub fn interface(&self) -> Option<&FexValue> {
        self.field(LCD_IF)
    }

    pub fn frame_format(&self) -> Option<&FexValue> {
        self.field(LCD_FRM)
    }
}
