//! LCD derivation engine.
//!
//! Given a board's `lcd0_para` section this computes the U-Boot display mode
//! ([`timing`]) and the auxiliary pins driving the panel ([`peripherals`]).

pub mod family;
pub mod panel;
pub mod peripherals;
pub mod timing;

pub use family::ChipFamily;
pub use panel::{LcdInterface, PanelDescriptor};
pub use peripherals::{resolve_peripherals, select_pwm_source, PwmSource};
pub use timing::{derive_lcd_mode, TimingError, TimingResult};
