//! Sunxi pin descriptor decoding
//!
//! `.fex` files describe pins as `port:PB07<1><0><default><default>`: bank,
//! pin number, then mux/pull/drive/data attributes in angle brackets. U-Boot
//! only wants the `PB7` part.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

static RE_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"port:P([A-Z])([0-9]+)<").unwrap());

/// A normalized GPIO pin such as `PB7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpioPin {
    pub bank: char,
    pub index: u32,
}

impl fmt::Display for GpioPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.bank, self.index)
    }
}

impl Serialize for GpioPin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Decode a raw pin descriptor, or `None` if it doesn't name a port pin.
pub fn decode_gpio(descriptor: &str) -> Option<GpioPin> {
    let caps = RE_PORT.captures(descriptor)?;
    let bank = caps[1].chars().next()?;
    let index = caps[2].parse().ok()?;
    Some(GpioPin { bank, index })
}
