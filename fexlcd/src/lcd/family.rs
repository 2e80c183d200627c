use std::fmt;

/// Allwinner SoC generations with a known LCD timing layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipFamily {
    A10,
    A10s,
    A13,
    A20,
    A23,
    A31,
    A31s,
}

impl ChipFamily {
    pub const ALL: [ChipFamily; 7] = [
        ChipFamily::A10,
        ChipFamily::A10s,
        ChipFamily::A13,
        ChipFamily::A20,
        ChipFamily::A23,
        ChipFamily::A31,
        ChipFamily::A31s,
    ];

    /// Look up a family by its `sys_config` directory name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ChipFamily::A10 => "a10",
            ChipFamily::A10s => "a10s",
            ChipFamily::A13 => "a13",
            ChipFamily::A20 => "a20",
            ChipFamily::A23 => "a23",
            ChipFamily::A31 => "a31",
            ChipFamily::A31s => "a31s",
        }
    }

    /// Divisor applied to `lcd_vt`.
    ///
    /// On a10/a10s/a13/a20 boards `lcd_vt` holds twice the vertical total.
    pub fn vt_divisor(self) -> i64 {
        match self {
            ChipFamily::A10 | ChipFamily::A10s | ChipFamily::A13 | ChipFamily::A20 => 2,
            ChipFamily::A23 | ChipFamily::A31 | ChipFamily::A31s => 1,
        }
    }
}

impl fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisors() {
        for name in ["a10", "a10s", "a13", "a20"] {
            assert_eq!(ChipFamily::from_name(name).unwrap().vt_divisor(), 2, "{}", name);
        }
        for name in ["a23", "a31", "a31s"] {
            assert_eq!(ChipFamily::from_name(name).unwrap().vt_divisor(), 1, "{}", name);
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(ChipFamily::from_name("a64"), None);
        assert_eq!(ChipFamily::from_name("A10"), None);
        assert_eq!(ChipFamily::from_name(""), None);
    }

    #[test]
    fn test_names_round_trip() {
        for family in ChipFamily::ALL {
            assert_eq!(ChipFamily::from_name(&family.to_string()), Some(family));
        }
    }
}
