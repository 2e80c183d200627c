//! Sunxi `.fex` section reader
//!
//! A `.fex` file is an INI-like text document: `[section]` headers followed by
//! `key = value` lines. Only the sections a caller asks for are extracted;
//! everything else in the document is ignored.
//!
//! Values are classified once when read: a run of decimal digits becomes
//! [`FexValue::Int`], anything else is kept as trimmed text. Empty values
//! (including the quoted empty string `""`) are never stored.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RE_SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]").unwrap());
static RE_KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s*=\s*(.*)").unwrap());

/// A single field value from a `.fex` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FexValue {
    Int(i64),
    Str(String),
}

impl FexValue {
    /// Classify a raw value token.
    ///
    /// Returns `None` for values that are dropped on extraction.
    pub fn classify(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() || value == "\"\"" {
            return None;
        }
        if value.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = value.parse::<i64>() {
                return Some(FexValue::Int(n));
            }
        }
        Some(FexValue::Str(value.to_string()))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FexValue::Int(n) => Some(*n),
            FexValue::Str(_) => None,
        }
    }

    /// `true` when the value is exactly the integer `n`.
    pub fn is_int(&self, n: i64) -> bool {
        self.as_int() == Some(n)
    }
}

impl fmt::Display for FexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FexValue::Int(n) => write!(f, "{}", n),
            FexValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// The key/value pairs of one named section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionRecord {
    fields: BTreeMap<String, FexValue>,
}

impl SectionRecord {
    pub fn get(&self, key: &str) -> Option<&FexValue> {
        self.fields.get(key)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FexValue::as_int)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FexValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FexValue)> for SectionRecord {
    fn from_iter<I: IntoIterator<Item = (String, FexValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The text of one `.fex` file, queried section by section.
#[derive(Debug, Clone)]
pub struct Document {
    content: String,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Extract `name`, or `None` when no `[name]` header appears in the file.
    ///
    /// A section that is declared more than once is merged; later lines
    /// override earlier ones.
    pub fn section(&self, name: &str) -> Option<SectionRecord> {
        let mut inside = false;
        let mut seen = false;
        let mut raw: BTreeMap<String, &str> = BTreeMap::new();

        for line in self.content.lines() {
            if let Some(caps) = RE_SECTION_HEADER.captures(line) {
                inside = &caps[1] == name;
                seen |= inside;
            }
            if !inside {
                continue;
            }
            if let Some(caps) = RE_KEY_VALUE.captures(line) {
                let value = caps.get(2).map_or("", |m| m.as_str());
                raw.insert(caps[1].to_string(), value);
            }
        }

        if !seen {
            return None;
        }
        Some(
            raw.into_iter()
                .filter_map(|(key, value)| FexValue::classify(value).map(|v| (key, v)))
                .collect(),
        )
    }

    /// Extract `name`; a missing section reads as an empty record.
    pub fn read_section(&self, name: &str) -> SectionRecord {
        self.section(name).unwrap_or_default()
    }
}

/// Read one section straight from a file.
pub fn read_section(path: &Path, name: &str) -> std::io::Result<SectionRecord> {
    Ok(Document::load(path)?.read_section(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[product]
version = \"100\"
lcd_x = 1

[lcd0_para]
lcd_used            = 1
lcd_x               = 800
lcd_y =480
lcd_power           = port:PH08<1><0><default><1>
lcd_bl_en           = \"\"
lcd_gpio_0          =
lcd_size            = \"7\"
lcd_lvds_ch         = -1

[pwm0_para]
pwm_used = 1
";

    #[test]
    fn test_numeric_values_are_integers() {
        let doc = Document::new(SAMPLE);
        let lcd = doc.read_section("lcd0_para");
        assert_eq!(lcd.get("lcd_used"), Some(&FexValue::Int(1)));
        assert_eq!(lcd.get("lcd_x"), Some(&FexValue::Int(800)));
        assert_eq!(lcd.get("lcd_y"), Some(&FexValue::Int(480)));
    }

    #[test]
    fn test_text_values_are_trimmed_strings() {
        let lcd = Document::new(SAMPLE).read_section("lcd0_para");
        assert_eq!(
            lcd.get("lcd_power"),
            Some(&FexValue::Str("port:PH08<1><0><default><1>".to_string()))
        );
        assert_eq!(lcd.get("lcd_size"), Some(&FexValue::Str("\"7\"".to_string())));
        // Only plain digit runs are integers
        assert_eq!(lcd.get("lcd_lvds_ch"), Some(&FexValue::Str("-1".to_string())));
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let lcd = Document::new(SAMPLE).read_section("lcd0_para");
        assert!(!lcd.contains("lcd_bl_en"));
        assert!(!lcd.contains("lcd_gpio_0"));
        for (_, value) in lcd.iter() {
            assert_ne!(value, &FexValue::Str(String::new()));
            assert_ne!(value, &FexValue::Str("\"\"".to_string()));
        }
    }

    #[test]
    fn test_fields_are_scoped_to_section() {
        let doc = Document::new(SAMPLE);
        let product = doc.read_section("product");
        assert_eq!(product.get_int("lcd_x"), Some(1));
        assert_eq!(product.len(), 2);

        let pwm = doc.read_section("pwm0_para");
        assert_eq!(pwm.get_int("pwm_used"), Some(1));
        assert!(!pwm.contains("lcd_x"));
    }

    #[test]
    fn test_missing_section() {
        let doc = Document::new(SAMPLE);
        assert!(doc.section("pwm1_para").is_none());
        assert!(doc.read_section("pwm1_para").is_empty());
    }

    #[test]
    fn test_present_but_empty_section() {
        let doc = Document::new("[lcd0_para]\n\n[other]\nkey = 1\n");
        let lcd = doc.section("lcd0_para").expect("section exists");
        assert!(lcd.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = Document::new("[lcd0_para]\r\nlcd_used = 1\r\nlcd_if = 0 \r\n");
        let lcd = doc.read_section("lcd0_para");
        assert_eq!(lcd.get_int("lcd_used"), Some(1));
        assert_eq!(lcd.get_int("lcd_if"), Some(0));
    }

    #[test]
    fn test_classify() {
        assert_eq!(FexValue::classify("  42 "), Some(FexValue::Int(42)));
        assert_eq!(FexValue::classify("007"), Some(FexValue::Int(7)));
        assert_eq!(FexValue::classify("4x"), Some(FexValue::Str("4x".to_string())));
        assert_eq!(FexValue::classify("   "), None);
        assert_eq!(FexValue::classify("\"\""), None);
    }

    #[test]
    fn test_read_section_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.fex");
        std::fs::write(&path, SAMPLE).unwrap();
        let lcd = read_section(&path, "lcd0_para").unwrap();
        assert_eq!(lcd.get_int("lcd_x"), Some(800));
    }
}
