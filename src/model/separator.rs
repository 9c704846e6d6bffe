//! Field separator and decimal mark conventions

use serde::{Deserialize, Serialize};

/// Character dividing cells within a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSeparator {
    #[default]
    Semicolon,
    Comma,
}

impl FieldSeparator {
    pub fn as_char(self) -> char {
        match self {
            FieldSeparator::Semicolon => ';',
            FieldSeparator::Comma => ',',
        }
    }
}

impl std::fmt::Display for FieldSeparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSeparator::Semicolon => write!(f, "semicolon"),
            FieldSeparator::Comma => write!(f, "comma"),
        }
    }
}

impl std::str::FromStr for FieldSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "semicolon" | ";" => Ok(FieldSeparator::Semicolon),
            "comma" | "," => Ok(FieldSeparator::Comma),
            _ => Err(format!("Unknown field separator: {}", s)),
        }
    }
}

/// Character dividing the integer part of a number from its fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalMark {
    Comma,
    Period,
}

impl DecimalMark {
    pub fn as_char(self) -> char {
        match self {
            DecimalMark::Comma => ',',
            DecimalMark::Period => '.',
        }
    }

    /// The mark that is not `self`
    pub fn other(self) -> DecimalMark {
        match self {
            DecimalMark::Comma => DecimalMark::Period,
            DecimalMark::Period => DecimalMark::Comma,
        }
    }
}

impl std::fmt::Display for DecimalMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecimalMark::Comma => write!(f, "comma"),
            DecimalMark::Period => write!(f, "period"),
        }
    }
}

impl std::str::FromStr for DecimalMark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma" | "," => Ok(DecimalMark::Comma),
            "period" | "." => Ok(DecimalMark::Period),
            _ => Err(format!("Unknown decimal mark: {}", s)),
        }
    }
}

/// Linked pair of field separator and decimal mark.
///
/// Both setters recompute the pair together, so a comma is never used as
/// the field separator and the decimal mark at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeparatorPolicy {
    field: FieldSeparator,
    decimal: DecimalMark,
}

impl Default for SeparatorPolicy {
    fn default() -> Self {
        Self::new(FieldSeparator::default())
    }
}

impl SeparatorPolicy {
    /// Create a policy, deriving the decimal mark from the field separator
    pub fn new(field: FieldSeparator) -> Self {
        let mut policy = Self {
            field,
            decimal: DecimalMark::Comma,
        };
        policy.set_field_separator(field);
        policy
    }

    pub fn field_separator(&self) -> FieldSeparator {
        self.field
    }

    pub fn decimal_mark(&self) -> DecimalMark {
        self.decimal
    }

    /// The decimal mark that is repaired into the active one
    pub fn other_decimal_mark(&self) -> DecimalMark {
        self.decimal.other()
    }

    /// Set the field separator; a comma forces the period decimal mark
    pub fn set_field_separator(&mut self, field: FieldSeparator) {
        self.decimal = match field {
            FieldSeparator::Comma => DecimalMark::Period,
            FieldSeparator::Semicolon => DecimalMark::Comma,
        };
        self.field = field;
    }

    /// Set the decimal mark; a comma forces the semicolon separator
    pub fn set_decimal_mark(&mut self, decimal: DecimalMark) {
        self.field = match decimal {
            DecimalMark::Comma => FieldSeparator::Semicolon,
            DecimalMark::Period => FieldSeparator::Comma,
        };
        self.decimal = decimal;
    }
}
