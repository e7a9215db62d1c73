//! Literal type descriptors carried by tokens and literal expressions.

use std::fmt;

/// String literal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringForm {
    /// `"..."` on a single line.
    Basic,
    /// `"..."` whose content spans lines.
    MultiLineBasic,
    /// `R"tag(...)tag"` on a single line.
    Raw,
    /// `R"tag(...)tag"` whose content spans lines.
    MultiLineRaw,
}

/// Special numeric keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialNumber {
    /// `nan`
    NaN,
    /// `inf`
    Infinity,
}

/// Datetime literal form, following the ISO 8601 subset CSL accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Date and time with `Z` or `±HH:MM` offset.
    OffsetDateTime,
    /// Date and time without an offset.
    LocalDateTime,
    /// `YYYY-MM-DD` only.
    LocalDate,
    /// `HH:MM:SS[.frac]` only.
    LocalTime,
}

/// Classification of a literal, carried by literal tokens and by literal
/// expressions in the AST.
///
/// The descriptor drives default-value compatibility checks and enum-member
/// typing in the parser: each non-`Invalid` variant maps onto exactly one
/// CSL primitive via [`TypeDescriptor::primitive_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A literal the lexer could not classify.
    Invalid,
    /// `true` or `false`.
    Boolean,
    /// Decimal, hex, octal, or binary integer.
    Integer,
    /// Number with a fraction or exponent.
    Float,
    /// `nan` or `inf`.
    SpecialNumber(SpecialNumber),
    /// String literal of the given form.
    String(StringForm),
    /// Datetime literal of the given form.
    DateTime(DateTimeForm),
    /// ISO 8601 or shorthand duration.
    Duration,
}

impl TypeDescriptor {
    /// True for integer, float, and the special numeric keywords.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Integer | TypeDescriptor::Float | TypeDescriptor::SpecialNumber(_)
        )
    }

    /// True for every string form.
    pub fn is_string(&self) -> bool {
        matches!(self, TypeDescriptor::String(_))
    }

    /// The CSL primitive this literal belongs to, or `None` for `Invalid`.
    pub fn primitive_name(&self) -> Option<&'static str> {
        match self {
            TypeDescriptor::Invalid => None,
            TypeDescriptor::Boolean => Some("boolean"),
            TypeDescriptor::Integer
            | TypeDescriptor::Float
            | TypeDescriptor::SpecialNumber(_) => Some("number"),
            TypeDescriptor::String(_) => Some("string"),
            TypeDescriptor::DateTime(_) => Some("datetime"),
            TypeDescriptor::Duration => Some("duration"),
        }
    }

    /// True if this literal may serve as a default for the named primitive.
    pub fn matches_primitive(&self, primitive: &str) -> bool {
        self.primitive_name() == Some(primitive)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeDescriptor::Invalid => "invalid",
            TypeDescriptor::Boolean => "boolean",
            TypeDescriptor::Integer => "integer",
            TypeDescriptor::Float => "float",
            TypeDescriptor::SpecialNumber(SpecialNumber::NaN) => "nan",
            TypeDescriptor::SpecialNumber(SpecialNumber::Infinity) => "inf",
            TypeDescriptor::String(StringForm::Basic) => "string",
            TypeDescriptor::String(StringForm::MultiLineBasic) => "multi-line string",
            TypeDescriptor::String(StringForm::Raw) => "raw string",
            TypeDescriptor::String(StringForm::MultiLineRaw) => "multi-line raw string",
            TypeDescriptor::DateTime(DateTimeForm::OffsetDateTime) => "offset datetime",
            TypeDescriptor::DateTime(DateTimeForm::LocalDateTime) => "local datetime",
            TypeDescriptor::DateTime(DateTimeForm::LocalDate) => "local date",
            TypeDescriptor::DateTime(DateTimeForm::LocalTime) => "local time",
            TypeDescriptor::Duration => "duration",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(TypeDescriptor::Boolean.primitive_name(), Some("boolean"));
        assert_eq!(TypeDescriptor::Integer.primitive_name(), Some("number"));
        assert_eq!(TypeDescriptor::Float.primitive_name(), Some("number"));
        assert_eq!(
            TypeDescriptor::SpecialNumber(SpecialNumber::NaN).primitive_name(),
            Some("number")
        );
        assert_eq!(
            TypeDescriptor::String(StringForm::MultiLineRaw).primitive_name(),
            Some("string")
        );
        assert_eq!(
            TypeDescriptor::DateTime(DateTimeForm::LocalTime).primitive_name(),
            Some("datetime")
        );
        assert_eq!(TypeDescriptor::Duration.primitive_name(), Some("duration"));
        assert_eq!(TypeDescriptor::Invalid.primitive_name(), None);
    }

    #[test]
    fn test_matches_primitive() {
        assert!(TypeDescriptor::Integer.matches_primitive("number"));
        assert!(!TypeDescriptor::Integer.matches_primitive("string"));
        assert!(!TypeDescriptor::Invalid.matches_primitive("number"));
    }
}
