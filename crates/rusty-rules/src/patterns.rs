// File: src/patterns.rs
// Purpose: Named regex table backing the pattern directives

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Directives that are checked against a named pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Required,
    OpenText,
    Alpha,
    AlphaPlus,
    AlphaNumeric,
    Numeric,
    ZipCode,
    Date,
    Phone,
    Email,
    MultiEmail,
    Ip,
    Dea,
}

impl PatternKind {
    pub const ALL: [PatternKind; 13] = [
        PatternKind::Required,
        PatternKind::OpenText,
        PatternKind::Alpha,
        PatternKind::AlphaPlus,
        PatternKind::AlphaNumeric,
        PatternKind::Numeric,
        PatternKind::ZipCode,
        PatternKind::Date,
        PatternKind::Phone,
        PatternKind::Email,
        PatternKind::MultiEmail,
        PatternKind::Ip,
        PatternKind::Dea,
    ];

    /// Directive name as written in rule files
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Required => "REQUIRED",
            PatternKind::OpenText => "OPENTEXT",
            PatternKind::Alpha => "ALPHA",
            PatternKind::AlphaPlus => "ALPHAPLUS",
            PatternKind::AlphaNumeric => "ALPHANUMERIC",
            PatternKind::Numeric => "NUMERIC",
            PatternKind::ZipCode => "ZIPCODE",
            PatternKind::Date => "DATE",
            PatternKind::Phone => "PHONE",
            PatternKind::Email => "EMAIL",
            PatternKind::MultiEmail => "MULTIEMAIL",
            PatternKind::Ip => "IP",
            PatternKind::Dea => "DEA",
        }
    }

    /// Case-insensitive lookup by directive name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An anchored pattern plus patterns that must not match.
///
/// `regex` has no look-around, so exclusions such as "no all-zero zip block"
/// live in `deny`.
#[derive(Debug)]
pub struct NamedPattern {
    allow: Regex,
    deny: Vec<Regex>,
}

impl NamedPattern {
    fn new(allow: &str) -> Self {
        Self {
            allow: Regex::new(allow).unwrap(),
            deny: Vec::new(),
        }
    }

    fn deny(mut self, pattern: &str) -> Self {
        self.deny.push(Regex::new(pattern).unwrap());
        self
    }

    /// Whole-value match
    pub fn is_match(&self, value: &str) -> bool {
        self.allow.is_match(value) && !self.deny.iter().any(|d| d.is_match(value))
    }

    pub fn as_str(&self) -> &str {
        self.allow.as_str()
    }
}

const EMAIL: &str = r"[A-Za-z0-9_][A-Za-z0-9_.-]+@[A-Za-z0-9_][A-Za-z0-9_.-]+\.[a-zA-Z]{2,}";
const OCTET: &str = r"([0-9]{1,2}|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";

static PATTERNS: Lazy<HashMap<PatternKind, NamedPattern>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(PatternKind::Required, NamedPattern::new(r"^(\S\s?)+$"));
    table.insert(PatternKind::OpenText, NamedPattern::new(r"^(\S\s?)+$"));
    table.insert(PatternKind::Alpha, NamedPattern::new(r"^[A-Za-z]+$"));
    table.insert(
        PatternKind::AlphaPlus,
        NamedPattern::new(r"^[A-Za-z][A-Za-z/\s.,_-]*$"),
    );
    table.insert(
        PatternKind::AlphaNumeric,
        NamedPattern::new(r"^[A-Za-z0-9_][A-Za-z0-9_\s.,-]*$"),
    );
    table.insert(
        PatternKind::Numeric,
        NamedPattern::new(r"^[+-]?[0-9]+(,[0-9]{3})*\.?[0-9]*%?$"),
    );
    table.insert(
        PatternKind::ZipCode,
        NamedPattern::new(r"^[0-9]{5}(-?[0-9]{4})?$")
            .deny(r"^0{5}")
            .deny(r"^[0-9]{5}-?0{4}$"),
    );
    table.insert(
        PatternKind::Date,
        NamedPattern::new(r"^(0[1-9]|1[012])/(0[1-9]|[12][0-9]|3[01])/(19|20)[0-9]{2}$"),
    );
    table.insert(
        PatternKind::Phone,
        NamedPattern::new(r"^(1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$"),
    );
    table.insert(PatternKind::Email, NamedPattern::new(&format!("^{EMAIL}$")));
    table.insert(
        PatternKind::MultiEmail,
        NamedPattern::new(&format!(r"^({EMAIL}(,\s?)?)+$")),
    );
    table.insert(
        PatternKind::Ip,
        NamedPattern::new(&format!(r"^({OCTET}\.){{3}}{OCTET}$")),
    );
    table.insert(
        PatternKind::Dea,
        NamedPattern::new(r"(?i)^[ABCDEFGHJKLMNPRSTUX][A-Z][0-9]{7}$"),
    );

    table
});

/// Pattern registered for a directive, if any
pub fn lookup(kind: PatternKind) -> Option<&'static NamedPattern> {
    PATTERNS.get(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matches(kind: PatternKind, value: &str) -> bool {
        lookup(kind).map(|p| p.is_match(value)).unwrap_or(false)
    }

    #[test]
    fn test_every_kind_is_registered() {
        for kind in PatternKind::ALL {
            assert!(lookup(kind).is_some(), "{} has no pattern", kind);
        }
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(PatternKind::from_name("email"), Some(PatternKind::Email));
        assert_eq!(PatternKind::from_name("ZipCode"), Some(PatternKind::ZipCode));
        assert_eq!(PatternKind::from_name("COMPARE"), None);
    }

    #[rstest]
    #[case(PatternKind::Required, "hello world", true)]
    #[case(PatternKind::Required, "", false)]
    #[case(PatternKind::Required, "two  spaces", false)]
    #[case(PatternKind::Alpha, "Alpha", true)]
    #[case(PatternKind::Alpha, "Alpha1", false)]
    #[case(PatternKind::AlphaPlus, "St. John, Jr", true)]
    #[case(PatternKind::AlphaPlus, "1st Street", false)]
    #[case(PatternKind::AlphaNumeric, "Suite 4B, Floor 2", true)]
    #[case(PatternKind::AlphaNumeric, "-dash first", false)]
    #[case(PatternKind::Numeric, "1,234,567.89", true)]
    #[case(PatternKind::Numeric, "-42", true)]
    #[case(PatternKind::Numeric, "15%", true)]
    #[case(PatternKind::Numeric, "12a", false)]
    #[case(PatternKind::ZipCode, "12345", true)]
    #[case(PatternKind::ZipCode, "12345-6789", true)]
    #[case(PatternKind::ZipCode, "123456789", true)]
    #[case(PatternKind::ZipCode, "00000", false)]
    #[case(PatternKind::ZipCode, "00000-1234", false)]
    #[case(PatternKind::ZipCode, "12345-0000", false)]
    #[case(PatternKind::ZipCode, "1234", false)]
    #[case(PatternKind::Date, "12/31/1999", true)]
    #[case(PatternKind::Date, "02/29/2024", true)]
    #[case(PatternKind::Date, "13/01/2000", false)]
    #[case(PatternKind::Date, "01/01/2100", false)]
    #[case(PatternKind::Phone, "(555) 123-4567", true)]
    #[case(PatternKind::Phone, "1-555-123-4567", true)]
    #[case(PatternKind::Phone, "5551234567", true)]
    #[case(PatternKind::Phone, "555-1234", false)]
    #[case(PatternKind::Email, "a.b@example.com", true)]
    #[case(PatternKind::Email, "not-an-email", false)]
    #[case(PatternKind::Email, "user@example", false)]
    #[case(PatternKind::MultiEmail, "ab@example.com, cd@example.org", true)]
    #[case(PatternKind::MultiEmail, "ab@example.com,,cd@example.org", false)]
    #[case(PatternKind::Ip, "192.168.0.1", true)]
    #[case(PatternKind::Ip, "255.255.255.255", true)]
    #[case(PatternKind::Ip, "256.1.1.1", false)]
    #[case(PatternKind::Ip, "1.2.3", false)]
    #[case(PatternKind::Dea, "AB1234563", true)]
    #[case(PatternKind::Dea, "ab1234563", true)]
    #[case(PatternKind::Dea, "IB1234563", false)]
    fn test_named_patterns(#[case] kind: PatternKind, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(matches(kind, value), expected, "{} on {:?}", kind, value);
    }
}
