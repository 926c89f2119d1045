//! Relative distinguished names.
//!
//! This is a private module. Its public types are re-exported by the parent.

use crate::scan::Symbols;
use alloc::string::String;
use core::{cmp, fmt};

//------------ Rdn -----------------------------------------------------------

/// A relative distinguished name.
///
/// An RDN is a single `attribute=value` component of a distinguished name.
/// The value is kept in two forms side by side: the raw value as the user
/// sees it and the escaped value as it appears in the string representation
/// of a DN. Whichever form is given upon construction, the other one is
/// derived from it, so both always describe the same content.
///
/// The attribute is taken as is. Its syntax is not checked.
///
/// RDNs are immutable.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Rdn {
    attribute: String,
    value: String,
    value_escaped: String,
}

/// # Creating Values
///
impl Rdn {
    /// Creates an RDN from an attribute and a raw value.
    ///
    /// Leading and trailing white space and control characters are removed
    /// from `value` before it is stored. The escaped form is then derived
    /// via [`escape_value`].
    pub fn new(attribute: impl Into<String>, value: &str) -> Self {
        let value = trim(value);
        Rdn {
            attribute: attribute.into(),
            value: value.into(),
            value_escaped: escape_value(value),
        }
    }

    /// Creates an RDN from an attribute and an already escaped value.
    ///
    /// The escaped value is stored verbatim and the raw value is derived
    /// via [`unescape_value`].
    pub fn from_escaped(
        attribute: impl Into<String>,
        value_escaped: impl Into<String>,
    ) -> Self {
        let value_escaped = value_escaped.into();
        Rdn {
            attribute: attribute.into(),
            value: unescape_value(&value_escaped),
            value_escaped,
        }
    }
}

/// # Inspecting
///
impl Rdn {
    /// Returns the attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the raw, unescaped value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the value as it appears in the string form of a DN.
    #[must_use]
    pub fn value_escaped(&self) -> &str {
        &self.value_escaped
    }

    /// Compares the raw values of two RDNs.
    ///
    /// This is a plain lexical comparison of the unescaped values. The
    /// attributes are ignored, so `cn=x` and `ou=x` compare as equal.
    #[must_use]
    pub fn value_cmp(&self, other: &Self) -> cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

//--- PartialOrd and Ord

impl PartialOrd for Rdn {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rdn {
    /// Orders RDNs by their raw value.
    ///
    /// RDNs with equal values are ordered by attribute and finally by
    /// escaped value so that the order agrees with equality.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.value_cmp(other)
            .then_with(|| self.attribute.cmp(&other.attribute))
            .then_with(|| self.value_escaped.cmp(&other.value_escaped))
    }
}

//--- Display and Debug

impl fmt::Display for Rdn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.attribute, self.value_escaped)
    }
}

impl fmt::Debug for Rdn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rdn({})", self)
    }
}

//------------ Escaping ------------------------------------------------------

/// Characters that are escaped wherever they appear in a value.
const SPECIAL_CHARS: [char; 8] = [',', '+', '"', '<', '>', ';', '=', '/'];

/// Marker tokens for line breaks that are escaped as a whole.
const SPECIAL_MARKERS: [&str; 2] = ["u0x0A", "u0x0D"];

/// Escapes a raw value for use in the string form of a DN.
///
/// All backslashes are doubled first. Afterwards, a backslash is placed in
/// front of a leading `#`, in front of each of `,+"<>;=/` and in front of
/// the line break markers `u0x0A` and `u0x0D`.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let value = value.replace('\\', "\\\\");
    let mut res = String::with_capacity(value.len());
    let mut rest = value.as_str();
    if let Some(tail) = rest.strip_prefix('#') {
        res.push_str("\\#");
        rest = tail;
    }
    while let Some(ch) = rest.chars().next() {
        if let Some(marker) =
            SPECIAL_MARKERS.iter().find(|marker| rest.starts_with(**marker))
        {
            res.push('\\');
            res.push_str(marker);
            rest = &rest[marker.len()..];
        } else {
            if SPECIAL_CHARS.contains(&ch) {
                res.push('\\');
            }
            res.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    res
}

/// Reverts the escaping of a value.
///
/// Each backslash is dropped and the character following it is kept
/// literally. A backslash in front of a line terminator or at the end of
/// the value is kept.
#[must_use]
pub fn unescape_value(value: &str) -> String {
    Symbols::new(value)
        .map(|(_, symbol)| symbol.into_char())
        .collect()
}

/// Strips white space and control characters from both ends of a value.
fn trim(value: &str) -> &str {
    value.trim_matches(|ch: char| ch <= ' ')
}

//============ Testing =======================================================

#[cfg(test)]
#[cfg(feature = "std")]
mod test {
    use super::*;
    use rstest::rstest;
    use std::string::ToString;

    const RESERVED_RAW: &str =
        " # , # + \" \\ < > ; u0x0Ah u0x0Di = / ";
    const RESERVED_ESCAPED: &str =
        r#"\# \, # \+ \" \\ \< \> \; \u0x0Ah \u0x0Di \= \/"#;

    #[test]
    fn new_escapes() {
        let rdn = Rdn::new("ou", RESERVED_RAW);
        assert_eq!(rdn.attribute(), "ou");
        assert_eq!(rdn.value(), RESERVED_RAW.trim());
        assert_eq!(rdn.value_escaped(), RESERVED_ESCAPED);
    }

    #[test]
    fn from_escaped_unescapes() {
        let rdn = Rdn::from_escaped("ou", RESERVED_ESCAPED);
        assert_eq!(rdn.value(), RESERVED_RAW.trim());
        assert_eq!(rdn.value_escaped(), RESERVED_ESCAPED);
        assert_eq!(rdn, Rdn::new("ou", RESERVED_RAW));
    }

    #[rstest]
    #[case("Karlstad", "Karlstad")]
    #[case("  Karlstad\t", "Karlstad")]
    #[case("Andreas, Arvidsson", r"Andreas\, Arvidsson")]
    #[case("#1", r"\#1")]
    #[case("1#", "1#")]
    #[case(r"\#", r"\\#")]
    #[case(r"a\b", r"a\\b")]
    #[case("a+b=c", r"a\+b\=c")]
    #[case("<x>;/", r"\<x\>\;\/")]
    #[case("u0x0D", r"\u0x0D")]
    #[case("u0x0B", "u0x0B")]
    #[case("", "")]
    fn escape(#[case] raw: &str, #[case] escaped: &str) {
        assert_eq!(Rdn::new("cn", raw).value_escaped(), escaped);
    }

    #[rstest]
    #[case(r"Andreas\, Arvidsson", "Andreas, Arvidsson")]
    #[case(r"\\\,", r"\,")]
    #[case(r"\a\b", "ab")]
    #[case("trailing\\", "trailing\\")]
    #[case("line\\\nbreak", "line\\\nbreak")]
    #[case("plain", "plain")]
    fn unescape(#[case] escaped: &str, #[case] raw: &str) {
        assert_eq!(unescape_value(escaped), raw);
    }

    #[rstest]
    #[case(RESERVED_RAW)]
    #[case(r"\\\\")]
    #[case("##,,++")]
    #[case(r#" "quoted\" "#)]
    #[case("u0x0Au0x0D")]
    fn escape_then_unescape(#[case] raw: &str) {
        assert_eq!(unescape_value(&escape_value(trim(raw))), trim(raw));
    }

    #[test]
    fn display() {
        assert_eq!(
            Rdn::new("cn", "Andreas, Arvidsson").to_string(),
            r"cn=Andreas\, Arvidsson"
        );
        assert_eq!(
            format!("{:?}", Rdn::new("c", "Sverige")),
            "Rdn(c=Sverige)"
        );
    }

    #[test]
    fn compare() {
        use core::cmp::Ordering;

        let a = Rdn::new("cn", "A");
        let b = Rdn::new("cn", "B");
        assert_eq!(a.value_cmp(&b), Ordering::Less);
        assert_eq!(b.value_cmp(&a), Ordering::Greater);

        // Attributes are ignored by the value comparison ...
        let other = Rdn::new("ou", "A");
        assert_eq!(a.value_cmp(&other), Ordering::Equal);

        // ... but break ties in the total order.
        assert_eq!(a.cmp(&other), Ordering::Less);
        assert!(other > b.clone().min(a.clone()));
        assert!(b > other);
    }
}
