//! Scanning the string representation of distinguished names.
//!
//! Inside a DN string, the component delimiter `,` and the separator `=`
//! between attribute and value can appear as ordinary characters when they
//! are escaped by a preceding backslash. A naive split would cut such names
//! apart in the wrong places, so all splitting is done on [`Symbol`]s
//! instead of characters: a backslash and the character following it form a
//! single symbol which never counts as a delimiter.
//!
//! An escape sequence never spans lines. A backslash that is followed by a
//! line terminator or sits at the very end of the string is an ordinary
//! character.

use core::iter::Peekable;
use core::str::CharIndices;

//------------ Symbol --------------------------------------------------------

/// The representation of a single character in a DN string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// An unescaped character.
    Char(char),

    /// A character escaped via a preceding backslash.
    Escape(char),
}

impl Symbol {
    /// Returns the character the symbol stands for.
    #[must_use]
    pub fn into_char(self) -> char {
        match self {
            Symbol::Char(ch) | Symbol::Escape(ch) => ch,
        }
    }

    /// Returns whether the symbol is the unescaped character `ch`.
    #[must_use]
    pub fn is_char(self, ch: char) -> bool {
        self == Symbol::Char(ch)
    }
}

/// Returns whether `ch` ends a line.
///
/// A backslash in front of one of these characters does not escape it.
#[must_use]
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

//------------ Symbols -------------------------------------------------------

/// An iterator over the symbols of a string.
///
/// Each item is the byte position where the symbol starts in the source
/// together with the symbol itself.
#[derive(Clone, Debug)]
pub struct Symbols<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Symbols<'a> {
    /// Creates an iterator over the symbols of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Symbols {
            chars: source.char_indices().peekable(),
        }
    }
}

impl<'a> Iterator for Symbols<'a> {
    type Item = (usize, Symbol);

    fn next(&mut self) -> Option<Self::Item> {
        let (pos, ch) = self.chars.next()?;
        if ch != '\\' {
            return Some((pos, Symbol::Char(ch)));
        }
        match self.chars.peek() {
            Some(&(_, next)) if !is_line_terminator(next) => {
                self.chars.next();
                Some((pos, Symbol::Escape(next)))
            }
            _ => Some((pos, Symbol::Char(ch))),
        }
    }
}

//------------ Split ---------------------------------------------------------

/// An iterator over the parts of a string between unescaped delimiters.
///
/// Empty parts, such as the one between two adjacent delimiters, are
/// skipped. The parts are returned as they appear in the source, i.e., with
/// their escape sequences intact.
#[derive(Clone, Debug)]
pub struct Split<'a> {
    source: &'a str,
    symbols: Symbols<'a>,
    delim: char,
}

/// Splits `source` at every unescaped occurrence of `delim`.
#[must_use]
pub fn split(source: &str, delim: char) -> Split<'_> {
    Split {
        source,
        symbols: Symbols::new(source),
        delim,
    }
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = None;
        for (pos, symbol) in &mut self.symbols {
            if symbol.is_char(self.delim) {
                if let Some(start) = start {
                    return Some(&self.source[start..pos]);
                }
            } else if start.is_none() {
                start = Some(pos);
            }
        }
        start.map(|start| &self.source[start..])
    }
}

/// Splits `source` at the first unescaped occurrence of `delim`.
///
/// Returns the parts before and after the delimiter or `None` if there is
/// no unescaped delimiter at all.
#[must_use]
pub fn split_once(source: &str, delim: char) -> Option<(&str, &str)> {
    Symbols::new(source)
        .find(|&(_, symbol)| symbol.is_char(delim))
        .map(|(pos, _)| (&source[..pos], &source[pos + delim.len_utf8()..]))
}

//============ Testing =======================================================

#[cfg(test)]
#[cfg(feature = "std")]
mod test {
    use super::*;
    use std::vec::Vec;

    fn symbols(s: &str) -> Vec<Symbol> {
        Symbols::new(s).map(|(_, symbol)| symbol).collect()
    }

    #[test]
    fn plain_symbols() {
        assert_eq!(
            symbols("a=b"),
            [Symbol::Char('a'), Symbol::Char('='), Symbol::Char('b')]
        );
        assert!(symbols("").is_empty());
    }

    #[test]
    fn escaped_symbols() {
        assert_eq!(
            symbols(r"a\,b\\"),
            [
                Symbol::Char('a'),
                Symbol::Escape(','),
                Symbol::Char('b'),
                Symbol::Escape('\\'),
            ]
        );
        assert_eq!(symbols("\\ä"), [Symbol::Escape('ä')]);
    }

    #[test]
    fn dangling_backslash() {
        assert_eq!(symbols("a\\"), [Symbol::Char('a'), Symbol::Char('\\')]);
        assert_eq!(
            symbols("\\\nx"),
            [Symbol::Char('\\'), Symbol::Char('\n'), Symbol::Char('x')]
        );
    }

    #[test]
    fn positions() {
        let pos: Vec<_> = Symbols::new(r"ä\,b").map(|(pos, _)| pos).collect();
        assert_eq!(pos, [0, 2, 4]);
    }

    #[test]
    fn split_on_unescaped() {
        let parts: Vec<_> = split(r"cn=a\, b,ou=c,o=d", ',').collect();
        assert_eq!(parts, [r"cn=a\, b", "ou=c", "o=d"]);
    }

    #[test]
    fn split_skips_empty() {
        let parts: Vec<_> = split(",a,,b,", ',').collect();
        assert_eq!(parts, ["a", "b"]);
        assert_eq!(split("", ',').next(), None);
        assert_eq!(split(",,,", ',').next(), None);
    }

    #[test]
    fn split_escaped_backslash_before_delimiter() {
        let parts: Vec<_> = split(r"a=x\\,b=y", ',').collect();
        assert_eq!(parts, [r"a=x\\", "b=y"]);
    }

    #[test]
    fn split_once_first_unescaped() {
        assert_eq!(split_once("cn=a=b", '='), Some(("cn", "a=b")));
        assert_eq!(split_once(r"c\=n=v", '='), Some((r"c\=n", "v")));
        assert_eq!(split_once(r"cn\=v", '='), None);
        assert_eq!(split_once("=v", '='), Some(("", "v")));
        assert_eq!(split_once("cn=", '='), Some(("cn", "")));
    }
}
