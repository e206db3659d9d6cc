//! Identifier grammar
//!
//! The canonical string form of an identifier:
//!
//! ```text
//! oid      := marker? type ":" id nesting* member? version?
//! marker   := "!" | "*"                       ; transient | view model
//! nesting  := "~" type ":" id                 ; legacy aggregated chain
//! member   := "$" WORD                        ; collection member name
//! version  := "^" DIGITS (":" WORD?)? (":" DIGITS?)?
//! type, id := WORD
//! WORD     := one or more characters other than : ~ $ ^ # and controls
//! ```
//!
//! [`parse`] matches the whole input in one left-to-right pass and produces
//! an [`OidSyntax`] tree. It does not decide what kind of oid the tree
//! means; that is the marshaller's job, which keeps the precedence rules
//! (member beats nesting beats plain root) in one place.

use strata_oid_core::contract::{
    is_word_char, SEPARATOR, SEPARATOR_COLLECTION, SEPARATOR_NESTING, SEPARATOR_VERSION,
};
use strata_oid_core::{OidError, OidKind, OidResult, OidState};

/// A `type:id` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedSegment<'a> {
    /// Logical type name
    pub logical_type_name: &'a str,
    /// Identifier (root) or local id (nesting)
    pub id: &'a str,
}

/// The inline version segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSegment<'a> {
    /// Sequence number
    pub sequence: u64,
    /// User, if present and non-empty
    pub user: Option<&'a str>,
    /// Timestamp in ms since epoch, if present
    pub utc_timestamp: Option<u64>,
}

/// Parsed, not yet interpreted, identifier string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidSyntax<'a> {
    /// State derived from the marker
    pub state: OidState,
    /// Leading `type:id`
    pub root: TypedSegment<'a>,
    /// `~type:id` links, in order
    pub nesting: Vec<TypedSegment<'a>>,
    /// `$member`
    pub member: Option<&'a str>,
    /// `^version`
    pub version: Option<VersionSegment<'a>>,
}

impl OidSyntax<'_> {
    /// Which kind of oid this tree describes
    pub fn kind(&self) -> OidKind {
        if self.member.is_some() {
            OidKind::Parented
        } else if !self.nesting.is_empty() {
            OidKind::Aggregated
        } else {
            OidKind::Root
        }
    }
}

/// Parse an identifier string
///
/// # Errors
///
/// `Malformed` naming the position where the input stopped matching.
pub fn parse(input: &str) -> OidResult<OidSyntax<'_>> {
    let mut cursor = Cursor::new(input);

    let state = match cursor.peek().and_then(OidState::from_marker) {
        Some(state) => {
            cursor.bump();
            state
        }
        None => OidState::Persistent,
    };

    // A second marker would otherwise be read as part of the type name
    if let Some(c) = cursor.peek().filter(|c| OidState::from_marker(*c).is_some()) {
        return Err(cursor.error(format!("unexpected state marker '{}'", c)));
    }
    let root = cursor.typed_segment("identifier")?;

    let mut nesting = Vec::new();
    while cursor.eat(SEPARATOR_NESTING) {
        nesting.push(cursor.typed_segment("local id")?);
    }

    let member = if cursor.eat(SEPARATOR_COLLECTION) {
        Some(cursor.word("member name")?)
    } else {
        None
    };

    let version = if cursor.eat(SEPARATOR_VERSION) {
        Some(cursor.version()?)
    } else {
        None
    };

    if let Some(c) = cursor.peek() {
        return Err(cursor.error(format!("unexpected character '{}'", c)));
    }

    Ok(OidSyntax {
        state,
        root,
        nesting,
        member,
        version,
    })
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: impl Into<String>) -> OidError {
        OidError::malformed(self.input, self.pos, reason)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn word(&mut self, what: &str) -> OidResult<&'a str> {
        let word = self.take_while(is_word_char);
        if word.is_empty() {
            return Err(self.error(format!("expected {}", what)));
        }
        Ok(word)
    }

    /// `type ":" id`
    fn typed_segment(&mut self, id_name: &str) -> OidResult<TypedSegment<'a>> {
        let logical_type_name = self.word("logical type name")?;
        if !self.eat(SEPARATOR) {
            return Err(self.error(format!("expected '{}' after logical type name", SEPARATOR)));
        }
        let id = self.word(id_name)?;
        Ok(TypedSegment {
            logical_type_name,
            id,
        })
    }

    fn number(&mut self, what: &str) -> OidResult<Option<u64>> {
        let start = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Ok(None);
        }
        digits.parse::<u64>().map(Some).map_err(|_| {
            OidError::malformed(self.input, start, format!("{} out of range", what))
        })
    }

    /// Everything after `^`
    fn version(&mut self) -> OidResult<VersionSegment<'a>> {
        let sequence = self
            .number("version sequence")?
            .ok_or_else(|| self.error("expected version sequence"))?;

        let mut user = None;
        let mut utc_timestamp = None;
        if self.eat(SEPARATOR) {
            user = Some(self.take_while(is_word_char)).filter(|u| !u.is_empty());
            if self.eat(SEPARATOR) {
                utc_timestamp = self.number("version timestamp")?;
            }
        }

        Ok(VersionSegment {
            sequence,
            user,
            utc_timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment<'a>(logical_type_name: &'a str, id: &'a str) -> TypedSegment<'a> {
        TypedSegment {
            logical_type_name,
            id,
        }
    }

    #[test]
    fn test_parse_plain_root() {
        let syntax = parse("CUS:123").unwrap();
        assert_eq!(syntax.state, OidState::Persistent);
        assert_eq!(syntax.root, segment("CUS", "123"));
        assert!(syntax.nesting.is_empty());
        assert_eq!(syntax.member, None);
        assert_eq!(syntax.version, None);
        assert_eq!(syntax.kind(), OidKind::Root);
    }

    #[test]
    fn test_parse_markers() {
        assert_eq!(parse("!CUS:1").unwrap().state, OidState::Transient);
        assert_eq!(parse("*CUS:1").unwrap().state, OidState::ViewModel);
    }

    #[test]
    fn test_parse_member() {
        let syntax = parse("CUS:123$items").unwrap();
        assert_eq!(syntax.member, Some("items"));
        assert_eq!(syntax.kind(), OidKind::Parented);
    }

    #[test]
    fn test_parse_nesting() {
        let syntax = parse("CUS:1~ADR:home~LINE:2").unwrap();
        assert_eq!(
            syntax.nesting,
            vec![segment("ADR", "home"), segment("LINE", "2")]
        );
        assert_eq!(syntax.kind(), OidKind::Aggregated);
    }

    #[test]
    fn test_member_beats_nesting() {
        let syntax = parse("CUS:1~ADR:home$lines").unwrap();
        assert_eq!(syntax.kind(), OidKind::Parented);
        assert_eq!(syntax.nesting.len(), 1);
    }

    #[test]
    fn test_parse_full_version() {
        let syntax = parse("CUS:1^7:sven:1700000000000").unwrap();
        assert_eq!(
            syntax.version,
            Some(VersionSegment {
                sequence: 7,
                user: Some("sven"),
                utc_timestamp: Some(1_700_000_000_000),
            })
        );
    }

    #[test]
    fn test_parse_partial_versions() {
        let v = |s: &'static str| parse(s).unwrap().version.unwrap();

        assert_eq!(v("CUS:1^7").user, None);
        assert_eq!(v("CUS:1^7:").user, None);
        assert_eq!(v("CUS:1^7::").utc_timestamp, None);
        assert_eq!(v("CUS:1^7::5").utc_timestamp, Some(5));
        assert_eq!(v("CUS:1^7:bob").user, Some("bob"));
        assert_eq!(v("CUS:1^7:bob:").utc_timestamp, None);
    }

    #[test]
    fn test_parse_member_then_version() {
        let syntax = parse("!ORD:9$lines^3::").unwrap();
        assert_eq!(syntax.state, OidState::Transient);
        assert_eq!(syntax.member, Some("lines"));
        assert_eq!(syntax.version.unwrap().sequence, 3);
    }

    #[test]
    fn test_parse_unicode_words() {
        let syntax = parse("Kunde:Müller-ß$Bestellungen").unwrap();
        assert_eq!(syntax.root, segment("Kunde", "Müller-ß"));
        assert_eq!(syntax.member, Some("Bestellungen"));
    }

    fn malformed_at(input: &str) -> usize {
        match parse(input).unwrap_err() {
            OidError::Malformed { position, .. } => position,
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(malformed_at(""), 0);
        assert_eq!(malformed_at("CUS"), 3);
        assert_eq!(malformed_at("CUS:"), 4);
        assert_eq!(malformed_at(":123"), 0);
        assert_eq!(malformed_at("CUS:1:2"), 5);
        assert_eq!(malformed_at("CUS:1$"), 6);
        assert_eq!(malformed_at("CUS:1~ADR"), 9);
        assert_eq!(malformed_at("CUS:1^"), 6);
        assert_eq!(malformed_at("CUS:1^x"), 6);
        assert_eq!(malformed_at("CUS:1^1:u:x"), 10);
        assert_eq!(malformed_at("CUS:1#2"), 5);
        assert_eq!(malformed_at("CUS:1$a$b"), 7);
        assert_eq!(malformed_at("CUS:1$a~B:2"), 7);
        assert_eq!(malformed_at("CUS:1\n"), 5);
    }

    #[test]
    fn test_double_marker_rejected() {
        assert_eq!(malformed_at("!!CUS:1"), 1);
        assert_eq!(malformed_at("*!CUS:1"), 1);
    }

    #[test]
    fn test_markers_are_plain_word_chars_in_nesting() {
        let syntax = parse("CUS:1~!ADR:1").unwrap();
        assert_eq!(syntax.state, OidState::Persistent);
        assert_eq!(syntax.nesting, vec![segment("!ADR", "1")]);
        assert_eq!(syntax.kind(), OidKind::Aggregated);
    }

    #[test]
    fn test_sequence_overflow() {
        let err = parse("CUS:1^99999999999999999999999").unwrap_err();
        match err {
            OidError::Malformed {
                position, reason, ..
            } => {
                assert_eq!(position, 6);
                assert!(reason.contains("out of range"));
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }
}
