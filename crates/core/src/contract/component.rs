//! Identifier components and their validation
//!
//! Every textual piece of an identifier (type name, instance key, member
//! name, local id, version user) is a WORD in the grammar:
//!
//! - Length: at least one character
//! - Characters: anything except the reserved set `: ~ $ ^ #` and control
//!   characters
//! - Type names cannot start with a state marker (`!` or `*`)
//!
//! Values are checked when an identifier is constructed, so an invalid value
//! never reaches the marshaller.

use crate::error::{OidError, OidResult};
use std::fmt;

/// Separates a type name from its identifier, and version fields
pub const SEPARATOR: char = ':';
/// Introduces a legacy aggregated segment
pub const SEPARATOR_NESTING: char = '~';
/// Introduces a collection member name
pub const SEPARATOR_COLLECTION: char = '$';
/// Introduces the inline version segment
pub const SEPARATOR_VERSION: char = '^';
/// Reserved by the legacy grammar, never valid in a WORD
pub const SEPARATOR_RESERVED: char = '#';

/// Characters that may never appear inside a WORD
pub const RESERVED_CHARS: [char; 5] = [
    SEPARATOR,
    SEPARATOR_NESTING,
    SEPARATOR_COLLECTION,
    SEPARATOR_VERSION,
    SEPARATOR_RESERVED,
];

/// Which part of an identifier a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Short, stable type tag of a root or aggregated oid
    LogicalTypeName,
    /// Instance key of a root oid
    Identifier,
    /// Association member of a parented oid
    MemberName,
    /// Local id of an aggregated oid
    LocalId,
    /// User recorded in a version
    VersionUser,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::LogicalTypeName => "logical type name",
            Component::Identifier => "identifier",
            Component::MemberName => "member name",
            Component::LocalId => "local id",
            Component::VersionUser => "version user",
        };
        f.write_str(name)
    }
}

/// Check if a character may appear inside a WORD
#[inline]
pub fn is_word_char(c: char) -> bool {
    !RESERVED_CHARS.contains(&c) && !c.is_control()
}

/// Validate a component value
///
/// # Errors
///
/// `EmptyComponent` for an empty value, `InvalidIdentifierCharacter` for a
/// reserved or control character (or a leading state marker on a type name).
pub fn validate(component: Component, value: &str) -> OidResult<()> {
    if value.is_empty() {
        return Err(OidError::EmptyComponent { component });
    }

    for (position, ch) in value.chars().enumerate() {
        let leading_marker =
            position == 0 && component == Component::LogicalTypeName && (ch == '!' || ch == '*');
        if leading_marker || !is_word_char(ch) {
            return Err(OidError::InvalidIdentifierCharacter {
                component,
                value: value.to_string(),
                character: ch,
                position,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_components() {
        assert!(validate(Component::Identifier, "123").is_ok());
        assert!(validate(Component::Identifier, "a-b_c.d").is_ok());
        assert!(validate(Component::Identifier, "with space").is_ok());
        assert!(validate(Component::Identifier, "ünïcødé").is_ok());
        assert!(validate(Component::LogicalTypeName, "CUS").is_ok());
        assert!(validate(Component::LogicalTypeName, "com.example.Customer").is_ok());
        // Markers are only special at the start of a type name
        assert!(validate(Component::Identifier, "!1").is_ok());
        assert!(validate(Component::LogicalTypeName, "C*S").is_ok());
    }

    #[test]
    fn test_empty_component() {
        let err = validate(Component::MemberName, "").unwrap_err();
        assert_eq!(
            err,
            OidError::EmptyComponent {
                component: Component::MemberName
            }
        );
    }

    #[test]
    fn test_every_reserved_char_rejected() {
        for reserved in RESERVED_CHARS {
            let value = format!("A{}B", reserved);
            let err = validate(Component::Identifier, &value).unwrap_err();
            match err {
                OidError::InvalidIdentifierCharacter {
                    character,
                    position,
                    ..
                } => {
                    assert_eq!(character, reserved);
                    assert_eq!(position, 1);
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_control_chars_rejected() {
        let err = validate(Component::LocalId, "a\nb").unwrap_err();
        assert!(matches!(
            err,
            OidError::InvalidIdentifierCharacter {
                character: '\n',
                ..
            }
        ));
    }

    #[test]
    fn test_type_name_leading_marker_rejected() {
        for name in ["!CUS", "*CUS"] {
            let err = validate(Component::LogicalTypeName, name).unwrap_err();
            assert!(matches!(
                err,
                OidError::InvalidIdentifierCharacter { position: 0, .. }
            ));
        }
    }

    #[test]
    fn test_component_display() {
        assert_eq!(Component::LogicalTypeName.to_string(), "logical type name");
        assert_eq!(Component::VersionUser.to_string(), "version user");
    }
}
