//! Identifier checks for names the builders emit unquoted

use std::sync::OnceLock;

use regex::Regex;

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[\p{ID_Start}_$][\p{ID_Continue}_$\x{200C}\x{200D}]*$").expect("Invalid regex")
    })
}

/// Whether `name` has identifier syntax: an ID_Start character, `_` or `$`,
/// then ID_Continue characters, `_`, `$`, ZWNJ or ZWJ
pub fn is_identifier_name(name: &str) -> bool {
    identifier_regex().is_match(name)
}

/// Whether `name` can be used as a binding name
///
/// Requires identifier syntax and rejects reserved words.
pub fn is_valid_identifier(name: &str) -> bool {
    is_identifier_name(name) && !is_reserved_word(name)
}

/// Whether `name` is reserved in strict-mode modules
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        for name in ["User", "userId", "_private", "$ref", "a1", "Ünïcode"] {
            assert!(is_valid_identifier(name), "{name}");
        }
    }

    #[test]
    fn test_invalid_identifiers() {
        for name in ["", "1user", "user-id", "user id", "a.b", "class", "new", "null"] {
            assert!(!is_valid_identifier(name), "{name}");
        }
    }

    #[test]
    fn test_non_letter_numbers_are_rejected() {
        for name in ["a²", "½x", "a①", "x\u{2028}", "²"] {
            assert!(!is_identifier_name(name), "{name}");
        }
        assert!(is_identifier_name("a\u{200D}b"));
        assert!(is_identifier_name("ⅫRoman"));
    }

    #[test]
    fn test_reserved_words_still_have_identifier_syntax() {
        assert!(is_identifier_name("delete"));
        assert!(!is_valid_identifier("delete"));
    }
}
