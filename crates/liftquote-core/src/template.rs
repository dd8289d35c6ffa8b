//! # Name Templates
//!
//! `$`-placeholder substitution for dynamic product names.
//!
//! ## Syntax
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Cabin panel ${stops} stops"   ──►  "Cabin panel 6 stops"              │
//! │                                                                         │
//! │  $name      placeholder, name = [A-Za-z_][A-Za-z0-9_]*  (longest run)  │
//! │  ${name}    placeholder, braces delimit the name                       │
//! │  $$         literal "$"                                                │
//! │  $ (other)  literal "$"  ("5 $ each" is left alone)                    │
//! │                                                                         │
//! │  Unknown name     ──► token kept literally ("${color}" stays)          │
//! │  "${" unclosed    ──► PatternError::UnterminatedPlaceholder            │
//! │  "${not valid}"   ──► PatternError::InvalidPlaceholder                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups go through a caller-supplied closure returning `Option<String>`;
//! an unresolved placeholder is never an error.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::PatternError;

/// Regex matching every `$` token: an escape, a bare name, a braced name,
/// or a `${` with no closing brace.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[^}]*)\}|(?P<bad>\{))",
    )
    .expect("valid regex")
});

/// Regex matching a whole placeholder name.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_A-Za-z0-9]*$").expect("valid regex"));

/// Substitutes placeholders in `pattern` using `lookup`.
///
/// The pattern is checked as a whole before anything is substituted, so an
/// unterminated `${` fails the entire pattern rather than staying literal.
///
/// ## Example
/// ```rust
/// use liftquote_core::template::render;
///
/// let lookup = |name: &str| (name == "stops").then(|| "6".to_string());
///
/// assert_eq!(render("X ${stops} stops", lookup).unwrap(), "X 6 stops");
/// assert_eq!(render("X $stops / $other", lookup).unwrap(), "X 6 / $other");
/// assert!(render("X ${stops", lookup).is_err());
/// ```
pub fn render<F>(pattern: &str, lookup: F) -> Result<String, PatternError>
where
    F: Fn(&str) -> Option<String>,
{
    check_pattern(pattern)?;

    let rendered = PLACEHOLDER_RE.replace_all(pattern, |caps: &Captures| {
        if caps.name("escaped").is_some() {
            return "$".to_string();
        }
        let name = caps
            .name("named")
            .or_else(|| caps.name("braced"))
            .map_or("", |m| m.as_str());
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    });

    Ok(rendered.into_owned())
}

/// Rejects `${` without a closing brace and braced names that are not
/// identifiers.
fn check_pattern(pattern: &str) -> Result<(), PatternError> {
    for caps in PLACEHOLDER_RE.captures_iter(pattern) {
        let position = caps.get(0).map_or(0, |m| m.start());

        if caps.name("bad").is_some() {
            return Err(PatternError::UnterminatedPlaceholder { position });
        }
        if let Some(braced) = caps.name("braced") {
            if !IDENTIFIER_RE.is_match(braced.as_str()) {
                return Err(PatternError::InvalidPlaceholder {
                    name: braced.as_str().to_string(),
                    position,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "stops" => Some("6".to_string()),
            "floors" | "N" => Some("5".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_braced_and_bare_placeholders() {
        assert_eq!(render("X ${stops} stops", lookup).unwrap(), "X 6 stops");
        assert_eq!(render("X $stops stops", lookup).unwrap(), "X 6 stops");
        assert_eq!(render("$N floors", lookup).unwrap(), "5 floors");
        assert_eq!(render("${floors}F", lookup).unwrap(), "5F");
    }

    #[test]
    fn test_bare_placeholder_takes_longest_identifier() {
        // "$stopsX" names "stopsX", which is unknown
        assert_eq!(render("$stopsX", lookup).unwrap(), "$stopsX");
        assert_eq!(render("$stops.", lookup).unwrap(), "6.");
    }

    #[test]
    fn test_unknown_placeholders_stay_literal() {
        assert_eq!(render("Panel ${color}", lookup).unwrap(), "Panel ${color}");
        assert_eq!(render("Panel $color", lookup).unwrap(), "Panel $color");
        // lookups are case-sensitive
        assert_eq!(render("$n stops", lookup).unwrap(), "$n stops");
    }

    #[test]
    fn test_dollar_escapes_and_stray_dollars() {
        assert_eq!(render("$$5 fee", lookup).unwrap(), "$5 fee");
        assert_eq!(render("5 $ each", lookup).unwrap(), "5 $ each");
        assert_eq!(render("ends with $", lookup).unwrap(), "ends with $");
        assert_eq!(render("$1 coupon", lookup).unwrap(), "$1 coupon");
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        assert_eq!(
            render("شاسی داخل کابین ${stops} توقف", lookup).unwrap(),
            "شاسی داخل کابین 6 توقف"
        );
    }

    #[test]
    fn test_unterminated_placeholder_is_an_error() {
        assert_eq!(
            render("X ${stops stops", lookup),
            Err(PatternError::UnterminatedPlaceholder { position: 2 })
        );
    }

    #[test]
    fn test_unterminated_placeholder_fails_whole_pattern() {
        // a valid placeholder earlier in the pattern is not substituted either
        assert_eq!(
            render("${stops} then ${floors", lookup),
            Err(PatternError::UnterminatedPlaceholder { position: 14 })
        );
    }

    #[test]
    fn test_invalid_braced_placeholder_is_an_error() {
        assert!(matches!(
            render("X ${sto ps}", lookup),
            Err(PatternError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            render("X ${}", lookup),
            Err(PatternError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            render("X ${1st}", lookup),
            Err(PatternError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_pattern_without_placeholders() {
        assert_eq!(render("Plain name", lookup).unwrap(), "Plain name");
        assert_eq!(render("", lookup).unwrap(), "");
    }
}
