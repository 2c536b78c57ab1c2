//! URL slug derivation and format checks for projects.

use validator::ValidationError;

lazy_static::lazy_static! {
    pub static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    static ref NON_ALPHANUMERIC_RUN: regex::Regex = regex::Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derives a slug from a display name.
///
/// Lowercases the name, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen and trims hyphens from both ends.
/// Returns an empty string when the name has no ASCII alphanumerics.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Returns true if `slug` is lowercase ASCII words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Validator hook for slug fields.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(shared::validation::error(
            "slug_format",
            "Slug may only contain lowercase letters, digits and single hyphens",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("a-OK"), "a-ok");
        assert_eq!(slugify("Mobile Banking App"), "mobile-banking-app");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  Hello,   World!! "), "hello-world");
        assert_eq!(slugify("--Rust & Go--"), "rust-go");
        assert_eq!(slugify("v2.0 release"), "v2-0-release");
    }

    #[test]
    fn test_slugify_non_ascii_only() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for name in ["a-OK", "QA Automation Suite", "x", "API v3 (beta)"] {
            assert!(is_valid_slug(&slugify(name)), "{}", name);
        }
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("a-ok"));
        assert!(is_valid_slug("project123"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("A-OK"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("with space"));
    }

    #[test]
    fn test_validate_slug_error_code() {
        assert!(validate_slug("fine-slug").is_ok());
        assert_eq!(validate_slug("Bad Slug").unwrap_err().code, "slug_format");
    }
}
