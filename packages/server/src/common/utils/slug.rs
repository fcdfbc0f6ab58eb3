//! URL slugs for listings.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").expect("valid slug regex");
}

const MAX_BASE_LEN: usize = 60;

/// Lower-case the title and collapse every run of non-alphanumerics to `-`.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let slug = NON_ALNUM.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');

    let mut out: String = slug.chars().take(MAX_BASE_LEN).collect();
    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        "listing".to_string()
    } else {
        out
    }
}

/// `slugify(title)` plus a 6-hex-digit random suffix, e.g. `the-long-night-3fa94c`.
pub fn unique_slug(title: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", slugify(title), &suffix[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("The Long Night"), "the-long-night");
        assert_eq!(slugify("  Dune: Part Two!! "), "dune-part-two");
    }

    #[test]
    fn test_slugify_non_ascii_and_empty() {
        assert_eq!(slugify("Café Noir"), "caf-noir");
        assert_eq!(slugify("???"), "listing");
    }

    #[test]
    fn test_slugify_truncates_without_trailing_dash() {
        let title = "a ".repeat(80);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_BASE_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_unique_slug_suffix() {
        let slug = unique_slug("The Long Night");
        let (base, suffix) = slug.rsplit_once('-').unwrap();
        assert_eq!(base, "the-long-night");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(unique_slug("x"), unique_slug("x"));
    }
}
