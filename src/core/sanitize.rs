//! Filesystem-safe names from display names

/// Builds a file or directory name from a display name
///
/// Keeps alphanumerics, spaces, `-` and `_`, drops every other character,
/// trims trailing whitespace and prepends `prefix` verbatim. The result may
/// be empty; no deduplication is attempted.
pub fn sanitize(display_name: &str, prefix: Option<&str>) -> String {
    let kept: String = display_name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let kept = kept.trim_end();

    match prefix {
        Some(prefix) => format!("{prefix}{kept}"),
        None => kept.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_sanitize_with_prefix() {
        assert_eq!(
            sanitize("Plan 01/02 — Level A", Some("IFC4_")),
            "IFC4_Plan 0102  Level A"
        );
    }

    #[test_case("Level 1", "Level 1" ; "plain")]
    #[test_case("Section A-A*", "Section A-A" ; "star_dropped")]
    #[test_case("3D: {Coordination}  ", "3D Coordination" ; "trailing_space_trimmed")]
    #[test_case("  Lead", "  Lead" ; "leading_space_kept")]
    #[test_case("Étage 2", "Étage 2" ; "unicode_letters_kept")]
    #[test_case("???", "" ; "empty_result")]
    fn test_sanitize_without_prefix(input: &str, expected: &str) {
        assert_eq!(sanitize(input, None), expected);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["Plan 01/02 — Level A", "a<b>c:d", "Roof ", "", "x_y-z"] {
            let once = sanitize(name, None);
            assert_eq!(sanitize(&once, None), once);
        }
    }
}
