//! Property tests for project naming and version derivation.

use proptest::prelude::*;

use droidprep::project::{default_version_code, sanitize_project_name};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Version-code derivation never panics on arbitrary input.
    #[test]
    fn property_version_code_never_panics(
        s in "(?s).{0,64}"
    ) {
        let _ = default_version_code(&s);
    }

    /// PROPERTY: Extreme numeric segments saturate instead of overflowing.
    #[test]
    fn property_version_code_never_overflows(
        major in any::<i64>(),
        minor in any::<i64>(),
        patch in any::<i64>(),
    ) {
        let _ = default_version_code(&format!("{major}.{minor}.{patch}"));
    }

    /// PROPERTY: Well-formed three-segment versions derive the documented code.
    #[test]
    fn property_version_code_formula(
        major in 0i64..100,
        minor in 0i64..100,
        patch in 0i64..100,
    ) {
        let version = format!("{major}.{minor}.{patch}");
        prop_assert_eq!(
            default_version_code(&version),
            major * 10000 + minor * 100 + patch
        );
    }

    /// PROPERTY: Sanitized names carry no filesystem-unsafe characters and
    /// keep their length.
    #[test]
    fn property_sanitize_removes_unsafe_chars(
        name in "(?s).{0,64}"
    ) {
        let sanitized = sanitize_project_name(&name);
        for c in ['/', '\\', ':', '<', '>', '"', '?', '*', '|'] {
            prop_assert!(!sanitized.contains(c));
        }
        prop_assert_eq!(sanitized.chars().count(), name.chars().count());
    }

    /// PROPERTY: Sanitization is idempotent.
    #[test]
    fn property_sanitize_is_idempotent(
        name in "(?s).{0,64}"
    ) {
        let once = sanitize_project_name(&name);
        prop_assert_eq!(sanitize_project_name(&once), once);
    }
}
