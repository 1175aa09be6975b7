//! Property tests for icon declaration resolution.

use proptest::prelude::*;

use droidprep::events::BufferSink;
use droidprep::{resolve_icons, Density, IconDeclaration};

fn density_strategy() -> impl Strategy<Value = Density> {
    proptest::sample::select(Density::ALL.to_vec())
}

fn flat_declaration() -> impl Strategy<Value = IconDeclaration> {
    (density_strategy(), "[a-z]{1,8}\\.png").prop_map(|(density, src)| IconDeclaration {
        density: Some(density),
        src: Some(src),
        ..IconDeclaration::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Resolution never panics, whatever the declaration mix.
    #[test]
    fn property_resolution_never_panics(
        densities in proptest::collection::vec(proptest::option::of(density_strategy()), 0..=8),
        srcs in proptest::collection::vec(proptest::option::of("[a-z]{1,8}\\.(png|xml)"), 0..=8),
    ) {
        let declarations: Vec<IconDeclaration> = densities
            .into_iter()
            .zip(srcs)
            .map(|(density, src)| IconDeclaration {
                density,
                src,
                ..IconDeclaration::default()
            })
            .collect();
        let _ = resolve_icons(&declarations, &BufferSink::new());
    }

    /// PROPERTY: The first declaration for a density always wins.
    #[test]
    fn property_first_declaration_wins(
        declarations in proptest::collection::vec(flat_declaration(), 1..=12)
    ) {
        let set = resolve_icons(&declarations, &BufferSink::new()).unwrap();

        for density in Density::ALL {
            let expected = declarations
                .iter()
                .find(|d| d.density == Some(density))
                .and_then(|d| d.src.clone());
            prop_assert_eq!(
                set.get(density).and_then(|d| d.src.clone()),
                expected
            );
        }
    }

    /// PROPERTY: Only declared densities appear in the resolved set.
    #[test]
    fn property_no_invented_densities(
        declarations in proptest::collection::vec(flat_declaration(), 0..=6)
    ) {
        let set = resolve_icons(&declarations, &BufferSink::new()).unwrap();
        for density in set.densities() {
            prop_assert!(declarations.iter().any(|d| d.density == Some(density)));
        }
        prop_assert!(set.default.is_none());
    }

    /// PROPERTY: The pixel-size table and a direct density declaration
    /// resolve identically.
    #[test]
    fn property_size_table_agrees_with_density(
        density in density_strategy()
    ) {
        let px = match density {
            Density::Ldpi => 36,
            Density::Mdpi => 48,
            Density::Hdpi => 72,
            Density::Xhdpi => 96,
            Density::Xxhdpi => 144,
            Density::Xxxhdpi => 192,
        };
        let sized = IconDeclaration {
            height: Some(px),
            src: Some("a.png".to_string()),
            ..IconDeclaration::default()
        };
        let set = resolve_icons(&[sized], &BufferSink::new()).unwrap();
        prop_assert!(set.get(density).is_some());
        prop_assert_eq!(set.densities().count(), 1);
    }
}
