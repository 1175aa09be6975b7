//! Splash screen and theme materialization
//!
//! A fixed, ordered table of theme items drives everything the tool
//! manages inside the splash theme descriptor. Each table entry is a
//! tagged variant carrying its own resolution behavior; the table is not
//! user-extensible. Preference names derive from the item key by
//! capitalizing the part after any namespace colon and prefixing
//! `Android`.

use std::path::{Path, PathBuf};

use crate::descriptor::ProjectDescriptor;
use crate::error::PrepResult;
use crate::events::EventSink;
use crate::resources::{ResourceSyncMap, SyncAction};
use crate::sync::atomic_write;
use crate::xml::{self, Element};

const TOOLS_NS: &str = "http://schemas.android.com/tools";

/// Style name of the managed splash theme
pub const SPLASH_STYLE_NAME: &str = "Theme.App.SplashScreen";

/// Managed color resource for the splash icon background
const ICON_BACKGROUND_COLOR_NAME: &str = "cdv_splashscreen_icon_background";

const DEFAULT_ANIMATION_DURATION: &str = "200";
const DEFAULT_POST_SPLASH_THEME: &str = "@style/Theme.Cordova.App.DayNight";
const DEFAULT_BACKGROUND: &str = "@color/cdv_splashscreen_background";

/// Bundled fallback splash icon, used when no animated icon preference is
/// set or its file is missing
const DEFAULT_SPLASH_ICON: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<vector xmlns:android="http://schemas.android.com/apk/res/android" android:width="48dp" android:height="48dp" android:viewportWidth="48" android:viewportHeight="48">
    <path android:fillColor="#7F7F7F" android:pathData="M24,4a20,20 0 1,0 0.0001,0z"/>
</vector>
"##;

/// Behavior of one managed theme item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    AnimatedIcon,
    BrandingImage,
    IconBackgroundColor,
    AnimationDuration,
    PostSplashTheme,
    EdgeToEdge,
    BackgroundColor,
}

struct ThemeItemSpec {
    /// XML item name inside the splash style
    key: &'static str,
    /// Explicit preference name; `None` derives from `key`
    preference: Option<&'static str>,
    kind: ItemKind,
}

/// Every theme item this tool manages, in write order
const THEME_ITEMS: [ThemeItemSpec; 7] = [
    ThemeItemSpec {
        key: "windowSplashScreenBackground",
        preference: None,
        kind: ItemKind::BackgroundColor,
    },
    ThemeItemSpec {
        key: "windowSplashScreenAnimatedIcon",
        preference: None,
        kind: ItemKind::AnimatedIcon,
    },
    ThemeItemSpec {
        key: "windowSplashScreenAnimationDuration",
        preference: None,
        kind: ItemKind::AnimationDuration,
    },
    ThemeItemSpec {
        key: "windowSplashScreenIconBackgroundColor",
        preference: None,
        kind: ItemKind::IconBackgroundColor,
    },
    ThemeItemSpec {
        key: "windowSplashScreenBrandingImage",
        preference: None,
        kind: ItemKind::BrandingImage,
    },
    ThemeItemSpec {
        key: "postSplashScreenTheme",
        preference: None,
        kind: ItemKind::PostSplashTheme,
    },
    ThemeItemSpec {
        key: "android:windowOptOutEdgeToEdgeEnforcement",
        preference: Some("AndroidEdgeToEdge"),
        kind: ItemKind::EdgeToEdge,
    },
];

/// Preference name for a theme item key
///
/// The portion after any namespace colon is capitalized and prefixed with
/// `Android`.
pub fn preference_name(key: &str) -> String {
    let local = key.rsplit(':').next().unwrap_or(key);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => format!("Android{}{}", first.to_uppercase(), chars.as_str()),
        None => "Android".to_string(),
    }
}

/// Materialize the splash theme, colors descriptor, and splash image assets
///
/// Rewrites `values/themes.xml` and `values/colors.xml` directly and
/// returns a sync map staging image copies and migration cleanup for the
/// caller to apply.
pub fn update_splash_theme(
    project_root: &Path,
    res_dir: &Path,
    descriptor: &ProjectDescriptor,
    platform: &str,
    sink: &dyn EventSink,
) -> PrepResult<ResourceSyncMap> {
    let themes_path = res_dir.join("values/themes.xml");
    let colors_path = res_dir.join("values/colors.xml");

    let mut themes = load_or_default(project_root, &themes_path, "resources");
    let mut colors = load_or_default(project_root, &colors_path, "resources");
    ensure_style(&mut themes);

    let mut map = ResourceSyncMap::new();

    for spec in &THEME_ITEMS {
        let pref = match spec.preference {
            Some(name) => name.to_string(),
            None => preference_name(spec.key),
        };
        let value = descriptor.preference(&pref, platform);

        match spec.kind {
            ItemKind::AnimatedIcon => {
                let image = resolve_image(
                    project_root,
                    res_dir,
                    value.as_deref(),
                    "ic_cdv_splashscreen",
                    &mut map,
                    sink,
                );
                match image {
                    Some(reference) => {
                        set_item(&mut themes, spec.key, &reference);
                    }
                    None => {
                        // No usable preference: fall back to the bundled
                        // default vector.
                        let target = res_dir.join("drawable/ic_cdv_splashscreen.xml");
                        atomic_write(
                            &project_root.join(&target),
                            DEFAULT_SPLASH_ICON.as_bytes(),
                        )?;
                        map.remove(&target);
                        sink.verbose(
                            "no splash icon configured, using the bundled default".to_string(),
                        );
                        set_item(&mut themes, spec.key, "@drawable/ic_cdv_splashscreen");
                    }
                }
            }
            ItemKind::BrandingImage => {
                let image = resolve_image(
                    project_root,
                    res_dir,
                    value.as_deref(),
                    "ic_cdv_splashscreen_branding",
                    &mut map,
                    sink,
                );
                match image {
                    Some(reference) => {
                        let item = set_item(&mut themes, spec.key, &reference);
                        item.set_attr("tools:targetApi", "33");
                        themes.set_attr("xmlns:tools", TOOLS_NS);
                    }
                    None => {
                        // Optional, no default: delete-only cleanup.
                        remove_item(&mut themes, spec.key);
                        themes.remove_attr("xmlns:tools");
                    }
                }
            }
            ItemKind::IconBackgroundColor => match value {
                Some(color) => {
                    set_color(&mut colors, ICON_BACKGROUND_COLOR_NAME, &color);
                    set_item(
                        &mut themes,
                        spec.key,
                        &format!("@color/{ICON_BACKGROUND_COLOR_NAME}"),
                    );
                }
                None => {
                    remove_color(&mut colors, ICON_BACKGROUND_COLOR_NAME);
                    remove_item(&mut themes, spec.key);
                }
            },
            ItemKind::AnimationDuration => {
                set_item(
                    &mut themes,
                    spec.key,
                    value.as_deref().unwrap_or(DEFAULT_ANIMATION_DURATION),
                );
            }
            ItemKind::PostSplashTheme => {
                set_item(
                    &mut themes,
                    spec.key,
                    value.as_deref().unwrap_or(DEFAULT_POST_SPLASH_THEME),
                );
            }
            ItemKind::EdgeToEdge => {
                let edge_to_edge = match value.as_deref() {
                    Some("true") => true,
                    Some("false") | None => false,
                    Some(other) => {
                        sink.warn(format!(
                            "invalid {pref} value {other:?}, expected \"true\" or \"false\"; \
                             treating it as false"
                        ));
                        false
                    }
                };
                // The managed item is an opt-out flag, so it carries the
                // negated preference.
                set_item(&mut themes, spec.key, &(!edge_to_edge).to_string());
            }
            ItemKind::BackgroundColor => {
                let resolved = value
                    .or_else(|| {
                        descriptor.preference("SplashScreenBackgroundColor", platform)
                    })
                    .or_else(|| descriptor.preference("BackgroundColor", platform))
                    .unwrap_or_else(|| {
                        sink.verbose(format!(
                            "no splash background preference set, using {DEFAULT_BACKGROUND}"
                        ));
                        DEFAULT_BACKGROUND.to_string()
                    });
                set_item(&mut themes, spec.key, &resolved);
            }
        }
    }

    xml::write_file(&project_root.join(&themes_path), &themes)?;
    xml::write_file(&project_root.join(&colors_path), &colors)?;
    Ok(map)
}

/// Cleanup mode: remove every managed splash artifact
pub fn clean_splash(res_dir: &Path) -> ResourceSyncMap {
    let mut map = ResourceSyncMap::new();
    for name in ["ic_cdv_splashscreen", "ic_cdv_splashscreen_branding"] {
        map.insert(
            res_dir.join(format!("drawable/{name}.xml")),
            SyncAction::Remove,
        );
        map.insert(
            res_dir.join(format!("drawable-nodpi/{name}.png")),
            SyncAction::Remove,
        );
    }
    map.insert(res_dir.join("values/themes.xml"), SyncAction::Remove);
    map.insert(res_dir.join("values/colors.xml"), SyncAction::Remove);
    map
}

/// Pick raster or vector placement for a splash image preference
///
/// Stages the copy and the migration cleanup of the superseded variant,
/// returning the drawable reference for the theme item. A missing source
/// file falls back to `None` with a warning.
fn resolve_image(
    project_root: &Path,
    res_dir: &Path,
    value: Option<&str>,
    name: &str,
    map: &mut ResourceSyncMap,
    sink: &dyn EventSink,
) -> Option<String> {
    let vector_target = res_dir.join(format!("drawable/{name}.xml"));
    let raster_target = res_dir.join(format!("drawable-nodpi/{name}.png"));

    let source = match value {
        Some(v) if project_root.join(v).is_file() => v,
        Some(v) => {
            sink.verbose(format!("splash image {v} does not exist, ignoring it"));
            map.insert(vector_target, SyncAction::Remove);
            map.insert(raster_target, SyncAction::Remove);
            return None;
        }
        None => {
            map.insert(vector_target, SyncAction::Remove);
            map.insert(raster_target, SyncAction::Remove);
            return None;
        }
    };

    let is_vector = Path::new(source)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

    if is_vector {
        map.insert(vector_target, SyncAction::Copy(PathBuf::from(source)));
        map.insert(raster_target, SyncAction::Remove);
    } else {
        map.insert(raster_target, SyncAction::Copy(PathBuf::from(source)));
        map.insert(vector_target, SyncAction::Remove);
    }
    Some(format!("@drawable/{name}"))
}

fn load_or_default(project_root: &Path, rel: &Path, root_name: &str) -> Element {
    let path = project_root.join(rel);
    if path.is_file() {
        if let Ok(root) = xml::parse_file(&path) {
            return root;
        }
    }
    Element::new(root_name)
}

fn ensure_style(themes: &mut Element) {
    if themes
        .child_where("style", "name", SPLASH_STYLE_NAME)
        .is_none()
    {
        themes.push(
            Element::new("style")
                .with_attr("name", SPLASH_STYLE_NAME)
                .with_attr("parent", "Theme.SplashScreen"),
        );
    }
}

fn style_mut(themes: &mut Element) -> &mut Element {
    themes
        .child_where_mut("style", "name", SPLASH_STYLE_NAME)
        .expect("splash style is created before items are written")
}

fn set_item<'a>(themes: &'a mut Element, key: &str, value: &str) -> &'a mut Element {
    let style = style_mut(themes);
    if style.child_where("item", "name", key).is_none() {
        style.push(Element::new("item").with_attr("name", key));
    }
    let item = style
        .child_where_mut("item", "name", key)
        .expect("item was just inserted");
    item.set_text(value);
    item
}

fn remove_item(themes: &mut Element, key: &str) {
    style_mut(themes).retain_children(|e| !(e.name == "item" && e.attr("name") == Some(key)));
}

fn set_color(colors: &mut Element, name: &str, value: &str) {
    if colors.child_where("color", "name", name).is_none() {
        colors.push(Element::new("color").with_attr("name", name));
    }
    colors
        .child_where_mut("color", "name", name)
        .expect("color was just inserted")
        .set_text(value);
}

fn remove_color(colors: &mut Element, name: &str) {
    colors.retain_children(|e| !(e.name == "color" && e.attr("name") == Some(name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BufferSink, Severity};
    use tempfile::tempdir;

    const RES: &str = "app/src/main/res";

    fn descriptor(preferences: &str) -> ProjectDescriptor {
        ProjectDescriptor::parse(&format!(
            r#"<widget id="com.example.app" version="1.0.0">
                <name>Example</name>
                <platform name="android">{preferences}</platform>
            </widget>"#
        ))
        .unwrap()
    }

    fn run(root: &Path, d: &ProjectDescriptor, sink: &BufferSink) -> ResourceSyncMap {
        update_splash_theme(root, Path::new(RES), d, "android", sink).unwrap()
    }

    fn themes(root: &Path) -> Element {
        xml::parse_file(&root.join(RES).join("values/themes.xml")).unwrap()
    }

    fn item_text(themes: &Element, key: &str) -> Option<String> {
        themes
            .child_where("style", "name", SPLASH_STYLE_NAME)?
            .child_where("item", "name", key)
            .map(|i| i.text())
    }

    #[test]
    fn preference_name_derivation() {
        assert_eq!(
            preference_name("windowSplashScreenAnimatedIcon"),
            "AndroidWindowSplashScreenAnimatedIcon"
        );
        assert_eq!(
            preference_name("android:windowOptOutEdgeToEdgeEnforcement"),
            "AndroidWindowOptOutEdgeToEdgeEnforcement"
        );
    }

    #[test]
    fn defaults_apply_when_preferences_are_unset() {
        let root = tempdir().unwrap();
        let sink = BufferSink::new();
        run(root.path(), &descriptor(""), &sink);

        let t = themes(root.path());
        assert_eq!(
            item_text(&t, "windowSplashScreenAnimationDuration").as_deref(),
            Some("200")
        );
        assert_eq!(
            item_text(&t, "postSplashScreenTheme").as_deref(),
            Some("@style/Theme.Cordova.App.DayNight")
        );
        assert_eq!(
            item_text(&t, "windowSplashScreenBackground").as_deref(),
            Some("@color/cdv_splashscreen_background")
        );
        // Bundled default icon was written intact.
        let icon = std::fs::read_to_string(
            root.path().join(RES).join("drawable/ic_cdv_splashscreen.xml"),
        )
        .unwrap();
        assert!(icon.contains("android:fillColor=\"#7F7F7F\""));
        assert!(icon.trim_end().ends_with("</vector>"));
        assert_eq!(
            item_text(&t, "windowSplashScreenAnimatedIcon").as_deref(),
            Some("@drawable/ic_cdv_splashscreen")
        );
    }

    #[test]
    fn edge_to_edge_is_strictly_parsed() {
        let root = tempdir().unwrap();

        let sink = BufferSink::new();
        run(
            root.path(),
            &descriptor(r#"<preference name="AndroidEdgeToEdge" value="true"/>"#),
            &sink,
        );
        assert_eq!(
            item_text(&themes(root.path()), "android:windowOptOutEdgeToEdgeEnforcement")
                .as_deref(),
            Some("false")
        );
        assert!(sink.messages(Severity::Warn).is_empty());

        let sink = BufferSink::new();
        run(
            root.path(),
            &descriptor(r#"<preference name="AndroidEdgeToEdge" value="TRUE"/>"#),
            &sink,
        );
        assert_eq!(
            item_text(&themes(root.path()), "android:windowOptOutEdgeToEdgeEnforcement")
                .as_deref(),
            Some("true")
        );
        let warnings = sink.messages(Severity::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("TRUE"));
    }

    #[test]
    fn background_color_fallback_chain() {
        let root = tempdir().unwrap();
        let sink = BufferSink::new();
        run(
            root.path(),
            &descriptor(r##"<preference name="BackgroundColor" value="#112233"/>"##),
            &sink,
        );
        assert_eq!(
            item_text(&themes(root.path()), "windowSplashScreenBackground").as_deref(),
            Some("#112233")
        );

        // The newest preference name wins over the legacy ones.
        let sink = BufferSink::new();
        run(
            root.path(),
            &descriptor(
                r##"<preference name="BackgroundColor" value="#112233"/>
                   <preference name="AndroidWindowSplashScreenBackground" value="#445566"/>"##,
            ),
            &sink,
        );
        assert_eq!(
            item_text(&themes(root.path()), "windowSplashScreenBackground").as_deref(),
            Some("#445566")
        );
    }

    #[test]
    fn icon_background_color_node_round_trip() {
        let root = tempdir().unwrap();
        let sink = BufferSink::new();

        run(
            root.path(),
            &descriptor(
                r##"<preference name="AndroidWindowSplashScreenIconBackgroundColor" value="#ABCDEF"/>"##,
            ),
            &sink,
        );
        let colors = xml::parse_file(&root.path().join(RES).join("values/colors.xml")).unwrap();
        let node = colors
            .child_where("color", "name", ICON_BACKGROUND_COLOR_NAME)
            .unwrap();
        assert_eq!(node.text(), "#ABCDEF");

        // Clearing the preference removes the node entirely.
        run(root.path(), &descriptor(""), &sink);
        let colors = xml::parse_file(&root.path().join(RES).join("values/colors.xml")).unwrap();
        assert!(colors
            .child_where("color", "name", ICON_BACKGROUND_COLOR_NAME)
            .is_none());
        assert!(item_text(
            &themes(root.path()),
            "windowSplashScreenIconBackgroundColor"
        )
        .is_none());
    }

    #[test]
    fn raster_animated_icon_goes_to_nodpi_and_cleans_vector_variant() {
        let root = tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("res/screen")).unwrap();
        std::fs::write(root.path().join("res/screen/splash.png"), b"png").unwrap();

        let sink = BufferSink::new();
        let map = run(
            root.path(),
            &descriptor(
                r#"<preference name="AndroidWindowSplashScreenAnimatedIcon" value="res/screen/splash.png"/>"#,
            ),
            &sink,
        );

        assert_eq!(
            map.get(Path::new(
                "app/src/main/res/drawable-nodpi/ic_cdv_splashscreen.png"
            )),
            Some(&SyncAction::Copy(PathBuf::from("res/screen/splash.png")))
        );
        assert_eq!(
            map.get(Path::new("app/src/main/res/drawable/ic_cdv_splashscreen.xml")),
            Some(&SyncAction::Remove)
        );
    }

    #[test]
    fn missing_animated_icon_file_is_noted_and_uses_default() {
        let root = tempdir().unwrap();
        let sink = BufferSink::new();
        run(
            root.path(),
            &descriptor(
                r#"<preference name="AndroidWindowSplashScreenAnimatedIcon" value="res/missing.png"/>"#,
            ),
            &sink,
        );

        // A missing optional asset is a verbose-level decision, not a
        // warning.
        assert!(sink.messages(Severity::Warn).is_empty());
        assert!(sink
            .messages(Severity::Verbose)
            .iter()
            .any(|m| m.contains("res/missing.png")));
        assert!(root
            .path()
            .join(RES)
            .join("drawable/ic_cdv_splashscreen.xml")
            .exists());
    }

    #[test]
    fn branding_image_toggles_tools_namespace() {
        let root = tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("res")).unwrap();
        std::fs::write(root.path().join("res/brand.png"), b"png").unwrap();

        let sink = BufferSink::new();
        run(
            root.path(),
            &descriptor(
                r#"<preference name="AndroidWindowSplashScreenBrandingImage" value="res/brand.png"/>"#,
            ),
            &sink,
        );
        let t = themes(root.path());
        assert_eq!(t.attr("xmlns:tools"), Some(TOOLS_NS));
        let item = t
            .child_where("style", "name", SPLASH_STYLE_NAME)
            .unwrap()
            .child_where("item", "name", "windowSplashScreenBrandingImage")
            .unwrap();
        assert_eq!(item.attr("tools:targetApi"), Some("33"));

        // Unsetting the branding image is delete-only cleanup.
        let map = run(root.path(), &descriptor(""), &sink);
        let t = themes(root.path());
        assert_eq!(t.attr("xmlns:tools"), None);
        assert!(item_text(&t, "windowSplashScreenBrandingImage").is_none());
        assert_eq!(
            map.get(Path::new(
                "app/src/main/res/drawable-nodpi/ic_cdv_splashscreen_branding.png"
            )),
            Some(&SyncAction::Remove)
        );
    }

    #[test]
    fn clean_targets_every_managed_splash_artifact() {
        let map = clean_splash(Path::new(RES));
        for rel in [
            "app/src/main/res/drawable/ic_cdv_splashscreen.xml",
            "app/src/main/res/drawable-nodpi/ic_cdv_splashscreen.png",
            "app/src/main/res/drawable/ic_cdv_splashscreen_branding.xml",
            "app/src/main/res/drawable-nodpi/ic_cdv_splashscreen_branding.png",
            "app/src/main/res/values/themes.xml",
            "app/src/main/res/values/colors.xml",
        ] {
            assert_eq!(map.get(Path::new(rel)), Some(&SyncAction::Remove), "{rel}");
        }
    }
}
