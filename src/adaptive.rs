//! Adaptive and legacy launcher icon materialization
//!
//! Runs after icon resolution in two passes over a shared sync map that is
//! pre-seeded with delete sentinels for every recognized launcher resource
//! in every existing density directory. The adaptive pass generates one
//! `adaptive-icon` descriptor per density and stages its layer assets; the
//! legacy pass stages the flat `ic_launcher` image per density. Whatever
//! stays a sentinel afterwards is stale and gets removed by the sync
//! engine.

use std::path::{Path, PathBuf};

use crate::density::Density;
use crate::descriptor::IconDeclaration;
use crate::error::PrepResult;
use crate::events::EventSink;
use crate::icon::{classify, AssetKind, ResolvedIconSet};
use crate::resources::{map_image_resources, ResourceSyncMap, SyncAction, ICON_RESOURCE_NAMES};
use crate::xml::{self, Element};

const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// Cleanup baseline: every managed launcher resource that currently exists
/// on disk, mapped to a delete sentinel
pub fn map_launcher_resources(project_root: &Path, res_dir: &Path) -> PrepResult<ResourceSyncMap> {
    let mut map = ResourceSyncMap::new();
    for name in ICON_RESOURCE_NAMES {
        for target in map_image_resources(project_root, res_dir, "mipmap", name)? {
            if project_root.join(&target).is_file() {
                map.insert(target, SyncAction::Remove);
            }
        }
    }
    Ok(map)
}

/// Materialize launcher icons for a resolved set
///
/// Adaptive-icon descriptors are written directly to disk here; everything
/// else is staged in the returned sync map for the caller to apply.
pub fn update_icons(
    project_root: &Path,
    res_dir: &Path,
    icons: &ResolvedIconSet,
    sink: &dyn EventSink,
) -> PrepResult<ResourceSyncMap> {
    if icons.is_empty() {
        sink.verbose("this app does not have launcher icons defined".to_string());
        return Ok(ResourceSyncMap::new());
    }

    let mut map = map_launcher_resources(project_root, res_dir)?;

    if icons.has_adaptive {
        for (density, icon) in icons.iter() {
            materialize_adaptive(project_root, res_dir, density, icon, &mut map, sink)?;
        }
        // The default icon covers the mdpi slot when no explicit mdpi
        // declaration resolved.
        if icons.get(Density::Mdpi).is_none() {
            if let Some(default) = &icons.default {
                materialize_adaptive(project_root, res_dir, Density::Mdpi, default, &mut map, sink)?;
            }
        }
    }

    for (density, icon) in icons.iter() {
        materialize_legacy(res_dir, density, icon, &mut map, sink);
    }
    if icons.get(Density::Mdpi).is_none() {
        if let Some(default) = &icons.default {
            materialize_legacy(res_dir, Density::Mdpi, default, &mut map, sink);
        }
    }

    Ok(map)
}

/// Cleanup mode: no descriptor resolution, all managed targets removed
pub fn clean_icons(project_root: &Path, res_dir: &Path) -> PrepResult<ResourceSyncMap> {
    map_launcher_resources(project_root, res_dir)
}

fn materialize_adaptive(
    project_root: &Path,
    res_dir: &Path,
    density: Density,
    icon: &IconDeclaration,
    map: &mut ResourceSyncMap,
    sink: &dyn EventSink,
) -> PrepResult<()> {
    let (Some(background), Some(foreground)) = (&icon.background, &icon.foreground) else {
        return Ok(());
    };

    let v26_dir = res_dir.join(format!("mipmap-{density}-v26"));
    let mut descriptor = Element::new("adaptive-icon").with_attr("xmlns:android", ANDROID_NS);

    let background_ref = stage_layer(&v26_dir, "background", background, map);
    descriptor.push(Element::new("background").with_attr("android:drawable", background_ref));

    let foreground_ref = stage_layer(&v26_dir, "foreground", foreground, map);
    descriptor.push(Element::new("foreground").with_attr("android:drawable", foreground_ref));

    if let Some(monochrome) = &icon.monochrome {
        let monochrome_ref = stage_layer(&v26_dir, "monochrome", monochrome, map);
        descriptor.push(Element::new("monochrome").with_attr("android:drawable", monochrome_ref));
    }

    // The descriptor is generated content with no source file, so it is
    // written directly and must not stay in the map as a delete sentinel.
    let descriptor_path = v26_dir.join("ic_launcher.xml");
    xml::write_file(&project_root.join(&descriptor_path), &descriptor)?;
    map.remove(&descriptor_path);
    sink.verbose(format!(
        "generated adaptive icon descriptor {}",
        descriptor_path.display()
    ));
    Ok(())
}

/// Stage one adaptive layer and return its XML drawable reference
fn stage_layer(
    v26_dir: &Path,
    layer: &str,
    value: &str,
    map: &mut ResourceSyncMap,
) -> String {
    match classify(value) {
        AssetKind::ColorRef => value.to_string(),
        AssetKind::Vector => {
            map.insert(
                v26_dir.join(format!("ic_launcher_{layer}.xml")),
                SyncAction::Copy(PathBuf::from(value)),
            );
            format!("@mipmap/ic_launcher_{layer}")
        }
        AssetKind::Raster => {
            map.insert(
                v26_dir.join(format!("ic_launcher_{layer}.png")),
                SyncAction::Copy(PathBuf::from(value)),
            );
            format!("@mipmap/ic_launcher_{layer}")
        }
    }
}

fn materialize_legacy(
    res_dir: &Path,
    density: Density,
    icon: &IconDeclaration,
    map: &mut ResourceSyncMap,
    sink: &dyn EventSink,
) {
    if icon.monochrome.is_some() && (icon.background.is_none() || icon.foreground.is_none()) {
        sink.warn(format!(
            "monochrome icon for {} requires both background and foreground; dropping it",
            icon.report_id()
        ));
    }

    let Some(src) = &icon.src else {
        return;
    };
    let target = res_dir
        .join(format!("mipmap-{density}"))
        .join(format!("ic_launcher{}", icon_suffix(src)));
    map.insert(target, SyncAction::Copy(PathBuf::from(src)));
}

/// Target filename suffix for a legacy icon source, preserving the
/// nine-patch special case
fn icon_suffix(src: &str) -> String {
    if src.ends_with(".9.png") {
        return ".9.png".to_string();
    }
    match Path::new(src).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(".{ext}"),
        None => ".png".to_string(),
    }
}
