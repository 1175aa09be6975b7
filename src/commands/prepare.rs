//! The `prepare` orchestrator
//!
//! Sequences descriptor load, www sync, icon and splash materialization,
//! and the project glue. Each step is idempotent, so running `prepare`
//! twice in a row leaves the managed files byte-identical.

use std::path::{Path, PathBuf};

use crate::adaptive;
use crate::descriptor::ProjectDescriptor;
use crate::error::PrepResult;
use crate::events::EventSink;
use crate::icon;
use crate::project;
use crate::resources::{ResourceSyncMap, SyncAction};
use crate::splash;
use crate::sync;

use super::{res_dir, JAVA_DIR, WWW_DEST};

const PLATFORM: &str = "android";

/// Prepare the Android project from its descriptor
pub fn prepare(project_root: &Path, sink: &dyn EventSink) -> PrepResult<()> {
    let descriptor = ProjectDescriptor::load(&project_root.join("config.xml"))?;

    // Icon validation runs before anything touches the filesystem, so a
    // bad descriptor aborts with no partial writes.
    let icons = icon::resolve_icons(&descriptor.icons(PLATFORM), sink)?;

    sink.log(format!("preparing {}", project_root.display()));

    let www = sync::sync_dir(
        project_root,
        Some(Path::new("www")),
        Path::new(WWW_DEST),
        sink,
    )?;
    sink.verbose(format!(
        "www: {} copied, {} removed, {} unchanged",
        www.copied.len(),
        www.removed.len(),
        www.unchanged.len()
    ));

    let mut resource_files = ResourceSyncMap::new();
    for file in descriptor.resource_files(PLATFORM) {
        resource_files.insert(
            PathBuf::from(file.target),
            SyncAction::Copy(PathBuf::from(file.src)),
        );
    }
    sync::apply(project_root, &resource_files, sink)?;

    let icon_map = adaptive::update_icons(project_root, res_dir(), &icons, sink)?;
    sync::apply(project_root, &icon_map, sink)?;

    let splash_map =
        splash::update_splash_theme(project_root, res_dir(), &descriptor, PLATFORM, sink)?;
    sync::apply(project_root, &splash_map, sink)?;

    let name = descriptor.name();
    project::update_strings(project_root, res_dir(), &name)?;
    project::update_project_name(project_root, &name)?;
    project::GradleConfig::from_descriptor(&descriptor).write(project_root)?;
    project::update_manifest(project_root, &descriptor, PLATFORM, sink)?;

    let activity = project::find_activity_source(project_root, Path::new(JAVA_DIR), sink)?;
    if let Some(package_id) = descriptor.package_id() {
        project::update_activity_package(&activity, package_id)?;
    }

    sink.log("project prepared".to_string());
    Ok(())
}
