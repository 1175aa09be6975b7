//! The `clean` orchestrator
//!
//! Removes every managed artifact without reading the descriptor: launcher
//! icon resources, splash assets and descriptors, synchronized www assets,
//! and the Gradle config artifact. Files this tool never managed are left
//! alone.

use std::path::{Path, PathBuf};

use crate::adaptive;
use crate::error::PrepResult;
use crate::events::EventSink;
use crate::resources::SyncAction;
use crate::splash;
use crate::sync;

use super::{res_dir, WWW_DEST};

/// Remove all managed artifacts from the Android project
pub fn clean(project_root: &Path, sink: &dyn EventSink) -> PrepResult<()> {
    sink.log(format!("cleaning {}", project_root.display()));

    let mut map = adaptive::clean_icons(project_root, res_dir())?;
    map.extend(splash::clean_splash(res_dir()));
    map.insert(PathBuf::from("cdv-gradle-config.json"), SyncAction::Remove);
    sync::apply(project_root, &map, sink)?;

    sync::sync_dir(project_root, None, Path::new(WWW_DEST), sink)?;

    sink.log("project cleaned".to_string());
    Ok(())
}
