//! Android project glue
//!
//! Thin collaborators around the core materializers: version-code
//! derivation, project naming, the strings descriptor, the Gradle config
//! artifact, activity source discovery, and launch-mode validation. None
//! of this carries deep logic; it exists so `prepare` leaves a complete,
//! buildable project behind.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::descriptor::ProjectDescriptor;
use crate::error::{PrepError, PrepResult};
use crate::events::EventSink;
use crate::sync::atomic_write;
use crate::xml::{self, Element};

/// Characters that cannot appear in a project name on common filesystems
const UNSAFE_NAME_CHARS: [char; 9] = ['/', '\\', ':', '<', '>', '"', '?', '*', '|'];

const KNOWN_LAUNCH_MODES: [&str; 4] = ["standard", "singleTop", "singleTask", "singleInstance"];

/// Derive a numeric version code from a dotted version string
///
/// `major * 10000 + minor * 100 + patch`; absent segments count as zero.
/// The version attribute is operator-supplied, so oversized segments
/// saturate instead of overflowing.
pub fn default_version_code(version: &str) -> i64 {
    let mut parts = version.split('.').map(|p| p.parse::<i64>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    major
        .saturating_mul(10000)
        .saturating_add(minor.saturating_mul(100))
        .saturating_add(patch)
}

/// Replace filesystem-unsafe characters in a display name with `_`
pub fn sanitize_project_name(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Gradle configuration artifact consumed by the native build scripts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradleConfig {
    #[serde(rename = "PACKAGE_NAMESPACE")]
    pub package_namespace: String,
    #[serde(rename = "VERSION_CODE")]
    pub version_code: i64,
    #[serde(rename = "VERSION_NAME")]
    pub version_name: String,
    #[serde(rename = "PROJECT_NAME")]
    pub project_name: String,
}

impl GradleConfig {
    /// Build the config from a descriptor
    pub fn from_descriptor(descriptor: &ProjectDescriptor) -> Self {
        Self {
            package_namespace: descriptor
                .package_id()
                .unwrap_or("io.droidprep.hello")
                .to_string(),
            version_code: default_version_code(descriptor.version()),
            version_name: descriptor.version().to_string(),
            project_name: sanitize_project_name(&descriptor.name()),
        }
    }

    /// Write the artifact as pretty-printed JSON
    pub fn write(&self, project_root: &Path) -> PrepResult<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        atomic_write(&project_root.join("cdv-gradle-config.json"), json.as_bytes())
    }
}

/// Rewrite `values/strings.xml` with `app_name` and `launcher_name`
pub fn update_strings(project_root: &Path, res_dir: &Path, name: &str) -> PrepResult<()> {
    let path = project_root.join(res_dir).join("values/strings.xml");
    let mut root = if path.is_file() {
        xml::parse_file(&path)?
    } else {
        Element::new("resources")
    };

    for node in ["app_name", "launcher_name"] {
        if root.child_where("string", "name", node).is_none() {
            root.push(Element::new("string").with_attr("name", node));
        }
        root.child_where_mut("string", "name", node)
            .expect("string node was just inserted")
            .set_text(name);
    }

    xml::write_file(&path, &root)
}

/// Write the sanitized project name into `settings.gradle`
pub fn update_project_name(project_root: &Path, name: &str) -> PrepResult<()> {
    let sanitized = sanitize_project_name(name);
    let path = project_root.join("settings.gradle");
    let name_line = format!("rootProject.name = '{sanitized}'");

    let content = if path.is_file() {
        let existing = std::fs::read_to_string(&path)?;
        let mut replaced = false;
        let mut lines: Vec<String> = existing
            .lines()
            .map(|line| {
                if line.trim_start().starts_with("rootProject.name") {
                    replaced = true;
                    name_line.clone()
                } else {
                    line.to_string()
                }
            })
            .collect();
        if !replaced {
            lines.insert(0, name_line.clone());
        }
        lines.join("\n") + "\n"
    } else {
        format!("{name_line}\ninclude ':app'\n")
    };

    atomic_write(&path, content.as_bytes())
}

/// Find the qualifying activity source file under the java source root
///
/// A file qualifies when it extends the platform bridge activity. No match
/// is fatal; multiple matches warn and the first in discovery order wins.
pub fn find_activity_source(
    project_root: &Path,
    java_dir: &Path,
    sink: &dyn EventSink,
) -> PrepResult<PathBuf> {
    let root = project_root.join(java_dir);
    let mut matches: Vec<PathBuf> = Vec::new();

    if root.is_dir() {
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| PrepError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_source = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "java" || e == "kt");
            if !is_source {
                continue;
            }
            let content = std::fs::read_to_string(entry.path())?;
            if content.contains("extends CordovaActivity")
                || content.contains(": CordovaActivity")
            {
                matches.push(entry.path().to_path_buf());
            }
        }
    }

    match matches.len() {
        0 => Err(PrepError::ActivityNotFound { dir: java_dir.to_path_buf() }),
        1 => Ok(matches.remove(0)),
        _ => {
            sink.warn(format!(
                "multiple activity source files found under {}, using {}",
                java_dir.display(),
                matches[0].display()
            ));
            Ok(matches.remove(0))
        }
    }
}

/// Rewrite the package declaration of the activity source file
///
/// The original line's semicolon style is kept, so Kotlin sources stay
/// valid Kotlin.
pub fn update_activity_package(activity: &Path, package_id: &str) -> PrepResult<()> {
    let content = std::fs::read_to_string(activity)?;
    let updated: Vec<String> = content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("package ") {
                if trimmed.trim_end().ends_with(';') {
                    format!("package {package_id};")
                } else {
                    format!("package {package_id}")
                }
            } else {
                line.to_string()
            }
        })
        .collect();
    atomic_write(activity, (updated.join("\n") + "\n").as_bytes())
}

/// Validate a launch mode preference
///
/// Unknown values warn but are preserved, since the platform may accept
/// values this tool does not know about.
pub fn validate_launch_mode(value: &str, sink: &dyn EventSink) -> String {
    if !KNOWN_LAUNCH_MODES.contains(&value) {
        sink.warn(format!(
            "unrecognized launch mode {value:?}, expected one of {KNOWN_LAUNCH_MODES:?}; \
             keeping it as-is"
        ));
    }
    value.to_string()
}

/// Set launch mode on the first activity of the manifest, when present
pub fn update_manifest(
    project_root: &Path,
    descriptor: &ProjectDescriptor,
    platform: &str,
    sink: &dyn EventSink,
) -> PrepResult<()> {
    let path = project_root.join("app/src/main/AndroidManifest.xml");
    if !path.is_file() {
        sink.verbose("no AndroidManifest.xml to update".to_string());
        return Ok(());
    }

    let mut manifest = xml::parse_file(&path)?;
    manifest.set_attr("android:versionName", descriptor.version());
    manifest.set_attr(
        "android:versionCode",
        default_version_code(descriptor.version()).to_string(),
    );

    let launch_mode = descriptor
        .preference("AndroidLaunchMode", platform)
        .map(|v| validate_launch_mode(&v, sink))
        .unwrap_or_else(|| "singleTop".to_string());

    if let Some(activity) = manifest
        .child_mut("application")
        .and_then(|app| app.child_mut("activity"))
    {
        activity.set_attr("android:launchMode", launch_mode);
    }

    xml::write_file(&path, &manifest)
}
