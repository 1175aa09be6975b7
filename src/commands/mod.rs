//! Command orchestrators
//!
//! Thin sequencing over the materializers; all real decisions live in the
//! modules they call.

mod clean;
mod prepare;

pub use clean::clean;
pub use prepare::prepare;

use std::path::Path;

/// Resource directory of the Android application module, project-relative
pub const RES_DIR: &str = "app/src/main/res";

/// Destination of the synchronized web assets, project-relative
pub const WWW_DEST: &str = "app/src/main/assets/www";

/// Java/Kotlin source root of the application module, project-relative
pub const JAVA_DIR: &str = "app/src/main/java";

pub(crate) fn res_dir() -> &'static Path {
    Path::new(RES_DIR)
}
