//! droidprep - Android project resource preparation and synchronization tool
//!
//! droidprep synchronizes a platform-neutral project descriptor
//! (`config.xml`: icons, splash screens, preferences, resource files, www
//! assets) into the concrete file layout and resource XML a native Android
//! build expects. It is a one-shot, idempotent transform: `prepare` brings
//! the project in line with the descriptor, `clean` removes every managed
//! artifact, and files the tool never managed stay untouched.

pub mod adaptive;
pub mod commands;
pub mod density;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod icon;
pub mod project;
pub mod resources;
pub mod splash;
pub mod sync;
pub mod xml;

// Re-exports for convenience
pub use commands::{clean, prepare};
pub use density::Density;
pub use descriptor::{IconDeclaration, ProjectDescriptor};
pub use error::{PrepError, PrepResult};
pub use events::{BufferSink, ConsoleSink, Event, EventSink, NoopSink, Severity};
pub use icon::{resolve_icons, ResolvedIconSet};
pub use resources::{ResourceSyncMap, SyncAction};
