//! Icon resolution engine
//!
//! Consumes the ordered icon declarations from the project descriptor,
//! validates them as a whole, and produces a per-density resolved set plus
//! one optional default fallback. Validation failures are aggregated into a
//! single fatal error before any file is written.

use std::collections::BTreeMap;
use std::path::Path;

use crate::density::Density;
use crate::descriptor::IconDeclaration;
use crate::error::{PrepError, PrepResult};
use crate::events::EventSink;

/// How an adaptive-icon layer value is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `@color/...` reference, used verbatim as the XML attribute value
    ColorRef,
    /// Vector drawable (`.xml`), copied and referenced via `@mipmap/...`
    Vector,
    /// Raster image, copied and referenced via `@mipmap/...`
    Raster,
}

/// Classify an icon layer value
pub fn classify(value: &str) -> AssetKind {
    if value.starts_with("@color") {
        return AssetKind::ColorRef;
    }
    match Path::new(value).extension().and_then(|e| e.to_str()) {
        Some("xml") => AssetKind::Vector,
        _ => AssetKind::Raster,
    }
}

/// Per-density resolved icons plus the optional default fallback
#[derive(Debug, Clone, Default)]
pub struct ResolvedIconSet {
    per_density: BTreeMap<Density, IconDeclaration>,
    /// The one declaration with neither size nor density; used as the
    /// mdpi fallback when mdpi is absent
    pub default: Option<IconDeclaration>,
    /// True when any declaration anywhere had a foreground
    pub has_adaptive: bool,
}

impl ResolvedIconSet {
    /// Resolved declaration for a density
    pub fn get(&self, density: Density) -> Option<&IconDeclaration> {
        self.per_density.get(&density)
    }

    /// Densities with a resolved declaration, in fixed order
    pub fn densities(&self) -> impl Iterator<Item = Density> + '_ {
        self.per_density.keys().copied()
    }

    /// Density/declaration pairs in fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Density, &IconDeclaration)> {
        self.per_density.iter().map(|(d, i)| (*d, i))
    }

    /// True when nothing was declared
    pub fn is_empty(&self) -> bool {
        self.per_density.is_empty() && self.default.is_none()
    }
}

/// Validate and resolve the ordered icon declarations
///
/// Fails entirely, with every offending declaration named, when any
/// declaration sets exactly one of background/foreground (or nothing at
/// all), or declares an adaptive-only icon with no flat fallback.
pub fn resolve_icons(
    declarations: &[IconDeclaration],
    sink: &dyn EventSink,
) -> PrepResult<ResolvedIconSet> {
    let mut missing_pair = Vec::new();
    let mut legacy_needed = Vec::new();
    let mut has_adaptive = false;

    for icon in declarations {
        let has_fg = icon.foreground.is_some();
        let has_bg = icon.background.is_some();
        has_adaptive |= has_fg;

        if has_fg != has_bg || (!has_fg && !has_bg && icon.src.is_none()) {
            missing_pair.push(icon.report_id());
        }

        if let Some(fg) = &icon.foreground {
            if classify(fg) != AssetKind::Raster && icon.src.is_none() {
                legacy_needed.push(icon.report_id());
            }
        }
    }

    if !missing_pair.is_empty() || !legacy_needed.is_empty() {
        return Err(PrepError::IconValidation {
            missing_pair,
            legacy_needed,
        });
    }

    let mut set = ResolvedIconSet {
        has_adaptive,
        ..Default::default()
    };

    for icon in declarations {
        let mut icon = icon.clone();

        // A raster foreground doubles as the legacy flat icon when no
        // explicit src is declared.
        if icon.src.is_none() {
            if let Some(fg) = &icon.foreground {
                if classify(fg) == AssetKind::Raster {
                    icon.src = Some(fg.clone());
                }
            }
        }

        if let Some(density) = icon.resolved_density() {
            if set.per_density.contains_key(&density) {
                sink.verbose(format!(
                    "Ignoring icon for already-resolved density {density}: {icon:?}"
                ));
            } else {
                set.per_density.insert(density, icon);
            }
        } else if icon.is_default_candidate() {
            match &set.default {
                Some(kept) => sink.verbose(format!(
                    "Found extra default icon: {icon:?} and ignoring in favor of {kept:?}"
                )),
                None => set.default = Some(icon),
            }
        }
        // Declarations with a size outside the density table are dropped.
    }

    Ok(set)
}
