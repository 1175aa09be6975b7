//! Project descriptor (`config.xml`)
//!
//! The platform-neutral descriptor supplies ordered icon declarations,
//! resource-file declarations, and named preference lookups. Everything is
//! re-read on each invocation; nothing here is persisted.

use std::path::{Path, PathBuf};

use crate::density::Density;
use crate::error::{PrepError, PrepResult};
use crate::xml::{self, Element};

/// One icon entry from the project descriptor
///
/// `foreground`, `background` and `monochrome` each hold either a color
/// reference (`@color/...`), a vector path (`.xml`) or a raster path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconDeclaration {
    pub density: Option<Density>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub src: Option<String>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub monochrome: Option<String>,
}

impl IconDeclaration {
    /// Identifier used in diagnostics: the density qualifier, or
    /// `size=<height-or-width>` when no density is declared
    pub fn report_id(&self) -> String {
        if let Some(density) = self.density {
            return density.to_string();
        }
        match self.height.or(self.width) {
            Some(px) => format!("size={px}"),
            None => "default".to_string(),
        }
    }

    /// Density, taken directly or derived from the pixel size table
    pub fn resolved_density(&self) -> Option<Density> {
        self.density
            .or_else(|| self.height.or(self.width).and_then(Density::from_size))
    }

    /// True when neither density nor size is declared
    pub fn is_default_candidate(&self) -> bool {
        self.density.is_none() && self.width.is_none() && self.height.is_none()
    }

    fn from_element(element: &Element) -> Self {
        Self {
            density: element.attr("density").and_then(Density::from_qualifier),
            width: element.attr("width").and_then(|v| v.parse().ok()),
            height: element.attr("height").and_then(|v| v.parse().ok()),
            src: element.attr("src").map(str::to_string),
            foreground: element.attr("foreground").map(str::to_string),
            background: element.attr("background").map(str::to_string),
            monochrome: element.attr("monochrome").map(str::to_string),
        }
    }
}

/// One `<resource-file src=".." target=".."/>` entry
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceFile {
    pub src: String,
    pub target: String,
}

/// Parsed project descriptor
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    root: Element,
    path: PathBuf,
}

impl ProjectDescriptor {
    /// Load and parse a descriptor file
    pub fn load(path: &Path) -> PrepResult<Self> {
        if !path.exists() {
            return Err(PrepError::DescriptorNotFound {
                path: path.to_path_buf(),
            });
        }
        let root = xml::parse_file(path).map_err(|e| PrepError::MalformedDescriptor {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_root(root, path.to_path_buf())
    }

    /// Parse a descriptor from a string (used by tests)
    pub fn parse(content: &str) -> PrepResult<Self> {
        let root = xml::parse_str(content).map_err(|e| PrepError::MalformedDescriptor {
            file: PathBuf::from("config.xml"),
            message: e.to_string(),
        })?;
        Self::from_root(root, PathBuf::from("config.xml"))
    }

    fn from_root(root: Element, path: PathBuf) -> PrepResult<Self> {
        if root.name != "widget" {
            return Err(PrepError::MalformedDescriptor {
                file: path,
                message: format!("expected <widget> root element, found <{}>", root.name),
            });
        }
        Ok(Self { root, path })
    }

    /// Descriptor file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Application package id (`widget id` attribute)
    pub fn package_id(&self) -> Option<&str> {
        self.root.attr("id")
    }

    /// Application version string (`widget version` attribute)
    pub fn version(&self) -> &str {
        self.root.attr("version").unwrap_or("1.0.0")
    }

    /// Application display name (`<name>` element text)
    pub fn name(&self) -> String {
        self.root
            .child("name")
            .map(|e| e.text().trim().to_string())
            .unwrap_or_default()
    }

    /// Icon declarations in resolution order
    ///
    /// Platform-scoped declarations come first so they are never
    /// overwritten by later generic ones for the same density.
    pub fn icons(&self, platform: &str) -> Vec<IconDeclaration> {
        let mut icons: Vec<IconDeclaration> = self
            .platform_block(platform)
            .into_iter()
            .flat_map(|p| p.children_named("icon"))
            .map(IconDeclaration::from_element)
            .collect();
        icons.extend(
            self.root
                .children_named("icon")
                .map(IconDeclaration::from_element),
        );
        icons
    }

    /// Named preference lookup, platform scope winning over top level
    ///
    /// Preference names match case-insensitively.
    pub fn preference(&self, name: &str, platform: &str) -> Option<String> {
        let find = |parent: &Element| {
            parent
                .children_named("preference")
                .find(|p| {
                    p.attr("name")
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
                .and_then(|p| p.attr("value").map(str::to_string))
        };
        self.platform_block(platform)
            .and_then(find)
            .or_else(|| find(&self.root))
    }

    /// Declared resource files for a platform
    pub fn resource_files(&self, platform: &str) -> Vec<ResourceFile> {
        self.platform_block(platform)
            .into_iter()
            .flat_map(|p| p.children_named("resource-file"))
            .filter_map(|e| {
                Some(ResourceFile {
                    src: e.attr("src")?.to_string(),
                    target: e.attr("target")?.to_string(),
                })
            })
            .collect()
    }

    fn platform_block(&self, platform: &str) -> Option<&Element> {
        self.root.child_where("platform", "name", platform)
    }
}
