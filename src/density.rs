//! Screen density qualifiers
//!
//! Android selects drawable/mipmap resources by density-qualified directory
//! suffix. The set is fixed and ordered from lowest to highest density.

use std::fmt;

/// Density qualifier for Android resource directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Density {
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    /// All densities, lowest to highest
    pub const ALL: [Density; 6] = [
        Density::Ldpi,
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// Resource directory qualifier string
    pub fn qualifier(self) -> &'static str {
        match self {
            Density::Ldpi => "ldpi",
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Parse a qualifier string
    pub fn from_qualifier(s: &str) -> Option<Density> {
        Density::ALL.into_iter().find(|d| d.qualifier() == s)
    }

    /// Look up the density for a launcher icon pixel size
    ///
    /// Sizes outside the fixed table have no density and are ignored by
    /// icon resolution.
    pub fn from_size(px: u32) -> Option<Density> {
        match px {
            36 => Some(Density::Ldpi),
            48 => Some(Density::Mdpi),
            72 => Some(Density::Hdpi),
            96 => Some(Density::Xhdpi),
            144 => Some(Density::Xxhdpi),
            192 => Some(Density::Xxxhdpi),
            _ => None,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}
