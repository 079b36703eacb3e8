//! Predefined digital net families.
//!
//! The crate ships loaders for a fixed catalog of research-grade point-set
//! families: Niederreiter-Xing and Sobol nets, their low-WAFOM refinements,
//! and interlaced Sobol nets at interlacing factors 2 through 5 (plain and
//! low-WAFOM). Each family knows its display name, the abbreviation used as
//! its key in the backing store, and a short construction description.
//!
//! Which loading strategy a family uses is decided in [`crate::loader`];
//! this module is pure metadata.

use std::fmt;

/// Identifier of a predefined digital net family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetFamily {
    /// Niederreiter-Xing point set.
    Nx,
    /// Sobol point set, up to dimension 21201.
    Sobol,
    /// Niederreiter-Xing point set selected for low WAFOM.
    NxLowWafom,
    /// Sobol point set selected for low WAFOM.
    SobolLowWafom,
    /// Interlaced Sobol net, interlacing factor 2.
    InterlacedSobolAlpha2,
    /// Interlaced Sobol net, interlacing factor 3.
    InterlacedSobolAlpha3,
    /// Interlaced Sobol net, interlacing factor 4.
    InterlacedSobolAlpha4,
    /// Interlaced Sobol net, interlacing factor 5.
    InterlacedSobolAlpha5,
    /// Interlaced Sobol net, factor 2, selected for low WAFOM.
    InterlacedSobolAlpha2LowWafom,
    /// Interlaced Sobol net, factor 3, selected for low WAFOM.
    InterlacedSobolAlpha3LowWafom,
    /// Interlaced Sobol net, factor 4, selected for low WAFOM.
    InterlacedSobolAlpha4LowWafom,
    /// Interlaced Sobol net, factor 5, selected for low WAFOM.
    InterlacedSobolAlpha5LowWafom,
}

impl NetFamily {
    /// All predefined families, in catalog order.
    pub const ALL: [NetFamily; 12] = [
        NetFamily::Nx,
        NetFamily::Sobol,
        NetFamily::NxLowWafom,
        NetFamily::SobolLowWafom,
        NetFamily::InterlacedSobolAlpha2,
        NetFamily::InterlacedSobolAlpha3,
        NetFamily::InterlacedSobolAlpha4,
        NetFamily::InterlacedSobolAlpha5,
        NetFamily::InterlacedSobolAlpha2LowWafom,
        NetFamily::InterlacedSobolAlpha3LowWafom,
        NetFamily::InterlacedSobolAlpha4LowWafom,
        NetFamily::InterlacedSobolAlpha5LowWafom,
    ];

    /// Human-readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            NetFamily::Nx => "NX",
            NetFamily::Sobol => "Sobol",
            NetFamily::NxLowWafom => "NX_LowWAFOM",
            NetFamily::SobolLowWafom => "Sobol_LowWAFOM",
            NetFamily::InterlacedSobolAlpha2 => "ISobol2",
            NetFamily::InterlacedSobolAlpha3 => "ISobol3",
            NetFamily::InterlacedSobolAlpha4 => "ISobol4",
            NetFamily::InterlacedSobolAlpha5 => "ISobol5",
            NetFamily::InterlacedSobolAlpha2LowWafom => "ISobol2LW",
            NetFamily::InterlacedSobolAlpha3LowWafom => "ISobol3LW",
            NetFamily::InterlacedSobolAlpha4LowWafom => "ISobol4LW",
            NetFamily::InterlacedSobolAlpha5LowWafom => "ISobol5LW",
        }
    }

    /// Abbreviation used as the key in the backing store and in table file
    /// names.
    pub fn abbrev(&self) -> &'static str {
        match self {
            NetFamily::Nx => "nx",
            NetFamily::Sobol => "sobolbase",
            NetFamily::NxLowWafom => "nxlw",
            NetFamily::SobolLowWafom => "solw",
            NetFamily::InterlacedSobolAlpha2 => "sobol_alpha2",
            NetFamily::InterlacedSobolAlpha3 => "sobol_alpha3",
            NetFamily::InterlacedSobolAlpha4 => "sobol_alpha4",
            NetFamily::InterlacedSobolAlpha5 => "sobol_alpha5",
            NetFamily::InterlacedSobolAlpha2LowWafom => "soa2lw",
            NetFamily::InterlacedSobolAlpha3LowWafom => "soa3lw",
            NetFamily::InterlacedSobolAlpha4LowWafom => "soa4lw",
            NetFamily::InterlacedSobolAlpha5LowWafom => "soa5lw",
        }
    }

    /// Short description of the construction.
    pub fn construction(&self) -> &'static str {
        match self {
            NetFamily::Nx => "Niederreiter-Xing",
            NetFamily::Sobol => "Sobol",
            NetFamily::NxLowWafom => "NX+LowWAFOM, CV = (max(CV) + min(CV))/2",
            NetFamily::SobolLowWafom => "Sobol+LowWAFOM, CV = (max(CV) + min(CV))/2",
            NetFamily::InterlacedSobolAlpha2 => "Interlaced Sobol Alpha 2",
            NetFamily::InterlacedSobolAlpha3 => "Interlaced Sobol Alpha 3",
            NetFamily::InterlacedSobolAlpha4 => "Interlaced Sobol Alpha 4",
            NetFamily::InterlacedSobolAlpha5 => "Interlaced Sobol Alpha 5",
            NetFamily::InterlacedSobolAlpha2LowWafom => "Interlaced Sobol Alpha 2 Low WAFOM",
            NetFamily::InterlacedSobolAlpha3LowWafom => "Interlaced Sobol Alpha 3 Low WAFOM",
            NetFamily::InterlacedSobolAlpha4LowWafom => "Interlaced Sobol Alpha 4 Low WAFOM",
            NetFamily::InterlacedSobolAlpha5LowWafom => "Interlaced Sobol Alpha 5 Low WAFOM",
        }
    }

    /// Interlacing factor for the plain interlaced Sobol families.
    ///
    /// Returns `None` for everything else, including the low-WAFOM interlaced
    /// variants, which are served from the generic table rather than the
    /// interlaced column files.
    pub fn interlace_alpha(&self) -> Option<u32> {
        match self {
            NetFamily::InterlacedSobolAlpha2 => Some(2),
            NetFamily::InterlacedSobolAlpha3 => Some(3),
            NetFamily::InterlacedSobolAlpha4 => Some(4),
            NetFamily::InterlacedSobolAlpha5 => Some(5),
            _ => None,
        }
    }

    /// Looks a family up by its display name.
    ///
    /// # Example
    ///
    /// ```
    /// use digitalnet::NetFamily;
    ///
    /// assert_eq!(NetFamily::from_name("Sobol"), Some(NetFamily::Sobol));
    /// assert_eq!(NetFamily::from_name("nope"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<NetFamily> {
        NetFamily::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for NetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_closed_and_distinct() {
        assert_eq!(NetFamily::ALL.len(), 12);
        for (i, a) in NetFamily::ALL.iter().enumerate() {
            for b in &NetFamily::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.abbrev(), b.abbrev());
            }
        }
    }

    #[test]
    fn test_from_name_round_trip() {
        for f in NetFamily::ALL {
            assert_eq!(NetFamily::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn test_interlace_alpha() {
        assert_eq!(NetFamily::InterlacedSobolAlpha2.interlace_alpha(), Some(2));
        assert_eq!(NetFamily::InterlacedSobolAlpha5.interlace_alpha(), Some(5));
        assert_eq!(NetFamily::Sobol.interlace_alpha(), None);
        // Low-WAFOM interlaced nets come from the table store, not the
        // column files, so they report no interlacing factor here.
        assert_eq!(
            NetFamily::InterlacedSobolAlpha3LowWafom.interlace_alpha(),
            None
        );
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(NetFamily::NxLowWafom.to_string(), "NX_LowWAFOM");
    }
}
