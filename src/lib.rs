//! Ingestion pipeline for the ONS open-data daily series (ENA, EAR, CARGA):
//! fetch the yearly CSV extracts, harmonize their schemas, and replace the
//! warehouse tables consumed by downstream price-driver analysis.

use std::fmt;

pub mod assemble;
pub mod error;
pub mod fetch;
pub mod harmonize;
pub mod warehouse;

pub use error::Error;

/// The three daily series published per subsystem by the grid operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Natural inflow energy (Energia Natural Afluente).
    Ena,
    /// Stored energy (Energia Armazenada).
    Ear,
    /// Load / demand (Carga de Energia).
    Carga,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Ena, Dataset::Ear, Dataset::Carga];

    /// Short identifier used in logs and error messages.
    pub fn id(self) -> &'static str {
        match self {
            Dataset::Ena => "ENA",
            Dataset::Ear => "EAR",
            Dataset::Carga => "CARGA",
        }
    }

    /// Destination table holding the harmonized series.
    pub fn table(self) -> &'static str {
        match self {
            Dataset::Ena => "DWTABLE_ENA",
            Dataset::Ear => "DWTABLE_EARM",
            Dataset::Carga => "DWTABLE_CARGA",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
