// src/harmonize/labels.rs
use crate::Dataset;

/// One of the four regional subsystems of the national interconnected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Subsystem {
    pub const ALL: [Subsystem; 4] = [
        Subsystem::Nordeste,
        Subsystem::Norte,
        Subsystem::Sudeste,
        Subsystem::Sul,
    ];

    /// Short code, the destination tables' key column.
    pub fn code(self) -> &'static str {
        match self {
            Subsystem::Nordeste => "NE",
            Subsystem::Norte => "N",
            Subsystem::Sudeste => "SE",
            Subsystem::Sul => "S",
        }
    }

    /// Canonical long name.
    pub fn name(self) -> &'static str {
        match self {
            Subsystem::Nordeste => "Nordeste",
            Subsystem::Norte => "Norte",
            Subsystem::Sudeste => "Sudeste",
            Subsystem::Sul => "Sul",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NE" => Some(Subsystem::Nordeste),
            "N" => Some(Subsystem::Norte),
            "SE" => Some(Subsystem::Sudeste),
            "S" => Some(Subsystem::Sul),
            _ => None,
        }
    }
}

// Raw spellings observed in each source. The sources evolved independently
// over twenty-plus years, so the tables are kept per dataset; a newly
// observed spelling is a data change here, not a code change.

static ENA_LABELS: &[(&str, Subsystem)] = &[
    ("SUDESTE", Subsystem::Sudeste),
    ("SUL", Subsystem::Sul),
    ("NORDESTE", Subsystem::Nordeste),
    ("NORTE", Subsystem::Norte),
];

static EAR_LABELS: &[(&str, Subsystem)] = &[
    ("SUDESTE", Subsystem::Sudeste),
    ("SUL", Subsystem::Sul),
    ("NORDESTE", Subsystem::Nordeste),
    ("NORTE", Subsystem::Norte),
];

static CARGA_LABELS: &[(&str, Subsystem)] = &[
    ("Sudeste/Centro-Oeste", Subsystem::Sudeste),
    ("SUL", Subsystem::Sul),
    ("NORDESTE", Subsystem::Nordeste),
    ("NORTE", Subsystem::Norte),
];

/// Map a raw subsystem label to its canonical subsystem. Canonical long
/// names pass through for every dataset; anything else must appear in the
/// dataset's spelling table.
pub fn normalize(dataset: Dataset, raw: &str) -> Option<Subsystem> {
    let table = match dataset {
        Dataset::Ena => ENA_LABELS,
        Dataset::Ear => EAR_LABELS,
        Dataset::Carga => CARGA_LABELS,
    };
    let raw = raw.trim();
    table
        .iter()
        .chain(CANONICAL)
        .find(|(spelling, _)| *spelling == raw)
        .map(|&(_, subsystem)| subsystem)
}

static CANONICAL: &[(&str, Subsystem)] = &[
    ("Nordeste", Subsystem::Nordeste),
    ("Norte", Subsystem::Norte),
    ("Sudeste", Subsystem::Sudeste),
    ("Sul", Subsystem::Sul),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_name_round_trip_is_identity() {
        for subsystem in Subsystem::ALL {
            assert_eq!(Subsystem::from_code(subsystem.code()), Some(subsystem));
            assert_eq!(normalize(Dataset::Ena, subsystem.name()), Some(subsystem));
        }
    }

    #[test]
    fn upper_case_spellings_normalize_for_ena_and_ear() {
        assert_eq!(normalize(Dataset::Ena, "SUDESTE"), Some(Subsystem::Sudeste));
        assert_eq!(normalize(Dataset::Ear, "NORDESTE"), Some(Subsystem::Nordeste));
        assert_eq!(normalize(Dataset::Ear, "SUL"), Some(Subsystem::Sul));
    }

    #[test]
    fn carga_uses_its_own_spelling_table() {
        assert_eq!(
            normalize(Dataset::Carga, "Sudeste/Centro-Oeste"),
            Some(Subsystem::Sudeste)
        );
        // The combined spelling was only ever observed in the CARGA source.
        assert_eq!(normalize(Dataset::Ena, "Sudeste/Centro-Oeste"), None);
    }

    #[test]
    fn unknown_labels_do_not_normalize() {
        assert_eq!(normalize(Dataset::Carga, "ITAIPU"), None);
    }
}
