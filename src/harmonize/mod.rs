// src/harmonize/mod.rs
pub mod labels;

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::fetch::records::{RawCarga, RawEar, RawEna};
use crate::Dataset;

pub use labels::Subsystem;

/// Canonical form of one ENA observation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnaRecord {
    pub subsystem: Subsystem,
    pub date: NaiveDate,
    pub gross_mwmed: Option<f64>,
    pub gross_pct_mlt: Option<f64>,
    pub storable_mwmed: Option<f64>,
    pub storable_pct_mlt: Option<f64>,
}

/// Canonical form of one EAR observation.
#[derive(Debug, Clone, PartialEq)]
pub struct EarRecord {
    pub subsystem: Subsystem,
    pub date: NaiveDate,
    pub max_mwmonth: Option<f64>,
    pub verified_mwmonth: Option<f64>,
    pub verified_pct: Option<f64>,
}

/// Canonical form of one CARGA observation. Rows missing the load value are
/// dropped before this type is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CargaRecord {
    pub subsystem: Subsystem,
    pub date: NaiveDate,
    pub load_mwmed: f64,
}

/// Row-level accounting for one harmonization pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HarmonizeStats {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows dropped because the date column did not parse.
    pub bad_dates: usize,
    /// Rows dropped because the subsystem label was not recognized.
    pub unknown_labels: usize,
    /// Rows dropped because a required measurement was missing (CARGA only).
    pub missing_values: usize,
    /// (date, subsystem) pairs seen more than once. Audited, never dropped.
    pub duplicate_keys: usize,
}

pub fn harmonize_ena(raw: Vec<RawEna>) -> (Vec<EnaRecord>, HarmonizeStats) {
    let mut stats = HarmonizeStats {
        rows_in: raw.len(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(raw.len());
    for row in raw {
        let Some(subsystem) = label_or_count(Dataset::Ena, &row.nom_subsistema, &mut stats) else {
            continue;
        };
        let Some(date) = date_or_count(&row.ena_data, &mut stats) else {
            continue;
        };
        out.push(EnaRecord {
            subsystem,
            date,
            gross_mwmed: row.ena_bruta_regiao_mwmed,
            gross_pct_mlt: row.ena_bruta_regiao_percentualmlt,
            storable_mwmed: row.ena_armazenavel_regiao_mwmed,
            storable_pct_mlt: row.ena_armazenavel_regiao_percentualmlt,
        });
    }
    finish(Dataset::Ena, &mut out, &mut stats, |r| (r.date, r.subsystem));
    (out, stats)
}

pub fn harmonize_ear(raw: Vec<RawEar>) -> (Vec<EarRecord>, HarmonizeStats) {
    let mut stats = HarmonizeStats {
        rows_in: raw.len(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(raw.len());
    for row in raw {
        let Some(subsystem) = label_or_count(Dataset::Ear, &row.nom_subsistema, &mut stats) else {
            continue;
        };
        let Some(date) = date_or_count(&row.ear_data, &mut stats) else {
            continue;
        };
        out.push(EarRecord {
            subsystem,
            date,
            max_mwmonth: row.ear_max_subsistema,
            verified_mwmonth: row.ear_verif_subsistema_mwmes,
            verified_pct: row.ear_verif_subsistema_percentual,
        });
    }
    finish(Dataset::Ear, &mut out, &mut stats, |r| (r.date, r.subsystem));
    (out, stats)
}

/// CARGA additionally drops rows with a missing load value; ENA and EAR have
/// no such filter, their measurement columns arrive fully populated.
pub fn harmonize_carga(raw: Vec<RawCarga>) -> (Vec<CargaRecord>, HarmonizeStats) {
    let mut stats = HarmonizeStats {
        rows_in: raw.len(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(raw.len());
    for row in raw {
        let Some(subsystem) = label_or_count(Dataset::Carga, &row.nom_subsistema, &mut stats)
        else {
            continue;
        };
        let Some(date) = date_or_count(&row.din_instante, &mut stats) else {
            continue;
        };
        let Some(load_mwmed) = row.val_cargaenergiamwmed else {
            stats.missing_values += 1;
            continue;
        };
        out.push(CargaRecord {
            subsystem,
            date,
            load_mwmed,
        });
    }
    finish(Dataset::Carga, &mut out, &mut stats, |r| (r.date, r.subsystem));
    (out, stats)
}

/// Parse the raw date column into a calendar date. CARGA publishes full
/// timestamps; only the day component is kept.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

fn label_or_count(dataset: Dataset, raw: &str, stats: &mut HarmonizeStats) -> Option<Subsystem> {
    let subsystem = labels::normalize(dataset, raw);
    if subsystem.is_none() {
        stats.unknown_labels += 1;
    }
    subsystem
}

fn date_or_count(raw: &str, stats: &mut HarmonizeStats) -> Option<NaiveDate> {
    let date = coerce_date(raw);
    if date.is_none() {
        stats.bad_dates += 1;
    }
    date
}

/// Sort newest-first (stable, so equal dates keep source order), audit
/// duplicate keys, and report drop counts.
fn finish<T>(
    dataset: Dataset,
    rows: &mut Vec<T>,
    stats: &mut HarmonizeStats,
    key_of: impl Fn(&T) -> (NaiveDate, Subsystem),
) {
    rows.sort_by(|a, b| key_of(b).0.cmp(&key_of(a).0));
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows.iter() {
        if !seen.insert(key_of(row)) {
            stats.duplicate_keys += 1;
        }
    }
    stats.rows_out = rows.len();

    if stats.bad_dates > 0 {
        warn!(%dataset, rows = stats.bad_dates, "dropped rows with unparseable dates");
    }
    if stats.unknown_labels > 0 {
        warn!(%dataset, rows = stats.unknown_labels, "dropped rows with unrecognized subsystem labels");
    }
    if stats.missing_values > 0 {
        warn!(%dataset, rows = stats.missing_values, "dropped rows with missing measurements");
    }
    if stats.duplicate_keys > 0 {
        // Overlapping year files can repeat a (date, subsystem) pair; kept
        // verbatim, surfaced for data-quality follow-up.
        warn!(%dataset, pairs = stats.duplicate_keys, "duplicate (date, subsystem) rows in output");
    }
}
