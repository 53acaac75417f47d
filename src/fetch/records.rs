// src/fetch/records.rs
use serde::Deserialize;

// One struct per source extract, field names exactly as published. Columns
// not listed here (e.g. id_subsistema) are ignored by header-name matching.
// Dates stay raw strings until harmonization; empty measurement cells
// deserialize to None.

/// One row of a yearly ENA extract.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEna {
    pub nom_subsistema: String,
    pub ena_data: String,
    pub ena_bruta_regiao_mwmed: Option<f64>,
    pub ena_bruta_regiao_percentualmlt: Option<f64>,
    pub ena_armazenavel_regiao_mwmed: Option<f64>,
    pub ena_armazenavel_regiao_percentualmlt: Option<f64>,
}

/// One row of a yearly EAR extract.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEar {
    pub nom_subsistema: String,
    pub ear_data: String,
    pub ear_max_subsistema: Option<f64>,
    pub ear_verif_subsistema_mwmes: Option<f64>,
    pub ear_verif_subsistema_percentual: Option<f64>,
}

/// One row of a yearly CARGA extract. `din_instante` is a full timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCarga {
    pub nom_subsistema: String,
    pub din_instante: String,
    pub val_cargaenergiamwmed: Option<f64>,
}
