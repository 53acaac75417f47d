// src/fetch/csv.rs
use std::time::Duration;

use csv::ReaderBuilder;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::{Dataset, Error};

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Download one yearly extract and parse it into raw records.
///
/// Transport failures and non-success statuses are retried with exponential
/// backoff before surfacing as [`Error::Fetch`]; content that does not parse
/// as semicolon-delimited CSV with the expected header is [`Error::Parse`].
/// Every data row in the file becomes exactly one record.
pub async fn fetch_year<T: DeserializeOwned>(
    client: &Client,
    dataset: Dataset,
    year: i32,
    url: &Url,
) -> Result<Vec<T>, Error> {
    let body = get_bytes_with_retry(client, url)
        .await
        .map_err(|source| Error::Fetch {
            dataset,
            year,
            url: url.to_string(),
            source,
        })?;
    let rows = parse_records(&body).map_err(|source| Error::Parse {
        dataset,
        year,
        url: url.to_string(),
        source,
    })?;
    debug!(%dataset, year, rows = rows.len(), "fetched extract");
    Ok(rows)
}

async fn get_bytes_core(client: &Client, url: &Url) -> Result<Vec<u8>, reqwest::Error> {
    let resp = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

async fn get_bytes_with_retry(client: &Client, url: &Url) -> Result<Vec<u8>, reqwest::Error> {
    let mut attempts = 0;
    loop {
        match get_bytes_core(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) if attempts < MAX_RETRIES => {
                attempts += 1;
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempts - 1);
                warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "retrying fetch");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Parse a semicolon-delimited UTF-8 extract with a header row. No rows are
/// filtered here; that is the harmonizer's job.
pub fn parse_records<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, csv::Error> {
    let mut reader = ReaderBuilder::new().delimiter(b';').from_reader(bytes);
    reader.deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::records::{RawCarga, RawEar, RawEna};

    #[test]
    fn parses_an_ena_extract() {
        let body = "id_subsistema;nom_subsistema;ena_data;ena_bruta_regiao_mwmed;ena_bruta_regiao_percentualmlt;ena_armazenavel_regiao_mwmed;ena_armazenavel_regiao_percentualmlt\n\
                    SE;SUDESTE;2001-01-01;34297.0;104.0;32938.0;105.0\n\
                    S;SUL;2001-01-01;4376.0;52.0;4376.0;53.0\n";
        let rows: Vec<RawEna> = parse_records(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].nom_subsistema, "SUDESTE");
        assert_eq!(rows[0].ena_data, "2001-01-01");
        assert_eq!(rows[0].ena_bruta_regiao_mwmed, Some(34297.0));
        assert_eq!(rows[1].ena_armazenavel_regiao_percentualmlt, Some(53.0));
    }

    #[test]
    fn empty_measurement_cells_become_none() {
        let body = "id_subsistema;nom_subsistema;din_instante;val_cargaenergiamwmed\n\
                    N;NORTE;2001-01-01 00:00:00;\n\
                    NE;NORDESTE;2001-01-01 00:00:00;5980.1\n";
        let rows: Vec<RawCarga> = parse_records(body.as_bytes()).unwrap();
        assert_eq!(rows[0].val_cargaenergiamwmed, None);
        assert_eq!(rows[1].val_cargaenergiamwmed, Some(5980.1));
    }

    #[test]
    fn missing_expected_header_is_a_parse_error() {
        let body = "foo;bar\n1;2\n";
        let rows: Result<Vec<RawEar>, _> = parse_records(body.as_bytes());
        assert!(rows.is_err());
    }

    #[test]
    fn every_data_row_becomes_one_record() {
        let body = "id_subsistema;nom_subsistema;ear_data;ear_max_subsistema;ear_verif_subsistema_mwmes;ear_verif_subsistema_percentual\n\
                    SE;SUDESTE;2023-01-05;100.0;80.0;80.0\n\
                    S;SUL;2023-01-05;50.0;25.0;50.0\n\
                    NE;NORDESTE;2023-01-05;60.0;30.0;50.0\n\
                    N;NORTE;2023-01-05;15.0;12.0;80.0\n";
        let rows: Vec<RawEar> = parse_records(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
    }
}
