use thiserror::Error;

use crate::Dataset;

/// Failure surface of the ingestion pipeline.
///
/// `Fetch` and `Parse` abort the dataset they occur in; downstream
/// harmonization assumes a complete, contiguous year range. `Load` aborts a
/// dataset's table replacement and leaves the destination table untouched.
/// Unparseable dates and other row-scoped problems are not errors; they are
/// counted in [`crate::harmonize::HarmonizeStats`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{dataset} {year}: fetching {url}: {source}")]
    Fetch {
        dataset: Dataset,
        year: i32,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{dataset} {year}: parsing {url}: {source}")]
    Parse {
        dataset: Dataset,
        year: i32,
        url: String,
        #[source]
        source: csv::Error,
    },

    #[error("warehouse {table}: {source}")]
    Load {
        table: String,
        #[source]
        source: duckdb::Error,
    },
}
