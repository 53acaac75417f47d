// src/assemble/mod.rs
use std::ops::RangeInclusive;

use futures::{stream, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::fetch::csv::fetch_year;
use crate::fetch::records::{RawCarga, RawEar, RawEna};
use crate::fetch::urls::file_url;
use crate::{Dataset, Error};

/// Upper bound on in-flight yearly fetches for one dataset.
const FETCH_WINDOW: usize = 4;

/// Number of regional subsystems; sources publish one row per subsystem per
/// day, so rows / 4 approximates the number of days covered.
pub const SUBSYSTEM_COUNT: usize = 4;

pub async fn pull_ena(client: &Client, years: RangeInclusive<i32>) -> Result<Vec<RawEna>, Error> {
    pull(client, Dataset::Ena, years).await
}

pub async fn pull_ear(client: &Client, years: RangeInclusive<i32>) -> Result<Vec<RawEar>, Error> {
    pull(client, Dataset::Ear, years).await
}

pub async fn pull_carga(
    client: &Client,
    years: RangeInclusive<i32>,
) -> Result<Vec<RawCarga>, Error> {
    pull(client, Dataset::Carga, years).await
}

/// Fetch every year in the range and concatenate the extracts in ascending
/// year order, preserving source row order within each year. Fetches run
/// inside a bounded concurrency window, but `buffered` yields results in
/// input order, so the concatenation does not depend on completion order.
/// Any single year's failure aborts the whole dataset.
#[tracing::instrument(level = "info", skip(client, years))]
async fn pull<T: DeserializeOwned>(
    client: &Client,
    dataset: Dataset,
    years: RangeInclusive<i32>,
) -> Result<Vec<T>, Error> {
    let end_year = *years.end();
    let fetches = years.clone().map(|year| {
        let client = client.clone();
        let url = file_url(dataset, year, end_year);
        async move { fetch_year::<T>(&client, dataset, year, &url).await }
    });

    let per_year: Vec<Vec<T>> = stream::iter(fetches)
        .buffered(FETCH_WINDOW)
        .try_collect()
        .await?;

    let rows: Vec<T> = per_year.into_iter().flatten().collect();
    info!(
        %dataset,
        years = ?years,
        rows = rows.len(),
        approx_days = rows.len() / SUBSYSTEM_COUNT,
        "assembled extracts"
    );
    Ok(rows)
}
