use anyhow::Result;
use chrono::Utc;
use onscraper::{
    assemble,
    fetch::urls,
    harmonize::{self, HarmonizeStats},
    warehouse::Warehouse,
    Dataset,
};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Warehouse database file, created in the working directory on first run.
const WAREHOUSE_PATH: &str = "warehouse.duckdb";

/// Per-request timeout; a yearly extract that stalls past this is treated as
/// a fetch failure for that year.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve the year range ───────────────────────────────────
    let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let years = urls::year_range(Utc::now());
    info!(start = *years.start(), end = *years.end(), "resolved year range");

    // ─── 3) pull + harmonize, one independent task per dataset ───────
    // A failure in one dataset must not stop the others.
    let ena = tokio::spawn({
        let client = client.clone();
        let years = years.clone();
        async move {
            let raw = assemble::pull_ena(&client, years).await?;
            Ok::<_, onscraper::Error>(harmonize::harmonize_ena(raw))
        }
    });
    let ear = tokio::spawn({
        let client = client.clone();
        let years = years.clone();
        async move {
            let raw = assemble::pull_ear(&client, years).await?;
            Ok::<_, onscraper::Error>(harmonize::harmonize_ear(raw))
        }
    });
    let carga = tokio::spawn({
        let client = client.clone();
        let years = years.clone();
        async move {
            let raw = assemble::pull_carga(&client, years).await?;
            Ok::<_, onscraper::Error>(harmonize::harmonize_carga(raw))
        }
    });

    let ena = ena.await?;
    let ear = ear.await?;
    let carga = carga.await?;

    // ─── 4) load the successful datasets, serialized on one connection ─
    let all_ok = tokio::task::spawn_blocking(move || -> Result<bool, onscraper::Error> {
        let mut warehouse = Warehouse::open(WAREHOUSE_PATH)?;
        let mut all_ok = true;
        all_ok &= load_one(&mut warehouse, Dataset::Ena, ena, |w, r| w.replace_ena(r));
        all_ok &= load_one(&mut warehouse, Dataset::Ear, ear, |w, r| w.replace_earm(r));
        all_ok &= load_one(&mut warehouse, Dataset::Carga, carga, |w, r| w.replace_carga(r));
        Ok(all_ok)
    })
    .await??;

    if !all_ok {
        anyhow::bail!("one or more dataset pipelines failed");
    }
    info!("all done");
    Ok(())
}

/// Load one dataset's harmonized rows, reporting rather than propagating
/// failure so the remaining datasets still get their chance.
fn load_one<R>(
    warehouse: &mut Warehouse,
    dataset: Dataset,
    outcome: Result<(Vec<R>, HarmonizeStats), onscraper::Error>,
    replace: impl FnOnce(&mut Warehouse, &[R]) -> Result<(), onscraper::Error>,
) -> bool {
    match outcome {
        Ok((rows, stats)) => {
            info!(
                %dataset,
                rows_in = stats.rows_in,
                rows_out = stats.rows_out,
                "harmonized"
            );
            match replace(warehouse, &rows) {
                Ok(()) => true,
                Err(e) => {
                    error!(%dataset, error = %e, "load failed");
                    false
                }
            }
        }
        Err(e) => {
            error!(%dataset, error = %e, "pipeline failed");
            false
        }
    }
}
