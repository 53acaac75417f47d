// src/fetch/urls.rs
use chrono::{DateTime, Datelike, Duration, Utc};
use std::ops::RangeInclusive;
use url::Url;

use crate::Dataset;

/// First year with published history for all three series.
pub const FIRST_YEAR: i32 = 2001;

/// The source typically publishes a few days behind the calendar, most
/// noticeably around year boundaries.
const PUBLICATION_LAG_DAYS: i64 = 5;

const DL_HOST: &str = "https://ons-dl-prod-opendata.s3.amazonaws.com";
const AWS_HOST: &str = "https://ons-aws-prod-opendata.s3.amazonaws.com";

/// Inclusive range of years for which extracts are expected to exist, given
/// the wall clock at invocation time.
pub fn year_range(now: DateTime<Utc>) -> RangeInclusive<i32> {
    let last_published = now - Duration::days(PUBLICATION_LAG_DAYS);
    FIRST_YEAR..=last_published.year()
}

/// Address of one dataset's yearly extract.
pub fn file_url(dataset: Dataset, year: i32, end_year: i32) -> Url {
    let (host, path, prefix) = match dataset {
        Dataset::Ena => (DL_HOST, "ena_subsistema_di", "ENA_DIARIO_SUBSISTEMA"),
        Dataset::Ear => (DL_HOST, "ear_subsistema_di", "EAR_DIARIO_SUBSISTEMA"),
        Dataset::Carga => (
            carga_host(year, end_year),
            "carga_energia_di",
            "CARGA_ENERGIA",
        ),
    };
    let address = format!("{host}/dataset/{path}/{prefix}_{year}.csv");
    Url::parse(&address).expect("dataset addresses should be valid URLs")
}

/// CARGA's current-year extract lives on the dl host while earlier years
/// stayed on the aws host, as observed at the time of writing. If the source
/// consolidates its addressing, this collapses to a single host.
fn carga_host(year: i32, end_year: i32) -> &'static str {
    if year < end_year {
        AWS_HOST
    } else {
        DL_HOST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn year_range_backs_off_over_the_year_boundary() {
        // Jan 2nd minus the publication lag still falls in the prior year.
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        assert_eq!(year_range(now), 2001..=2023);
    }

    #[test]
    fn year_range_mid_year_ends_in_the_current_year() {
        let now = Utc.with_ymd_and_hms(2023, 9, 25, 0, 0, 0).unwrap();
        assert_eq!(year_range(now), 2001..=2023);
    }

    #[test]
    fn ena_and_ear_addresses_are_stable_across_years() {
        assert_eq!(
            file_url(Dataset::Ena, 2001, 2023).as_str(),
            "https://ons-dl-prod-opendata.s3.amazonaws.com/dataset/ena_subsistema_di/ENA_DIARIO_SUBSISTEMA_2001.csv"
        );
        assert_eq!(
            file_url(Dataset::Ear, 2023, 2023).as_str(),
            "https://ons-dl-prod-opendata.s3.amazonaws.com/dataset/ear_subsistema_di/EAR_DIARIO_SUBSISTEMA_2023.csv"
        );
    }

    #[test]
    fn carga_final_year_uses_the_alternate_host() {
        assert_eq!(
            file_url(Dataset::Carga, 2022, 2023).as_str(),
            "https://ons-aws-prod-opendata.s3.amazonaws.com/dataset/carga_energia_di/CARGA_ENERGIA_2022.csv"
        );
        assert_eq!(
            file_url(Dataset::Carga, 2023, 2023).as_str(),
            "https://ons-dl-prod-opendata.s3.amazonaws.com/dataset/carga_energia_di/CARGA_ENERGIA_2023.csv"
        );
    }
}
