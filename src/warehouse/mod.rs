// src/warehouse/mod.rs
mod ddl;

use std::path::Path;

use duckdb::{params, Connection, Statement};
use tracing::info;

use crate::harmonize::{CargaRecord, EarRecord, EnaRecord};
use crate::{Dataset, Error};

/// Destination store for the harmonized series.
///
/// Each `replace_*` call swaps the dataset's table in a single transaction:
/// the new contents are staged into a fresh table, the old table is dropped
/// and the staging table renamed into place, then the fixed documentation is
/// attached. A failure rolls everything back and leaves the previous table
/// as it was; there is no window where the table is absent or half-written.
///
/// One pipeline run is the sole writer. Running two loads of the same
/// dataset against one database file concurrently is not supported; callers
/// must serialize runs.
pub struct Warehouse {
    conn: Connection,
}

impl Warehouse {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| Error::Load {
            table: path.display().to_string(),
            source,
        })?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory().map_err(|source| Error::Load {
            table: ":memory:".to_string(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Replace DWTABLE_ENA with the given records.
    pub fn replace_ena(&mut self, rows: &[EnaRecord]) -> Result<(), Error> {
        self.replace(Dataset::Ena, ddl::ENA_COLUMNS, ddl::ENA_INSERT, ddl::ENA_COMMENTS, |stmt| {
            for r in rows {
                stmt.execute(params![
                    r.subsystem.code(),
                    r.subsystem.name(),
                    r.date.to_string(),
                    r.gross_mwmed,
                    r.gross_pct_mlt,
                    r.storable_mwmed,
                    r.storable_pct_mlt,
                ])?;
            }
            Ok(())
        })
    }

    /// Replace DWTABLE_EARM with the given records.
    pub fn replace_earm(&mut self, rows: &[EarRecord]) -> Result<(), Error> {
        self.replace(
            Dataset::Ear,
            ddl::EARM_COLUMNS,
            ddl::EARM_INSERT,
            ddl::EARM_COMMENTS,
            |stmt| {
                for r in rows {
                    stmt.execute(params![
                        r.subsystem.code(),
                        r.subsystem.name(),
                        r.date.to_string(),
                        r.max_mwmonth,
                        r.verified_mwmonth,
                        r.verified_pct,
                    ])?;
                }
                Ok(())
            },
        )
    }

    /// Replace DWTABLE_CARGA with the given records.
    pub fn replace_carga(&mut self, rows: &[CargaRecord]) -> Result<(), Error> {
        self.replace(
            Dataset::Carga,
            ddl::CARGA_COLUMNS,
            ddl::CARGA_INSERT,
            ddl::CARGA_COMMENTS,
            |stmt| {
                for r in rows {
                    stmt.execute(params![
                        r.subsystem.code(),
                        r.subsystem.name(),
                        r.date.to_string(),
                        r.load_mwmed,
                    ])?;
                }
                Ok(())
            },
        )
    }

    fn replace(
        &mut self,
        dataset: Dataset,
        columns: &str,
        insert_sql: &str,
        comments: &str,
        fill: impl FnOnce(&mut Statement<'_>) -> duckdb::Result<()>,
    ) -> Result<(), Error> {
        let table = dataset.table();
        let wrap = |source: duckdb::Error| Error::Load {
            table: table.to_string(),
            source,
        };

        let tx = self.conn.transaction().map_err(wrap)?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table}_staging;\nCREATE TABLE {table}_staging (\n{columns}\n);"
        ))
        .map_err(wrap)?;
        {
            let mut stmt = tx.prepare(insert_sql).map_err(wrap)?;
            fill(&mut stmt).map_err(wrap)?;
        }
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};\nALTER TABLE {table}_staging RENAME TO {table};"
        ))
        .map_err(wrap)?;
        tx.execute_batch(comments).map_err(wrap)?;
        tx.commit().map_err(wrap)?;

        info!(%dataset, table, "replaced destination table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmonize::Subsystem;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ear_row(subsystem: Subsystem, date: NaiveDate) -> EarRecord {
        EarRecord {
            subsystem,
            date,
            max_mwmonth: Some(100.0),
            verified_mwmonth: Some(80.0),
            verified_pct: Some(80.0),
        }
    }

    #[test]
    fn replace_loads_every_row() -> Result<(), Error> {
        let mut warehouse = Warehouse::open_in_memory()?;
        let rows = vec![
            ear_row(Subsystem::Sudeste, day(2023, 1, 5)),
            ear_row(Subsystem::Sul, day(2023, 1, 5)),
        ];
        warehouse.replace_earm(&rows)?;

        let count: i64 = warehouse
            .conn
            .query_row("SELECT COUNT(*) FROM DWTABLE_EARM", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
        Ok(())
    }

    #[test]
    fn loaded_row_round_trips_codes_names_and_dates() -> Result<(), Error> {
        let mut warehouse = Warehouse::open_in_memory()?;
        warehouse.replace_earm(&[ear_row(Subsystem::Sudeste, day(2023, 1, 5))])?;

        let (code, name, date, max): (String, String, String, f64) = warehouse
            .conn
            .query_row(
                "SELECT id_subsistema, Subsistema, CAST(Data AS VARCHAR), ear_max_subsistema \
                 FROM DWTABLE_EARM",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .unwrap();
        assert_eq!(code, "SE");
        assert_eq!(name, "Sudeste");
        assert_eq!(date, "2023-01-05");
        assert_eq!(max, 100.0);
        Ok(())
    }

    #[test]
    fn replace_is_idempotent_not_append() -> Result<(), Error> {
        let mut warehouse = Warehouse::open_in_memory()?;
        let rows = vec![
            EnaRecord {
                subsystem: Subsystem::Norte,
                date: day(2022, 6, 1),
                gross_mwmed: Some(1.0),
                gross_pct_mlt: Some(10.0),
                storable_mwmed: Some(1.0),
                storable_pct_mlt: Some(10.0),
            },
            EnaRecord {
                subsystem: Subsystem::Sul,
                date: day(2022, 6, 1),
                gross_mwmed: None,
                gross_pct_mlt: None,
                storable_mwmed: None,
                storable_pct_mlt: None,
            },
        ];
        warehouse.replace_ena(&rows)?;
        warehouse.replace_ena(&rows)?;

        let count: i64 = warehouse
            .conn
            .query_row("SELECT COUNT(*) FROM DWTABLE_ENA", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, rows.len() as i64);

        let nulls: i64 = warehouse
            .conn
            .query_row(
                "SELECT COUNT(*) FROM DWTABLE_ENA WHERE ena_bruta_regiao_mwmed IS NULL",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 1);
        Ok(())
    }

    #[test]
    fn table_documentation_is_attached() -> Result<(), Error> {
        let mut warehouse = Warehouse::open_in_memory()?;
        warehouse.replace_carga(&[CargaRecord {
            subsystem: Subsystem::Nordeste,
            date: day(2023, 1, 5),
            load_mwmed: 11000.0,
        }])?;

        let comment: Option<String> = warehouse
            .conn
            .query_row(
                "SELECT comment FROM duckdb_tables() WHERE table_name = 'DWTABLE_CARGA'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert!(comment.unwrap_or_default().contains("MWmed"));
        Ok(())
    }

    #[test]
    fn tables_persist_across_reopen() -> Result<(), Error> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.duckdb");

        let mut warehouse = Warehouse::open(&path)?;
        warehouse.replace_carga(&[CargaRecord {
            subsystem: Subsystem::Sul,
            date: day(2023, 1, 5),
            load_mwmed: 12000.0,
        }])?;
        drop(warehouse);

        let warehouse = Warehouse::open(&path)?;
        let count: i64 = warehouse
            .conn
            .query_row("SELECT COUNT(*) FROM DWTABLE_CARGA", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        Ok(())
    }
}
