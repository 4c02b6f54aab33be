//! Read-only access to the Run Conditions Database (RCDB).
//!
//! RCDB is a SQLite file in which each run's conditions live in a
//! `conditions` table, one row per (run, condition type). The value sits in
//! the column selected by the type (`int_value`, `float_value`, `text_value`,
//! `bool_value`); `condition_types` maps condition names to type ids.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};

use crate::domain::RunConditions;
use crate::error::AppError;

/// Condition names fetched per run, in output-column order.
pub const CONDITION_NAMES: [&str; 6] = [
    "event_count",
    "beam_on_current",
    "beam_energy",
    "coherent_peak",
    "collimator_diameter",
    "radiator_type",
];

/// A read-only handle on one RCDB file.
pub struct RcdbProvider {
    conn: Connection,
}

impl RcdbProvider {
    /// Open an RCDB SQLite file.
    ///
    /// Read-only open means a missing file is reported here instead of
    /// sqlite silently creating an empty database.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            AppError::new(3, format!("Failed to open RCDB '{}': {e}", path.display()))
        })?;
        Ok(Self { conn })
    }

    /// Select all production, status-approved runs in `[min_run, max_run]`
    /// (inclusive) and fetch the six conditions for each, ordered by run
    /// number ascending.
    ///
    /// An empty result is not an error; a selected run missing one of the
    /// six conditions is.
    pub fn fetch_run_conditions(
        &self,
        min_run: u32,
        max_run: u32,
    ) -> Result<Vec<RunConditions>, AppError> {
        let numbers = self.select_approved_runs(min_run, max_run)?;
        let mut out = Vec::with_capacity(numbers.len());
        for number in numbers {
            out.push(self.fetch_conditions_for(number)?);
        }
        Ok(out)
    }

    fn select_approved_runs(&self, min_run: u32, max_run: u32) -> Result<Vec<u32>, AppError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT r.number FROM runs r \
                 WHERE r.number BETWEEN ?1 AND ?2 \
                   AND EXISTS (SELECT 1 FROM conditions c \
                               JOIN condition_types t ON t.id = c.condition_type_id \
                               WHERE c.run_number = r.number \
                                 AND t.name = 'is_production' AND c.bool_value = 1) \
                   AND EXISTS (SELECT 1 FROM conditions c \
                               JOIN condition_types t ON t.id = c.condition_type_id \
                               WHERE c.run_number = r.number \
                                 AND t.name = 'status_approved' AND c.bool_value = 1) \
                 ORDER BY r.number",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map(params![min_run, max_run], |row| row.get::<_, u32>(0))
            .map_err(query_err)?;

        let mut numbers = Vec::new();
        for number in rows {
            numbers.push(number.map_err(query_err)?);
        }
        Ok(numbers)
    }

    fn fetch_conditions_for(&self, run_number: u32) -> Result<RunConditions, AppError> {
        struct RawValue {
            int_value: Option<i64>,
            float_value: Option<f64>,
            text_value: Option<String>,
        }

        let name_list = CONDITION_NAMES.map(|n| format!("'{n}'")).join(", ");
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT t.name, c.int_value, c.float_value, c.text_value \
                 FROM conditions c \
                 JOIN condition_types t ON t.id = c.condition_type_id \
                 WHERE c.run_number = ?1 AND t.name IN ({name_list})"
            ))
            .map_err(query_err)?;

        let rows = stmt
            .query_map(params![run_number], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    RawValue {
                        int_value: row.get(1)?,
                        float_value: row.get(2)?,
                        text_value: row.get(3)?,
                    },
                ))
            })
            .map_err(query_err)?;

        let mut raw: HashMap<String, RawValue> = HashMap::new();
        for row in rows {
            let (name, value) = row.map_err(query_err)?;
            raw.insert(name, value);
        }

        let int_of = |name: &str| -> Result<i64, AppError> {
            raw.get(name)
                .and_then(|v| v.int_value)
                .ok_or_else(|| missing_condition(run_number, name))
        };
        // Whole-valued floats occasionally land in int_value; accept both.
        let float_of = |name: &str| -> Result<f64, AppError> {
            raw.get(name)
                .and_then(|v| v.float_value.or(v.int_value.map(|i| i as f64)))
                .ok_or_else(|| missing_condition(run_number, name))
        };
        let text_of = |name: &str| -> Result<String, AppError> {
            raw.get(name)
                .and_then(|v| v.text_value.clone())
                .ok_or_else(|| missing_condition(run_number, name))
        };

        Ok(RunConditions {
            run_number,
            event_count: int_of("event_count")?,
            beam_on_current: float_of("beam_on_current")?,
            beam_energy: float_of("beam_energy")?,
            coherent_peak: float_of("coherent_peak")?,
            collimator_diameter: text_of("collimator_diameter")?,
            radiator_type: text_of("radiator_type")?,
        })
    }
}

fn query_err(e: rusqlite::Error) -> AppError {
    AppError::new(3, format!("RCDB query failed: {e}"))
}

fn missing_condition(run_number: u32, name: &str) -> AppError {
    AppError::new(
        3,
        format!("Run {run_number} is missing condition '{name}' (or it has an unexpected type)."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE runs (number INTEGER PRIMARY KEY); \
             CREATE TABLE condition_types (id INTEGER PRIMARY KEY, name TEXT NOT NULL, value_type TEXT NOT NULL); \
             CREATE TABLE conditions ( \
                 run_number INTEGER NOT NULL, \
                 condition_type_id INTEGER NOT NULL, \
                 text_value TEXT, int_value INTEGER, float_value REAL, bool_value INTEGER); \
             INSERT INTO condition_types VALUES \
                 (1, 'is_production', 'bool'), \
                 (2, 'status_approved', 'bool'), \
                 (3, 'event_count', 'int'), \
                 (4, 'beam_on_current', 'float'), \
                 (5, 'beam_energy', 'float'), \
                 (6, 'coherent_peak', 'float'), \
                 (7, 'collimator_diameter', 'string'), \
                 (8, 'radiator_type', 'string');",
        )
        .unwrap();
        conn
    }

    fn insert_run(conn: &Connection, number: u32, production: bool, approved: bool) {
        conn.execute("INSERT INTO runs (number) VALUES (?1)", params![number])
            .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, bool_value) VALUES (?1, 1, ?2)",
            params![number, production],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, bool_value) VALUES (?1, 2, ?2)",
            params![number, approved],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, int_value) VALUES (?1, 3, 1000000)",
            params![number],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, float_value) VALUES (?1, 4, 150.0)",
            params![number],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, float_value) VALUES (?1, 5, 11600.0)",
            params![number],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, float_value) VALUES (?1, 6, 8700.0)",
            params![number],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, text_value) VALUES (?1, 7, '3.4mm hole')",
            params![number],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO conditions (run_number, condition_type_id, text_value) VALUES (?1, 8, 'Be 750')",
            params![number],
        )
        .unwrap();
    }

    fn provider(conn: Connection) -> RcdbProvider {
        RcdbProvider { conn }
    }

    #[test]
    fn filters_on_production_and_approval() {
        let conn = test_db();
        insert_run(&conn, 100, true, true);
        insert_run(&conn, 101, false, true);
        insert_run(&conn, 102, true, false);
        insert_run(&conn, 103, true, true);

        let runs = provider(conn).fetch_run_conditions(100, 103).unwrap();
        let numbers: Vec<u32> = runs.iter().map(|r| r.run_number).collect();
        assert_eq!(numbers, vec![100, 103]);
    }

    #[test]
    fn run_range_is_inclusive() {
        let conn = test_db();
        insert_run(&conn, 99, true, true);
        insert_run(&conn, 100, true, true);
        insert_run(&conn, 101, true, true);
        insert_run(&conn, 102, true, true);

        let runs = provider(conn).fetch_run_conditions(100, 101).unwrap();
        let numbers: Vec<u32> = runs.iter().map(|r| r.run_number).collect();
        assert_eq!(numbers, vec![100, 101]);
    }

    #[test]
    fn conditions_map_onto_named_fields() {
        let conn = test_db();
        insert_run(&conn, 100, true, true);

        let runs = provider(conn).fetch_run_conditions(100, 100).unwrap();
        let run = &runs[0];
        assert_eq!(run.event_count, 1000000);
        assert_eq!(run.beam_on_current, 150.0);
        assert_eq!(run.beam_energy, 11600.0);
        assert_eq!(run.coherent_peak, 8700.0);
        assert_eq!(run.collimator_diameter, "3.4mm hole");
        assert_eq!(run.radiator_type, "Be 750");
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let conn = test_db();
        insert_run(&conn, 100, true, true);

        let runs = provider(conn).fetch_run_conditions(200, 300).unwrap();
        assert!(runs.is_empty());
    }

    #[test]
    fn missing_condition_names_the_run() {
        let conn = test_db();
        insert_run(&conn, 100, true, true);
        conn.execute(
            "DELETE FROM conditions WHERE run_number = 100 AND condition_type_id = 8",
            [],
        )
        .unwrap();

        let err = provider(conn).fetch_run_conditions(100, 100).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("100"), "{msg}");
        assert!(msg.contains("radiator_type"), "{msg}");
    }
}
