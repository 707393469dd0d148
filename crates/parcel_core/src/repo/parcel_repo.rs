//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the six parcel store operations over the `parcel` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation is exactly one parameterized statement.
//! - Address updates and deletes are guarded by `status = 'registered'` inside
//!   the statement itself, never by a separate read.
//! - Only `get` reports a missing row; mutations matching zero rows succeed.

use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, STATUS_REGISTERED};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_TABLE: &str = "parcel";
const PARCEL_COLUMNS: [&str; 5] = ["number", "client", "status", "address", "created_at"];

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from parcel store operations.
#[derive(Debug)]
pub enum RepoError {
    /// `get` matched no row.
    NotFound(ParcelNumber),
    /// Underlying SQLite failure (connection, constraint or row decoding).
    Persistence {
        operation: &'static str,
        source: DbError,
    },
    /// Injected connection has no `parcel` table.
    MissingRequiredTable(&'static str),
    /// `parcel` table lacks a column the store reads or writes.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::Persistence { operation, source } => {
                write!(f, "parcel store `{operation}` failed: {source}")
            }
            Self::MissingRequiredTable(table) => {
                write!(f, "parcel store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "parcel store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            Self::NotFound(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl RepoError {
    /// Returns the store operation name for persistence failures.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Persistence { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

/// Repository interface for parcel storage.
pub trait ParcelRepository {
    /// Inserts `parcel` (ignoring its `number`) and returns the assigned number.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Loads one parcel; `RepoError::NotFound` when absent.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Lists a client's parcels in insertion order.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Overwrites status without validating the transition.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Changes the address of a `registered` parcel; no-op otherwise.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Removes a `registered` parcel; no-op otherwise.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel store over a borrowed connection.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Wraps a connection whose `parcel` table already exists.
    ///
    /// The table may come from `db::open_db` or from any external setup;
    /// only its shape is checked.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_parcel_table_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn
            .execute(
                "INSERT INTO parcel (client, status, address, created_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    parcel.client,
                    parcel.status.as_str(),
                    parcel.address.as_str(),
                    parcel.created_at.as_str(),
                ],
            )
            .map_err(persistence("add"))?;

        let number = self.conn.last_insert_rowid();
        debug!(
            "event=parcel_add module=repo status=ok number={number} client={}",
            parcel.client
        );
        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.conn
            .query_row(
                &format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"),
                [number],
                parse_parcel_row,
            )
            .optional()
            .map_err(persistence("get"))?
            .ok_or(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{PARCEL_SELECT_SQL} WHERE client = ?1 ORDER BY number ASC;"
            ))
            .map_err(persistence("get_by_client"))?;

        let parcels = stmt
            .query_map([client], parse_parcel_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(persistence("get_by_client"))?;

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE parcel SET status = ?1 WHERE number = ?2;",
                params![status, number],
            )
            .map_err(persistence("set_status"))?;

        log_mutation("parcel_set_status", number, changed);
        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE parcel SET address = ?1 WHERE number = ?2 AND status = ?3;",
                params![address, number, STATUS_REGISTERED],
            )
            .map_err(persistence("set_address"))?;

        log_mutation("parcel_set_address", number, changed);
        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM parcel WHERE number = ?1 AND status = ?2;",
                params![number, STATUS_REGISTERED],
            )
            .map_err(persistence("delete"))?;

        log_mutation("parcel_delete", number, changed);
        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: row.get("status")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn persistence(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> RepoError {
    move |err| {
        error!("event=parcel_{operation} module=repo status=error error={err}");
        RepoError::Persistence {
            operation,
            source: DbError::Sqlite(err),
        }
    }
}

fn log_mutation(event: &str, number: ParcelNumber, changed: usize) {
    if changed == 0 {
        debug!("event={event} module=repo status=noop number={number}");
    } else {
        debug!("event={event} module=repo status=ok number={number}");
    }
}

fn ensure_parcel_table_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, PARCEL_TABLE)? {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    for column in PARCEL_COLUMNS {
        if !table_has_column(conn, PARCEL_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .map_err(persistence("open"))?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .map_err(persistence("open"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(persistence("open"))?;
    Ok(names.iter().any(|name| name == column))
}
