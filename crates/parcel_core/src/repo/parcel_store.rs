//! Parcel store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete APIs over the `parcel` table.
//! - Gate address changes and deletion on the `registered` status.
//!
//! # Invariants
//! - The registered-state guard is part of the mutating statement's `WHERE`
//!   clause. There is no read-then-write window.
//! - Mutations that match no row succeed with `MutationOutcome::Skipped`.
//!   A missing parcel and a guard-blocked parcel look the same; callers that
//!   need to tell them apart must issue a separate `get`.
//! - `get` on a missing number is `RepoError::NotFound`, never a default row.

use crate::db::migrations::apply_migrations;
use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber};
use crate::model::status::PARCEL_STATUS_REGISTERED;
use log::debug;
use rusqlite::{named_params, Connection, OptionalExtension, Row};
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

/// Error for parcel persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ParcelNumber),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of a conditional mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The statement matched the row and changed it.
    Applied,
    /// No row matched: the number is unknown or the status guard refused.
    Skipped,
}

impl MutationOutcome {
    fn from_changed(changed: usize) -> Self {
        if changed == 0 {
            Self::Skipped
        } else {
            Self::Applied
        }
    }

    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Skipped => "skipped",
        }
    }
}

/// Data access contract for parcel records.
pub trait ParcelStore {
    /// Inserts a parcel and returns the storage-assigned number.
    /// `parcel.number` is ignored.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Loads one parcel by number.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Loads every parcel owned by `client`, ordered by number.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    /// Overwrites status unconditionally.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<MutationOutcome>;
    /// Overwrites address only while the parcel is registered.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<MutationOutcome>;
    /// Removes the parcel only while it is registered.
    fn delete(&self, number: ParcelNumber) -> RepoResult<MutationOutcome>;
}

/// SQLite-backed parcel store.
pub struct SqliteParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelStore<'conn> {
    /// Binds a store to an open connection, creating the schema if needed.
    ///
    /// Safe to call any number of times against the same database: existing
    /// rows are left untouched.
    ///
    /// # Errors
    /// - `RepoError::Db` when schema creation fails or the database was
    ///   written by a newer schema version.
    /// - `RepoError::MissingRequiredTable` / `MissingRequiredColumn` when an
    ///   existing `parcel` table has an incompatible shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        apply_migrations(conn)?;
        ensure_parcel_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParcelStore for SqliteParcelStore<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (:client, :status, :address, :created_at);",
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status.as_str(),
                ":address": parcel.address.as_str(),
                ":created_at": parcel.created_at.as_str(),
            },
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.conn
            .query_row(
                &format!("{PARCEL_SELECT_SQL} WHERE number = :number;"),
                named_params! { ":number": number },
                parse_parcel_row,
            )
            .optional()?
            .ok_or(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PARCEL_SELECT_SQL}
             WHERE client = :client
             ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query(named_params! { ":client": client })?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<MutationOutcome> {
        let changed = self.conn.execute(
            "UPDATE parcel SET status = :status WHERE number = :number;",
            named_params! { ":status": status, ":number": number },
        )?;

        let outcome = MutationOutcome::from_changed(changed);
        debug!(
            "event=parcel_set_status module=repo status={} number={number}",
            outcome.as_str()
        );
        Ok(outcome)
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<MutationOutcome> {
        let changed = self.conn.execute(
            "UPDATE parcel
             SET address = :address
             WHERE number = :number
               AND status = :registered;",
            named_params! {
                ":address": address,
                ":number": number,
                ":registered": PARCEL_STATUS_REGISTERED,
            },
        )?;

        let outcome = MutationOutcome::from_changed(changed);
        debug!(
            "event=parcel_set_address module=repo status={} number={number}",
            outcome.as_str()
        );
        Ok(outcome)
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<MutationOutcome> {
        let changed = self.conn.execute(
            "DELETE FROM parcel
             WHERE number = :number
               AND status = :registered;",
            named_params! {
                ":number": number,
                ":registered": PARCEL_STATUS_REGISTERED,
            },
        )?;

        let outcome = MutationOutcome::from_changed(changed);
        debug!(
            "event=parcel_delete module=repo status={} number={number}",
            outcome.as_str()
        );
        Ok(outcome)
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

fn ensure_parcel_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, PARCEL_TABLE)? {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    let existing = table_columns(conn, PARCEL_TABLE)?;
    for column in PARCEL_COLUMNS {
        if !existing.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
