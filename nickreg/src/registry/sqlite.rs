// SQLite-backed registry
//
// Two tables play the role of the two indexes:
//
//   claims(identity BLOB PRIMARY KEY, claim TEXT)      identity -> JSON claim
//   nicknames(nickname TEXT PRIMARY KEY, identity BLOB) nickname -> identity
//
// Every put runs in one BEGIN IMMEDIATE transaction on the writer connection,
// so the check-then-write sequence over both tables is serialized. Each get or
// list opens its own connection; with the WAL journal readers run in parallel
// and see the last committed state without waiting for an open write.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};

use crate::crypto::{SignatureVerifier, SphincsVerifier};
use crate::identity::validate_identity;
use crate::registry::{check_admission, Registry};
use crate::types::claim::Claim;
use crate::types::error::RegistryError;

/// How long a connection waits on a lock held by another connection
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS claims (
        identity BLOB PRIMARY KEY,
        claim TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS nicknames (
        nickname TEXT PRIMARY KEY,
        identity BLOB NOT NULL
    );
";

/// Registry persisted in a single SQLite database file
pub struct SqliteRegistry {
    path: PathBuf,
    writer: Mutex<Connection>,
    verifier: Arc<dyn SignatureVerifier>,
}

impl SqliteRegistry {
    /// Open or create the registry at `path`, verifying claims with SPHINCS+.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        Self::open_with_verifier(path, Arc::new(SphincsVerifier::new()))
    }

    /// Open or create the registry at `path`, verifying claims with `verifier`.
    ///
    /// Fails with `StorageUnavailable` if the file cannot be opened or the
    /// tables cannot be created.
    pub fn open_with_verifier(
        path: impl AsRef<Path>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        debug!("Opening nickname registry at {:?}", path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                RegistryError::StorageUnavailable(format!("failed to create directory: {}", e))
            })?;
        }

        let writer = open_connection(&path)?;
        writer
            .execute_batch(SCHEMA)
            .map_err(|e| RegistryError::StorageUnavailable(format!("failed to create tables: {}", e)))?;

        info!("Nickname registry opened at {:?}", path);
        Ok(Self {
            path,
            writer: Mutex::new(writer),
            verifier,
        })
    }

    fn read_connection(&self) -> Result<Connection, RegistryError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the writer connection.
    pub fn close(self) -> Result<(), RegistryError> {
        let Self { writer, path, .. } = self;

        writer
            .into_inner()
            .close()
            .map_err(|(_, e)| RegistryError::Storage(e.to_string()))?;

        debug!("Nickname registry at {:?} closed", path);
        Ok(())
    }
}

impl Registry for SqliteRegistry {
    fn list(&self) -> Result<Vec<Claim>, RegistryError> {
        let conn = self.read_connection()?;
        let mut stmt = conn.prepare("SELECT claim FROM claims ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut claims = Vec::new();
        for row in rows {
            claims.push(serde_json::from_str(&row?)?);
        }
        Ok(claims)
    }

    fn get(&self, identity: &[u8]) -> Result<Option<Claim>, RegistryError> {
        if !validate_identity(identity) {
            return Err(RegistryError::InvalidIdentity);
        }

        let conn = self.read_connection()?;
        load_claim(&conn, identity)
    }

    fn put(&self, claim: &Claim) -> Result<(), RegistryError> {
        claim.validate(self.verifier.as_ref())?;
        let encoded = serde_json::to_string(claim)?;

        let mut conn = self.writer.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let holder: Option<Vec<u8>> = tx
            .query_row(
                "SELECT identity FROM nicknames WHERE nickname = ?1",
                params![claim.nickname],
                |row| row.get(0),
            )
            .optional()?;
        let previous = load_claim(&tx, &claim.identity)?;

        // Dropping the transaction on any early return rolls it back.
        if let Err(err) = check_admission(claim, holder.as_deref(), previous.as_ref()) {
            debug!("Rejected claim for nickname {}: {}", claim.nickname, err);
            return Err(err);
        }

        if let Some(previous) = previous.filter(|p| p.nickname != claim.nickname) {
            tx.execute(
                "DELETE FROM nicknames WHERE nickname = ?1 AND identity = ?2",
                params![previous.nickname, claim.identity],
            )?;
        }

        tx.execute(
            "INSERT INTO nicknames (nickname, identity) VALUES (?1, ?2)
             ON CONFLICT(nickname) DO UPDATE SET identity = excluded.identity",
            params![claim.nickname, claim.identity],
        )?;
        tx.execute(
            "INSERT INTO claims (identity, claim) VALUES (?1, ?2)
             ON CONFLICT(identity) DO UPDATE SET claim = excluded.claim",
            params![claim.identity, encoded],
        )?;
        tx.commit()?;

        debug!("Stored claim for nickname {}", claim.nickname);
        Ok(())
    }
}

fn open_connection(path: &Path) -> Result<Connection, RegistryError> {
    let unavailable = |e: rusqlite::Error| {
        RegistryError::StorageUnavailable(format!("failed to open database: {}", e))
    };

    let conn = Connection::open(path).map_err(unavailable)?;
    conn.busy_timeout(BUSY_TIMEOUT).map_err(unavailable)?;
    let journal_mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(unavailable)?;
    debug!("SQLite journal mode for {:?}: {}", path, journal_mode);

    Ok(conn)
}

fn load_claim(conn: &Connection, identity: &[u8]) -> Result<Option<Claim>, RegistryError> {
    let encoded: Option<String> = conn
        .query_row(
            "SELECT claim FROM claims WHERE identity = ?1",
            params![identity],
            |row| row.get(0),
        )
        .optional()?;

    match encoded {
        Some(encoded) => Ok(Some(serde_json::from_str(&encoded)?)),
        None => Ok(None),
    }
}
