//! Dataset adapters for the jump planner.
//!
//! The planner itself only consumes in-memory record lists; this module
//! provides the on-disk shapes those lists are loaded from: a precomputed
//! jump-connectivity JSON document and the static-data SQLite export carrying
//! system metadata and dogma attributes.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::range::{AttributeId, AttributeProvider, TypeId};
use crate::starmap::{ConnectionRecord, Starmap, SystemId, SystemRecord};

/// Default filename for the jump-connectivity document.
pub const JUMPMAP_FILENAME: &str = "jumpmap.json";

/// Default filename for the static-data database.
pub const UNIVERSE_DB_FILENAME: &str = "universe.db";

/// Permissive on-disk form of a connection record. Fields are optional so a
/// malformed entry drops that entry instead of failing the whole document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnection {
    from: Option<SystemId>,
    to: Option<SystemId>,
    light_years: Option<f64>,
}

/// Resolve the default dataset directory using platform project directories.
pub fn default_dataset_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "evejump", "evejump").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Load jump-connection records from a JSON document.
///
/// The document is an array of `{"from", "to", "lightYears"}` objects.
/// Entries missing a field are skipped, degrading the graph rather than
/// aborting the load.
pub fn load_connections(path: &Path) -> Result<Vec<ConnectionRecord>> {
    let file = File::open(path).map_err(|_| Error::DatasetNotFound {
        path: path.to_path_buf(),
    })?;
    let raw: Vec<RawConnection> = serde_json::from_reader(BufReader::new(file))?;

    let total = raw.len();
    let records: Vec<ConnectionRecord> = raw
        .into_iter()
        .filter_map(|entry| match (entry.from, entry.to, entry.light_years) {
            (Some(from), Some(to), Some(light_years)) => Some(ConnectionRecord {
                from,
                to,
                light_years,
            }),
            _ => None,
        })
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "ignored incomplete jump connection records");
    }
    debug!(connections = records.len(), path = %path.display(), "loaded jump connectivity");

    Ok(records)
}

/// Load system metadata records from the static-data database.
///
/// Reads the `mapSolarSystems` table; a NULL `security` column carries
/// through as missing security data, never as `0.0`.
pub fn load_system_records(db_path: &Path) -> Result<Vec<SystemRecord>> {
    if !db_path.exists() {
        return Err(Error::DatasetNotFound {
            path: db_path.to_path_buf(),
        });
    }

    let connection = Connection::open(db_path)?;
    let mut stmt = connection
        .prepare("SELECT solarSystemID, solarSystemName, security FROM mapSolarSystems")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, Option<SystemId>>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<f64>>(2)?,
        ))
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let (id, name, security_status) = row?;
        let (Some(id), Some(name)) = (id, name) else {
            skipped += 1;
            continue;
        };
        records.push(SystemRecord {
            id,
            name,
            security_status,
        });
    }

    if skipped > 0 {
        warn!(skipped, "ignored solar system rows missing id or name");
    }
    debug!(systems = records.len(), path = %db_path.display(), "loaded system metadata");

    Ok(records)
}

/// Load both dataset files from `dir` and build a [`Starmap`].
pub fn load_starmap(dir: &Path) -> Result<Starmap> {
    let connections = load_connections(&dir.join(JUMPMAP_FILENAME))?;
    let systems = load_system_records(&dir.join(UNIVERSE_DB_FILENAME))?;
    Ok(Starmap::new(connections, systems))
}

/// Dogma attribute table loaded eagerly from the static-data database.
///
/// Eager loading keeps searches free of I/O; lookups after construction are
/// plain map reads.
#[derive(Debug, Clone, Default)]
pub struct DogmaAttributes {
    values: HashMap<(TypeId, AttributeId), f64>,
}

impl DogmaAttributes {
    /// Read the `dgmTypeAttributes` table. Float values take precedence over
    /// integer values; rows carrying neither are skipped.
    pub fn from_path(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            return Err(Error::DatasetNotFound {
                path: db_path.to_path_buf(),
            });
        }

        let connection = Connection::open(db_path)?;
        let mut stmt = connection
            .prepare("SELECT typeID, attributeID, valueFloat, valueInt FROM dgmTypeAttributes")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, TypeId>(0)?,
                row.get::<_, AttributeId>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<i64>>(3)?,
            ))
        })?;

        let mut values = HashMap::new();
        for row in rows {
            let (type_id, attribute_id, value_float, value_int) = row?;
            let Some(value) = value_float.or(value_int.map(|v| v as f64)) else {
                continue;
            };
            values.insert((type_id, attribute_id), value);
        }

        debug!(attributes = values.len(), path = %db_path.display(), "loaded dogma attributes");
        Ok(Self { values })
    }

    /// Number of attribute values loaded.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AttributeProvider for DogmaAttributes {
    fn attribute_value(&self, type_id: TypeId, attribute_id: AttributeId) -> Option<f64> {
        self.values.get(&(type_id, attribute_id)).copied()
    }
}
