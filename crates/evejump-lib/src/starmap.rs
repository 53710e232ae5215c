use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Numeric identifier for a solar system.
pub type SystemId = i64;

/// Minimum Jaro-Winkler similarity for a name to count as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Raw jump-connection record consumed at [`Starmap`] construction.
///
/// Each record describes one undirected connection; the store registers both
/// directions with the same distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub from: SystemId,
    pub to: SystemId,
    pub light_years: f64,
}

/// Raw system-metadata record consumed at [`Starmap`] construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRecord {
    pub id: SystemId,
    pub name: String,
    /// Missing security data is carried through as `None`, never as `0.0`.
    pub security_status: Option<f64>,
}

/// Edge within the jump graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpConnection {
    pub target: SystemId,
    pub light_years: f64,
}

/// In-memory jump-connectivity graph with per-system metadata.
///
/// Built once from record lists and immutable afterwards, so shared references
/// can be used from concurrent searches without synchronization.
#[derive(Debug, Clone, Default)]
pub struct Starmap {
    adjacency: HashMap<SystemId, Vec<JumpConnection>>,
    names: HashMap<SystemId, String>,
    security: HashMap<SystemId, f64>,
    name_to_id: HashMap<String, SystemId>,
}

impl Starmap {
    /// Build the starmap from connection and metadata records.
    ///
    /// Every connection record registers both directed edges with the same
    /// distance. Records with a non-finite or negative distance are skipped
    /// rather than aborting construction; the graph degrades to whatever the
    /// remaining records describe.
    pub fn new(connections: Vec<ConnectionRecord>, systems: Vec<SystemRecord>) -> Self {
        let mut adjacency: HashMap<SystemId, Vec<JumpConnection>> = HashMap::new();
        let mut skipped = 0usize;

        for record in connections {
            if !record.light_years.is_finite() || record.light_years < 0.0 {
                skipped += 1;
                continue;
            }
            adjacency.entry(record.from).or_default().push(JumpConnection {
                target: record.to,
                light_years: record.light_years,
            });
            adjacency.entry(record.to).or_default().push(JumpConnection {
                target: record.from,
                light_years: record.light_years,
            });
        }

        if skipped > 0 {
            warn!(skipped, "ignored jump connections with invalid distances");
        }

        let mut names = HashMap::new();
        let mut security = HashMap::new();
        let mut name_to_id = HashMap::new();
        for record in systems {
            name_to_id.insert(record.name.clone(), record.id);
            names.insert(record.id, record.name);
            if let Some(status) = record.security_status {
                security.insert(record.id, status);
            }
        }

        Self {
            adjacency,
            names,
            security,
            name_to_id,
        }
    }

    /// Return the outgoing connections for a system, or an empty slice when
    /// the system is not part of the graph.
    pub fn connections_of(&self, system: SystemId) -> &[JumpConnection] {
        self.adjacency
            .get(&system)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the system appears in the jump graph. Callers should check
    /// this before searching so unknown endpoints fail fast.
    pub fn is_known_system(&self, system: SystemId) -> bool {
        self.adjacency.contains_key(&system)
    }

    /// Security status for a system, or `None` when metadata is missing.
    /// Missing data is distinct from a status of `0.0`.
    pub fn security_status(&self, system: SystemId) -> Option<f64> {
        self.security.get(&system).copied()
    }

    /// Display name for a system. Diagnostics only; routing never depends on
    /// names being present.
    pub fn name(&self, system: SystemId) -> Option<&str> {
        self.names.get(&system).map(String::as_str)
    }

    /// Lookup a system identifier by its case-sensitive name.
    pub fn system_id_by_name(&self, name: &str) -> Option<SystemId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a user-supplied name, attaching fuzzy suggestions on failure.
    pub fn resolve_name(&self, name: &str) -> Result<SystemId> {
        self.system_id_by_name(name).ok_or_else(|| {
            let suggestions = self.fuzzy_system_matches(name, 3);
            Error::UnknownSystem {
                name: name.to_string(),
                suggestions,
            }
        })
    }

    /// Return up to `limit` system names similar to `name`, best match first.
    pub fn fuzzy_system_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .name_to_id
            .keys()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Number of systems in the jump graph.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the jump graph is empty.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
