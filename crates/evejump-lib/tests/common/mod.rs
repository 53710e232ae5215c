// Shared fixtures for `evejump-lib` integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use evejump_lib::{
    AttributeId, ConnectionRecord, Starmap, SystemId, SystemRecord, TypeId,
    JUMP_DRIVE_RANGE_ATTRIBUTE_ID,
};

/// Ship hull used across tests; the id is arbitrary.
pub const TEST_SHIP: TypeId = 671;

pub fn connection(from: SystemId, to: SystemId, light_years: f64) -> ConnectionRecord {
    ConnectionRecord {
        from,
        to,
        light_years,
    }
}

pub fn system(id: SystemId, name: &str, security_status: Option<f64>) -> SystemRecord {
    SystemRecord {
        id,
        name: name.to_string(),
        security_status,
    }
}

/// Build a starmap from `(from, to, light_years)` edges and
/// `(id, name, security)` systems.
pub fn starmap(
    connections: &[(SystemId, SystemId, f64)],
    systems: &[(SystemId, &str, Option<f64>)],
) -> Starmap {
    Starmap::new(
        connections
            .iter()
            .map(|&(from, to, light_years)| connection(from, to, light_years))
            .collect(),
        systems
            .iter()
            .map(|&(id, name, security_status)| system(id, name, security_status))
            .collect(),
    )
}

/// Attribute table mapping each hull to a base jump range.
pub fn jump_range_attributes(entries: &[(TypeId, f64)]) -> HashMap<(TypeId, AttributeId), f64> {
    entries
        .iter()
        .map(|&(type_id, range)| ((type_id, JUMP_DRIVE_RANGE_ATTRIBUTE_ID), range))
        .collect()
}

/// Systems 1..=n chained in a line with unit-length, low-security edges.
pub fn chain_starmap(n: SystemId) -> Starmap {
    let connections: Vec<(SystemId, SystemId, f64)> =
        (1..n).map(|id| (id, id + 1, 1.0)).collect();
    let systems: Vec<(SystemId, String, Option<f64>)> = (1..=n)
        .map(|id| (id, format!("System-{id}"), Some(-0.2)))
        .collect();

    Starmap::new(
        connections
            .iter()
            .map(|&(from, to, light_years)| connection(from, to, light_years))
            .collect(),
        systems
            .into_iter()
            .map(|(id, name, security_status)| SystemRecord {
                id,
                name,
                security_status,
            })
            .collect(),
    )
}
