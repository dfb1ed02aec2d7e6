//! Static zone registry.

use anyhow::{Result, bail};
use std::collections::HashMap;

use crate::model::{Zone, ZoneId};

/// Known parking zones keyed by id. Built once at startup, never mutated.
///
/// A zone file is a plain JSON array:
/// ```json
/// [
///   { "id": 1, "name": "Downtown Pike St", "lat": 47.6105, "lng": -122.3380, "total_spaces": 120 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: HashMap<ZoneId, Zone>,
}

impl ZoneRegistry {
    /// Fails on duplicate ids.
    pub fn from_zones(zones: Vec<Zone>) -> Result<Self> {
        let mut map = HashMap::with_capacity(zones.len());
        for zone in zones {
            let id = zone.id;
            if map.insert(id, zone).is_some() {
                bail!("duplicate zone id {}", id);
            }
        }
        Ok(Self { zones: map })
    }

    /// Loads the registry from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let zones: Vec<Zone> = serde_json::from_str(&content)?;
        Self::from_zones(zones)
    }

    /// The ten Seattle zones the backend is trained on.
    pub fn builtin() -> Self {
        let zone = |id, name: &str, lat, lng| Zone {
            id,
            name: name.to_string(),
            lat,
            lng,
            total_spaces: 0,
        };
        let zones = [
            zone(1, "Downtown Pike St", 47.6105, -122.3380),
            zone(2, "Downtown 1st Ave", 47.6050, -122.3350),
            zone(3, "Downtown 3rd Ave", 47.6080, -122.3310),
            zone(4, "Capitol Hill - Broadway", 47.6240, -122.3210),
            zone(5, "University District - University Way", 47.6650, -122.3130),
            zone(6, "Stadium District - Occidental", 47.5920, -122.3330),
            zone(7, "Stadium District - 1st Ave S", 47.5970, -122.3280),
            zone(8, "Capitol Hill - Pike St", 47.6180, -122.3150),
            zone(9, "University District - 45th St", 47.6590, -122.3080),
            zone(10, "Fremont - Fremont Ave", 47.6505, -122.3493),
        ];
        Self {
            zones: zones.into_iter().map(|z| (z.id, z)).collect(),
        }
    }

    pub fn lookup(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Zones in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        let mut zones: Vec<&Zone> = self.zones.values().collect();
        zones.sort_by_key(|z| z.id);
        zones.into_iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
