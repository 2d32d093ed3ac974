//! Load zone definitions from JSON files
//!
//! Zones arrive from drawing tools and bulk imports as JSON documents;
//! every deserialized zone is re-validated before it reaches the engine.

use super::Zone;
use std::error::Error;
use std::path::Path;

/// Load all zones from a JSON file (array of zone objects)
pub fn load_zones<P: AsRef<Path>>(path: P) -> Result<Vec<Zone>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    load_zones_from_reader(file)
}

/// Load zones from any reader (e.g., string buffer, network stream)
pub fn load_zones_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Zone>, Box<dyn Error>> {
    let zones: Vec<Zone> = serde_json::from_reader(reader)?;
    for zone in &zones {
        zone.validate()?;
    }
    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::PayoutModel;

    const ZONES_JSON: &str = r#"[
        {
            "id": "gulf",
            "name": "Gulf Coast",
            "south": 24.0,
            "north": 30.0,
            "west": -88.0,
            "east": -80.0,
            "criteria": { "min_category": 3.0 },
            "payout": {
                "base_amount": 1000000.0,
                "currency": "USD",
                "model": "tiered",
                "tiers": [
                    { "name": "Cat 3", "min_intensity": 3.0, "max_intensity": 3.0, "multiplier": 0.6 },
                    { "name": "Cat 4", "min_intensity": 4.0, "max_intensity": 4.0, "multiplier": 0.8 },
                    { "name": "Cat 5", "min_intensity": 5.0, "multiplier": 1.0 }
                ]
            }
        },
        { "id": "open", "name": "Open Zone", "south": 30.0, "north": 35.0, "west": -90.0, "east": -85.0 }
    ]"#;

    #[test]
    fn test_load_zones_from_json() {
        let zones = load_zones_from_reader(ZONES_JSON.as_bytes()).unwrap();
        assert_eq!(zones.len(), 2);

        let gulf = &zones[0];
        assert_eq!(gulf.id, "gulf");
        assert_eq!(gulf.criteria.as_ref().unwrap().min_category, Some(3.0));
        let payout = gulf.payout.as_ref().unwrap();
        assert_eq!(payout.model, PayoutModel::Tiered);
        assert_eq!(payout.tiers.len(), 3);
        assert_eq!(payout.tiers[2].max_intensity, None);

        let open = &zones[1];
        assert!(open.criteria.is_none());
        assert!(open.payout.is_none());
    }

    #[test]
    fn test_invalid_geometry_rejected_on_load() {
        let bad = r#"[{ "id": "z", "name": "z", "south": 30.0, "north": 24.0, "west": -88.0, "east": -80.0 }]"#;
        assert!(load_zones_from_reader(bad.as_bytes()).is_err());
    }
}
