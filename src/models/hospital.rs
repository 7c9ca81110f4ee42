//! Hospital directory entries

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Coordinate;
use crate::distance::DistanceError;

/// A hospital as supplied by the static directory content
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hospital {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// Designated trauma center
    #[serde(default)]
    pub trauma: bool,
    /// `[lat, lon]` as written in the content. Anything that is not an array
    /// of numbers reads as `None`.
    #[serde(default, deserialize_with = "lenient_pair")]
    pub coordinates: Option<Vec<f64>>,
}

impl Hospital {
    #[must_use]
    pub fn new(name: &str, address: &str, phone: &str, trauma: bool, coordinates: [f64; 2]) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            trauma,
            coordinates: Some(coordinates.to_vec()),
        }
    }

    /// Resolve the stored pair into a validated coordinate
    pub fn coordinate(&self) -> Result<Coordinate, DistanceError> {
        let pair = self
            .coordinates
            .as_deref()
            .ok_or_else(|| DistanceError::UnresolvableDestination {
                name: self.name.clone(),
            })?;

        Coordinate::from_pair(pair).map_err(|_| DistanceError::UnresolvableDestination {
            name: self.name.clone(),
        })
    }
}

fn lenient_pair<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().map(Value::as_f64).collect(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_directory_entry() {
        let json = r#"{
            "name": "Englewood Hospital",
            "address": "350 Engle St, Englewood, NJ 07631",
            "phone": "(201) 894-3000",
            "trauma": false,
            "coordinates": [40.9012, -73.9654]
        }"#;
        let hospital: Hospital = serde_json::from_str(json).unwrap();
        assert_eq!(hospital.name, "Englewood Hospital");
        let coordinate = hospital.coordinate().unwrap();
        assert_eq!(coordinate.latitude(), 40.9012);
        assert_eq!(coordinate.longitude(), -73.9654);
    }

    #[test]
    fn test_missing_coordinates_is_unresolvable() {
        let hospital: Hospital = serde_json::from_str(r#"{"name": "Nowhere"}"#).unwrap();
        assert!(matches!(
            hospital.coordinate(),
            Err(DistanceError::UnresolvableDestination { name }) if name == "Nowhere"
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_is_unresolvable() {
        let mut hospital = Hospital::new("Bad", "", "", false, [0.0, 0.0]);
        hospital.coordinates = Some(vec![123.0, 0.0]);
        assert!(matches!(
            hospital.coordinate(),
            Err(DistanceError::UnresolvableDestination { .. })
        ));
    }

    #[test]
    fn test_malformed_coordinates_do_not_fail_the_batch() {
        let json = r#"[
            {"name": "Good", "coordinates": [40.9, -74.0]},
            {"name": "Mixed", "coordinates": [40.9, "x"]},
            {"name": "Text", "coordinates": "n/a"},
            {"name": "Null", "coordinates": null}
        ]"#;
        let hospitals: Vec<Hospital> = serde_json::from_str(json).unwrap();
        assert_eq!(hospitals.len(), 4);
        assert!(hospitals[0].coordinate().is_ok());
        for hospital in &hospitals[1..] {
            assert_eq!(hospital.coordinates, None);
            assert!(matches!(
                hospital.coordinate(),
                Err(DistanceError::UnresolvableDestination { .. })
            ));
        }
    }
}
