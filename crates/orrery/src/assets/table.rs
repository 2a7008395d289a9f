use serde::{Deserialize, Serialize};

use crate::api::config::OrreryConfig;
use crate::error::Result;
use crate::orbit::body::Body;
use crate::orbit::elements::{ElementRate, OrbitalElements, Perturbations};

/// Built-in element table for Mercury through Pluto.
const PLANETS_JSON: &str = include_str!("../../data/planets.json");

/// Solar GM (1.32712440018e20 m³/s²) in AU³/s².
pub const GM_SUN_AU3_S2: f64 = 3.964016e-14;

/// Element table supplied once at construction.
/// Loaded from JSON; every element is a `[base, rate_per_century]` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementTable {
    /// Free-form provenance note.
    #[serde(default)]
    pub source: Option<String>,
    pub bodies: Vec<BodyDescriptor>,
}

/// One body's row in the table. Angles in degrees, `a` in AU.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    pub a: ElementRate,
    pub e: ElementRate,
    #[serde(rename = "I")]
    pub i: ElementRate,
    #[serde(rename = "L")]
    pub l: ElementRate,
    pub w: ElementRate,
    pub omega: ElementRate,
    /// Gravitational parameter GM (AU³/s²). Defaults to the Sun's.
    #[serde(default = "default_u")]
    pub u: f64,
    #[serde(default)]
    pub perturbations: Option<Perturbations>,
}

fn default_u() -> f64 {
    GM_SUN_AU3_S2
}

impl BodyDescriptor {
    /// Validate this row into a body.
    pub fn to_body(&self, config: &OrreryConfig) -> Result<Body> {
        let elements = OrbitalElements::new(
            &self.name,
            self.a,
            self.e,
            self.i,
            self.l,
            self.w,
            self.omega,
            self.perturbations,
        )?;
        Body::new(self.name.clone(), elements, self.u, config)
    }
}

impl ElementTable {
    /// Parse a table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The embedded planetary table.
    pub fn builtin() -> Result<Self> {
        Self::from_json(PLANETS_JSON)
    }

    /// Validate every row. Fails on the first invalid body.
    pub fn to_bodies(&self, config: &OrreryConfig) -> Result<Vec<Body>> {
        self.bodies.iter().map(|d| d.to_body(config)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElementError;

    #[test]
    fn builtin_table_has_nine_valid_bodies() {
        let table = ElementTable::builtin().unwrap();
        assert_eq!(table.bodies.len(), 9);
        let bodies = table.to_bodies(&OrreryConfig::default()).unwrap();
        assert_eq!(bodies[2].name(), "earth");
        assert_eq!(bodies[8].name(), "pluto");
    }

    #[test]
    fn outer_planets_carry_perturbations() {
        let table = ElementTable::builtin().unwrap();
        let jupiter = table.bodies.iter().find(|b| b.name == "jupiter").unwrap();
        let p = jupiter.perturbations.unwrap();
        assert!((p.f - 38.35125).abs() < 1e-9);
        let pluto = table.bodies.iter().find(|b| b.name == "pluto").unwrap();
        let p = pluto.perturbations.unwrap();
        assert_eq!((p.c, p.s, p.f), (0.0, 0.0, 0.0));
        assert!(table.bodies[0].perturbations.is_none());
    }

    #[test]
    fn parse_minimal_table() {
        let json = r#"{
            "bodies": [
                { "name": "vesta", "a": [2.36, 0], "e": [0.089, 0], "I": [7.1, 0],
                  "L": [20.0, 9904.0], "w": [251.0, 0], "omega": [103.8, 0] }
            ]
        }"#;
        let table = ElementTable::from_json(json).unwrap();
        assert_eq!(table.bodies[0].u, GM_SUN_AU3_S2);
        assert_eq!(table.bodies[0].l, ElementRate::new(20.0, 9904.0));
        assert!(table.source.is_none());
    }

    #[test]
    fn invalid_row_is_rejected_with_its_name() {
        let json = r#"{
            "bodies": [
                { "name": "oumuamua", "a": [1.27, 0], "e": [1.2, 0], "I": [122.7, 0],
                  "L": [0, 0], "w": [0, 0], "omega": [24.6, 0] }
            ]
        }"#;
        let table = ElementTable::from_json(json).unwrap();
        let err = table.to_bodies(&OrreryConfig::default()).unwrap_err();
        assert!(matches!(err, ElementError::Eccentricity { ref name, .. } if name == "oumuamua"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ElementTable::from_json("{ \"bodies\": [ { \"name\": 3 } ] }").unwrap_err();
        assert!(matches!(err, ElementError::Json(_)));
    }
}
