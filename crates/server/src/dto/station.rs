use serde::{Deserialize, Serialize};
use thor_routing::{network::Station, shared::geo::Coordinate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub code: String,
    pub codes: Vec<String>,
    pub name: String,
    pub commune: String,
    pub coordinate: Coordinate,
}

impl From<&Station> for StationDto {
    fn from(station: &Station) -> Self {
        Self {
            code: station.primary_code().to_string(),
            codes: station.codes.iter().map(|code| code.to_string()).collect(),
            name: station.name.to_string(),
            commune: station.commune.name.to_string(),
            coordinate: station.coordinate,
        }
    }
}
