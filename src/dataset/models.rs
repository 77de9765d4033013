use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// Station codes and commune ids show up both as JSON numbers and strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawCode {
    Text(String),
    Number(serde_json::Number),
}

impl Display for RawCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawCode::Text(text) => f.write_str(text.trim()),
            RawCode::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawStation {
    #[serde(alias = "uic")]
    pub codes: Vec<RawCode>,
    #[serde(alias = "nom_gare")]
    pub display_name: String,
    #[serde(alias = "ville")]
    pub commune: RawCommune,
    #[serde(alias = "position_geographique")]
    pub position: RawPosition,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawCommune {
    #[serde(alias = "id_commune")]
    pub id: RawCode,
    #[serde(alias = "nom_commune")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct RawPosition {
    pub lat: f64,
    pub lon: f64,
}

/// One direction of a physical connection in the legacy dataset.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LegacyLink {
    pub depart: RawCode,
    pub arrivee: RawCode,
}

/// A directed connection with travel-time statistics.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EnhancedLink {
    pub depart: RawCode,
    pub arrivee: RawCode,
    #[serde(default)]
    pub depart_nom: Option<String>,
    #[serde(default)]
    pub arrivee_nom: Option<String>,
    #[serde(default)]
    pub temps_moyen_min: Option<f64>,
    #[serde(default)]
    pub temps_min_min: Option<f64>,
    #[serde(default)]
    pub temps_max_min: Option<f64>,
    #[serde(default)]
    pub nb_trains: Option<u32>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub type_train: Option<String>,
    #[serde(default)]
    pub types_details: BTreeMap<String, u32>,
}

/// Header of the enhanced dataset. Only used for diagnostics.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DatasetMetadata {
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub total_liaisons: Option<usize>,
    #[serde(default)]
    pub unique_gares: Option<usize>,
}
