use std::{collections::BTreeMap, fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::shared::{
    Identifiable, fuzzy,
    geo::{Coordinate, Distance},
};

/// The smallest administrative unit a station belongs to.
#[derive(Debug, Default, Clone)]
pub struct Commune {
    /// Official commune code (INSEE).
    pub id: Arc<str>,
    pub name: Arc<str>,
    /// Lowercased, trimmed name used by the resolver.
    pub normalized_name: Arc<str>,
}

impl Commune {
    pub fn new(id: impl Into<Arc<str>>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            normalized_name: fuzzy::normalize(name).into(),
        }
    }
}

/// A physical station.
///
/// A station can be registered under several external codes coming from
/// different source systems, every one of them resolves to the same station.
#[derive(Debug, Default, Clone)]
pub struct Station {
    /// Internal key, the position of the station in the [`StationIndex`].
    pub index: u32,
    /// Every external code (alias) of the station, never empty.
    pub codes: Box<[Arc<str>]>,
    /// Display name (e.g. "Lyon Part-Dieu").
    pub name: Arc<str>,
    /// Lowercased, trimmed name used by the resolver and the fuzzy search.
    pub normalized_name: Arc<str>,
    pub commune: Commune,
    pub coordinate: Coordinate,
}

impl Station {
    pub fn new<I, S>(codes: I, name: &str, commune: Commune, coordinate: Coordinate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            index: 0,
            codes: codes.into_iter().map(Into::into).collect(),
            name: name.into(),
            normalized_name: fuzzy::normalize(name).into(),
            commune,
            coordinate,
        }
    }

    /// The first registered code, used as the station's canonical id.
    pub fn primary_code(&self) -> &str {
        self.codes.first().map(|code| code.as_ref()).unwrap_or_default()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.as_ref() == code)
    }
}

impl Identifiable for Station {
    fn id(&self) -> &str {
        self.primary_code()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// Category of train service, used to bias route selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceClass {
    /// TGV / InOui.
    HighSpeed,
    /// OUIGO.
    BudgetHighSpeed,
    /// Lyria, Eurostar.
    InternationalHighSpeed,
    /// Intercités.
    Intercity,
    /// Train de nuit.
    Overnight,
    /// TER.
    Regional,
    /// Navette.
    Shuttle,
    /// Auto-train.
    CarCarrying,
    Unclassified,
}

impl ServiceClass {
    /// Multiplier applied to the raw travel time when searching.
    /// The lower the penalty the more the service is favored.
    pub const fn penalty(&self) -> f64 {
        match self {
            ServiceClass::HighSpeed
            | ServiceClass::BudgetHighSpeed
            | ServiceClass::InternationalHighSpeed => 1.0,
            ServiceClass::Intercity => 1.3,
            ServiceClass::Overnight => 1.5,
            ServiceClass::Regional | ServiceClass::Shuttle | ServiceClass::Unclassified => 2.0,
            ServiceClass::CarCarrying => 2.5,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::HighSpeed => "high-speed",
            ServiceClass::BudgetHighSpeed => "budget-high-speed",
            ServiceClass::InternationalHighSpeed => "international-high-speed",
            ServiceClass::Intercity => "intercity",
            ServiceClass::Overnight => "overnight",
            ServiceClass::Regional => "regional",
            ServiceClass::Shuttle => "shuttle",
            ServiceClass::CarCarrying => "car-carrying",
            ServiceClass::Unclassified => "unclassified",
        }
    }

    /// Parses both the dataset labels ("TGV", "TER", "Train de nuit", ...)
    /// and the canonical names. Anything unknown is unclassified.
    pub fn from_label(label: &str) -> Self {
        match fuzzy::normalize(label).as_str() {
            "tgv" | "tgv inoui" | "inoui" | "high-speed" => ServiceClass::HighSpeed,
            "ouigo" | "budget-high-speed" => ServiceClass::BudgetHighSpeed,
            "lyria" | "eurostar" | "thalys" | "international-high-speed" => {
                ServiceClass::InternationalHighSpeed
            }
            "intercités" | "intercites" | "intercity" => ServiceClass::Intercity,
            "train de nuit" | "overnight" => ServiceClass::Overnight,
            "ter" | "regional" => ServiceClass::Regional,
            "navette" | "shuttle" => ServiceClass::Shuttle,
            "auto-train" | "car-carrying" => ServiceClass::CarCarrying,
            _ => ServiceClass::Unclassified,
        }
    }
}

impl Display for ServiceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ServiceClass {
    fn from(value: &str) -> Self {
        Self::from_label(value)
    }
}

/// A directed connection between two station codes.
///
/// Legacy connections only carry their endpoints, every statistic is
/// `None` for them.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: Arc<str>,
    pub to: Arc<str>,
    /// Mean observed travel time in minutes.
    pub mean_minutes: Option<f64>,
    pub min_minutes: Option<f64>,
    pub max_minutes: Option<f64>,
    /// Number of trains observed per day.
    pub daily_trains: Option<u32>,
    /// Stored distance; the great-circle distance is used when absent.
    pub distance: Option<Distance>,
    /// Dominant service class.
    pub service_class: Option<ServiceClass>,
    /// Raw service label -> number of trains.
    pub breakdown: BTreeMap<Arc<str>, u32>,
}

impl Edge {
    pub fn new(from: impl Into<Arc<str>>, to: impl Into<Arc<str>>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mean_minutes: None,
            min_minutes: None,
            max_minutes: None,
            daily_trains: None,
            distance: None,
            service_class: None,
            breakdown: BTreeMap::new(),
        }
    }

    /// Sets the mean travel time. Non positive values mean "no statistic".
    pub fn with_mean_minutes(mut self, minutes: f64) -> Self {
        self.mean_minutes = (minutes > 0.0).then_some(minutes);
        self
    }

    pub fn with_min_max_minutes(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_minutes = min;
        self.max_minutes = max;
        self
    }

    pub fn with_daily_trains(mut self, trains: u32) -> Self {
        self.daily_trains = Some(trains);
        self
    }

    /// Sets the stored distance. Non positive values mean "unknown".
    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = (distance.as_kilometers() > 0.0).then_some(distance);
        self
    }

    pub fn with_service_class(mut self, class: ServiceClass) -> Self {
        self.service_class = Some(class);
        self
    }

    pub fn with_breakdown<I, S>(mut self, breakdown: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<Arc<str>>,
    {
        self.breakdown = breakdown
            .into_iter()
            .map(|(label, count)| (label.into(), count))
            .collect();
        self
    }

    /// Penalty of the dominant class, unclassified when unknown.
    pub fn penalty(&self) -> f64 {
        self.service_class
            .unwrap_or(ServiceClass::Unclassified)
            .penalty()
    }
}

#[test]
fn penalty_table() {
    assert_eq!(ServiceClass::from_label("TGV").penalty(), 1.0);
    assert_eq!(ServiceClass::from_label("OUIGO").penalty(), 1.0);
    assert_eq!(ServiceClass::from_label("Lyria").penalty(), 1.0);
    assert_eq!(ServiceClass::from_label("Eurostar").penalty(), 1.0);
    assert_eq!(ServiceClass::from_label("Intercités").penalty(), 1.3);
    assert_eq!(ServiceClass::from_label("Train de nuit").penalty(), 1.5);
    assert_eq!(ServiceClass::from_label("TER").penalty(), 2.0);
    assert_eq!(ServiceClass::from_label("Navette").penalty(), 2.0);
    assert_eq!(ServiceClass::from_label("Autre").penalty(), 2.0);
    assert_eq!(ServiceClass::from_label("Auto-train").penalty(), 2.5);
}

#[test]
fn canonical_names_round_trip() {
    assert_eq!(ServiceClass::from_label("high-speed"), ServiceClass::HighSpeed);
    assert_eq!(ServiceClass::from_label(" Regional "), ServiceClass::Regional);
    assert_eq!(ServiceClass::from_label("Car"), ServiceClass::Unclassified);
    assert_eq!(ServiceClass::HighSpeed.to_string(), "high-speed");
}

#[test]
fn non_positive_statistics_are_absent() {
    let edge = Edge::new("1", "2")
        .with_mean_minutes(0.0)
        .with_distance(Distance::from_kilometers(0.0));
    assert_eq!(edge.mean_minutes, None);
    assert_eq!(edge.distance, None);
    assert_eq!(edge.penalty(), 2.0);
}
