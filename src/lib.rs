pub mod dataset;
pub mod engine;
pub mod network;
pub mod resolver;
pub mod router;
pub mod shared;

pub mod prelude {
    pub use crate::dataset::{Config, DataSource};
    pub use crate::engine::{Engine, EngineStats};
    pub use crate::network::{Edge, Graph, Network, ServiceClass, Station, StationIndex, WeightMode};
    pub use crate::resolver::StationResolver;
    pub use crate::router::{Route, RouteError, RouteMetadata, Segment, ShortestPath, find_shortest_path};
    pub use crate::shared::geo::{Coordinate, Distance};
}
