mod health;
mod routing;
mod search;

pub use health::*;
pub use routing::*;
pub use search::*;
