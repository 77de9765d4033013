mod health;
mod station;

pub use health::*;
pub use station::*;
