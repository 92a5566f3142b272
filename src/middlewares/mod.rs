pub mod admin_pin;
pub mod cors;

pub use admin_pin::*;
pub use cors::*;
