pub mod code_generator;
pub mod day_key;
pub mod phone;
pub mod random;
pub mod roulette;

pub use code_generator::*;
pub use day_key::*;
pub use phone::*;
pub use random::*;
pub use roulette::*;
