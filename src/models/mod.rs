pub mod common;
pub mod participant;
pub mod prize_weight;
pub mod redemption;
pub mod report;

pub use common::*;
pub use participant::*;
pub use prize_weight::*;
pub use redemption::*;
pub use report::*;
