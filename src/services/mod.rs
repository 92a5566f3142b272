pub mod draw_ledger;
pub mod participant_service;
pub mod redemption_service;
pub mod report_service;
pub mod weight_service;

pub use draw_ledger::*;
pub use participant_service::*;
pub use redemption_service::*;
pub use report_service::*;
pub use weight_service::*;
