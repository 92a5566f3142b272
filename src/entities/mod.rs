pub mod draws;
pub mod participants;
pub mod prize;
pub mod prize_weights;

pub use draws as draw_entity;
pub use participants as participant_entity;
pub use prize::Prize;
pub use prize_weights as prize_weight_entity;
