pub mod admin;
pub mod participant;
pub mod redemption;

pub use admin::admin_config;
pub use participant::participant_config;
pub use redemption::redemption_config;

use actix_web::web;

/// /api/v1 下的全部路由
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(participant_config)
        .configure(redemption_config)
        .configure(admin_config);
}
