use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::Prize;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_pin",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-admin-pin"))),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::participant::register,
        handlers::redemption::redeem,
        handlers::admin::get_prize_weights,
        handlers::admin::update_prize_weights,
        handlers::admin::daily_report,
        handlers::admin::today_report,
    ),
    components(
        schemas(
            Prize,
            RegisterParticipantRequest,
            RegisterParticipantResponse,
            RedeemRequest,
            RedeemResponse,
            PrizeWeightInput,
            UpdatePrizeWeightsRequest,
            PrizeWeightResponse,
            PrizeWeightListResponse,
            DailyReportQuery,
            DayReport,
            ReportTotals,
            DailyReport,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "participant", description = "Participant registration API"),
        (name = "redemption", description = "Prize redemption API"),
        (name = "admin", description = "Staff weight configuration and reports"),
    ),
    info(
        title = "Prize Wheel Backend API",
        version = "1.0.0",
        description = "Prize wheel campaign REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
