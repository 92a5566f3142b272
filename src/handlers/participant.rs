use crate::config::CampaignConfig;
use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/participants",
    tag = "participant",
    request_body = RegisterParticipantRequest,
    responses(
        (status = 200, description = "登记成功，返回兑换码", body = RegisterParticipantResponse),
        (status = 400, description = "登记信息不完整", body = ApiError)
    )
)]
/// 登记参与者并分配兑换码
pub async fn register(
    service: web::Data<ParticipantService>,
    campaign: web::Data<CampaignConfig>,
    request: web::Json<RegisterParticipantRequest>,
) -> Result<HttpResponse> {
    match service.register(&campaign.id, request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn participant_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/participants", web::post().to(register));
}
