use crate::config::CampaignConfig;
use crate::models::*;
use crate::services::RedemptionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/redeem",
    tag = "redemption",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "兑换成功（首次分配或返回已有结果）", body = RedeemResponse),
        (status = 400, description = "缺少兑换码", body = ApiError),
        (status = 404, description = "兑换码无效", body = ApiError),
        (status = 503, description = "存储暂不可用，可重试", body = ApiError)
    )
)]
/// 兑换奖品：同一兑换码可重复提交，始终返回同一个奖品，
/// 只有第一次成功分配时 first_time 为 true
pub async fn redeem(
    service: web::Data<RedemptionService>,
    campaign: web::Data<CampaignConfig>,
    request: web::Json<RedeemRequest>,
) -> Result<HttpResponse> {
    match service.redeem(&campaign.id, &request.code).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn redemption_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/redeem", web::post().to(redeem));
}
