use crate::config::CampaignConfig;
use crate::middlewares::AdminPinMiddleware;
use crate::models::*;
use crate::services::{ReportService, WeightService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/prize-weights",
    tag = "admin",
    security(
        ("admin_pin" = [])
    ),
    responses(
        (status = 200, description = "全部奖品及当前权重（未配置的为默认值）", body = PrizeWeightListResponse),
        (status = 401, description = "口令错误", body = ApiError)
    )
)]
pub async fn get_prize_weights(
    service: web::Data<WeightService>,
    campaign: web::Data<CampaignConfig>,
) -> Result<HttpResponse> {
    match service.list_weights(&campaign.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": PrizeWeightListResponse { items }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/prize-weights",
    tag = "admin",
    request_body = UpdatePrizeWeightsRequest,
    security(
        ("admin_pin" = [])
    ),
    responses(
        (status = 200, description = "更新成功，返回更新后的全部权重", body = PrizeWeightListResponse),
        (status = 400, description = "奖品不在固定集合内或权重非法，未写入任何数据", body = ApiError),
        (status = 401, description = "口令错误", body = ApiError)
    )
)]
/// 更新奖品权重（可只提交部分奖品），仅影响之后的抽奖
pub async fn update_prize_weights(
    service: web::Data<WeightService>,
    campaign: web::Data<CampaignConfig>,
    request: web::Json<UpdatePrizeWeightsRequest>,
) -> Result<HttpResponse> {
    match service.set_weights(&campaign.id, &request.items).await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": PrizeWeightListResponse { items }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/reports/daily",
    tag = "admin",
    params(DailyReportQuery),
    security(
        ("admin_pin" = [])
    ),
    responses(
        (status = 200, description = "区间日报", body = DailyReport),
        (status = 400, description = "日期格式错误或区间颠倒", body = ApiError),
        (status = 401, description = "口令错误", body = ApiError)
    )
)]
/// 区间日报，from/to 缺省时使用活动配置的起止日期，再缺省为今天
pub async fn daily_report(
    service: web::Data<ReportService>,
    campaign: web::Data<CampaignConfig>,
    query: web::Query<DailyReportQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let from = query
        .from
        .or_else(|| campaign.report_from.clone())
        .unwrap_or_else(|| service.today());
    let to = query
        .to
        .or_else(|| campaign.report_to.clone())
        .unwrap_or_else(|| service.today());

    match service.daily_report(&campaign.id, &from, &to).await {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": report }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/reports/today",
    tag = "admin",
    security(
        ("admin_pin" = [])
    ),
    responses(
        (status = 200, description = "今日统计", body = DayReport),
        (status = 401, description = "口令错误", body = ApiError)
    )
)]
pub async fn today_report(
    service: web::Data<ReportService>,
    campaign: web::Data<CampaignConfig>,
) -> Result<HttpResponse> {
    match service.today_report(&campaign.id).await {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": report }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminPinMiddleware)
            .route("/prize-weights", web::get().to(get_prize_weights))
            .route("/prize-weights", web::put().to(update_prize_weights))
            .route("/reports/daily", web::get().to(daily_report))
            .route("/reports/today", web::get().to(today_report)),
    );
}
