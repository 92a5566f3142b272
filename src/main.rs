use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use prize_wheel_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    utils::{EventCalendar, ThreadRandom},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    let calendar = EventCalendar::new(config.campaign.utc_offset_minutes)
        .expect("Invalid campaign UTC offset");

    if config.admin.pin.is_empty() {
        log::warn!("ADMIN_PIN is not configured, all admin endpoints will reject requests");
    }

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建服务
    let participant_service = ParticipantService::new(pool.clone());
    let draw_ledger = DrawLedger::new(pool.clone());
    let weight_service = WeightService::new(pool.clone());
    let redemption_service = RedemptionService::new(
        participant_service.clone(),
        draw_ledger.clone(),
        weight_service.clone(),
        calendar,
        Arc::new(ThreadRandom),
    );
    let report_service = ReportService::new(draw_ledger, calendar);

    let campaign = web::Data::new(config.campaign.clone());
    let admin = web::Data::new(config.admin.clone());

    log::info!(
        "Campaign {} running with event offset {}",
        config.campaign.id,
        calendar.offset()
    );

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(campaign.clone())
            .app_data(admin.clone())
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(weight_service.clone()))
            .app_data(web::Data::new(redemption_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .configure(swagger_config)
            .service(web::scope("/api/v1").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
