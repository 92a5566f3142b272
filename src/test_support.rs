//! 测试公用：SQLite 内存库 + 迁移

use crate::database::{DbPool, run_migrations};
use crate::entities::participant_entity as participants;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, Set};

pub const CAMPAIGN: &str = "test-campaign";

/// 单连接内存库（每个连接各自一份内存数据库，必须保持唯一连接）
pub async fn setup_db() -> DbPool {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let pool = Database::connect(options)
        .await
        .expect("failed to open sqlite memory database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

pub async fn seed_participant(db: &DbPool, campaign_id: &str, code: &str) -> participants::Model {
    participants::ActiveModel {
        campaign_id: Set(campaign_id.to_string()),
        code: Set(code.to_string()),
        name: Set(format!("Participant {code}")),
        rut: Set("11111111K".to_string()),
        phone: Set("+56900000000".to_string()),
        email: Set(None),
        comuna: Set("Providencia".to_string()),
        preferred_model: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed participant")
}

/// 让 draws 表的写入失败（读取不受影响），模拟非唯一约束的存储故障
pub async fn fail_draw_inserts(db: &DbPool) {
    db.execute_unprepared(
        "CREATE TRIGGER fail_draw_inserts BEFORE INSERT ON draws \
         BEGIN SELECT RAISE(ABORT, 'storage unavailable'); END",
    )
    .await
    .expect("failed to install draw insert trigger");
}

pub async fn restore_draw_inserts(db: &DbPool) {
    db.execute_unprepared("DROP TRIGGER fail_draw_inserts")
        .await
        .expect("failed to drop draw insert trigger");
}
