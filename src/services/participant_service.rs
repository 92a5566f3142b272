use crate::database::is_unique_violation;
use crate::entities::participant_entity as participants;
use crate::error::{AppError, AppResult};
use crate::models::{RegisterParticipantRequest, RegisterParticipantResponse};
use crate::utils::{
    LONG_CODE_LEN, SHORT_CODE_LEN, generate_participant_code, validate_phone,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

/// 短码查重次数，超过后改用长码
const SHORT_CODE_ATTEMPTS: usize = 30;

/// 插入时仍然撞到唯一索引的重试次数
const INSERT_ATTEMPTS: usize = 5;

/// 参与者登记与兑换码查询
#[derive(Clone)]
pub struct ParticipantService {
    pool: DatabaseConnection,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 按兑换码查找参与者（code 需已规范化）
    pub async fn find_by_code(
        &self,
        campaign_id: &str,
        code: &str,
    ) -> AppResult<Option<participants::Model>> {
        let participant = participants::Entity::find()
            .filter(participants::Column::CampaignId.eq(campaign_id))
            .filter(participants::Column::Code.eq(code))
            .one(&self.pool)
            .await?;
        Ok(participant)
    }

    /// 登记参与者并分配唯一兑换码
    pub async fn register(
        &self,
        campaign_id: &str,
        request: RegisterParticipantRequest,
    ) -> AppResult<RegisterParticipantResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".into()));
        }
        let rut = clean_rut(&request.rut);
        if rut.is_empty() {
            return Err(AppError::ValidationError("RUT is required".into()));
        }
        let phone = validate_phone(&request.phone)?;
        let comuna = request.comuna.trim().to_string();
        if comuna.is_empty() {
            return Err(AppError::ValidationError("Comuna is required".into()));
        }
        if !request.consent {
            return Err(AppError::ValidationError("Consent is required".into()));
        }
        let email = trimmed_optional(request.email);
        let preferred_model = trimmed_optional(request.preferred_model);

        for _ in 0..INSERT_ATTEMPTS {
            let code = self.generate_unique_code(campaign_id).await?;

            let result = participants::ActiveModel {
                campaign_id: Set(campaign_id.to_string()),
                code: Set(code.clone()),
                name: Set(name.clone()),
                rut: Set(rut.clone()),
                phone: Set(phone.clone()),
                email: Set(email.clone()),
                comuna: Set(comuna.clone()),
                preferred_model: Set(preferred_model.clone()),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&self.pool)
            .await;

            match result {
                Ok(model) => {
                    log::info!(
                        "Participant {} registered in campaign {} with code {}",
                        model.id,
                        campaign_id,
                        model.code
                    );
                    return Ok(model.into());
                }
                // 查重与插入之间被并发登记占用，换码重试
                Err(err) if is_unique_violation(&err) => {
                    log::warn!("Participant code {code} taken concurrently, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::InternalError(
            "Failed to allocate a unique participant code".into(),
        ))
    }

    async fn generate_unique_code(&self, campaign_id: &str) -> AppResult<String> {
        for _ in 0..SHORT_CODE_ATTEMPTS {
            let code = generate_participant_code(SHORT_CODE_LEN);
            let exists = participants::Entity::find()
                .filter(participants::Column::CampaignId.eq(campaign_id))
                .filter(participants::Column::Code.eq(code.as_str()))
                .count(&self.pool)
                .await?;
            if exists == 0 {
                return Ok(code);
            }
        }
        Ok(generate_participant_code(LONG_CODE_LEN))
    }
}

/// RUT 只保留数字和校验位 K（大写），分隔符一律去掉
fn clean_rut(raw: &str) -> String {
    raw.to_ascii_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'K')
        .collect()
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
