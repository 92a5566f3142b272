use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participant_entity;

/// 参与者登记请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterParticipantRequest {
    /// 姓名
    pub name: String,
    /// 身份号 (RUT)，保存前去掉分隔符
    #[serde(default)]
    #[schema(example = "12.345.678-k")]
    pub rut: String,
    /// 手机号
    pub phone: String,
    /// 邮箱 (可选)
    #[serde(default)]
    pub email: Option<String>,
    /// 所在区 (comuna)
    #[serde(default)]
    pub comuna: String,
    /// 感兴趣的型号 (可选)
    #[serde(default)]
    pub preferred_model: Option<String>,
    /// 是否同意数据使用条款，必须为 true
    #[serde(default)]
    pub consent: bool,
}

/// 登记成功后返回的兑换码
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterParticipantResponse {
    pub participant_id: i32,
    #[schema(example = "K7QM")]
    pub code: String,
}

impl From<participant_entity::Model> for RegisterParticipantResponse {
    fn from(m: participant_entity::Model) -> Self {
        RegisterParticipantResponse {
            participant_id: m.id,
            code: m.code,
        }
    }
}
