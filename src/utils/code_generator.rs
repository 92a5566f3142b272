use crate::error::{AppError, AppResult};
use rand::Rng;

/// 兑换码字符集（去掉易混淆的 0/O/1/I）
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// 默认兑换码长度
pub const SHORT_CODE_LEN: usize = 4;

/// 短码多次冲突后使用的长度
pub const LONG_CODE_LEN: usize = 6;

/// 兑换码最大长度，超过的输入不可能存在
pub const MAX_CODE_LEN: usize = 16;

/// 生成指定长度的兑换码
pub fn generate_participant_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// 规范化用户输入的兑换码（去空白、转大写）
///
/// 空输入是请求错误；含非法字符或超长的输入不可能对应任何参与者，直接视为无效码。
pub fn normalize_code(raw: &str) -> AppResult<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Err(AppError::ValidationError("Missing participant code".into()));
    }

    if code.len() > MAX_CODE_LEN || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(AppError::UnknownCode(code));
    }

    Ok(code)
}
