use crate::error::{AppError, AppResult};
use regex::Regex;

/// 去掉空格、横线、括号，保留前导 + 与数字
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

/// 验证手机号格式 (可选 +，8 到 15 位数字)
pub fn validate_phone(phone: &str) -> AppResult<String> {
    let phone_regex = Regex::new(r"^\+?\d{8,15}$").unwrap();
    let normalized = normalize_phone(phone);

    if !phone_regex.is_match(&normalized) {
        return Err(AppError::ValidationError(
            "Invalid phone number, expected 8 to 15 digits".to_string(),
        ));
    }

    Ok(normalized)
}
