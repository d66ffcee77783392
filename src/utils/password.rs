use crate::config::{AppConfig, Argon2Config};
use crate::errors::CodetaError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use once_cell::sync::Lazy;

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String, CodetaError> {
    hash_password_with(password, &AppConfig::get().argon2)
}

/// 使用指定参数哈希密码
pub fn hash_password_with(password: &str, config: &Argon2Config) -> Result<String, CodetaError> {
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| CodetaError::validation(format!("Invalid argon2 parameters: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CodetaError::validation(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

// 用户不存在时用于比对的哈希，使登录耗时与密码错误时一致
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("codeta-dummy-password").ok());

/// 验证用户密码；用户不存在时仍执行一次哈希比对并返回 false
pub fn verify_user_password(password: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, dummy);
            }
            false
        }
    }
}

/// 验证密码；参数从哈希串中读取
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with("test_password", &cheap_params()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("test_password", &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_salted() {
        let a = hash_password_with("test_password", &cheap_params()).unwrap();
        let b = hash_password_with("test_password", &cheap_params()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_user_never_verifies() {
        let hash = hash_password_with("test_password", &cheap_params()).unwrap();
        assert!(verify_user_password("test_password", Some(&hash)));
        assert!(!verify_user_password("test_password", None));
        assert!(!verify_user_password("codeta-dummy-password", None));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("test_password", "not-a-hash"));
        assert!(!verify_password("", ""));
    }
}
