use crate::config::{AppConfig, Argon2Config};
use crate::errors::DojoSystemError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 按全局配置的 Argon2id 参数哈希密码
pub fn hash_password(password: &str) -> Result<String, DojoSystemError> {
    hash_password_with(password, &AppConfig::get().argon2)
}

pub fn hash_password_with(password: &str, cfg: &Argon2Config) -> Result<String, DojoSystemError> {
    let params = Params::new(cfg.memory_cost, cfg.time_cost, cfg.parallelism, None)
        .map_err(|e| DojoSystemError::validation(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DojoSystemError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码，参数从哈希串本身读取
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

    #[test]
    fn test_hash_and_verify() {
        let cfg = Argon2Config {
            memory_cost: 8192,
            time_cost: 1,
            parallelism: 1,
        };
        let hash = hash_password_with("kata-2024", &cfg).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("kata-2024", &hash));
        assert!(!verify_password("kata-2025", &hash));
        assert!(!verify_password("kata-2024", "not-a-hash"));
    }
}
