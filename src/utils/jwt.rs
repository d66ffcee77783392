use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "codeta_session";
pub const FLASH_COOKIE: &str = "codeta_flash";

const SESSION_TOKEN: &str = "session";
const FLASH_TOKEN: &str = "flash";
const FLASH_EXPIRY_MINUTES: i64 = 5;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub username: String,   // 用户名
    pub token_type: String, // token类型: "session" 或 "flash"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<String>, // 待显示的提示消息
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取签名密钥
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    fn sign(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), claims, &encoding_key)
    }

    fn claims(
        sub: String,
        username: String,
        token_type: &str,
        expiry_duration: chrono::Duration,
        flashes: Vec<String>,
    ) -> Claims {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;
        Claims {
            sub,
            username,
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
            flashes,
        }
    }

    // 生成会话 Token
    pub fn generate_session_token(
        user_id: i64,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let claims = Self::claims(
            user_id.to_string(),
            username.to_string(),
            SESSION_TOKEN,
            chrono::Duration::hours(config.session.expiry_hours),
            Vec::new(),
        );
        Self::sign(&claims)
    }

    // 生成提示消息 Token
    pub fn generate_flash_token(messages: &[String]) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::claims(
            String::new(),
            String::new(),
            FLASH_TOKEN,
            chrono::Duration::minutes(FLASH_EXPIRY_MINUTES),
            messages.to_vec(),
        );
        Self::sign(&claims)
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 token 是否为指定类型
    pub fn verify_token_type(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 验证会话 Token
    pub fn verify_session_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, SESSION_TOKEN)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(SESSION_COOKIE, token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::hours(
                config.session.expiry_hours,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 创建提示消息 Cookie，签名失败时返回 None
    pub fn create_flash_cookie(messages: &[String]) -> Option<Cookie<'static>> {
        match Self::generate_flash_token(messages) {
            Ok(token) => Some(
                Cookie::build(FLASH_COOKIE, token)
                    .path("/")
                    .same_site(SameSite::Lax)
                    .http_only(true)
                    .finish(),
            ),
            Err(e) => {
                tracing::error!("Failed to sign flash message: {}", e);
                None
            }
        }
    }

    /// 创建空的提示消息 Cookie（消息已显示）
    pub fn create_empty_flash_cookie() -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .finish()
    }

    /// 从请求中提取会话 Token
    pub fn extract_session_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    /// 从请求中读取提示消息；签名无效或过期时视为没有消息
    pub fn extract_flashes(req: &actix_web::HttpRequest) -> Vec<String> {
        req.cookie(FLASH_COOKIE)
            .filter(|cookie| !cookie.value().is_empty())
            .and_then(|cookie| Self::verify_token_type(cookie.value(), FLASH_TOKEN).ok())
            .map(|claims| claims.flashes)
            .unwrap_or_default()
    }
}
