use super::id_string;
use medchat_core::auth::{AuthTokens, Credentials, Registration, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginBody<'a> {
    fn from(c: &'a Credentials) -> Self {
        LoginBody {
            email: &c.email,
            password: &c.password,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
}

impl<'a> From<&'a Registration> for RegisterBody<'a> {
    fn from(r: &'a Registration) -> Self {
        RegisterBody {
            email: &r.email,
            password: &r.password,
            full_name: r.full_name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshBody<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl From<TokenDto> for AuthTokens {
    fn from(dto: TokenDto) -> Self {
        AuthTokens {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            token_type: dto.token_type.unwrap_or_else(|| "bearer".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            email: dto.email,
            full_name: dto.full_name,
            role: dto.role,
        }
    }
}
