use mp_core::domain::entities::user::User;
use mp_core::services::account::{AuthenticatedAccount, Registration};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    /// 11-digit mobile number used as the account
    #[validate(length(equal = 11, message = "telephone must be 11 digits"))]
    pub telephone: String,

    #[validate(length(min = 6, max = 14, message = "password must be 6 to 14 characters"))]
    pub password: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub avatar: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            telephone: request.telephone,
            password: request.password,
            gender: request.gender,
            avatar: request.avatar,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(equal = 11, message = "telephone must be 11 digits"))]
    pub telephone: String,

    #[validate(length(min = 6, max = 14, message = "password must be 6 to 14 characters"))]
    pub password: String,
}

/// Public profile of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: u64,
    pub account: String,
    pub nickname: String,
    pub gender: String,
    pub avatar: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            account: user.telephone.clone(),
            nickname: user.name.clone(),
            gender: user.gender.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserView,
}

impl From<AuthenticatedAccount> for AuthResponse {
    fn from(account: AuthenticatedAccount) -> Self {
        Self {
            user: UserView::from(&account.user),
            token: account.token,
            expires_in: account.expires_in,
        }
    }
}
