use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::Store;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest};
use crate::error::{Error, Result};
use crate::models::user::{Principal, Role, User};
use crate::utils::{
    crypto::{hash_password, verify_password},
    time::now,
    token::TokenKeys,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: TokenKeys,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenKeys) -> Self {
        Self { store, tokens }
    }

    pub async fn register(&self, payload: RegisterRequest) -> Result<Uuid> {
        payload.validate()?;
        let role: Role = payload
            .role
            .parse()
            .ok()
            .filter(Role::is_self_registrable)
            .ok_or_else(|| {
                Error::BadRequest(
                    "Invalid role. Must be Recruiter, Interviewer or Reviewer.".to_string(),
                )
            })?;

        let email = payload.email.trim().to_string();
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(Error::Duplicate(
                "A user with this email already exists.".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email,
            password_hash: hash_password(&payload.password)?,
            role,
            created_at: now(),
        };
        self.store.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, role = %role, "user registered");
        Ok(user.id)
    }

    pub async fn login(&self, payload: LoginRequest) -> Result<LoginResponse> {
        payload.validate()?;
        let user = self
            .store
            .find_user_by_email(&payload.email)
            .await?
            .filter(|user| verify_password(&payload.password, &user.password_hash))
            .ok_or_else(|| Error::Unauthorized("Invalid credentials.".to_string()))?;

        if !user
            .role
            .as_str()
            .eq_ignore_ascii_case(payload.user_type.trim())
        {
            return Err(Error::Unauthorized(
                "Invalid credentials for this user type.".to_string(),
            ));
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginResponse {
            token,
            user_id: user.id,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }

    pub async fn profile(&self, principal: &Principal) -> Result<ProfileResponse> {
        let user = self
            .store
            .find_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;
        Ok(ProfileResponse::from(user))
    }
}
