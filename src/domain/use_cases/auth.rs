use validator::Validate;

use crate::domain::entities::user::{LoginRequest, User, UserResponse};
use crate::errors::{AppError, AuthError};
use crate::infrastructure::auth::jwt::JwtService;
use crate::infrastructure::auth::password::verify_password;
use crate::interfaces::repositories::user::UserRepository;

#[derive(Debug)]
pub struct LoginSuccess {
    pub user: UserResponse,
    pub token: String,
}

/// Single-admin login. Unknown emails surface as 404, a wrong password as
/// 401, matching the distinction the frontend relies on.
pub struct AuthHandler<R> {
    user_repo: R,
    pub token_service: JwtService,
}

impl<R: UserRepository> AuthHandler<R> {
    pub fn new(user_repo: R, token_service: JwtService) -> Self {
        AuthHandler { user_repo, token_service }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginSuccess, AppError> {
        request.validate()?;

        let user: User = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(&request.password, &user.password)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .token_service
            .create_jwt(&user)
            .map_err(|_| AppError::InternalError(AuthError::TokenCreation.to_string()))?;
        Ok(LoginSuccess { user: UserResponse::from(user), token })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::infrastructure::auth::password::hash_password;
    use crate::interfaces::repositories::user::MockUserRepository;
    use crate::settings::AppConfig;

    fn service() -> JwtService {
        JwtService::new(&AppConfig::test_config())
    }

    fn admin(password: &str) -> User {
        User {
            id: 1,
            uuid: Uuid::new_v4(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password: hash_password(password).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    async fn login_rejects_malformed_email_before_any_lookup() {
        let repo = MockUserRepository::new();
        let handler = AuthHandler::new(repo, service());

        let err = handler
            .login(LoginRequest {
                email: "not-an-email".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn unknown_email_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        let handler = AuthHandler::new(repo, service());

        let err = handler
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "User not found"));
    }

    #[actix_rt::test]
    async fn wrong_password_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(admin("right-password"))));
        let handler = AuthHandler::new(repo, service());

        let err = handler
            .login(LoginRequest {
                email: "admin@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[actix_rt::test]
    async fn correct_credentials_return_user_and_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(admin("right-password"))));
        let handler = AuthHandler::new(repo, service());

        let success = handler
            .login(LoginRequest {
                email: "admin@example.com".to_string(),
                password: "right-password".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(success.user.email, "admin@example.com");

        let claims = handler
            .token_service
            .decode_jwt(&success.token)
            .unwrap()
            .claims;
        assert_eq!(claims.email, "admin@example.com");
    }
}
