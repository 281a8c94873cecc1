use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::minutes(config.jwt_expiration_minutes),
        }
    }

    pub fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.uuid.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now.timestamp() as usize,
            exp,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;
    use uuid::Uuid;

    fn service(expiration_minutes: i64) -> JwtService {
        JwtService::new(&AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234".into(),
            jwt_expiration_minutes: expiration_minutes,
            upload_dir: "public".into(),
        })
    }

    fn test_user() -> User {
        User {
            id: 1,
            uuid: Uuid::new_v4(),
            name: "Admin".into(),
            email: "admin@example.com".into(),
            password: "hash".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_identity_claims() {
        let service = service(60);
        let user = test_user();

        let token = service.create_jwt(&user).unwrap();
        let decoded = service.decode_jwt(&token).unwrap().claims;

        assert_eq!(decoded.sub, user.uuid.to_string());
        assert_eq!(decoded.email, user.email);
        assert_eq!(decoded.name, user.name);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = service(-5);
        let token = service.create_jwt(&test_user()).unwrap();

        match service.decode_jwt(&token) {
            Err(AuthError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|d| d.claims)),
        }
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = service(60);
        assert!(matches!(
            service.decode_jwt("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
