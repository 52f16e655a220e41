use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use common::error::{AppError, Res};
use db::{
    dtos::user::UserCreateRequest,
    models::user::{AuthCredentials, User},
};
use sqlx::PgPool;

use crate::dtos::auth::RegisterRequest;

pub async fn exists_by_email(pool: &PgPool, email: &str) -> Res<bool> {
    db::user::exists_user_by_email(pool, email.to_string()).await
}

/// Creates the user row and its credentials in one transaction so a failed
/// hash or insert leaves nothing behind.
pub async fn create_user_with_credentials(
    pool: &PgPool,
    req: &RegisterRequest,
) -> Res<User> {
    let password_hash = hash_password(&req.password)?;

    let mut tx = pool.begin().await.map_err(AppError::from)?;

    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            email: req.email.clone(),
            name: req.name.clone(),
        },
    )
    .await?;

    db::user::insert_user_with_credentials(
        &mut *tx,
        AuthCredentials {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;

    tx.commit().await.map_err(AppError::from)?;
    Ok(user)
}

fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn hash_verifies_with_original_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse battery staple", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong password", &parsed)
                .is_err()
        );
    }
}
