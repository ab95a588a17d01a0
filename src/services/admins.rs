//! Admin account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    config::AdminSeedConfig,
    error::{AppError, AppResult},
    models::{
        admin::{AdminSummary, LoginRequest, NewAdmin},
        document::{Document, DocumentId, Filter},
    },
    repository::SharedStore,
};

const INVALID_CREDENTIALS: &str = "unauthorized access";

#[derive(Clone)]
pub struct AdminService {
    admins: SharedStore,
}

impl AdminService {
    pub fn new(admins: SharedStore) -> Self {
        Self { admins }
    }

    /// List admin identities (email and role only)
    pub async fn list(&self) -> AppResult<Vec<AdminSummary>> {
        let admins = self.admins.find(&Filter::All, None).await?;
        Ok(admins.iter().map(summarize).collect())
    }

    /// Check an email/password pair against the stored Argon2 hash
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<()> {
        request
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let admin = self
            .admins
            .find_one(&Filter::eq("email", request.email.as_str()))
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        let stored = admin.get("password").and_then(Value::as_str).unwrap_or_default();
        if !verify_password(stored, &request.password) {
            tracing::info!("Failed admin login for {}", request.email);
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        tracing::info!("Admin {} authenticated", request.email);
        Ok(())
    }

    /// Insert an admin with a hashed password
    pub async fn create(&self, admin: NewAdmin) -> AppResult<DocumentId> {
        let password = hash_password(&admin.password)?;
        let document = json!({
            "email": admin.email.as_str(),
            "password": password,
            "role": admin.role.as_str(),
        });
        let Value::Object(document) = document else {
            return Err(AppError::Internal("Admin document is not an object".to_string()));
        };

        let id = self.admins.insert_one(document).await?;
        tracing::info!("Admin {} created", admin.email);
        Ok(id)
    }

    /// Create the configured seed admin unless one with that email exists
    pub async fn ensure_seed_admin(&self, config: &AdminSeedConfig) -> AppResult<Option<DocumentId>> {
        let (Some(email), Some(password)) = (&config.seed_email, &config.seed_password) else {
            return Ok(None);
        };

        if self
            .admins
            .find_one(&Filter::eq("email", email.as_str()))
            .await?
            .is_some()
        {
            tracing::debug!("Seed admin {} already present", email);
            return Ok(None);
        }

        let id = self
            .create(NewAdmin {
                email: email.clone(),
                password: password.clone(),
                role: config.seed_role.clone(),
            })
            .await?;
        Ok(Some(id))
    }
}

fn summarize(document: &Document) -> AdminSummary {
    let text = |field: &str| document.get(field).and_then(Value::as_str).map(str::to_string);
    AdminSummary {
        email: text("email"),
        role: text("role"),
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Stored values that are not Argon2 PHC strings never match.
fn verify_password(stored: &str, password: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            tracing::warn!("Admin record holds a password that is not an Argon2 hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{DocumentStore, MemoryDocumentStore};
    use std::sync::Arc;

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn service_with_admin() -> (AdminService, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = AdminService::new(store.clone());
        service
            .create(NewAdmin {
                email: "admin@library.test".to_string(),
                password: "s3cret".to_string(),
                role: "admin".to_string(),
            })
            .await
            .unwrap();
        (service, store)
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("s3cret").unwrap();
        let second = hash_password("s3cret").unwrap();
        assert_ne!(first, second);
        assert!(verify_password(&first, "s3cret"));
        assert!(!verify_password(&first, "wrong"));
        assert!(!verify_password("s3cret", "s3cret"));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let (service, _) = service_with_admin().await;

        assert!(service.authenticate(&login("admin@library.test", "s3cret")).await.is_ok());
        assert!(matches!(
            service.authenticate(&login("admin@library.test", "nope")).await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            service.authenticate(&login("ghost@library.test", "s3cret")).await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            service.authenticate(&login("not-an-email", "s3cret")).await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            service.authenticate(&login("", "s3cret")).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_plain_identifier() {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = AdminService::new(store);
        let seed = AdminSeedConfig {
            seed_email: Some("admin".to_string()),
            seed_password: Some("changeme".to_string()),
            seed_role: "admin".to_string(),
        };
        service.ensure_seed_admin(&seed).await.unwrap();

        assert!(service.authenticate(&login("admin", "changeme")).await.is_ok());
        assert!(matches!(
            service.authenticate(&login("admin", "wrong")).await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_list_hides_password() {
        let (service, store) = service_with_admin().await;

        let admins = service.list().await.unwrap();
        assert_eq!(
            admins,
            vec![AdminSummary {
                email: Some("admin@library.test".to_string()),
                role: Some("admin".to_string()),
            }]
        );

        let stored = store.find(&Filter::All, None).await.unwrap();
        let hash = stored[0]["password"].as_str().unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_seed_admin_once() {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = AdminService::new(store.clone());
        let config = AdminSeedConfig {
            seed_email: Some("root@library.test".to_string()),
            seed_password: Some("changeme".to_string()),
            seed_role: "admin".to_string(),
        };

        assert!(service.ensure_seed_admin(&config).await.unwrap().is_some());
        assert!(service.ensure_seed_admin(&config).await.unwrap().is_none());
        assert_eq!(store.count(&Filter::All).await.unwrap(), 1);

        assert!(service
            .ensure_seed_admin(&AdminSeedConfig::default())
            .await
            .unwrap()
            .is_none());
    }
}
