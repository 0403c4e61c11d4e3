use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use warden_core::{AppError, AppResult, UserIdentity};
use warden_domain::{EmailAddress, RoleId, SyncTarget, UserId};

use crate::{
    CreateUserInput, NewUserWrite, PasswordHasher, PermissionRecord, RoleRecord, RoleRepository,
    RoleSummary, RoleWrite, UpdateUserInput, UserRecord, UserRepository, UserUpdateWrite,
};

use super::UserService;

struct FakeRoleRepository {
    names: Vec<&'static str>,
}

impl FakeRoleRepository {
    fn summaries(&self, target: &SyncTarget) -> Vec<RoleSummary> {
        self.names
            .iter()
            .zip(1_i64..)
            .filter(|(name, _)| target.contains(name))
            .map(|(name, id)| RoleSummary {
                role_id: RoleId::new(id),
                name: (*name).to_owned(),
            })
            .collect()
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
        let now = Utc::now();
        Ok(self
            .names
            .iter()
            .zip(1_i64..)
            .map(|(name, id)| RoleRecord {
                role_id: RoleId::new(id),
                name: (*name).to_owned(),
                permissions: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .collect())
    }

    async fn find_role(&self, _role_id: RoleId) -> AppResult<Option<RoleRecord>> {
        Ok(None)
    }

    async fn create_role(&self, _input: RoleWrite) -> AppResult<RoleRecord> {
        Err(AppError::Internal("not used".to_owned()))
    }

    async fn update_role(&self, _role_id: RoleId, _input: RoleWrite) -> AppResult<RoleRecord> {
        Err(AppError::Internal("not used".to_owned()))
    }

    async fn sync_role_permissions(
        &self,
        _role_id: RoleId,
        _target: &SyncTarget,
    ) -> AppResult<Vec<PermissionRecord>> {
        Err(AppError::Internal("not used".to_owned()))
    }

    async fn delete_role(&self, _role_id: RoleId) -> AppResult<()> {
        Err(AppError::Internal("not used".to_owned()))
    }
}

struct StoredUser {
    record: UserRecord,
    password_hash: String,
}

struct FakeUserRepository {
    roles: Arc<FakeRoleRepository>,
    users: Mutex<Vec<StoredUser>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .map(|user| user.record.clone())
            .collect())
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.record.user_id == user_id)
            .map(|user| user.record.clone()))
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.record.email == email.as_str())
            .map(|user| user.record.clone()))
    }

    async fn create_user(&self, input: NewUserWrite) -> AppResult<UserRecord> {
        let mut users = self.users.lock().await;
        let now = Utc::now();
        let record = UserRecord {
            user_id: UserId::new(i64::try_from(users.len()).unwrap_or_default() + 1),
            name: input.name.as_str().to_owned(),
            email: input.email.as_str().to_owned(),
            roles: self.roles.summaries(&input.roles),
            created_at: now,
            updated_at: now,
        };
        users.push(StoredUser {
            record: record.clone(),
            password_hash: input.password_hash,
        });
        Ok(record)
    }

    async fn update_user(&self, user_id: UserId, input: UserUpdateWrite) -> AppResult<UserRecord> {
        let mut users = self.users.lock().await;
        let Some(user) = users
            .iter_mut()
            .find(|user| user.record.user_id == user_id)
        else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };
        user.record.name = input.name.as_str().to_owned();
        user.record.email = input.email.as_str().to_owned();
        user.record.roles = self.roles.summaries(&input.roles);
        if let Some(password_hash) = input.password_hash {
            user.password_hash = password_hash;
        }
        Ok(user.record.clone())
    }

    async fn sync_user_roles(
        &self,
        user_id: UserId,
        target: &SyncTarget,
    ) -> AppResult<Vec<RoleSummary>> {
        let mut users = self.users.lock().await;
        let Some(user) = users
            .iter_mut()
            .find(|user| user.record.user_id == user_id)
        else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };
        user.record.roles = self.roles.summaries(target);
        Ok(user.record.roles.clone())
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.users
            .lock()
            .await
            .retain(|user| user.record.user_id != user_id);
        Ok(())
    }
}

struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }
}

fn build_service() -> (UserService, Arc<FakeUserRepository>) {
    let roles = Arc::new(FakeRoleRepository {
        names: vec!["admin", "editor", "viewer"],
    });
    let users = Arc::new(FakeUserRepository {
        roles: roles.clone(),
        users: Mutex::new(Vec::new()),
    });
    (
        UserService::new(users.clone(), roles, Arc::new(FakePasswordHasher)),
        users,
    )
}

fn actor() -> UserIdentity {
    UserIdentity::new(1, "Admin", "admin@example.com")
}

fn create_input(roles: Option<&[&str]>) -> CreateUserInput {
    CreateUserInput {
        name: "Alice".to_owned(),
        email: " Alice@Example.COM ".to_owned(),
        password: "correct horse".to_owned(),
        roles: roles.map(|names| names.iter().map(|name| (*name).to_owned()).collect()),
    }
}

async fn stored_hash(repository: &FakeUserRepository, user_id: UserId) -> Option<String> {
    repository
        .users
        .lock()
        .await
        .iter()
        .find(|user| user.record.user_id == user_id)
        .map(|user| user.password_hash.clone())
}

#[tokio::test]
async fn create_user_hashes_password_normalizes_email_and_assigns_roles() -> AppResult<()> {
    let (service, repository) = build_service();

    let user = service
        .create_user(&actor(), create_input(Some(&["editor", "viewer"])))
        .await?;

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role_names(), vec!["editor", "viewer"]);
    assert_eq!(
        stored_hash(&repository, user.user_id).await.as_deref(),
        Some("hashed:correct horse")
    );
    Ok(())
}

#[tokio::test]
async fn create_user_reports_every_invalid_field() {
    let (service, repository) = build_service();

    let result = service
        .create_user(
            &actor(),
            CreateUserInput {
                name: String::new(),
                email: "not-an-email".to_owned(),
                password: "short".to_owned(),
                roles: Some(vec!["ghost".to_owned()]),
            },
        )
        .await;

    let Err(AppError::InvalidFields(errors)) = result else {
        panic!("expected field errors");
    };
    for field in ["name", "email", "password", "roles"] {
        assert!(!errors.messages(field).is_empty(), "missing error for {field}");
    }
    assert_eq!(errors.messages("roles"), ["unknown role 'ghost'".to_owned()]);
    assert!(repository.users.lock().await.is_empty());
}

#[tokio::test]
async fn update_user_with_empty_password_keeps_hash() -> AppResult<()> {
    let (service, repository) = build_service();
    let user = service
        .create_user(&actor(), create_input(Some(&["admin"])))
        .await?;

    let updated = service
        .update_user(
            &actor(),
            user.user_id,
            UpdateUserInput {
                name: "Alice Smith".to_owned(),
                email: "alice@example.com".to_owned(),
                password: Some(String::new()),
                roles: Some(vec!["viewer".to_owned()]),
            },
        )
        .await?;

    assert_eq!(updated.name, "Alice Smith");
    assert_eq!(updated.role_names(), vec!["viewer"]);
    assert_eq!(
        stored_hash(&repository, user.user_id).await.as_deref(),
        Some("hashed:correct horse")
    );
    Ok(())
}

#[tokio::test]
async fn update_user_with_new_password_rehashes() -> AppResult<()> {
    let (service, repository) = build_service();
    let user = service.create_user(&actor(), create_input(None)).await?;

    service
        .update_user(
            &actor(),
            user.user_id,
            UpdateUserInput {
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                password: Some("battery staple".to_owned()),
                roles: None,
            },
        )
        .await?;

    assert_eq!(
        stored_hash(&repository, user.user_id).await.as_deref(),
        Some("hashed:battery staple")
    );
    Ok(())
}

#[tokio::test]
async fn update_user_without_roles_field_clears_roles() -> AppResult<()> {
    let (service, _) = build_service();
    let user = service
        .create_user(&actor(), create_input(Some(&["admin", "editor"])))
        .await?;

    let updated = service
        .update_user(
            &actor(),
            user.user_id,
            UpdateUserInput {
                name: "Alice".to_owned(),
                email: "alice@example.com".to_owned(),
                password: None,
                roles: None,
            },
        )
        .await?;

    assert!(updated.roles.is_empty());
    Ok(())
}

#[tokio::test]
async fn sync_user_roles_rejects_unknown_role() {
    let (service, _) = build_service();

    let result = service
        .sync_user_roles(&actor(), UserId::new(1), Some(vec!["root".to_owned()]))
        .await;

    assert!(matches!(result, Err(AppError::InvalidFields(_))));
}

#[tokio::test]
async fn find_by_email_ignores_case() -> AppResult<()> {
    let (service, _) = build_service();
    service.create_user(&actor(), create_input(None)).await?;

    let found = service.find_by_email("ALICE@example.com").await?;
    assert!(found.is_some());
    assert!(service.find_by_email("garbage").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn get_user_reports_missing_user() {
    let (service, _) = build_service();

    let result = service.get_user(UserId::new(42)).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
