//! User use cases.

use std::sync::Arc;

use tally_shared::types::UserId;

use super::error::UserError;
use super::store::UserStore;
use super::types::{NewUser, User};
use crate::auth::{hash_password, verify_password};

/// Registration, authentication and profile lookup.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Registers a new user with a hashed password.
    ///
    /// # Errors
    ///
    /// `Validation` for blank fields or a malformed email,
    /// `EmailAlreadyTaken` if the email is registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.is_empty() {
            return Err(UserError::Validation("name is required".to_string()));
        }
        if !email.contains('@') {
            return Err(UserError::Validation("email is invalid".to_string()));
        }
        if password.is_empty() {
            return Err(UserError::Validation("password is required".to_string()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailAlreadyTaken);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
            })
            .await?;

        Ok(user)
    }

    /// Checks credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// `IncorrectEmailOrPassword` for an unknown email or a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(UserError::IncorrectEmailOrPassword);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(UserError::IncorrectEmailOrPassword);
        }

        Ok(user)
    }

    /// Returns the profile of an existing user.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if the id does not resolve.
    pub async fn profile(&self, user_id: UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::memory::InMemoryUserDirectory;
    use crate::statement::UserLookup;
    use crate::users::CreateUserError;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserDirectory::new()))
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();

        let user = service
            .register("User Test", "user@test.com", "1234")
            .await
            .unwrap();

        assert_eq!(user.name, "User Test");
        assert_eq!(user.email, "user@test.com");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service
            .register("First", "user@test.com", "1234")
            .await
            .unwrap();

        let result = service.register("Second", "USER@test.com", "4321").await;

        assert!(matches!(result, Err(UserError::EmailAlreadyTaken)));
    }

    /// Directory whose email lookup always misses, as when a concurrent
    /// registration commits between the lookup and the insert.
    struct LateDuplicateDirectory(InMemoryUserDirectory);

    #[async_trait::async_trait]
    impl UserLookup for LateDuplicateDirectory {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
            self.0.find_by_id(id).await
        }
    }

    #[async_trait::async_trait]
    impl UserStore for LateDuplicateDirectory {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StorageError> {
            Ok(None)
        }

        async fn create(&self, new_user: NewUser) -> Result<User, CreateUserError> {
            self.0.create(new_user).await
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_detected_at_insert() {
        let service = UserService::new(Arc::new(LateDuplicateDirectory(
            InMemoryUserDirectory::new(),
        )));
        service
            .register("First", "race@test.com", "1234")
            .await
            .unwrap();

        let result = service.register("Second", "race@test.com", "4321").await;

        assert!(matches!(result, Err(UserError::EmailAlreadyTaken)));
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name() {
        let result = service().register("  ", "user@test.com", "1234").await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service();
        let created = service
            .register("Name User", "user@email.com", "1234")
            .await
            .unwrap();

        let user = service.authenticate("user@email.com", "1234").await.unwrap();

        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let result = service().authenticate("error@mail.com", "1234").await;
        assert!(matches!(result, Err(UserError::IncorrectEmailOrPassword)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service();
        service
            .register("User Error", "error@mail.com", "1234")
            .await
            .unwrap();

        let result = service.authenticate("error@mail.com", "incorrect").await;

        assert!(matches!(result, Err(UserError::IncorrectEmailOrPassword)));
    }

    #[tokio::test]
    async fn test_profile() {
        let service = service();
        let created = service
            .register("Profile", "profile@test.com", "1234")
            .await
            .unwrap();

        let user = service.profile(created.id).await.unwrap();
        assert_eq!(user.email, "profile@test.com");

        let missing = service.profile(UserId::new()).await;
        assert!(matches!(missing, Err(UserError::UserNotFound)));
    }
}
