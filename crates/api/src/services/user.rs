use catalog_core::error::CoreError;
use catalog_core::pagination::{PageRequest, Paginated};
use catalog_core::types::DbId;
use catalog_db::models::user::{CreateUser, UpdateUser, User};
use catalog_db::repositories::UserRepo;
use sqlx::PgPool;

use super::{ServiceError, ServiceResult};

const ENTITY: &str = "User";

fn not_found(id: DbId) -> ServiceError {
    CoreError::NotFound { entity: ENTITY, id }.into()
}

fn duplicate_email(email: &str) -> ServiceError {
    CoreError::Conflict(format!("Email {email} is already registered")).into()
}

pub struct UserService;

impl UserService {
    /// One page of users, newest first.
    pub async fn list(pool: &PgPool, page: PageRequest) -> ServiceResult<Paginated<User>> {
        let total = UserRepo::count(pool).await?;
        let users = UserRepo::list_page(pool, page.limit, page.offset()).await?;
        Ok(Paginated::new(users, page, total))
    }

    pub async fn get(pool: &PgPool, id: DbId) -> ServiceResult<User> {
        UserRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Reject a taken email up front; the unique constraint covers the race.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> ServiceResult<User> {
        if UserRepo::find_by_email(pool, &input.email).await?.is_some() {
            return Err(duplicate_email(&input.email));
        }

        let id = UserRepo::create(pool, input).await?;
        tracing::info!(user_id = id, "User created");
        Self::get(pool, id).await
    }

    /// The row must exist before the email is checked against other users,
    /// so a missing id is always `NotFound`.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> ServiceResult<User> {
        Self::get(pool, id).await?;

        if let Some(email) = &input.email {
            if let Some(owner) = UserRepo::find_by_email(pool, email).await? {
                if owner.id != id {
                    return Err(duplicate_email(email));
                }
            }
        }

        if !UserRepo::update(pool, id, input).await? {
            return Err(not_found(id));
        }
        tracing::info!(user_id = id, "User updated");
        Self::get(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> ServiceResult<()> {
        if !UserRepo::delete(pool, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
