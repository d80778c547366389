use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CreateCategory, UpdateCategory};
use catalog_db::repositories::CategoryRepo;
use sqlx::PgPool;

use super::{ServiceError, ServiceResult};

const ENTITY: &str = "Category";

fn not_found(id: DbId) -> ServiceError {
    CoreError::NotFound { entity: ENTITY, id }.into()
}

fn duplicate_name(name: &str) -> ServiceError {
    CoreError::Conflict(format!("Category {name} already exists")).into()
}

pub struct CategoryService;

impl CategoryService {
    /// All categories, ordered by name.
    pub async fn list(pool: &PgPool) -> ServiceResult<Vec<Category>> {
        Ok(CategoryRepo::list(pool).await?)
    }

    pub async fn get(pool: &PgPool, id: DbId) -> ServiceResult<Category> {
        CategoryRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(pool: &PgPool, input: &CreateCategory) -> ServiceResult<Category> {
        if CategoryRepo::find_by_name(pool, &input.name).await?.is_some() {
            return Err(duplicate_name(&input.name));
        }

        let id = CategoryRepo::create(pool, input).await?;
        tracing::info!(category_id = id, "Category created");
        Self::get(pool, id).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> ServiceResult<Category> {
        Self::get(pool, id).await?;

        if let Some(name) = &input.name {
            if let Some(existing) = CategoryRepo::find_by_name(pool, name).await? {
                if existing.id != id {
                    return Err(duplicate_name(name));
                }
            }
        }

        if !CategoryRepo::update(pool, id, input).await? {
            return Err(not_found(id));
        }
        tracing::info!(category_id = id, "Category updated");
        Self::get(pool, id).await
    }

    /// Products in the category keep existing with `category_id` set to `NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> ServiceResult<()> {
        if !CategoryRepo::delete(pool, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
