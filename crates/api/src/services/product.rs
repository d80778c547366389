use catalog_core::error::CoreError;
use catalog_core::pagination::{PageRequest, Paginated};
use catalog_core::types::DbId;
use catalog_db::models::product::{CreateProduct, Product, UpdateProduct};
use catalog_db::repositories::{CategoryRepo, ProductRepo};
use sqlx::PgPool;

use super::{ServiceError, ServiceResult};

const ENTITY: &str = "Product";

fn not_found(id: DbId) -> ServiceError {
    CoreError::NotFound { entity: ENTITY, id }.into()
}

/// Fail with `MissingReference` unless the category exists.
///
/// The check and the following write are separate statements; the foreign
/// key still rejects a category deleted in between.
async fn ensure_category(pool: &PgPool, category_id: DbId) -> ServiceResult<()> {
    match CategoryRepo::find_by_id(pool, category_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::MissingReference {
            entity: "Category",
            id: category_id,
        }
        .into()),
    }
}

pub struct ProductService;

impl ProductService {
    /// One page of products, newest first, optionally within one category.
    pub async fn list(
        pool: &PgPool,
        page: PageRequest,
        category_id: Option<DbId>,
    ) -> ServiceResult<Paginated<Product>> {
        let total = ProductRepo::count(pool, category_id).await?;
        let products =
            ProductRepo::list_page(pool, category_id, page.limit, page.offset()).await?;
        Ok(Paginated::new(products, page, total))
    }

    pub async fn get(pool: &PgPool, id: DbId) -> ServiceResult<Product> {
        ProductRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(pool: &PgPool, input: &CreateProduct) -> ServiceResult<Product> {
        ensure_category(pool, input.category_id).await?;

        let id = ProductRepo::create(pool, input).await?;
        tracing::info!(product_id = id, category_id = input.category_id, "Product created");
        Self::get(pool, id).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> ServiceResult<Product> {
        Self::get(pool, id).await?;

        if let Some(category_id) = input.category_id {
            ensure_category(pool, category_id).await?;
        }

        if !ProductRepo::update(pool, id, input).await? {
            return Err(not_found(id));
        }
        tracing::info!(product_id = id, "Product updated");
        Self::get(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> ServiceResult<()> {
        if !ProductRepo::delete(pool, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
