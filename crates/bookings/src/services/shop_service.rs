//! Shop service.

use salon_database::{DatabaseResult, NewShop, Shop, ShopRepository, ShopUpdate, SqlitePool};
use tracing::info;

use crate::types::{CreateShopRequest, SalonError, SalonResult, UpdateShopRequest};
use crate::utils::validation::{is_present, non_blank_update, require_fields};

/// Service for managing shops
pub struct ShopService<R = ShopRepository> {
    repository: R,
}

impl ShopService<ShopRepository> {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self::new(ShopRepository::new(pool))
    }
}

impl<R> ShopService<R>
where
    R: ShopRepo,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn create_shop(&self, request: CreateShopRequest) -> SalonResult<Shop> {
        require_fields(&[
            ("Name", is_present(&request.name)),
            ("Address", is_present(&request.address)),
        ])?;

        let shop = self
            .repository
            .create(&NewShop {
                name: request.name.trim().to_string(),
                address: request.address.trim().to_string(),
            })
            .await?;

        info!(shop_id = %shop.public_id, name = %shop.name, "shop created");
        Ok(shop)
    }

    pub async fn get_shop(&self, public_id: &str) -> SalonResult<Shop> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("shop", public_id))
    }

    /// All shops, oldest first.
    pub async fn list_shops(&self) -> SalonResult<Vec<Shop>> {
        Ok(self.repository.list().await?)
    }

    pub async fn update_shop(&self, public_id: &str, request: UpdateShopRequest) -> SalonResult<Shop> {
        let update = ShopUpdate {
            name: non_blank_update("Name", request.name)?,
            address: non_blank_update("Address", request.address)?,
        };

        self.repository
            .update(public_id, &update)
            .await?
            .ok_or_else(|| SalonError::not_found("shop", public_id))
    }

    /// Resolve a shop's public id to its internal key, failing when it does not exist.
    pub async fn ensure_exists(&self, public_id: &str) -> SalonResult<i64> {
        self.repository
            .find_id_by_public_id(public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("shop", public_id))
    }
}

/// Storage operations the shop service needs.
#[allow(async_fn_in_trait)]
pub trait ShopRepo {
    async fn create(&self, request: &NewShop) -> DatabaseResult<Shop>;
    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Shop>>;
    async fn find_id_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<i64>>;
    async fn list(&self) -> DatabaseResult<Vec<Shop>>;
    async fn update(&self, public_id: &str, update: &ShopUpdate) -> DatabaseResult<Option<Shop>>;
}

impl ShopRepo for ShopRepository {
    async fn create(&self, request: &NewShop) -> DatabaseResult<Shop> {
        self.create(request).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Shop>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_id_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<i64>> {
        self.find_id_by_public_id(public_id).await
    }

    async fn list(&self) -> DatabaseResult<Vec<Shop>> {
        self.list().await
    }

    async fn update(&self, public_id: &str, update: &ShopUpdate) -> DatabaseResult<Option<Shop>> {
        self.update(public_id, update).await
    }
}
