//! Blob metadata service.

use salon_database::{
    Blob, BlobRepository, CustomerRepository, DatabaseResult, NewBlob, StylistRepository,
};
use tracing::info;

use super::customer_service::CustomerRepo;
use super::stylist_service::StylistRepo;
use crate::types::{CreateBlobRequest, SalonError, SalonResult};
use crate::utils::validation::{is_present, require_fields};

/// Service for blob metadata owned by stylists or customers
pub struct BlobService<B = BlobRepository, S = StylistRepository, C = CustomerRepository> {
    repository: B,
    stylists: S,
    customers: C,
}

impl<B, S, C> BlobService<B, S, C>
where
    B: BlobRepo,
    S: StylistRepo,
    C: CustomerRepo,
{
    pub fn new(repository: B, stylists: S, customers: C) -> Self {
        Self {
            repository,
            stylists,
            customers,
        }
    }

    pub async fn create_blob(&self, request: CreateBlobRequest) -> SalonResult<Blob> {
        require_fields(&[
            ("Type", is_present(&request.blob_type)),
            ("File Name", is_present(&request.file_name)),
            ("User Id", is_present(&request.user_id)),
        ])?;

        let user_id = request.user_id.trim();
        if !self.owner_exists(user_id).await? {
            return Err(SalonError::not_found("user", user_id));
        }

        let blob = self
            .repository
            .create(&NewBlob {
                blob_type: request.blob_type.trim().to_string(),
                file_name: request.file_name.trim().to_string(),
                user_id: user_id.to_string(),
            })
            .await?;

        info!(blob_id = %blob.public_id, user_id = %blob.user_id, "blob recorded");
        Ok(blob)
    }

    pub async fn get_blob(&self, public_id: &str) -> SalonResult<Blob> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("blob", public_id))
    }

    pub async fn list_for_user(&self, user_public_id: &str) -> SalonResult<Vec<Blob>> {
        Ok(self.repository.list_by_user(user_public_id).await?)
    }

    async fn owner_exists(&self, user_id: &str) -> SalonResult<bool> {
        if self.stylists.find_by_public_id(user_id).await?.is_some() {
            return Ok(true);
        }
        Ok(self.customers.find_by_public_id(user_id).await?.is_some())
    }
}

/// Storage operations the blob service needs.
#[allow(async_fn_in_trait)]
pub trait BlobRepo {
    async fn create(&self, request: &NewBlob) -> DatabaseResult<Blob>;
    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Blob>>;
    async fn list_by_user(&self, user_public_id: &str) -> DatabaseResult<Vec<Blob>>;
}

impl BlobRepo for BlobRepository {
    async fn create(&self, request: &NewBlob) -> DatabaseResult<Blob> {
        self.create(request).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Blob>> {
        self.find_by_public_id(public_id).await
    }

    async fn list_by_user(&self, user_public_id: &str) -> DatabaseResult<Vec<Blob>> {
        self.list_by_user(user_public_id).await
    }
}
