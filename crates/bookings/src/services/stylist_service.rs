//! Stylist service: signup, profile management and login.

use std::sync::Arc;

use salon_database::{
    Blob, BlobDescriptor, DatabaseResult, NewStylist, ShopRepository, Stylist, StylistQuery,
    StylistRepository, StylistUpdate,
};
use tracing::{info, warn};

use super::shop_service::{ShopRepo, ShopService};
use crate::types::{
    CreateStylistRequest, Credentials, IconUpload, SalonError, SalonResult, StylistFilter,
    StylistSignupRequest, UpdateStylistRequest,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{
    is_present, non_blank_update, normalize_email, optional_text, parse_services, require_fields,
    services_present, validate_email,
};

/// Folder in object storage that holds profile icons.
pub const ICON_FOLDER: &str = "icons";

/// Result of a stylist signup: the stored stylist and, when one was sent, its icon record.
#[derive(Debug, Clone)]
pub struct SignedUpStylist {
    pub stylist: Stylist,
    pub icon: Option<Blob>,
}

/// Service for managing stylists
pub struct StylistService<R = StylistRepository, S = ShopRepository> {
    repository: R,
    shops: Arc<ShopService<S>>,
}

impl<R, S> StylistService<R, S>
where
    R: StylistRepo,
    S: ShopRepo,
{
    pub fn new(repository: R, shops: Arc<ShopService<S>>) -> Self {
        Self { repository, shops }
    }

    pub async fn create_stylist(&self, request: CreateStylistRequest) -> SalonResult<Stylist> {
        let signed_up = self
            .sign_up(StylistSignupRequest {
                stylist: request,
                icon: None,
            })
            .await?;
        Ok(signed_up.stylist)
    }

    /// Store a new stylist with its price list, plus the icon metadata when
    /// supplied. Nothing is stored if any part is invalid.
    pub async fn sign_up(&self, request: StylistSignupRequest) -> SalonResult<SignedUpStylist> {
        let StylistSignupRequest { stylist, icon } = request;

        require_fields(&[
            ("First Name", is_present(&stylist.first_name)),
            ("Last Name", is_present(&stylist.last_name)),
            ("Services", services_present(&stylist.services)),
            ("Email", is_present(&stylist.email)),
            ("Password", is_present(&stylist.password)),
        ])?;

        let services = parse_services(&stylist.services)?;
        let email = normalize_email(&stylist.email);
        validate_email(&email)?;
        let icon = icon.map(validate_icon).transpose()?;

        let shop_id = match optional_text(stylist.shop_id) {
            Some(shop_public_id) => Some(self.shops.ensure_exists(&shop_public_id).await?),
            None => None,
        };

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(SalonError::conflict(format!("a stylist with email {email} already exists")));
        }

        let icon_path = optional_text(stylist.icon_path).or_else(|| {
            icon.as_ref()
                .map(|descriptor| format!("{ICON_FOLDER}/{}", descriptor.file_name))
        });

        let new_stylist = NewStylist {
            first_name: stylist.first_name.trim().to_string(),
            last_name: stylist.last_name.trim().to_string(),
            description: optional_text(stylist.description),
            icon_path,
            services,
            email,
            password_hash: hash_password(&stylist.password)?,
            shop_id,
        };

        let (stylist, icon) = self
            .repository
            .create_with_icon(&new_stylist, icon.as_ref())
            .await?;

        info!(
            stylist_id = %stylist.public_id,
            services = stylist.services.len(),
            with_icon = icon.is_some(),
            "stylist signed up"
        );
        Ok(SignedUpStylist { stylist, icon })
    }

    pub async fn get_stylist(&self, public_id: &str) -> SalonResult<Stylist> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("stylist", public_id))
    }

    /// Stylists matching every filter that is set. An unknown shop is an error
    /// rather than an empty list.
    pub async fn list_stylists(&self, filter: StylistFilter) -> SalonResult<Vec<Stylist>> {
        let shop_id = match optional_text(filter.shop_id) {
            Some(shop_public_id) => Some(self.shops.ensure_exists(&shop_public_id).await?),
            None => None,
        };

        Ok(self
            .repository
            .list(&StylistQuery {
                shop_id,
                service_type: filter.service_type,
            })
            .await?)
    }

    pub async fn update_stylist(&self, public_id: &str, request: UpdateStylistRequest) -> SalonResult<Stylist> {
        let services = match request.services {
            Some(entries) => Some(parse_services(&entries)?),
            None => None,
        };
        let shop_id = match optional_text(request.shop_id) {
            Some(shop_public_id) => Some(self.shops.ensure_exists(&shop_public_id).await?),
            None => None,
        };

        let update = StylistUpdate {
            first_name: non_blank_update("First Name", request.first_name)?,
            last_name: non_blank_update("Last Name", request.last_name)?,
            description: optional_text(request.description),
            icon_path: optional_text(request.icon_path),
            services,
            shop_id,
        };

        let stylist = self
            .repository
            .update(public_id, &update)
            .await?
            .ok_or_else(|| SalonError::not_found("stylist", public_id))?;

        info!(stylist_id = %stylist.public_id, "stylist updated");
        Ok(stylist)
    }

    pub async fn authenticate(&self, credentials: Credentials) -> SalonResult<Stylist> {
        let email = normalize_email(&credentials.email);

        let Some(stylist) = self.repository.find_by_email(&email).await? else {
            warn!(email = %email, "stylist login for unknown email");
            return Err(SalonError::AuthenticationFailed);
        };

        if !verify_password(&credentials.password, &stylist.password_hash) {
            warn!(stylist_id = %stylist.public_id, "stylist login with wrong password");
            return Err(SalonError::AuthenticationFailed);
        }

        Ok(stylist)
    }
}

fn validate_icon(icon: IconUpload) -> SalonResult<BlobDescriptor> {
    require_fields(&[
        ("Icon Type", is_present(&icon.blob_type)),
        ("Icon File Name", is_present(&icon.file_name)),
    ])?;

    Ok(BlobDescriptor {
        blob_type: icon.blob_type.trim().to_string(),
        file_name: icon.file_name.trim().to_string(),
    })
}

/// Storage operations the stylist service needs.
#[allow(async_fn_in_trait)]
pub trait StylistRepo {
    async fn create_with_icon(
        &self,
        request: &NewStylist,
        icon: Option<&BlobDescriptor>,
    ) -> DatabaseResult<(Stylist, Option<Blob>)>;
    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Stylist>>;
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Stylist>>;
    async fn list(&self, query: &StylistQuery) -> DatabaseResult<Vec<Stylist>>;
    async fn update(&self, public_id: &str, update: &StylistUpdate) -> DatabaseResult<Option<Stylist>>;
}

impl StylistRepo for StylistRepository {
    async fn create_with_icon(
        &self,
        request: &NewStylist,
        icon: Option<&BlobDescriptor>,
    ) -> DatabaseResult<(Stylist, Option<Blob>)> {
        self.create_with_icon(request, icon).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Stylist>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Stylist>> {
        self.find_by_email(email).await
    }

    async fn list(&self, query: &StylistQuery) -> DatabaseResult<Vec<Stylist>> {
        self.list(query).await
    }

    async fn update(&self, public_id: &str, update: &StylistUpdate) -> DatabaseResult<Option<Stylist>> {
        self.update(public_id, update).await
    }
}
