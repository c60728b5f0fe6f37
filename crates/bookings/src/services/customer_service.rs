//! Customer service.

use salon_database::{
    Customer, CustomerRepository, CustomerUpdate, DatabaseResult, NewCustomer, SqlitePool,
};
use tracing::{info, warn};

use crate::types::{
    Credentials, CustomerSignupRequest, SalonError, SalonResult, UpdateCustomerRequest,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{
    is_present, non_blank_update, normalize_email, optional_text, require_fields, validate_email,
};

/// Service for managing customers
pub struct CustomerService<R = CustomerRepository> {
    repository: R,
}

impl CustomerService<CustomerRepository> {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self::new(CustomerRepository::new(pool))
    }
}

impl<R> CustomerService<R>
where
    R: CustomerRepo,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn sign_up(&self, request: CustomerSignupRequest) -> SalonResult<Customer> {
        require_fields(&[
            ("First Name", is_present(&request.first_name)),
            ("Last Name", is_present(&request.last_name)),
            ("Email", is_present(&request.email)),
            ("Password", is_present(&request.password)),
        ])?;

        let email = normalize_email(&request.email);
        validate_email(&email)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(SalonError::conflict(format!("a customer with email {email} already exists")));
        }

        let customer = self
            .repository
            .create(&NewCustomer {
                email,
                password_hash: hash_password(&request.password)?,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                phone: optional_text(request.phone),
            })
            .await?;

        info!(customer_id = %customer.public_id, "customer signed up");
        Ok(customer)
    }

    pub async fn get_customer(&self, public_id: &str) -> SalonResult<Customer> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("customer", public_id))
    }

    pub async fn update_customer(&self, public_id: &str, request: UpdateCustomerRequest) -> SalonResult<Customer> {
        let update = CustomerUpdate {
            first_name: non_blank_update("First Name", request.first_name)?,
            last_name: non_blank_update("Last Name", request.last_name)?,
            phone: optional_text(request.phone),
        };

        self.repository
            .update(public_id, &update)
            .await?
            .ok_or_else(|| SalonError::not_found("customer", public_id))
    }

    pub async fn authenticate(&self, credentials: Credentials) -> SalonResult<Customer> {
        let email = normalize_email(&credentials.email);

        let Some(customer) = self.repository.find_by_email(&email).await? else {
            warn!(email = %email, "customer login for unknown email");
            return Err(SalonError::AuthenticationFailed);
        };

        if !verify_password(&credentials.password, &customer.password_hash) {
            warn!(customer_id = %customer.public_id, "customer login with wrong password");
            return Err(SalonError::AuthenticationFailed);
        }

        Ok(customer)
    }
}

/// Storage operations the customer service needs.
#[allow(async_fn_in_trait)]
pub trait CustomerRepo {
    async fn create(&self, request: &NewCustomer) -> DatabaseResult<Customer>;
    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Customer>>;
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Customer>>;
    async fn update(&self, public_id: &str, update: &CustomerUpdate) -> DatabaseResult<Option<Customer>>;
}

impl CustomerRepo for CustomerRepository {
    async fn create(&self, request: &NewCustomer) -> DatabaseResult<Customer> {
        self.create(request).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Customer>> {
        self.find_by_public_id(public_id).await
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Customer>> {
        self.find_by_email(email).await
    }

    async fn update(&self, public_id: &str, update: &CustomerUpdate) -> DatabaseResult<Option<Customer>> {
        self.update(public_id, update).await
    }
}
