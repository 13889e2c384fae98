//! Address Service
//!
//! School addresses: insert, view, list, delete. An address that still
//! hosts classes cannot be deleted.

use std::sync::Arc;

use async_trait::async_trait;

use super::OutcomeLabel;
use crate::application::dto::AddressForm;
use crate::domain::{Address, AddressRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait AddressService: Send + Sync {
    async fn list_addresses(&self) -> Result<Vec<Address>, AddressError>;

    async fn view_address(&self, id: i64) -> Result<Address, AddressError>;

    async fn insert_address(&self, form: AddressForm) -> Result<Address, AddressError>;

    async fn delete_address(&self, id: i64) -> Result<(), AddressError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("Address not found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Cannot delete address: it has associated classes ({})", .classes.join(", "))]
    HasAssociatedClasses { classes: Vec<String> },

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for AddressError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::HasAssociatedClasses { .. } => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

pub struct AddressServiceImpl<R>
where
    R: AddressRepository,
{
    address_repo: Arc<R>,
}

impl<R> AddressServiceImpl<R>
where
    R: AddressRepository,
{
    pub fn new(address_repo: Arc<R>) -> Self {
        Self { address_repo }
    }
}

#[async_trait]
impl<R> AddressService for AddressServiceImpl<R>
where
    R: AddressRepository + 'static,
{
    async fn list_addresses(&self) -> Result<Vec<Address>, AddressError> {
        Ok(self.address_repo.find_all().await?)
    }

    async fn view_address(&self, id: i64) -> Result<Address, AddressError> {
        self.address_repo
            .find_by_id(id)
            .await?
            .ok_or(AddressError::NotFound)
    }

    async fn insert_address(&self, form: AddressForm) -> Result<Address, AddressError> {
        validate_form(&form)?;

        let address = Address {
            id: self.address_repo.next_id().await?,
            name: form.name.trim().to_string(),
            street: form.street.trim().to_string(),
            city: form.city.trim().to_string(),
            zip_code: form.zip_code.trim().to_string(),
            country: form.country.trim().to_string(),
            associated_classes: form
                .associated_classes
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        };

        let saved = self.address_repo.save(&address).await?;
        tracing::info!(address_id = saved.id, name = %saved.name, "Address inserted");
        Ok(saved)
    }

    async fn delete_address(&self, id: i64) -> Result<(), AddressError> {
        let address = self
            .address_repo
            .find_by_id(id)
            .await?
            .ok_or(AddressError::NotFound)?;

        if address.has_classes() {
            tracing::info!(address_id = id, "Address deletion refused: classes still associated");
            return Err(AddressError::HasAssociatedClasses {
                classes: address.associated_classes,
            });
        }

        self.address_repo.delete(id).await?;
        tracing::info!(address_id = id, "Address deleted");
        Ok(())
    }
}
