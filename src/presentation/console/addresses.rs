//! Address deletion controller.

use std::sync::Arc;

use super::{describe, FormFlow, Notifier};
use crate::application::services::{AddressError, AddressService};
use crate::domain::Address;

pub struct AddressDeletionController {
    service: Arc<dyn AddressService>,
    notifier: Arc<dyn Notifier>,
    flow: FormFlow<Address>,
}

impl AddressDeletionController {
    pub fn new(service: Arc<dyn AddressService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            flow: FormFlow::default(),
        }
    }

    pub fn flow(&self) -> &FormFlow<Address> {
        &self.flow
    }

    /// Pick an address. One that still hosts classes is refused here,
    /// before any confirmation is asked.
    pub async fn select(&mut self, id: i64) -> bool {
        let address = match self.service.view_address(id).await {
            Ok(address) => address,
            Err(e) => {
                self.notifier.error(&describe(e));
                return false;
            }
        };

        if address.has_classes() {
            let refusal = AddressError::HasAssociatedClasses {
                classes: address.associated_classes,
            };
            self.notifier.error(&describe(refusal));
            return false;
        }

        self.notifier
            .info(&format!("Delete address {}?", address.full_address()));
        self.flow.ask(address);
        true
    }

    pub async fn confirm(&mut self) -> bool {
        let address = match self.flow.confirm() {
            Ok(address) => address,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return false;
            }
        };

        match self.service.delete_address(address.id).await {
            Ok(()) => {
                self.notifier.success("Address deleted successfully");
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.flow.cancel() {
            self.notifier.cancelled("Address deletion cancelled");
        }
    }
}
