// Customer directory: email -> customer profile, unique by email

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::{info, warn};

use crate::model::{Customer, CustomerError};

#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: DashMap<String, Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a new customer. An email can only be registered once.
    pub fn add_customer(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Customer, CustomerError> {
        let customer = Customer::new(email, first_name, last_name).map_err(|e| {
            warn!(%email, error = %e, "Customer rejected");
            e
        })?;

        match self.customers.entry(customer.email.clone()) {
            Entry::Occupied(_) => {
                warn!(%email, "Customer rejected, email already registered");
                Err(CustomerError::DuplicateEmail(customer.email))
            }
            Entry::Vacant(slot) => {
                slot.insert(customer.clone());
                info!(%email, "Customer created");
                Ok(customer)
            }
        }
    }

    pub fn get_customer(&self, email: &str) -> Option<Customer> {
        self.customers.get(email).map(|c| c.value().clone())
    }

    /// All customers, ordered by email.
    pub fn get_all_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> =
            self.customers.iter().map(|c| c.value().clone()).collect();
        customers.sort_by(|a, b| a.email.cmp(&b.email));
        customers
    }

    pub fn clear_all_customers(&self) {
        self.customers.clear();
    }
}
