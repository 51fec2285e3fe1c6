// Facades used by the console: customer-facing booking and administration.
// Both delegate to a shared ReservationStore and CustomerDirectory.

use std::{
    io::{self, Write},
    sync::Arc,
};

use chrono::NaiveDate;
use tracing::debug;

use crate::customer_service::CustomerDirectory;
use crate::model::{Customer, CustomerError, Reservation, Room, RoomType};
use crate::reservation_service::{ReservationError, ReservationStore};

#[derive(Debug, Clone)]
pub struct HotelResource {
    store: Arc<ReservationStore>,
    customers: Arc<CustomerDirectory>,
}

impl HotelResource {
    pub fn new(store: Arc<ReservationStore>, customers: Arc<CustomerDirectory>) -> Self {
        Self { store, customers }
    }

    pub fn get_customer(&self, email: &str) -> Option<Customer> {
        self.customers.get_customer(email)
    }

    pub fn create_a_customer(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Customer, CustomerError> {
        self.customers.add_customer(email, first_name, last_name)
    }

    pub fn get_room(&self, room_number: &str) -> Option<Room> {
        self.store.get_room(room_number)
    }

    /// Books `room` for the customer registered under `email`.
    /// An unknown email fails the same way as a missing customer.
    pub fn book_a_room(
        &self,
        email: &str,
        room: Option<&Room>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation, ReservationError> {
        let customer = self.customers.get_customer(email);
        self.store
            .reserve_a_room(customer.as_ref(), room, Some(check_in), Some(check_out))
    }

    pub fn get_customers_reservations(&self, email: &str) -> Vec<Reservation> {
        match self.customers.get_customer(email) {
            Some(customer) => self.store.get_customers_reservation(&customer),
            None => {
                debug!(%email, "Reservations requested for unknown customer");
                Vec::new()
            }
        }
    }

    pub fn find_a_room(&self, check_in: NaiveDate, check_out: NaiveDate) -> Vec<Room> {
        self.store.find_rooms(check_in, check_out)
    }

    pub fn find_alternative_rooms(&self, check_in: NaiveDate, check_out: NaiveDate) -> Vec<Room> {
        self.store.find_alternative_rooms(check_in, check_out)
    }

    pub fn add_default_plus_days(&self, date: NaiveDate) -> NaiveDate {
        self.store.add_default_plus_days(date)
    }

    pub fn cancel_reservation(&self, email: &str, room_number: &str, check_in: NaiveDate) -> bool {
        let customer = self.customers.get_customer(email);
        self.store
            .cancel_reservation(customer.as_ref(), Some(room_number), Some(check_in))
    }

    pub fn get_available_rooms_by_type(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: RoomType,
    ) -> Vec<Room> {
        self.store
            .get_available_rooms_by_type(Some(check_in), Some(check_out), Some(room_type))
    }

    pub fn get_reservation_history(&self, email: &str) -> Vec<Reservation> {
        let customer = self.customers.get_customer(email);
        self.store.get_customer_reservation_history(customer.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct AdminResource {
    store: Arc<ReservationStore>,
    customers: Arc<CustomerDirectory>,
}

impl AdminResource {
    pub fn new(store: Arc<ReservationStore>, customers: Arc<CustomerDirectory>) -> Self {
        Self { store, customers }
    }

    pub fn get_customer(&self, email: &str) -> Option<Customer> {
        self.customers.get_customer(email)
    }

    pub fn add_room(&self, rooms: Vec<Room>) {
        for room in rooms {
            self.store.add_room(room);
        }
    }

    pub fn get_all_rooms(&self) -> Vec<Room> {
        self.store.get_all_rooms()
    }

    pub fn get_all_customers(&self) -> Vec<Customer> {
        self.customers.get_all_customers()
    }

    pub fn display_all_reservations(&self, out: &mut impl Write) -> io::Result<()> {
        self.store.print_all_reservation(out)
    }

    pub fn find_most_popular_room(&self) -> Option<String> {
        self.store.find_most_popular_room()
    }
}
