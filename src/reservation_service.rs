// Reservation bookkeeping: the room catalog and the reservation ledger.
// Every booking, availability and popularity query goes through ReservationStore.

use std::{
    collections::{BTreeMap, HashSet},
    io::{self, Write},
};

use chrono::{Days, NaiveDate};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::model::{Customer, Reservation, Room, RoomType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Room {room_number} already booked for period {check_in} - {check_out}")]
    Conflict {
        room_number: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// Single source of truth for rooms and reservations.
///
/// The catalog and the ledger each sit behind their own lock. Booking holds
/// the ledger write lock across the conflict scan and the insert, so two
/// concurrent bookings of the same room can never both succeed.
#[derive(Debug, Default)]
pub struct ReservationStore {
    config: StoreConfig,
    // room number -> room
    rooms: RwLock<BTreeMap<String, Room>>,
    // customer email -> reservations in booking order
    reservations: RwLock<BTreeMap<String, Vec<Reservation>>>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Inserts the room, replacing any room already stored under the same number.
    pub fn add_room(&self, room: Room) {
        let number = room.room_number.clone();
        if self.rooms.write().insert(number.clone(), room).is_some() {
            info!(room_number = %number, "Room replaced");
        } else {
            info!(room_number = %number, "Room added");
        }
    }

    pub fn get_room(&self, room_number: &str) -> Option<Room> {
        self.rooms.read().get(room_number).cloned()
    }

    /// Every room in the catalog, ordered by room number.
    pub fn get_all_rooms(&self) -> Vec<Room> {
        self.rooms.read().values().cloned().collect()
    }

    pub fn reserve_a_room(
        &self,
        customer: Option<&Customer>,
        room: Option<&Room>,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<Reservation, ReservationError> {
        let customer = customer.ok_or(ReservationError::InvalidArgument("customer"))?;
        let room = room.ok_or(ReservationError::InvalidArgument("room"))?;
        let (check_in, check_out) = match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => return Err(ReservationError::InvalidArgument("dates")),
        };
        if check_in >= check_out {
            return Err(ReservationError::InvalidArgument(
                "check-in must precede check-out",
            ));
        }

        let mut ledger = self.reservations.write();

        let conflict = ledger.values().flatten().any(|existing| {
            existing.room.room_number == room.room_number && existing.overlaps(check_in, check_out)
        });
        if conflict {
            warn!(
                room_number = %room.room_number,
                %check_in,
                %check_out,
                "Booking rejected, room already booked for period"
            );
            return Err(ReservationError::Conflict {
                room_number: room.room_number.clone(),
                check_in,
                check_out,
            });
        }

        let reservation = Reservation::new(customer.clone(), room.clone(), check_in, check_out);
        ledger
            .entry(customer.email.clone())
            .or_default()
            .push(reservation.clone());

        info!(
            email = %customer.email,
            room_number = %room.room_number,
            %check_in,
            %check_out,
            "Room reserved"
        );

        Ok(reservation)
    }

    /// Rooms with no reservation overlapping `[check_in, check_out)`.
    pub fn find_rooms(&self, check_in: NaiveDate, check_out: NaiveDate) -> Vec<Room> {
        let blocked: HashSet<String> = self
            .reservations
            .read()
            .values()
            .flatten()
            .filter(|reservation| reservation.overlaps(check_in, check_out))
            .map(|reservation| reservation.room.room_number.clone())
            .collect();

        let available: Vec<Room> = self
            .rooms
            .read()
            .values()
            .filter(|room| !blocked.contains(&room.room_number))
            .cloned()
            .collect();

        debug!(
            %check_in,
            %check_out,
            available = available.len(),
            blocked = blocked.len(),
            "Room search"
        );

        available
    }

    /// Same as `find_rooms` on the window shifted forward by the default offset.
    pub fn find_alternative_rooms(&self, check_in: NaiveDate, check_out: NaiveDate) -> Vec<Room> {
        self.find_rooms(
            self.add_default_plus_days(check_in),
            self.add_default_plus_days(check_out),
        )
    }

    /// `date` plus the alternative-search offset (7 days by default).
    /// Saturates at the last representable date.
    pub fn add_default_plus_days(&self, date: NaiveDate) -> NaiveDate {
        date.checked_add_days(Days::new(self.config.alternative_offset_days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Removes the first reservation of `customer` for `room_number` starting
    /// exactly on `check_in`. Returns whether one was removed.
    pub fn cancel_reservation(
        &self,
        customer: Option<&Customer>,
        room_number: Option<&str>,
        check_in: Option<NaiveDate>,
    ) -> bool {
        let (Some(customer), Some(room_number), Some(check_in)) = (customer, room_number, check_in)
        else {
            return false;
        };

        let mut ledger = self.reservations.write();
        let Some(reservations) = ledger.get_mut(&customer.email) else {
            return false;
        };

        match reservations
            .iter()
            .position(|r| r.room.room_number == room_number && r.check_in == check_in)
        {
            Some(index) => {
                reservations.remove(index);
                info!(
                    email = %customer.email,
                    %room_number,
                    %check_in,
                    "Reservation cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// The customer's reservations in booking order; empty when there are none.
    pub fn get_customers_reservation(&self, customer: &Customer) -> Vec<Reservation> {
        self.reservations
            .read()
            .get(&customer.email)
            .cloned()
            .unwrap_or_default()
    }

    /// The room number with the most reservations across the whole ledger.
    /// Ties go to the lexicographically smallest room number.
    pub fn find_most_popular_room(&self) -> Option<String> {
        let ledger = self.reservations.read();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for reservation in ledger.values().flatten() {
            *counts.entry(reservation.room.room_number.as_str()).or_default() += 1;
        }

        let mut most_popular: Option<(&str, usize)> = None;
        for (room_number, count) in counts {
            if most_popular.map_or(true, |(_, max)| count > max) {
                most_popular = Some((room_number, count));
            }
        }

        most_popular.map(|(room_number, _)| room_number.to_string())
    }

    pub fn get_available_rooms_by_type(
        &self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        room_type: Option<RoomType>,
    ) -> Vec<Room> {
        let (Some(check_in), Some(check_out), Some(room_type)) = (check_in, check_out, room_type)
        else {
            return Vec::new();
        };

        self.find_rooms(check_in, check_out)
            .into_iter()
            .filter(|room| room.room_type == room_type)
            .collect()
    }

    /// The customer's reservations, most recent check-in first.
    pub fn get_customer_reservation_history(&self, customer: Option<&Customer>) -> Vec<Reservation> {
        let Some(customer) = customer else {
            return Vec::new();
        };

        let mut history = self.get_customers_reservation(customer);
        history.sort_by(|a, b| b.check_in.cmp(&a.check_in));
        history
    }

    /// The whole ledger flattened, ordered by customer email then booking order.
    pub fn all_reservations(&self) -> Vec<Reservation> {
        self.reservations.read().values().flatten().cloned().collect()
    }

    pub fn print_all_reservation(&self, out: &mut impl Write) -> io::Result<()> {
        let reservations = self.all_reservations();

        if reservations.is_empty() {
            writeln!(out, "No reservations found.")?;
        } else {
            for reservation in reservations {
                writeln!(out, "{}\n", reservation)?;
            }
        }

        Ok(())
    }

    pub fn clear_all_rooms(&self) {
        self.rooms.write().clear();
    }

    pub fn clear_all_reservations(&self) {
        self.reservations.write().clear();
    }

    pub fn reset(&self) {
        self.clear_all_reservations();
        self.clear_all_rooms();
    }
}
