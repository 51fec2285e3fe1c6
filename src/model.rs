// Domain types shared by the reservation store, the customer directory and the console

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidateEmail;

// Error types for customer records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Invalid email: {0}. Expected format: name@domain.com")]
    InvalidEmail(String),

    #[error("Missing required field: {0}")]
    MissingName(&'static str),

    #[error("A customer with email {0} already exists")]
    DuplicateEmail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomType {
    Single,
    Double,
}

impl RoomType {
    // Console labels: 1 for single bed, 2 for double bed
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "1" => Some(RoomType::Single),
            "2" => Some(RoomType::Double),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Single => "1",
            RoomType::Double => "2",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Single => write!(f, "Single bed"),
            RoomType::Double => write!(f, "Double bed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_number: String,
    pub price: f64,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(room_number: impl Into<String>, price: f64, room_type: RoomType) -> Self {
        Self {
            room_number: room_number.into(),
            price,
            room_type,
        }
    }

    /// A complimentary room, priced at zero.
    pub fn free(room_number: impl Into<String>, room_type: RoomType) -> Self {
        Self::new(room_number, 0.0, room_type)
    }

    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            write!(
                f,
                "Room Number: {} {} Room Price: Free",
                self.room_number, self.room_type
            )
        } else {
            write!(
                f,
                "Room Number: {} {} Room Price: ${:.2}",
                self.room_number, self.room_type, self.price
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Customer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, CustomerError> {
        let email: String = email.into();
        let first_name: String = first_name.into();
        let last_name: String = last_name.into();

        if !email.validate_email() {
            return Err(CustomerError::InvalidEmail(email));
        }
        if first_name.trim().is_empty() {
            return Err(CustomerError::MissingName("first name"));
        }
        if last_name.trim().is_empty() {
            return Err(CustomerError::MissingName("last name"));
        }

        Ok(Self {
            email,
            first_name,
            last_name,
        })
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "First Name: {} Last Name: {} Email: {}",
            self.first_name, self.last_name, self.email
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub customer: Customer,
    pub room: Room,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Reservation {
    pub fn new(customer: Customer, room: Room, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            customer,
            room,
            check_in,
            check_out,
        }
    }

    /// Half-open overlap: `[check_in, check_out)` against `[self.check_in, self.check_out)`.
    /// A stay ending on the day another begins does not overlap it.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        check_in < self.check_out && self.check_in < check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Customer: {} {}",
            self.customer.first_name, self.customer.last_name
        )?;
        writeln!(f, "Email: {}", self.customer.email)?;
        writeln!(f, "{}", self.room)?;
        writeln!(f, "Check-In Date: {}", self.check_in.format("%a %b %d %Y"))?;
        writeln!(f, "Check-Out Date: {}", self.check_out.format("%a %b %d %Y"))?;
        write!(f, "Nights: {}", self.nights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_customer_validation() {
        let customer = Customer::new("jane@domain.com", "Jane", "Doe").unwrap();
        assert_eq!(customer.email, "jane@domain.com");

        assert_eq!(
            Customer::new("invalid-email", "Jane", "Doe"),
            Err(CustomerError::InvalidEmail("invalid-email".to_string()))
        );
        assert_eq!(
            Customer::new("jane@domain.com", "  ", "Doe"),
            Err(CustomerError::MissingName("first name"))
        );
        assert_eq!(
            Customer::new("jane@domain.com", "Jane", ""),
            Err(CustomerError::MissingName("last name"))
        );
    }

    #[test]
    fn test_room_type_labels() {
        assert_eq!(RoomType::from_label("1"), Some(RoomType::Single));
        assert_eq!(RoomType::from_label(" 2 "), Some(RoomType::Double));
        assert_eq!(RoomType::from_label("3"), None);
        assert_eq!(RoomType::Double.label(), "2");
    }

    #[test]
    fn test_free_room() {
        let room = Room::free("101", RoomType::Single);
        assert!(room.is_free());
        assert_eq!(room.to_string(), "Room Number: 101 Single bed Room Price: Free");

        let paid = Room::new("102", 150.0, RoomType::Double);
        assert!(!paid.is_free());
        assert_eq!(
            paid.to_string(),
            "Room Number: 102 Double bed Room Price: $150.00"
        );
    }

    #[test]
    fn test_overlap_is_half_open() {
        let customer = Customer::new("a@b.com", "A", "B").unwrap();
        let room = Room::new("101", 100.0, RoomType::Single);
        let reservation = Reservation::new(customer, room, date(2025, 1, 1), date(2025, 1, 5));

        assert!(reservation.overlaps(date(2025, 1, 3), date(2025, 1, 8)));
        assert!(reservation.overlaps(date(2024, 12, 30), date(2025, 1, 2)));
        assert!(reservation.overlaps(date(2025, 1, 2), date(2025, 1, 3)));
        // touching endpoints
        assert!(!reservation.overlaps(date(2025, 1, 5), date(2025, 1, 10)));
        assert!(!reservation.overlaps(date(2024, 12, 28), date(2025, 1, 1)));
        assert_eq!(reservation.nights(), 4);
    }

    #[test]
    fn test_reservation_display() {
        let customer = Customer::new("a@b.com", "Ann", "Bee").unwrap();
        let room = Room::new("101", 100.0, RoomType::Single);
        let reservation = Reservation::new(customer, room, date(2025, 1, 1), date(2025, 1, 5));

        assert_eq!(
            reservation.to_string(),
            "Customer: Ann Bee\n\
             Email: a@b.com\n\
             Room Number: 101 Single bed Room Price: $100.00\n\
             Check-In Date: Wed Jan 01 2025\n\
             Check-Out Date: Sun Jan 05 2025\n\
             Nights: 4"
        );
    }
}
