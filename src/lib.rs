// Main library file for the hotel reservation application

// The core: rooms, reservations, availability and popularity
pub mod reservation_service;

// Peripheral collaborators and the console surface
pub mod api;
pub mod config;
pub mod customer_service;
pub mod logging;
pub mod menu;
pub mod model;

// Re-export key types for convenience
pub use api::{AdminResource, HotelResource};
pub use config::{AppConfig, StoreConfig};
pub use customer_service::CustomerDirectory;
pub use menu::Console;
pub use model::{Customer, CustomerError, Reservation, Room, RoomType};
pub use reservation_service::{ReservationError, ReservationStore};
