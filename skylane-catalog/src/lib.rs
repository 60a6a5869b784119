pub mod catalog;
pub mod flight;

pub use catalog::{CatalogError, FlightCatalog};
pub use flight::{Flight, NewFlight, MAX_CITY_LEN, MAX_TIME_LEN, SEAT_CAPACITY};
