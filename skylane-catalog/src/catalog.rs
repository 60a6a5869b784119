use std::path::PathBuf;

use skylane_store::{StoreError, Table};

use crate::flight::{Flight, NewFlight, MAX_CITY_LEN, MAX_TIME_LEN, SEAT_CAPACITY};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Flight number already exists: {0}")]
    DuplicateFlightNumber(u32),

    #[error("Flight not found: {0}")]
    NotFound(u32),

    #[error("Invalid flight data: {0}")]
    Validation(&'static str),
}

/// Flight inventory operations over the flight table.
#[derive(Debug, Clone)]
pub struct FlightCatalog {
    table: Table<Flight>,
}

impl FlightCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    /// Register a new flight with a full complement of seats.
    ///
    /// The flight number must be unused by any stored flight, including
    /// ones whose seats are exhausted.
    pub fn add(&self, new_flight: NewFlight) -> Result<Flight, CatalogError> {
        if new_flight.destination.is_empty() || new_flight.destination.len() > MAX_CITY_LEN {
            return Err(CatalogError::Validation("destination must be 1-49 bytes"));
        }
        if new_flight.departure.is_empty() || new_flight.departure.len() > MAX_CITY_LEN {
            return Err(CatalogError::Validation("departure must be 1-49 bytes"));
        }
        if new_flight.departure_time.len() > MAX_TIME_LEN {
            return Err(CatalogError::Validation("departure time must be at most 9 bytes"));
        }
        if !new_flight.fare.is_finite() || new_flight.fare < 0.0 {
            return Err(CatalogError::Validation("fare must be non-negative"));
        }
        if self.find(new_flight.flight_number)?.is_some() {
            return Err(CatalogError::DuplicateFlightNumber(new_flight.flight_number));
        }

        let flight = Flight {
            flight_number: new_flight.flight_number,
            destination: new_flight.destination,
            departure: new_flight.departure,
            departure_time: new_flight.departure_time,
            fare: new_flight.fare,
            available_seats: SEAT_CAPACITY,
        };
        self.table.append(&flight)?;
        tracing::info!(flight = flight.flight_number, "flight added to catalog");
        Ok(flight)
    }

    /// Whether the flight exists and still has seats to sell.
    pub fn exists(&self, flight_number: u32) -> Result<bool, CatalogError> {
        Ok(self
            .find(flight_number)?
            .map_or(false, |flight| flight.available_seats > 0))
    }

    /// Current fare for the flight, sold out or not.
    pub fn fare(&self, flight_number: u32) -> Result<f64, CatalogError> {
        match self.find(flight_number)? {
            Some(flight) => Ok(flight.fare),
            None => Err(CatalogError::NotFound(flight_number)),
        }
    }

    /// Apply `delta` to the flight's seat count.
    ///
    /// Returns whether the count was changed. A delta that would leave the
    /// count outside `0..=SEAT_CAPACITY`, or a flight number with no stored
    /// flight, changes nothing and reports `false`.
    pub fn adjust_seats(&self, flight_number: u32, delta: i32) -> Result<bool, CatalogError> {
        let flight = match self.find(flight_number)? {
            Some(flight) => flight,
            None => return Ok(false),
        };

        let new_seats = i64::from(flight.available_seats) + i64::from(delta);
        if new_seats < 0 || new_seats > i64::from(SEAT_CAPACITY) {
            return Ok(false);
        }
        let new_seats = new_seats as u32;

        let matched = self.table.rewrite_where(
            |f| f.flight_number == flight_number,
            |mut f| {
                f.available_seats = new_seats;
                Some(f)
            },
        )?;
        Ok(matched)
    }

    /// Remove the flight record. Reservations referencing it are untouched.
    pub fn delete(&self, flight_number: u32) -> Result<bool, CatalogError> {
        let removed = self
            .table
            .rewrite_where(|f| f.flight_number == flight_number, |_| None)?;
        if removed {
            tracing::info!(flight = flight_number, "flight removed from catalog");
        }
        Ok(removed)
    }

    /// Flights with at least one open seat, in insertion order.
    pub fn list_available(&self) -> Result<Vec<Flight>, CatalogError> {
        let mut flights = Vec::new();
        for flight in self.table.scan()? {
            let flight = flight?;
            if flight.available_seats > 0 {
                flights.push(flight);
            }
        }
        Ok(flights)
    }

    /// Every stored flight, sold out ones included.
    pub fn list_all(&self) -> Result<Vec<Flight>, CatalogError> {
        let mut flights = Vec::new();
        for flight in self.table.scan()? {
            flights.push(flight?);
        }
        Ok(flights)
    }

    fn find(&self, flight_number: u32) -> Result<Option<Flight>, CatalogError> {
        for flight in self.table.scan()? {
            let flight = flight?;
            if flight.flight_number == flight_number {
                return Ok(Some(flight));
            }
        }
        Ok(None)
    }
}
