use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use skylane_catalog::{CatalogError, FlightCatalog, SEAT_CAPACITY};
use skylane_store::{StoreError, Table};

use crate::passenger::{Gender, Passenger, PaymentMethod, MAX_AGE, MAX_NAME_LEN};
use crate::pnr::PnrGenerator;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Flight not bookable: {0}")]
    FlightUnavailable(u32),

    #[error("Seat {seat} on flight {flight_number} is not available")]
    SeatUnavailable { flight_number: u32, seat: u32 },

    #[error("Invalid passenger details: {0}")]
    InvalidPassenger(&'static str),
}

/// Details supplied by the caller when booking a seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub flight_number: u32,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub seat_number: u32,
    pub payment_method: PaymentMethod,
}

/// A booked reservation plus the state of the follow-up seat decrement.
///
/// The record append and the seat-count decrement are two separate writes.
/// When the second cannot be applied the booking still stands; the mismatch
/// is reported here instead of being rolled back.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub passenger: Passenger,
    pub seat_count_adjusted: bool,
}

/// A cancelled reservation (now inactive) plus the seat-release state.
#[derive(Debug, Clone)]
pub struct Cancellation {
    pub passenger: Passenger,
    pub seat_count_adjusted: bool,
}

/// Field changes for `modify`; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub flight_number: Option<u32>,
    pub seat_number: Option<u32>,
    pub payment_method: Option<PaymentMethod>,
}

/// A requested change that failed validation; the current value was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedChange {
    InvalidName,
    AgeOutOfRange(u8),
    FlightUnavailable(u32),
    SeatUnavailable { flight_number: u32, seat: u32 },
}

impl fmt::Display for RejectedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectedChange::InvalidName => {
                write!(f, "name must be 1-{MAX_NAME_LEN} bytes")
            }
            RejectedChange::AgeOutOfRange(age) => {
                write!(f, "age {age} is outside 1-{MAX_AGE}")
            }
            RejectedChange::FlightUnavailable(flight) => {
                write!(f, "flight {flight} does not exist or is sold out")
            }
            RejectedChange::SeatUnavailable {
                flight_number,
                seat,
            } => {
                write!(f, "seat {seat} on flight {flight_number} is not available")
            }
        }
    }
}

/// The reservation after `modify`, the changes that were not applied, and
/// the state of any cross-flight seat transfer.
#[derive(Debug, Clone)]
pub struct ModifyOutcome {
    pub passenger: Passenger,
    pub rejected: Vec<RejectedChange>,
    pub seat_counts_adjusted: bool,
}

/// Booking operations over the reservation table, with the flight catalog
/// consulted for fares and seat counts.
#[derive(Debug)]
pub struct ReservationLedger {
    table: Table<Passenger>,
    catalog: FlightCatalog,
    pnr_generator: PnrGenerator,
}

impl ReservationLedger {
    pub fn new(path: impl Into<PathBuf>, catalog: FlightCatalog, pnr_generator: PnrGenerator) -> Self {
        Self {
            table: Table::new(path),
            catalog,
            pnr_generator,
        }
    }

    /// Whether `seat` on `flight_number` can be booked right now.
    ///
    /// Seats outside `1..=SEAT_CAPACITY` are never available. Cancelled
    /// records do not hold their seat.
    pub fn is_seat_available(&self, flight_number: u32, seat: u32) -> Result<bool, LedgerError> {
        if seat == 0 || seat > SEAT_CAPACITY {
            return Ok(false);
        }
        for passenger in self.table.scan()? {
            let passenger = passenger?;
            if passenger.flight_number == flight_number
                && passenger.seat_number == seat
                && passenger.is_booked
            {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Book a seat: validate, snapshot the fare, append the record, then
    /// decrement the flight's seat count.
    pub fn book(&mut self, request: BookingRequest) -> Result<BookingOutcome, LedgerError> {
        if request.name.is_empty() || request.name.len() > MAX_NAME_LEN {
            return Err(LedgerError::InvalidPassenger("name must be 1-49 bytes"));
        }
        if request.age == 0 || request.age > MAX_AGE {
            return Err(LedgerError::InvalidPassenger("age must be within 1-120"));
        }
        if request.seat_number == 0 || request.seat_number > SEAT_CAPACITY {
            return Err(LedgerError::InvalidPassenger("seat must be within 1-100"));
        }
        if !self.catalog.exists(request.flight_number)? {
            return Err(LedgerError::FlightUnavailable(request.flight_number));
        }
        if !self.is_seat_available(request.flight_number, request.seat_number)? {
            return Err(LedgerError::SeatUnavailable {
                flight_number: request.flight_number,
                seat: request.seat_number,
            });
        }

        let fare = self.catalog.fare(request.flight_number)?;
        let passenger = Passenger {
            name: request.name,
            age: request.age,
            gender: request.gender,
            seat_number: request.seat_number,
            pnr: self.pnr_generator.generate(),
            flight_number: request.flight_number,
            fare,
            payment_method: request.payment_method,
            is_booked: true,
        };
        self.table.append(&passenger)?;

        let seat_count_adjusted = self.adjust_catalog_seats(passenger.flight_number, -1);
        tracing::info!(
            pnr = %passenger.pnr,
            flight = passenger.flight_number,
            seat = passenger.seat_number,
            "reservation booked"
        );
        Ok(BookingOutcome {
            passenger,
            seat_count_adjusted,
        })
    }

    /// Cancel the active reservation under `pnr`, releasing its seat count.
    ///
    /// Returns `None` when no active reservation matches; cancelling twice
    /// is a no-op the second time.
    pub fn cancel(&self, pnr: &str) -> Result<Option<Cancellation>, LedgerError> {
        let mut cancelled = None;
        let matched = self.table.rewrite_where(
            |passenger| passenger.pnr == pnr && passenger.is_booked,
            |mut passenger| {
                passenger.is_booked = false;
                cancelled = Some(passenger.clone());
                Some(passenger)
            },
        )?;
        if !matched {
            return Ok(None);
        }
        let passenger = match cancelled {
            Some(passenger) => passenger,
            None => return Ok(None),
        };

        let seat_count_adjusted = self.adjust_catalog_seats(passenger.flight_number, 1);
        tracing::info!(pnr = %passenger.pnr, flight = passenger.flight_number, "reservation cancelled");
        Ok(Some(Cancellation {
            passenger,
            seat_count_adjusted,
        }))
    }

    /// Apply `changes` to the active reservation under `pnr`.
    ///
    /// Each field is validated on its own; a failing change is dropped and
    /// reported while the rest still apply. Every active record under the
    /// PNR receives the accepted changes, each keeping its own values for
    /// the fields the change set leaves out. Moving to a different flight
    /// re-snapshots the fare and transfers one seat between the two flights'
    /// counts. The requested seat is validated against the flight the
    /// reservation ends up on.
    pub fn modify(
        &self,
        pnr: &str,
        changes: ReservationUpdate,
    ) -> Result<Option<ModifyOutcome>, LedgerError> {
        let current = match self.find_active(pnr)? {
            Some(passenger) => passenger,
            None => return Ok(None),
        };

        let mut rejected = Vec::new();

        let mut name_change = None;
        if let Some(name) = changes.name {
            if !name.is_empty() && name.len() <= MAX_NAME_LEN {
                name_change = Some(name);
            } else {
                rejected.push(RejectedChange::InvalidName);
            }
        }
        let mut age_change = None;
        if let Some(age) = changes.age {
            if (1..=MAX_AGE).contains(&age) {
                age_change = Some(age);
            } else {
                rejected.push(RejectedChange::AgeOutOfRange(age));
            }
        }
        let gender_change = changes.gender;
        let mut flight_change = None;
        if let Some(flight_number) = changes.flight_number {
            if self.catalog.exists(flight_number)? {
                flight_change = Some((flight_number, self.catalog.fare(flight_number)?));
            } else {
                rejected.push(RejectedChange::FlightUnavailable(flight_number));
            }
        }
        let mut seat_change = None;
        if let Some(seat) = changes.seat_number {
            let target_flight =
                flight_change.map_or(current.flight_number, |(flight_number, _)| flight_number);
            if self.is_seat_available(target_flight, seat)? {
                seat_change = Some(seat);
            } else {
                rejected.push(RejectedChange::SeatUnavailable {
                    flight_number: target_flight,
                    seat,
                });
            }
        }
        let payment_change = changes.payment_method;

        // Collided PNRs: every matching record takes the accepted changes
        // while keeping its own remaining fields; the first match is the
        // one reported back.
        let mut primary = None;
        let matched = self.table.rewrite_where(
            |passenger| passenger.pnr == pnr && passenger.is_booked,
            |mut passenger| {
                if let Some(name) = &name_change {
                    passenger.name = name.clone();
                }
                if let Some(age) = age_change {
                    passenger.age = age;
                }
                if let Some(gender) = gender_change {
                    passenger.gender = gender;
                }
                if let Some((flight_number, fare)) = flight_change {
                    passenger.flight_number = flight_number;
                    passenger.fare = fare;
                }
                if let Some(seat) = seat_change {
                    passenger.seat_number = seat;
                }
                if let Some(payment_method) = payment_change {
                    passenger.payment_method = payment_method;
                }
                if primary.is_none() {
                    primary = Some(passenger.clone());
                }
                Some(passenger)
            },
        )?;
        if !matched {
            return Ok(None);
        }
        let updated = match primary {
            Some(passenger) => passenger,
            None => return Ok(None),
        };

        let seat_counts_adjusted = if updated.flight_number == current.flight_number {
            true
        } else {
            let released = self.adjust_catalog_seats(current.flight_number, 1);
            let reserved = self.adjust_catalog_seats(updated.flight_number, -1);
            released && reserved
        };
        tracing::info!(pnr, flight = updated.flight_number, "reservation modified");
        Ok(Some(ModifyOutcome {
            passenger: updated,
            rejected,
            seat_counts_adjusted,
        }))
    }

    /// The active reservation under `pnr`, if any.
    pub fn find_active(&self, pnr: &str) -> Result<Option<Passenger>, LedgerError> {
        for passenger in self.table.scan()? {
            let passenger = passenger?;
            if passenger.pnr == pnr && passenger.is_booked {
                return Ok(Some(passenger));
            }
        }
        Ok(None)
    }

    /// Every active reservation, in booking order.
    pub fn list_active(&self) -> Result<Vec<Passenger>, LedgerError> {
        let mut active = Vec::new();
        for passenger in self.table.scan()? {
            let passenger = passenger?;
            if passenger.is_booked {
                active.push(passenger);
            }
        }
        Ok(active)
    }

    /// Seat numbers currently held on `flight_number`, sorted and deduped.
    pub fn booked_seats(&self, flight_number: u32) -> Result<Vec<u32>, LedgerError> {
        let mut seats = Vec::new();
        for passenger in self.table.scan()? {
            let passenger = passenger?;
            if passenger.flight_number == flight_number && passenger.is_booked {
                seats.push(passenger.seat_number);
            }
        }
        seats.sort_unstable();
        seats.dedup();
        Ok(seats)
    }

    // Seat-count writes never undo an already persisted reservation change;
    // a rejected or failed adjustment leaves the catalog count out of step
    // and is surfaced through the operation outcome.
    fn adjust_catalog_seats(&self, flight_number: u32, delta: i32) -> bool {
        match self.catalog.adjust_seats(flight_number, delta) {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(flight = flight_number, delta, "seat count adjustment rejected");
                false
            }
            Err(err) => {
                tracing::warn!(
                    flight = flight_number,
                    delta,
                    error = %err,
                    "seat count adjustment failed"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn passenger(flight: u32, seat: u32, pnr: &str, booked: bool) -> Passenger {
        Passenger {
            name: "Ada Lovelace".to_string(),
            age: 36,
            gender: Gender::Female,
            seat_number: seat,
            pnr: pnr.to_string(),
            flight_number: flight,
            fare: 250.0,
            payment_method: PaymentMethod::CreditCard,
            is_booked: booked,
        }
    }

    fn seeded_ledger(records: &[Passenger]) -> (ReservationLedger, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reservations.dat");
        let seed: Table<Passenger> = Table::new(path.clone());
        for record in records {
            seed.append(record).unwrap();
        }
        let ledger = ReservationLedger::new(
            path,
            FlightCatalog::new(dir.path().join("flights.dat")),
            PnrGenerator::with_seed(1),
        );
        (ledger, dir)
    }

    #[test]
    fn test_seat_lookup_honors_active_records_only() {
        let (ledger, _dir) = seeded_ledger(&[
            passenger(7, 5, "260825001", true),
            passenger(7, 9, "260825002", false),
        ]);
        assert!(!ledger.is_seat_available(7, 5).unwrap());
        assert!(ledger.is_seat_available(7, 9).unwrap());
        assert!(ledger.is_seat_available(8, 5).unwrap());
    }

    #[test]
    fn test_out_of_range_seats_are_never_available() {
        let (ledger, _dir) = seeded_ledger(&[]);
        assert!(!ledger.is_seat_available(7, 0).unwrap());
        assert!(!ledger.is_seat_available(7, SEAT_CAPACITY + 1).unwrap());
        assert!(ledger.is_seat_available(7, SEAT_CAPACITY).unwrap());
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let (ledger, _dir) = seeded_ledger(&[]);
        assert!(ledger.is_seat_available(7, 5).unwrap());
        assert!(ledger.find_active("260825001").unwrap().is_none());
        assert!(ledger.list_active().unwrap().is_empty());
    }

    #[test]
    fn test_booked_seats_sorted_and_deduped() {
        let (ledger, _dir) = seeded_ledger(&[
            passenger(7, 30, "260825001", true),
            passenger(7, 4, "260825002", true),
            passenger(7, 30, "260825003", true),
            passenger(7, 12, "260825004", false),
            passenger(8, 1, "260825005", true),
        ]);
        assert_eq!(ledger.booked_seats(7).unwrap(), vec![4, 30]);
    }

    #[test]
    fn test_find_active_skips_cancelled_records() {
        let (ledger, _dir) = seeded_ledger(&[
            passenger(7, 5, "260825001", false),
            passenger(7, 6, "260825002", true),
        ]);
        assert!(ledger.find_active("260825001").unwrap().is_none());
        let found = ledger.find_active("260825002").unwrap().unwrap();
        assert_eq!(found.seat_number, 6);
    }

    #[test]
    fn test_modify_updates_each_record_sharing_a_pnr() {
        let mut first = passenger(100, 5, "260825042", true);
        first.name = "First Traveller".to_string();
        let mut second = passenger(200, 9, "260825042", true);
        second.name = "Second Traveller".to_string();
        let (ledger, _dir) = seeded_ledger(&[first, second]);

        let changes = ReservationUpdate {
            age: Some(41),
            ..Default::default()
        };
        let outcome = ledger.modify("260825042", changes).unwrap().unwrap();
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.passenger.name, "First Traveller");
        assert_eq!(outcome.passenger.age, 41);

        let active = ledger.list_active().unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].name, "First Traveller");
        assert_eq!(active[0].flight_number, 100);
        assert_eq!(active[0].seat_number, 5);
        assert_eq!(active[0].age, 41);
        assert_eq!(active[1].name, "Second Traveller");
        assert_eq!(active[1].flight_number, 200);
        assert_eq!(active[1].seat_number, 9);
        assert_eq!(active[1].age, 41);
    }
}
