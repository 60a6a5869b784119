use serde::{Deserialize, Serialize};
use skylane_store::{DecodeError, FieldReader, FieldWriter, Record};

/// Seats on every aircraft in the fleet.
pub const SEAT_CAPACITY: u32 = 100;
/// Longest destination or departure city name, in bytes.
pub const MAX_CITY_LEN: usize = 49;
/// Longest departure time string, in bytes.
pub const MAX_TIME_LEN: usize = 9;

const CITY_WIDTH: usize = MAX_CITY_LEN + 1;
const TIME_WIDTH: usize = MAX_TIME_LEN + 1;

/// A scheduled flight and its remaining seat inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_number: u32,
    pub destination: String,
    pub departure: String,
    pub departure_time: String,
    pub fare: f64,
    pub available_seats: u32,
}

/// Fields supplied when adding a flight; seats start at capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFlight {
    pub flight_number: u32,
    pub destination: String,
    pub departure: String,
    pub departure_time: String,
    pub fare: f64,
}

impl Record for Flight {
    const NAME: &'static str = "flights";
    const ENCODED_LEN: usize = 4 + CITY_WIDTH * 2 + TIME_WIDTH + 8 + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut writer = FieldWriter::new(buf);
        writer.u32(self.flight_number);
        writer.text(CITY_WIDTH, &self.destination);
        writer.text(CITY_WIDTH, &self.departure);
        writer.text(TIME_WIDTH, &self.departure_time);
        writer.f64(self.fare);
        writer.u32(self.available_seats);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = FieldReader::new(buf);
        Ok(Self {
            flight_number: reader.u32(),
            destination: reader.text(CITY_WIDTH),
            departure: reader.text(CITY_WIDTH),
            departure_time: reader.text(TIME_WIDTH),
            fare: reader.f64(),
            available_seats: reader.u32(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_record_roundtrip() {
        let flight = Flight {
            flight_number: 412,
            destination: "Paris".to_string(),
            departure: "New York".to_string(),
            departure_time: "14:30".to_string(),
            fare: 250.0,
            available_seats: 97,
        };
        let mut buf = vec![0u8; Flight::ENCODED_LEN];
        flight.encode(&mut buf);
        assert_eq!(Flight::decode(&buf).unwrap(), flight);
    }

    #[test]
    fn test_encoded_len_matches_field_layout() {
        let flight = Flight {
            flight_number: 1,
            destination: "A".to_string(),
            departure: "B".to_string(),
            departure_time: "00:00".to_string(),
            fare: 0.0,
            available_seats: 0,
        };
        let mut buf = vec![0u8; Flight::ENCODED_LEN];
        let mut writer = FieldWriter::new(&mut buf);
        writer.u32(flight.flight_number);
        writer.text(CITY_WIDTH, &flight.destination);
        writer.text(CITY_WIDTH, &flight.departure);
        writer.text(TIME_WIDTH, &flight.departure_time);
        writer.f64(flight.fare);
        writer.u32(flight.available_seats);
        assert_eq!(writer.written(), Flight::ENCODED_LEN);
    }
}
