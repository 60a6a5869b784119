use serde::{Deserialize, Serialize};
use skylane_store::{DecodeError, FieldReader, FieldWriter, Record};

use crate::pnr::PNR_LEN;

/// Longest passenger name, in bytes.
pub const MAX_NAME_LEN: usize = 49;
/// Oldest bookable passenger age.
pub const MAX_AGE: u8 = 120;

const NAME_WIDTH: usize = MAX_NAME_LEN + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    fn code(self) -> u8 {
        match self {
            Gender::Male => b'M',
            Gender::Female => b'F',
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            b'M' => Some(Gender::Male),
            b'F' => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    NetBanking,
    Upi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::NetBanking,
        PaymentMethod::Upi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Upi => "UPI",
        }
    }

    fn code(self) -> u8 {
        match self {
            PaymentMethod::CreditCard => 1,
            PaymentMethod::DebitCard => 2,
            PaymentMethod::NetBanking => 3,
            PaymentMethod::Upi => 4,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PaymentMethod::CreditCard),
            2 => Some(PaymentMethod::DebitCard),
            3 => Some(PaymentMethod::NetBanking),
            4 => Some(PaymentMethod::Upi),
            _ => None,
        }
    }
}

/// One reservation record. Cancelling clears `is_booked` and keeps the
/// record in place; the fare is the one snapshotted at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub seat_number: u32,
    pub pnr: String,
    pub flight_number: u32,
    pub fare: f64,
    pub payment_method: PaymentMethod,
    pub is_booked: bool,
}

impl Record for Passenger {
    const NAME: &'static str = "reservations";
    const ENCODED_LEN: usize = NAME_WIDTH + 1 + 1 + 4 + PNR_LEN + 4 + 8 + 1 + 1;

    fn encode(&self, buf: &mut [u8]) {
        let mut writer = FieldWriter::new(buf);
        writer.text(NAME_WIDTH, &self.name);
        writer.byte(self.age);
        writer.byte(self.gender.code());
        writer.u32(self.seat_number);
        writer.text(PNR_LEN, &self.pnr);
        writer.u32(self.flight_number);
        writer.f64(self.fare);
        writer.byte(self.payment_method.code());
        writer.byte(self.is_booked as u8);
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = FieldReader::new(buf);
        let name = reader.text(NAME_WIDTH);
        let age = reader.byte();
        let gender_code = reader.byte();
        let gender = Gender::from_code(gender_code).ok_or(DecodeError {
            field: "gender",
            value: gender_code,
        })?;
        let seat_number = reader.u32();
        let pnr = reader.text(PNR_LEN);
        let flight_number = reader.u32();
        let fare = reader.f64();
        let payment_code = reader.byte();
        let payment_method = PaymentMethod::from_code(payment_code).ok_or(DecodeError {
            field: "payment_method",
            value: payment_code,
        })?;
        let is_booked = match reader.byte() {
            0 => false,
            1 => true,
            value => {
                return Err(DecodeError {
                    field: "is_booked",
                    value,
                })
            }
        };
        Ok(Self {
            name,
            age,
            gender,
            seat_number,
            pnr,
            flight_number,
            fare,
            payment_method,
            is_booked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> Passenger {
        Passenger {
            name: "Ada Lovelace".to_string(),
            age: 36,
            gender: Gender::Female,
            seat_number: 14,
            pnr: "260825042".to_string(),
            flight_number: 412,
            fare: 250.0,
            payment_method: PaymentMethod::Upi,
            is_booked: true,
        }
    }

    #[test]
    fn test_passenger_record_roundtrip() {
        let original = passenger();
        let mut buf = vec![0u8; Passenger::ENCODED_LEN];
        original.encode(&mut buf);
        assert_eq!(Passenger::decode(&buf).unwrap(), original);
    }

    #[test]
    fn test_invalid_gender_byte_fails_decode() {
        let mut buf = vec![0u8; Passenger::ENCODED_LEN];
        passenger().encode(&mut buf);
        buf[NAME_WIDTH + 1] = b'X';

        let err = Passenger::decode(&buf).unwrap_err();
        assert_eq!(err.field, "gender");
        assert_eq!(err.value, b'X');
    }

    #[test]
    fn test_payment_method_codes_are_stable() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_code(method.code()), Some(method));
        }
        assert_eq!(PaymentMethod::from_code(0), None);
        assert_eq!(PaymentMethod::from_code(5), None);
    }
}
