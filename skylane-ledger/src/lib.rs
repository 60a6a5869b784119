pub mod ledger;
pub mod passenger;
pub mod pnr;
pub mod report;

pub use ledger::{
    BookingOutcome, BookingRequest, Cancellation, LedgerError, ModifyOutcome, RejectedChange,
    ReservationLedger, ReservationUpdate,
};
pub use passenger::{Gender, Passenger, PaymentMethod, MAX_AGE, MAX_NAME_LEN};
pub use pnr::{PnrGenerator, PNR_LEN};
pub use report::{financial_summary, FinancialSummary};
