use serde::{Deserialize, Serialize};

use crate::ledger::{LedgerError, ReservationLedger};

/// Revenue aggregates over the active reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub booking_count: usize,
    pub total_revenue: f64,
    pub average_fare: f64,
}

/// Sum the snapshotted fares across active reservations. Cancelled
/// bookings contribute nothing; an empty ledger reports all zeros.
pub fn financial_summary(ledger: &ReservationLedger) -> Result<FinancialSummary, LedgerError> {
    let active = ledger.list_active()?;
    let booking_count = active.len();
    let total_revenue: f64 = active.iter().map(|passenger| passenger.fare).sum();
    let average_fare = if booking_count == 0 {
        0.0
    } else {
        total_revenue / booking_count as f64
    };
    Ok(FinancialSummary {
        booking_count,
        total_revenue,
        average_fare,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnr::PnrGenerator;
    use skylane_catalog::FlightCatalog;
    use tempfile::tempdir;

    #[test]
    fn test_empty_ledger_reports_zeros() {
        let dir = tempdir().unwrap();
        let ledger = ReservationLedger::new(
            dir.path().join("reservations.dat"),
            FlightCatalog::new(dir.path().join("flights.dat")),
            PnrGenerator::with_seed(1),
        );
        let summary = financial_summary(&ledger).unwrap();
        assert_eq!(summary.booking_count, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_fare, 0.0);
    }
}
