use skylane_catalog::{Flight, SEAT_CAPACITY};
use skylane_ledger::{BookingOutcome, Cancellation, FinancialSummary, Passenger};

const RULE: &str = "-----------------------------------------------------------------------";

pub fn flight_table(flights: &[Flight]) {
    println!(
        "\n{:<10} {:<18} {:<18} {:<8} {:<10} {}",
        "Flight No.", "Destination", "Departure", "Time", "Fare", "Seats"
    );
    println!("{RULE}");
    for flight in flights {
        println!(
            "{:<10} {:<18} {:<18} {:<8} ${:<9.2} {}",
            flight.flight_number,
            flight.destination,
            flight.departure,
            flight.departure_time,
            flight.fare,
            flight.available_seats
        );
    }
    println!("{RULE}");
}

pub fn reservation_table(reservations: &[Passenger]) {
    println!("\n=== ACTIVE RESERVATIONS ===");
    println!(
        "{:<10} {:<20} {:<7} {:<5} {:<10} {}",
        "PNR", "Name", "Flight", "Seat", "Fare", "Payment"
    );
    println!("{RULE}");
    for passenger in reservations {
        println!(
            "{:<10} {:<20} {:<7} {:<5} ${:<9.2} {}",
            passenger.pnr,
            passenger.name,
            passenger.flight_number,
            passenger.seat_number,
            passenger.fare,
            passenger.payment_method.label()
        );
    }
    println!("{RULE}");
}

/// Ten seats per row; a booked seat shows as `XX`.
pub fn seat_map(flight_number: u32, booked: &[u32]) {
    println!("\nAvailable Seats for Flight {flight_number}:");
    println!("--------------------------------------------");
    for seat in 1..=SEAT_CAPACITY {
        if booked.contains(&seat) {
            print!(" XX ");
        } else {
            print!("{seat:3} ");
        }
        if seat % 10 == 0 {
            println!();
        }
    }
    println!("--------------------------------------------");
}

pub fn booking_confirmation(outcome: &BookingOutcome) {
    let passenger = &outcome.passenger;
    println!("\n=== BOOKING CONFIRMED ===");
    println!("PNR: {}", passenger.pnr);
    println!("Name: {}", passenger.name);
    println!("Flight: {}", passenger.flight_number);
    println!("Seat: {}", passenger.seat_number);
    println!("Fare: ${:.2}", passenger.fare);
    println!("Payment Method: {}", passenger.payment_method.label());
    println!("=========================");
    if !outcome.seat_count_adjusted {
        println!("Warning: Could not update flight seat count.");
    }
}

pub fn cancellation(cancellation: &Cancellation) {
    let passenger = &cancellation.passenger;
    println!("\nCancelling reservation for {}", passenger.name);
    println!("Flight: {}, Seat: {}", passenger.flight_number, passenger.seat_number);
    println!("Refund amount: ${:.2}", passenger.fare);
    if !cancellation.seat_count_adjusted {
        println!("Warning: Could not update flight seat count.");
    }
    println!("Reservation cancelled successfully.");
}

pub fn reservation_details(passenger: &Passenger) {
    println!("\nCurrent Details:");
    println!("Name: {}", passenger.name);
    println!("Age: {}", passenger.age);
    println!("Gender: {}", passenger.gender.label());
    println!("Flight: {}", passenger.flight_number);
    println!("Seat: {}", passenger.seat_number);
    println!("Fare: ${:.2}", passenger.fare);
    println!("Payment: {}", passenger.payment_method.label());
}

pub fn ticket(passenger: &Passenger) {
    println!("\n=== AIRLINE TICKET ===");
    println!("PNR: {}", passenger.pnr);
    println!("Passenger: {}", passenger.name);
    println!("Age: {} | Gender: {}", passenger.age, passenger.gender.label());
    println!("Flight: {}", passenger.flight_number);
    println!("Seat: {}", passenger.seat_number);
    println!("Fare: ${:.2}", passenger.fare);
    println!("Payment Method: {}", passenger.payment_method.label());
    println!("Status: CONFIRMED");
    println!("======================");
}

pub fn financial_report(summary: &FinancialSummary) {
    println!("\n=== FINANCIAL REPORT ===");
    println!("Total Bookings: {}", summary.booking_count);
    println!("Total Revenue: ${:.2}", summary.total_revenue);
    println!("Average Fare: ${:.2}", summary.average_fare);
    println!("========================");
}
