use skylane_catalog::{CatalogError, FlightCatalog, NewFlight, MAX_CITY_LEN, MAX_TIME_LEN, SEAT_CAPACITY};
use skylane_ledger::{
    financial_summary, BookingRequest, ReservationLedger, ReservationUpdate, MAX_AGE,
    MAX_NAME_LEN, PNR_LEN,
};
use skylane_store::Config;

use crate::prompt;
use crate::render;

pub fn main_menu(
    config: &Config,
    catalog: &FlightCatalog,
    ledger: &mut ReservationLedger,
) -> anyhow::Result<()> {
    loop {
        println!("\n--- MAIN MENU ---");
        println!("1. User Menu");
        println!("2. Admin Menu");
        println!("3. Exit");
        match prompt::int_in_range("Enter your choice: ", 1, 3)? {
            1 => user_menu(catalog, ledger)?,
            2 => admin_menu(config, catalog, ledger)?,
            _ => {
                println!("Thank you for using the Airline Reservation System. Goodbye!");
                return Ok(());
            }
        }
    }
}

fn user_menu(catalog: &FlightCatalog, ledger: &mut ReservationLedger) -> anyhow::Result<()> {
    loop {
        println!("\n--- USER MENU ---");
        println!("1. Book Ticket");
        println!("2. View Reservations");
        println!("3. Modify Reservation");
        println!("4. Cancel Reservation");
        println!("5. Generate Bill");
        println!("6. Back to Main Menu");
        let choice = prompt::int_in_range("Enter your choice: ", 1, 6)?;
        let result = match choice {
            1 => book_ticket(catalog, ledger),
            2 => view_reservations(ledger),
            3 => modify_reservation(catalog, ledger),
            4 => cancel_reservation(ledger),
            5 => generate_bill(ledger),
            _ => return Ok(()),
        };
        // Prompt failures (closed stdin) are fatal; everything else just
        // returns to the menu.
        if let Err(err) = result {
            if err.is::<std::io::Error>() {
                return Err(err);
            }
            println!("Error: {err:#}");
        }
    }
}

fn admin_menu(
    config: &Config,
    catalog: &FlightCatalog,
    ledger: &ReservationLedger,
) -> anyhow::Result<()> {
    let entered = prompt::line("Enter admin password: ")?;
    if entered != *config.admin.password.expose() {
        println!("Invalid password!");
        return Ok(());
    }

    loop {
        println!("\n--- ADMIN MENU ---");
        println!("1. Add New Flight");
        println!("2. View All Flights");
        println!("3. Delete Flight");
        println!("4. View All Reservations");
        println!("5. View Financial Report");
        println!("6. Back to Main Menu");
        let choice = prompt::int_in_range("Enter your choice: ", 1, 6)?;
        let result = match choice {
            1 => add_flight(catalog),
            2 => view_all_flights(catalog),
            3 => delete_flight(catalog),
            4 => view_reservations(ledger),
            5 => financial_report(ledger),
            _ => return Ok(()),
        };
        if let Err(err) = result {
            if err.is::<std::io::Error>() {
                return Err(err);
            }
            println!("Error: {err:#}");
        }
    }
}

fn book_ticket(catalog: &FlightCatalog, ledger: &mut ReservationLedger) -> anyhow::Result<()> {
    let flights = catalog.list_available()?;
    if flights.is_empty() {
        println!("No flights with available seats.");
        return Ok(());
    }
    render::flight_table(&flights);

    let flight_number = prompt::int_in_range("\nEnter Flight Number: ", 1, 999_999)?;
    if !catalog.exists(flight_number)? {
        println!("Invalid flight number or no seats available.");
        return Ok(());
    }

    let name = prompt::required_text("Enter Passenger Name: ", MAX_NAME_LEN)?;
    let age = prompt::int_in_range("Enter Age: ", 1, u32::from(MAX_AGE))? as u8;
    let gender = prompt::gender("Enter Gender (M/F): ")?;

    render::seat_map(flight_number, &ledger.booked_seats(flight_number)?);
    let seat_number = loop {
        let seat = prompt::int_in_range("Choose Seat Number (1-100): ", 1, SEAT_CAPACITY)?;
        if ledger.is_seat_available(flight_number, seat)? {
            break seat;
        }
        println!("Seat {seat} is already booked. Please choose another seat.");
    };

    let payment_method = prompt::payment_method()?;

    let outcome = ledger.book(BookingRequest {
        flight_number,
        name,
        age,
        gender,
        seat_number,
        payment_method,
    })?;
    render::booking_confirmation(&outcome);
    Ok(())
}

fn view_reservations(ledger: &ReservationLedger) -> anyhow::Result<()> {
    let reservations = ledger.list_active()?;
    if reservations.is_empty() {
        println!("No active reservations found.");
        return Ok(());
    }
    render::reservation_table(&reservations);
    Ok(())
}

fn modify_reservation(catalog: &FlightCatalog, ledger: &ReservationLedger) -> anyhow::Result<()> {
    let pnr = prompt::required_text("Enter PNR to modify: ", PNR_LEN)?;
    let current = match ledger.find_active(&pnr)? {
        Some(passenger) => passenger,
        None => {
            println!("PNR not found or booking already cancelled.");
            return Ok(());
        }
    };
    render::reservation_details(&current);

    println!("\nEnter new details (press Enter to keep current value):");
    let name = prompt::optional_text(&format!("Name [{}]: ", current.name))?;
    let age = prompt::optional_u8(&format!("Age [{}]: ", current.age), "age")?;
    let gender = prompt::optional_gender(&format!("Gender [{}]: ", current.gender.label()))?;

    let flights = catalog.list_available()?;
    if !flights.is_empty() {
        render::flight_table(&flights);
    }
    let flight_number = prompt::optional_u32(
        &format!("Flight Number [{}]: ", current.flight_number),
        "flight number",
    )?;

    let target_flight = flight_number.unwrap_or(current.flight_number);
    render::seat_map(target_flight, &ledger.booked_seats(target_flight)?);
    let seat_number = prompt::optional_u32(
        &format!("Seat Number [{}]: ", current.seat_number),
        "seat number",
    )?;

    let payment_method = prompt::optional_payment(current.payment_method)?;

    let changes = ReservationUpdate {
        name,
        age,
        gender,
        flight_number,
        seat_number,
        payment_method,
    };
    match ledger.modify(&pnr, changes)? {
        Some(outcome) => {
            for rejected in &outcome.rejected {
                println!("Keeping current value: {rejected}.");
            }
            if !outcome.seat_counts_adjusted {
                println!("Warning: Could not update flight seat counts.");
            }
            println!("Reservation modified successfully.");
        }
        None => println!("PNR not found or booking already cancelled."),
    }
    Ok(())
}

fn cancel_reservation(ledger: &ReservationLedger) -> anyhow::Result<()> {
    let pnr = prompt::required_text("Enter PNR to cancel: ", PNR_LEN)?;
    match ledger.cancel(&pnr)? {
        Some(cancellation) => render::cancellation(&cancellation),
        None => println!("PNR not found or booking already cancelled."),
    }
    Ok(())
}

fn generate_bill(ledger: &ReservationLedger) -> anyhow::Result<()> {
    let pnr = prompt::required_text("Enter PNR to generate bill: ", PNR_LEN)?;
    match ledger.find_active(&pnr)? {
        Some(passenger) => render::ticket(&passenger),
        None => println!("PNR not found or booking already cancelled."),
    }
    Ok(())
}

fn add_flight(catalog: &FlightCatalog) -> anyhow::Result<()> {
    let flight_number = prompt::int_in_range("\nEnter Flight Number: ", 1, 999_999)?;
    let destination = prompt::required_text("Enter Destination: ", MAX_CITY_LEN)?;
    let departure = prompt::required_text("Enter Departure City: ", MAX_CITY_LEN)?;
    let departure_time = prompt::required_text("Enter Departure Time (HH:MM): ", MAX_TIME_LEN)?;
    let fare = prompt::fare("Enter Fare: ")?;

    match catalog.add(NewFlight {
        flight_number,
        destination,
        departure,
        departure_time,
        fare,
    }) {
        Ok(_) => println!("Flight added successfully!"),
        Err(CatalogError::DuplicateFlightNumber(_)) => println!("Flight number already exists!"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn view_all_flights(catalog: &FlightCatalog) -> anyhow::Result<()> {
    let flights = catalog.list_all()?;
    if flights.is_empty() {
        println!("No flights available.");
        return Ok(());
    }
    render::flight_table(&flights);
    Ok(())
}

fn delete_flight(catalog: &FlightCatalog) -> anyhow::Result<()> {
    let flight_number = prompt::int_in_range("Enter Flight Number to delete: ", 1, 999_999)?;
    if catalog.delete(flight_number)? {
        println!("Flight deleted successfully.");
    } else {
        println!("Flight not found.");
    }
    Ok(())
}

fn financial_report(ledger: &ReservationLedger) -> anyhow::Result<()> {
    let summary = financial_summary(ledger)?;
    render::financial_report(&summary);
    Ok(())
}
