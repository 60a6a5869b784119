use std::io::{self, BufRead, Write};

use skylane_ledger::{Gender, PaymentMethod};

/// Print `prompt` and read one line from stdin, without its line ending.
pub fn line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
    }
    Ok(input
        .trim_end_matches(|c| c == '\r' || c == '\n')
        .to_string())
}

/// Re-prompt until the input parses as an integer within `min..=max`.
pub fn int_in_range(prompt: &str, min: u32, max: u32) -> io::Result<u32> {
    loop {
        let input = line(prompt)?;
        match parse_int_in_range(&input, min, max) {
            Some(value) => return Ok(value),
            None => println!("Invalid input. Please enter a number between {min} and {max}."),
        }
    }
}

/// Re-prompt until a non-empty entry no longer than `max_len` bytes.
pub fn required_text(prompt: &str, max_len: usize) -> io::Result<String> {
    loop {
        let input = line(prompt)?;
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.len() <= max_len {
            return Ok(trimmed.to_string());
        }
        println!("Please enter between 1 and {max_len} characters.");
    }
}

/// Re-prompt until a non-negative fare is entered.
pub fn fare(prompt: &str) -> io::Result<f64> {
    loop {
        let input = line(prompt)?;
        match input.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => return Ok(value),
            _ => println!("Invalid fare. Please enter a non-negative amount."),
        }
    }
}

pub fn gender(prompt: &str) -> io::Result<Gender> {
    loop {
        let input = line(prompt)?;
        match parse_gender(&input) {
            Some(gender) => return Ok(gender),
            None => println!("Invalid gender. Please enter M or F."),
        }
    }
}

/// Numbered payment menu.
pub fn payment_method() -> io::Result<PaymentMethod> {
    println!("\nSelect Payment Method:");
    for (index, method) in PaymentMethod::ALL.iter().enumerate() {
        println!("{}. {}", index + 1, method.label());
    }
    let choice = int_in_range("Enter choice (1-4): ", 1, PaymentMethod::ALL.len() as u32)?;
    Ok(PaymentMethod::ALL[(choice - 1) as usize])
}

/// Empty input keeps the current value.
pub fn optional_text(prompt: &str) -> io::Result<Option<String>> {
    let input = line(prompt)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

pub fn optional_u32(prompt: &str, field: &str) -> io::Result<Option<u32>> {
    match optional_text(prompt)? {
        None => Ok(None),
        Some(input) => match input.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                println!("Invalid {field}, keeping current value.");
                Ok(None)
            }
        },
    }
}

pub fn optional_u8(prompt: &str, field: &str) -> io::Result<Option<u8>> {
    match optional_text(prompt)? {
        None => Ok(None),
        Some(input) => match input.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                println!("Invalid {field}, keeping current value.");
                Ok(None)
            }
        },
    }
}

pub fn optional_gender(prompt: &str) -> io::Result<Option<Gender>> {
    match optional_text(prompt)? {
        None => Ok(None),
        Some(input) => match parse_gender(&input) {
            Some(gender) => Ok(Some(gender)),
            None => {
                println!("Invalid gender, keeping current value.");
                Ok(None)
            }
        },
    }
}

pub fn optional_payment(current: PaymentMethod) -> io::Result<Option<PaymentMethod>> {
    println!("Payment Method [{}]:", current.label());
    for (index, method) in PaymentMethod::ALL.iter().enumerate() {
        println!("{}. {}", index + 1, method.label());
    }
    match optional_text("Enter new choice (1-4): ")? {
        None => Ok(None),
        Some(input) => match parse_int_in_range(&input, 1, PaymentMethod::ALL.len() as u32) {
            Some(choice) => Ok(Some(PaymentMethod::ALL[(choice - 1) as usize])),
            None => {
                println!("Invalid payment method, keeping current value.");
                Ok(None)
            }
        },
    }
}

fn parse_int_in_range(input: &str, min: u32, max: u32) -> Option<u32> {
    let value: u32 = input.trim().parse().ok()?;
    (min..=max).contains(&value).then_some(value)
}

fn parse_gender(input: &str) -> Option<Gender> {
    match input.trim().chars().next()?.to_ascii_uppercase() {
        'M' => Some(Gender::Male),
        'F' => Some(Gender::Female),
        _ => None,
    }
}
