//! Interactive banking console.
//!
//! # Responsibility
//! - Render the menu, collect raw input and re-prompt on invalid entries.
//! - Keep all terminal I/O out of `teller_core`.
//!
//! # Invariants
//! - Invalid user input is reported and re-prompted, never fatal.
//! - The driver holds no account state of its own.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use log::info;
use teller_core::validate;
use teller_core::{
    default_log_level, init_logging, Clock, DefaultAccountService, InMemoryAccountRepository,
    OpenAccountRequest, SystemClock,
};

fn main() {
    if let Err(reason) = bootstrap_logging() {
        eprintln!("warning: file logging disabled: {reason}");
    }
    info!(
        "event=session_start module=cli status=ok version={}",
        teller_core::core_version()
    );

    let mut service = DefaultAccountService::new(InMemoryAccountRepository::new());
    run_session(&mut service);

    info!("event=session_end module=cli status=ok");
}

/// Level and directory come from `TELLER_LOG_LEVEL` / `TELLER_LOG_DIR`;
/// defaults are the build-mode level and a `teller` directory under the OS
/// temp dir. A failed bootstrap degrades to a stderr notice, never an abort.
fn bootstrap_logging() -> Result<(), String> {
    let level =
        std::env::var("TELLER_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    let dir = std::env::var_os("TELLER_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("teller"));
    init_logging(&level, &dir)
}

fn run_session(service: &mut DefaultAccountService) {
    loop {
        print_menu();
        let choice = prompt("Enter your choice: ");
        let Ok(choice) = choice.parse::<u32>() else {
            println!("Invalid input. Please enter a number.");
            pause();
            clear_screen();
            continue;
        };
        clear_screen();

        match choice {
            1 => create_account(service),
            2 | 3 | 4 => {
                let input = prompt("Enter account number (0 to return to menu): ");
                match input.parse::<u32>() {
                    Ok(0) => {
                        clear_screen();
                        continue;
                    }
                    Ok(number) => {
                        clear_screen();
                        match choice {
                            2 => view_account(service, number),
                            3 => deposit(service, number),
                            _ => withdraw(service, number),
                        }
                    }
                    Err(_) => println!("Invalid account number."),
                }
            }
            5 => {
                println!("Thank you for using our Banking System. Goodbye!");
                return;
            }
            _ => println!("Invalid choice. Please select 1-5."),
        }

        pause();
        clear_screen();
    }
}

/// Prompts field by field, re-asking until each validator passes, then hands
/// the collected request to the service.
fn create_account(service: &mut DefaultAccountService) {
    let holder_name = loop {
        let input = prompt("Enter your name: ");
        match validate::validate_holder_name(&input) {
            Ok(()) => break input,
            Err(reason) => println!("{reason}"),
        }
    };

    let date_of_birth = loop {
        let input = prompt("Enter date of birth (DD-MM-YYYY): ");
        match validate::validate_date_of_birth(&input, SystemClock.today()) {
            Ok(()) => break input,
            Err(reason) => println!("{reason}"),
        }
    };

    let gender = loop {
        let input = prompt("Enter gender (M/F): ");
        let code = input.chars().next().unwrap_or(' ');
        match validate::parse_gender(code) {
            Ok(_) => break code,
            Err(reason) => println!("{reason}"),
        }
    };

    let initial_deposit = loop {
        let input = prompt("Enter initial deposit: ");
        match input.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => break amount,
            _ => println!("Enter a valid initial deposit (greater than 0)."),
        }
    };

    let request = OpenAccountRequest {
        holder_name,
        date_of_birth,
        gender,
        initial_deposit,
    };

    clear_screen();
    match service.open_account(&request) {
        Ok(account) => {
            println!("Account created successfully!");
            println!("Your account number is: {}", account.number);
            println!(
                "Thanks for choosing our Banking System {} {}",
                account.gender.honorific(),
                account.holder_name
            );
        }
        // Each field already passed above; this only fires if validity flipped
        // between prompts (e.g. a midnight rollover on the age boundary).
        Err(err) => println!("Could not create the account: {err}"),
    }
}

fn view_account(service: &DefaultAccountService, number: u32) {
    match service.account_details(number) {
        Ok(account) => {
            println!("Account Number: {}", account.number);
            println!("Account Holder: {}", account.holder_name);
            println!("Date Of Birth: {}", account.date_of_birth);
            println!("Gender: {}", account.gender);
            println!("Balance: ${:.2}", account.balance);
        }
        Err(err) => println!("{err}"),
    }
}

fn deposit(service: &mut DefaultAccountService, number: u32) {
    let Some(amount) = prompt_amount("Enter amount to deposit: ") else {
        return;
    };
    match service.deposit(number, amount) {
        Ok(balance) => {
            println!("Deposited ${amount:.2} successfully. New balance: ${balance:.2}");
        }
        Err(err) => println!("{err}"),
    }
}

fn withdraw(service: &mut DefaultAccountService, number: u32) {
    let Some(amount) = prompt_amount("Enter amount to withdraw: ") else {
        return;
    };
    match service.withdraw(number, amount) {
        Ok(balance) => {
            println!("Withdrew ${amount:.2} successfully. New balance: ${balance:.2}");
        }
        Err(err) => println!("{err}"),
    }
}

fn prompt_amount(label: &str) -> Option<f64> {
    let input = prompt(label);
    match input.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Some(amount),
        _ => {
            println!("Invalid amount. Must be greater than 0.");
            None
        }
    }
}

fn print_menu() {
    println!("=== Banking System ===");
    println!("1. Create New Account");
    println!("2. View Account Details");
    println!("3. Deposit Money");
    println!("4. Withdraw Money");
    println!("5. Exit");
}

fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();
    read_line_or_exit()
}

// On EOF or a broken stdin there is nothing left to prompt for; leave cleanly.
fn read_line_or_exit() -> String {
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => {
            println!();
            println!("Goodbye!");
            process::exit(0);
        }
        Ok(_) => buf.trim().to_string(),
    }
}

fn pause() {
    print!("Press Enter to continue...");
    let _ = io::stdout().flush();
    let _ = read_line_or_exit();
}

// ANSI clear + cursor home; portable stand-in for a console clear call.
fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
    let _ = io::stdout().flush();
}
