use color_eyre::eyre::{Result, eyre};
use dentbook_core::{AppointmentAction, AppointmentId, Password, RegionCode, RegistrationInput};
use secrecy::Secret;

use crate::cli::actions::Action;

/// Default log filter for the `-v` count. `RUST_LOG` still wins.
pub fn log_filter(matches: &clap::ArgMatches) -> &'static str {
    match matches.get_count("verbosity") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| eyre!("missing subcommand"))?;

    let text = |id: &str| -> String { sub_m.get_one::<String>(id).cloned().unwrap_or_default() };

    Ok(match name {
        "login" => Action::Login {
            email: text("email"),
            password: Password::from(Secret::new(text("password"))),
        },
        "register" => Action::Register {
            input: RegistrationInput {
                first_name: text("first-name"),
                last_name: text("last-name"),
                date_of_birth: text("dob"),
                phone: text("phone"),
                email: text("email"),
                password: Password::new(text("password")),
                confirm_password: Password::new(text("confirm-password")),
            },
            region: match sub_m.get_one::<String>("region") {
                Some(code) => Some(
                    RegionCode::parse(code).ok_or_else(|| eyre!("invalid region code: {code}"))?,
                ),
                None => None,
            },
        },
        "logout" => Action::Logout,
        "whoami" => Action::Whoami,
        "doctors" => Action::Doctors,
        "dashboard" => Action::Dashboard,
        "complete" => Action::Appointment {
            id: AppointmentId::new(text("id")),
            action: AppointmentAction::Complete,
        },
        "cancel" => Action::Appointment {
            id: AppointmentId::new(text("id")),
            action: AppointmentAction::Cancel,
        },
        other => return Err(eyre!("unknown command: {other}")),
    })
}
