use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

fn id_arg() -> Arg {
    Arg::new("id")
        .help("Appointment id")
        .required(true)
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email")
        .env("DENTBOOK_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help("Account password")
        .env("DENTBOOK_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("dentbook")
        .about("Dental appointment booking client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Booking API base URL, overrides configuration")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create a patient account and sign in")
                .arg(
                    Arg::new("first-name")
                        .long("first-name")
                        .help("First name, letters only")
                        .default_value(""),
                )
                .arg(
                    Arg::new("last-name")
                        .long("last-name")
                        .help("Last name, letters only")
                        .default_value(""),
                )
                .arg(
                    Arg::new("dob")
                        .long("dob")
                        .help("Date of birth, YYYY-MM-DD")
                        .default_value(""),
                )
                .arg(
                    Arg::new("phone")
                        .long("phone")
                        .help("Phone number, national or +international")
                        .default_value(""),
                )
                .arg(
                    Arg::new("region")
                        .long("region")
                        .help("Two-letter region for national phone numbers, detected when omitted"),
                )
                .arg(email_arg())
                .arg(password_arg())
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .help("Repeat the password")
                        .env("DENTBOOK_CONFIRM_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(Command::new("doctors").about("List doctors"))
        .subcommand(Command::new("dashboard").about("Show your appointments"))
        .subcommand(
            Command::new("complete")
                .about("Mark a confirmed appointment as completed (doctors)")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("cancel")
                .about("Cancel a confirmed appointment (patients)")
                .arg(id_arg()),
        )
}
