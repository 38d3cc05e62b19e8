use color_eyre::eyre::{Result, eyre};
use dentbook_adapters::{
    ClientSettings, FileSessionStore, HttpApiClient, IpApiRegionDetector, LibPhoneNumberValidator,
};
use dentbook_application::{
    AuthClient, Dashboard, DashboardUseCase, ListDoctorsUseCase, LoginFormController,
    RegistrationFormController, SubmitOutcome,
};
use dentbook_core::{
    AppointmentAction, AppointmentId, FormField, Password, RegionCode, RegistrationInput, User,
    format_display_date,
};
use secrecy::ExposeSecret;

pub enum Action {
    Login {
        email: String,
        password: Password,
    },
    Register {
        input: RegistrationInput,
        region: Option<RegionCode>,
    },
    Logout,
    Whoami,
    Doctors,
    Dashboard,
    Appointment {
        id: AppointmentId,
        action: AppointmentAction,
    },
}

/// Wired adapters shared by every action.
struct Context {
    api: HttpApiClient,
    session_store: FileSessionStore,
    http_client: reqwest::Client,
}

impl Context {
    fn new(settings: &ClientSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.api.timeout())
            .build()?;

        Ok(Self {
            api: HttpApiClient::new(settings.api.base_url.clone(), http_client.clone()),
            session_store: FileSessionStore::new(settings.session.path.clone()),
            http_client,
        })
    }

    fn auth_client(&self) -> AuthClient<HttpApiClient, FileSessionStore> {
        AuthClient::new(self.api.clone(), self.session_store.clone())
    }

    fn dashboard(&self) -> DashboardUseCase<FileSessionStore, HttpApiClient, HttpApiClient> {
        DashboardUseCase::new(self.session_store.clone(), self.api.clone(), self.api.clone())
    }
}

/// Handle the action
pub async fn handle(action: Action, settings: &ClientSettings) -> Result<()> {
    let context = Context::new(settings)?;

    match action {
        Action::Login { email, password } => {
            let form = LoginFormController::new(context.auth_client());
            form.set_email(email).await;
            form.set_password(password).await;

            let user = finish(form.submit().await)?;
            println!("Signed in as {}", describe(&user));
        }
        Action::Register { input, region } => {
            let form =
                RegistrationFormController::new(context.auth_client(), LibPhoneNumberValidator);
            match region {
                Some(region) => form.set_region(region).await,
                None => {
                    let detector = IpApiRegionDetector::new(
                        settings.region.lookup_url.clone(),
                        settings.region.fallback.clone(),
                        context.http_client.clone(),
                    );
                    form.detect_region(&detector).await;
                }
            }

            let fields = [
                (FormField::FirstName, input.first_name),
                (FormField::LastName, input.last_name),
                (FormField::DateOfBirth, input.date_of_birth),
                (FormField::Phone, input.phone),
                (FormField::Email, input.email),
                (
                    FormField::Password,
                    input.password.as_ref().expose_secret().clone(),
                ),
                (
                    FormField::ConfirmPassword,
                    input.confirm_password.as_ref().expose_secret().clone(),
                ),
            ];
            for (field, value) in fields {
                form.set_field(field, value).await;
            }

            let user = finish(form.submit().await)?;
            println!("Registration successful. Signed in as {}", describe(&user));
        }
        Action::Logout => {
            context.auth_client().logout().await?;
            println!("Signed out.");
        }
        Action::Whoami => match context.auth_client().current_session().await? {
            Some(session) => println!("{}", describe(session.user())),
            None => println!("Not signed in."),
        },
        Action::Doctors => {
            let doctors = ListDoctorsUseCase::new(context.api.clone()).execute().await?;
            for doctor in doctors {
                println!(
                    "{:>6}  {:<30} {:<20} {}",
                    doctor.id.as_str(),
                    doctor.display_name(),
                    doctor.specialty,
                    doctor.booking_path()
                );
            }
        }
        Action::Dashboard => {
            let dashboard = context.dashboard().load().await?;
            print_dashboard(&dashboard);
        }
        Action::Appointment { id, action } => {
            let use_case = context.dashboard();
            let mut dashboard = use_case.load().await?;
            use_case.apply(&mut dashboard, &id, action).await?;
            println!("Appointment {id} is now {}.", action.resulting_status());
        }
    }

    Ok(())
}

/// Print field errors to stderr and turn anything but success into an error.
fn finish(outcome: SubmitOutcome<User>) -> Result<User> {
    match outcome {
        SubmitOutcome::Completed(user) => Ok(user),
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field.key(), message);
            }
            Err(eyre!("Please correct the fields above."))
        }
        SubmitOutcome::Rejected(message) => Err(eyre!(message)),
        SubmitOutcome::Ignored => Err(eyre!("A submission is already in progress.")),
    }
}

fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.full_name(), user.email, user.role())
}

fn print_dashboard(dashboard: &Dashboard) {
    let role = dashboard.role();
    println!("{}", describe(&dashboard.user));
    println!();

    if dashboard.appointments.is_empty() {
        println!("No appointments.");
        return;
    }

    println!(
        "{:>6}  {:<12} {:<8} {:<30} {:<10} {:<9} {}",
        "Id",
        "Date",
        "Time",
        dashboard.counterpart_heading(),
        "Status",
        "Action",
        "Reschedule"
    );
    for appointment in &dashboard.appointments {
        let action = match appointment.available_action(role) {
            Some(AppointmentAction::Complete) => "complete",
            Some(AppointmentAction::Cancel) => "cancel",
            None => "",
        };
        let reschedule = if appointment.is_actionable() {
            appointment.reschedule_path()
        } else {
            String::new()
        };
        println!(
            "{:>6}  {:<12} {:<8} {:<30} {:<10} {:<9} {}",
            appointment.id.as_str(),
            format_display_date(&appointment.date),
            appointment.time,
            appointment.counterpart_name(role),
            appointment.status.label(),
            action,
            reschedule
        );
    }
}
