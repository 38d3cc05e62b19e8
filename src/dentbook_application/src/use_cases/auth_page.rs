use url::form_urlencoded;

/// Which half of the combined login/signup page is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthView {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthPage {
    view: AuthView,
    signup_success: bool,
}

impl AuthPage {
    /// Initial state from the page query string, e.g. `?signup=success`.
    /// Keys and values are percent-decoded.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut signup_errors = false;
        let mut signup_success = false;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "signup_errors" => signup_errors = true,
                "signup" if value == "success" => signup_success = true,
                _ => {}
            }
        }

        if signup_errors {
            Self {
                view: AuthView::Signup,
                signup_success: false,
            }
        } else {
            Self {
                view: AuthView::Login,
                signup_success,
            }
        }
    }

    pub fn show_login(&mut self) {
        self.view = AuthView::Login;
        self.signup_success = false;
    }

    pub fn show_signup(&mut self) {
        self.view = AuthView::Signup;
        self.signup_success = false;
    }

    pub fn on_signup_success(&mut self) {
        self.view = AuthView::Login;
        self.signup_success = true;
    }

    pub fn view(&self) -> AuthView {
        self.view
    }

    pub fn signup_success(&self) -> bool {
        self.signup_success
    }
}
