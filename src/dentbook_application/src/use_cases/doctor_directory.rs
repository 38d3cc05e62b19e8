use dentbook_core::{ApiError, Doctor, DoctorApi};

pub const DOCTORS_FALLBACK_MESSAGE: &str = "Failed to fetch doctors.";

#[derive(Debug, thiserror::Error)]
pub enum ListDoctorsError {
    #[error("{}", .0.user_message(DOCTORS_FALLBACK_MESSAGE))]
    Api(#[from] ApiError),
}

/// Public doctor listing; needs no session.
pub struct ListDoctorsUseCase<D>
where
    D: DoctorApi,
{
    doctor_api: D,
}

impl<D> ListDoctorsUseCase<D>
where
    D: DoctorApi,
{
    pub fn new(doctor_api: D) -> Self {
        Self { doctor_api }
    }

    #[tracing::instrument(name = "ListDoctorsUseCase::execute", skip_all)]
    pub async fn execute(&self) -> Result<Vec<Doctor>, ListDoctorsError> {
        let doctors = self.doctor_api.list_doctors().await?;
        tracing::debug!(count = doctors.len(), "Doctors loaded");
        Ok(doctors)
    }
}
