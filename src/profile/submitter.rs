// src/profile/submitter.rs
use tracing::{error, info};

use super::form::ProfileForm;
use crate::core::PortfolioUploader;
use crate::error::{PortalError, PortalResult};

pub const SUCCESS_MESSAGE: &str = "Profile updated successfully!";
pub const FAILURE_MESSAGE: &str = "Error while updating the profile";

/// User-visible acknowledgment channel
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Prints acknowledgments on the terminal
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✅ {}", message);
    }

    fn failure(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

pub struct ProfileSubmitter<U, N> {
    uploader: U,
    notifier: N,
}

impl<U, N> ProfileSubmitter<U, N>
where
    U: PortfolioUploader,
    N: Notifier,
{
    pub fn new(uploader: U, notifier: N) -> Self {
        Self { uploader, notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Post the form once and acknowledge the outcome to the user.
    ///
    /// The form is only read; it is neither reset nor validated here.
    pub async fn submit(&self, form: &ProfileForm) -> PortalResult<serde_json::Value> {
        match self.uploader.upload_portfolio(form).await {
            Ok(reply) => {
                info!("Profile form submitted");
                self.notifier.success(SUCCESS_MESSAGE);
                Ok(reply)
            }
            Err(e) => {
                error!("Profile form submission failed: {:#}", e);
                self.notifier.failure(FAILURE_MESSAGE);
                Err(PortalError::Submit(e))
            }
        }
    }
}
