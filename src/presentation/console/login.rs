//! Login controller: one operator session at a time.

use std::sync::Arc;

use super::{describe, Notifier};
use crate::application::dto::LoginForm;
use crate::application::services::{AuthService, LoginResult};

pub struct LoginController {
    service: Arc<dyn AuthService>,
    notifier: Arc<dyn Notifier>,
    session: Option<LoginResult>,
}

impl LoginController {
    pub fn new(service: Arc<dyn AuthService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&LoginResult> {
        self.session.as_ref()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        let form = LoginForm {
            username: username.to_owned(),
            password: password.to_owned(),
        };

        match self.service.login(form).await {
            Ok(result) => {
                self.notifier
                    .success(&format!("Welcome, {}", result.account.display_name));
                self.session = Some(result);
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                false
            }
        }
    }

    pub async fn logout(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            self.notifier.error("Nobody is logged in");
            return false;
        };

        match self.service.logout(&session.tokens.access_token).await {
            Ok(()) => {
                self.notifier.success("Logged out");
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                false
            }
        }
    }
}
