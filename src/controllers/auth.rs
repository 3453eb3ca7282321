use tracing::info;

use crate::feedback::Feedback;
use crate::http::ApiClient;
use crate::models::{Credentials, Registration};
use crate::view::{Button, FormData, View};

pub struct AuthController<V: View + 'static> {
    api: ApiClient,
    feedback: Feedback<V>,
}

impl<V: View + 'static> AuthController<V> {
    pub fn new(api: ApiClient, feedback: Feedback<V>) -> Self {
        Self { api, feedback }
    }

    /// POST /login; on success the page moves to the dashboard after the
    /// configured delay.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let _loading = self.feedback.loading(Button::LoginSubmit);

        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(reply) if reply.success => {
                info!(username, "Logged in");
                self.feedback.success("Login successful! Redirecting...");
                self.feedback
                    .redirect_after("/dashboard", self.api.config().login_redirect_delay);
                true
            }
            Ok(reply) => {
                self.feedback
                    .error(reply.message.unwrap_or_else(|| "Login failed".to_string()));
                false
            }
            Err(e) => {
                self.feedback.error(format!("Login failed: {e}"));
                false
            }
        }
    }

    pub async fn submit_login(&self, form: &FormData) -> bool {
        self.login(
            form.get("username").unwrap_or_default(),
            form.get("password").unwrap_or_default(),
        )
        .await
    }

    /// POST /register; on success the page moves to the login form.
    pub async fn register(&self, registration: &Registration) -> bool {
        let _loading = self.feedback.loading(Button::RegisterSubmit);

        match self.api.register(registration).await {
            Ok(reply) if reply.success => {
                info!(username = %registration.username, "Registered");
                self.feedback
                    .success("Registration successful! Redirecting to login...");
                self.feedback
                    .redirect_after("/login", self.api.config().register_redirect_delay);
                true
            }
            Ok(reply) => {
                self.feedback.error(
                    reply
                        .message
                        .unwrap_or_else(|| "Registration failed".to_string()),
                );
                false
            }
            Err(e) => {
                self.feedback.error(format!("Registration failed: {e}"));
                false
            }
        }
    }

    pub async fn submit_register(&self, form: &FormData) -> bool {
        self.register(&Registration::from_form(form)).await
    }
}
