use std::sync::Arc;
use surrealdb::{Surreal, engine::any::Any};

use crate::auth::SessionService;
use crate::config::ServerConfig;
use crate::email::EmailService;
use crate::weather::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub db: Surreal<Any>,
    pub config: &'static ServerConfig,
    pub session_service: Arc<SessionService<Any>>,
    /// Absent when SMTP is disabled; handlers log action links instead.
    pub email_service: Option<Arc<EmailService>>,
    pub http_client: Arc<reqwest::Client>,
    pub weather_service: Arc<WeatherService>,
}

impl AppState {
    pub fn new(
        db: Surreal<Any>,
        config: &'static ServerConfig,
        session_service: Arc<SessionService<Any>>,
        email_service: Option<Arc<EmailService>>,
    ) -> Self {
        let http_client = Arc::new(reqwest::Client::new());
        let weather_service =
            Arc::new(WeatherService::new(http_client.clone(), &config.weather));
        Self {
            db,
            config,
            session_service,
            email_service,
            http_client,
            weather_service,
        }
    }
}
