use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    transport::smtp::authentication::Credentials,
    message::{Mailbox, MultiPart, header::ContentType},
};
use mokki_entity::types::OtpKind;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::config::EmailConfig;

/// Sign-up deep link carried by invitation emails.
pub fn signup_link(base_url: &str, house_id: &str) -> String {
    format!("{}/auth/signup?house={}", base_url, urlencoding::encode(house_id))
}

/// Confirmation link for a one-time token; lands on the sign-in
/// confirmation route.
pub fn confirm_link_for_token(
    base_url: &str,
    token_hash: &str,
    kind: OtpKind,
    house: Option<&str>,
    next: Option<&str>,
) -> String {
    let mut link = format!(
        "{}/auth/confirm?token_hash={}&type={}",
        base_url,
        urlencoding::encode(token_hash),
        kind.as_str()
    );
    if let Some(house_id) = house {
        link.push_str(&format!("&house={}", urlencoding::encode(house_id)));
    }
    if let Some(next_path) = next {
        link.push_str(&format!("&next={}", urlencoding::encode(next_path)));
    }
    link
}

/// Confirmation link for an authorization code (magic-link sign-in).
pub fn confirm_link_for_code(
    base_url: &str,
    code: &str,
    house: Option<&str>,
    next: Option<&str>,
) -> String {
    let mut link = format!("{}/auth/confirm?code={}", base_url, urlencoding::encode(code));
    if let Some(house_id) = house {
        link.push_str(&format!("&house={}", urlencoding::encode(house_id)));
    }
    if let Some(next_path) = next {
        link.push_str(&format!("&next={}", urlencoding::encode(next_path)));
    }
    link
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Email address parse error: {0}")]
    AddressParse(#[from] lettre::address::AddressError),
    #[error("Email building error: {0}")]
    EmailBuild(#[from] lettre::error::Error),
}

pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    templates: Arc<Tera>,
    from_address: Mailbox,
    base_url: String,
}

impl EmailService {
    pub fn new(config: &EmailConfig, base_url: String) -> Result<Self, EmailError> {
        let creds = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_server)?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let mut tera = Tera::new("templates/email/**/*")?;
        tera.autoescape_on(vec![".html"]);

        let from_address = config.from_address.parse()?;

        Ok(Self {
            mailer,
            templates: Arc::new(tera),
            from_address,
            base_url,
        })
    }

    pub async fn send_invitation_email(
        &self,
        to_email: &str,
        house_name: &str,
        invited_by: &str,
        house_id: &str,
    ) -> Result<(), EmailError> {
        let mut context = Context::new();
        context.insert("house_name", house_name);
        context.insert("invited_by", invited_by);
        context.insert("join_url", &signup_link(&self.base_url, house_id));

        let html_body = self.templates.render("invitation.html", &context)?;
        let text_body = self.templates.render("invitation.txt", &context)?;

        self.send_multipart_email(
            to_email,
            &format!("You're invited to {}", house_name),
            html_body,
            text_body,
        )
        .await
    }

    pub async fn send_signup_confirmation_email(
        &self,
        to_email: &str,
        confirm_url: &str,
    ) -> Result<(), EmailError> {
        let mut context = Context::new();
        context.insert("confirm_url", confirm_url);

        let html_body = self.templates.render("signup_confirm.html", &context)?;
        let text_body = self.templates.render("signup_confirm.txt", &context)?;

        self.send_multipart_email(to_email, "Confirm your email address", html_body, text_body)
            .await
    }

    pub async fn send_magic_link_email(
        &self,
        to_email: &str,
        sign_in_url: &str,
    ) -> Result<(), EmailError> {
        let mut context = Context::new();
        context.insert("sign_in_url", sign_in_url);

        let html_body = self.templates.render("magic_link.html", &context)?;
        let text_body = self.templates.render("magic_link.txt", &context)?;

        self.send_multipart_email(to_email, "Your sign-in link", html_body, text_body)
            .await
    }

    async fn send_multipart_email(
        &self,
        to_email: &str,
        subject: &str,
        html_body: String,
        text_body: String,
    ) -> Result<(), EmailError> {
        let to_address: Mailbox = to_email.parse()?;

        let email = Message::builder()
            .from(self.from_address.clone())
            .to(to_address)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )?;

        self.mailer.send(email).await?;
        tracing::info!("Email sent successfully to {}", to_email);
        Ok(())
    }
}
