#[cfg(test)]
mod recover_tests {
    use crate::auth::SessionService;
    use crate::config::{EmailConfig, ServerConfig, WeatherConfig};
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use mokki_entity::types::{InviteStatus, User};
    use mokki_surrealdb::repository::{InvitationRepository, UserRepository};
    use mokki_surrealdb::test_utils::create_test_db;
    use serde_json::Value;
    use std::sync::Arc;
    use surrealdb::{Surreal, engine::any::Any};
    use tower::util::ServiceExt;

    const TEST_SECRET: &[u8] = b"recover-test-secret-recover-test-secret";

    fn test_config() -> &'static ServerConfig {
        Box::leak(Box::new(ServerConfig {
            server_name: "localhost".to_string(),
            base_url: "http://localhost:8080".to_string(),
            port: 8080,
            database_url: "memory".to_string(),
            database_namespace: "test".to_string(),
            database_name: "test".to_string(),
            dashboard_path: "/dashboard".to_string(),
            environment: "test".to_string(),
            session_ttl_secs: 3600,
            auth_code_ttl_secs: 600,
            one_time_code_ttl_secs: 3600,
            email_config: EmailConfig {
                smtp_server: "localhost".to_string(),
                smtp_port: 587,
                smtp_username: String::new(),
                smtp_password: String::new(),
                from_address: "noreply@localhost".to_string(),
                enabled: false,
            },
            weather: WeatherConfig::default(),
        }))
    }

    async fn setup() -> (Router, Surreal<Any>, Arc<SessionService<Any>>) {
        let db = create_test_db().await.expect("Failed to create test database");
        let session_service = Arc::new(SessionService::new(TEST_SECRET, 3600, db.clone()));
        let state = AppState::new(db.clone(), test_config(), session_service.clone(), None);
        (create_router(state), db, session_service)
    }

    async fn seed_user(db: &Surreal<Any>, email: &str) -> User {
        UserRepository::new(db.clone())
            .create(email, "Test User", "$2b$12$placeholderplaceholderpl")
            .await
            .expect("Failed to create user")
    }

    fn intent_cookie(house_id: &str, email: &str) -> String {
        format!(
            "pending_house_invite={}",
            serde_json::json!({ "houseId": house_id, "email": email })
        )
    }

    fn recover_request(cookies: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/api/invites/recover");
        if let Some(cookie_header) = cookies {
            builder = builder.header(header::COOKIE, cookie_header);
        }
        builder.body(Body::empty()).expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read failed")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    fn clears_pending_cookie(response: &axum::response::Response) -> bool {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|cookie| cookie.starts_with("pending_house_invite=;"))
    }

    #[tokio::test]
    async fn test_no_stored_intent_is_idle() {
        let (app, _db, _sessions) = setup().await;

        let response = app.oneshot(recover_request(None)).await.expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "idle");
    }

    #[tokio::test]
    async fn test_intent_without_session_stays_stored() {
        let (app, _db, _sessions) = setup().await;

        let response = app
            .oneshot(recover_request(Some(intent_cookie("H1", "a@x.com"))))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            !clears_pending_cookie(&response),
            "the intent must stay stored for a later attempt"
        );
        let body = body_json(response).await;
        assert_eq!(body["status"], "idle");
    }

    #[tokio::test]
    async fn test_intent_for_another_account_is_discarded() {
        let (app, db, sessions) = setup().await;
        let user = seed_user(&db, "b@x.com").await;
        let invitation = InvitationRepository::new(db.clone())
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");
        let token = sessions
            .create_session_token(&user)
            .expect("Failed to create session token");

        let cookie_header =
            format!("mokki_session={token}; {}", intent_cookie("H1", "a@x.com"));
        let response = app
            .oneshot(recover_request(Some(cookie_header)))
            .await
            .expect("request failed");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(clears_pending_cookie(&response));
        let body = body_json(response).await;
        assert_eq!(body["status"], "discarded");

        // The matcher was never reached: the invitation is untouched.
        let reloaded = InvitationRepository::new(db.clone())
            .get(&invitation.invitation_id)
            .await
            .expect("Get failed")
            .expect("Invitation should exist");
        assert_eq!(reloaded.invite_status, InviteStatus::Pending);
    }

    #[tokio::test]
    async fn test_matching_intent_reconciles_and_clears() {
        let (app, db, sessions) = setup().await;
        let user = seed_user(&db, "a@x.com").await;
        let invitation = InvitationRepository::new(db.clone())
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");
        let token = sessions
            .create_session_token(&user)
            .expect("Failed to create session token");

        // Stored intents keep whatever casing the sign-up form carried.
        let cookie_header =
            format!("mokki_session={token}; {}", intent_cookie("H1", " A@X.com "));
        let response = app
            .oneshot(recover_request(Some(cookie_header)))
            .await
            .expect("request failed");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(clears_pending_cookie(&response));
        let body = body_json(response).await;
        assert_eq!(body["status"], "processed");
        assert_eq!(body["redirect"], "/dashboard");

        let reloaded = InvitationRepository::new(db.clone())
            .get(&invitation.invitation_id)
            .await
            .expect("Get failed")
            .expect("Invitation should exist");
        assert_eq!(reloaded.invite_status, InviteStatus::Accepted);
        assert_eq!(reloaded.user_id.as_deref(), Some(user.user_id.as_str()));
        assert!(reloaded.joined_at.is_some());
    }

    #[tokio::test]
    async fn test_matching_intent_with_no_pending_invite_still_moves_forward() {
        let (app, db, sessions) = setup().await;
        let user = seed_user(&db, "a@x.com").await;
        let token = sessions
            .create_session_token(&user)
            .expect("Failed to create session token");

        let cookie_header =
            format!("mokki_session={token}; {}", intent_cookie("H1", "a@x.com"));
        let response = app
            .oneshot(recover_request(Some(cookie_header)))
            .await
            .expect("request failed");

        // Absence of a match is silent: the intent is consumed and the user
        // is navigated forward anyway.
        assert_eq!(response.status(), StatusCode::OK);
        assert!(clears_pending_cookie(&response));
        let body = body_json(response).await;
        assert_eq!(body["status"], "processed");
    }

    #[tokio::test]
    async fn test_unreadable_intent_is_discarded() {
        let (app, _db, _sessions) = setup().await;

        let response = app
            .oneshot(recover_request(Some(
                "pending_house_invite=not-json".to_string(),
            )))
            .await
            .expect("request failed");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(clears_pending_cookie(&response));
        let body = body_json(response).await;
        assert_eq!(body["status"], "discarded");
    }
}
