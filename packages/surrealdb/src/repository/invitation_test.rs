#[cfg(test)]
mod invitation_tests {
    use crate::repository::invitation::InvitationRepository;
    use crate::repository::invitation_service::{InvitationService, ReconcileOutcome};
    use crate::test_utils::create_test_db;
    use mokki_entity::types::InviteStatus;
    use std::time::Duration;
    use surrealdb::{Surreal, engine::any::Any};

    async fn setup() -> Surreal<Any> {
        create_test_db().await.expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_accept_stamps_user_and_joined_at() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());

        let created = invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");
        assert_eq!(created.invite_status, InviteStatus::Pending);
        assert!(created.user_id.is_none());
        assert!(created.joined_at.is_none());

        let accepted = invitations
            .accept(&created.invitation_id, "user-1")
            .await
            .expect("Accept failed")
            .expect("Expected the pending invitation to be accepted");
        assert_eq!(accepted.invite_status, InviteStatus::Accepted);
        assert_eq!(accepted.user_id.as_deref(), Some("user-1"));
        assert!(accepted.joined_at.is_some());

        // Persisted, not just returned
        let reloaded = invitations
            .get(&created.invitation_id)
            .await
            .expect("Get failed")
            .expect("Invitation should still exist");
        assert_eq!(reloaded.invite_status, InviteStatus::Accepted);
        assert_eq!(reloaded.user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_find_pending_is_case_and_whitespace_insensitive() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");

        let matched = invitations
            .find_pending("H1", " A@X.com ")
            .await
            .expect("Lookup failed");
        assert!(matched.is_some());
    }

    #[tokio::test]
    async fn test_find_pending_ignores_other_emails_and_houses() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");

        assert!(
            invitations
                .find_pending("H1", "b@x.com")
                .await
                .expect("Lookup failed")
                .is_none()
        );
        assert!(
            invitations
                .find_pending("H2", "a@x.com")
                .await
                .expect("Lookup failed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_accepted_invitation_is_no_longer_matchable() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        let created = invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");
        invitations
            .accept(&created.invitation_id, "user-1")
            .await
            .expect("Accept failed")
            .expect("Expected acceptance");

        let matched = invitations
            .find_pending("H1", "a@x.com")
            .await
            .expect("Lookup failed");
        assert!(matched.is_none());
    }

    #[tokio::test]
    async fn test_accept_is_single_use() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        let created = invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");

        let first = invitations
            .accept(&created.invitation_id, "user-1")
            .await
            .expect("Accept failed");
        let second = invitations
            .accept(&created.invitation_id, "user-2")
            .await
            .expect("Accept failed");

        assert!(first.is_some());
        assert!(second.is_none());

        // The first writer won; the second left no trace.
        let reloaded = invitations
            .get(&created.invitation_id)
            .await
            .expect("Get failed")
            .expect("Invitation should exist");
        assert_eq!(reloaded.user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_most_recent_pending_invitation_wins() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        let older = invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newer = invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");

        let matched = invitations
            .find_pending("H1", "a@x.com")
            .await
            .expect("Lookup failed")
            .expect("Expected a match");
        assert_eq!(matched.invitation_id, newer.invitation_id);
        assert_ne!(matched.invitation_id, older.invitation_id);
    }

    #[tokio::test]
    async fn test_reconcile_accepts_pending_invitation() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        let service = InvitationService::new(db.clone());
        let created = invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");

        let outcome = service
            .reconcile("H1", " A@X.com ", "user-1")
            .await
            .expect("Reconcile failed");
        assert_eq!(outcome, ReconcileOutcome::Accepted(created.invitation_id.clone()));

        let reloaded = invitations
            .get(&created.invitation_id)
            .await
            .expect("Get failed")
            .expect("Invitation should exist");
        assert_eq!(reloaded.invite_status, InviteStatus::Accepted);
        assert_eq!(reloaded.user_id.as_deref(), Some("user-1"));
        assert!(reloaded.joined_at.is_some());
    }

    #[tokio::test]
    async fn test_reconcile_no_match_is_silent() {
        let db = setup().await;
        let service = InvitationService::new(db.clone());

        let outcome = service
            .reconcile("H1", "nobody@x.com", "user-1")
            .await
            .expect("Reconcile failed");
        assert_eq!(outcome, ReconcileOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_reconcile_twice_second_pass_finds_nothing() {
        let db = setup().await;
        let invitations = InvitationRepository::new(db.clone());
        let service = InvitationService::new(db.clone());
        invitations
            .create("H1", "a@x.com", "owner-1")
            .await
            .expect("Failed to create invitation");

        let first = service
            .reconcile("H1", "a@x.com", "user-1")
            .await
            .expect("Reconcile failed");
        assert!(matches!(first, ReconcileOutcome::Accepted(_)));

        let second = service
            .reconcile("H1", "a@x.com", "user-1")
            .await
            .expect("Reconcile failed");
        assert_eq!(second, ReconcileOutcome::NoMatch);
    }
}
