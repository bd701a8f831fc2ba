#[cfg(test)]
mod membership_tests {
    use crate::repository::house::HouseRepository;
    use crate::repository::invitation_service::InvitationService;
    use crate::repository::membership::MembershipRepository;
    use crate::repository::user::UserRepository;
    use crate::test_utils::create_test_db;
    use mokki_entity::types::User;
    use surrealdb::{Surreal, engine::any::Any};

    async fn seed_user(db: &Surreal<Any>, email: &str, name: &str) -> User {
        UserRepository::new(db.clone())
            .create(email, name, "$2b$12$placeholderplaceholderpl")
            .await
            .expect("Failed to create user")
    }

    #[tokio::test]
    async fn test_owner_is_a_member() {
        let db = create_test_db().await.expect("Failed to create test database");
        let owner = seed_user(&db, "owner@x.com", "Owner").await;
        let house = HouseRepository::new(db.clone())
            .create("Mökki", &owner.user_id, None)
            .await
            .expect("Failed to create house");

        let membership = MembershipRepository::new(db.clone());
        assert!(
            membership
                .is_member(&house.house_id, &owner.user_id)
                .await
                .expect("Membership check failed")
        );
        assert!(
            !membership
                .is_member(&house.house_id, "stranger")
                .await
                .expect("Membership check failed")
        );
    }

    #[tokio::test]
    async fn test_accepted_invitee_becomes_a_member() {
        let db = create_test_db().await.expect("Failed to create test database");
        let owner = seed_user(&db, "owner@x.com", "Owner").await;
        let guest = seed_user(&db, "guest@x.com", "Guest").await;
        let house = HouseRepository::new(db.clone())
            .create("Mökki", &owner.user_id, None)
            .await
            .expect("Failed to create house");

        crate::repository::invitation::InvitationRepository::new(db.clone())
            .create(&house.house_id, &guest.email, &owner.user_id)
            .await
            .expect("Failed to create invitation");

        let membership = MembershipRepository::new(db.clone());
        assert!(
            !membership
                .is_member(&house.house_id, &guest.user_id)
                .await
                .expect("Membership check failed"),
            "a pending invite does not grant membership"
        );

        InvitationService::new(db.clone())
            .reconcile(&house.house_id, &guest.email, &guest.user_id)
            .await
            .expect("Reconcile failed");

        assert!(
            membership
                .is_member(&house.house_id, &guest.user_id)
                .await
                .expect("Membership check failed")
        );

        let members = membership
            .members_of(&house.house_id)
            .await
            .expect("Member listing failed");
        assert_eq!(members.len(), 2);
        let owner_row = members
            .iter()
            .find(|member| member.user_id == owner.user_id)
            .expect("owner missing");
        let guest_row = members
            .iter()
            .find(|member| member.user_id == guest.user_id)
            .expect("guest missing");
        assert!(owner_row.is_owner);
        assert!(!guest_row.is_owner);
        assert!(guest_row.joined_at.is_some());
    }

    #[tokio::test]
    async fn test_joined_house_shows_up_in_user_listing() {
        let db = create_test_db().await.expect("Failed to create test database");
        let owner = seed_user(&db, "owner@x.com", "Owner").await;
        let guest = seed_user(&db, "guest@x.com", "Guest").await;
        let houses = HouseRepository::new(db.clone());
        let house = houses
            .create("Mökki", &owner.user_id, Some((61.168, 24.934)))
            .await
            .expect("Failed to create house");

        crate::repository::invitation::InvitationRepository::new(db.clone())
            .create(&house.house_id, &guest.email, &owner.user_id)
            .await
            .expect("Failed to create invitation");
        InvitationService::new(db.clone())
            .reconcile(&house.house_id, &guest.email, &guest.user_id)
            .await
            .expect("Reconcile failed");

        let listed = houses
            .list_for_user(&guest.user_id)
            .await
            .expect("House listing failed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].house_id, house.house_id);
    }
}
