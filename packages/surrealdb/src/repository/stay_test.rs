#[cfg(test)]
mod stay_tests {
    use crate::repository::error::RepositoryError;
    use crate::repository::stay::StayRepository;
    use crate::test_utils::create_test_db;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date literal")
    }

    #[tokio::test]
    async fn test_stays_list_in_calendar_order() {
        let db = create_test_db().await.expect("Failed to create test database");
        let stays = StayRepository::new(db);

        stays
            .create("H1", "user-1", date("2026-03-10"), date("2026-03-14"), None)
            .await
            .expect("Failed to create stay");
        stays
            .create(
                "H1",
                "user-2",
                date("2026-02-01"),
                date("2026-02-03"),
                Some("ski week".to_string()),
            )
            .await
            .expect("Failed to create stay");

        let listed = stays.list_for_house("H1").await.expect("Listing failed");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].starts_on, date("2026-02-01"));
        assert_eq!(listed[1].starts_on, date("2026-03-10"));
    }

    #[tokio::test]
    async fn test_stay_must_end_after_it_starts() {
        let db = create_test_db().await.expect("Failed to create test database");
        let stays = StayRepository::new(db);

        let result = stays
            .create("H1", "user-1", date("2026-03-10"), date("2026-03-09"), None)
            .await;
        assert!(matches!(result, Err(RepositoryError::Validation { .. })));

        // A single-day stay is fine
        let single_day = stays
            .create("H1", "user-1", date("2026-03-10"), date("2026-03-10"), None)
            .await;
        assert!(single_day.is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_the_stay() {
        let db = create_test_db().await.expect("Failed to create test database");
        let stays = StayRepository::new(db);
        let stay = stays
            .create("H1", "user-1", date("2026-03-10"), date("2026-03-14"), None)
            .await
            .expect("Failed to create stay");

        stays.delete(&stay.stay_id).await.expect("Delete failed");
        let reloaded = stays.get(&stay.stay_id).await.expect("Get failed");
        assert!(reloaded.is_none());
    }
}
