//! Integration tests for the PostgreSQL funding store
//!
//! These tests start a PostgreSQL container and are ignored by default.
//! Run them with `cargo test -p infra_db -- --ignored`.

use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::{ApplicationId, HealthCheckable, UserId};
use domain_funding::{FundingError, FundingService, FundingStore};
use infra_db::PostgresFundingStore;
use std::sync::Arc;
use test_utils::{
    assert_funding_balances, assert_newest_first, FundingFixtures, FundingPayloadBuilder,
    TestApplicationBuilder, TestDatabase,
};

async fn setup() -> (TestDatabase, PostgresFundingStore) {
    let db = TestDatabase::new().await.expect("Failed to start test database");
    let store = PostgresFundingStore::new(db.pool().clone());
    (db, store)
}

// ============================================================================
// Application Tests
// ============================================================================

mod application_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_save_and_load_application() {
        let (_db, store) = setup().await;
        let application = TestApplicationBuilder::new()
            .with_loan_amount(dec!(750000.50))
            .with_loan_term(18)
            .with_interest_rate(dec!(7.125))
            .with_security_value(dec!(1200000))
            .build();

        store.save_application(&application).await.unwrap();
        let loaded = store.get_application(application.id).await.unwrap();

        assert_eq!(loaded.id, application.id);
        assert_eq!(loaded.reference_number, application.reference_number);
        assert_eq!(loaded.loan_amount, Some(dec!(750000.50)));
        assert_eq!(loaded.loan_term, Some(18));
        assert_eq!(loaded.interest_rate, Some(dec!(7.125)));
        assert_eq!(loaded.security_value, Some(dec!(1200000)));
        assert!(loaded.funding_result.is_none());
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_missing_application_is_not_found() {
        let (_db, store) = setup().await;
        let err = store.get_application(ApplicationId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_health_check() {
        let (_db, store) = setup().await;
        let health = store.health_check().await;
        assert!(health.is_operational());
        assert_eq!(health.adapter_id, "postgres-funding-store");
    }
}

// ============================================================================
// Calculation Tests
// ============================================================================

mod calculation_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_calculation_writes_history_and_cache() {
        let (db, store) = setup().await;
        let application = FundingFixtures::reference_application();
        store.save_application(&application).await.unwrap();

        let user = UserId::new();
        db.insert_user(user, "officer@example.com").await.unwrap();

        let service = FundingService::new(Arc::new(store.clone()));
        let outcome = service
            .calculate(application.id, &FundingFixtures::reference_payload(), Some(user))
            .await
            .unwrap();

        assert_eq!(outcome.result.total_fees, FundingFixtures::reference_total_fees());
        assert_funding_balances(&outcome.result, dec!(1000000));

        let loaded = store.get_application(application.id).await.unwrap();
        assert_eq!(loaded.funding_result, Some(outcome.result.clone()));

        let history = store.list_calculations(application.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, outcome.record.id);
        assert_eq!(history[0].created_by, Some(user));
        assert_eq!(history[0].calculation_input, outcome.record.calculation_input);
        assert_eq!(history[0].calculation_result, outcome.result);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_history_is_newest_first() {
        let (db, store) = setup().await;
        let application = FundingFixtures::reference_application();
        store.save_application(&application).await.unwrap();
        let service = FundingService::new(Arc::new(store.clone()));

        let first = service
            .calculate(application.id, &FundingFixtures::reference_payload(), None)
            .await
            .unwrap();
        let payload = FundingPayloadBuilder::new().with_capped_interest_months(6).build();
        let second = service.calculate(application.id, &payload, None).await.unwrap();

        let history = store.list_calculations(application.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_newest_first(&history);
        assert_eq!(history[0].id, second.record.id);
        assert_eq!(history[1].id, first.record.id);

        let loaded = store.get_application(application.id).await.unwrap();
        assert_eq!(loaded.funding_result, Some(second.result));
        assert_eq!(db.count_rows("funding_calculation_history").await.unwrap(), 2);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_unknown_user_is_stored_as_null() {
        let (_db, store) = setup().await;
        let application = FundingFixtures::reference_application();
        store.save_application(&application).await.unwrap();
        let service = FundingService::new(Arc::new(store.clone()));

        service
            .calculate(application.id, &FundingFixtures::reference_payload(), Some(UserId::new()))
            .await
            .unwrap();

        let history = store.list_calculations(application.id).await.unwrap();
        assert_eq!(history[0].created_by, None);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_rejected_input_writes_nothing() {
        let (db, store) = setup().await;
        let application = FundingFixtures::reference_application();
        store.save_application(&application).await.unwrap();
        let service = FundingService::new(Arc::new(store.clone()));

        let payload = FundingPayloadBuilder::new().with_capped_interest_months(13).build();
        let err = service.calculate(application.id, &payload, None).await.unwrap_err();
        assert!(matches!(err, FundingError::Validation(_)));

        assert_eq!(db.count_rows("funding_calculation_history").await.unwrap(), 0);
        let loaded = store.get_application(application.id).await.unwrap();
        assert!(loaded.funding_result.is_none());
    }
}

// ============================================================================
// Loan Extension Tests
// ============================================================================

mod extension_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_extension_updates_application_and_writes_note() {
        let (_db, store) = setup().await;
        let application = FundingFixtures::reference_application();
        store.save_application(&application).await.unwrap();
        let service = FundingService::new(Arc::new(store.clone()));

        let calculated = service
            .calculate(application.id, &FundingFixtures::reference_payload(), None)
            .await
            .unwrap();
        let (updated, note) = service
            .extend_loan(application.id, &FundingFixtures::extension_payload(), None)
            .await
            .unwrap();

        assert_eq!(updated.interest_rate, Some(dec!(9.25)));
        assert_eq!(updated.loan_amount, Some(dec!(1100000)));
        assert_eq!(updated.funding_result, Some(calculated.result));

        let notes = store.list_notes(application.id).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, note.id);
        assert_eq!(notes[0].title, "Loan Extended");
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_extension_of_missing_application_writes_no_note() {
        let (db, store) = setup().await;
        let service = FundingService::new(Arc::new(store.clone()));

        let err = service
            .extend_loan(ApplicationId::new(), &json!({"new_rate": 9, "new_loan_amount": 1, "new_repayment": 1}), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FundingError::ApplicationNotFound(_)));
        assert_eq!(db.count_rows("application_notes").await.unwrap(), 0);
    }
}
