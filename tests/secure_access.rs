//! End-to-end tests of the secure access patterns over in-memory backends

mod common;

use common::{world, world_with_config};
use salon_dal::{
    Action, CacheSpec, Config, Order, QuerySpec, ResourceKind, ScopeColumns, SecurityError,
    UserRole, role_scope_filters,
};
use serde_json::{Value, json};
use std::time::Duration;

#[tokio::test]
async fn test_customer_booking_round_trip() {
    let w = world();
    let customer = w.register(UserRole::Customer, None);
    let customer_id = customer.id;
    let dal = w.dal(customer);

    // Book through the mutation pattern
    let booked = dal
        .mutate(
            ResourceKind::Appointment,
            Action::Write,
            json!({
                "customer_id": customer_id.to_string(),
                "start_time": "2026-09-01T10:00:00Z",
                "status": "pending",
                "notes": "<b>first visit</b>"
            }),
            |store, _, input| async move { store.insert("appointments", input).await },
        )
        .await
        .unwrap();
    assert_eq!(booked["notes"], "first visit");

    // Read it back, scoped to the caller's own rows
    let session = dal.session().await.unwrap().clone();
    let filters = role_scope_filters(&session, &ScopeColumns::default());
    let rows = dal
        .query(ResourceKind::Appointment, move |store, _| async move {
            store
                .select("appointments", &filters, None, None)
                .await
                .map(Value::Array)
        })
        .await
        .unwrap();

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "pending");
}

#[tokio::test]
async fn test_paginated_listing_with_scope() {
    let w = world();
    let salon = uuid::Uuid::new_v4();
    let owner = w.register(UserRole::Owner, Some(salon));
    let dal = w.dal(owner);

    for i in 0..25 {
        w.data.seed(
            "appointments",
            json!({
                "salon_id": salon.to_string(),
                "start_time": format!("2026-09-{:02}T10:00:00Z", i + 1),
            }),
        );
    }
    // Another salon's rows must not show up
    w.data.seed(
        "appointments",
        json!({"salon_id": "other", "start_time": "2026-09-01T09:00:00Z"}),
    );

    let session = dal.session().await.unwrap().clone();
    let mut spec = QuerySpec::table("appointments").order_by(Order::asc("start_time"));
    for filter in role_scope_filters(&session, &ScopeColumns::default()) {
        spec = spec.filter(filter);
    }

    let page = dal
        .paginated_query(ResourceKind::Appointment, 2, 10, &spec)
        .await
        .unwrap();

    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.data[0]["start_time"], "2026-09-11T10:00:00Z");
}

#[tokio::test]
async fn test_cached_results_shared_across_requests() {
    let w = world();
    let spec = CacheSpec::new("salon:front-page").tag("salons");

    let first = w.dal(w.register(UserRole::Customer, None));
    first
        .cached_query(&spec, ResourceKind::Salon, |_, _| async {
            Ok(json!([{"id": "s1", "name": "Shear Genius"}]))
        })
        .await
        .unwrap();

    // A different request hits the shared cache, not the store
    let second = w.dal(w.register(UserRole::Customer, None));
    let result = second
        .cached_query(&spec, ResourceKind::Salon, |_, _| async {
            panic!("store operation must not run on a cache hit")
        })
        .await
        .unwrap();
    assert_eq!(result, json!([{"id": "s1", "name": "Shear Genius"}]));
}

#[tokio::test]
async fn test_audit_sink_outage_does_not_break_requests() {
    let w = world();
    w.sink.set_failing(true);

    // A denied query audits; the audit write fails; the caller still gets
    // a clean authorization error, not a sink error.
    let dal = w.dal(w.register(UserRole::Guest, None));
    let err = dal
        .query(ResourceKind::Billing, |_, _| async { Ok(Value::Null) })
        .await
        .unwrap_err();
    assert!(err.is_authorization());

    // Allowed operations are untouched
    let ok = dal
        .query(ResourceKind::Service, |_, _| async { Ok(json!([])) })
        .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_rate_limited_booking_endpoint() {
    let w = world();
    let customer = w.register(UserRole::Customer, None);
    let user_id = customer.id;
    let limiter = w.core.rate_limiter();
    let window = Duration::from_secs(60);

    for _ in 0..3 {
        assert!(limiter.check(user_id, "create_booking", 3, window).await.unwrap());
    }

    let err = limiter
        .enforce(user_id, "create_booking", 3, window)
        .await
        .unwrap_err();
    assert!(matches!(err, SecurityError::RateLimitExceeded { .. }));

    // The denial is on the audit trail
    assert_eq!(w.sink.entries_for("rate_limit_exceeded").len(), 1);
}

#[tokio::test]
async fn test_transaction_books_and_bills_in_order() {
    let w = world();
    let salon = uuid::Uuid::new_v4();
    let owner = w.register(UserRole::Owner, Some(salon));
    let dal = w.dal(owner);

    use salon_dal::TransactionOp;
    let results = dal
        .transaction(vec![
            TransactionOp::new(ResourceKind::Appointment, Action::Write, {
                let salon = salon.to_string();
                move |store, _| async move {
                    store
                        .insert(
                            "appointments",
                            json!({"salon_id": salon, "status": "confirmed"}),
                        )
                        .await
                }
            }),
            TransactionOp::new(ResourceKind::Billing, Action::Write, {
                let salon = salon.to_string();
                move |store, _| async move {
                    store
                        .insert("billing", json!({"salon_id": salon, "amount": 65.0}))
                        .await
                }
            }),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(w.data.table_len("appointments"), 1);
    assert_eq!(w.data.table_len("billing"), 1);
}

#[tokio::test]
async fn test_store_failure_is_wrapped_with_context() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    w.data.fail_next("upstream timeout");

    let err = dal
        .query(ResourceKind::Service, |store, _| async move {
            store.select("services", &[], None, None).await.map(Value::Array)
        })
        .await
        .unwrap_err();

    match err {
        SecurityError::DataAccess { resource, message } => {
            assert_eq!(resource, "service");
            assert!(message.contains("upstream timeout"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_config_toggles_flow_through() {
    let mut config = Config::default();
    config.rate_limit.enabled = false;
    let w = world_with_config(config);
    let user = w.register(UserRole::Customer, None);

    for _ in 0..50 {
        assert!(
            w.core
                .rate_limiter()
                .check(user.id, "op", 1, Duration::from_secs(60))
                .await
                .unwrap()
        );
    }
}

#[tokio::test]
async fn test_scoped_query_uses_equality_filters() {
    let w = world();
    let staff = w.register(UserRole::Staff, None);
    let staff_id = staff.id;
    let dal = w.dal(staff);

    w.data.seed(
        "appointments",
        json!({"staff_id": staff_id.to_string(), "status": "pending"}),
    );
    w.data.seed(
        "appointments",
        json!({"staff_id": "someone-else", "status": "pending"}),
    );

    let session = dal.session().await.unwrap().clone();
    let filters = role_scope_filters(&session, &ScopeColumns::default());
    assert_eq!(filters.len(), 1);

    let rows = dal
        .query(ResourceKind::Appointment, move |store, _| async move {
            store
                .select("appointments", &filters, None, None)
                .await
                .map(Value::Array)
        })
        .await
        .unwrap();

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["staff_id"], staff_id.to_string());
}
