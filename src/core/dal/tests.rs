//! Secure access pattern tests

use super::*;
use crate::config::Config;
use crate::core::models::UserRole;
use crate::storage::identity::{Identity, IdentityClaims};
use crate::storage::memory::{
    MemoryAuditSink, MemoryCache, MemoryDataStore, MemoryProfileStore, StaticIdentityStore,
};
use crate::storage::database::DataStore;
use crate::storage::profiles::Profile;
use crate::storage::{Filter, Order};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

struct World {
    core: SecurityCore,
    data: Arc<MemoryDataStore>,
    profiles: Arc<MemoryProfileStore>,
    sink: Arc<MemoryAuditSink>,
}

fn world() -> World {
    world_with_config(Config::default())
}

fn world_with_config(config: Config) -> World {
    let data = Arc::new(MemoryDataStore::new());
    let profiles = Arc::new(MemoryProfileStore::new());
    let cache = Arc::new(MemoryCache::new());
    let sink = Arc::new(MemoryAuditSink::new());
    let storage = StorageLayer::new(data.clone(), profiles.clone(), cache);
    World {
        core: SecurityCore::new(storage, sink.clone(), config),
        data,
        profiles,
        sink,
    }
}

impl World {
    fn register(&self, role: UserRole, salon_id: Option<Uuid>) -> Identity {
        let id = Uuid::new_v4();
        self.profiles.insert(Profile {
            id,
            email: Some(format!("{}@example.com", role)),
            role: None,
            salon_id: None,
        });
        Identity {
            id,
            email: format!("{}@example.com", role),
            claims: IdentityClaims {
                role: Some(role),
                salon_id,
            },
        }
    }

    fn dal(&self, identity: Identity) -> SecureDal {
        self.core.request(
            Arc::new(StaticIdentityStore::authenticated(identity)),
            RequestMeta::new(),
        )
    }

    fn anonymous_dal(&self) -> SecureDal {
        self.core
            .request(Arc::new(StaticIdentityStore::anonymous()), RequestMeta::new())
    }
}

#[tokio::test]
async fn test_query_strips_sensitive_fields() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));

    let result = dal
        .query(ResourceKind::Service, |_, _| async {
            Ok(json!([
                {"id": "s1", "name": "Cut", "api_key": "leak"},
                {"id": "s2", "name": "Color", "stripe_secret": "leak"}
            ]))
        })
        .await
        .unwrap();

    assert_eq!(
        result,
        json!([{"id": "s1", "name": "Cut"}, {"id": "s2", "name": "Color"}])
    );
}

#[tokio::test]
async fn test_query_denied_before_store_call() {
    let w = world();
    // Customers carry no staff:read grant
    let dal = w.dal(w.register(UserRole::Customer, None));

    let called = Arc::new(AtomicBool::new(false));
    let flag = called.clone();
    let err = dal
        .query(ResourceKind::Staff, move |_, _| {
            flag.store(true, Ordering::SeqCst);
            async { Ok(Value::Null) }
        })
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        SecurityError::Authorization { permission } if permission.as_str() == "staff:read"
    ));
    assert!(!called.load(Ordering::SeqCst));
    assert_eq!(w.sink.entries_for("permission_denied").len(), 1);
}

#[tokio::test]
async fn test_anonymous_caller_fails_authentication() {
    let w = world();
    let dal = w.anonymous_dal();

    let err = dal
        .query(ResourceKind::Service, |_, _| async { Ok(Value::Null) })
        .await
        .unwrap_err();

    assert!(matches!(err, SecurityError::Authentication(_)));
    assert_eq!(w.sink.entries_for("auth_failure").len(), 1);
}

#[tokio::test]
async fn test_query_wraps_store_failure() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    w.data.fail_next("connection reset");

    let err = dal
        .query(ResourceKind::Service, |store, _| async move {
            store.select("services", &[], None, None).await.map(Value::Array)
        })
        .await
        .unwrap_err();

    assert!(matches!(&err, SecurityError::DataAccess { resource, .. } if resource == "service"));
}

#[tokio::test]
async fn test_mutation_sanitizes_input_before_store() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));

    let result = dal
        .mutate(
            ResourceKind::Appointment,
            Action::Write,
            json!({
                "notes": "<script>alert(1)</script>trim please",
                "password": "should-not-echo"
            }),
            |store, _, input| async move { store.insert("appointments", input).await },
        )
        .await
        .unwrap();

    // Stored row got the sanitized note
    let stored = w
        .data
        .select_one("appointments", &[])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["notes"], "trim please");

    // Returned DTO is stripped
    assert_eq!(result["notes"], "trim please");
    assert!(result.get("password").is_none());
}

#[tokio::test]
async fn test_mutation_denied_carries_permission_key() {
    let w = world();
    // Customers may write appointments but never delete them
    let dal = w.dal(w.register(UserRole::Customer, None));

    let err = dal
        .mutate(
            ResourceKind::Appointment,
            Action::Delete,
            Value::Null,
            |_, _, _| async { Ok(Value::Null) },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        SecurityError::Authorization { permission } if permission.as_str() == "appointment:delete"
    ));
}

#[tokio::test]
async fn test_batch_is_all_or_nothing() {
    let w = world();
    // Customer may read services but not analytics
    let dal = w.dal(w.register(UserRole::Customer, None));

    let executed = Arc::new(AtomicBool::new(false));
    let flag = executed.clone();

    let err = dal
        .batch_query(vec![
            BatchQuery::new(ResourceKind::Service, move |_, _| {
                flag.store(true, Ordering::SeqCst);
                async { Ok(Value::Null) }
            }),
            BatchQuery::new(ResourceKind::Analytics, |_, _| async { Ok(Value::Null) }),
        ])
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        SecurityError::Authorization { permission } if permission.as_str() == "analytics:read"
    ));
    assert!(!executed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_batch_returns_results_in_order() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Staff, None));

    let results = dal
        .batch_query(vec![
            BatchQuery::new(ResourceKind::Appointment, |_, _| async {
                Ok(json!({"id": "a1", "internal_notes": "x"}))
            }),
            BatchQuery::new(ResourceKind::Customer, |_, _| async {
                Ok(json!({"id": "c1"}))
            }),
        ])
        .await
        .unwrap();

    assert_eq!(results, vec![json!({"id": "a1"}), json!({"id": "c1"})]);
}

#[tokio::test]
async fn test_paginated_totals() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    let spec = QuerySpec::table("services").order_by(Order::asc("name"));

    // Empty table
    let page = dal
        .paginated_query(ResourceKind::Service, 1, 20, &spec)
        .await
        .unwrap();
    assert_eq!((page.total_count, page.total_pages), (0, 0));
    assert!(page.data.is_empty());

    for (count, page_size, expected_pages) in [(1u64, 20u32, 1u64), (20, 20, 1), (21, 20, 2), (47, 10, 5)] {
        let w = world();
        let dal = w.dal(w.register(UserRole::Customer, None));
        for i in 0..count {
            w.data
                .seed("services", json!({"name": format!("svc-{:03}", i)}));
        }

        let page = dal
            .paginated_query(ResourceKind::Service, 1, page_size, &spec)
            .await
            .unwrap();
        assert_eq!(page.total_count, count);
        assert_eq!(page.total_pages, expected_pages, "count={}", count);
    }
}

#[tokio::test]
async fn test_paginated_last_page_is_partial() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    for i in 0..47 {
        w.data
            .seed("services", json!({"name": format!("svc-{:03}", i)}));
    }

    let spec = QuerySpec::table("services").order_by(Order::asc("name"));
    let page = dal
        .paginated_query(ResourceKind::Service, 5, 10, &spec)
        .await
        .unwrap();

    assert_eq!(page.data.len(), 7);
    assert_eq!(page.page, 5);
    assert_eq!(page.data[0]["name"], "svc-040");
}

#[tokio::test]
async fn test_paginated_respects_filters() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    let salon = Uuid::new_v4().to_string();
    w.data
        .seed("services", json!({"name": "a", "salon_id": salon}));
    w.data
        .seed("services", json!({"name": "b", "salon_id": "other"}));

    let spec = QuerySpec::table("services").filter(Filter::eq("salon_id", salon));
    let page = dal
        .paginated_query(ResourceKind::Service, 1, 20, &spec)
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.data[0]["name"], "a");
}

#[tokio::test]
async fn test_cached_query_skips_store_on_hit() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    let runs = Arc::new(AtomicUsize::new(0));
    let spec = CacheSpec::new("services:list").tag("services");

    for _ in 0..2 {
        let runs = runs.clone();
        let result = dal
            .cached_query(&spec, ResourceKind::Service, move |_, _| {
                runs.fetch_add(1, Ordering::SeqCst);
                async { Ok(json!([{"id": "s1", "secret": "x"}])) }
            })
            .await
            .unwrap();
        // Cached value is the stripped value
        assert_eq!(result, json!([{"id": "s1"}]));
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    dal.invalidate_cache_tag("services").await;

    let runs2 = runs.clone();
    dal.cached_query(&spec, ResourceKind::Service, move |_, _| {
        runs2.fetch_add(1, Ordering::SeqCst);
        async { Ok(json!([])) }
    })
    .await
    .unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cached_query_still_authorizes() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Customer, None));
    let spec = CacheSpec::new("analytics:list");

    let err = dal
        .cached_query(&spec, ResourceKind::Analytics, |_, _| async {
            Ok(Value::Null)
        })
        .await
        .unwrap_err();
    assert!(err.is_authorization());
}

#[tokio::test]
async fn test_transaction_executes_sequentially_without_rollback() {
    let w = world();
    let dal = w.dal(w.register(UserRole::Staff, None));

    let third_ran = Arc::new(AtomicBool::new(false));
    let flag = third_ran.clone();

    let err = dal
        .transaction(vec![
            TransactionOp::new(ResourceKind::Appointment, Action::Write, |store, _| async move {
                store.insert("appointments", json!({"status": "pending"})).await
            }),
            TransactionOp::new(ResourceKind::Appointment, Action::Update, |_, _| async {
                Err(SecurityError::data_access("appointments", "write conflict"))
            }),
            TransactionOp::new(ResourceKind::Appointment, Action::Update, move |_, _| {
                flag.store(true, Ordering::SeqCst);
                async { Ok(Value::Null) }
            }),
        ])
        .await
        .unwrap_err();

    assert!(matches!(err, SecurityError::DataAccess { .. }));
    // The first write stays applied; the operation after the failure never ran
    assert_eq!(w.data.table_len("appointments"), 1);
    assert!(!third_ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_transaction_gate_blocks_all_operations() {
    let w = world();
    // Customer may write appointments but not billing
    let dal = w.dal(w.register(UserRole::Customer, None));

    let first_ran = Arc::new(AtomicBool::new(false));
    let flag = first_ran.clone();

    let err = dal
        .transaction(vec![
            TransactionOp::new(ResourceKind::Appointment, Action::Write, move |_, _| {
                flag.store(true, Ordering::SeqCst);
                async { Ok(Value::Null) }
            }),
            TransactionOp::new(ResourceKind::Billing, Action::Write, |_, _| async {
                Ok(Value::Null)
            }),
        ])
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        SecurityError::Authorization { permission } if permission.as_str() == "billing:write"
    ));
    assert!(!first_ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_session_resolved_once_per_request() {
    use crate::storage::IdentityStore;
    use crate::utils::error::Result;

    struct CountingIdentityStore {
        identity: Identity,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl IdentityStore for CountingIdentityStore {
        async fn current_identity(&self) -> Result<Option<Identity>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(self.identity.clone()))
        }
    }

    let w = world();
    let identity = w.register(UserRole::Customer, None);
    let calls = Arc::new(AtomicUsize::new(0));
    let dal = w.core.request(
        Arc::new(CountingIdentityStore {
            identity,
            calls: calls.clone(),
        }),
        RequestMeta::new(),
    );

    dal.query(ResourceKind::Service, |_, _| async { Ok(Value::Null) })
        .await
        .unwrap();
    dal.query(ResourceKind::Service, |_, _| async { Ok(Value::Null) })
        .await
        .unwrap();
    dal.session().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disabled_cache_always_runs_query() {
    let mut config = Config::default();
    config.cache.enabled = false;
    let w = world_with_config(config);
    let dal = w.dal(w.register(UserRole::Customer, None));
    let runs = Arc::new(AtomicUsize::new(0));
    let spec = CacheSpec::new("services:list");

    for _ in 0..2 {
        let runs = runs.clone();
        dal.cached_query(&spec, ResourceKind::Service, move |_, _| {
            runs.fetch_add(1, Ordering::SeqCst);
            async { Ok(Value::Null) }
        })
        .await
        .unwrap();
    }
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}
