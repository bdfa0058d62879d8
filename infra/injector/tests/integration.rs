pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use appwire_injector::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_bound_instance_is_shared() {
        let injector = Injector::new();
        injector
            .configure(|binder| {
                binder.bind(Pool { dsn: "mem://".into(), read_only: false });
                Ok(())
            })
            .unwrap();

        let first = injector.resolve::<Pool>().unwrap();
        let second = injector.resolve::<Pool>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(injector.is_bound::<Pool>());
        assert_eq!(injector.len(), 1);
    }

    #[test]
    fn test_unscoped_provider_runs_on_every_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let injector = Injector::new();
        let counter = Arc::clone(&calls);
        injector
            .configure(move |binder| {
                binder.bind_to_provider(move |_| {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(n))
                });
                Ok(())
            })
            .unwrap();

        assert_eq!(*injector.resolve::<usize>().unwrap(), 0);
        assert_eq!(*injector.resolve::<usize>().unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unbound_type_is_reported() {
        let injector = Injector::new();
        let err = injector.resolve::<Pool>().unwrap_err();
        assert!(matches!(err, InjectError::Unbound { .. }));
        assert!(err.to_string().contains("Pool"));
    }

    #[test]
    fn test_configure_replaces_previous_bindings() {
        let injector = Injector::new();
        injector
            .configure(|binder| {
                binder.bind(AuditTrail(vec!["old"]));
                Ok(())
            })
            .unwrap();
        injector
            .configure(|binder| {
                binder.bind(Pool { dsn: "mem://".into(), read_only: false });
                Ok(())
            })
            .unwrap();

        assert!(!injector.is_bound::<AuditTrail>());
        assert!(injector.is_bound::<Pool>());
    }

    #[test]
    fn test_failed_configure_keeps_previous_bindings() {
        let injector = Injector::new();
        let deps = Arc::new(WebDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();

        let broken = Arc::new(BrokenDeps::new(TestConfig::shared("db://")));
        let err = injector.configure(|binder| broken.register(binder)).unwrap_err();

        assert!(err.to_string().contains("database offline"));
        assert_eq!(injector.resolve::<TestConfig>().unwrap().dsn, "mem://");
    }

    #[test]
    fn test_clear_drops_everything() {
        let injector = Injector::new();
        let deps = Arc::new(WebDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();
        assert!(!injector.is_empty());

        injector.clear();
        assert!(injector.is_empty());
    }

    #[test]
    fn test_builder_binds_its_config() {
        let config = TestConfig::shared("mem://");
        let deps = Arc::new(WebDeps::new(Arc::clone(&config)));
        let injector = Injector::new();
        injector.configure(|binder| deps.register(binder)).unwrap();

        let resolved = injector.resolve::<TestConfig>().unwrap();
        assert!(Arc::ptr_eq(&resolved, &config));
        assert_eq!(injector.resolve::<Pool>().unwrap().dsn, "mem://");
    }

    #[test]
    fn test_binder_order_and_override() {
        let web: Vec<_> = binder_list::<WebDeps>().iter().map(|entry| entry.name).collect();
        assert_eq!(web, ["bind_config", "bind_pool", "bind_session"]);

        let reporting: Vec<_> =
            binder_list::<ReportingDeps>().iter().map(|entry| entry.name).collect();
        assert_eq!(reporting, ["bind_config", "bind_pool", "bind_audit"]);

        let injector = Injector::new();
        let deps = Arc::new(ReportingDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();
        assert!(injector.resolve::<Pool>().unwrap().read_only);
        assert_eq!(injector.resolve::<AuditTrail>().unwrap().0, ["reporting"]);
    }

    #[test]
    fn test_scoped_value_is_memoized_per_scope() {
        let injector = Injector::new();
        let deps = Arc::new(WebDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();

        let first_scope = ScopeContext::request();
        let second_scope = ScopeContext::request();

        let a = injector.resolve_in::<Session>(&first_scope).unwrap();
        let b = injector.resolve_in::<Session>(&first_scope).unwrap();
        let c = injector.resolve_in::<Session>(&second_scope).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(a.scope_id, first_scope.id());
        assert_eq!(c.scope_id, second_scope.id());
        assert!(Arc::ptr_eq(&a.pool, &c.pool));
        assert!(first_scope.contains("session"));
    }

    #[test]
    fn test_scoped_value_requires_matching_scope() {
        let injector = Injector::new();
        let deps = Arc::new(WebDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();

        let outside = injector.resolve::<Session>().unwrap_err();
        assert!(matches!(outside, InjectError::NoScopeContext { .. }));

        let task = ScopeContext::task();
        let mismatch = injector.resolve_in::<Session>(&task).unwrap_err();
        assert!(matches!(mismatch, InjectError::ScopeMismatch { .. }));
        assert!(task.is_empty());
    }

    #[test]
    fn test_builder_without_context_rejects_scoped_resolution() {
        let injector = Injector::new();
        let deps = Arc::new(UnscopedDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();

        let scope = ScopeContext::request();
        let err = injector.resolve_in::<Session>(&scope).unwrap_err();
        assert!(matches!(err, InjectError::NoScopeContext { .. }));
        assert!(err.to_string().contains("UnscopedDeps"));
    }

    #[test]
    fn test_concurrent_resolution_shares_one_value() {
        let injector = Injector::new();
        let deps = Arc::new(WebDeps::new(TestConfig::shared("mem://")));
        injector.configure(|binder| deps.register(binder)).unwrap();
        let scope = ScopeContext::request();

        let sessions: Vec<Arc<Session>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| injector.resolve_in::<Session>(&scope).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = scope.get::<Session>("session").unwrap();
        assert!(sessions.iter().all(|session| Arc::ptr_eq(session, &stored)));
    }

    #[test]
    fn test_provider_error_context() {
        let injector = Injector::new();
        injector
            .configure(|binder| {
                binder.bind_to_provider::<Pool, _>(|_| {
                    Err(InjectError::provider("refused")).context("Opening pool")
                });
                Ok(())
            })
            .unwrap();

        let err = injector.resolve::<Pool>().unwrap_err();
        assert_eq!(err.to_string(), "Provider failed (Opening pool): refused");
    }
}
