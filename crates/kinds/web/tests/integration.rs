pub mod fixtures;

#[cfg(test)]
mod tests {
    use crate::fixtures::{SiteConfig, SiteFactory};
    use appwire_injector::Injector;
    use appwire_kernel::factory::AppFactory;
    use appwire_web::{Inject, WebApp};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn site(injector: &Injector) -> WebApp {
        SiteFactory.create("site", Some(SiteConfig::shared("hi there")), Some(injector)).unwrap()
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_factory_pushes_config_into_the_app() {
        let injector = Injector::new();
        let app = site(&injector);

        assert_eq!(app.name(), "site");
        assert_eq!(app.config_value("greeting"), Some(&json!("hi there")));
    }

    #[tokio::test]
    async fn test_handlers_resolve_bound_config() {
        let injector = Injector::new();
        let router = site(&injector).into_router(injector);

        let (status, body) = get(&router, "/greeting").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hi there");
    }

    #[tokio::test]
    async fn test_scoped_values_are_shared_within_a_request() {
        let injector = Injector::new();
        let router = site(&injector).into_router(injector);

        let (_, first) = get(&router, "/token").await;
        let (_, second) = get(&router, "/token").await;

        assert_eq!(first, "0:0:true");
        assert_eq!(second, "1:1:true");
    }

    #[tokio::test]
    async fn test_nested_routes_see_the_request_scope() {
        let injector = Injector::new();
        let router = site(&injector).into_router(injector);

        let (status, body) = get(&router, "/api/scope").await;
        assert_eq!(status, StatusCode::OK);
        let (scope, token_scope) = body.split_once('=').unwrap();
        assert_eq!(scope.len(), 10);
        assert_eq!(scope, token_scope);
    }

    #[tokio::test]
    async fn test_unbound_dependency_is_an_internal_error() {
        let injector = Injector::new();
        let router = site(&injector).into_router(injector);

        let (status, body) = get(&router, "/unbound").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Dependency resolution failed"), "{body}");
        assert!(body.contains("Unbound"), "{body}");
    }

    #[tokio::test]
    async fn test_router_without_scope_layer_rejects_injection() {
        let router = Router::new().route(
            "/greeting",
            axum::routing::get(|Inject(config): Inject<SiteConfig>| async move { config.greeting.clone() }),
        );

        let (status, body) = get(&router, "/greeting").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Request scope missing: /greeting");
    }
}
