use appwire::injector::Injector;
use appwire::web::WebApp;
use axum::Router;
use tower_http::trace::TraceLayer;

pub(crate) fn init(app: WebApp, injector: Injector) -> Router {
    app.into_router(injector).layer(TraceLayer::new_for_http())
}
