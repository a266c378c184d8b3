//! Route table, session layer and middleware stack

use axum::{
    middleware,
    routing::{any, MethodRouter},
    Router,
};
use time::Duration;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

use crate::config::SessionConfig;

use super::handlers;
use super::middleware::{logging_middleware, security_headers_middleware};
use super::site::Route;
use super::state::AppState;

/// Build the site router.
///
/// Each route is mounted at its exact path under the base URL and accepts any
/// method; everything else falls through to the 404 page.
pub fn create_router(state: AppState, session: &SessionConfig) -> Router {
    let mut router = Router::new();

    for route in Route::ALL {
        router = router.route(&state.site.mount_path(route), route_handler(route));
    }

    router
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(session_layer(session))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn route_handler(route: Route) -> MethodRouter<AppState> {
    match route {
        Route::Home => any(handlers::home),
        Route::SignUp => any(handlers::sign_up),
        Route::SignIn => any(handlers::sign_in),
        Route::SignOut => any(handlers::sign_out),
    }
}

/// Cookie-backed sessions held in process memory
pub fn session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.inactivity_minutes,
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::infrastructure::storage::Stores;
    use crate::infrastructure::user::{AccountService, Argon2Hasher, LOGIN_TAKEN};
    use crate::web::site::Site;
    use crate::web::views::SIGN_IN_FAILED;
    use std::sync::Arc;

    const SIGN_UP_FORM: &str = "email=bob%40example.com&login=bobby1&password=secret1\
                                &password2=secret1&country_id=3&agree=1";

    fn app(base_url: &str) -> Router {
        let stores = Stores::in_memory();
        let accounts =
            AccountService::new(stores.users, stores.countries, Arc::new(Argon2Hasher::new()))
                .unwrap();

        create_router(
            AppState::new(accounts, Site::new(base_url)),
            &SessionConfig::default(),
        )
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(form.to_string())).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// `name=value` part of the session cookie set by a response
    fn session_cookie(response: &Response) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_home_is_anonymous_by_default() {
        let app = app("");

        let response = send(&app, get("/", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert!(html.contains(r#"<a href="/sign-in">Sign in</a>"#));
    }

    #[tokio::test]
    async fn test_sign_up_form_lists_countries() {
        let app = app("");

        let response = send(&app, get("/sign-up", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"<option value="3">Canada</option>"#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[tokio::test]
    async fn test_sign_up_signs_in_and_redirects() {
        let app = app("");

        let response = send(&app, post("/sign-up", SIGN_UP_FORM, None)).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/");
        let cookie = session_cookie(&response);
        assert!(cookie.starts_with("gatehouse_session="));
        assert!(body_text(response).await.is_empty());

        let home = body_text(send(&app, get("/", Some(&cookie))).await).await;
        assert!(home.contains("Signed in as <strong>bobby1</strong>"));
    }

    #[tokio::test]
    async fn test_sign_up_missing_email_rerenders_form() {
        let app = app("");
        let form = "login=bobby1&password=secret1&password2=secret1&country_id=3&agree=1";

        let response = send(&app, post("/sign-up", form, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("The Email is required"));
        assert!(html.contains(r#"value="bobby1""#));
        assert!(!html.contains("secret1"));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_login() {
        let app = app("");
        send(&app, post("/sign-up", SIGN_UP_FORM, None)).await;

        let form = "email=other%40example.com&login=bobby1&password=secret1\
                    &password2=secret1&country_id=3&agree=1";
        let response = send(&app, post("/sign-up", form, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(LOGIN_TAKEN));
        assert!(html.contains(r#"value="other@example.com""#));
    }

    #[tokio::test]
    async fn test_sign_in_with_login_or_email() {
        let app = app("");
        send(&app, post("/sign-up", SIGN_UP_FORM, None)).await;

        for login in ["bobby1", "bob%40example.com"] {
            let form = format!("login={}&password=secret1", login);
            let response = send(&app, post("/sign-in", &form, None)).await;

            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(location(&response), "/");

            let cookie = session_cookie(&response);
            let home = body_text(send(&app, get("/", Some(&cookie))).await).await;
            assert!(home.contains("Hello, <strong>bobby1</strong>"));
        }
    }

    #[tokio::test]
    async fn test_sign_in_failures_show_generic_error() {
        let app = app("");
        send(&app, post("/sign-up", SIGN_UP_FORM, None)).await;

        for form in ["login=bobby1", "login=bobby1&password=wrong-pass", ""] {
            let response = send(&app, post("/sign-in", form, None)).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_text(response).await.contains(SIGN_IN_FAILED));
        }
    }

    #[tokio::test]
    async fn test_bodyless_post_rerenders_forms() {
        let app = app("");

        for (uri, expected) in [("/sign-in", SIGN_IN_FAILED), ("/sign-up", "The Email is required")] {
            let request = Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = send(&app, request).await;

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(response.headers().get(header::SET_COOKIE).is_none());
            assert!(body_text(response).await.contains(expected), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_json_post_is_rejected() {
        let app = app("");
        let request = Request::builder()
            .method(Method::POST)
            .uri("/sign-in")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"login":"bobby1"}"#))
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_session_untouched() {
        let app = app("");
        let signed_up = send(&app, post("/sign-up", SIGN_UP_FORM, None)).await;
        let cookie = session_cookie(&signed_up);

        for form in ["login=bobby1", "login=bobby1&password=wrong-pass"] {
            let response = send(&app, post("/sign-in", form, Some(&cookie))).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(header::SET_COOKIE).is_none());
        }

        let anonymous = send(&app, post("/sign-in", "login=bobby1", None)).await;
        assert!(anonymous.headers().get(header::SET_COOKIE).is_none());

        let home = body_text(send(&app, get("/", Some(&cookie))).await).await;
        assert!(home.contains("Signed in as <strong>bobby1</strong>"));
    }

    #[tokio::test]
    async fn test_request_id_is_assigned_or_echoed() {
        let app = app("");

        let generated = send(&app, get("/", None)).await;
        let id = generated.headers()["x-request-id"].to_str().unwrap();
        assert_eq!(id.len(), 36);

        let request = Request::builder()
            .uri("/")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let echoed = send(&app, request).await;
        assert_eq!(echoed.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn test_sign_in_get_has_no_error() {
        let app = app("");

        let html = body_text(send(&app, get("/sign-in", None)).await).await;

        assert!(html.contains("<form"));
        assert!(!html.contains(SIGN_IN_FAILED));
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let app = app("");
        let signed_up = send(&app, post("/sign-up", SIGN_UP_FORM, None)).await;
        let cookie = session_cookie(&signed_up);

        let response = send(&app, get("/sign-out", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/");

        let home = body_text(send(&app, get("/", Some(&cookie))).await).await;
        assert!(!home.contains("Signed in as"));
    }

    #[tokio::test]
    async fn test_sign_out_when_anonymous() {
        let app = app("");

        let response = send(&app, get("/sign-out", None)).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let app = app("");

        for uri in ["/does-not-exist", "/sign-up/", "/Sign-In"] {
            let response = send(&app, get(uri, None)).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert!(body_text(response).await.contains("Page not found"));
        }
    }

    #[tokio::test]
    async fn test_routes_mount_under_base_path() {
        let app = app("https://example.com/app/");

        assert_eq!(send(&app, get("/app/", None)).await.status(), StatusCode::OK);
        assert_eq!(send(&app, get("/", None)).await.status(), StatusCode::NOT_FOUND);

        let response = send(&app, get("/app/sign-out", None)).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://example.com/app/");
    }

    #[tokio::test]
    async fn test_responses_carry_security_headers() {
        let app = app("");

        let response = send(&app, get("/", None)).await;

        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }
}
