use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, categories, foods, serving_units};

pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(foods::router())
        .merge(categories::router())
        .merge(serving_units::router())
        .route("/health", get(|| async { "ok" }));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::auth::{JwtKeys, Role};

    fn token(state: &AppState, role: Role) -> String {
        JwtKeys::from_ref(state)
            .sign_access(Uuid::new_v4(), role)
            .expect("sign access")
    }

    async fn call(
        state: &AppState,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = bearer {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let res = build_app(state.clone()).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_is_open() {
        let state = AppState::fake();
        let req = Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap();
        let res = build_app(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn catalog_requires_admin() {
        let state = AppState::fake();
        let (status, _) = call(&state, "GET", "/api/v1/foods", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let user = token(&state, Role::User);
        let (status, body) = call(&state, "GET", "/api/v1/foods", Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].as_str().unwrap().contains("/api/v1/me"));

        let admin = token(&state, Role::Admin);
        let (status, body) = call(&state, "GET", "/api/v1/foods", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["pageSize"], 20);
    }

    #[tokio::test]
    async fn bad_filter_is_400_not_empty_page() {
        let state = AppState::fake();
        let admin = token(&state, Role::Admin);
        let (status, body) = call(
            &state,
            "GET",
            "/api/v1/foods?calories_min=plenty",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("calories"));
    }

    #[tokio::test]
    async fn unknown_category_on_create_is_400() {
        let state = AppState::fake();
        let admin = token(&state, Role::Admin);
        let (status, body) = call(
            &state,
            "POST",
            "/api/v1/foods",
            Some(&admin),
            Some(json!({
                "name": "Kale",
                "calories": "49",
                "protein": "4.3",
                "fat": "0.9",
                "carbohydrates": "8.8",
                "fiber": "3.6",
                "sugar": "2.3",
                "categoryId": Uuid::new_v4().to_string()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("unknown category"));
    }

    #[tokio::test]
    async fn missing_food_form_is_null() {
        let state = AppState::fake();
        let admin = token(&state, Role::Admin);
        let uri = format!("/api/v1/foods/{}/form", Uuid::new_v4());
        let (status, body) = call(&state, "GET", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn create_then_filter_by_category() {
        let state = AppState::fake();
        let admin = token(&state, Role::Admin);

        let (status, cat) = call(
            &state,
            "POST",
            "/api/v1/categories",
            Some(&admin),
            Some(json!({ "name": "Nuts" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let cat_id = cat["id"].as_str().unwrap().to_string();

        let (status, unit) = call(
            &state,
            "POST",
            "/api/v1/serving-units",
            Some(&admin),
            Some(json!({ "name": "handful" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        for (name, kcal, category) in [("Almonds", "579", cat_id.as_str()), ("Pear", "57", "")] {
            let (status, _) = call(
                &state,
                "POST",
                "/api/v1/foods",
                Some(&admin),
                Some(json!({
                    "name": name,
                    "calories": kcal,
                    "protein": "1",
                    "fat": "1",
                    "carbohydrates": "1",
                    "fiber": "1",
                    "sugar": "1",
                    "categoryId": category,
                    "servingUnits": [{ "servingUnitId": unit["id"], "grams": "28" }]
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let uri = format!("/api/v1/foods?category_id={cat_id}");
        let (_, page) = call(&state, "GET", &uri, Some(&admin), None).await;
        assert_eq!(page["total"], 1);
        assert_eq!(page["data"][0]["name"], "Almonds");
        assert_eq!(page["data"][0]["categoryName"], "Nuts");
        assert_eq!(page["data"][0]["servingUnits"][0]["servingUnitName"], "handful");

        let (_, page) = call(&state, "GET", "/api/v1/foods?category_id=0", Some(&admin), None).await;
        assert_eq!(page["total"], 2);

        let id = page["data"][0]["id"].as_str().unwrap().to_string();
        let (status, form) = call(&state, "GET", &format!("/api/v1/foods/{id}/form"), Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(form["action"], "update");
        assert_eq!(form["calories"], "579");

        let (status, _) = call(&state, "DELETE", &format!("/api/v1/foods/{id}"), Some(&admin), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&state, "DELETE", &format!("/api/v1/foods/{id}"), Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
