use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::MatchedPath,
    http::{HeaderName, Request},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span};
use transit_common::views::ApiErrorResponse;
use transit_db::{fixtures::Fixtures, storage::Storage, storage::memory::MemoryStorage};
use utoipa::{
    ToSchema,
    openapi::{
        Components, Info, License, OpenApi, RefOr,
        path::Operation,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{config::TransitApiConfig, context::ApiContext, handlers};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Load storage from the configured fixtures and build the HTTP router.
pub fn make(cfg: &TransitApiConfig) -> anyhow::Result<Router> {
    let fixtures = match &cfg.fixtures_file {
        Some(path) => Fixtures::from_file(path)
            .with_context(|| format!("failed to load fixtures from {}", path.display()))?,
        None => Fixtures::demo(),
    };

    let db: Arc<dyn Storage> = Arc::new(MemoryStorage::new(fixtures)?);
    info!("Fleet store ready");

    let context = ApiContext::from_config(cfg, db)?;
    Ok(build(context))
}

/// The OpenAPI document describing every route.
pub fn openapi() -> OpenApi {
    let (_, mut api) = api_routes().split_for_parts();

    api.paths.paths.iter_mut().for_each(|(_path, item)| {
        apply_default_errors(&mut item.get);
        apply_default_errors(&mut item.post);
        apply_default_errors(&mut item.patch);
        apply_default_errors(&mut item.put);
        apply_default_errors(&mut item.delete);
        apply_default_errors(&mut item.trace);
        apply_default_errors(&mut item.head);
        apply_default_errors(&mut item.options);
    });

    api.components
        .get_or_insert_with(Components::default)
        .add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );

    api
}

pub(crate) fn build(context: ApiContext) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    let span = info_span!(
                        "http_request",
                        method = req.method().to_string(),
                        request_id = Option::<&str>::None,
                        path = Option::<&str>::None,
                    );

                    if let Some(request_id) = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                    {
                        span.record("request_id", request_id);
                    };

                    if let Some(path) = req.extensions().get::<MatchedPath>() {
                        span.record("path", path.as_str())
                    } else {
                        span.record("path", req.uri().path())
                    };

                    span
                }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id));

    let (router, _) = api_routes().split_for_parts();

    router.layer(middleware).with_state(context)
}

fn api_routes() -> OpenApiRouter<ApiContext> {
    let openapi = OpenApi::builder()
        .info(
            Info::builder()
                .title("Transit Fleet API Reference")
                .version(env!("CARGO_PKG_VERSION"))
                .license(Some(
                    License::builder()
                        .name("Apache 2.0 License")
                        .identifier(Some(env!("CARGO_PKG_LICENSE")))
                        .build(),
                )),
        )
        .build();

    OpenApiRouter::with_openapi(openapi)
        .routes(routes!(handlers::health_check))
        .routes(routes!(handlers::auth::auth_login))
        .routes(routes!(handlers::buses::list_buses))
        .routes(routes!(handlers::buses::get_bus))
        .routes(routes!(handlers::buses::bus_overview))
        .routes(routes!(handlers::stops::list_stops))
        .routes(routes!(handlers::stops::get_stop))
        .routes(routes!(handlers::stops::stop_arrivals))
        .routes(routes!(handlers::stops::next_bus))
        .routes(routes!(handlers::routes::get_route))
        .routes(routes!(handlers::driver::driver_bus))
        .routes(routes!(handlers::driver::update_location))
}

fn apply_default_errors(item: &mut Option<Operation>) {
    if let Some(item) = item {
        item.responses.responses.insert(
            "500".into(),
            RefOr::Ref(
                utoipa::openapi::Ref::builder()
                    .summary("Internal server error")
                    .ref_location_from_schema_name(ApiErrorResponse::name())
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::StatusCode,
    };
    use clap::Parser;
    use tower::ServiceExt;

    use super::*;

    fn config(args: &[&str]) -> TransitApiConfig {
        TransitApiConfig::try_parse_from(std::iter::once("transit-api").chain(args.iter().copied()))
            .unwrap()
    }

    fn write_fixtures(name: &str, fixtures: &Fixtures) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(fixtures).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn fixtures_file_replaces_demo_fleet() {
        let mut fixtures = Fixtures::demo();
        fixtures.buses[0].number = "X900".into();
        let path = write_fixtures("transit-fleet", &fixtures);

        let router = make(&config(&[
            "--jwt-secret",
            "s",
            "--fixtures-file",
            path.to_str().unwrap(),
        ]))
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        let res = router
            .oneshot(Request::get("/bus/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let bus: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(bus["number"], "X900");
    }

    #[test]
    fn bad_fixtures_file_fails_startup() {
        assert!(
            make(&config(&[
                "--jwt-secret",
                "s",
                "--fixtures-file",
                "/nonexistent/transit-fleet.json",
            ]))
            .is_err()
        );

        let mut fixtures = Fixtures::demo();
        fixtures.routes[0].stops.push(42);
        let path = write_fixtures("transit-broken-fleet", &fixtures);

        let result = make(&config(&[
            "--jwt-secret",
            "s",
            "--fixtures-file",
            path.to_str().unwrap(),
        ]));
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
