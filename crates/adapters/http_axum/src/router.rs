//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use depot_app::ports::DeviceRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API routes under `/api` and a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem.
pub fn build<DR>(state: AppState<DR>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use depot_app::services::device_service::DeviceService;
    use depot_domain::device::{Device, DeviceState};
    use depot_domain::error::DepotError;
    use depot_domain::id::DeviceId;
    use tower::ServiceExt;

    struct StubDeviceRepo;

    impl depot_app::ports::DeviceRepository for StubDeviceRepo {
        async fn create(&self, device: Device) -> Result<Device, DepotError> {
            Ok(device)
        }
        async fn get_by_id(&self, _id: DeviceId) -> Result<Option<Device>, DepotError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Device>, DepotError> {
            Ok(vec![])
        }
        async fn get_by_brand(&self, _brand: &str) -> Result<Vec<Device>, DepotError> {
            Ok(vec![])
        }
        async fn get_by_state(&self, _state: DeviceState) -> Result<Vec<Device>, DepotError> {
            Ok(vec![])
        }
        async fn update(&self, device: Device) -> Result<Device, DepotError> {
            Ok(device)
        }
        async fn delete(&self, _id: DeviceId) -> Result<(), DepotError> {
            Ok(())
        }
    }

    fn test_state() -> AppState<StubDeviceRepo> {
        AppState::new(DeviceService::new(StubDeviceRepo))
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_route_filter_paths_before_the_id_segment() {
        // `/api/devices/by-state` must hit the filter handler, not `{id}`.
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/devices/by-state?state=Available")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_unknown_state_filter_at_the_boundary() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/devices/by-state?state=Broken")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
