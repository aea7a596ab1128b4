use {
    std::sync::Arc,
    tracing::error,
    axum::{
        Router, Extension, Json,
        routing::post,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    tally_core::UpdateCounterRequest,
    crate::counter::CounterService,
};

pub fn counter_router(service: Arc<CounterService>) -> Router {
    Router::new()
        .route("/rpc/get_counter", post(get_counter))
        .route("/rpc/update_counter", post(update_counter))
        .layer(Extension(service))
}

async fn get_counter(Extension(service): Extension<Arc<CounterService>>) -> Response {
    match service.get() {
        Ok(counter) => Json(counter).into_response(),
        Err(err) => {
            error!("failed to query counter: {err:?}");
            response_internal_error()
        },
    }
}

async fn update_counter(
    Extension(service): Extension<Arc<CounterService>>,
    Json(request): Json<UpdateCounterRequest>,
) -> Response {
    match service.update(request.operation) {
        Ok(counter) => Json(counter).into_response(),
        Err(err) => {
            error!("failed to update counter: {err:?}");
            response_internal_error()
        },
    }
}

fn response_internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "tally: internal storage error.\n").into_response()
}
