use {
    std::sync::Arc,
    tokio::net::TcpListener,
    serde_json::json,
    tally_core::Counter,
    tally_server::{CounterService, SqlDatabase, counter_router},
};

async fn start_server() -> String {
    let service = Arc::new(CounterService::new(SqlDatabase::in_memory().unwrap()).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, counter_router(service)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn get_counter_on_empty_store_returns_null() {
    let endpoint = start_server().await;

    let response = reqwest::Client::new()
        .post(format!("{endpoint}/rpc/get_counter"))
        .send().await.unwrap();

    assert!(response.status().is_success());
    let counter: Option<Counter> = response.json().await.unwrap();
    assert!(counter.is_none());
}

#[tokio::test]
async fn update_counter_scenario() {
    let endpoint = start_server().await;
    let client = reqwest::Client::new();

    let mut values = Vec::new();
    let mut ids = Vec::new();
    for operation in ["increment", "increment", "decrement", "decrement"] {
        let counter: Counter = client
            .post(format!("{endpoint}/rpc/update_counter"))
            .json(&json!({ "operation": operation }))
            .send().await.unwrap()
            .json().await.unwrap();
        values.push(counter.value);
        ids.push(counter.id);
    }

    assert_eq!(vec![1, 2, 1, 0], values);
    assert!(ids.iter().all(|id| *id == ids[0]));

    let counter: Option<Counter> = client
        .post(format!("{endpoint}/rpc/get_counter"))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(0, counter.unwrap().value);
}

#[tokio::test]
async fn update_counter_unknown_operation_rejected() {
    let endpoint = start_server().await;

    let response = reqwest::Client::new()
        .post(format!("{endpoint}/rpc/update_counter"))
        .json(&json!({ "operation": "reset" }))
        .send().await.unwrap();

    assert!(response.status().is_client_error());
}
