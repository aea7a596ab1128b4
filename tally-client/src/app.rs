use {
    tracing::error,
    tally_core::{Counter, CounterOperation},
    crate::api::CounterRpc,
};

/// Display-side state machine: an initial fetch, then one update per
/// control press. No optimistic updates; the stored counter is always
/// the last authoritative server response.
pub struct CounterApp<T: CounterRpc> {
    rpc: T,
    counter: Option<Counter>,
    loading: bool,
    updating: bool,
}

impl<T: CounterRpc> CounterApp<T> {
    pub fn new(rpc: T) -> Self {
        Self {
            rpc,
            counter: None,
            loading: false,
            updating: false,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        match self.rpc.get_counter().await {
            Ok(counter) => self.counter = counter,
            Err(err) => error!("failed to load counter: {err:?}"),
        }
        self.loading = false;
    }

    pub async fn press(&mut self, operation: CounterOperation) {
        if self.updating {
            return;
        }

        self.updating = true;
        match self.rpc.update_counter(operation).await {
            Ok(counter) => self.counter = Some(counter),
            Err(err) => error!("failed to update counter: {err:?}"),
        }
        self.updating = false;
    }

    pub fn displayed_value(&self) -> i64 {
        self.counter.as_ref().map(|v| v.value).unwrap_or(0)
    }

    pub fn counter(&self) -> Option<&Counter> {
        self.counter.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Controls are enabled only while no update is in flight.
    pub fn can_press(&self) -> bool {
        !self.updating
    }
}

#[cfg(test)]
mod tests {
    use {
        std::{collections::VecDeque, sync::Mutex},
        chrono::Utc,
        crate::api::ApiError,
        super::*,
    };

    struct MockRpc {
        get_results: Mutex<VecDeque<Result<Option<Counter>, ApiError>>>,
        update_results: Mutex<VecDeque<Result<Counter, ApiError>>>,
    }

    impl MockRpc {
        fn new() -> Self {
            Self {
                get_results: Mutex::new(VecDeque::new()),
                update_results: Mutex::new(VecDeque::new()),
            }
        }

        fn with_get(self, result: Result<Option<Counter>, ApiError>) -> Self {
            self.get_results.lock().unwrap().push_back(result);
            self
        }

        fn with_update(self, result: Result<Counter, ApiError>) -> Self {
            self.update_results.lock().unwrap().push_back(result);
            self
        }
    }

    impl CounterRpc for MockRpc {
        async fn get_counter(&self) -> Result<Option<Counter>, ApiError> {
            self.get_results.lock().unwrap().pop_front().unwrap()
        }

        async fn update_counter(&self, _operation: CounterOperation) -> Result<Counter, ApiError> {
            self.update_results.lock().unwrap().pop_front().unwrap()
        }
    }

    fn counter(id: i64, value: i64) -> Counter {
        Counter {
            id,
            value,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn load_stores_counter() {
        let mut app = CounterApp::new(MockRpc::new().with_get(Ok(Some(counter(1, 5)))));
        app.load().await;
        assert_eq!(5, app.displayed_value());
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn load_on_empty_store_displays_zero() {
        let mut app = CounterApp::new(MockRpc::new().with_get(Ok(None)));
        app.load().await;
        assert!(app.counter().is_none());
        assert_eq!(0, app.displayed_value());
    }

    #[tokio::test]
    async fn failed_load_leaves_counter_unset() {
        let mut app = CounterApp::new(
            MockRpc::new().with_get(Err(ApiError::RequestSend { reason: "connection refused".to_owned() }))
        );
        app.load().await;
        assert!(app.counter().is_none());
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn press_replaces_counter() {
        let mut app = CounterApp::new(MockRpc::new().with_update(Ok(counter(1, 1))));
        app.press(CounterOperation::Increment).await;
        assert_eq!(1, app.displayed_value());
        assert!(app.can_press());
    }

    #[tokio::test]
    async fn failed_press_keeps_prior_value() {
        let mut app = CounterApp::new(
            MockRpc::new()
                .with_get(Ok(Some(counter(1, 5))))
                .with_update(Err(ApiError::UnexpectedStatus { status: 500 }))
        );
        app.load().await;
        app.press(CounterOperation::Decrement).await;
        assert_eq!(5, app.displayed_value());
        assert!(app.can_press());
    }
}
