pub use crate::{
    api::{CounterApi, CounterRpc, ApiError},
    app::CounterApp,
};

mod api;
mod app;
