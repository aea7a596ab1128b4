pub use crate::{
    config::ServerConfig,
    counter::CounterService,
    http::counter_router,
    sql::SqlDatabase,
};

mod config;
mod counter;
pub mod error;
mod http;
pub mod sql;
