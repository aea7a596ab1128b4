use {
    thiserror::Error,
    crate::sql::SqlError,
};

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("malformed counter row: {reason}")]
    RowDecode { reason: String },
}

impl From<SqlError> for CounterError {
    fn from(err: SqlError) -> Self {
        Self::Storage { reason: err.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to read config file: {reason}")]
    ConfigRead { reason: String },

    #[error("failed to parse config file: {reason}")]
    ConfigParse { reason: String },
}
