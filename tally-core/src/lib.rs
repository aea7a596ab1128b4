use {
    chrono::{DateTime, Utc},
    serde::{Serialize, Deserialize},
};

/// The single persisted counter with its last-modified timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub id: i64,
    pub value: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterOperation {
    Increment,
    Decrement,
}

impl CounterOperation {
    pub fn delta(&self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCounterRequest {
    pub operation: CounterOperation,
}
