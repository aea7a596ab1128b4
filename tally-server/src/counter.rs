use {
    chrono::{DateTime, Utc},
    tally_core::{Counter, CounterOperation},
    crate::{
        sql::{SqlDatabase, Query, Row, Value},
        error::CounterError,
    },
};

const SELECT_COUNTER: &str = "SELECT id, value, updated_at FROM counters LIMIT 1";

fn migrations() -> Vec<String> {
    vec![
        "CREATE TABLE counters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL
        )".to_owned(),
    ]
}

/// Update and query operations over the single counter row.
pub struct CounterService {
    database: SqlDatabase,
}

impl CounterService {
    pub fn new(database: SqlDatabase) -> Result<Self, CounterError> {
        database.migrate(migrations())?;
        Ok(Self { database })
    }

    /// Applies an increment or decrement to the counter row, creating it
    /// when absent. The read and the write are two separate statements;
    /// two overlapping calls can each observe "no row" and both insert,
    /// or both read the same prior value. Last write wins.
    pub fn update(&self, operation: CounterOperation) -> Result<Counter, CounterError> {
        let existing = self.database.exec(Query::new(SELECT_COUNTER.to_owned()))?;
        let now = Utc::now().timestamp_millis();

        let result = match existing.rows.into_iter().next() {
            None => self.database.exec(
                Query::new("INSERT INTO counters (value, updated_at) VALUES (?1, ?2) RETURNING id, value, updated_at".to_owned())
                    .with_param(Value::Integer(operation.delta()))
                    .with_param(Value::Integer(now))
            )?,
            Some(row) => {
                let current = counter_from_row(&row)?;
                self.database.exec(
                    Query::new("UPDATE counters SET value = ?1, updated_at = ?2 WHERE id = ?3 RETURNING id, value, updated_at".to_owned())
                        .with_param(Value::Integer(current.value + operation.delta()))
                        .with_param(Value::Integer(now))
                        .with_param(Value::Integer(current.id))
                )?
            },
        };

        match result.rows.first() {
            Some(row) => counter_from_row(row),
            None => Err(CounterError::RowDecode { reason: "mutation returned no row".to_owned() }),
        }
    }

    /// Returns the counter row if one exists. None signals an
    /// uninitialized counter; the client displays 0 for it.
    pub fn get(&self) -> Result<Option<Counter>, CounterError> {
        let result = self.database.exec(Query::new(SELECT_COUNTER.to_owned()))?;
        result.rows.first().map(counter_from_row).transpose()
    }
}

fn counter_from_row(row: &Row) -> Result<Counter, CounterError> {
    let id = column_i64(row, 0)?;
    let value = column_i64(row, 1)?;
    let updated_at_millis = column_i64(row, 2)?;
    let updated_at = DateTime::from_timestamp_millis(updated_at_millis)
        .ok_or_else(|| CounterError::RowDecode { reason: format!("timestamp out of range: {updated_at_millis}") })?;

    Ok(Counter { id, value, updated_at })
}

fn column_i64(row: &Row, index: usize) -> Result<i64, CounterError> {
    let column = row.columns.get(index)
        .ok_or_else(|| CounterError::RowDecode { reason: format!("missing column {index}") })?;
    i64::try_from(column)
        .map_err(|_| CounterError::RowDecode { reason: format!("wrong type for column {index}") })
}
