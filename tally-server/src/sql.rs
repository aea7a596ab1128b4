use {
    std::sync::{Arc, Mutex},
    thiserror::Error,
    rusqlite::{Connection, params_from_iter, types::{ValueRef, ToSqlOutput}, ToSql},
};

#[derive(Debug)]
pub struct Query {
    query: String,
    params: Vec<Value>,
}

impl Query {
    pub fn new(query: String) -> Self {
        Self { query, params: Vec::new() }
    }

    pub fn with_param(mut self, param: Value) -> Self {
        self.params.push(param);
        self
    }
}

#[derive(Debug)]
pub struct QueryResult {
    pub rows: Vec<Row>,
}

#[derive(Debug)]
pub struct Row {
    pub columns: Vec<Value>,
}

#[derive(Debug)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

#[derive(Clone)]
pub struct SqlDatabase {
    connection: Arc<Mutex<Connection>>,
}

impl SqlDatabase {
    pub fn new(path: impl AsRef<std::path::Path>) -> Result<Self, SqlError> {
        Ok(Self::from_connection(
            Connection::open(path)
                .map_err(|err| SqlError::ConnectionOpen { reason: err.to_string() })?
        ))
    }

    pub fn in_memory() -> Result<Self, SqlError> {
        Ok(Self::from_connection(
            Connection::open_in_memory()
                .map_err(|err| SqlError::ConnectionOpen { reason: err.to_string() })?
        ))
    }

    fn from_connection(connection: Connection) -> Self {
        Self { connection: Arc::new(Mutex::new(connection)) }
    }

    pub fn exec(&self, query: Query) -> Result<QueryResult, SqlError> {
        let connection = self.connection.lock()
            .map_err(|err| SqlError::ConnectionAcquire { reason: err.to_string() })?;

        let mut stmt = connection.prepare(&query.query)
            .map_err(|err| SqlError::QueryRun { reason: err.to_string() })?;
        let result_columns = stmt.column_count();

        let mut rows = stmt.query(params_from_iter(query.params.into_iter()))
            .map_err(|err| SqlError::QueryRun { reason: err.to_string() })?;

        let mut result_rows = Vec::new();

        while let Some(row) = rows.next().map_err(|err| SqlError::RowRead { reason: err.to_string() })? {
            let mut row_columns = Vec::new();
            for column in 0..result_columns {
                let column = row.get_ref(column)
                    .map_err(|err| SqlError::ColumnGet { reason: err.to_string() })?;

                row_columns.push(match column {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(v) => Value::Integer(v),
                    ValueRef::Text(v) => Value::Text(
                        String::from_utf8(v.to_owned())
                            .map_err(|err| SqlError::FieldDecode { reason: err.to_string() })?,
                    ),
                    other => return Err(SqlError::FieldDecode { reason: format!("unsupported column type: {:?}", other.data_type()) }),
                });
            }
            result_rows.push(Row { columns: row_columns });
        }

        Ok(QueryResult { rows: result_rows })
    }

    pub fn migrate(&self, migrations: Vec<String>) -> Result<(), SqlError> {
        let mut rusqlite_migrations = Vec::new();
        for migration in &migrations {
            rusqlite_migrations.push(rusqlite_migration::M::up(migration));
        }

        let migrations = rusqlite_migration::Migrations::new(rusqlite_migrations);

        let mut connection = self.connection.lock()
            .map_err(|err| SqlError::ConnectionAcquire { reason: err.to_string() })?;

        migrations.to_latest(&mut connection)
            .map_err(|err| SqlError::MigrationFailed { reason: err.to_string() })
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Null => None::<i64>.to_sql(),
            Self::Integer(v) => v.to_sql(),
            Self::Text(v) => v.to_sql(),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = SqlMappingError;
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(v) => Ok(*v),
            _ => Err(SqlMappingError::WrongType),
        }
    }
}

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("failed to decode field: {reason}")]
    FieldDecode { reason: String },

    #[error("failed to get column: {reason}")]
    ColumnGet { reason: String },

    #[error("failed to read row: {reason}")]
    RowRead { reason: String },

    #[error("failed to run query: {reason}")]
    QueryRun { reason: String },

    #[error("failed to acquire database connection: {reason}")]
    ConnectionAcquire { reason: String },

    #[error("failed to open database connection: {reason}")]
    ConnectionOpen { reason: String },

    #[error("sql migration failed: {reason}")]
    MigrationFailed { reason: String },
}

#[derive(Error, Debug)]
pub enum SqlMappingError {
    #[error("wrong type")]
    WrongType,
}
