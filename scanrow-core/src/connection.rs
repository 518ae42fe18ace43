use crate::{AsValue, Result, RowNames, Value};
use std::{borrow::Cow, fmt::Display, future::Future};

/// A database backend.
pub trait Driver {
    type Connection: Connection;

    /// Scheme of the connection URLs accepted by this driver (`sqlite` for `sqlite://...`).
    const NAME: &'static str;

    fn connect(
        &self,
        url: Cow<'static, str>,
    ) -> impl Future<Output = Result<Self::Connection>> + Send {
        Self::Connection::connect(url)
    }
}

/// An open connection. Transactions live on the connection itself: while one
/// is open every statement prepared on the connection runs inside it.
pub trait Connection: Send + Sized {
    type Driver: Driver;
    type Prepared: Prepared;

    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;

    fn prepare(&mut self, sql: String) -> impl Future<Output = Result<Self::Prepared>> + Send;

    fn begin(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn commit(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn rollback(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// A backend prepared statement.
///
/// # Binding Semantics
/// * `bind` appends a value (driver chooses actual placeholder numbering).
/// * `bind_index` sets the parameter at `index` (from 0).
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// prepared.bind(42)?.bind("hello")?;
/// ```
pub trait Prepared: Send + Display {
    type Rows<'s>: Rows
    where
        Self: 's;

    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self>;

    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self>;

    /// Runs a statement that does not return rows.
    fn execute(&mut self) -> impl Future<Output = Result<RowsAffected>> + Send;

    /// Runs a statement and returns its rows, fetched lazily.
    fn query(&mut self) -> impl Future<Output = Result<Self::Rows<'_>>> + Send;
}

/// Rows returned by a statement, consumed one at a time.
pub trait Rows: Send {
    /// Column names, in the order `scan` fills them.
    fn columns(&self) -> Result<RowNames>;

    /// Moves to the next row, `false` once the rows are over.
    fn next(&mut self) -> impl Future<Output = Result<bool>> + Send;

    /// Writes the values of the row last reached by `next` into `targets`,
    /// one slot per column.
    fn scan(&mut self, targets: &mut [Value]) -> Result<()>;
}

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted identifier when available.
    pub last_affected_id: Option<i64>,
}
