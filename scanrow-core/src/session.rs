use crate::{
    Columns, Connection, Context, Error, Prepared, Record, Result, ResultCursor, RowStore, Rows,
    RowsAffected, Scalar, Value, printable_query, unmarshal,
};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Runs queries on a connection and keeps their rows in memory.
///
/// Every [`Session::query`] replaces the buffered rows, which are then read
/// either one at a time:
/// ```rust,ignore
/// session.query("SELECT id, name FROM users", params![]).await?;
/// while session.next() {
///     println!("{} {}", session.get_int("id"), session.get_string("name"));
/// }
/// ```
/// or all at once into records with [`Session::unwrap`].
pub struct Session<C: Connection> {
    connection: C,
    cursor: ResultCursor,
    transaction: bool,
    last_result: Option<RowsAffected>,
}

impl<C: Connection> Session<C> {
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            cursor: ResultCursor::new(),
            transaction: false,
            last_result: None,
        }
    }

    pub async fn connect(url: impl Into<Cow<'static, str>>) -> Result<Self> {
        Ok(Self::new(C::connect(url.into()).await?))
    }

    pub fn connection(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn into_connection(self) -> C {
        self.connection
    }

    pub fn cursor(&self) -> &ResultCursor {
        &self.cursor
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction
    }

    pub async fn begin(&mut self) -> Result<()> {
        if self.transaction {
            let error = Error::msg("A transaction is already open on this session");
            log::error!("{}", error);
            return Err(error);
        }
        self.connection.begin().await?;
        log::debug!("Transaction started");
        self.transaction = true;
        Ok(())
    }

    pub async fn commit(&mut self) -> Result<()> {
        if !self.transaction {
            return Err(Error::msg("Cannot commit, no transaction is open"));
        }
        self.connection.commit().await?;
        log::debug!("Transaction committed");
        self.transaction = false;
        Ok(())
    }

    /// Rolls back the open transaction.
    pub async fn revert(&mut self) -> Result<()> {
        if !self.transaction {
            return Err(Error::msg("Cannot roll back, no transaction is open"));
        }
        self.connection.rollback().await?;
        log::debug!("Transaction rolled back");
        self.transaction = false;
        Ok(())
    }

    pub async fn prepare(&mut self, sql: impl Into<String>) -> Result<C::Prepared> {
        self.connection.prepare(sql.into()).await
    }

    async fn prepare_bound(
        &mut self,
        sql: String,
        params: impl IntoIterator<Item = Value>,
    ) -> Result<C::Prepared> {
        let context = || format!("While running the query:\n{}", printable_query!(&sql));
        let mut prepared = self
            .connection
            .prepare(sql.clone())
            .await
            .with_context(context)?;
        for value in params {
            prepared.bind(value).with_context(context)?;
        }
        Ok(prepared)
    }

    /// Runs a statement that returns no rows and remembers its outcome.
    pub async fn execute(
        &mut self,
        sql: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> Result<RowsAffected> {
        let sql = sql.into();
        log::debug!("Execute: {}", printable_query!(&sql));
        let mut prepared = self.prepare_bound(sql, params).await?;
        let result = prepared.execute().await?;
        self.last_result = Some(result);
        Ok(result)
    }

    pub fn last_inserted_id(&self) -> Result<i64> {
        self.last_result
            .ok_or_else(|| Error::msg("Must execute a statement before getting the last inserted id"))?
            .last_affected_id
            .ok_or_else(|| Error::msg("The last statement did not report an inserted id"))
    }

    pub fn rows_affected(&self) -> Result<u64> {
        self.last_result
            .map(|v| v.rows_affected)
            .ok_or_else(|| Error::msg("Must execute a statement before getting the rows affected"))
    }

    /// Runs a query and buffers all its rows, replacing the previous ones.
    ///
    /// If a row fails to be read the error is returned and the rows read
    /// before it stay buffered.
    pub async fn query(
        &mut self,
        sql: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> Result<()> {
        self.cursor.clear();
        let sql = sql.into();
        log::debug!("Query: {}", printable_query!(&sql));
        let mut prepared = self.prepare_bound(sql, params).await?;
        let mut rows = prepared.query().await?;
        let columns = Columns::new(rows.columns()?);
        while rows.next().await? {
            let row = RowStore::new();
            row.populate_columns(columns.clone())?;
            row.bind_scan_targets(|targets| rows.scan(targets))?;
            self.cursor.push(row);
        }
        log::debug!("Query returned {} rows", self.cursor.len());
        Ok(())
    }

    /// Runs a query expected to produce a single column and returns the value
    /// of its first row, `None` when there are no rows. Rows are not buffered.
    pub async fn query_one(
        &mut self,
        sql: impl Into<String>,
        params: impl IntoIterator<Item = Value>,
    ) -> Result<Option<Scalar>> {
        self.cursor.clear();
        let sql = sql.into();
        log::debug!("Query one: {}", printable_query!(&sql));
        let mut prepared = self.prepare_bound(sql, params).await?;
        let mut rows = prepared.query().await?;
        let names = rows.columns()?;
        if names.len() != 1 {
            return Err(Error::msg(format!(
                "The query may only return one value with this function, it returns {} columns",
                names.len()
            )));
        }
        if !rows.next().await? {
            return Ok(None);
        }
        let row = RowStore::new();
        row.populate_columns(Columns::new(names.clone()))?;
        row.bind_scan_targets(|targets| rows.scan(targets))?;
        Ok(Some(row.get_interface(&names[0])))
    }

    /// Moves to the next buffered row, `false` once they are over.
    pub fn next(&mut self) -> bool {
        self.cursor.advance()
    }

    pub fn current(&mut self) -> Result<&RowStore> {
        self.cursor.current()
    }

    pub fn row_count(&self) -> usize {
        self.cursor.len()
    }

    pub fn has_results(&self) -> bool {
        !self.cursor.is_empty()
    }

    pub fn get_int(&mut self, key: &str) -> i64 {
        self.check_int(key).unwrap_or_default()
    }

    pub fn check_int(&mut self, key: &str) -> Option<i64> {
        self.current().ok()?.check_int(key)
    }

    pub fn get_string(&mut self, key: &str) -> String {
        self.check_string(key).unwrap_or_default()
    }

    pub fn check_string(&mut self, key: &str) -> Option<String> {
        self.current().ok()?.check_string(key)
    }

    pub fn get_bool(&mut self, key: &str) -> bool {
        self.check_bool(key).unwrap_or_default()
    }

    pub fn check_bool(&mut self, key: &str) -> Option<bool> {
        self.current().ok()?.check_bool(key)
    }

    pub fn get_float(&mut self, key: &str) -> f64 {
        self.check_float(key).unwrap_or_default()
    }

    pub fn check_float(&mut self, key: &str) -> Option<f64> {
        self.current().ok()?.check_float(key)
    }

    pub fn get_interface(&mut self, key: &str) -> Scalar {
        self.current()
            .map(|row| row.get_interface(key))
            .unwrap_or_default()
    }

    /// Fills `record` from the current row.
    pub fn unmarshal<R: Record>(&mut self, record: &mut R) -> Result<()> {
        unmarshal(record, self.current()?);
        Ok(())
    }

    /// Decodes the JSON text stored in `key` into `target`. An empty column
    /// leaves `target` as it is.
    pub fn unmarshal_to<T: DeserializeOwned>(&mut self, key: &str, target: &mut T) -> Result<()> {
        let text = self.get_string(key);
        if text.is_empty() {
            return Ok(());
        }
        *target = serde_json::from_str(&text)
            .with_context(|| format!("Column `{}` does not hold the expected JSON", key))?;
        Ok(())
    }

    /// Replaces the content of `target` with one record per buffered row.
    ///
    /// Rows are visited from the first one regardless of the current
    /// position. `callback` is called with each record right after it is
    /// filled, its first error stops the mapping. Leaves the cursor past the
    /// last row.
    pub fn unwrap<R: Record + Default>(
        &mut self,
        target: &mut Vec<R>,
        mut callback: Option<&mut dyn FnMut(&mut R) -> Result<()>>,
    ) -> Result<()> {
        target.clear();
        target.resize_with(self.row_count(), R::default);
        if target.is_empty() {
            return Ok(());
        }
        self.cursor.rewind();
        for record in target.iter_mut() {
            if !self.cursor.advance() {
                break;
            }
            unmarshal(record, self.cursor.current()?);
            if let Some(callback) = callback.as_deref_mut() {
                callback(record)?;
            }
        }
        Ok(())
    }
}
