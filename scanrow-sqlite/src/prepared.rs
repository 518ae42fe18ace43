use crate::{
    CBox, SqliteRows, error_message_from_ptr,
    extract::extract_name,
};
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_OK, SQLITE_ROW, SQLITE_TRANSIENT, sqlite3_bind_blob,
    sqlite3_bind_double, sqlite3_bind_int64, sqlite3_bind_null, sqlite3_bind_text, sqlite3_changes64,
    sqlite3_clear_bindings, sqlite3_column_count, sqlite3_db_handle, sqlite3_errmsg,
    sqlite3_last_insert_rowid, sqlite3_reset, sqlite3_sql, sqlite3_step, sqlite3_stmt,
};
use scanrow_core::{
    AsValue, Error, Prepared, Result, RowNames, RowsAffected, Value, printable_query,
};
use std::{
    ffi::{CStr, c_char, c_int, c_void},
    fmt::{self, Display},
};

/// A compiled SQLite statement with its bound parameters.
pub struct SqlitePrepared {
    pub(crate) statement: CBox<sqlite3_stmt>,
    pub(crate) index: u64,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<sqlite3_stmt>) -> Self {
        unsafe {
            sqlite3_clear_bindings(*statement);
        }
        Self {
            statement,
            index: 0,
        }
    }

    pub(crate) fn last_error(&self) -> Error {
        let message = unsafe {
            error_message_from_ptr(&sqlite3_errmsg(sqlite3_db_handle(*self.statement))).to_string()
        };
        let error = Error::msg(message).context(format!(
            "While running the query:\n{}",
            printable_query!(&self.sql())
        ));
        log::error!("{:#}", error);
        error
    }

    /// Text of the statement as it was prepared.
    pub fn sql(&self) -> String {
        unsafe {
            let sql = sqlite3_sql(*self.statement);
            if sql.is_null() {
                return String::new();
            }
            CStr::from_ptr(sql).to_string_lossy().into_owned()
        }
    }

    /// Steps the statement once, `true` when a row is available.
    pub(crate) fn step(&mut self) -> Result<bool> {
        loop {
            match unsafe { sqlite3_step(*self.statement) } {
                SQLITE_BUSY => continue,
                SQLITE_ROW => return Ok(true),
                SQLITE_DONE => return Ok(false),
                _ => return Err(self.last_error()),
            }
        }
    }

    fn reset(&mut self) {
        unsafe {
            sqlite3_reset(*self.statement);
        }
    }

    fn column_names(&self) -> Result<RowNames> {
        let count = unsafe { sqlite3_column_count(*self.statement) };
        (0..count)
            .map(|i| extract_name(*self.statement, i))
            .collect::<Result<RowNames>>()
    }
}

impl Prepared for SqlitePrepared {
    type Rows<'s> = SqliteRows<'s>;

    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        self.bind_index(value, self.index)
    }

    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        let position = (index + 1) as c_int;
        let statement = *self.statement;
        let rc = unsafe {
            match value.as_value() {
                Value::Null => sqlite3_bind_null(statement, position),
                Value::Int64(v) => sqlite3_bind_int64(statement, position, v),
                Value::Float64(v) => sqlite3_bind_double(statement, position, v),
                Value::Varchar(v) => sqlite3_bind_text(
                    statement,
                    position,
                    v.as_ptr() as *const c_char,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                Value::Blob(v) => sqlite3_bind_blob(
                    statement,
                    position,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
            }
        };
        if rc != SQLITE_OK {
            return Err(self
                .last_error()
                .context(format!("Cannot bind parameter {}", position)));
        }
        self.index = index + 1;
        Ok(self)
    }

    async fn execute(&mut self) -> Result<RowsAffected> {
        self.reset();
        while self.step()? {}
        let (changes, last_id) = unsafe {
            let db = sqlite3_db_handle(*self.statement);
            (sqlite3_changes64(db), sqlite3_last_insert_rowid(db))
        };
        self.reset();
        Ok(RowsAffected {
            rows_affected: changes.max(0) as u64,
            last_affected_id: (last_id != 0).then_some(last_id),
        })
    }

    async fn query(&mut self) -> Result<SqliteRows<'_>> {
        self.reset();
        let names = self.column_names()?;
        Ok(SqliteRows::new(self, names))
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}
