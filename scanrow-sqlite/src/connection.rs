use crate::{CBox, SqliteDriver, SqlitePrepared, error_message_from_ptr};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_close, sqlite3_errmsg, sqlite3_exec, sqlite3_finalize, sqlite3_open_v2,
    sqlite3_prepare_v2,
};
use scanrow_core::{Connection, Context, Driver, Error, Result, printable_query};
use std::{
    borrow::Cow,
    ffi::{CStr, CString, c_int},
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
};
use tokio::task::spawn_blocking;

/// A connection to a SQLite database.
pub struct SqliteConnection {
    pub(crate) connection: CBox<sqlite3>,
    pub(crate) transaction: bool,
}

impl SqliteConnection {
    /// Whether `begin` was called without a matching `commit` or `rollback`.
    pub fn in_transaction(&self) -> bool {
        self.transaction
    }

    /// Runs a statement without parameters nor results.
    pub(crate) fn exec(&mut self, sql: &str) -> Result<()> {
        let query = CString::new(sql).with_context(|| {
            format!("Could not create a CString from the query:\n{}", sql)
        })?;
        unsafe {
            let rc = sqlite3_exec(
                *self.connection,
                query.as_ptr(),
                None,
                ptr::null_mut(),
                ptr::null_mut(),
            );
            if rc != SQLITE_OK {
                let error =
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(*self.connection)).to_string())
                        .context(format!("While executing `{}`", sql));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }
}

impl Connection for SqliteConnection {
    type Driver = SqliteDriver;
    type Prepared = SqlitePrepared;

    async fn connect(url: Cow<'static, str>) -> Result<SqliteConnection> {
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        let Some(location) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{}", error);
            return Err(error);
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let filename = CString::new(format!("file:{}", location)).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(
                filename.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_URI | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let message = if connection.is_null() {
                    "Out of memory".to_string()
                } else {
                    error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string()
                };
                let error = Error::msg(message).context(format!("Could not open `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        log::debug!("Connected to `{}`", url);
        Ok(Self {
            connection,
            transaction: false,
        })
    }

    async fn prepare(&mut self, sql: String) -> Result<SqlitePrepared> {
        let connection = AtomicPtr::new(*self.connection);
        let context = format!("While preparing the query:\n{}", printable_query!(&sql));
        let statement = spawn_blocking(move || unsafe {
            let connection = connection.load(Ordering::Relaxed);
            let len = sql.len();
            let query = match CString::new(sql) {
                Ok(query) => query,
                Err(e) => {
                    let error =
                        Error::new(e).context("Could not create a CString from the query String");
                    log::error!("{:#}", error);
                    return Err(error);
                }
            };
            let mut statement = CBox::new(ptr::null_mut(), |p| {
                sqlite3_finalize(p);
            });
            let mut tail = ptr::null();
            let rc = sqlite3_prepare_v2(
                connection,
                query.as_ptr(),
                len as c_int,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                let error =
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(connection)).to_string())
                        .context(context);
                log::error!("{:#}", error);
                return Err(error);
            }
            if !tail.is_null() && !CStr::from_ptr(tail).to_bytes().trim_ascii().is_empty() {
                let error =
                    Error::msg("Cannot prepare more than one statement at a time").context(context);
                log::error!("{:#}", error);
                return Err(error);
            }
            if statement.is_null() {
                let error = Error::msg("The query does not contain any statement").context(context);
                log::error!("{:#}", error);
                return Err(error);
            }
            Ok(statement)
        })
        .await??;
        Ok(SqlitePrepared::new(statement))
    }

    async fn begin(&mut self) -> Result<()> {
        self.exec("BEGIN")?;
        self.transaction = true;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.exec("COMMIT")?;
        self.transaction = false;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.exec("ROLLBACK")?;
        self.transaction = false;
        Ok(())
    }
}
