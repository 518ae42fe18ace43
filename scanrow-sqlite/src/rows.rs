use crate::{SqlitePrepared, extract::extract_value};
use scanrow_core::{Error, Result, RowNames, Rows, Value};
use std::ffi::c_int;

/// Rows of a running statement, stepped on demand.
pub struct SqliteRows<'s> {
    prepared: &'s mut SqlitePrepared,
    names: RowNames,
    row: bool,
    done: bool,
}

impl<'s> SqliteRows<'s> {
    pub(crate) fn new(prepared: &'s mut SqlitePrepared, names: RowNames) -> Self {
        Self {
            prepared,
            names,
            row: false,
            done: false,
        }
    }
}

impl<'s> Rows for SqliteRows<'s> {
    fn columns(&self) -> Result<RowNames> {
        Ok(self.names.clone())
    }

    async fn next(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        self.row = false;
        match self.prepared.step() {
            Ok(true) => {
                self.row = true;
                Ok(true)
            }
            Ok(false) => {
                self.done = true;
                Ok(false)
            }
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }

    fn scan(&mut self, targets: &mut [Value]) -> Result<()> {
        if !self.row {
            return Err(Error::msg("There is no row to scan, call `next` first"));
        }
        if targets.len() != self.names.len() {
            return Err(Error::msg(format!(
                "Cannot scan {} columns into {} targets",
                self.names.len(),
                targets.len()
            )));
        }
        for (i, target) in targets.iter_mut().enumerate() {
            *target = extract_value(*self.prepared.statement, i as c_int)?;
        }
        Ok(())
    }
}
