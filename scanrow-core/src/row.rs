use crate::{Error, Result, Value};
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;

/// Column names of a query together with their name to position index.
///
/// Built once per query from the list reported by the driver and shared by
/// every [`RowStore`] of that query. When a name appears more than once the
/// last position wins.
#[derive(Debug)]
pub struct Columns {
    names: RowNames,
    index: HashMap<String, usize>,
}

impl Columns {
    pub fn new(names: RowNames) -> Arc<Self> {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Arc::new(Self { names, index })
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Default, Debug)]
struct RowState {
    columns: Option<Arc<Columns>>,
    values: Box<[Value]>,
}

/// The values of one row, addressable by column name.
///
/// The state sits behind a reader/writer lock: the driver writes once through
/// [`RowStore::bind_scan_targets`] before the row is buffered, afterwards any
/// number of readers can inspect it concurrently.
#[derive(Default, Debug)]
pub struct RowStore {
    state: RwLock<RowState>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row already filled with `values`, which must match the columns in length.
    pub fn with_values(
        columns: Arc<Columns>,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        let values: Box<[Value]> = values.into_iter().collect();
        if values.len() != columns.len() {
            return Err(Error::msg(format!(
                "Expected {} values for the columns {:?}, got {}",
                columns.len(),
                columns.names(),
                values.len()
            )));
        }
        Ok(Self {
            state: RwLock::new(RowState {
                columns: Some(columns),
                values,
            }),
        })
    }

    /// Sets the column index and allocates one `Null` slot per column.
    pub fn populate_columns(&self, columns: Arc<Columns>) -> Result<()> {
        let mut state = self.state.write();
        if state.columns.is_some() {
            return Err(Error::msg(
                "The columns of a row can be populated only once",
            ));
        }
        state.values = vec![Value::Null; columns.len()].into_boxed_slice();
        state.columns = Some(columns);
        Ok(())
    }

    /// Lets `scan` write the raw values of the row in place, in column order.
    pub fn bind_scan_targets<F>(&self, scan: F) -> Result<()>
    where
        F: FnOnce(&mut [Value]) -> Result<()>,
    {
        let mut state = self.state.write();
        if state.columns.is_none() {
            return Err(Error::msg(
                "Cannot scan into a row whose columns were not populated",
            ));
        }
        scan(&mut state.values)
    }

    /// Runs `f` on the value of `name`, `None` if the column is unknown.
    pub fn with_value<T>(&self, name: &str, f: impl FnOnce(&Value) -> T) -> Option<T> {
        let state = self.state.read();
        let position = state.columns.as_ref()?.position(name)?;
        state.values.get(position).map(f)
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.with_value(name, Clone::clone)
    }

    /// Value of `name`, `Null` when the column is unknown.
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.with_value(name, |_| ()).is_some()
    }

    pub fn raw_values(&self) -> HashMap<String, Value> {
        let state = self.state.read();
        let Some(columns) = state.columns.as_ref() else {
            return HashMap::new();
        };
        columns
            .index
            .iter()
            .filter_map(|(name, i)| state.values.get(*i).map(|v| (name.clone(), v.clone())))
            .collect()
    }

    pub fn names(&self) -> RowNames {
        self.state
            .read()
            .columns
            .as_ref()
            .map(|c| c.names.clone())
            .unwrap_or_else(|| Arc::from([]))
    }

    pub fn len(&self) -> usize {
        self.state.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for RowStore {
    fn clone(&self) -> Self {
        let state = self.state.read();
        Self {
            state: RwLock::new(RowState {
                columns: state.columns.clone(),
                values: state.values.clone(),
            }),
        }
    }
}
