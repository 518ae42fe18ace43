use scanrow_core::{
    AsValue, Connection, Driver, Error, Prepared, Result, RowNames, Rows, RowsAffected, Value,
};
use parking_lot::Mutex;
use std::{
    borrow::Cow,
    collections::HashMap,
    fmt::{self, Display},
    sync::Arc,
};

/// Canned outcome of one SQL text.
#[derive(Default, Clone)]
pub struct Script {
    pub columns: Vec<String>,
    /// `Err` makes the row fail when reached.
    pub rows: Vec<std::result::Result<Vec<Value>, String>>,
    pub affected: RowsAffected,
}

impl Script {
    pub fn rows<const N: usize>(columns: [&str; N], rows: Vec<[Value; N]>) -> Self {
        Self {
            columns: columns.iter().map(|v| v.to_string()).collect(),
            rows: rows.into_iter().map(|v| Ok(v.into())).collect(),
            affected: RowsAffected::default(),
        }
    }

    pub fn affected(rows_affected: u64, last_affected_id: Option<i64>) -> Self {
        Self {
            affected: RowsAffected {
                rows_affected,
                last_affected_id,
            },
            ..Default::default()
        }
    }

    pub fn failing_at(mut self, index: usize) -> Self {
        self.rows
            .insert(index, Err(format!("Row {} could not be read", index)));
        self
    }
}

pub struct MockDriver;

impl Driver for MockDriver {
    type Connection = MockConnection;

    const NAME: &'static str = "mock";
}

/// Connection answering from a table of scripts and recording what it ran.
#[derive(Default)]
pub struct MockConnection {
    pub scripts: HashMap<String, Script>,
    pub log: Vec<String>,
    /// Parameters of every statement run, in order.
    pub bound: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl MockConnection {
    pub fn with(mut self, sql: &str, script: Script) -> Self {
        self.scripts.insert(sql.to_string(), script);
        self
    }
}

impl Connection for MockConnection {
    type Driver = MockDriver;
    type Prepared = MockPrepared;

    async fn connect(url: Cow<'static, str>) -> Result<Self> {
        if !url.starts_with("mock://") {
            return Err(Error::msg(format!("Unexpected url `{}`", url)));
        }
        Ok(Self::default())
    }

    async fn prepare(&mut self, sql: String) -> Result<MockPrepared> {
        let script = self
            .scripts
            .get(&sql)
            .cloned()
            .ok_or_else(|| Error::msg(format!("No script for `{}`", sql)))?;
        self.log.push(sql.clone());
        Ok(MockPrepared {
            sql,
            script,
            params: Vec::new(),
            bound: self.bound.clone(),
        })
    }

    async fn begin(&mut self) -> Result<()> {
        self.log.push("BEGIN".into());
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.log.push("COMMIT".into());
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.log.push("ROLLBACK".into());
        Ok(())
    }
}

pub struct MockPrepared {
    sql: String,
    script: Script,
    params: Vec<Value>,
    bound: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl Display for MockPrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl Prepared for MockPrepared {
    type Rows<'s> = MockRows<'s>;

    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        self.params.push(value.as_value());
        Ok(self)
    }

    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        let index = index as usize;
        if self.params.len() <= index {
            self.params.resize(index + 1, Value::Null);
        }
        self.params[index] = value.as_value();
        Ok(self)
    }

    async fn execute(&mut self) -> Result<RowsAffected> {
        self.bound.lock().push(self.params.clone());
        Ok(self.script.affected)
    }

    async fn query(&mut self) -> Result<MockRows<'_>> {
        self.bound.lock().push(self.params.clone());
        Ok(MockRows {
            names: self.script.columns.clone().into(),
            script: &self.script,
            position: None,
        })
    }
}

pub struct MockRows<'s> {
    names: RowNames,
    script: &'s Script,
    position: Option<usize>,
}

impl<'s> Rows for MockRows<'s> {
    fn columns(&self) -> Result<RowNames> {
        Ok(Arc::clone(&self.names))
    }

    async fn next(&mut self) -> Result<bool> {
        let position = self.position.map_or(0, |v| v + 1);
        self.position = Some(position);
        match self.script.rows.get(position) {
            Some(Ok(..)) => Ok(true),
            Some(Err(e)) => Err(Error::msg(e.clone())),
            None => Ok(false),
        }
    }

    fn scan(&mut self, targets: &mut [Value]) -> Result<()> {
        let Some(Ok(values)) = self.position.and_then(|i| self.script.rows.get(i)) else {
            return Err(Error::msg("No row to scan"));
        };
        if targets.len() != values.len() {
            return Err(Error::msg("Wrong number of targets"));
        }
        targets.clone_from_slice(values);
        Ok(())
    }
}
