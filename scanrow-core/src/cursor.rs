use crate::{Error, Result, RowStore};

/// Where a [`ResultCursor`] stands relative to its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing selected yet.
    Empty,
    Iterating,
    Exhausted,
}

/// Rows buffered by a single query and the position of the reader.
///
/// `cursor` counts the calls to [`ResultCursor::advance`], `current` is the
/// logical row they selected, starting from `-1`. Both move together and
/// neither is clamped once the rows are exhausted.
#[derive(Debug)]
pub struct ResultCursor {
    rows: Vec<RowStore>,
    cursor: u64,
    current: i64,
}

impl Default for ResultCursor {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            current: -1,
        }
    }
}

impl ResultCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all the rows and goes back to the initial position.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.rewind();
    }

    /// Goes back to the initial position, keeping the rows.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.current = -1;
    }

    pub fn push(&mut self, row: RowStore) {
        self.rows.push(row);
    }

    /// Returns whether there was a row to move on, then moves anyway.
    pub fn advance(&mut self) -> bool {
        let has_next = self.cursor < self.rows.len() as u64;
        self.cursor += 1;
        self.current += 1;
        has_next
    }

    /// The selected row. Selects the first one if `advance` was never called.
    pub fn current(&mut self) -> Result<&RowStore> {
        if self.current == -1 {
            self.current = 0;
        }
        if self.rows.is_empty() {
            return Err(Error::msg("No results found"));
        }
        usize::try_from(self.current)
            .ok()
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| Error::msg("Ran out of results"))
    }

    pub fn state(&self) -> CursorState {
        if self.current < 0 {
            CursorState::Empty
        } else if (self.current as u64) < self.rows.len() as u64 {
            CursorState::Iterating
        } else {
            CursorState::Exhausted
        }
    }

    /// The read cursor and the logical row, in this order.
    pub fn position(&self) -> (u64, i64) {
        (self.cursor, self.current)
    }

    pub fn rows(&self) -> &[RowStore] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorState, ResultCursor};
    use crate::{Columns, RowStore, Value};
    use std::sync::Arc;

    fn cursor_with(n: i64) -> ResultCursor {
        let columns = Columns::new(Arc::from(["n".to_string()]));
        let mut cursor = ResultCursor::new();
        for i in 0..n {
            cursor.push(RowStore::with_values(columns.clone(), [Value::Int64(i)]).unwrap());
        }
        cursor
    }

    #[test]
    fn empty_cursor() {
        let mut cursor = cursor_with(0);
        assert_eq!(cursor.state(), CursorState::Empty);
        assert!(!cursor.advance());
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(
            cursor.current().unwrap_err().to_string(),
            "No results found"
        );
    }

    #[test]
    fn advance_in_lockstep() {
        let mut cursor = cursor_with(3);
        let mut seen = 0;
        while cursor.advance() {
            let (c, l) = cursor.position();
            assert_eq!(c as i64, l + 1);
            assert_eq!(cursor.current().unwrap().get_int("n"), seen);
            seen += 1;
        }
        assert_eq!(seen, 3);
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), (6, 5));
        assert_eq!(
            cursor.current().unwrap_err().to_string(),
            "Ran out of results"
        );
    }

    #[test]
    fn current_before_advance() {
        let mut cursor = cursor_with(2);
        assert_eq!(cursor.current().unwrap().get_int("n"), 0);
        assert_eq!(cursor.position(), (0, 0));
        assert_eq!(cursor.state(), CursorState::Iterating);
    }

    #[test]
    fn rewind_and_clear() {
        let mut cursor = cursor_with(2);
        assert!(cursor.advance());
        assert!(cursor.advance());
        cursor.rewind();
        assert_eq!(cursor.position(), (0, -1));
        assert_eq!(cursor.len(), 2);
        cursor.clear();
        assert!(cursor.is_empty());
        assert_eq!(cursor.state(), CursorState::Empty);
    }
}
