#[cfg(test)]
mod tests {
    use scanrow_core::{Columns, RowStore, Value};
    use std::{sync::Arc, thread};

    fn columns(names: &[&str]) -> Arc<Columns> {
        Columns::new(names.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn populate_then_scan() {
        let row = RowStore::new();
        assert!(row.is_empty());
        assert!(
            row.bind_scan_targets(|_| Ok(())).is_err(),
            "Scanning needs the columns"
        );
        row.populate_columns(columns(&["a", "b"]))
            .expect("Could not populate");
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Value::Null);
        assert!(row.populate_columns(columns(&["c"])).is_err());
        row.bind_scan_targets(|targets| {
            targets[0] = Value::Int64(1);
            targets[1] = Value::Varchar("two".into());
            Ok(())
        })
        .expect("Could not scan");
        assert_eq!(row.get("a"), Value::Int64(1));
        assert_eq!(row.lookup("b"), Some(Value::Varchar("two".into())));
        assert_eq!(row.lookup("c"), None);
        assert!(row.contains("b"));
        assert!(!row.contains("c"));
        assert_eq!(row.names().as_ref(), ["a", "b"]);
        let raw = row.raw_values();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["a"], Value::Int64(1));
    }

    #[test]
    fn mismatched_values() {
        assert!(RowStore::with_values(columns(&["a"]), [Value::Null, Value::Null]).is_err());
    }

    #[test]
    fn duplicate_names_last_wins() {
        let row = RowStore::with_values(
            columns(&["id", "id"]),
            [Value::Int64(1), Value::Int64(2)],
        )
        .expect("Invalid row");
        assert_eq!(row.get_int("id"), 2);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn concurrent_readers() {
        let row = Arc::new(
            RowStore::with_values(columns(&["n"]), [Value::Varchar("41".into())])
                .expect("Invalid row"),
        );
        let handles = (0..8)
            .map(|_| {
                let row = row.clone();
                thread::spawn(move || row.get_int("n") + 1)
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        let copy = (*row).clone();
        assert_eq!(copy.get_string("n"), "41");
    }
}
