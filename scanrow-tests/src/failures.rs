use crate::silent_logs;
use scanrow::{Connection, Session, params};

pub async fn failures<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS readings", params![])
        .await
        .expect("Failed to drop the readings table");
    session
        .execute("CREATE TABLE readings (id INTEGER, value INTEGER)", params![])
        .await
        .expect("Failed to create the readings table");
    session
        .execute(
            "INSERT INTO readings (id, value) VALUES (?, ?), (?, ?), (?, ?)",
            params![1, -4, 2, i64::MIN, 3, 9],
        )
        .await
        .expect("Failed to insert the readings");

    silent_logs! {
        // abs() overflows on the second row
        let result = session
            .query("SELECT id, abs(value) AS value FROM readings ORDER BY id", params![])
            .await;
        assert!(result.is_err());
        assert_eq!(session.row_count(), 1);
        assert!(session.next());
        assert_eq!(session.get_int("value"), 4);
        assert!(!session.next());

        assert!(
            session
                .query("SELECT * FROM table_that_does_not_exist", params![])
                .await
                .is_err()
        );
        assert_eq!(session.row_count(), 0);
        assert!(
            session
                .execute("INSERT INTO readings (id, value) VALUES (?, ?)", params![1])
                .await
                .is_ok(),
            "Unbound parameters are NULL"
        );
        assert!(
            session
                .execute("SELECT 1; SELECT 2", params![])
                .await
                .is_err()
        );
    }
}
