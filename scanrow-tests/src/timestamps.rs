use scanrow::{Connection, Record, Session, ZERO_TIMESTAMP, params};
use time::{OffsetDateTime, macros::datetime};

#[derive(Default, Debug, Record)]
struct Event {
    #[sql("id")]
    id: i64,
    #[sql("happened_at")]
    happened_at: Option<OffsetDateTime>,
}

pub async fn timestamps<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS events", params![])
        .await
        .expect("Failed to drop the events table");
    session
        .execute(
            "CREATE TABLE events (id INTEGER, happened_at TEXT)",
            params![],
        )
        .await
        .expect("Failed to create the events table");
    session
        .execute(
            "INSERT INTO events (id, happened_at) VALUES (?, ?), (?, ?), (?, ?), (?, ?), (?, ?), (?, ?)",
            params![
                1,
                "2023-01-02 15:04:05",
                2,
                "not-a-date",
                3,
                "",
                4,
                datetime!(2024-02-29 23:59:58.5 +02:00),
                5,
                "Mon, 02 Jan 2006 15:04:05 GMT",
                6,
                None::<String>,
            ],
        )
        .await
        .expect("Failed to insert the events");
    session
        .query("SELECT id, happened_at FROM events ORDER BY id", params![])
        .await
        .expect("Failed to query the events");
    let mut events = Vec::<Event>::new();
    session
        .unwrap(&mut events, None)
        .expect("Failed to unwrap the events");
    assert_eq!(events.len(), 6);
    assert_eq!(events[0].happened_at, Some(datetime!(2023-01-02 15:04:05 UTC)));
    assert_eq!(events[1].happened_at, None);
    assert_eq!(events[2].happened_at, Some(ZERO_TIMESTAMP));
    assert_eq!(
        events[3].happened_at,
        Some(datetime!(2024-02-29 21:59:58.5 UTC))
    );
    assert_eq!(events[4].happened_at, Some(datetime!(2006-01-02 15:04:05 UTC)));
    assert_eq!(events[5].happened_at, Some(ZERO_TIMESTAMP));
}
