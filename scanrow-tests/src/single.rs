use scanrow::{Connection, Scalar, Session, params};

pub async fn single<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS counters", params![])
        .await
        .expect("Failed to drop the counters table");
    session
        .execute("CREATE TABLE counters (name TEXT, hits INTEGER)", params![])
        .await
        .expect("Failed to create the counters table");
    session
        .execute(
            "INSERT INTO counters (name, hits) VALUES (?, ?), (?, ?)",
            params!["home", 10, "about", 3],
        )
        .await
        .expect("Failed to insert the counters");
    assert_eq!(session.rows_affected().expect("No rows affected"), 2);

    let total = session
        .query_one("SELECT SUM(hits) FROM counters", params![])
        .await
        .expect("Failed to sum the hits");
    assert_eq!(total, Some(Scalar::Text("13".into())));

    let hits = session
        .query_one("SELECT hits FROM counters WHERE name = ?", params!["about"])
        .await
        .expect("Failed to read the hits");
    assert_eq!(hits.as_ref().and_then(Scalar::as_str), Some("3"));

    let missing = session
        .query_one("SELECT hits FROM counters WHERE name = ?", params!["blog"])
        .await
        .expect("Failed to query a missing counter");
    assert_eq!(missing, None);

    let error = session
        .query_one("SELECT name, hits FROM counters", params![])
        .await
        .expect_err("Two columns must be refused");
    assert!(
        error.to_string().contains("may only return one value"),
        "Unexpected error: {:#}",
        error
    );
    assert_eq!(session.row_count(), 0);
}
