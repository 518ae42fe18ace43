use indoc::indoc;
use scanrow::{Connection, Record, Session, params};
use serde::Deserialize;

#[derive(Default, Debug, Record)]
struct Tagged {
    #[sql("id")]
    id: i64,
    #[sql("numbers")]
    numbers: Vec<i64>,
    #[sql("labels")]
    labels: Vec<String>,
}

#[derive(Default, Debug, PartialEq, Deserialize)]
struct Meta {
    color: String,
    size: u32,
}

pub async fn arrays<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS tagged", params![])
        .await
        .expect("Failed to drop the tagged table");
    session
        .execute(
            "CREATE TABLE tagged (id INTEGER, numbers TEXT, labels TEXT, meta TEXT)",
            params![],
        )
        .await
        .expect("Failed to create the tagged table");
    let rows = [
        (1, "[1,2,3]", r#"["a","b"]"#, r#"{"color":"red","size":3}"#),
        (2, "[1,2", "[]", ""),
        (3, r#"{"not":"an array"}"#, r#"["x",2,"z"]"#, "{broken"),
        (4, "", "", ""),
        (5, "[4.9,-1,true]", "not json", ""),
    ];
    for (id, numbers, labels, meta) in rows {
        session
            .execute(
                "INSERT INTO tagged (id, numbers, labels, meta) VALUES (?, ?, ?, ?)",
                params![id, numbers, labels, meta],
            )
            .await
            .expect("Failed to insert into tagged");
    }
    session
        .query(
            indoc! {"
                SELECT id, numbers, labels
                FROM tagged
                ORDER BY id
            "},
            params![],
        )
        .await
        .expect("Failed to query tagged");
    let mut records = Vec::<Tagged>::new();
    session
        .unwrap(&mut records, None)
        .expect("Failed to unwrap tagged");
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].numbers, [1, 2, 3]);
    assert_eq!(records[0].labels, ["a", "b"]);
    assert!(records[1].numbers.is_empty());
    assert!(records[1].labels.is_empty());
    assert!(records[2].numbers.is_empty());
    assert_eq!(records[2].labels, ["x", "", "z"]);
    assert!(records[3].numbers.is_empty());
    assert_eq!(records[4].numbers, [4, -1, 0]);
    assert!(records[4].labels.is_empty());

    // JSON into any deserializable type
    session
        .query("SELECT id, meta FROM tagged ORDER BY id", params![])
        .await
        .expect("Failed to query the metadata");
    assert!(session.next());
    let mut meta = Meta::default();
    session
        .unmarshal_to("meta", &mut meta)
        .expect("Failed to decode the metadata");
    assert_eq!(
        meta,
        Meta {
            color: "red".into(),
            size: 3,
        }
    );
    assert!(session.next());
    session
        .unmarshal_to("meta", &mut meta)
        .expect("Empty metadata must be skipped");
    assert_eq!(meta.color, "red");
    assert!(session.next());
    assert!(session.unmarshal_to("meta", &mut meta).is_err());
    let mut numbers: Vec<i64> = Vec::new();
    session
        .unmarshal_to("id", &mut numbers)
        .expect_err("A number is not a list");
}
