use indoc::indoc;
use scanrow::{Connection, Record, Result, Scalar, Session, params};

#[derive(Default, Debug, Clone, PartialEq, Record)]
struct User {
    #[sql("id")]
    id: i64,
    #[sql("name")]
    name: String,
    #[sql("email")]
    email: String,
    #[sql("score")]
    score: f64,
    #[sql("active")]
    active: bool,
    #[sql("visits")]
    visits: u16,
    #[sql("")]
    ignored: i32,
    nickname: String,
}

pub async fn users<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS users", params![])
        .await
        .expect("Failed to drop the users table");
    session
        .execute(
            indoc! {"
                CREATE TABLE users (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT,
                    score REAL,
                    active INTEGER,
                    visits INTEGER
                )
            "},
            params![],
        )
        .await
        .expect("Failed to create the users table");

    // Nothing to read yet
    session
        .query("SELECT * FROM users", params![])
        .await
        .expect("Failed to query the empty users table");
    assert_eq!(session.row_count(), 0);
    assert!(!session.has_results());
    assert!(!session.next());
    assert!(!session.next());
    assert!(session.current().is_err());
    assert_eq!(session.get_int("id"), 0);
    assert_eq!(session.check_string("name"), None);
    let mut called = 0;
    let mut records = vec![User::default()];
    let callback: &mut dyn FnMut(&mut User) -> Result<()> = &mut |_| {
        called += 1;
        Ok(())
    };
    session
        .unwrap(&mut records, Some(callback))
        .expect("Failed to unwrap zero rows");
    assert!(records.is_empty());
    assert_eq!(called, 0);

    // Insert
    let rows = [
        (7, "Ada", None, 9.5, true, 3),
        (8, "Grace", Some("grace@navy.mil"), 7.25, false, 0),
        (9, "Edsger", Some("ewd@utexas.edu"), 8.0, true, 12),
    ];
    for (id, name, email, score, active, visits) in rows {
        let result = session
            .execute(
                indoc! {"
                    INSERT INTO users (id, name, email, score, active, visits)
                    VALUES (?, ?, ?, ?, ?, ?)
                "},
                params![id, name, email, score, active, visits],
            )
            .await
            .expect("Failed to insert a user");
        assert_eq!(result.rows_affected, 1);
    }
    assert_eq!(session.rows_affected().expect("No rows affected"), 1);
    assert_eq!(session.last_inserted_id().expect("No inserted id"), 9);

    // Row by row
    session
        .query(
            "SELECT id, name, email, score, active, visits FROM users ORDER BY id",
            params![],
        )
        .await
        .expect("Failed to query the users");
    assert_eq!(session.row_count(), 3);
    assert!(session.has_results());
    let mut ids = Vec::new();
    while session.next() {
        assert_eq!(session.check_int("id"), session.check_int("id"));
        assert_eq!(session.check_string("email"), session.check_string("email"));
        ids.push(session.get_int("id"));
    }
    assert_eq!(ids, [7, 8, 9]);
    assert!(!session.next());
    assert_eq!(session.get_int("id"), 0);
    assert!(session.current().is_err());

    // All at once
    let mut records = Vec::<User>::new();
    let mut seen = Vec::new();
    let callback: &mut dyn FnMut(&mut User) -> Result<()> = &mut |user| {
        user.nickname = format!("{}!", user.name.to_lowercase());
        seen.push(user.id);
        Ok(())
    };
    session
        .unwrap(&mut records, Some(callback))
        .expect("Failed to unwrap the users");
    assert_eq!(seen, [7, 8, 9]);
    assert_eq!(
        records[0],
        User {
            id: 7,
            name: "Ada".into(),
            email: "".into(),
            score: 9.5,
            active: true,
            visits: 3,
            ignored: 0,
            nickname: "ada!".into(),
        }
    );
    assert_eq!(records[1].email, "grace@navy.mil");
    assert!(!records[1].active);
    assert_eq!(records[2].visits, 12);
    assert_eq!(records[2].score, 8.0);

    // A record matches what the getters read
    session
        .query(
            "SELECT id, name, email, score, active, visits FROM users WHERE id = ?",
            params![8],
        )
        .await
        .expect("Failed to query one user");
    assert!(session.next());
    let mut user = User {
        ignored: 42,
        ..Default::default()
    };
    session.unmarshal(&mut user).expect("Failed to map the row");
    assert_eq!(user.id, session.get_int("id"));
    assert_eq!(user.name, session.get_string("name"));
    assert_eq!(user.email, session.get_string("email"));
    assert_eq!(user.score, session.get_float("score"));
    assert_eq!(user.active, session.get_bool("active"));
    assert_eq!(user.ignored, 42);
    assert_eq!(session.get_interface("name"), Scalar::Text("Grace".into()));
    assert_eq!(session.get_interface("missing"), Scalar::Empty);
    assert!(!session.next());
    assert!(session.unmarshal(&mut user).is_err());

    // The callback can stop the mapping
    session
        .query("SELECT id, name FROM users ORDER BY id", params![])
        .await
        .expect("Failed to query the users");
    let mut records = Vec::<User>::new();
    let callback: &mut dyn FnMut(&mut User) -> Result<()> = &mut |user| {
        if user.id == 8 {
            return Err(scanrow::Error::msg("Stop at 8"));
        }
        Ok(())
    };
    let result = session.unwrap(&mut records, Some(callback));
    assert_eq!(result.unwrap_err().to_string(), "Stop at 8");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "Ada");
    assert_eq!(records[1].name, "Grace");
    assert_eq!(records[2], User::default());
}
