#[cfg(test)]
mod tests {
    use scanrow::{
        Columns, FieldShape, Path, Point, Record, RowStore, Session, Value, ZERO_TIMESTAMP,
        params, unmarshal,
    };
    use scanrow_sqlite::SqliteConnection;
    use std::sync::Arc;
    use time::{OffsetDateTime, macros::datetime};

    #[derive(Default, Debug, PartialEq, Record)]
    struct Person {
        #[sql("id")]
        id: i64,
        #[sql("name")]
        name: String,
        #[sql("email")]
        email: String,
    }

    #[derive(Default, Debug, Record)]
    struct Everything {
        #[sql("small")]
        small: i8,
        #[sql("big")]
        big: u64,
        #[sql("ratio")]
        ratio: f32,
        #[sql("flag")]
        flag: bool,
        #[sql("label")]
        label: std::string::String,
        #[sql("numbers")]
        numbers: Vec<f64>,
        #[sql("at")]
        at: Option<time::OffsetDateTime>,
        #[sql("spot")]
        spot: Option<Point>,
        #[sql("track")]
        track: Option<scanrow::Path>,
        #[sql("")]
        empty_tag: i32,
        #[sql("unsupported")]
        unsupported: Option<i64>,
        untagged: String,
    }

    #[derive(Default, Debug, Record)]
    struct Wrapper<T: Default> {
        #[sql("id")]
        id: i32,
        extra: T,
    }

    fn row(names: &[&str], values: Vec<Value>) -> RowStore {
        let names: Arc<[String]> = names.iter().map(|v| v.to_string()).collect();
        RowStore::with_values(Columns::new(names), values).expect("Invalid row")
    }

    #[test]
    fn registered_fields() {
        let fields = Everything::FIELDS
            .iter()
            .map(|f| (f.column, f.shape))
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            [
                ("small", FieldShape::Integer),
                ("big", FieldShape::Integer),
                ("ratio", FieldShape::Float),
                ("flag", FieldShape::Boolean),
                ("label", FieldShape::String),
                ("numbers", FieldShape::Sequence),
                ("at", FieldShape::Timestamp),
                ("spot", FieldShape::GeoPoint),
                ("track", FieldShape::GeoPath),
            ]
        );
        assert_eq!(Person::FIELDS.len(), 3);
        assert_eq!(Wrapper::<String>::FIELDS.len(), 1);
    }

    #[test]
    fn ada() {
        let row = row(
            &["id", "name", "email"],
            vec![Value::Int64(7), Value::Varchar("Ada".into()), Value::Null],
        );
        let mut person = Person::default();
        unmarshal(&mut person, &row);
        assert_eq!(
            person,
            Person {
                id: 7,
                name: "Ada".into(),
                email: "".into(),
            }
        );
    }

    #[test]
    fn every_shape() {
        let track = Path::new([Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        let row = row(
            &[
                "small", "big", "ratio", "flag", "label", "numbers", "at", "spot", "track",
                "unsupported", "untagged",
            ],
            vec![
                Value::Int64(-3),
                Value::Varchar("42".into()),
                Value::Float64(0.5),
                Value::Int64(0),
                Value::Int64(99),
                Value::Varchar("[1.5, 2, \"x\"]".into()),
                Value::Varchar("".into()),
                Value::Blob(Point::new(5.0, 6.0).to_prefixed_wkb().into()),
                Value::Blob(track.to_prefixed_wkb().into()),
                Value::Int64(1),
                Value::Varchar("ignored".into()),
            ],
        );
        let mut record = Everything {
            flag: true,
            empty_tag: 8,
            untagged: "kept".into(),
            ..Default::default()
        };
        unmarshal(&mut record, &row);
        assert_eq!(record.small, -3);
        assert_eq!(record.big, 42);
        assert_eq!(record.ratio, 0.5);
        assert!(!record.flag);
        assert_eq!(record.label, "99");
        assert_eq!(record.numbers, [1.5, 2.0, 0.0]);
        assert_eq!(record.at, Some(ZERO_TIMESTAMP));
        assert_eq!(record.spot, Some(Point::new(5.0, 6.0)));
        assert_eq!(record.track, Some(track));
        assert_eq!(record.empty_tag, 8);
        assert_eq!(record.unsupported, None);
        assert_eq!(record.untagged, "kept");
    }

    #[test]
    fn generic_record() {
        let row = row(&["id", "extra"], vec![Value::Int64(5), Value::Int64(6)]);
        let mut wrapper = Wrapper::<Vec<u8>>::default();
        unmarshal(&mut wrapper, &row);
        assert_eq!(wrapper.id, 5);
        assert!(wrapper.extra.is_empty());
    }

    #[tokio::test]
    async fn sqlite_round_trip() {
        let mut session = Session::<SqliteConnection>::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        session
            .execute(
                "CREATE TABLE people (id INTEGER, name TEXT, email TEXT, born TEXT)",
                params![],
            )
            .await
            .expect("Failed to create the table");
        session
            .execute(
                "INSERT INTO people (id, name, email, born) VALUES (?, ?, ?, ?), (?, ?, ?, ?)",
                params![
                    7,
                    "Ada",
                    None::<&str>,
                    datetime!(1815-12-10 0:00 UTC),
                    8,
                    "Grace",
                    "grace@navy.mil",
                    "1906-12-09 00:00:00",
                ],
            )
            .await
            .expect("Failed to insert");

        #[derive(Default, Debug, Record)]
        struct Born {
            #[sql("name")]
            name: String,
            #[sql("born")]
            born: Option<OffsetDateTime>,
        }

        session
            .query("SELECT id, name, email FROM people ORDER BY id", params![])
            .await
            .expect("Failed to query");
        let mut people = Vec::<Person>::new();
        session
            .unwrap(&mut people, None)
            .expect("Failed to unwrap");
        assert_eq!(
            people,
            [
                Person {
                    id: 7,
                    name: "Ada".into(),
                    email: "".into(),
                },
                Person {
                    id: 8,
                    name: "Grace".into(),
                    email: "grace@navy.mil".into(),
                },
            ]
        );

        session
            .query("SELECT name, born FROM people ORDER BY id", params![])
            .await
            .expect("Failed to query");
        let mut born = Vec::<Born>::new();
        session.unwrap(&mut born, None).expect("Failed to unwrap");
        assert_eq!(born[0].born, Some(datetime!(1815-12-10 0:00 UTC)));
        assert_eq!(born[1].name, "Grace");
        assert_eq!(born[1].born, Some(datetime!(1906-12-09 0:00 UTC)));
    }
}
