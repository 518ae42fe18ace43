use scanrow::{Connection, Path, Point, Record, Session, params};

#[derive(Default, Debug, Record)]
struct Place {
    #[sql("id")]
    id: i64,
    #[sql("location")]
    location: Option<Point>,
    #[sql("route")]
    route: Option<Path>,
}

pub async fn geometry<C: Connection>(session: &mut Session<C>) {
    session
        .execute("DROP TABLE IF EXISTS places", params![])
        .await
        .expect("Failed to drop the places table");
    session
        .execute(
            "CREATE TABLE places (id INTEGER, location BLOB, route BLOB)",
            params![],
        )
        .await
        .expect("Failed to create the places table");
    let route = Path::new([
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.5, -3.0),
    ]);
    session
        .execute(
            "INSERT INTO places (id, location, route) VALUES (?, ?, ?), (?, ?, ?), (?, ?, ?)",
            params![
                1,
                Point::new(12.5, -7.25),
                route.clone(),
                2,
                "POINT(1 2)",
                vec![1u8, 2, 3],
                3,
                None::<Point>,
                Point::new(1.0, 2.0),
            ],
        )
        .await
        .expect("Failed to insert the places");
    session
        .query("SELECT id, location, route FROM places ORDER BY id", params![])
        .await
        .expect("Failed to query the places");
    let mut places = Vec::<Place>::new();
    session
        .unwrap(&mut places, None)
        .expect("Failed to unwrap the places");
    assert_eq!(places.len(), 3);
    assert_eq!(places[0].location, Some(Point::new(12.5, -7.25)));
    assert_eq!(places[0].route.as_ref(), Some(&route));
    assert_eq!(places[1].location, None);
    assert_eq!(places[1].route, None);
    assert_eq!(places[2].location, None);
    assert_eq!(places[2].route, None);

    // A column missing from the result keeps the field as it is
    session
        .query("SELECT id, location FROM places WHERE id = ?", params![1])
        .await
        .expect("Failed to query one place");
    assert!(session.next());
    let mut place = Place {
        route: Some(Path::new([Point::new(9.0, 9.0)])),
        ..Default::default()
    };
    session.unmarshal(&mut place).expect("Failed to map the place");
    assert_eq!(place.id, 1);
    assert_eq!(place.location, Some(Point::new(12.5, -7.25)));
    assert_eq!(place.route.map(|v| v.len()), Some(1));
}
