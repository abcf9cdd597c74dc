use meridian_geo::GeoExtension;
use meridian_testing::{MaterializedResult, QueryRunner};

fn runner() -> QueryRunner {
    QueryRunner::builder()
        .with_extension(Box::new(GeoExtension))
        .build()
        .unwrap()
}

#[test]
fn st_point_query() {
    let mut runner = runner();

    let result = runner.query("SELECT ST_Point(52.233, 21.016)").unwrap();
    let expected = MaterializedResult::builder(["geometry"])
        .row(["POINT (52.233 21.016)"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn st_geometry_from_text_normalizes_polygon() {
    let mut runner = runner();

    let result = runner
        .query("SELECT ST_GeometryFromText('POLYGON((0 0, 0 1, 1 1, 1 1, 1 0, 0 0))')")
        .unwrap();
    let expected = MaterializedResult::builder(["geometry"])
        .row(["POLYGON ((0 0, 1 0, 1 1, 1 1, 0 1, 0 0))"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn to_spherical_geography_keeps_polygon_text() {
    let mut runner = runner();

    let result = runner
        .query(
            "SELECT to_spherical_geography(\
             ST_GeometryFromText('POLYGON((0 0, 0 1, 1 1, 1 1, 1 0, 0 0))'))",
        )
        .unwrap();
    let expected = MaterializedResult::builder(["spherical_geography"])
        .row(["POLYGON ((0 0, 1 0, 1 1, 1 1, 0 1, 0 0))"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn st_astext_returns_varchar() {
    let mut runner = runner();

    let result = runner
        .query("SELECT ST_AsText(ST_Point(1.5, 2.5))")
        .unwrap();
    let expected = MaterializedResult::builder(["Utf8"])
        .row(["POINT (1.5 2.5)"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn st_geometrytype_over_geography() {
    let mut runner = runner();

    let result = runner
        .query(
            "SELECT ST_GeometryType(\
             to_spherical_geography(ST_GeometryFromText('POINT (10 20)')))",
        )
        .unwrap();
    let expected = MaterializedResult::builder(["Utf8"])
        .row(["ST_Point"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn to_geometry_round_trips() {
    let mut runner = runner();

    let result = runner
        .query(
            "SELECT ST_AsText(to_geometry(\
             to_spherical_geography(ST_GeometryFromText('LINESTRING (0 0, 10 10)'))))",
        )
        .unwrap();
    let expected = MaterializedResult::builder(["Utf8"])
        .row(["LINESTRING (0 0, 10 10)"])
        .build();
    assert_eq!(expected, result);
}

#[test]
fn to_spherical_geography_rejects_out_of_range() {
    let mut runner = runner();

    let err = runner
        .query("SELECT to_spherical_geography(ST_Point(200.0, 0.0))")
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("Longitude must be between -180 and 180"),
        "{err}"
    );
}

#[test]
fn invalid_wkt_fails_the_query() {
    let mut runner = runner();

    let err = runner
        .query("SELECT ST_GeometryFromText('POLYGON((0 0, 1 1))')")
        .unwrap_err();
    assert!(err.to_string().contains("Invalid WKT"), "{err}");
}
