use crate::{
    model::{
        CatalogEntity, FeatureSet, NumField, Stocked,
        condition::{RangeBucket, SearchConditionCatalog, UNBOUNDED},
        geo::{BoundingBox, Coordinate, Polygon},
    },
    test_fixtures::{chair, estate},
};
use proptest::prelude::*;

fn square() -> Polygon {
    Polygon::new(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(10.0, 0.0),
        Coordinate::new(10.0, 10.0),
        Coordinate::new(0.0, 10.0),
    ])
}

#[test]
fn feature_set_ignores_empty_tags_and_keeps_raw_text() {
    let features = FeatureSet::parse("肘掛け,,キャスター");

    assert_eq!(features.len(), 2, "empty tags should be dropped");
    assert!(features.contains("肘掛け"));
    assert!(features.contains("キャスター"));
    assert!(!features.contains(""), "empty tag should never match");
    assert_eq!(features.as_str(), "肘掛け,,キャスター");
}

#[test]
fn feature_set_serializes_as_raw_string() {
    let json = serde_json::to_string(&FeatureSet::parse("a,b")).expect("serialize should succeed");

    assert_eq!(json, "\"a,b\"");
}

#[test]
fn furniture_serialization_hides_internal_fields() {
    let item = chair(7);
    let value = serde_json::to_value(&item).expect("serialize should succeed");

    assert!(value.get("popularity").is_none(), "popularity must not leak");
    assert!(value.get("stock").is_none(), "stock must not leak");
    assert_eq!(value["id"], 7);
    assert_eq!(value["features"], "肘掛け");
}

#[test]
fn space_serialization_uses_camel_case() {
    let value = serde_json::to_value(estate(3)).expect("serialize should succeed");

    assert_eq!(value["doorHeight"], 100);
    assert_eq!(value["doorWidth"], 100);
    assert!(value.get("popularity").is_none(), "popularity must not leak");
}

#[test]
fn sorted_dimensions_orders_ascending() {
    let item = crate::model::furniture::FurnitureItem {
        width: 9,
        height: 3,
        depth: 5,
        ..chair(1)
    };

    assert_eq!(item.sorted_dimensions(), [3, 5, 9]);
}

#[test]
fn with_stock_only_changes_stock() {
    let item = chair(1);
    let sold_out = item.with_stock(0);

    assert_eq!(sold_out.stock(), 0);
    assert!(!sold_out.is_in_stock());
    assert_eq!(sold_out.price, item.price);
    assert_eq!(sold_out.id(), item.id());
}

#[test]
fn range_bucket_is_min_inclusive_max_exclusive() {
    let bucket = RangeBucket {
        id: 1,
        min: 80,
        max: 110,
    };

    assert!(!bucket.contains(79));
    assert!(bucket.contains(80));
    assert!(bucket.contains(109));
    assert!(!bucket.contains(110));
}

#[test]
fn unbounded_sides_accept_everything_beyond() {
    let low = RangeBucket {
        id: 0,
        min: UNBOUNDED,
        max: 80,
    };
    let high = RangeBucket {
        id: 3,
        min: 150,
        max: UNBOUNDED,
    };

    assert!(low.contains(0));
    assert!(!low.contains(80));
    assert!(high.contains(u64::MAX));
    assert!(!high.contains(149));
}

#[test]
fn standard_catalog_assigns_every_size_a_bucket() {
    let catalog = SearchConditionCatalog::standard();
    let width = catalog.range(NumField::Width);

    assert_eq!(width.bucket_of(10), Some(0));
    assert_eq!(width.bucket_of(80), Some(1));
    assert_eq!(width.bucket_of(149), Some(2));
    assert_eq!(width.bucket_of(150), Some(3));
    assert!(width.bucket(4).is_none(), "only four size buckets exist");
}

#[test]
fn condition_catalog_parses_wire_shape() {
    let furniture = r#"{
        "width": {"prefix": "", "suffix": "cm", "ranges": [{"id": 0, "min": -1, "max": 80}]},
        "height": {"ranges": []},
        "depth": {"ranges": []},
        "price": {"prefix": "", "suffix": "円", "ranges": [{"id": 0, "min": -1, "max": 3000}]},
        "color": {"list": ["黒"]},
        "feature": {"list": []},
        "kind": {"list": ["座椅子"]}
    }"#;
    let space = r#"{
        "doorWidth": {"ranges": [{"id": 0, "min": -1, "max": 80}]},
        "doorHeight": {"ranges": []},
        "rent": {"ranges": []},
        "feature": {"list": ["防音室"]}
    }"#;

    let catalog =
        SearchConditionCatalog::from_json(furniture, space).expect("catalog should parse");

    assert_eq!(catalog.furniture.width.suffix, "cm");
    assert_eq!(catalog.furniture.kind.list, vec!["座椅子".to_string()]);
    assert_eq!(catalog.range(NumField::DoorWidth).bucket_of(50), Some(0));
    assert_eq!(catalog.space.feature.list, vec!["防音室".to_string()]);
}

#[test]
fn malformed_condition_document_names_its_half() {
    let err = SearchConditionCatalog::from_json("{}", "{}").expect_err("empty docs should fail");

    assert!(
        err.to_string().contains("furniture"),
        "error should name the failing half: {err}"
    );
}

#[test]
fn bounding_box_spans_all_points() {
    let bbox = BoundingBox::from_points(&[
        Coordinate::new(3.0, -1.0),
        Coordinate::new(-2.0, 4.0),
        Coordinate::new(1.0, 1.0),
    ])
    .expect("non-empty points should produce a box");

    assert_eq!(bbox.min, Coordinate::new(-2.0, -1.0));
    assert_eq!(bbox.max, Coordinate::new(3.0, 4.0));
    assert!(bbox.contains(Coordinate::new(3.0, 4.0)), "box edges are inclusive");
    assert!(BoundingBox::from_points(&[]).is_none());
}

#[test]
fn polygon_contains_interior_only() {
    let polygon = square();

    assert!(polygon.contains(Coordinate::new(5.0, 5.0)));
    assert!(!polygon.contains(Coordinate::new(11.0, 5.0)));
    assert!(!polygon.contains(Coordinate::new(0.0, 5.0)), "edge is outside");
    assert!(!polygon.contains(Coordinate::new(10.0, 10.0)), "vertex is outside");
}

#[test]
fn concave_polygon_excludes_its_notch() {
    // U shape opening towards +longitude
    let polygon = Polygon::new(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(10.0, 0.0),
        Coordinate::new(10.0, 10.0),
        Coordinate::new(7.0, 10.0),
        Coordinate::new(7.0, 3.0),
        Coordinate::new(3.0, 3.0),
        Coordinate::new(3.0, 10.0),
        Coordinate::new(0.0, 10.0),
    ]);

    assert!(polygon.contains(Coordinate::new(1.5, 8.0)));
    assert!(polygon.contains(Coordinate::new(8.5, 8.0)));
    assert!(!polygon.contains(Coordinate::new(5.0, 8.0)), "notch is outside");
}

#[test]
fn degenerate_polygons_have_no_interior() {
    let point = Coordinate::new(1.0, 1.0);
    let single = Polygon::new(vec![point]);
    let pair = Polygon::new(vec![point, Coordinate::new(2.0, 2.0)]);

    assert!(!single.contains(point), "a single vertex has no interior");
    assert!(!pair.contains(Coordinate::new(1.5, 1.5)), "a segment has no interior");
}

proptest! {
    #[test]
    fn polygon_containment_implies_box_containment(
        lat in -5.0f64..15.0,
        lon in -5.0f64..15.0,
    ) {
        let polygon = square();
        let bbox = polygon.bounding_box().expect("square should have a box");
        let point = Coordinate::new(lat, lon);

        if polygon.contains(point) {
            prop_assert!(bbox.contains(point));
        }
    }

    #[test]
    fn every_standard_price_lands_in_exactly_one_bucket(price in any::<u64>()) {
        let catalog = SearchConditionCatalog::standard();
        let matches = catalog
            .range(NumField::Price)
            .ranges
            .iter()
            .filter(|bucket| bucket.contains(price))
            .count();

        prop_assert_eq!(matches, 1);
    }
}
