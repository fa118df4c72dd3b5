use crate::{
    db::predicate::Predicate,
    model::{
        NumField, TextField,
        furniture::FurnitureItem,
        geo::{BoundingBox, Coordinate, Polygon},
    },
    service::recommend::{admits, fit_predicate},
    test_fixtures::{chair, estate},
};
use proptest::prelude::*;

#[test]
fn and_flattens_and_drops_true() {
    let nested = Predicate::and([
        Predicate::True,
        Predicate::and([Predicate::InStock, Predicate::HasFeature("a".into())]),
        Predicate::HasFeature("b".into()),
    ]);

    assert_eq!(
        nested,
        Predicate::And(vec![
            Predicate::InStock,
            Predicate::HasFeature("a".into()),
            Predicate::HasFeature("b".into()),
        ])
    );
}

#[test]
fn and_collapses_trivial_conjunctions() {
    assert_eq!(Predicate::and([]), Predicate::True);
    assert_eq!(
        Predicate::and([Predicate::True, Predicate::InStock]),
        Predicate::InStock
    );
}

#[test]
fn text_and_feature_predicates_match_furniture() {
    let item = FurnitureItem {
        features: "肘掛け,キャスター".into(),
        ..chair(1)
    };

    let predicate = Predicate::and([
        Predicate::TextEq {
            field: TextField::Color,
            value: "黒".into(),
        },
        Predicate::HasFeature("キャスター".into()),
        Predicate::InStock,
    ]);
    assert!(predicate.eval(&item));

    let missing = Predicate::HasFeature("リクライニング".into());
    assert!(!missing.eval(&item), "absent feature should not match");
}

#[test]
fn in_stock_rejects_sold_out_and_spaces() {
    let sold_out = FurnitureItem {
        stock: 0,
        ..chair(1)
    };

    assert!(!Predicate::InStock.eval(&sold_out));
    assert!(
        !Predicate::InStock.eval(&estate(1)),
        "spaces carry no stock and never match"
    );
}

#[test]
fn buckets_are_unknown_without_a_backend() {
    let predicate = Predicate::InBucket {
        field: NumField::Price,
        bucket: 1,
    };

    assert!(
        !predicate.eval(&chair(1)),
        "bare entities carry no bucket association"
    );
}

#[test]
fn attributes_of_the_other_catalog_never_match() {
    assert!(!Predicate::at_least(NumField::DoorWidth, 0).eval(&chair(1)));
    assert!(!Predicate::at_least(NumField::Price, 0).eval(&estate(1)));
    assert!(
        !Predicate::TextEq {
            field: TextField::Kind,
            value: String::new(),
        }
        .eval(&estate(1))
    );
}

#[test]
fn geometry_predicates_use_space_location() {
    let space = estate(1);
    let around = BoundingBox::from_points(&[
        Coordinate::new(35.0, 139.0),
        Coordinate::new(36.0, 140.0),
    ])
    .expect("box should build");
    let polygon = Polygon::new(vec![
        Coordinate::new(35.0, 139.0),
        Coordinate::new(36.0, 139.0),
        Coordinate::new(36.0, 140.0),
        Coordinate::new(35.0, 140.0),
    ]);

    assert!(Predicate::WithinBox(around).eval(&space));
    assert!(Predicate::WithinPolygon(polygon).eval(&space));
    assert!(
        !Predicate::WithinBox(around).eval(&chair(1)),
        "furniture has no location"
    );
}

#[test]
fn fit_rule_for_three_five_nine_item() {
    let item = FurnitureItem {
        width: 3,
        height: 5,
        depth: 9,
        ..chair(1)
    };
    let door = |door_width, door_height| crate::model::space::Space {
        door_width,
        door_height,
        ..estate(1)
    };

    assert!(admits([3, 5, 9], 5, 3), "item on its side fits a 5x3 door");
    assert!(admits([3, 5, 9], 3, 5), "door orientation does not matter");
    assert!(
        !admits([3, 5, 9], 4, 3),
        "the middle dimension must clear one side of the door"
    );
    assert!(!admits([3, 5, 9], 2, 2), "a 2x2 door admits nothing");
    assert!(fit_predicate(&item).eval(&door(5, 3)));
    assert!(!fit_predicate(&item).eval(&door(4, 3)));
    assert!(!fit_predicate(&item).eval(&door(2, 2)));
    assert!(
        fit_predicate(&item).eval(&door(3, 5)),
        "largest dimension is ignored"
    );
}

proptest! {
    #[test]
    fn fit_predicate_agrees_with_admits(
        width in 1u64..300,
        height in 1u64..300,
        depth in 1u64..300,
        door_width in 0u64..300,
        door_height in 0u64..300,
    ) {
        let item = FurnitureItem { width, height, depth, ..chair(1) };
        let space = crate::model::space::Space { door_width, door_height, ..estate(1) };

        prop_assert_eq!(
            fit_predicate(&item).eval(&space),
            admits([width, height, depth], door_width, door_height)
        );
    }

    #[test]
    fn fit_rule_is_symmetric_in_door_orientation(
        dims in prop::array::uniform3(1u64..300),
        door_width in 0u64..300,
        door_height in 0u64..300,
    ) {
        prop_assert_eq!(
            admits(dims, door_width, door_height),
            admits(dims, door_height, door_width)
        );
    }

    #[test]
    fn fit_rule_ignores_item_orientation(
        dims in prop::array::uniform3(1u64..300),
        door_width in 0u64..300,
        door_height in 0u64..300,
    ) {
        let [a, b, c] = dims;

        prop_assert_eq!(
            admits([a, b, c], door_width, door_height),
            admits([c, a, b], door_width, door_height)
        );
    }

    #[test]
    fn and_matches_all_parts(stock in 0u64..3, tagged in any::<bool>()) {
        let item = FurnitureItem {
            stock,
            features: if tagged { "x".into() } else { "".into() },
            ..chair(1)
        };
        let predicate = Predicate::and([Predicate::InStock, Predicate::HasFeature("x".into())]);

        prop_assert_eq!(predicate.eval(&item), stock > 0 && tagged);
    }
}
