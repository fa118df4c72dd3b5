//! Door-fit rule behind space recommendations.
//!
//! With the item's dimensions sorted `a <= b <= c`, a door `W x H` admits the
//! item when `(W >= a && H >= b) || (W >= b && H >= a)`. The item is carried
//! through the door lengthwise, so `c` never constrains the fit.

use crate::{
    db::predicate::Predicate,
    model::{NumField, furniture::FurnitureItem},
};

/// Whether a door of `door_width x door_height` admits an item with
/// dimensions `dims` (any order).
#[must_use]
pub fn admits(dims: [u64; 3], door_width: u64, door_height: u64) -> bool {
    let mut dims = dims;
    dims.sort_unstable();
    let [a, b, _] = dims;

    (door_width >= a && door_height >= b) || (door_width >= b && door_height >= a)
}

/// The backing-store predicate equivalent of [`admits`] for `item`.
#[must_use]
pub fn fit_predicate(item: &FurnitureItem) -> Predicate {
    let [a, b, _] = item.sorted_dimensions();

    Predicate::or([
        Predicate::and([
            Predicate::at_least(NumField::DoorWidth, a),
            Predicate::at_least(NumField::DoorHeight, b),
        ]),
        Predicate::and([
            Predicate::at_least(NumField::DoorWidth, b),
            Predicate::at_least(NumField::DoorHeight, a),
        ]),
    ])
}
