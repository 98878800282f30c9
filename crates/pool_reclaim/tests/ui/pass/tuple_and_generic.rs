//! Tuple mode, tuple structs, unit structs and generic roots.

use pool_reclaim::Reclaim;

#[derive(Reclaim)]
#[reclaim(tuple)]
pub struct Slot<T> {
    pub item: Option<T>,
    #[reclaim(skip)]
    pub label: &'static str,
}

#[derive(Reclaim)]
pub struct Rack<T>(pub Vec<Slot<T>>);

#[derive(Reclaim)]
pub struct Empty;

fn main() {
    let mut rack = Rack(vec![Slot {
        item: Some(3u8),
        label: "first",
    }]);
    pool_reclaim::reclaim(&mut rack);
    pool_reclaim::reclaim(&mut Empty);
}
