//! Enums forwarding to their variant payloads.

use std::collections::BTreeMap;

use pool_reclaim::Reclaim;

#[derive(Reclaim)]
pub enum Cargo<T> {
    Empty,
    Crate(Option<T>),
    Stacked { rows: Vec<T> },
    Manifest(BTreeMap<u32, T>),
    Labelled(#[reclaim(skip)] String),
}

#[derive(Reclaim)]
pub enum Never {}

#[derive(Reclaim)]
pub struct Hold {
    pub bays: Vec<Cargo<u8>>,
    pub spare: Option<Cargo<u8>>,
}

fn main() {
    let mut hold = Hold {
        bays: vec![Cargo::Crate(Some(1)), Cargo::Stacked { rows: vec![2] }, Cargo::Empty],
        spare: Some(Cargo::Labelled(String::from("spare"))),
    };
    pool_reclaim::reclaim(&mut hold);
    let _ = Cargo::<u8>::Manifest(BTreeMap::new()).shape();
}
