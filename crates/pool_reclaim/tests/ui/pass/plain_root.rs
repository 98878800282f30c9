//! A plain root with collection, option and skipped members.

use std::collections::HashMap;

use pool_reclaim::{Reclaim, ReleaseFailure, ResourceHandle};

#[derive(Reclaim)]
#[reclaim(handle)]
pub struct Vehicle(u32);

impl ResourceHandle for Vehicle {
    fn exists(&self) -> bool {
        self.0 != 0
    }

    fn release(&self) -> Result<(), ReleaseFailure> {
        Ok(())
    }
}

#[derive(Reclaim)]
pub struct Mission {
    pub escort: Option<Vehicle>,
    pub convoy: Vec<Vehicle>,
    pub spawns: HashMap<u32, Vehicle>,
    #[reclaim(skip)]
    pub title: String,
}

fn main() {
    let mut mission = Mission {
        escort: Some(Vehicle(1)),
        convoy: vec![Vehicle(2)],
        spawns: HashMap::new(),
        title: String::from("escort"),
    };
    let report = pool_reclaim::reclaim(&mut mission);
    assert_eq!(report.stats.released, 2);
}
