//! Static members and flattened bases.

use parking_lot::Mutex;
use pool_reclaim::{Member, Reclaim};

static REGISTRY: Mutex<Vec<u32>> = parking_lot::const_mutex(Vec::new());

fn registry(visit: &mut dyn FnMut(Member<'_>)) {
    visit(Member::static_member("REGISTRY", &mut *REGISTRY.lock()));
}

#[derive(Reclaim)]
pub struct Base {
    pub props: Vec<u32>,
}

#[derive(Reclaim)]
#[reclaim(static_members = registry)]
pub struct Script {
    #[reclaim(flatten)]
    pub base: Base,
    pub extra: Option<u32>,
}

fn main() {
    let mut script = Script {
        base: Base { props: vec![1] },
        extra: None,
    };
    pool_reclaim::reclaim(&mut script);
}
