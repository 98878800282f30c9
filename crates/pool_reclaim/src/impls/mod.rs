//! [`Reclaim`] for standard library types.
//!
//! Scalars and strings are opaque. `Option`, `Box`, `Rc` and `Arc` are
//! transparent wrappers. Collections classify as sequences or dictionaries,
//! and tuples of arity 1 through 8 as fixed tuples.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::shape::{Dictionary, Elements, FixedTuple, Reclaim, Sequence, Shape};

// Opaque scalars

macro_rules! opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reclaim for $ty {
                #[inline]
                fn shape(&self) -> Shape<'_> {
                    Shape::Opaque
                }
            }
        )*
    };
}

opaque!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    str,
    String,
    std::time::Duration,
);

// Transparent wrappers

impl<T: Reclaim> Reclaim for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Opaque,
        }
    }

    fn detach(&mut self) -> bool {
        *self = None;
        true
    }
}

impl<T: Reclaim + ?Sized> Reclaim for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn detach(&mut self) -> bool {
        (**self).detach()
    }
}

impl<T: Reclaim + ?Sized> Reclaim for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    /// Only a uniquely owned value can be emptied; shared ones stay intact.
    fn detach(&mut self) -> bool {
        Rc::get_mut(self).is_some_and(|inner| inner.detach())
    }
}

impl<T: Reclaim + ?Sized> Reclaim for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn detach(&mut self) -> bool {
        Arc::get_mut(self).is_some_and(|inner| inner.detach())
    }
}

// Sequences

/// Implement `Sequence` + `Reclaim` for an iterable collection.
///
/// `clear` selects the detach behavior: growable collections are emptied,
/// fixed-size ones keep their contents.
macro_rules! sequence {
    (impl[$($gen:tt)*] $ty:ty, clear) => {
        impl<$($gen)*> Sequence for $ty {
            fn elements(&self) -> Elements<'_> {
                Box::new(self.iter().map(|elem| elem as &dyn Reclaim))
            }
        }

        impl<$($gen)*> Reclaim for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Sequence(self)
            }

            fn detach(&mut self) -> bool {
                self.clear();
                true
            }
        }
    };
    (impl[$($gen:tt)*] $ty:ty, fixed) => {
        impl<$($gen)*> Sequence for $ty {
            fn elements(&self) -> Elements<'_> {
                Box::new(self.iter().map(|elem| elem as &dyn Reclaim))
            }
        }

        impl<$($gen)*> Reclaim for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Sequence(self)
            }
        }
    };
}

sequence!(impl[T: Reclaim] Vec<T>, clear);
sequence!(impl[T: Reclaim] VecDeque<T>, clear);
sequence!(impl[T: Reclaim] LinkedList<T>, clear);
sequence!(impl[T: Reclaim] BTreeSet<T>, clear);
sequence!(impl[T: Reclaim, S: BuildHasher] HashSet<T, S>, clear);
sequence!(impl[T: Reclaim, const N: usize] [T; N], fixed);

impl<A> Sequence for SmallVec<A>
where
    A: smallvec::Array,
    A::Item: Reclaim,
{
    fn elements(&self) -> Elements<'_> {
        Box::new(self.iter().map(|elem| elem as &dyn Reclaim))
    }
}

impl<A> Reclaim for SmallVec<A>
where
    A: smallvec::Array,
    A::Item: Reclaim,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    fn detach(&mut self) -> bool {
        self.clear();
        true
    }
}

// Dictionaries

impl<K: Reclaim, V: Reclaim, S: BuildHasher> Dictionary for HashMap<K, V, S> {
    fn keys(&self) -> Elements<'_> {
        Box::new(HashMap::keys(self).map(|key| key as &dyn Reclaim))
    }

    fn values(&self) -> Elements<'_> {
        Box::new(HashMap::values(self).map(|value| value as &dyn Reclaim))
    }
}

impl<K: Reclaim, V: Reclaim, S: BuildHasher> Reclaim for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Dictionary(self)
    }

    fn detach(&mut self) -> bool {
        self.clear();
        true
    }
}

impl<K: Reclaim, V: Reclaim> Dictionary for BTreeMap<K, V> {
    fn keys(&self) -> Elements<'_> {
        Box::new(BTreeMap::keys(self).map(|key| key as &dyn Reclaim))
    }

    fn values(&self) -> Elements<'_> {
        Box::new(BTreeMap::values(self).map(|value| value as &dyn Reclaim))
    }
}

impl<K: Reclaim, V: Reclaim> Reclaim for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Dictionary(self)
    }

    fn detach(&mut self) -> bool {
        self.clear();
        true
    }
}

// Fixed tuples

macro_rules! tuple {
    ($arity:literal => $($name:ident . $idx:tt),+) => {
        impl<$($name: Reclaim),+> FixedTuple for ($($name,)+) {
            #[inline]
            fn arity(&self) -> usize {
                $arity
            }

            fn position(&self, index: usize) -> Option<&dyn Reclaim> {
                match index {
                    $($idx => Some(&self.$idx as &dyn Reclaim),)+
                    _ => None,
                }
            }
        }

        impl<$($name: Reclaim),+> Reclaim for ($($name,)+) {
            fn shape(&self) -> Shape<'_> {
                Shape::Tuple(self)
            }
        }
    };
}

tuple!(1 => A.0);
tuple!(2 => A.0, B.1);
tuple!(3 => A.0, B.1, C.2);
tuple!(4 => A.0, B.1, C.2, D.3);
tuple!(5 => A.0, B.1, C.2, D.3, E.4);
tuple!(6 => A.0, B.1, C.2, D.3, E.4, F.5);
tuple!(7 => A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple!(8 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
