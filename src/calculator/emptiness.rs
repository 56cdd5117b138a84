// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! One notion of "nothing of interest here" shared by every type the calculator looks at.
//!
//! | value                       | blank when            |
//! |-----------------------------|-----------------------|
//! | `None`                      | always                |
//! | floats                      | NaN or exactly zero   |
//! | integers                    | zero                  |
//! | `bool`                      | false                 |
//! | strings                     | empty after trimming  |
//! | collections                 | no entries            |
//! | `Some(v)`                   | `v` is blank          |

use num_traits::Zero;
use std::collections::{BTreeMap, HashMap, HashSet};

pub trait Blank {
    fn is_blank(&self) -> bool;
}

/// Free-function form of [`Blank::is_blank`].
pub fn is_blank<T: Blank + ?Sized>(value: &T) -> bool {
    value.is_blank()
}

macro_rules! blank_when_zero {
    ($($t:ty),+) => {
        $(impl Blank for $t {
            fn is_blank(&self) -> bool {
                self.is_zero()
            }
        })+
    };
}

macro_rules! blank_when_zero_or_nan {
    ($($t:ty),+) => {
        $(impl Blank for $t {
            fn is_blank(&self) -> bool {
                self.is_nan() || self.is_zero()
            }
        })+
    };
}

blank_when_zero!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
blank_when_zero_or_nan!(f32, f64);

impl Blank for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        match self {
            None => true,
            Some(value) => value.is_blank(),
        }
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Blank for HashMap<K, V, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Blank for HashSet<T, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}
