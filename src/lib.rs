// Copyright 2016 rust-punkt developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Overview
//!
//! A discrete histogram for recording item frequencies. Items are counted
//! by a derived string key instead of by equality, so the notion of "the
//! same item" is configurable per histogram.
//!
//! The default key combines an item's textual form with a tag for its
//! coarse category (see [`Item`] and [`TypeTable`]), keeping the number `1`
//! apart from the string `"1"`.
//!
//! # Examples
//!
//! Counting characters and measuring their entropy:
//!
//! ```
//! use histogram::Histogram;
//!
//! let mut hist: Histogram<char> = Histogram::new();
//! hist.add_string_chars(["1223334444"]);
//!
//! assert_eq!(hist.size(), 4);
//! assert_eq!(hist.max(), Some(4));
//! assert_eq!(hist.entropy(), 1.8464393446710154);
//! ```
//!
//! Counting by a custom key:
//!
//! ```
//! use std::rc::Rc;
//! use histogram::Histogram;
//!
//! let mut hist: Histogram<&str> =
//!     Histogram::with_key(Rc::new(|word: &&str| word.to_lowercase()));
//! hist.add(["Rust", "rust", "RUST", "go"]);
//!
//! assert_eq!(hist.size(), 2);
//! assert_eq!(hist.frequency(&"rust"), 3);
//! assert_eq!(hist.keys(), vec!["go", "rust"]);
//! ```
//!
//! Histograms are single-threaded: the key function is reference counted
//! with [`std::rc::Rc`] and shared between a histogram and its copies.

mod histogram;
mod item;
mod key;

pub use crate::histogram::{Histogram, Iter};
pub use crate::item::Item;
pub use crate::key::{
    CATEGORY_CODES, FALLBACK_TAG, KeyFn, TypeTable, default_key, encode_category,
    key_with_table,
};

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
