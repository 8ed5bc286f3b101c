// Copyright 2016 rust-punkt developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use serde_json::Value;

/// Something a [`Histogram`](crate::Histogram) can count.
///
/// The default key function combines an item's textual form with a tag for
/// its coarse category, so the number `1` and the string `"1"` are counted
/// separately while two items that render the same way and share a category
/// are counted together.
///
/// # Examples
///
/// ```
/// # use histogram::Item;
/// #
/// struct Tag(&'static str);
///
/// impl Item for Tag {
///     fn text(&self) -> String {
///         self.0.to_string()
///     }
///
///     fn category(&self) -> &'static str {
///         "Object"
///     }
/// }
///
/// assert_eq!(Tag("red").text(), "red");
/// assert!(!Tag("red").is_absent());
/// ```
pub trait Item {
    /// The textual form of the item.
    fn text(&self) -> String;

    /// The name of the item's coarse category, such as `"Number"` or
    /// `"String"`. Names missing from the category table receive the
    /// fallback tag.
    fn category(&self) -> &'static str;

    /// Returns true if the item stands for a missing value. Absent items
    /// are never stored.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

macro_rules! number_items(
    ($($t:ty),*) => ($(
        impl Item for $t {
            #[inline]
            fn text(&self) -> String {
                self.to_string()
            }

            #[inline]
            fn category(&self) -> &'static str {
                "Number"
            }
        }
    )*)
);

number_items!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Item for bool {
    #[inline]
    fn text(&self) -> String {
        self.to_string()
    }

    #[inline]
    fn category(&self) -> &'static str {
        "Boolean"
    }
}

impl Item for char {
    #[inline]
    fn text(&self) -> String {
        self.to_string()
    }

    #[inline]
    fn category(&self) -> &'static str {
        "String"
    }
}

impl Item for str {
    #[inline]
    fn text(&self) -> String {
        self.to_string()
    }

    #[inline]
    fn category(&self) -> &'static str {
        "String"
    }
}

impl Item for String {
    #[inline]
    fn text(&self) -> String {
        self.clone()
    }

    #[inline]
    fn category(&self) -> &'static str {
        "String"
    }
}

impl<T> Item for &T
where
    T: Item + ?Sized,
{
    #[inline]
    fn text(&self) -> String {
        (**self).text()
    }

    #[inline]
    fn category(&self) -> &'static str {
        (**self).category()
    }

    #[inline]
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

/// `None` is the absent value. `Some` is indistinguishable from the value it
/// wraps.
impl<T> Item for Option<T>
where
    T: Item,
{
    fn text(&self) -> String {
        match self {
            Some(item) => item.text(),
            None => "undefined".to_string(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            Some(item) => item.category(),
            None => "Undefined",
        }
    }

    fn is_absent(&self) -> bool {
        match self {
            Some(item) => item.is_absent(),
            None => true,
        }
    }
}

/// Sequences render as their elements joined by commas, with absent
/// elements left empty.
impl<T> Item for [T]
where
    T: Item,
{
    fn text(&self) -> String {
        join_elements(self.iter().map(|item| {
            if item.is_absent() {
                String::new()
            } else {
                item.text()
            }
        }))
    }

    #[inline]
    fn category(&self) -> &'static str {
        "Array"
    }
}

impl<T> Item for Vec<T>
where
    T: Item,
{
    #[inline]
    fn text(&self) -> String {
        self.as_slice().text()
    }

    #[inline]
    fn category(&self) -> &'static str {
        "Array"
    }
}

/// JSON values follow the textual forms of a dynamic language: integral
/// floats render like integers, `null` elements inside arrays render empty
/// and every object renders as `[object Object]`, so all objects collide
/// under the default key.
impl Item for Value {
    fn text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => f.to_string(),
                _ => n.to_string(),
            },
            Value::String(s) => s.clone(),
            Value::Array(values) => join_elements(values.iter().map(|v| {
                if v.is_null() {
                    String::new()
                } else {
                    v.text()
                }
            })),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }
}

fn join_elements<I>(elements: I) -> String
where
    I: Iterator<Item = String>,
{
    elements.collect::<Vec<_>>().join(",")
}
