// Copyright 2016 rust-punkt developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::rc::Rc;

use phf::phf_ordered_map;

use crate::item::Item;

/// Derives the identity of an item. Two items with the same key are counted
/// as the same item.
pub type KeyFn<T> = Rc<dyn Fn(&T) -> String>;

/// Tag for items that match no rule of a [`TypeTable`].
pub const FALLBACK_TAG: u8 = 0;

/// Category codes used by the standard type table, in rule priority order.
pub static CATEGORY_CODES: phf::OrderedMap<&'static str, u8> = phf_ordered_map! {
    "Undefined" => 1,
    "Null" => 2,
    "Number" => 3,
    "Array" => 4,
    "String" => 5,
    "Object" => 6,
    "Boolean" => 7,
    "Function" => 8,
    "Symbol" => 9,
    "Date" => 10,
    "Error" => 11,
    "RegExp" => 12,
    "Arguments" => 13,
    "Math" => 14,
    "JSON" => 15,
};

/// Looks up the code of a category name, or [`FALLBACK_TAG`] if the name
/// is unknown.
#[inline]
pub fn encode_category(name: &str) -> u8 {
    CATEGORY_CODES.get(name).copied().unwrap_or(FALLBACK_TAG)
}

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// An ordered list of `(predicate, tag)` rules. The first matching rule
/// decides an item's tag; items matching no rule get [`FALLBACK_TAG`].
///
/// # Examples
///
/// ```
/// # use histogram::{TypeTable, FALLBACK_TAG};
/// #
/// let table = TypeTable::<i64>::empty()
///     .with_rule(|n| *n < 0, 1)
///     .with_rule(|n| *n % 2 == 0, 2);
///
/// assert_eq!(table.tag(&-4), 1);
/// assert_eq!(table.tag(&4), 2);
/// assert_eq!(table.tag(&3), FALLBACK_TAG);
/// ```
pub struct TypeTable<T> {
    rules: Vec<(Predicate<T>, u8)>,
}

impl<T> TypeTable<T> {
    /// Creates a table without rules; every item gets the fallback tag.
    #[inline]
    pub fn empty() -> TypeTable<T> {
        TypeTable { rules: Vec::new() }
    }

    /// Appends a rule, evaluated after every existing rule.
    pub fn with_rule<F>(mut self, matches: F, tag: u8) -> TypeTable<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.rules.push((Box::new(matches), tag));
        self
    }

    /// Inserts a rule ahead of every existing rule.
    pub fn with_priority_rule<F>(mut self, matches: F, tag: u8) -> TypeTable<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.rules.insert(0, (Box::new(matches), tag));
        self
    }

    /// Returns the tag of the first rule matching the item.
    pub fn tag(&self, item: &T) -> u8 {
        self.rules
            .iter()
            .find(|(matches, _)| matches(item))
            .map(|(_, tag)| *tag)
            .unwrap_or(FALLBACK_TAG)
    }

    /// The number of rules in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> TypeTable<T>
where
    T: Item + 'static,
{
    /// One rule per entry of [`CATEGORY_CODES`], matching on
    /// [`Item::category`].
    pub fn standard() -> TypeTable<T> {
        CATEGORY_CODES
            .entries()
            .fold(TypeTable::empty(), |table, (&name, &code)| {
                table.with_rule(move |item: &T| item.category() == name, code)
            })
    }
}

impl<T> fmt::Debug for TypeTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTable")
            .field("tags", &self.rules.iter().map(|(_, tag)| *tag).collect::<Vec<_>>())
            .finish()
    }
}

/// The key function installed in a new histogram: `(<text>:<tag>)`, tagged
/// by the standard type table.
///
/// ```
/// # use histogram::default_key;
/// #
/// let key = default_key::<i32>();
/// assert_eq!(key(&7), "(7:3)");
/// ```
pub fn default_key<T>() -> KeyFn<T>
where
    T: Item + 'static,
{
    key_with_table(TypeTable::standard())
}

/// A key function in the default format, tagged by a custom table.
pub fn key_with_table<T>(table: TypeTable<T>) -> KeyFn<T>
where
    T: Item + 'static,
{
    Rc::new(move |item: &T| format!("({}:{})", item.text(), table.tag(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn encode_known_and_unknown_categories() {
        assert_eq!(encode_category("Undefined"), 1);
        assert_eq!(encode_category("Number"), 3);
        assert_eq!(encode_category("String"), 5);
        assert_eq!(encode_category("JSON"), 15);
        assert_eq!(encode_category("Widget"), FALLBACK_TAG);
    }

    #[test]
    fn standard_table_has_a_rule_per_category() {
        let table: TypeTable<Value> = TypeTable::standard();

        assert_eq!(table.len(), CATEGORY_CODES.len());
        assert_eq!(table.tag(&json!(null)), 2);
        assert_eq!(table.tag(&json!(1.5)), 3);
        assert_eq!(table.tag(&json!([1])), 4);
        assert_eq!(table.tag(&json!("a")), 5);
        assert_eq!(table.tag(&json!({})), 6);
        assert_eq!(table.tag(&json!(false)), 7);
    }

    #[test]
    fn unknown_category_gets_fallback_tag() {
        struct Widget;

        impl Item for Widget {
            fn text(&self) -> String {
                "widget".to_string()
            }

            fn category(&self) -> &'static str {
                "Widget"
            }
        }

        assert_eq!(default_key::<Widget>()(&Widget), "(widget:0)");
    }

    #[test]
    fn priority_rules_win_over_standard_rules() {
        let table = TypeTable::<Value>::standard()
            .with_priority_rule(|v| v.as_str().is_some_and(|s| s.starts_with('#')), 42)
            .with_rule(|_| true, 99);
        let key = key_with_table(table);

        assert_eq!(key(&json!("#tag")), "(#tag:42)");
        assert_eq!(key(&json!("tag")), "(tag:5)");
    }

    #[test]
    fn default_key_distinguishes_number_from_string() {
        let key = default_key::<Value>();

        assert_eq!(key(&json!(1)), "(1:3)");
        assert_eq!(key(&json!("1")), "(1:5)");
        assert_eq!(key(&json!({"a": 1})), key(&json!({"b": 2})));
    }

    #[test]
    fn default_key_for_absent_option() {
        let key = default_key::<Option<i32>>();

        assert_eq!(key(&None), "(undefined:1)");
        assert_eq!(key(&Some(3)), "(3:3)");
    }
}
