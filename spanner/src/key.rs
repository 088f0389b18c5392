use prost_types::{ListValue, Value};

use spanwire_googleapis::spanner::v1::key_range::{EndKeyType, StartKeyType};
use spanwire_googleapis::spanner::v1::KeyRange as InternalKeyRange;
use spanwire_googleapis::spanner::v1::KeySet as InternalKeySet;

use crate::statement::ToKind;

/// A Key is the primary key of a row, or a prefix of it, as an ordered list of key part values.
///
/// ```ignore
/// let key = Key::composite(&[&"Singer1", &1_i64]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    pub(crate) values: ListValue,
}

impl Key {
    /// Key of a table with a single key column.
    pub fn new(value: &dyn ToKind) -> Key {
        Key::composite(&[value])
    }

    pub fn composite(values: &[&dyn ToKind]) -> Key {
        Key {
            values: ListValue {
                values: values
                    .iter()
                    .map(|x| Value {
                        kind: Some(x.to_kind()),
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeKind {
    /// start <= key <= end
    ClosedClosed,
    /// start <= key < end
    ClosedOpen,
    /// start < key <= end
    OpenClosed,
    /// start < key < end
    OpenOpen,
}

/// A range of keys. A key that is a prefix of the primary key matches every row sharing that prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyRange {
    pub(crate) start: Key,
    pub(crate) end: Key,
    pub kind: RangeKind,
}

impl KeyRange {
    pub fn new(start: Key, end: Key, kind: RangeKind) -> KeyRange {
        KeyRange { start, end, kind }
    }
}

impl From<KeyRange> for InternalKeyRange {
    fn from(key_range: KeyRange) -> Self {
        let (start, end) = match key_range.kind {
            RangeKind::ClosedClosed => (
                StartKeyType::StartClosed(key_range.start.values),
                EndKeyType::EndClosed(key_range.end.values),
            ),
            RangeKind::ClosedOpen => (
                StartKeyType::StartClosed(key_range.start.values),
                EndKeyType::EndOpen(key_range.end.values),
            ),
            RangeKind::OpenClosed => (
                StartKeyType::StartOpen(key_range.start.values),
                EndKeyType::EndClosed(key_range.end.values),
            ),
            RangeKind::OpenOpen => (
                StartKeyType::StartOpen(key_range.start.values),
                EndKeyType::EndOpen(key_range.end.values),
            ),
        };
        InternalKeyRange {
            start_key_type: Some(start),
            end_key_type: Some(end),
        }
    }
}

/// A set of keys and key ranges of one table or index.
///
/// A key set marked `all` covers the whole table; explicit keys and ranges added to it are
/// dropped when it is sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeySet {
    keys: Vec<Key>,
    ranges: Vec<KeyRange>,
    all: bool,
}

pub fn all_keys() -> KeySet {
    KeySet {
        all: true,
        ..Default::default()
    }
}

impl KeySet {
    pub fn new() -> KeySet {
        KeySet::default()
    }

    pub fn add_key(mut self, key: Key) -> KeySet {
        self.keys.push(key);
        self
    }

    pub fn add_range(mut self, range: KeyRange) -> KeySet {
        self.ranges.push(range);
        self
    }

    pub fn is_all(&self) -> bool {
        self.all
    }
}

impl From<KeySet> for InternalKeySet {
    fn from(key_set: KeySet) -> Self {
        if key_set.all {
            return InternalKeySet {
                keys: vec![],
                ranges: vec![],
                all: true,
            };
        }
        InternalKeySet {
            keys: key_set.keys.into_iter().map(|k| k.values).collect(),
            ranges: key_set.ranges.into_iter().map(|r| r.into()).collect(),
            all: false,
        }
    }
}

impl From<KeyRange> for KeySet {
    fn from(key_range: KeyRange) -> Self {
        KeySet::new().add_range(key_range)
    }
}

impl From<Key> for KeySet {
    fn from(key: Key) -> Self {
        KeySet::new().add_key(key)
    }
}

impl From<Vec<Key>> for KeySet {
    fn from(keys: Vec<Key>) -> Self {
        KeySet {
            keys,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use prost_types::value::Kind;

    use spanwire_googleapis::spanner::v1::key_range::{EndKeyType, StartKeyType};
    use spanwire_googleapis::spanner::v1::KeySet as InternalKeySet;

    use crate::key::*;

    #[test]
    fn test_composite_key() {
        let key = Key::composite(&[&"a", &1_i64]);
        assert_eq!(key.values.values.len(), 2);
        assert_eq!(key.values.values[1].kind, Some(Kind::StringValue("1".to_string())));
        assert_eq!(Key::new(&"a").values.values.len(), 1);
    }

    #[test]
    fn test_range_kinds() {
        let range = KeyRange::new(Key::new(&1_i64), Key::new(&10_i64), RangeKind::ClosedOpen);
        let ks: InternalKeySet = KeySet::from(range).into();
        assert_eq!(ks.ranges.len(), 1);
        assert!(matches!(ks.ranges[0].start_key_type, Some(StartKeyType::StartClosed(_))));
        assert!(matches!(ks.ranges[0].end_key_type, Some(EndKeyType::EndOpen(_))));

        let range = KeyRange::new(Key::new(&1_i64), Key::new(&10_i64), RangeKind::OpenClosed);
        let ks: InternalKeySet = KeySet::from(range).into();
        assert!(matches!(ks.ranges[0].start_key_type, Some(StartKeyType::StartOpen(_))));
        assert!(matches!(ks.ranges[0].end_key_type, Some(EndKeyType::EndClosed(_))));
    }

    #[test]
    fn test_keys_and_ranges() {
        let ks: InternalKeySet = KeySet::new()
            .add_key(Key::new(&1_i64))
            .add_key(Key::new(&2_i64))
            .add_range(KeyRange::new(Key::new(&5_i64), Key::new(&9_i64), RangeKind::OpenOpen))
            .into();
        assert_eq!(ks.keys.len(), 2);
        assert_eq!(ks.ranges.len(), 1);
        assert!(!ks.all);
    }

    #[test]
    fn test_all_overrides() {
        let ks = all_keys().add_key(Key::new(&1_i64));
        assert!(ks.is_all());
        let ks: InternalKeySet = ks.into();
        assert!(ks.all);
        assert!(ks.keys.is_empty());
        assert!(ks.ranges.is_empty());
    }
}
