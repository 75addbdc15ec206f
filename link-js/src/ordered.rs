use ahash::HashMap;

/// String-keyed map that iterates in first-insertion order.
///
/// Inserting an existing key replaces its value but keeps its position, the
/// same way assigning to an existing property of a JS object does.
#[derive(Clone, Debug)]
pub struct OrderedMap<V> {
  entries: Vec<(String, V)>,
  index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
      index: HashMap::default(),
    }
  }
}

impl<V> OrderedMap<V> {
  /// Returns the replaced value, if any.
  pub fn insert(&mut self, key: String, value: V) -> Option<V> {
    match self.index.get(&key) {
      Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
      None => {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
      }
    }
  }

  pub fn get(&self, key: &str) -> Option<&V> {
    self.index.get(key).map(|&pos| &self.entries[pos].1)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &V)> + '_ {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
    self.entries.iter().map(|(_, v)| v)
  }
}
