use std::borrow::Cow;
use std::fmt;

/// Deduplicated category labels that remember the order they were produced.
///
/// Equality ignores order: two sets are equal when they hold the same labels.
#[derive(Clone, Debug, Default)]
pub struct CategorySet {
    labels: Vec<Cow<'static, str>>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label unless already present. Returns whether it was added.
    pub fn insert(&mut self, label: impl Into<Cow<'static, str>>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in first-produced order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(|l| l.as_ref())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.labels.into_iter().map(Cow::into_owned).collect()
    }
}

impl PartialEq for CategorySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|l| other.contains(l))
    }
}

impl Eq for CategorySet {}

impl<L: Into<Cow<'static, str>>> FromIterator<L> for CategorySet {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl<L: Into<Cow<'static, str>>> Extend<L> for CategorySet {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}

/// Comma-joined labels.
impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}
