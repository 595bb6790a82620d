use std::collections::HashSet;

/// The slugs of every taxonomy term classified as a category.
///
/// Loaded once before any post is processed and never modified afterwards;
/// it is only used to separate categories from tags in the joined term list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    slugs: HashSet<String>,
}

impl CategorySet {
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { slugs: iter.into_iter().map(Into::into).collect() }
    }
}
