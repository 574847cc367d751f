use derive_more::{Deref, DerefMut};

/// A buffer of side effects produced while handling one input event.
///
/// Handlers push into it, the caller drains it after the call returns.
#[derive(Debug, Clone, PartialEq, Deref, DerefMut)]
pub struct Events<E>(Vec<E>);

impl<E> Default for Events<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E> Events<E> {
    pub fn into_vec(self) -> Vec<E> {
        self.0
    }
}

impl<E> IntoIterator for Events<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<E> FromIterator<E> for Events<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
