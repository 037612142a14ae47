//! Typed read-only views.
//!
//! A `VirtualList` is a value per index without requiring a dense array behind it:
//! one value broadcast to every index, a slice, or a slice repeated cyclically.
//! A `VirtualListList` is a list per index.

use std::ops::Index;

/// Read-only view of `len` values of type `T`.
#[derive(Debug)]
pub enum VirtualList<'a, T> {
    /// The same value at every index.
    Single { value: &'a T, len: usize },
    /// One stored value per index.
    Full(&'a [T]),
    /// `slice[i % slice.len()]` at index `i`.
    Repeated { slice: &'a [T], len: usize },
}

impl<T> Clone for VirtualList<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VirtualList<'_, T> {}

impl<'a, T> VirtualList<'a, T> {
    pub fn single(value: &'a T, len: usize) -> Self {
        Self::Single { value, len }
    }

    pub fn from_slice(slice: &'a [T]) -> Self {
        Self::Full(slice)
    }

    /// Repeat `slice` cyclically up to `len` values. `slice` must be non-empty when `len > 0`.
    pub fn repeated(slice: &'a [T], len: usize) -> Self {
        assert!(
            len == 0 || !slice.is_empty(),
            "cannot repeat an empty slice to length {len}"
        );
        Self::Repeated { slice, len }
    }

    pub fn len(&self) -> usize {
        match *self {
            Self::Single { len, .. } | Self::Repeated { len, .. } => len,
            Self::Full(slice) => slice.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`. Panics when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> &'a T {
        assert!(
            index < self.len(),
            "index {index} out of range for virtual list of length {}",
            self.len()
        );
        match *self {
            Self::Single { value, .. } => value,
            Self::Full(slice) => &slice[index],
            Self::Repeated { slice, .. } => &slice[index % slice.len()],
        }
    }

    /// The broadcast value, if every index holds the same one.
    pub fn as_single(&self) -> Option<&'a T> {
        match *self {
            Self::Single { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl<T: Clone> VirtualList<'_, T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<'a, T> Index<usize> for VirtualList<'a, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

/// Read-only view of `len` lists of type `T`.
#[derive(Debug)]
pub enum VirtualListList<'a, T> {
    /// The same list at every index.
    Single { list: &'a [T], len: usize },
    /// One stored list per index.
    Full(&'a [Vec<T>]),
}

impl<T> Clone for VirtualListList<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VirtualListList<'_, T> {}

impl<'a, T> VirtualListList<'a, T> {
    pub fn single(list: &'a [T], len: usize) -> Self {
        Self::Single { list, len }
    }

    pub fn from_lists(lists: &'a [Vec<T>]) -> Self {
        Self::Full(lists)
    }

    pub fn len(&self) -> usize {
        match *self {
            Self::Single { len, .. } => len,
            Self::Full(lists) => lists.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the list at `index`.
    pub fn list_len(&self, index: usize) -> usize {
        self.get(index).len()
    }

    /// List at `index`, as a view over its elements.
    pub fn get(&self, index: usize) -> VirtualList<'a, T> {
        assert!(
            index < self.len(),
            "index {index} out of range for list of lists of length {}",
            self.len()
        );
        match *self {
            Self::Single { list, .. } => VirtualList::Full(list),
            Self::Full(lists) => VirtualList::Full(lists[index].as_slice()),
        }
    }
}
