//! Index masks: the ordered set of element indices a call processes.

use std::borrow::Cow;
use std::ops::Range;

/// Rejected mask input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    #[error("mask indices must be ascending: {previous} is followed by {index} at position {position}")]
    Unsorted {
        position: usize,
        previous: usize,
        index: usize,
    },

    #[error("mask index {index} appears twice (position {position})")]
    Duplicate { position: usize, index: usize },
}

/// Ascending, unique element indices.
///
/// Borrowed when built from an existing slice, owned otherwise. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMask<'a> {
    indices: Cow<'a, [usize]>,
}

impl<'a> IndexMask<'a> {
    /// Every index in `0..len`.
    pub fn range(len: usize) -> IndexMask<'static> {
        IndexMask::from_range(0..len)
    }

    pub fn from_range(range: Range<usize>) -> IndexMask<'static> {
        IndexMask {
            indices: Cow::Owned(range.collect()),
        }
    }

    pub fn empty() -> IndexMask<'static> {
        IndexMask {
            indices: Cow::Borrowed(&[]),
        }
    }

    /// Borrow `indices`. Panics unless they are ascending and unique.
    pub fn from_slice(indices: &'a [usize]) -> Self {
        if let Err(err) = check_sorted_unique(indices) {
            panic!("invalid index mask: {err}");
        }
        Self {
            indices: Cow::Borrowed(indices),
        }
    }

    /// Take `indices`. Panics unless they are ascending and unique.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        match Self::try_new(indices) {
            Ok(mask) => mask,
            Err(err) => panic!("invalid index mask: {err}"),
        }
    }

    pub fn try_new(indices: Vec<usize>) -> Result<Self, MaskError> {
        check_sorted_unique(&indices)?;
        Ok(Self {
            indices: Cow::Owned(indices),
        })
    }

    /// Number of active indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Smallest container length that can address every index (`max + 1`, or 0).
    pub fn min_array_size(&self) -> usize {
        self.indices.last().map_or(0, |&last| last + 1)
    }

    /// Whether the indices form one contiguous run.
    pub fn is_range(&self) -> bool {
        match (self.indices.first(), self.indices.last()) {
            (Some(&first), Some(&last)) => last - first + 1 == self.indices.len(),
            _ => true,
        }
    }
}

impl<'m> IntoIterator for &'m IndexMask<'_> {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'m, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}

fn check_sorted_unique(indices: &[usize]) -> Result<(), MaskError> {
    for (position, pair) in indices.windows(2).enumerate() {
        let (previous, index) = (pair[0], pair[1]);
        if previous == index {
            return Err(MaskError::Duplicate {
                position: position + 1,
                index,
            });
        }
        if previous > index {
            return Err(MaskError::Unsorted {
                position: position + 1,
                previous,
                index,
            });
        }
    }
    Ok(())
}
