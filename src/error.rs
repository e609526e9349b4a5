use thiserror::Error;

/// Reasons a bulk load can reject its input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The item at `index` is smaller than the one before it.
    #[error("item at index {index} is out of ascending order")]
    Unsorted { index: usize },
    /// The item at `index` equals the one before it.
    #[error("item at index {index} duplicates its predecessor")]
    Duplicate { index: usize },
}

/// Checks that `items` is strictly ascending.
pub(crate) fn check_sorted<T: Ord>(items: &[T]) -> Result<(), TreeError> {
    for (index, pair) in items.windows(2).enumerate() {
        match pair[0].cmp(&pair[1]) {
            std::cmp::Ordering::Less => {}
            std::cmp::Ordering::Equal => return Err(TreeError::Duplicate { index: index + 1 }),
            std::cmp::Ordering::Greater => return Err(TreeError::Unsorted { index: index + 1 }),
        }
    }
    Ok(())
}
