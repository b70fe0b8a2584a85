//! Child shape helpers.

use crate::error::{ReplaceError, Result};

/// Extracts the identity of a child.
///
/// Two children occupy the same slot iff their extracted identities are
/// equal. Extraction must be pure: the same child always yields the same
/// identity.
pub type IdentityFn<C, I> = Box<dyn Fn(&C) -> I>;

/// Reduce a list of children to the single optional child the container
/// accepts.
pub fn only_child<C>(children: Vec<C>) -> Result<Option<C>> {
    if children.len() > 1 {
        return Err(ReplaceError::MultipleChildren(children.len()));
    }
    Ok(children.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_child() {
        assert_eq!(only_child::<u8>(vec![]), Ok(None));
        assert_eq!(only_child(vec![7]), Ok(Some(7)));
        assert_eq!(
            only_child(vec![1, 2, 3]),
            Err(ReplaceError::MultipleChildren(3))
        );
    }
}
