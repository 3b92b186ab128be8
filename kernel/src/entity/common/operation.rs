use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{KernelError, Violations};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i32);

impl SelectLimit {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectLimit(value.into())
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(30)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectOffset(i32);

impl SelectOffset {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectOffset(value.into())
    }
}

/// Limit and offset as given by a caller. Negative values are field errors.
pub fn checked_paging(
    limit: Option<i32>,
    offset: Option<i32>,
) -> error_stack::Result<(Option<SelectLimit>, SelectOffset), KernelError> {
    let mut violations = Violations::new();
    violations.check(
        limit.map_or(true, |limit| limit >= 0),
        "limit",
        "limit must not be negative",
    );
    violations.check(
        offset.map_or(true, |offset| offset >= 0),
        "offset",
        "offset must not be negative",
    );
    violations.into_result()?;
    Ok((
        limit.map(SelectLimit::new),
        offset.map(SelectOffset::new).unwrap_or_default(),
    ))
}

/// Applies an optional limit and an offset to an already ordered list.
pub fn paginate<T>(items: Vec<T>, limit: Option<&SelectLimit>, offset: &SelectOffset) -> Vec<T> {
    let skip = usize::try_from(*offset.as_ref()).unwrap_or(0);
    let iter = items.into_iter().skip(skip);
    match limit {
        Some(limit) => iter
            .take(usize::try_from(*limit.as_ref()).unwrap_or(0))
            .collect(),
        None => iter.collect(),
    }
}
