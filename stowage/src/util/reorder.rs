use crate::error::{PackError, Result};

/// Moves the element at `replace_id` right in front of the element at `current_id`.
///
/// The element at `current_id` is removed first, then the element now found at `replace_id - 1`.
/// Both are reinserted at `current_id` (clamped to the reduced length) as `[replaced, current]`.
/// For `[A, B, C, D]`, `current_id = 0` and `replace_id = 2` this yields `[C, A, B, D]`.
pub fn reorder<T>(mut list: Vec<T>, current_id: usize, replace_id: usize) -> Result<Vec<T>> {
    let len = list.len();
    if current_id >= len {
        return Err(PackError::out_of_range("current box", current_id, len));
    }
    if replace_id == 0 || replace_id >= len {
        return Err(PackError::out_of_range("replacement box", replace_id, len));
    }

    let current_item = list.remove(current_id);
    let replace_item = list.remove(replace_id - 1);

    let split = current_id.min(list.len());
    let suffix = list.split_off(split);
    list.push(replace_item);
    list.push(current_item);
    list.extend(suffix);
    Ok(list)
}
