use serde::{Deserialize, Serialize};

/// How out-of-range indices are resolved when a filter footprint leaves the
/// image.
///
/// With `len = 5` and samples `abcde`:
/// - `Clamp`:      `aa|abcde|ee`
/// - `Constant(c)`: `cc|abcde|cc`
/// - `Reflect`:    `ba|abcde|ed`
/// - `Reflect101`: `cb|abcde|dc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode<T> {
    Clamp,
    Constant(T),
    Reflect,
    Reflect101,
}

impl<T> Default for BorderMode<T> {
    fn default() -> Self {
        Self::Reflect101
    }
}

/// Maps a possibly out-of-range index into `[0, len)`.
///
/// Returns `None` for `Constant` (the caller substitutes the fill value) and
/// for empty axes.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if (0..len as isize).contains(&i) {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
        BorderMode::Reflect => {
            let period = (2 * len) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { 2 * len - 1 - r })
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { 2 * len - 2 - r })
        }
    }
}
