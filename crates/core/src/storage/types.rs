use serde::{Deserialize, Serialize};

/// A limit/offset window over an ordered result set.
///
/// Windows are clamped rather than rejected: an offset past the end yields
/// nothing and a limit past the end yields the remaining tail. No total count
/// is carried. Missing fields deserialize to the default page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Returns true if this window can never contain an item.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Applies the window to an already ordered sequence.
    pub fn apply<I>(&self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}
