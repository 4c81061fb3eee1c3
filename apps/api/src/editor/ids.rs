use chrono::Utc;

use crate::models::cv::ItemId;

/// Clock-derived item ids: the current Unix time in milliseconds, bumped past
/// the previous id when two items are created within the same millisecond or
/// the wall clock steps backwards. Ids never repeat for one generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: ItemId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ItemId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last + 1);
        self.last
    }
}
