use serde::{Deserialize, Serialize};

use crate::{member_name, CardId};

/// One tile of the deck. Two cards share each identity; `matched` flips to
/// true exactly once per deal, when its pair is resolved.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    matched: bool,
}

impl Card {
    pub const fn new(id: CardId) -> Self {
        Self { id, matched: false }
    }

    pub const fn id(self) -> CardId {
        self.id
    }

    pub fn label(self) -> &'static str {
        member_name(self.id)
    }

    pub const fn is_matched(self) -> bool {
        self.matched
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }

    pub(crate) fn clear_matched(&mut self) {
        self.matched = false;
    }
}
