/// Identity shared by the two cards of a pair, also the roster position of
/// the member shown on the card face.
pub type CardId = u8;

/// Position of a card within the dealt deck.
pub type CardIndex = u8;

/// Count type for pairs on the board.
pub type PairCount = u8;
