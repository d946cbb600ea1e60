//! Semantic action IDs for Dungeon Crawl click targets.

/// Choice base: +index (0-based). So choice [1] = CHOICE_BASE+0, etc.
pub const CHOICE_BASE: u16 = 10;
/// Keys `1`-`9` map onto the first nine choices.
pub const MAX_CHOICES: u16 = 9;

/// The "start" line on the character creation screen.
pub const SUBMIT_NAME: u16 = 30;
