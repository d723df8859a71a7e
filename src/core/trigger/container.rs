//=========================================================================
// Container
//=========================================================================
//
// Lockable, lootable trigger payload.
//
// Lock matching is prefix-validated: each symbol is appended to the
// attempt and checked against the lock immediately, so one wrong symbol
// anywhere resets the whole attempt rather than only at full length.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::session::Inventory;

//=== LockSymbol ==========================================================

/// One symbol of the two-symbol lock alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockSymbol {
    /// `<`
    Left,
    /// `>`
    Right,
}

impl LockSymbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Left => '<',
            Self::Right => '>',
        }
    }
}

//=== LockSequence ========================================================

/// Ordered lock combination. Empty means unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockSequence(Vec<LockSymbol>);

impl LockSequence {
    pub fn new(symbols: Vec<LockSymbol>) -> Self {
        Self(symbols)
    }

    /// Parses an authored lock string, dropping characters outside the
    /// alphabet with a warning.
    pub fn parse(text: &str) -> Self {
        let symbols = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| {
                let symbol = LockSymbol::from_char(c);
                if symbol.is_none() {
                    warn!("Ignoring lock symbol {:?} in {:?}", c, text);
                }
                symbol
            })
            .collect();
        Self(symbols)
    }

    pub fn symbols(&self) -> &[LockSymbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LockSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|symbol| write!(f, "{}", symbol.as_char()))
    }
}

//=== LockProgress ========================================================

/// Outcome of feeding one symbol to a lock attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockProgress {
    /// Attempt is a valid prefix of this length.
    InProgress(usize),
    /// Attempt matched the whole lock; the accumulator was cleared.
    Success,
    /// Wrong or malformed symbol; the accumulator was cleared.
    Failed,
}

//=== Loot ================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootEntry {
    pub item_id: String,
    pub count: u32,
}

impl LootEntry {
    pub fn new(item_id: impl Into<String>, count: u32) -> Self {
        Self { item_id: item_id.into(), count }
    }
}

/// Loot a container gets when its authoring record names none.
pub fn default_loot() -> Vec<LootEntry> {
    vec![LootEntry::new("healing_potion", 1)]
}

/// Parses `"id:count, id:count"`. A bare id counts as one; entries with
/// an unreadable count are skipped with a warning.
pub fn parse_loot(text: &str) -> Vec<LootEntry> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.split_once(':') {
            None => Some(LootEntry::new(entry, 1)),
            Some((id, count)) => match count.trim().parse::<u32>() {
                Ok(count) if count > 0 => Some(LootEntry::new(id.trim(), count)),
                _ => {
                    warn!("Skipping loot entry {:?}: bad count", entry);
                    None
                }
            },
        })
        .collect()
}

//=== VisualProxy =========================================================

/// Renderable bound one-to-one to a container, told when it opens.
pub trait VisualProxy: Send {
    fn set_opened(&mut self, opened: bool);
}

//=== Container ===========================================================

pub struct Container {
    lock: LockSequence,
    entered: Vec<LockSymbol>,
    is_opened: bool,
    loot: Vec<LootEntry>,
    visual: Option<Box<dyn VisualProxy>>,
}

impl Container {
    //--- Construction -----------------------------------------------------

    pub fn new(lock: LockSequence, loot: Vec<LootEntry>) -> Self {
        Self {
            lock,
            entered: Vec::new(),
            is_opened: false,
            loot,
            visual: None,
        }
    }

    //--- State ------------------------------------------------------------

    pub fn is_locked(&self) -> bool {
        !self.lock.is_empty()
    }

    pub fn is_opened(&self) -> bool {
        self.is_opened
    }

    pub fn lock(&self) -> &LockSequence {
        &self.lock
    }

    pub fn loot(&self) -> &[LootEntry] {
        &self.loot
    }

    /// Symbols of the attempt in progress.
    pub fn entered(&self) -> &[LockSymbol] {
        &self.entered
    }

    pub fn has_visual(&self) -> bool {
        self.visual.is_some()
    }

    //--- Lock Picking -----------------------------------------------------

    /// Appends one symbol and validates the attempt as a prefix.
    pub fn enter_symbol(&mut self, symbol: LockSymbol) -> LockProgress {
        self.entered.push(symbol);

        if !self.lock.symbols().starts_with(&self.entered) {
            debug!("Lock attempt failed after {} symbols", self.entered.len());
            self.entered.clear();
            return LockProgress::Failed;
        }

        if self.entered.len() == self.lock.len() {
            self.entered.clear();
            return LockProgress::Success;
        }

        LockProgress::InProgress(self.entered.len())
    }

    /// Character form of [`enter_symbol`](Self::enter_symbol). Characters
    /// outside the alphabet reset the attempt.
    pub fn enter_char(&mut self, c: char) -> LockProgress {
        match LockSymbol::from_char(c) {
            Some(symbol) => self.enter_symbol(symbol),
            None => {
                warn!("Malformed lock symbol {:?}, resetting attempt", c);
                self.entered.clear();
                LockProgress::Failed
            }
        }
    }

    pub fn reset_attempt(&mut self) {
        self.entered.clear();
    }

    //--- Opening ----------------------------------------------------------

    /// Grants the loot and marks the container opened. Returns `false`
    /// without touching the inventory if it was already open.
    pub fn open(&mut self, inventory: &mut Inventory) -> bool {
        if self.is_opened {
            debug!("Container already opened");
            return false;
        }

        for entry in &self.loot {
            inventory.add(&entry.item_id, entry.count);
        }
        self.is_opened = true;
        info!("Container opened ({} loot entries)", self.loot.len());

        if let Some(visual) = self.visual.as_mut() {
            visual.set_opened(true);
        }
        true
    }

    /// Binds the visual proxy. Hands the proxy back if one is already bound.
    pub fn bind_visual(&mut self, proxy: Box<dyn VisualProxy>) -> Result<(), Box<dyn VisualProxy>> {
        if self.visual.is_some() {
            return Err(proxy);
        }
        self.visual = Some(proxy);
        Ok(())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("lock", &self.lock.to_string())
            .field("entered", &self.entered.len())
            .field("is_opened", &self.is_opened)
            .field("loot", &self.loot)
            .field("visual", &self.visual.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn locked(lock: &str) -> Container {
        Container::new(LockSequence::parse(lock), vec![LootEntry::new("potion", 3)])
    }

    struct Flag(Arc<AtomicBool>);

    impl VisualProxy for Flag {
        fn set_opened(&mut self, opened: bool) {
            self.0.store(opened, Ordering::SeqCst);
        }
    }

    //=====================================================================
    // Parsing Tests
    //=====================================================================

    #[test]
    fn lock_parse_drops_foreign_symbols() {
        let lock = LockSequence::parse("<x> <");
        assert_eq!(lock.to_string(), "<><");
        assert_eq!(lock.len(), 3);
    }

    #[test]
    fn loot_parse_reads_counts() {
        let loot = parse_loot("healing_potion:3, rusty_key, gold_coin:zero, mana_potion:2");
        assert_eq!(
            loot,
            vec![
                LootEntry::new("healing_potion", 3),
                LootEntry::new("rusty_key", 1),
                LootEntry::new("mana_potion", 2),
            ]
        );
    }

    #[test]
    fn default_loot_is_not_empty() {
        assert!(!default_loot().is_empty());
    }

    //=====================================================================
    // Lock Sequence Tests
    //=====================================================================

    #[test]
    fn correct_sequence_reports_progress_then_success() {
        let mut chest = locked("<><");
        assert_eq!(chest.enter_symbol(LockSymbol::Left), LockProgress::InProgress(1));
        assert_eq!(chest.enter_symbol(LockSymbol::Right), LockProgress::InProgress(2));
        assert_eq!(chest.enter_symbol(LockSymbol::Left), LockProgress::Success);
        assert!(chest.entered().is_empty());
    }

    /// A wrong second symbol fails immediately, not at full length.
    #[test]
    fn wrong_symbol_fails_immediately() {
        let mut chest = locked("<<<<");
        chest.enter_symbol(LockSymbol::Left);
        assert_eq!(chest.enter_symbol(LockSymbol::Right), LockProgress::Failed);
        assert!(chest.entered().is_empty());
    }

    #[test]
    fn malformed_char_resets_attempt() {
        let mut chest = locked("<>");
        chest.enter_char('<');
        assert_eq!(chest.enter_char('^'), LockProgress::Failed);
        assert!(chest.entered().is_empty());
        assert_eq!(chest.enter_char('<'), LockProgress::InProgress(1));
    }

    //=====================================================================
    // Opening Tests
    //=====================================================================

    #[test]
    fn open_is_idempotent() {
        let mut chest = locked("");
        let mut inventory = Inventory::new();

        assert!(chest.open(&mut inventory));
        assert!(!chest.open(&mut inventory));

        assert!(chest.is_opened());
        assert_eq!(inventory.count_of("potion"), 3);
        assert_eq!(inventory.items.len(), 1);
    }

    #[test]
    fn open_notifies_visual_proxy() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut chest = locked("");
        assert!(chest.bind_visual(Box::new(Flag(flag.clone()))).is_ok());

        chest.open(&mut Inventory::new());

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn visual_proxy_binds_once() {
        let mut chest = locked("");
        let flag = Arc::new(AtomicBool::new(false));
        assert!(chest.bind_visual(Box::new(Flag(flag.clone()))).is_ok());
        assert!(chest.bind_visual(Box::new(Flag(flag))).is_err());
    }

    //=====================================================================
    // Prefix Law Properties
    //=====================================================================

    fn symbol() -> impl Strategy<Value = LockSymbol> {
        prop_oneof![Just(LockSymbol::Left), Just(LockSymbol::Right)]
    }

    proptest! {
        /// Entering the lock itself always succeeds in one attempt.
        #[test]
        fn entering_the_lock_succeeds(lock in prop::collection::vec(symbol(), 1..12)) {
            let mut chest = Container::new(LockSequence::new(lock.clone()), default_loot());
            for (index, &s) in lock.iter().enumerate() {
                let progress = chest.enter_symbol(s);
                if index + 1 == lock.len() {
                    prop_assert_eq!(progress, LockProgress::Success);
                } else {
                    prop_assert_eq!(progress, LockProgress::InProgress(index + 1));
                }
            }
        }

        /// A fresh attempt of exactly `len(S)` symbols succeeds iff it
        /// equals `S`; the first mismatch resets immediately.
        #[test]
        fn attempt_succeeds_iff_equal(
            lock in prop::collection::vec(symbol(), 1..10),
            input in prop::collection::vec(symbol(), 1..10),
        ) {
            let mut chest = Container::new(LockSequence::new(lock.clone()), default_loot());
            let attempt: Vec<LockSymbol> = input.iter().copied().take(lock.len()).collect();

            let mut last = LockProgress::InProgress(0);
            for (index, &s) in attempt.iter().enumerate() {
                last = chest.enter_symbol(s);
                if s != lock[index] {
                    prop_assert_eq!(last, LockProgress::Failed);
                    prop_assert!(chest.entered().is_empty());
                    break;
                }
            }

            if attempt.len() == lock.len() {
                prop_assert_eq!(last == LockProgress::Success, attempt == lock);
            }
        }
    }
}
