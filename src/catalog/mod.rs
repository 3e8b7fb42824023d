//! Symbol catalog for deck building.
//!
//! The `SymbolCatalog` stores the symbols a deal can draw from. A board
//! of N pairs uses the first N symbols in catalog order, so the order
//! symbols are registered in is the order they enter play.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Symbol identifier. Two cards showing the same symbol form a pair.
///
/// The engine doesn't interpret symbol IDs - they're opaque identifiers.
/// Hosts map them to artwork via the catalog's symbol names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    /// Create a new symbol ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique identifier for this symbol.
    pub id: SymbolId,

    /// Stable machine name (e.g. `"birthday-cake"`). Hosts use this to
    /// pick artwork; the engine only compares IDs.
    pub name: String,
}

impl Symbol {
    /// Create a new symbol.
    pub fn new(id: SymbolId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Built-in party-themed symbol names, in deal order.
///
/// 32 entries, enough to fill the largest default board (8x8, 32 pairs).
const BUILTIN_NAMES: &[&str] = &[
    "birthday-cake",
    "gift",
    "balloon",
    "glass-cheers",
    "crown",
    "music",
    "star",
    "heart",
    "candy-cane",
    "ice-cream",
    "champagne-glasses",
    "party-horn",
    "bell",
    "trophy",
    "sparkles",
    "face-laugh-beam",
    "confetti",
    "cupcake",
    "candle",
    "party-hat",
    "pinata",
    "fireworks",
    "streamers",
    "lollipop",
    "donut",
    "teddy-bear",
    "ribbon",
    "wand",
    "rainbow",
    "gem",
    "camera",
    "rocket",
];

/// Registry of symbols available to the dealer.
///
/// Keeps registration order: a deal for N pairs takes the first N
/// symbols, so hosts control the progression by controlling the order.
///
/// ## Example
///
/// ```
/// use flipmatch::catalog::SymbolCatalog;
///
/// let mut catalog = SymbolCatalog::new();
/// let cake = catalog.register_named("birthday-cake");
///
/// let found = catalog.get(cake).unwrap();
/// assert_eq!(found.name, "birthday-cake");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
    index: FxHashMap<SymbolId, usize>,
    next_id: u16,
}

impl SymbolCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the built-in party-themed catalog (32 symbols).
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for name in BUILTIN_NAMES {
            catalog.register_named(*name);
        }
        catalog
    }

    /// Register a symbol.
    ///
    /// Panics if a symbol with the same ID already exists.
    pub fn register(&mut self, symbol: Symbol) {
        if self.index.contains_key(&symbol.id) {
            panic!("Symbol with ID {:?} already registered", symbol.id);
        }
        self.index.insert(symbol.id, self.symbols.len());
        self.symbols.push(symbol);
    }

    /// Register a symbol with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn register_named(&mut self, name: impl Into<String>) -> SymbolId {
        let id = SymbolId::new(self.next_id);
        self.next_id += 1;

        self.register(Symbol::new(id, name));
        id
    }

    /// Get a symbol by ID.
    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.index.get(&id).map(|&slot| &self.symbols[slot])
    }

    /// Check if a symbol ID is registered.
    #[must_use]
    pub fn contains(&self, id: SymbolId) -> bool {
        self.index.contains_key(&id)
    }

    /// Get the number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols in registration (deal) order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterate over all symbols in deal order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}
