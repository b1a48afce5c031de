//! Symbol table management for labels

use std::collections::HashMap;

/// A symbol table entry mapping a label to an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Label name, uppercased
    pub name: String,

    /// Resolved memory address for this label
    pub address: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// Label table built during pass 1 and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol to the table
    ///
    /// Returns the existing symbol if the name is already taken.
    pub fn add_symbol(
        &mut self,
        name: String,
        address: u16,
        defined_at: usize,
    ) -> Result<(), Symbol> {
        if let Some(existing) = self.symbols.get(&name) {
            return Err(existing.clone());
        }

        self.symbols.insert(
            name.clone(),
            Symbol {
                name,
                address,
                defined_at,
            },
        );

        Ok(())
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols, sorted by address then name.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.symbols.values().collect();
        symbols.sort_by(|a, b| a.address.cmp(&b.address).then_with(|| a.name.cmp(&b.name)));
        symbols
    }
}
