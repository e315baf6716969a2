//! Import resolution: which symbols get a `use` and how every symbol is spelled.

use std::collections::{BTreeMap, HashSet};

use gapic_codegen::{
    ast::{CompilationUnit, Symbol, referenced_symbols},
    generation::{ImportCollector, ImportGroup},
};

/// How the symbols of one unit are written.
///
/// Built once per unit from every symbol the unit references. Items are
/// imported by their outermost importable path: a variant such as
/// `crate::model::Severity::Urgent` imports `Severity` and is written
/// `Severity::Urgent`.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
    module: Vec<String>,
    declared: HashSet<String>,
    qualified: HashSet<Symbol>,
    imports: ImportCollector,
}

impl NameTable {
    pub(crate) fn build(unit: &CompilationUnit) -> Self {
        let mut table = Self {
            module: unit.module.clone(),
            declared: unit.declared_names().into_iter().map(str::to_string).collect(),
            ..Self::default()
        };

        let mut by_name: BTreeMap<String, Vec<Symbol>> = BTreeMap::new();
        for symbol in referenced_symbols(unit) {
            if let Some(target) = table.import_target(symbol) {
                let candidates = by_name.entry(target.name.clone()).or_default();
                if !candidates.contains(&target) {
                    candidates.push(target);
                }
            }
        }

        for (name, mut candidates) in by_name {
            candidates.sort_by_cached_key(|s| {
                let module = s.module_path();
                (ImportGroup::of(&module), module)
            });
            let shadowed = table.declared.contains(&name);
            for (i, symbol) in candidates.into_iter().enumerate() {
                if shadowed || i > 0 {
                    table.qualified.insert(symbol);
                } else if !symbol.is_prelude() {
                    table.imports.add(&symbol.module_path(), &symbol.name);
                }
            }
        }
        table
    }

    pub(crate) fn imports(&self) -> &ImportCollector {
        &self.imports
    }

    /// The spelling of `symbol` in this unit.
    pub(crate) fn resolve(&self, symbol: &Symbol) -> String {
        if symbol.is_prelude() {
            return self.spell(symbol);
        }
        if symbol.is_local() || symbol.module == self.module {
            return symbol.name.clone();
        }
        if self.is_unit_path(symbol) {
            return symbol.qualified();
        }
        match parent(symbol) {
            Some(parent) => format!("{}::{}", self.resolve(&parent), symbol.name),
            None => self.spell(symbol),
        }
    }

    fn spell(&self, symbol: &Symbol) -> String {
        if self.qualified.contains(symbol) {
            symbol.qualified()
        } else {
            symbol.name.clone()
        }
    }

    /// The symbol a `use` would name for `symbol`, if any.
    fn import_target(&self, symbol: &Symbol) -> Option<Symbol> {
        if symbol.is_prelude() {
            return Some(symbol.clone());
        }
        if symbol.is_local() || symbol.module == self.module || self.is_unit_path(symbol) {
            return None;
        }
        match parent(symbol) {
            Some(parent) => self.import_target(&parent),
            None => Some(symbol.clone()),
        }
    }

    /// Paths rooted at `Self` or at a name this unit declares.
    fn is_unit_path(&self, symbol: &Symbol) -> bool {
        symbol
            .root()
            .is_some_and(|root| root == "Self" || self.declared.contains(root))
    }
}

/// The type an associated item hangs off: `Code::Unavailable` -> `Code`.
fn parent(symbol: &Symbol) -> Option<Symbol> {
    let (last, module) = symbol.module.split_last()?;
    last.starts_with(char::is_uppercase)
        .then(|| Symbol::new(module.iter().cloned(), last.clone()))
}

#[cfg(test)]
mod tests {
    use gapic_codegen::ast::{Block, Expr, Item, MethodDecl, TypeRef};

    use super::*;

    fn unit_returning(types: Vec<TypeRef>) -> CompilationUnit {
        let mut unit = CompilationUnit::new("src/echo_client.rs", ["crate", "echo_client"]);
        for (i, ty) in types.into_iter().enumerate() {
            unit = unit.item(Item::Function(
                MethodDecl::new(format!("f{i}"))
                    .returns(ty)
                    .body(Block::tail(Expr::default_value())),
            ));
        }
        unit
    }

    #[test]
    fn test_first_module_wins_a_clash() {
        let gax = TypeRef::path("gapic_gax::Result").arg(TypeRef::unit());
        let std = TypeRef::result(TypeRef::unit(), TypeRef::string());
        let table = NameTable::build(&unit_returning(vec![gax, std]));

        assert_eq!(table.resolve(&Symbol::prelude("Result")), "Result");
        assert_eq!(table.resolve(&Symbol::path("gapic_gax::Result")), "gapic_gax::Result");
        assert!(table.imports().is_empty());
    }

    #[test]
    fn test_local_declaration_forces_qualification() {
        let unit = unit_returning(vec![TypeRef::path("crate::model::f0")]);
        let table = NameTable::build(&unit);
        assert_eq!(table.resolve(&Symbol::path("crate::model::f0")), "crate::model::f0");
        assert!(table.imports().is_empty());
    }

    #[test]
    fn test_variants_import_their_enum() {
        let severity = Symbol::path("crate::model::Severity::Urgent");
        let unit = unit_returning(vec![TypeRef::named(severity.clone())]);
        let table = NameTable::build(&unit);

        assert_eq!(table.resolve(&severity), "Severity::Urgent");
        assert!(table.imports().has_symbol("crate::model", "Severity"));
    }

    #[test]
    fn test_own_module_and_self_paths_are_bare() {
        let own = Symbol::path("crate::echo_client::EchoClient");
        let variant = Symbol::local("Self").child("Shelf");
        let unit = unit_returning(vec![
            TypeRef::named(own.clone()),
            TypeRef::named(variant.clone()),
        ]);
        let table = NameTable::build(&unit);

        assert_eq!(table.resolve(&own), "EchoClient");
        assert_eq!(table.resolve(&variant), "Self::Shelf");
        assert!(table.imports().is_empty());
    }
}
