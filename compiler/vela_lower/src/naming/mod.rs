//! Names in lowered code.
//!
//! Two kinds of names come out of lowering. Declaration names address
//! classes and interfaces in the target, where member interfaces are lifted
//! to the top level and interface members live in a companion class.
//! Synthetic names (`x$3`) are fresh bindings introduced by desugaring; a
//! [`NameScope`] hands them out and maps source names onto them while a
//! narrowed binding is in scope.

use std::cell::RefCell;

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use vela_ir::Name;
use vela_types::{DeclId, Model};

use crate::abi::{COMPANION_SUFFIX, LIFTED_SEPARATOR};

bitflags! {
    /// How to spell a declaration name.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclNameFlags: u8 {
        /// Fully qualified, from the package down.
        const QUALIFIED = 1 << 0;
        /// The companion class of an interface.
        const COMPANION = 1 << 1;
    }
}

/// Declaration-name cache.
///
/// Append-only and shared by every lowering of a compilation. Rendering a
/// name walks the container chain, so each `(declaration, spelling)` pair
/// is rendered once.
#[derive(Default)]
pub struct Naming {
    cache: RefCell<FxHashMap<(DeclId, DeclNameFlags), Name>>,
}

impl Naming {
    pub fn new() -> Self {
        Self::default()
    }

    /// The target name of a class or interface.
    pub fn declaration_name(&self, model: &Model, decl: DeclId, flags: DeclNameFlags) -> Name {
        if let Some(&name) = self.cache.borrow().get(&(decl, flags)) {
            return name;
        }
        let name = model.intern(&render(model, decl, flags));
        self.cache.borrow_mut().insert((decl, flags), name);
        name
    }

    /// `pkg.Iface$impl`
    pub fn companion_name(&self, model: &Model, decl: DeclId) -> Name {
        self.declaration_name(
            model,
            decl,
            DeclNameFlags::QUALIFIED | DeclNameFlags::COMPANION,
        )
    }

    /// Number of cached names.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

fn render(model: &Model, decl: DeclId, flags: DeclNameFlags) -> String {
    let data = model.decl(decl);
    let simple = model.str(data.name);
    let mut text = if flags.contains(DeclNameFlags::QUALIFIED) {
        let container = data
            .container
            .filter(|&c| model.decl(c).is_class_or_interface());
        match container {
            // Member interfaces are lifted to the top level.
            Some(outer) if data.is_interface() => format!(
                "{}{LIFTED_SEPARATOR}{simple}",
                render(model, outer, DeclNameFlags::QUALIFIED)
            ),
            Some(outer) => {
                let mut outer_flags = DeclNameFlags::QUALIFIED;
                if model.decl(outer).is_interface() {
                    outer_flags |= DeclNameFlags::COMPANION;
                }
                format!("{}.{simple}", render(model, outer, outer_flags))
            }
            None => {
                let package = model.str(data.package);
                if package.is_empty() {
                    simple.to_string()
                } else {
                    format!("{package}.{simple}")
                }
            }
        }
    } else {
        simple.to_string()
    };
    if flags.contains(DeclNameFlags::COMPANION) {
        text.push_str(COMPANION_SUFFIX);
    }
    text
}

/// Getter of an attribute: `size` -> `getSize`.
pub fn getter_name(model: &Model, attribute: Name) -> Name {
    let text = model.str(attribute);
    let mut chars = text.chars();
    let getter = match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    };
    model.intern(&getter)
}

/// Synthetic bindings and source-name substitutions of one lowering.
#[derive(Clone, Debug, Default)]
pub struct NameScope {
    substitutions: FxHashMap<Name, Name>,
    next_synthetic: u32,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh name `base$N`, unique within this scope.
    pub fn fresh(&mut self, model: &Model, base: &str) -> Name {
        let n = self.next_synthetic;
        self.next_synthetic += 1;
        model.intern(&format!("{base}${n}"))
    }

    /// The name a source identifier currently refers to.
    pub fn resolve(&self, name: Name) -> Name {
        self.substitutions.get(&name).copied().unwrap_or(name)
    }

    /// Make `name` refer to `replacement`, returning the substitution it
    /// replaces. Hand the result back to [`restore`](Self::restore).
    pub fn substitute(&mut self, name: Name, replacement: Name) -> Option<Name> {
        self.substitutions.insert(name, replacement)
    }

    /// Undo a [`substitute`](Self::substitute).
    pub fn restore(&mut self, name: Name, previous: Option<Name>) {
        match previous {
            Some(prev) => {
                self.substitutions.insert(name, prev);
            }
            None => {
                self.substitutions.remove(&name);
            }
        }
    }

    pub fn is_substituted(&self, name: Name) -> bool {
        self.substitutions.contains_key(&name)
    }
}
