//! The module registry shared by every generator in a run.
//!
//! The [`ModuleRegistry`] owns one record per module name: its ports and the
//! child modules it instantiates. Generators look up primitives here before
//! instantiating them, and the Verilog writer records every instance it
//! prints, so after a run the registry describes the complete hierarchy.

use crate::ids::ModuleId;
use crate::module::{ChildRef, Module, ModulePort, Port, PortRole};
use std::collections::HashMap;
use weft_common::{Arena, Ident, Interner};

/// Registry of all modules of a fabric, keyed by interned name.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    interner: Interner,
    modules: Arena<ModuleId, Module>,
    by_name: HashMap<Ident, ModuleId>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the module named `name`, creating an empty one if needed.
    pub fn add_module(&mut self, name: &str) -> ModuleId {
        self.get_or_add_module(name).0
    }

    /// Like [`add_module`](Self::add_module), also reporting whether a new
    /// record was created.
    pub fn get_or_add_module(&mut self, name: &str) -> (ModuleId, bool) {
        let ident = self.interner.get_or_intern(name);
        if let Some(&id) = self.by_name.get(&ident) {
            return (id, false);
        }
        let id = self.modules.alloc(Module {
            name: ident,
            ports: Vec::new(),
            children: Vec::new(),
        });
        self.by_name.insert(ident, id);
        (id, true)
    }

    /// Appends a port to a module.
    pub fn add_port(&mut self, module: ModuleId, port: Port, role: PortRole) {
        self.modules[module].ports.push(ModulePort { port, role });
    }

    /// Records one instance of `child` inside `parent`.
    pub fn add_child_module(&mut self, parent: ModuleId, child: ModuleId) {
        let children = &mut self.modules[parent].children;
        match children.iter_mut().find(|c| c.module == child) {
            Some(entry) => entry.instances += 1,
            None => children.push(ChildRef {
                module: child,
                instances: 1,
            }),
        }
    }

    /// Looks up a module by name.
    pub fn find_module(&self, name: &str) -> Option<ModuleId> {
        let ident = self.interner.get(name)?;
        self.by_name.get(&ident).copied()
    }

    /// Returns a module record.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id]
    }

    /// Returns a module's name.
    pub fn module_name(&self, id: ModuleId) -> &str {
        self.interner.resolve(self.modules[id].name)
    }

    /// Returns a module's ports in declaration order.
    pub fn ports(&self, id: ModuleId) -> &[ModulePort] {
        &self.modules[id].ports
    }

    /// Returns a module's children in order of first instantiation.
    pub fn children(&self, id: ModuleId) -> &[ChildRef] {
        &self.modules[id].children
    }

    /// Returns how many instances of `child` `parent` holds.
    pub fn num_instances(&self, parent: ModuleId, child: ModuleId) -> usize {
        self.modules[parent]
            .children
            .iter()
            .find(|c| c.module == child)
            .map_or(0, |c| c.instances)
    }

    /// Returns the number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterates over modules in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules.iter()
    }
}
