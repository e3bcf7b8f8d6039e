// Copyright (c) ZeroC, Inc.

//! The inheritance registry: the program-wide record of which class extends which and which
//! interfaces each class declares. It is populated once per class during P3 and read-only
//! afterwards, answering the subtype queries behind named-type convertibility.
//!
//! P3 never records a superclass link that would close a cycle, so the chains walked here are
//! always finite.

use std::collections::HashMap;

#[derive(Debug)]
struct ClassRecord {
    superclass: Option<String>,
    interfaces: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InheritanceRegistry {
    records: HashMap<String, ClassRecord>,
}

impl InheritanceRegistry {
    pub fn new() -> Self {
        InheritanceRegistry::default()
    }

    /// Records a class, its optional superclass, and the interfaces it declares.
    /// Called exactly once per class during P3.
    pub fn add(&mut self, class: impl Into<String>, superclass: Option<String>, interfaces: Vec<String>) {
        self.records.insert(class.into(), ClassRecord { superclass, interfaces });
    }

    /// Returns true if `ancestor` appears on `descendant`'s chain of superclasses.
    /// A registered class is considered a subclass of itself.
    pub fn is_subclass_of(&self, ancestor: &str, descendant: &str) -> bool {
        let mut current = self.records.get(descendant).map(|_| descendant);
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            current = self.records.get(name).and_then(|record| record.superclass.as_deref());
        }
        false
    }

    /// Returns true if `descendant` (or any class on its superclass chain) declares `interface`.
    pub fn is_interface_of(&self, interface: &str, descendant: &str) -> bool {
        let Some(record) = self.records.get(descendant) else {
            return false;
        };
        if record.interfaces.iter().any(|declared| declared == interface) {
            return true;
        }
        match &record.superclass {
            Some(superclass) => self.is_interface_of(interface, superclass),
            None => false,
        }
    }
}
