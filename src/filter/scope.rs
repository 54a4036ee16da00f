//! Per-class state shared by the interceptors during one visit.

use std::collections::HashMap;

use crate::bytecode::{ClassTree, Location, MethodTree};
use crate::core::{Error, Result};

/// The class currently being filtered, with its methods indexed by location.
///
/// Created by [`MutationInterceptor::begin`](super::MutationInterceptor::begin)
/// and passed to every `intercept` call for that class. Holding the class
/// here instead of inside the interceptor keeps interceptors immutable and
/// shareable across threads.
#[derive(Debug)]
pub struct UnitScope<'a> {
    unit: &'a ClassTree,
    methods: HashMap<&'a Location, &'a MethodTree>,
}

impl<'a> UnitScope<'a> {
    pub fn new(unit: &'a ClassTree) -> Self {
        let mut methods = HashMap::with_capacity(unit.methods.len());
        for method in &unit.methods {
            // First declaration wins, matching a linear scan.
            methods.entry(&method.location).or_insert(method);
        }
        Self { unit, methods }
    }

    pub fn unit(&self) -> &'a ClassTree {
        self.unit
    }

    /// The method at `location`.
    pub fn method(&self, location: &Location) -> Result<&'a MethodTree> {
        self.methods
            .get(location)
            .copied()
            .ok_or_else(|| Error::UnresolvedLocation {
                location: location.clone(),
            })
    }
}
