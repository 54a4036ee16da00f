//! Sequential composition of interceptors.

use super::{MutationInterceptor, UnitScope};
use crate::core::Result;
use crate::mutation::{Mutater, MutationDetails};

/// Runs its children in order, each seeing what the previous one kept.
#[derive(Default)]
pub struct CompoundInterceptor {
    children: Vec<Box<dyn MutationInterceptor>>,
}

impl CompoundInterceptor {
    pub fn new(children: Vec<Box<dyn MutationInterceptor>>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: Box<dyn MutationInterceptor>) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Box<dyn MutationInterceptor>] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl std::fmt::Debug for CompoundInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundInterceptor")
            .field(
                "children",
                &self.children.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl MutationInterceptor for CompoundInterceptor {
    fn name(&self) -> &'static str {
        "compound"
    }

    fn intercept(
        &self,
        scope: &UnitScope<'_>,
        mutations: Vec<MutationDetails>,
        mutater: &dyn Mutater,
    ) -> Result<Vec<MutationDetails>> {
        self.children.iter().try_fold(mutations, |remaining, child| {
            child.intercept(scope, remaining, mutater)
        })
    }
}
