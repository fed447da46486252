//! Kind inheritance as an explicit, index-based graph.
//!
//! Kinds reference their parents by name. The graph resolves those names to
//! indices once per template; traversals then work on indices only, which
//! keeps ownership flat (everything borrows the [`Template`]).

use std::collections::HashMap;

use crate::domain::{
    entities::catalog::{Kind, Template},
    error::DomainError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Ancestor orderings produced by one depth-first walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry<'a> {
    /// Parents after their own ancestors: least specific first.
    /// This is the overlay order for template fragments.
    pub overlay: Vec<&'a Kind>,
    /// Parents before their own ancestors, following `inherits` order.
    /// This is the lookup order for features.
    pub lookup: Vec<&'a Kind>,
}

/// Inheritance graph over the kinds of one template.
#[derive(Debug, Clone)]
pub struct KindGraph<'a> {
    template: &'a Template,
    index: HashMap<&'a str, usize>,
    /// `parents[node][i]` is the index of `inherits[i]`, `None` if undefined.
    parents: Vec<Vec<Option<usize>>>,
}

impl<'a> KindGraph<'a> {
    pub fn new(template: &'a Template) -> Self {
        let index: HashMap<&str, usize> = template
            .kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (k.name.as_str(), i))
            .collect();

        let parents = template
            .kinds
            .iter()
            .map(|kind| {
                kind.parents()
                    .iter()
                    .map(|name| index.get(name.as_str()).copied())
                    .collect()
            })
            .collect();

        Self {
            template,
            index,
            parents,
        }
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    pub fn kind(&self, name: &str) -> Option<&'a Kind> {
        self.index.get(name).map(|&i| &self.template.kinds[i])
    }

    /// Every kind reachable through `inherits`, each listed once.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UnknownKind`] if `name` is not a kind of the template.
    /// - [`DomainError::UnknownParentKind`] if a reachable `inherits` entry
    ///   names a kind the template does not define.
    /// - [`DomainError::InheritanceCycle`] if a reachable kind inherits itself,
    ///   directly or transitively.
    pub fn ancestry(&self, name: &str) -> Result<Ancestry<'a>, DomainError> {
        let root = *self
            .index
            .get(name)
            .ok_or_else(|| DomainError::UnknownKind {
                template: self.template.name.clone(),
                kind: name.to_owned(),
            })?;

        let mut marks = vec![Mark::Unvisited; self.template.kinds.len()];
        let mut path = Vec::new();
        let mut walk = Walk::default();
        self.visit(root, &mut marks, &mut path, &mut walk)?;

        Ok(Ancestry {
            overlay: walk.post.into_iter().map(|i| &self.template.kinds[i]).collect(),
            lookup: walk.pre.into_iter().map(|i| &self.template.kinds[i]).collect(),
        })
    }

    fn visit(
        &self,
        node: usize,
        marks: &mut [Mark],
        path: &mut Vec<usize>,
        walk: &mut Walk,
    ) -> Result<(), DomainError> {
        marks[node] = Mark::InProgress;
        path.push(node);

        let kind = &self.template.kinds[node];
        for (slot, parent) in self.parents[node].iter().enumerate() {
            let parent = parent.ok_or_else(|| DomainError::UnknownParentKind {
                template: self.template.name.clone(),
                kind: kind.name.clone(),
                parent: kind.parents()[slot].clone(),
            })?;

            match marks[parent] {
                Mark::Done => {}
                Mark::InProgress => return Err(self.cycle(path, parent)),
                Mark::Unvisited => {
                    walk.pre.push(parent);
                    self.visit(parent, marks, path, walk)?;
                    walk.post.push(parent);
                }
            }
        }

        path.pop();
        marks[node] = Mark::Done;
        Ok(())
    }

    fn cycle(&self, path: &[usize], back_to: usize) -> DomainError {
        let start = path.iter().position(|&i| i == back_to).unwrap_or(0);
        let names = path[start..]
            .iter()
            .chain(std::iter::once(&back_to))
            .map(|&i| self.template.kinds[i].name.clone())
            .collect();

        DomainError::InheritanceCycle {
            kind: self.template.kinds[back_to].name.clone(),
            path: names,
        }
    }
}

#[derive(Debug, Default)]
struct Walk {
    pre: Vec<usize>,
    post: Vec<usize>,
}
