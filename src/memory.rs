// src/memory.rs

use std::collections::HashMap;

use crate::ast::{BindingId, Term, TermId};

// --- The Term Heap ---
//
// Every AST node lives in an id-addressed slot. Parents store child ids,
// so overwriting a slot rewrites the node for every holder of its id.
// Reduction strands the slots of eliminated subterms; `collect` reclaims
// them given the session's roots.
pub struct Heap {
    slots: Vec<Option<Term>>,
    free_list: Vec<u32>,
    next_binding: u32,
}

impl Heap {
    pub fn new() -> Self {
        Heap {
            slots: Vec::new(),
            free_list: Vec::new(),
            next_binding: 0,
        }
    }

    pub fn alloc(&mut self, term: Term) -> TermId {
        if let Some(index) = self.free_list.pop() {
            self.slots[index as usize] = Some(term);
            TermId(index)
        } else {
            self.slots.push(Some(term));
            TermId((self.slots.len() - 1) as u32)
        }
    }

    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.slots.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: TermId) -> Option<&mut Term> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(|slot| slot.as_mut())
    }

    /// Removes a node and returns it by value, freeing its slot. The
    /// children it references stay allocated.
    pub fn take(&mut self, id: TermId) -> Option<Term> {
        let term = self.slots.get_mut(id.0 as usize).and_then(|slot| slot.take());
        if term.is_some() {
            self.free_list.push(id.0);
        }
        term
    }

    /// Binder identities are monotonic and never reused, so they stay
    /// unique across every tree the heap has ever held.
    pub fn fresh_binding(&mut self) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;
        id
    }

    /// Deep copy of the tree rooted at `root`. The copy gets fresh slot
    /// ids throughout and fresh binder ids remapped consistently, so its
    /// binder-to-variable structure matches the original while sharing
    /// nothing with it. Returns `None` if any slot is dangling.
    pub fn clone_term(&mut self, root: TermId) -> Option<TermId> {
        let mut binder_map = HashMap::new();
        self.clone_rec(root, &mut binder_map)
    }

    /// Like [`clone_term`](Heap::clone_term) but hands back the copied
    /// root node by value, for callers that overwrite an existing slot
    /// rather than allocating a new root.
    pub fn clone_contents(&mut self, root: TermId) -> Option<Term> {
        let copy = self.clone_term(root)?;
        self.take(copy)
    }

    fn clone_rec(
        &mut self,
        id: TermId,
        binder_map: &mut HashMap<BindingId, BindingId>,
    ) -> Option<TermId> {
        let node = self.get(id)?.clone();
        let copy = match node {
            Term::Var { name, bound_by } => Term::Var {
                name,
                // A variable bound outside the cloned subtree keeps its
                // original binder.
                bound_by: binder_map.get(&bound_by).copied().unwrap_or(bound_by),
            },
            Term::Constr { name } => Term::Constr { name },
            Term::Literal { value } => Term::Literal { value },
            Term::Lambda {
                param,
                binding,
                body,
            } => {
                let fresh = self.fresh_binding();
                binder_map.insert(binding, fresh);
                let body = self.clone_rec(body, binder_map)?;
                Term::Lambda {
                    param,
                    binding: fresh,
                    body,
                }
            }
            Term::Let {
                name,
                binding,
                value,
                body,
            } => {
                let fresh = self.fresh_binding();
                binder_map.insert(binding, fresh);
                let value = self.clone_rec(value, binder_map)?;
                let body = self.clone_rec(body, binder_map)?;
                Term::Let {
                    name,
                    binding: fresh,
                    value,
                    body,
                }
            }
            Term::App { func, arg } => {
                let func = self.clone_rec(func, binder_map)?;
                let arg = self.clone_rec(arg, binder_map)?;
                Term::App { func, arg }
            }
            Term::Arith { op, left, right } => {
                let left = self.clone_rec(left, binder_map)?;
                let right = self.clone_rec(right, binder_map)?;
                Term::Arith { op, left, right }
            }
            Term::Neg { operand } => {
                let operand = self.clone_rec(operand, binder_map)?;
                Term::Neg { operand }
            }
        };
        Some(self.alloc(copy))
    }

    /// Mark-and-sweep from the given roots. Only ownership edges (child
    /// ids) are traced; `bound_by` back-references are observation-only.
    pub fn collect(&mut self, roots: &[TermId]) {
        let mut marked = vec![false; self.slots.len()];
        let mut worklist: Vec<TermId> = roots.to_vec();

        while let Some(id) = worklist.pop() {
            let index = id.0 as usize;
            if index >= marked.len() || marked[index] {
                continue;
            }
            let node = match self.get(id) {
                Some(node) => node,
                None => continue,
            };
            marked[index] = true;
            push_children(node, &mut worklist);
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_some() && !marked[index] {
                *slot = None;
                self.free_list.push(index as u32);
            }
        }
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Heap::new()
    }
}

fn push_children(node: &Term, worklist: &mut Vec<TermId>) {
    match node {
        Term::Var { .. } | Term::Constr { .. } | Term::Literal { .. } => {}
        Term::Lambda { body, .. } => worklist.push(*body),
        Term::Let { value, body, .. } => {
            worklist.push(*value);
            worklist.push(*body);
        }
        Term::App { func, arg } => {
            worklist.push(*func);
            worklist.push(*arg);
        }
        Term::Arith { left, right, .. } => {
            worklist.push(*left);
            worklist.push(*right);
        }
        Term::Neg { operand } => worklist.push(*operand),
    }
}
