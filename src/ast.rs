// src/ast.rs

use std::fmt;

/// Stable handle to a term node slot in the [`Heap`](crate::memory::Heap).
///
/// Rewriting a node "in place" means overwriting the `Term` stored at this
/// handle; ancestors holding the id see the new contents without updating
/// their own child fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub u32);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one binder occurrence (`let` or lambda), unique per parse.
/// Variables carry it as a non-owning back-reference to their binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
            ArithOp::Mul => '*',
            ArithOp::Div => '/',
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// AST Definition. Children are heap ids, so the ownership graph stays a
// strict tree even though variables point back at their binders.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Reference to a bound variable. `bound_by` is the nearest enclosing
    /// binder for this name, resolved at parse time.
    Var { name: String, bound_by: BindingId },
    /// Opaque symbolic constant (capitalized identifier). Never reduced.
    Constr { name: String },
    /// Integer constant. Parsing only produces values >= 0; reduction may
    /// produce negative ones.
    Literal { value: i64 },
    Lambda {
        param: String,
        binding: BindingId,
        body: TermId,
    },
    Let {
        name: String,
        binding: BindingId,
        value: TermId,
        body: TermId,
    },
    App {
        func: TermId,
        arg: TermId,
    },
    Arith {
        op: ArithOp,
        left: TermId,
        right: TermId,
    },
    Neg {
        operand: TermId,
    },
}

impl Term {
    /// The binder identity introduced by this node, if it is a binder.
    pub fn binding(&self) -> Option<BindingId> {
        match self {
            Term::Lambda { binding, .. } | Term::Let { binding, .. } => Some(*binding),
            _ => None,
        }
    }
}
