// src/lib.rs

// --- Module Declarations ---
pub mod ast;
pub mod classify;
pub mod error;
pub mod lexer;
pub mod memory;
pub mod parser;
pub mod pretty;
pub mod reduce;
pub mod subst;
pub mod visit;

// --- Public API Re-exports ---
// The core surface used by a presentation layer: parse, classify,
// reduce_at, clone (on Heap), and the visitor walk.
pub use ast::{ArithOp, BindingId, Term, TermId};
pub use classify::{classify, Redex};
pub use error::{ParseError, ReduceError};
pub use lexer::{Lexer, Token, TokenKind};
pub use memory::Heap;
pub use parser::parse;
pub use pretty::debug_tree;
pub use reduce::reduce_at;
pub use subst::{is_free, substitute};
pub use visit::{walk, TermVisitor};
