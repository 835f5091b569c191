// src/parser.rs

use std::collections::HashMap;

use crate::ast::{ArithOp, BindingId, Term, TermId};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::memory::Heap;

/* Grammar, loosest to tightest:

   term   -> "let" VAR "=" term "in" term
           | "\" VAR "->" term
           | additive                       (binder bodies extend right)
   additive       -> multiplicative (("+" | "-") multiplicative)*
   multiplicative -> unary (("*" | "/") unary)*
   unary          -> "-" unary | application
   application    -> atom atom*             (left-associative)
   atom           -> VAR | CONSTR | LITERAL | "(" term ")"

   Scope resolution is interleaved: a name-to-binder map is threaded
   through the recursion with save/restore around each binder. A VAR
   with no active binder is a hard error.
*/

/// Parses `input` into a term tree allocated on `heap`, returning the
/// root id. No partial tree is handed to the caller on failure.
pub fn parse(input: &str, heap: &mut Heap) -> Result<TermId, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(input),
        heap,
        scopes: HashMap::new(),
    };
    let root = parser.parse_term()?;
    parser.lexer.expect(TokenKind::End)?;
    Ok(root)
}

// --- The Parser ---
struct Parser<'a> {
    lexer: Lexer,
    heap: &'a mut Heap,
    // Name to innermost live binder. Shadowing is handled by saving the
    // displaced entry on entry to a binder and restoring it on exit.
    scopes: HashMap<String, BindingId>,
}

impl Parser<'_> {
    fn parse_term(&mut self) -> Result<TermId, ParseError> {
        match self.lexer.peek().kind() {
            TokenKind::Let => {
                self.lexer.next();
                let name = self.expect_var()?;
                self.lexer.expect(TokenKind::Equals)?;
                // The bound name is not in scope for its own definition.
                let value = self.parse_term()?;
                self.lexer.expect(TokenKind::In)?;
                let binding = self.heap.fresh_binding();
                let saved = self.scopes.insert(name.clone(), binding);
                let body = self.parse_term()?;
                self.restore(&name, saved);
                Ok(self.heap.alloc(Term::Let {
                    name,
                    binding,
                    value,
                    body,
                }))
            }
            TokenKind::Backslash => {
                self.lexer.next();
                let param = self.expect_var()?;
                self.lexer.expect(TokenKind::Arrow)?;
                let binding = self.heap.fresh_binding();
                let saved = self.scopes.insert(param.clone(), binding);
                let body = self.parse_term()?;
                self.restore(&param, saved);
                Ok(self.heap.alloc(Term::Lambda {
                    param,
                    binding,
                    body,
                }))
            }
            TokenKind::Var
            | TokenKind::Constr
            | TokenKind::Literal
            | TokenKind::LParen
            | TokenKind::Minus => self.parse_additive(),
            got => Err(ParseError::UnexpectedToken {
                expected: "'let', '\\', a variable, a constructor, a literal, '(', or '-'",
                got,
            }),
        }
    }

    fn parse_additive(&mut self) -> Result<TermId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.lexer.peek().kind() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                TokenKind::End | TokenKind::In | TokenKind::RParen => return Ok(left),
                got => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "the end of input, 'in', ')', '+', or '-'",
                        got,
                    })
                }
            };
            self.lexer.next();
            let right = self.parse_multiplicative()?;
            left = self.heap.alloc(Term::Arith { op, left, right });
        }
    }

    fn parse_multiplicative(&mut self) -> Result<TermId, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.lexer.peek().kind() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                TokenKind::End
                | TokenKind::In
                | TokenKind::RParen
                | TokenKind::Plus
                | TokenKind::Minus => return Ok(left),
                got => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "the end of input, 'in', ')', '+', '-', '*', or '/'",
                        got,
                    })
                }
            };
            self.lexer.next();
            let right = self.parse_unary()?;
            left = self.heap.alloc(Term::Arith { op, left, right });
        }
    }

    fn parse_unary(&mut self) -> Result<TermId, ParseError> {
        if self.lexer.peek().kind() == TokenKind::Minus {
            self.lexer.next();
            // Recurse at this tier: "- - x" is double negation.
            let operand = self.parse_unary()?;
            Ok(self.heap.alloc(Term::Neg { operand }))
        } else {
            self.parse_application()
        }
    }

    fn parse_application(&mut self) -> Result<TermId, ParseError> {
        let mut func = self.parse_atom()?;
        loop {
            match self.lexer.peek().kind() {
                TokenKind::Var | TokenKind::Constr | TokenKind::Literal | TokenKind::LParen => {
                    let arg = self.parse_atom()?;
                    func = self.heap.alloc(Term::App { func, arg });
                }
                TokenKind::End
                | TokenKind::In
                | TokenKind::RParen
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash => return Ok(func),
                got => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "a variable, a constructor, a literal, '(', ')', 'in', \
                                   an arithmetic operator, or the end of input",
                        got,
                    })
                }
            }
        }
    }

    fn parse_atom(&mut self) -> Result<TermId, ParseError> {
        match self.lexer.next() {
            Token::Var(name) => match self.scopes.get(&name) {
                Some(&bound_by) => Ok(self.heap.alloc(Term::Var { name, bound_by })),
                None => Err(ParseError::FreeVariable { name }),
            },
            Token::Constr(name) => Ok(self.heap.alloc(Term::Constr { name })),
            Token::Literal(value) => Ok(self.heap.alloc(Term::Literal { value })),
            Token::LParen => {
                let inner = self.parse_term()?;
                self.lexer.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "a variable, a constructor, a literal, or '('",
                got: other.kind(),
            }),
        }
    }

    fn expect_var(&mut self) -> Result<String, ParseError> {
        match self.lexer.next() {
            Token::Var(name) => Ok(name),
            other => Err(ParseError::UnexpectedToken {
                expected: TokenKind::Var.describe(),
                got: other.kind(),
            }),
        }
    }

    fn restore(&mut self, name: &str, saved: Option<BindingId>) {
        match saved {
            Some(binding) => {
                self.scopes.insert(name.to_string(), binding);
            }
            None => {
                self.scopes.remove(name);
            }
        }
    }
}
