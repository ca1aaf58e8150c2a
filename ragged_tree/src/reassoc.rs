// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reassociation: flattening a [`MeasuredNode`] tree (with explicit
//! [`MeasuredNode::Newline`] separators) into a binary expression tree over
//! horizontal-join, vertical-join, and wrap operators.
//!
//! Newlines are a left-associative infix operator of precedence 1; adjacent
//! siblings are joined by an implicit operator of precedence 2. The token
//! stream is built by a single left-to-right pass over a node's children,
//! then parsed by a small precedence climber. Endpoints conceptually use a
//! sentinel operator of precedence 0; we never materialize it since the
//! token-stream builder already guarantees a well-formed
//! `expr (op expr)*` sequence.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::types::{MeasuredAtom, MeasuredNode, Style};

/// A node of the reassociated, binary expression tree. No [`MeasuredNode::Newline`]s
/// remain: every line break has become an explicit [`ReassocNode::JoinV`].
#[derive(Clone, Debug, PartialEq)]
pub enum ReassocNode {
    /// A measured text fragment.
    Atom(MeasuredAtom),
    /// A measured spacer.
    Spacer(f64),
    /// Horizontal join: `rhs` continues on the same line as `lhs`.
    JoinH(Box<ReassocNode>, Box<ReassocNode>),
    /// Vertical join: `rhs` begins a new line below `lhs`.
    JoinV(Box<ReassocNode>, Box<ReassocNode>),
    /// A wrap: `child` enclosed in a styled, padded region. Exactly one per
    /// original [`MeasuredNode::Node`].
    Wrap(Box<ReassocNode>, f64, Option<Style>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Op {
    /// Implicit adjacency; precedence 2.
    Join,
    /// Explicit `Newline`; precedence 1.
    Newline,
}

impl Op {
    const fn precedence(self) -> u8 {
        match self {
            Self::Join => 2,
            Self::Newline => 1,
        }
    }
}

/// Reassociate a single [`MeasuredNode`] into a [`ReassocNode`].
///
/// `empty` is the sentinel rectangle substituted wherever the token stream
/// would otherwise contain two adjacent operators (leading/trailing
/// operators, or runs of consecutive newlines).
#[must_use]
pub fn reassociate(node: &MeasuredNode, empty: Rect) -> ReassocNode {
    match node {
        MeasuredNode::Atom(a) => ReassocNode::Atom(a.clone()),
        MeasuredNode::Spacer(w) => ReassocNode::Spacer(*w),
        // A bare Newline at the root has no siblings to separate; treat it
        // as the sentinel it would force at either end.
        MeasuredNode::Newline => ReassocNode::Atom(empty_atom(empty)),
        MeasuredNode::Node {
            children,
            padding,
            style,
        } => {
            let inner = reassociate_children(children, empty);
            ReassocNode::Wrap(Box::new(inner), *padding, style.clone())
        }
    }
}

/// Reassociate the children of a single [`MeasuredNode::Node`] into one
/// expression (without the enclosing `Wrap`).
fn reassociate_children(children: &[MeasuredNode], empty: Rect) -> ReassocNode {
    let (exprs, ops) = build_tokens(children, empty);
    parse(exprs, &ops)
}

/// Build the alternating `expr (op expr)*` token stream described in
/// module docs, inserting empty-atom sentinels at the edge cases: empty
/// children, a trailing operator, and runs of consecutive newlines.
fn build_tokens(children: &[MeasuredNode], empty: Rect) -> (Vec<ReassocNode>, Vec<Op>) {
    let mut exprs = Vec::new();
    let mut ops = Vec::new();
    // Whether the next token produced must be an expression: true at the
    // very start, and immediately after any operator is pushed.
    let mut need_expr = true;

    for child in children {
        if matches!(child, MeasuredNode::Newline) {
            if need_expr {
                // Leading newline, or a newline immediately following
                // another operator: insert an empty atom between them.
                exprs.push(ReassocNode::Atom(empty_atom(empty)));
            }
            ops.push(Op::Newline);
            need_expr = true;
        } else {
            let expr = match child {
                MeasuredNode::Atom(a) => ReassocNode::Atom(a.clone()),
                MeasuredNode::Spacer(w) => ReassocNode::Spacer(*w),
                MeasuredNode::Node {
                    children,
                    padding,
                    style,
                } => ReassocNode::Wrap(
                    Box::new(reassociate_children(children, empty)),
                    *padding,
                    style.clone(),
                ),
                MeasuredNode::Newline => unreachable!("handled above"),
            };
            if !need_expr {
                ops.push(Op::Join);
            }
            exprs.push(expr);
            need_expr = false;
        }
    }
    if need_expr {
        // Either no children at all, or a trailing operator: either way the
        // stream needs one more expression.
        exprs.push(ReassocNode::Atom(empty_atom(empty)));
    }
    (exprs, ops)
}

fn empty_atom(empty: Rect) -> MeasuredAtom {
    MeasuredAtom {
        text: String::new(),
        rect: empty,
    }
}

/// Classic precedence climbing over the flat token stream. With only two
/// operator levels this always groups maximal `Join` runs first (same
/// line) and then chains the resulting lines with left-associative
/// `Newline`s (successive lines), matching "a pair `(op1, op2)` with
/// `prec(op1) >= prec(op2)` ends the left operand".
fn parse(exprs: Vec<ReassocNode>, ops: &[Op]) -> ReassocNode {
    debug_assert_eq!(ops.len() + 1, exprs.len(), "malformed reassociation token stream");
    let mut exprs: Vec<Option<ReassocNode>> = exprs.into_iter().map(Some).collect();
    let mut pos = 0usize;
    climb(&mut exprs, ops, &mut pos, 0)
}

fn climb(exprs: &mut [Option<ReassocNode>], ops: &[Op], pos: &mut usize, min_prec: u8) -> ReassocNode {
    let mut lhs = exprs[*pos].take().expect("each expr slot consumed once");
    *pos += 1;
    while *pos - 1 < ops.len() {
        let op = ops[*pos - 1];
        if op.precedence() < min_prec {
            break;
        }
        let rhs = climb(exprs, ops, pos, op.precedence() + 1);
        lhs = combine(op, lhs, rhs);
    }
    lhs
}

fn combine(op: Op, lhs: ReassocNode, rhs: ReassocNode) -> ReassocNode {
    match op {
        Op::Join => ReassocNode::JoinH(Box::new(lhs), Box::new(rhs)),
        Op::Newline => ReassocNode::JoinV(Box::new(lhs), Box::new(rhs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn atom(w: f64) -> MeasuredNode {
        MeasuredNode::Atom(MeasuredAtom {
            text: String::new(),
            rect: Rect::new(0.0, 0.0, w, 10.0),
        })
    }

    #[test]
    fn empty_children_yield_empty_atom() {
        let n = MeasuredNode::Node {
            children: Vec::new(),
            padding: 0.0,
            style: None,
        };
        let r = reassociate(&n, Rect::ZERO);
        match r {
            ReassocNode::Wrap(inner, _, _) => assert!(matches!(*inner, ReassocNode::Atom(_))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn two_atoms_join_horizontally() {
        let n = MeasuredNode::Node {
            children: vec![atom(10.0), atom(5.0)],
            padding: 0.0,
            style: None,
        };
        let r = reassociate(&n, Rect::ZERO);
        match r {
            ReassocNode::Wrap(inner, _, _) => assert!(matches!(*inner, ReassocNode::JoinH(_, _))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn newline_splits_into_vertical_join() {
        let n = MeasuredNode::Node {
            children: vec![atom(10.0), MeasuredNode::Newline, atom(5.0)],
            padding: 0.0,
            style: None,
        };
        let r = reassociate(&n, Rect::ZERO);
        match r {
            ReassocNode::Wrap(inner, _, _) => assert!(matches!(*inner, ReassocNode::JoinV(_, _))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn consecutive_newlines_insert_blank_atom() {
        let n = MeasuredNode::Node {
            children: vec![
                atom(10.0),
                MeasuredNode::Newline,
                MeasuredNode::Newline,
                atom(5.0),
            ],
            padding: 0.0,
            style: None,
        };
        let r = reassociate(&n, Rect::ZERO);
        // a JoinV(JoinV(a, empty), b) shape: three lines total.
        match r {
            ReassocNode::Wrap(inner, _, _) => match *inner {
                ReassocNode::JoinV(lhs, rhs) => {
                    assert!(matches!(*rhs, ReassocNode::Atom(_)));
                    assert!(matches!(*lhs, ReassocNode::JoinV(_, _)));
                }
                _ => unreachable!(),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn mixed_join_binds_tighter_than_newline() {
        // a b \n c   =>  JoinV(JoinH(a,b), c)
        let n = MeasuredNode::Node {
            children: vec![atom(1.0), atom(1.0), MeasuredNode::Newline, atom(1.0)],
            padding: 0.0,
            style: None,
        };
        let r = reassociate(&n, Rect::ZERO);
        match r {
            ReassocNode::Wrap(inner, _, _) => match *inner {
                ReassocNode::JoinV(lhs, rhs) => {
                    assert!(matches!(*lhs, ReassocNode::JoinH(_, _)));
                    assert!(matches!(*rhs, ReassocNode::Atom(_)));
                }
                _ => unreachable!(),
            },
            _ => unreachable!(),
        }
    }
}
