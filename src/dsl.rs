use std::collections::HashMap;
use std::hash::Hash;

use slotmap::SecondaryMap;

use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey};

/// Fuzzy proposition built from `variable.is(label)` clauses.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    /// Every `variable is term` clause, left to right.
    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        let mut props = Vec::new();

        parse(self, &mut props);

        props
    }
}

impl<T: Eq + Hash> Expr<T> {
    /// Truth degree of the expression given fuzzified antecedents. A clause
    /// whose label was not fuzzified counts as zero.
    pub(crate) fn degree(
        &self,
        degrees: &SecondaryMap<VariableKey, HashMap<T, f64>>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> f64 {
        match self {
            Expr::Is(var_key, term) => degrees
                .get(*var_key)
                .and_then(|terms| terms.get(term))
                .copied()
                .unwrap_or(0.),
            Expr::And(exprs) => exprs
                .iter()
                .map(|expr| expr.degree(degrees, and_op, or_op))
                .reduce(|u, v| and_op.apply(u, v))
                .unwrap_or(0.),
            Expr::Or(exprs) => exprs
                .iter()
                .map(|expr| expr.degree(degrees, and_op, or_op))
                .reduce(|u, v| or_op.apply(u, v))
                .unwrap_or(0.),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}
