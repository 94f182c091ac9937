use std::hash::Hash;

use tracing::debug;

use crate::dsl::Expr;
use crate::error::{Error, Result};
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, Role, Variable, VariableKey, Variables};

/// Frozen variables and rules, checked against each other once.
///
/// Holds no per-evaluation state, so one `System` can be shared by reference
/// across any number of threads evaluating concurrently.
pub struct System<T> {
    pub(crate) variables: Variables<T>,
    pub(crate) rules: Rules<T>,
    /// Consequent variable and index of the concluded term, per rule
    pub(crate) conclusions: Vec<(VariableKey, usize)>,
}

impl<T: Copy + Eq + Hash> System<T> {
    pub fn new(variables: Variables<T>, rules: Rules<T>) -> Result<Self> {
        let mut conclusions = Vec::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            for (var_key, term) in rule.premise.propositions() {
                let var = lookup(&variables, i, var_key, Role::Antecedent)?;

                if var.term(term).is_none() {
                    return Err(Error::UnknownTerm {
                        rule: i,
                        variable: var.name().to_owned(),
                    });
                }
            }

            let Expr::Is(var_key, term) = &rule.consequence else {
                return Err(Error::InvalidConsequence { rule: i });
            };
            let var = lookup(&variables, i, *var_key, Role::Consequent)?;
            let Some(term_idx) = var.terms.iter().position(|t| t.term == *term) else {
                return Err(Error::UnknownTerm {
                    rule: i,
                    variable: var.name().to_owned(),
                });
            };

            conclusions.push((*var_key, term_idx));
        }

        debug!(
            variables = variables.len(),
            rules = rules.len(),
            "built fuzzy system"
        );

        Ok(Self {
            variables,
            rules,
            conclusions,
        })
    }

    pub fn variable<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.variables.get(var)
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub(crate) fn with_role(&self, role: Role) -> impl Iterator<Item = (VariableKey, &LinguisticVariable<T>)> {
        self.variables.0.iter().filter(move |(_, var)| var.role() == role)
    }
}

fn lookup<T: Copy + Eq + Hash>(
    variables: &Variables<T>,
    rule: usize,
    key: VariableKey,
    expected: Role,
) -> Result<&LinguisticVariable<T>> {
    let var = variables.0.get(key).ok_or(Error::UnknownVariable { rule })?;

    if var.role() != expected {
        return Err(Error::WrongRole {
            rule,
            variable: var.name().to_owned(),
            expected,
            found: var.role(),
        });
    }

    Ok(var)
}
