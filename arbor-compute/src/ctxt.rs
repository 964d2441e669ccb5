use levenshtein::levenshtein;
use std::collections::HashMap;
use crate::{consts, funcs, value::Value};

/// A context to use when building and evaluating an expression tree, containing the variables and
/// named constants that can be referenced within the expression.
///
/// The context is always passed explicitly; there is no global name table.
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, Value>,

    /// The named constants in the context. Constants take priority over variables during name
    /// resolution and cannot be reassigned through [`Ctxt::add_var`].
    consts: HashMap<String, Value>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: HashMap::new(),
            consts: consts::ALL
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }
}

impl Ctxt {
    /// Creates a new empty context, without even the default constants.
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            consts: HashMap::new(),
        }
    }

    /// Add a variable to the context. Constants shadow variables, so adding a variable with a
    /// constant's name has no visible effect.
    pub fn add_var(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    /// Get the value of a named constant in the context.
    pub fn get_const(&self, name: &str) -> Option<Value> {
        self.consts.get(name).cloned()
    }

    /// Returns true if the given name is a named constant.
    pub fn is_const(&self, name: &str) -> bool {
        self.consts.contains_key(name)
    }

    /// Returns true if the given name is bound to anything.
    pub fn is_defined(&self, name: &str) -> bool {
        self.consts.contains_key(name) || self.vars.contains_key(name)
    }

    /// Returns all built-in functions with a name similar to the given name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<String> {
        funcs::ALL
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        let ctxt = Ctxt::default();
        assert_eq!(ctxt.get_const("pi"), Some(Value::Real(std::f64::consts::PI)));
        assert!(ctxt.is_const("i"));
        assert!(!ctxt.is_const("x"));
    }

    #[test]
    fn similar_funcs() {
        let ctxt = Ctxt::default();
        assert_eq!(ctxt.get_similar_funcs("sqr"), vec!["sqrt".to_string()]);
        assert!(ctxt.get_similar_funcs("frobnicate").is_empty());
    }
}
