// ABOUTME: Value types representing Lisp data structures and expressions

use crate::env::Environment;
use crate::error::EvalError;
use num_bigint::BigInt;
use std::fmt;
use std::rc::Rc;

/// A primitive function: fixed/variadic arity, a docstring, optional
/// examples, and a handler producing a value from an argument vector and
/// the current environment.
pub struct BuiltinSpec {
    pub name: &'static str,
    pub min_arity: usize,
    pub max_arity: Option<usize>,
    pub variadic: bool,
    pub doc: &'static str,
    pub examples: &'static [&'static str],
    pub handler: fn(&[Value], &Rc<Environment>) -> Result<Value, EvalError>,
}

impl fmt::Debug for BuiltinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinSpec")
            .field("name", &self.name)
            .finish()
    }
}

/// A user-defined callable: fixed parameter names, an optional rest
/// parameter, a body that is a proper list of expressions, a captured
/// environment, a macro flag, an optional self-name, and optional docs.
#[derive(Debug)]
pub struct LambdaData {
    pub params: Vec<Rc<str>>,
    pub rest: Option<Rc<str>>,
    pub body: Vec<Value>,
    pub env: Rc<Environment>,
    pub is_macro: bool,
    pub self_name: Option<Rc<str>>,
    pub doc: Option<Vec<String>>,
}

/// The tagged value model: the only primitive data this dialect has.
///
/// Cons cells hold `(car, cdr)` and are never mutated in place, so a plain
/// `Rc` (no `RefCell`) is enough to share them across lists and closures.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Atom(Rc<str>),
    Number(BigInt),
    Cons(Rc<(Value, Value)>),
    Builtin(Rc<BuiltinSpec>),
    Lambda(Rc<LambdaData>),
}

impl Value {
    pub fn atom(name: impl AsRef<str>) -> Value {
        Value::Atom(Rc::from(name.as_ref()))
    }

    pub fn int(n: i64) -> Value {
        Value::Number(BigInt::from(n))
    }

    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Cons(Rc::new((car, cdr)))
    }

    /// Build a proper list from a sequence of values, terminated by Nil.
    pub fn list<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut result = Value::Nil;
        for item in items.into_iter().rev() {
            result = Value::cons(item, result);
        }
        result
    }

    /// The canonical truthy atom `t`.
    pub fn t() -> Value {
        Value::atom("t")
    }

    /// Nil is the sole falsy value; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil)
    }

    pub fn from_bool(b: bool) -> Value {
        if b {
            Value::t()
        } else {
            Value::Nil
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_atom_name(&self) -> Option<&str> {
        match self {
            Value::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_proper_list(&self) -> bool {
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return true,
                Value::Cons(pair) => cur = &pair.1,
                _ => return false,
            }
        }
    }

    /// Collect a proper list into a `Vec`. Errors if the list is improper.
    pub fn list_to_vec(&self) -> Result<Vec<Value>, EvalError> {
        let mut out = Vec::new();
        let mut cur = self.clone();
        loop {
            match cur {
                Value::Nil => return Ok(out),
                Value::Cons(pair) => {
                    out.push(pair.0.clone());
                    cur = pair.1.clone();
                }
                other => {
                    return Err(EvalError::type_error("list", "a proper list", &other));
                }
            }
        }
    }

    /// Length of a proper list, or `None` if it is improper.
    pub fn list_len(&self) -> Option<usize> {
        let mut n = 0;
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return Some(n),
                Value::Cons(pair) => {
                    n += 1;
                    cur = &pair.1;
                }
                _ => return None,
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Atom(_) => "atom",
            Value::Number(_) => "number",
            Value::Cons(_) => "cons",
            Value::Builtin(_) => "builtin",
            Value::Lambda(_) => "lambda",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Cons(a), Value::Cons(b)) => a.0 == b.0 && a.1 == b.1,
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "()"),
            Value::Atom(name) => write!(f, "{}", name),
            Value::Number(n) => write!(f, "{}", n),
            Value::Cons(pair) => {
                write!(f, "(")?;
                write!(f, "{}", pair.0)?;
                let mut cur = &pair.1;
                loop {
                    match cur {
                        Value::Nil => break,
                        Value::Cons(next) => {
                            write!(f, " {}", next.0)?;
                            cur = &next.1;
                        }
                        other => {
                            write!(f, " . {}", other)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Builtin(spec) => write!(f, "<builtin: {}>", spec.name),
            Value::Lambda(data) => {
                write!(f, "(lambda ")?;
                if let Some(name) = &data.self_name {
                    write!(f, "{} ", name)?;
                }
                write!(f, "(")?;
                for (i, p) in data.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", p)?;
                }
                if let Some(rest) = &data.rest {
                    if data.params.is_empty() {
                        write!(f, "{}", rest)?;
                    } else {
                        write!(f, " . {}", rest)?;
                    }
                }
                write!(f, ")")?;
                for expr in &data.body {
                    write!(f, " {}", expr)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_displays_as_empty_parens() {
        assert_eq!(format!("{}", Value::Nil), "()");
    }

    #[test]
    fn nil_equals_nil_but_not_the_atom() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_ne!(Value::Nil, Value::atom("()"));
    }

    #[test]
    fn number_displays_as_decimal() {
        assert_eq!(format!("{}", Value::int(42)), "42");
        assert_eq!(format!("{}", Value::int(-7)), "-7");
    }

    #[test]
    fn proper_list_displays_without_dot() {
        let v = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
        assert_eq!(format!("{}", v), "(1 2 3)");
    }

    #[test]
    fn improper_list_displays_dotted() {
        let v = Value::cons(Value::int(1), Value::int(2));
        assert_eq!(format!("{}", v), "(1 . 2)");
    }

    #[test]
    fn nested_list_display() {
        let inner = Value::list(vec![Value::int(2), Value::int(3)]);
        let v = Value::list(vec![Value::int(1), inner, Value::int(4)]);
        assert_eq!(format!("{}", v), "(1 (2 3) 4)");
    }

    #[test]
    fn builtins_equal_by_name_lambdas_by_identity() {
        let spec_a = Rc::new(BuiltinSpec {
            name: "+",
            min_arity: 0,
            max_arity: None,
            variadic: true,
            doc: "",
            examples: &[],
            handler: |_, _| Ok(Value::Nil),
        });
        let spec_b = Rc::new(BuiltinSpec {
            name: "+",
            min_arity: 0,
            max_arity: None,
            variadic: true,
            doc: "",
            examples: &[],
            handler: |_, _| Ok(Value::Nil),
        });
        assert_eq!(Value::Builtin(spec_a), Value::Builtin(spec_b));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(Value::int(0).is_truthy());
        assert!(Value::t().is_truthy());
    }

    #[test]
    fn list_to_vec_round_trips() {
        let v = Value::list(vec![Value::int(1), Value::int(2)]);
        let items = v.list_to_vec().unwrap();
        assert_eq!(items, vec![Value::int(1), Value::int(2)]);
    }

    #[test]
    fn improper_list_rejects_list_to_vec() {
        let v = Value::cons(Value::int(1), Value::int(2));
        assert!(v.list_to_vec().is_err());
    }
}
