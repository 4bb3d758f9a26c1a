//! Built-in functions.
//!
//! Resolved by name after the environment chain misses, so user bindings
//! shadow them. All builtins are pure: they return fresh values and never
//! touch their arguments in place.

use std::rc::Rc;

use crate::interpreter::error::RuntimeError;
use crate::interpreter::value::{Object, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Len,
    First,
    Last,
    Rest,
    Push,
}

impl BuiltinFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Len => "len",
            Self::First => "first",
            Self::Last => "last",
            Self::Rest => "rest",
            Self::Push => "push",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "len" => Some(Self::Len),
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            "rest" => Some(Self::Rest),
            "push" => Some(Self::Push),
            _ => None,
        }
    }

    pub fn apply(self, args: &[Value]) -> Value {
        match self {
            Self::Len => {
                if let Err(error) = check_arity(args, 1) {
                    return error;
                }
                match &*args[0] {
                    Object::Str(value) => Object::integer(value.len() as i64),
                    Object::Array(elements) => Object::integer(elements.len() as i64),
                    other => unsupported_argument(self, other),
                }
            }
            Self::First => {
                if let Err(error) = check_arity(args, 1) {
                    return error;
                }
                match &*args[0] {
                    Object::Array(elements) => elements
                        .first()
                        .map(Rc::clone)
                        .unwrap_or_else(Object::null),
                    other => unsupported_argument(self, other),
                }
            }
            Self::Last => {
                if let Err(error) = check_arity(args, 1) {
                    return error;
                }
                match &*args[0] {
                    Object::Array(elements) => elements
                        .last()
                        .map(Rc::clone)
                        .unwrap_or_else(Object::null),
                    other => unsupported_argument(self, other),
                }
            }
            Self::Rest => {
                if let Err(error) = check_arity(args, 1) {
                    return error;
                }
                match &*args[0] {
                    Object::Array(elements) => {
                        if elements.is_empty() {
                            Object::null()
                        } else {
                            Object::array(elements[1..].to_vec())
                        }
                    }
                    other => unsupported_argument(self, other),
                }
            }
            Self::Push => {
                if let Err(error) = check_arity(args, 2) {
                    return error;
                }
                match &*args[0] {
                    Object::Array(elements) => {
                        let mut pushed = elements.clone();
                        pushed.push(Rc::clone(&args[1]));
                        Object::array(pushed)
                    }
                    other => unsupported_argument(self, other),
                }
            }
        }
    }
}

fn check_arity(args: &[Value], want: usize) -> Result<(), Value> {
    if args.len() == want {
        Ok(())
    } else {
        Err(Object::error(RuntimeError::WrongArgumentCount {
            want,
            got: args.len(),
        }))
    }
}

fn unsupported_argument(builtin: BuiltinFunction, got: &Object) -> Value {
    Object::error(RuntimeError::UnsupportedArgument {
        name: builtin.name(),
        got: got.type_name(),
    })
}
