use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::builtins::BuiltinFunction;

use super::env::Env;
use super::error::RuntimeError;

/// Runtime value handle. Values are shared, not copied: `==`/`!=` outside
/// the integer fast path compare by reference identity, and the boolean and
/// null singletons below make identity agree with value equality for them.
pub type Value = Rc<Object>;

/// Runtime value model used by the tree-walking evaluator.
#[derive(Debug)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Array(Vec<Value>),
    Null,
    /// Wrapper signaling a fired `return`; unwrapped exactly once at a
    /// program or call boundary.
    ReturnValue(Value),
    Error(RuntimeError),
    Function(Function),
    Builtin(BuiltinFunction),
}

/// User function bundled with the environment active at its literal.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

impl fmt::Debug for Function {
    // The captured environment may (indirectly) contain this function, so
    // it stays out of the debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

thread_local! {
    static TRUE: Value = Rc::new(Object::Boolean(true));
    static FALSE: Value = Rc::new(Object::Boolean(false));
    static NULL: Value = Rc::new(Object::Null);
}

impl Object {
    pub fn integer(value: i64) -> Value {
        Rc::new(Object::Integer(value))
    }

    /// Hand out the shared singleton, never a fresh allocation.
    pub fn boolean(value: bool) -> Value {
        if value {
            TRUE.with(Rc::clone)
        } else {
            FALSE.with(Rc::clone)
        }
    }

    pub fn string(value: impl Into<String>) -> Value {
        Rc::new(Object::Str(value.into()))
    }

    pub fn array(elements: Vec<Value>) -> Value {
        Rc::new(Object::Array(elements))
    }

    pub fn null() -> Value {
        NULL.with(Rc::clone)
    }

    pub fn return_value(inner: Value) -> Value {
        Rc::new(Object::ReturnValue(inner))
    }

    pub fn error(error: RuntimeError) -> Value {
        Rc::new(Object::Error(error))
    }

    pub fn function(parameters: Vec<Identifier>, body: BlockStatement, env: Env) -> Value {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }

    pub fn builtin(builtin: BuiltinFunction) -> Value {
        Rc::new(Object::Builtin(builtin))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
        }
    }

    /// Everything is truthy except `false` and `null`; zero included.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// User-facing rendering of a value.
    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Str(value) => value.clone(),
            Object::Array(elements) => {
                let rendered = elements
                    .iter()
                    .map(|element| element.inspect())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{rendered}]")
            }
            Object::Null => "null".to_string(),
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(error) => format!("ERROR: {error}"),
            Object::Function(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({parameters}) {{\n{}\n}}", function.body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::env::Environment;

    #[test]
    fn booleans_and_null_are_singletons() {
        assert!(Rc::ptr_eq(&Object::boolean(true), &Object::boolean(true)));
        assert!(Rc::ptr_eq(&Object::boolean(false), &Object::boolean(false)));
        assert!(Rc::ptr_eq(&Object::null(), &Object::null()));
        assert!(!Rc::ptr_eq(&Object::boolean(true), &Object::boolean(false)));
    }

    #[test]
    fn fresh_strings_are_distinct_references() {
        assert!(!Rc::ptr_eq(&Object::string("a"), &Object::string("a")));
    }

    #[test]
    fn truthiness_covers_the_singletons_and_zero() {
        assert!(Object::integer(0).is_truthy());
        assert!(Object::string("").is_truthy());
        assert!(Object::boolean(true).is_truthy());
        assert!(!Object::boolean(false).is_truthy());
        assert!(!Object::null().is_truthy());
    }

    #[test]
    fn inspect_forms() {
        assert_eq!(Object::integer(-3).inspect(), "-3");
        assert_eq!(Object::boolean(true).inspect(), "true");
        assert_eq!(Object::string("hi").inspect(), "hi");
        assert_eq!(Object::null().inspect(), "null");
        assert_eq!(
            Object::array(vec![Object::integer(1), Object::integer(2)]).inspect(),
            "[1, 2]"
        );
        assert_eq!(
            Object::return_value(Object::integer(7)).inspect(),
            "7"
        );
        assert_eq!(
            Object::error(RuntimeError::IdentifierNotFound {
                name: "x".to_string()
            })
            .inspect(),
            "ERROR: identifier not found: x"
        );
    }

    #[test]
    fn inspect_renders_function_with_body() {
        use crate::ast::{Expression, InfixOperator, Statement};

        let body = BlockStatement {
            statements: vec![Statement::Expression(Expression::Infix {
                left: Box::new(Expression::Identifier(Identifier {
                    name: "x".to_string(),
                })),
                operator: InfixOperator::Plus,
                right: Box::new(Expression::IntegerLiteral(2)),
            })],
        };
        let function = Object::function(
            vec![Identifier {
                name: "x".to_string(),
            }],
            body,
            Environment::new(),
        );
        assert_eq!(function.inspect(), "fn(x) {\n(x + 2)\n}");
    }
}
