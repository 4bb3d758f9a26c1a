//! Tree-walking evaluator.
//!
//! Statements evaluate to `Option<Value>` (`let` is value-less); expressions
//! always produce a value. Three invariants hold across every compound form:
//! errors short-circuit in source order, blocks pass `ReturnValue` wrappers
//! through untouched, and programs and call applications unwrap a
//! `ReturnValue` exactly once.

pub mod env;
pub mod error;
pub mod value;

use std::rc::Rc;

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::builtins::BuiltinFunction;
use env::{Env, Environment};
use error::RuntimeError;
use value::{Object, Value};

/// Evaluate a whole program. The first `ReturnValue` is unwrapped and
/// returned; the first `Error` is returned unchanged; otherwise the result
/// is the last statement's value.
pub fn eval_program(program: &Program, env: &Env) -> Option<Value> {
    let mut result = None;
    for statement in &program.statements {
        result = eval_statement(statement, env);
        if let Some(Object::ReturnValue(inner)) = result.as_deref() {
            return Some(Rc::clone(inner));
        }
        if matches!(result.as_deref(), Some(Object::Error(_))) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Option<Value> {
    match statement {
        Statement::Let { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return Some(value);
            }
            env.borrow_mut().set(name.name.clone(), value);
            None
        }
        Statement::Return { value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return Some(value);
            }
            Some(Object::return_value(value))
        }
        Statement::Expression(expression) => Some(eval_expression(expression, env)),
    }
}

/// Blocks keep `ReturnValue` wrapped so an enclosing program or call
/// application unwraps it once.
fn eval_block(block: &BlockStatement, env: &Env) -> Option<Value> {
    let mut result = None;
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(
            result.as_deref(),
            Some(Object::ReturnValue(_) | Object::Error(_))
        ) {
            return result;
        }
    }
    result
}

fn eval_expression(expression: &Expression, env: &Env) -> Value {
    match expression {
        Expression::IntegerLiteral(value) => Object::integer(*value),
        Expression::Boolean(value) => Object::boolean(*value),
        Expression::StringLiteral(value) => Object::string(value.clone()),
        Expression::ArrayLiteral(elements) => match eval_expressions(elements, env) {
            Ok(elements) => Object::array(elements),
            Err(error) => error,
        },
        Expression::Identifier(identifier) => eval_identifier(identifier, env),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(*operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(*operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral { parameters, body } => {
            Object::function(parameters.clone(), body.clone(), Rc::clone(env))
        }
        Expression::Call {
            function,
            arguments,
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }
            let arguments = match eval_expressions(arguments, env) {
                Ok(arguments) => arguments,
                Err(error) => return error,
            };
            apply_function(function, arguments)
        }
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
    }
}

fn eval_identifier(identifier: &Identifier, env: &Env) -> Value {
    if let Some(value) = env.borrow().get(&identifier.name) {
        return value;
    }
    if let Some(builtin) = BuiltinFunction::from_name(&identifier.name) {
        return Object::builtin(builtin);
    }
    Object::error(RuntimeError::IdentifierNotFound {
        name: identifier.name.clone(),
    })
}

fn eval_prefix_expression(operator: PrefixOperator, right: Value) -> Value {
    match operator {
        PrefixOperator::Bang => Object::boolean(!right.is_truthy()),
        PrefixOperator::Neg => match &*right {
            Object::Integer(value) => Object::integer(value.wrapping_neg()),
            _ => Object::error(RuntimeError::UnknownPrefixOperator {
                operator,
                right: right.type_name(),
            }),
        },
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Value, right: Value) -> Value {
    if let (Object::Integer(left), Object::Integer(right)) = (&*left, &*right) {
        return eval_integer_infix_expression(operator, *left, *right);
    }
    match operator {
        // Reference identity; agrees with value equality for the boolean
        // and null singletons.
        InfixOperator::Eq => Object::boolean(Rc::ptr_eq(&left, &right)),
        InfixOperator::NotEq => Object::boolean(!Rc::ptr_eq(&left, &right)),
        _ if left.type_name() != right.type_name() => {
            Object::error(RuntimeError::TypeMismatch {
                left: left.type_name(),
                operator,
                right: right.type_name(),
            })
        }
        _ => Object::error(RuntimeError::UnknownInfixOperator {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        }),
    }
}

/// Arithmetic wraps on overflow; division by zero is an error value rather
/// than a host panic.
fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> Value {
    match operator {
        InfixOperator::Plus => Object::integer(left.wrapping_add(right)),
        InfixOperator::Minus => Object::integer(left.wrapping_sub(right)),
        InfixOperator::Asterisk => Object::integer(left.wrapping_mul(right)),
        InfixOperator::Slash => {
            if right == 0 {
                Object::error(RuntimeError::DivisionByZero)
            } else {
                Object::integer(left.wrapping_div(right))
            }
        }
        InfixOperator::Lt => Object::boolean(left < right),
        InfixOperator::Gt => Object::boolean(left > right),
        InfixOperator::Eq => Object::boolean(left == right),
        InfixOperator::NotEq => Object::boolean(left != right),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Env,
) -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block(consequence, env).unwrap_or_else(Object::null)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env).unwrap_or_else(Object::null)
    } else {
        Object::null()
    }
}

/// Left-to-right; the first error aborts the whole list.
fn eval_expressions(expressions: &[Expression], env: &Env) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let value = eval_expression(expression, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply_function(function: Value, arguments: Vec<Value>) -> Value {
    match &*function {
        Object::Function(function) => {
            if arguments.len() != function.parameters.len() {
                return Object::error(RuntimeError::WrongArgumentCount {
                    want: function.parameters.len(),
                    got: arguments.len(),
                });
            }
            let env = Environment::enclosed(Rc::clone(&function.env));
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                env.borrow_mut().set(parameter.name.clone(), argument);
            }
            match eval_block(&function.body, &env) {
                Some(value) => unwrap_return_value(value),
                None => Object::null(),
            }
        }
        Object::Builtin(builtin) => builtin.apply(&arguments),
        _ => Object::error(RuntimeError::NotAFunction {
            type_name: function.type_name(),
        }),
    }
}

fn unwrap_return_value(value: Value) -> Value {
    if let Object::ReturnValue(inner) = &*value {
        return Rc::clone(inner);
    }
    value
}

/// Index expressions cover arrays with integer indices; anything out of
/// range (negative included) is `null`.
fn eval_index_expression(left: Value, index: Value) -> Value {
    match (&*left, &*index) {
        (Object::Array(elements), Object::Integer(index)) => usize::try_from(*index)
            .ok()
            .and_then(|index| elements.get(index))
            .map(Rc::clone)
            .unwrap_or_else(Object::null),
        _ => Object::error(RuntimeError::IndexNotSupported {
            type_name: left.type_name(),
        }),
    }
}
