//! Tree-walking evaluator for the checker language.

use std::collections::HashMap;

use crate::checker::ast::{BinaryOp, DefStmt, Expr, Program, Stmt, UnaryOp};
use crate::checker::value::Value;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("name '{0}' is not defined")]
    Undefined(String),

    #[error("function '{name}' expects {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("unsupported operation: {0}")]
    TypeError(String),

    #[error("function '{0}' is not defined")]
    UnknownFunction(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("'{ty}' has no method '{method}'")]
    UnknownMethod { ty: &'static str, method: String },
}

type Env = HashMap<String, Value>;
type Functions = HashMap<String, DefStmt>;

/// Evaluates `function` defined in `program`, bound to `args` in order.
pub fn call(program: &Program, function: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let mut functions = Functions::new();
    for stmt in &program.stmts {
        if let Stmt::Def(def) = stmt {
            functions.insert(def.name.clone(), def.clone());
        }
    }

    invoke(&functions, function, args)
}

fn invoke(functions: &Functions, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let def = functions
        .get(name)
        .ok_or_else(|| RuntimeError::UnknownFunction(name.to_string()))?;

    if def.params.len() != args.len() {
        return Err(RuntimeError::WrongArity {
            name: name.to_string(),
            expected: def.params.len(),
            got: args.len(),
        });
    }

    let mut env = Env::new();
    for (param, arg) in def.params.iter().zip(args) {
        env.insert(param.clone(), arg);
    }

    let mut functions = functions.clone();
    match eval_block(&def.body, &mut env, &mut functions)? {
        Some(value) => Ok(value),
        None => Ok(Value::None),
    }
}

fn eval_block(
    stmts: &[Stmt],
    env: &mut Env,
    functions: &mut Functions,
) -> Result<Option<Value>, RuntimeError> {
    for stmt in stmts {
        match stmt {
            Stmt::Def(def) => {
                functions.insert(def.name.clone(), def.clone());
            }
            Stmt::Let(let_stmt) => {
                let value = eval_expr(&let_stmt.value, env, functions)?;
                env.insert(let_stmt.name.clone(), value);
            }
            Stmt::Expr(expr) => {
                eval_expr(expr, env, functions)?;
            }
            Stmt::Return(expr) => {
                let value = eval_expr(expr, env, functions)?;
                return Ok(Some(value));
            }
            Stmt::If(if_stmt) => {
                let cond = eval_expr(&if_stmt.cond, env, functions)?;
                let branch = if cond.is_truthy() {
                    Some(&if_stmt.then_block)
                } else {
                    if_stmt.else_block.as_ref()
                };

                if let Some(block) = branch {
                    if let Some(value) = eval_block(block, env, functions)? {
                        return Ok(Some(value));
                    }
                }
            }
        }
    }

    Ok(None)
}

fn eval_expr(expr: &Expr, env: &Env, functions: &Functions) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ident(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::Undefined(name.clone())),
        Expr::Unary(op, inner) => {
            let value = eval_expr(inner, env, functions)?;
            eval_unary(*op, value)
        }
        Expr::Binary(op, lhs, rhs) => {
            if matches!(op, BinaryOp::And | BinaryOp::Or) {
                let lhs_val = eval_expr(lhs, env, functions)?;
                let lhs_truthy = lhs_val.is_truthy();
                return match (op, lhs_truthy) {
                    (BinaryOp::And, false) => Ok(lhs_val),
                    (BinaryOp::And, true) => eval_expr(rhs, env, functions),
                    (BinaryOp::Or, true) => Ok(lhs_val),
                    (BinaryOp::Or, false) => eval_expr(rhs, env, functions),
                    _ => unreachable!(),
                };
            }

            let lhs_val = eval_expr(lhs, env, functions)?;
            let rhs_val = eval_expr(rhs, env, functions)?;
            eval_binary(*op, lhs_val, rhs_val)
        }
        Expr::Call { callee, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_expr(arg, env, functions)?);
            }
            eval_call(callee, values, functions)
        }
        Expr::MethodCall {
            receiver,
            method,
            args,
        } => {
            let receiver = eval_expr(receiver, env, functions)?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_expr(arg, env, functions)?);
            }
            eval_method(receiver, method, values)
        }
    }
}

fn eval_unary(op: UnaryOp, value: Value) -> Result<Value, RuntimeError> {
    match (op, value) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Int(i)) => Ok(Value::Int(-i)),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Neg, other) => Err(RuntimeError::TypeError(format!(
            "cannot negate {}",
            other.type_name()
        ))),
    }
}

fn eval_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
    use BinaryOp::*;

    match op {
        Eq => return Ok(Value::Bool(lhs == rhs)),
        Ne => return Ok(Value::Bool(lhs != rhs)),
        _ => {}
    }

    if matches!(op, Lt | Le | Gt | Ge) {
        if let (Value::Str(a), Value::Str(b)) = (&lhs, &rhs) {
            let ordering = a.cmp(b);
            return Ok(Value::Bool(match op {
                Lt => ordering.is_lt(),
                Le => ordering.is_le(),
                Gt => ordering.is_gt(),
                Ge => ordering.is_ge(),
                _ => unreachable!(),
            }));
        }
    }

    if op == Add {
        if let (Value::Str(a), Value::Str(b)) = (&lhs, &rhs) {
            return Ok(Value::Str(format!("{a}{b}")));
        }
    }

    let a = lhs
        .as_f64()
        .ok_or_else(|| RuntimeError::TypeError(format!("cannot use {} in arithmetic", lhs.type_name())))?;
    let b = rhs
        .as_f64()
        .ok_or_else(|| RuntimeError::TypeError(format!("cannot use {} in arithmetic", rhs.type_name())))?;

    let numeric_result = match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a / b
        }
        Mod => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a % b
        }
        Lt => return Ok(Value::Bool(a < b)),
        Le => return Ok(Value::Bool(a <= b)),
        Gt => return Ok(Value::Bool(a > b)),
        Ge => return Ok(Value::Bool(a >= b)),
        Eq | Ne | And | Or => unreachable!(),
    };

    if matches!((&lhs, &rhs), (Value::Int(_), Value::Int(_))) && matches!(op, Add | Sub | Mul) {
        Ok(Value::Int(numeric_result as i64))
    } else {
        Ok(Value::Float(numeric_result))
    }
}

fn eval_call(name: &str, mut args: Vec<Value>, functions: &Functions) -> Result<Value, RuntimeError> {
    match name {
        "float" => {
            expect_arity(name, &args, 1)?;
            let v = args.remove(0);
            v.as_f64()
                .map(Value::Float)
                .ok_or_else(|| RuntimeError::TypeError(format!("cannot convert {} to float", v.type_name())))
        }
        "int" => {
            expect_arity(name, &args, 1)?;
            let v = args.remove(0);
            v.as_f64()
                .map(|f| Value::Int(f as i64))
                .ok_or_else(|| RuntimeError::TypeError(format!("cannot convert {} to int", v.type_name())))
        }
        "str" => {
            expect_arity(name, &args, 1)?;
            Ok(Value::Str(args.remove(0).to_string()))
        }
        "round" => {
            if args.is_empty() || args.len() > 2 {
                return Err(RuntimeError::WrongArity {
                    name: name.to_string(),
                    expected: 1,
                    got: args.len(),
                });
            }
            let value = args[0]
                .as_f64()
                .ok_or_else(|| RuntimeError::TypeError("round() requires a number".into()))?;
            let digits = if args.len() == 2 {
                match args[1] {
                    Value::Int(i) => i as i32,
                    _ => return Err(RuntimeError::TypeError("round() digits must be an int".into())),
                }
            } else {
                0
            };
            let factor = 10f64.powi(digits);
            let rounded = (value * factor).round() / factor;
            if digits <= 0 {
                Ok(Value::Int(rounded as i64))
            } else {
                Ok(Value::Float(rounded))
            }
        }
        "abs" => {
            expect_arity(name, &args, 1)?;
            match &args[0] {
                Value::Int(i) => Ok(Value::Int(i.abs())),
                Value::Float(f) => Ok(Value::Float(f.abs())),
                other => Err(RuntimeError::TypeError(format!(
                    "abs() requires a number, got {}",
                    other.type_name()
                ))),
            }
        }
        "len" => {
            expect_arity(name, &args, 1)?;
            match &args[0] {
                Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
                Value::List(items) => Ok(Value::Int(items.len() as i64)),
                other => Err(RuntimeError::TypeError(format!(
                    "len() requires str or list, got {}",
                    other.type_name()
                ))),
            }
        }
        "min" | "max" => {
            expect_arity(name, &args, 2)?;
            let a = args[0]
                .as_f64()
                .ok_or_else(|| RuntimeError::TypeError(format!("{name}() requires numbers")))?;
            let b = args[1]
                .as_f64()
                .ok_or_else(|| RuntimeError::TypeError(format!("{name}() requires numbers")))?;
            let pick_a = if name == "min" { a <= b } else { a >= b };
            Ok(if pick_a { args[0].clone() } else { args[1].clone() })
        }
        _ => invoke(functions, name, args),
    }
}

fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<(), RuntimeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::WrongArity {
            name: name.to_string(),
            expected,
            got: args.len(),
        })
    }
}

fn eval_method(receiver: Value, method: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let Value::Str(s) = receiver else {
        return Err(RuntimeError::UnknownMethod {
            ty: receiver.type_name(),
            method: method.to_string(),
        });
    };

    match method {
        "strip" => Ok(Value::Str(s.trim().to_string())),
        "lower" => Ok(Value::Str(s.to_lowercase())),
        "upper" => Ok(Value::Str(s.to_uppercase())),
        "split" => {
            let sep = match args.first() {
                Some(Value::Str(sep)) => sep.clone(),
                None => " ".to_string(),
                Some(other) => {
                    return Err(RuntimeError::TypeError(format!(
                        "split() separator must be a str, got {}",
                        other.type_name()
                    )))
                }
            };
            let parts = if sep == " " {
                s.split_whitespace().map(|p| Value::Str(p.to_string())).collect()
            } else {
                s.split(sep.as_str()).map(|p| Value::Str(p.to_string())).collect()
            };
            Ok(Value::List(parts))
        }
        other => Err(RuntimeError::UnknownMethod {
            ty: "str",
            method: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::lexer::lex;
    use crate::checker::parser::parse;

    fn program(src: &str) -> Program {
        parse(lex(src).unwrap()).unwrap()
    }

    #[test]
    fn evaluates_equality_checker() {
        let p = program("def checker(right_value, value) -> bool:\n    return right_value == value\n");
        let result = call(
            &p,
            "checker",
            vec![Value::Str("a".into()), Value::Str("a".into())],
        )
        .unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn evaluates_float_rounding_checker() {
        let p = program(
            "def checker(right_value, value) -> bool:\n    return round(float(value), 2) == float(right_value)\n",
        );
        let result = call(
            &p,
            "checker",
            vec![Value::Str("0.08".into()), Value::Str("0.08".into())],
        )
        .unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn if_else_short_circuits_return() {
        let p = program(
            "def checker(r, v) -> bool:\n    if r == v:\n        return True\n    else:\n        return False\n",
        );
        let result = call(&p, "checker", vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(result, Value::Bool(false));
    }

    #[test]
    fn undefined_name_is_a_runtime_error() {
        let p = program("def checker(r, v) -> bool:\n    return mystery\n");
        let err = call(&p, "checker", vec![Value::Int(1), Value::Int(1)]).unwrap_err();
        assert!(matches!(err, RuntimeError::Undefined(_)));
    }

    #[test]
    fn calling_missing_function_is_a_runtime_error() {
        let p = program("def other(r, v) -> bool:\n    return True\n");
        let err = call(&p, "checker", vec![]).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownFunction(_)));
    }
}
