use prolog_ir::{Atom, Environment, Number, Term};
use thiserror::Error;

/// Failure to evaluate a ground arithmetic expression.
///
/// These never surface as Prolog exceptions (there is no throw/catch in
/// scope): the arithmetic and comparison builtins catch every variant
/// here and turn it into a silent failure of the current proof branch,
/// per the error handling design's propagation policy.
#[derive(Debug, Error, PartialEq)]
pub enum ArithError {
    #[error("arguments are not sufficiently instantiated")]
    Unbound,
    #[error("not evaluable: {0}")]
    UnknownAtom(String),
    #[error("not evaluable: {0}/{1}")]
    UnknownFunctor(String, usize),
    #[error("division by zero")]
    DivisionByZero,
    #[error("domain error: {0}")]
    Domain(&'static str),
}

/// Evaluates `term` (dereferenced through `env`) as a ground arithmetic
/// expression, per the evaluable-term grammar: numbers are themselves,
/// `pi`/`e` are the float constants, and the listed binary/unary functors
/// combine recursively evaluated arguments.
pub fn evaluate(term: &Term, env: &Environment) -> Result<Number, ArithError> {
    match env.deref(term) {
        Term::Number(n) => Ok(n),
        Term::Var(_) => Err(ArithError::Unbound),
        Term::Atom(a) => eval_atom(a),
        Term::Compound(c) => {
            let name = prolog_ir::intern::resolve(c.functor);
            match c.args.len() {
                1 => {
                    let x = evaluate(&c.args[0], env)?;
                    eval_unary(&name, x)
                }
                2 => {
                    let x = evaluate(&c.args[0], env)?;
                    let y = evaluate(&c.args[1], env)?;
                    eval_binary(&name, x, y)
                }
                arity => Err(ArithError::UnknownFunctor(name, arity)),
            }
        }
    }
}

fn eval_atom(a: Atom) -> Result<Number, ArithError> {
    let name = prolog_ir::intern::resolve(a);
    match name.as_str() {
        "pi" => Ok(Number::Float(std::f64::consts::PI)),
        "e" => Ok(Number::Float(std::f64::consts::E)),
        _ => Err(ArithError::UnknownAtom(name)),
    }
}

fn eval_unary(name: &str, x: Number) -> Result<Number, ArithError> {
    let f = x.as_f64();
    match name {
        "-" => Ok(negate(x)),
        "abs" => Ok(match x {
            Number::Int(i) => Number::Int(i.abs()),
            Number::Float(v) => Number::Float(v.abs()),
        }),
        "floor" => Ok(Number::Int(f.floor() as i64)),
        "ceil" => Ok(Number::Int(f.ceil() as i64)),
        "sqrt" => {
            if f < 0.0 {
                Err(ArithError::Domain("sqrt of a negative number"))
            } else {
                Ok(Number::Float(f.sqrt()))
            }
        }
        "sin" => Ok(Number::Float(f.sin())),
        "cos" => Ok(Number::Float(f.cos())),
        "tan" => Ok(Number::Float(f.tan())),
        "asin" => Ok(Number::Float(f.asin())),
        "acos" => Ok(Number::Float(f.acos())),
        "atan" => Ok(Number::Float(f.atan())),
        "exp" => Ok(Number::Float(f.exp())),
        "log" | "ln" => {
            if f <= 0.0 {
                Err(ArithError::Domain("log of a non-positive number"))
            } else {
                Ok(Number::Float(f.ln()))
            }
        }
        "log10" => {
            if f <= 0.0 {
                Err(ArithError::Domain("log10 of a non-positive number"))
            } else {
                Ok(Number::Float(f.log10()))
            }
        }
        other => Err(ArithError::UnknownFunctor(other.to_string(), 1)),
    }
}

fn negate(x: Number) -> Number {
    match x {
        Number::Int(i) => Number::Int(-i),
        Number::Float(f) => Number::Float(-f),
    }
}

fn eval_binary(name: &str, a: Number, b: Number) -> Result<Number, ArithError> {
    match name {
        "+" => Ok(numeric_op(a, b, |x, y| x + y, |x, y| x.wrapping_add(y))),
        "-" => Ok(numeric_op(a, b, |x, y| x - y, |x, y| x.wrapping_sub(y))),
        "*" => Ok(numeric_op(a, b, |x, y| x * y, |x, y| x.wrapping_mul(y))),
        "/" => {
            if b.is_zero() {
                return Err(ArithError::DivisionByZero);
            }
            match (a, b) {
                (Number::Int(x), Number::Int(y)) if x % y == 0 => Ok(Number::Int(x / y)),
                _ => Ok(Number::Float(a.as_f64() / b.as_f64())),
            }
        }
        "//" => {
            if b.is_zero() {
                return Err(ArithError::DivisionByZero);
            }
            Ok(Number::Int((a.as_f64() / b.as_f64()).floor() as i64))
        }
        "mod" => {
            if b.is_zero() {
                return Err(ArithError::DivisionByZero);
            }
            match (a, b) {
                (Number::Int(x), Number::Int(y)) => {
                    let r = x % y;
                    let r = if r != 0 && (r < 0) != (y < 0) { r + y } else { r };
                    Ok(Number::Int(r))
                }
                _ => {
                    let (x, y) = (a.as_f64(), b.as_f64());
                    let r = x % y;
                    let r = if r != 0.0 && (r < 0.0) != (y < 0.0) { r + y } else { r };
                    Ok(Number::Float(r))
                }
            }
        }
        "**" | "^" => match (a, b) {
            (Number::Int(x), Number::Int(y)) if y >= 0 => {
                Ok(Number::Int(x.pow(y as u32)))
            }
            _ => Ok(Number::Float(a.as_f64().powf(b.as_f64()))),
        },
        other => Err(ArithError::UnknownFunctor(other.to_string(), 2)),
    }
}

fn numeric_op(a: Number, b: Number, float_op: fn(f64, f64) -> f64, int_op: fn(i64, i64) -> i64) -> Number {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => Number::Int(int_op(x, y)),
        _ => Number::Float(float_op(a.as_f64(), b.as_f64())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: Term) -> Result<Number, ArithError> {
        evaluate(&s, &Environment::new())
    }

    #[test]
    fn operator_precedence_is_irrelevant_once_parsed() {
        // (2+3)*4
        let expr = Term::compound(
            "*",
            vec![Term::compound("+", vec![Term::int(2), Term::int(3)]), Term::int(4)],
        );
        assert_eq!(eval(expr).unwrap(), Number::Int(20));
    }

    #[test]
    fn power_is_right_associative_when_parsed_that_way() {
        // 2^(3^2) = 2^9 = 512
        let inner = Term::compound("^", vec![Term::int(3), Term::int(2)]);
        let expr = Term::compound("^", vec![Term::int(2), inner]);
        assert_eq!(eval(expr).unwrap(), Number::Int(512));
    }

    #[test]
    fn division_by_zero_is_an_error_not_a_panic() {
        let expr = Term::compound("/", vec![Term::int(1), Term::int(0)]);
        assert_eq!(eval(expr).unwrap_err(), ArithError::DivisionByZero);
    }

    #[test]
    fn sqrt_of_negative_is_a_domain_error() {
        let expr = Term::compound("sqrt", vec![Term::int(-1)]);
        assert!(matches!(eval(expr), Err(ArithError::Domain(_))));
    }

    #[test]
    fn unbound_variable_is_an_instantiation_error() {
        let gen = prolog_ir::VarGen::new();
        let x = gen.fresh();
        assert_eq!(eval(Term::Var(x)).unwrap_err(), ArithError::Unbound);
    }
}
