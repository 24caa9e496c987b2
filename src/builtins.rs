//! The builtin functions of the `Base` module.
//!
//! Every interpreter starts with a small set of host functions installed in `Base`, unless
//! the runtime is built with [`RuntimeBuilder::without_base`]. Builtins raise host
//! exceptions when they're called with arguments they don't support, those exceptions
//! propagate to the caller like any other error.
//!
//! [`RuntimeBuilder::without_base`]: crate::runtime::builder::RuntimeBuilder::without_base

use log::debug;

use crate::{
    array::ArrayRef,
    error::{Exception, ExceptionKind, VelarsResult},
    function::Function,
    module::Module,
    value::Value,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Builtin {
    Add,
    Sub,
    Mul,
    Abs,
    Sqrt,
    Length,
    Sum,
    Println,
    Transpose,
    Identity,
}

impl Builtin {
    const ALL: [Builtin; 10] = [
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Abs,
        Builtin::Sqrt,
        Builtin::Length,
        Builtin::Sum,
        Builtin::Println,
        Builtin::Transpose,
        Builtin::Identity,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Abs => "abs",
            Builtin::Sqrt => "sqrt",
            Builtin::Length => "length",
            Builtin::Sum => "sum",
            Builtin::Println => "println",
            Builtin::Transpose => "transpose",
            Builtin::Identity => "identity",
        }
    }
}

pub(crate) fn install(base: &Module) {
    for builtin in Builtin::ALL {
        base.set_global(builtin.name(), Value::Function(Function::builtin(builtin)));
    }

    debug!("installed {} builtins in Base", Builtin::ALL.len());
}

pub(crate) fn invoke(builtin: Builtin, args: &[Value]) -> VelarsResult<Value> {
    match builtin {
        Builtin::Add => arithmetic(builtin, args, i64::wrapping_add, |a, b| a + b),
        Builtin::Sub => arithmetic(builtin, args, i64::wrapping_sub, |a, b| a - b),
        Builtin::Mul => mul(args),
        Builtin::Abs => abs(args),
        Builtin::Sqrt => sqrt(args),
        Builtin::Length => length(args),
        Builtin::Sum => sum(args),
        Builtin::Println => println_values(args),
        Builtin::Transpose => transpose(args),
        Builtin::Identity => identity(args),
    }
}

fn raise<T>(kind: ExceptionKind, msg: String) -> VelarsResult<T> {
    Err(Exception::new(kind, msg))?
}

fn expect_arity(builtin: Builtin, expected: usize, args: &[Value]) -> VelarsResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        raise(
            ExceptionKind::ArgumentError,
            format!(
                "{} expects {} argument(s), got {}",
                builtin.name(),
                expected,
                args.len()
            ),
        )
    }
}

fn arithmetic(
    builtin: Builtin,
    args: &[Value],
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> VelarsResult<Value> {
    expect_arity(builtin, 2, args)?;
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(*a, *b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_op(*a as f64, *b))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_op(*a, *b as f64))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(*a, *b))),
        (a, b) => raise(
            ExceptionKind::TypeError,
            format!(
                "{} is not defined for {} and {}",
                builtin.name(),
                a.type_name(),
                b.type_name()
            ),
        ),
    }
}

fn mul(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Mul, 2, args)?;

    // Strings concatenate with `*`.
    if let (Value::Str(a), Value::Str(b)) = (&args[0], &args[1]) {
        return Ok(Value::Str(format!("{}{}", a, b)));
    }

    arithmetic(Builtin::Mul, args, i64::wrapping_mul, |a, b| a * b)
}

fn abs(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Abs, 1, args)?;
    match &args[0] {
        Value::Int(i) => Ok(Value::Int(i.wrapping_abs())),
        Value::Float(v) => Ok(Value::Float(v.abs())),
        other => raise(
            ExceptionKind::TypeError,
            format!("abs is not defined for {}", other.type_name()),
        ),
    }
}

fn sqrt(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Sqrt, 1, args)?;
    let v = match &args[0] {
        Value::Int(i) => *i as f64,
        Value::Float(v) => *v,
        other => {
            return raise(
                ExceptionKind::TypeError,
                format!("sqrt is not defined for {}", other.type_name()),
            )
        }
    };

    // sqrt of a negative number raises instead of returning NaN.
    if v < 0.0 {
        raise(
            ExceptionKind::DomainError,
            format!("sqrt requires a non-negative argument, got {}", v),
        )
    } else {
        Ok(Value::Float(v.sqrt()))
    }
}

fn length(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Length, 1, args)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(list) => Ok(Value::Int(list.len() as i64)),
        Value::Array(array) => Ok(Value::Int(array.len() as i64)),
        other => raise(
            ExceptionKind::TypeError,
            format!("length is not defined for {}", other.type_name()),
        ),
    }
}

fn sum(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Sum, 1, args)?;
    match &args[0] {
        Value::Array(array) => {
            let total: f64 = array.to_narray().as_slice().iter().sum();
            Ok(Value::Float(total))
        }
        Value::List(list) => sum_list(&list.to_vec()),
        other => raise(
            ExceptionKind::TypeError,
            format!("sum is not defined for {}", other.type_name()),
        ),
    }
}

fn sum_list(values: &[Value]) -> VelarsResult<Value> {
    let mut int_sum = 0i64;
    let mut float_sum = 0.0f64;
    let mut saw_float = false;

    for value in values {
        match value {
            Value::Int(i) => int_sum = int_sum.wrapping_add(*i),
            Value::Float(v) => {
                saw_float = true;
                float_sum += *v;
            }
            other => {
                return raise(
                    ExceptionKind::TypeError,
                    format!(
                        "sum is not defined for a list containing {}",
                        other.type_name()
                    ),
                )
            }
        }
    }

    if saw_float {
        Ok(Value::Float(float_sum + int_sum as f64))
    } else {
        Ok(Value::Int(int_sum))
    }
}

fn println_values(args: &[Value]) -> VelarsResult<Value> {
    let mut line = String::new();
    for (i, value) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&value.to_string());
    }

    println!("{}", line);
    Ok(Value::Nothing)
}

fn transpose(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Transpose, 1, args)?;
    match &args[0] {
        Value::Array(array) => Ok(Value::Array(ArrayRef::new(array.to_narray().transposed()))),
        other => raise(
            ExceptionKind::TypeError,
            format!("transpose is not defined for {}", other.type_name()),
        ),
    }
}

fn identity(args: &[Value]) -> VelarsResult<Value> {
    expect_arity(Builtin::Identity, 1, args)?;
    Ok(args[0].clone())
}
