mod util;

use velars::{error::ExceptionKind, prelude::*};

#[test]
fn sqrt_evaluates_at_the_native_call_site() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    let sqrt = Module::base(&vela).function("sqrt").unwrap();
    let root = sqrt.call1(Value::Float(2.0)).unwrap();

    assert_eq!(root.unbox::<f64>().unwrap(), std::f64::consts::SQRT_2);
}

#[test]
fn host_exceptions_surface_without_aborting() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    let sqrt = Module::base(&vela).function("sqrt").unwrap();

    let err = sqrt.call1(Value::Float(-1.0)).err().unwrap();
    let exception = err.as_exception().unwrap();
    assert_eq!(exception.kind(), ExceptionKind::DomainError);

    // The interpreter stays usable after a caught exception.
    let root = sqrt.call1(Value::Float(4.0)).unwrap();
    assert_eq!(root.unbox::<f64>().unwrap(), 2.0);
}

#[test]
fn arithmetic_follows_the_numeric_tower() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();
    let base = Module::base(&vela);

    let add = base.function("+").unwrap();
    let sum = add.call2(Value::Int(1), Value::Int(2)).unwrap();
    assert_eq!(sum.unbox::<i64>().unwrap(), 3);

    let sum = add.call2(Value::Int(1), Value::Float(2.5)).unwrap();
    assert_eq!(sum.unbox::<f64>().unwrap(), 3.5);

    let sub = base.function("-").unwrap();
    let difference = sub.call2(Value::Int(1), Value::Int(3)).unwrap();
    assert_eq!(difference.unbox::<i64>().unwrap(), -2);

    let abs = base.function("abs").unwrap();
    let magnitude = abs.call1(Value::Int(-3)).unwrap();
    assert_eq!(magnitude.unbox::<i64>().unwrap(), 3);
}

#[test]
fn strings_concatenate_with_mul() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    let mul = Module::base(&vela).function("*").unwrap();
    let joined = mul.call2(Value::from("ab"), Value::from("cd")).unwrap();

    assert_eq!(joined.unbox::<String>().unwrap(), "abcd");
}

#[test]
fn length_counts_characters_and_elements() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();
    let length = Module::base(&vela).function("length").unwrap();

    let chars = length.call1(Value::from("héllo")).unwrap();
    assert_eq!(chars.unbox::<i64>().unwrap(), 5);

    let items = List::from_vec(vec![Value::Int(1), Value::Int(2)]);
    let count = length.call1(Value::from(items)).unwrap();
    assert_eq!(count.unbox::<i64>().unwrap(), 2);
}

#[test]
fn sum_spans_lists_and_arrays() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();
    let sum = Module::base(&vela).function("sum").unwrap();

    let items = List::from_vec(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    let total = sum.call1(Value::from(items)).unwrap();
    assert_eq!(total.unbox::<i64>().unwrap(), 6);

    let array = ArrayRef::new(NArray::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap());
    let total = sum.call1(Value::from(array)).unwrap();
    assert_eq!(total.unbox::<f64>().unwrap(), 10.0);
}

#[test]
fn transpose_swaps_the_matrix_axes() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    let array = ArrayRef::new(NArray::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap());
    let transpose = Module::base(&vela).function("transpose").unwrap();

    let transposed = transpose
        .call1(Value::from(array.clone()))
        .unwrap()
        .unbox::<ArrayRef>()
        .unwrap();

    assert!(!transposed.same_storage(&array));
    assert_eq!(transposed.get(0, 1).unwrap(), 3.0);
    assert_eq!(transposed.get(1, 0).unwrap(), 2.0);
}

#[test]
fn identity_returns_its_argument_unchanged() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    let array = ArrayRef::new(NArray::vector(vec![1.0, 2.0]));
    let identity = Module::base(&vela).function("identity").unwrap();

    let echoed = identity
        .call1(Value::from(array.clone()))
        .unwrap()
        .unbox::<ArrayRef>()
        .unwrap();

    assert!(echoed.same_storage(&array));
}

#[test]
fn builtins_raise_for_bad_arguments() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();
    let base = Module::base(&vela);

    let err = base
        .function("sqrt")
        .unwrap()
        .call2(Value::Float(1.0), Value::Float(2.0))
        .err()
        .unwrap();
    assert_eq!(
        err.as_exception().unwrap().kind(),
        ExceptionKind::ArgumentError
    );

    let err = base.function("abs").unwrap().call1(Value::from("x")).err().unwrap();
    assert_eq!(err.as_exception().unwrap().kind(), ExceptionKind::TypeError);
}
