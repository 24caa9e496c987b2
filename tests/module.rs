mod util;

use velars::{
    error::{AccessError, TypeError, VelarsError},
    prelude::*,
};

#[test]
fn the_standard_modules_are_always_present() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    assert_eq!(Module::main(&vela).name().as_str(), "Main");
    assert_eq!(Module::base(&vela).name().as_str(), "Base");
    assert!(vela.module("Main").is_ok());
    assert!(vela.module("Base").is_ok());
}

#[test]
fn globals_can_be_set_and_read_back() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();
    let main = Module::main(&vela);

    main.set_global("answer", Value::Int(42));
    assert_eq!(main.global("answer").unwrap().unbox::<i64>().unwrap(), 42);

    main.set_global("answer", Value::from("forty-two"));
    assert_eq!(
        main.global("answer").unwrap().unbox::<String>().unwrap(),
        "forty-two"
    );
}

#[test]
fn missing_globals_are_reported() {
    let _lock = util::serialized();
    let vela = RuntimeBuilder::new().start().unwrap();

    let err = Module::main(&vela).global("missing").err().unwrap();
    match *err {
        VelarsError::AccessError(AccessError::GlobalNotFound { ref name, ref module }) => {
            assert_eq!(name, "missing");
            assert_eq!(module, "Main");
        }
        ref other => panic!("expected a lookup failure, got {:?}", other),
    }
}

#[test]
fn function_lookup_rejects_other_globals() {
    let _lock = util::serialized();
    let vela = util::demo_runtime();
    let example = vela.module("example").unwrap();

    let err = example.function("Pet").err().unwrap();
    assert!(matches!(
        *err,
        VelarsError::TypeError(TypeError::NotAFunction { .. })
    ));
}

#[test]
fn class_lookup_rejects_other_globals() {
    let _lock = util::serialized();
    let vela = util::demo_runtime();
    let example = vela.module("example").unwrap();

    let err = example.class("add").err().unwrap();
    assert!(matches!(
        *err,
        VelarsError::TypeError(TypeError::NotAClass { .. })
    ));

    assert!(example.class("Pet").is_ok());
}

#[test]
fn loaded_classes_describe_themselves() {
    let _lock = util::serialized();
    let vela = util::demo_runtime();

    let pet = vela.module("example").unwrap().class("Pet").unwrap();
    assert_eq!(pet.name().as_str(), "Pet");
    assert_eq!(pet.module().as_str(), "example");
    assert!(pet.is::<util::Pet>());
    assert!(pet.has_method("getName".to_symbol()));
    assert!(!pet.has_method("fly".to_symbol()));

    let complex = vela
        .module("example")
        .unwrap()
        .class("ComplexNumber")
        .unwrap();
    assert!(complex.has_property("magnitude".to_symbol()));
    assert!(!complex.has_property("angle".to_symbol()));
}
