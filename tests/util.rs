//! Support code shared by the integration tests.
//!
//! Only one interpreter can be active per process, so every test takes the lock
//! returned by [`serialized`] before starting one and holds it until its interpreter
//! has been dropped again.

#![allow(dead_code)]

use parking_lot::{Mutex, MutexGuard};
use velars::prelude::*;

static INTERPRETER: Mutex<()> = Mutex::new(());

/// Takes the process-wide interpreter lock.
pub fn serialized() -> MutexGuard<'static, ()> {
    INTERPRETER.lock()
}

pub struct Pet {
    pub name: String,
}

pub struct MyStruct {
    pub data: i64,
}

#[derive(Clone)]
pub struct ComplexNumber {
    pub real: f64,
    pub imag: f64,
}

impl ComplexNumber {
    pub fn magnitude(&self) -> f64 {
        (self.real * self.real + self.imag * self.imag).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub struct Circle {
    pub radius: f64,
    pub center: Point,
}

/// Builds the demo extension module used throughout the integration tests.
pub fn demo_module() -> ModuleBuilder {
    let mut table = ModuleBuilder::new("example");
    table
        .function("add", |i: i64, j: i64| i + j)
        .function("say", |name: String| format!("Hello, {}!", name));

    table
        .class::<Pet>("Pet")
        .constructor(|name: String| Pet { name })
        .method("getName", |pet: &Pet| pet.name.clone())
        .method_mut("setName", |pet: &mut Pet, name: String| {
            pet.name = name;
        })
        .finish();

    table
        .class::<MyStruct>("MyStruct")
        .constructor(|data: i64| MyStruct { data })
        .method("getData", |this: &MyStruct| this.data)
        .method_mut("setData", |this: &mut MyStruct, data: i64| {
            this.data = data;
        })
        .finish();

    table
        .class::<ComplexNumber>("ComplexNumber")
        .constructor(|real: f64, imag: f64| ComplexNumber { real, imag })
        .property_rw(
            "real",
            |c: &ComplexNumber| c.real,
            |c: &mut ComplexNumber, real: f64| c.real = real,
        )
        .property_rw(
            "imag",
            |c: &ComplexNumber| c.imag,
            |c: &mut ComplexNumber, imag: f64| c.imag = imag,
        )
        .property("magnitude", ComplexNumber::magnitude)
        .method("getMagnitude", ComplexNumber::magnitude)
        .method_mut("setReal", |c: &mut ComplexNumber, real: f64| c.real = real)
        .method_mut("setImag", |c: &mut ComplexNumber, imag: f64| c.imag = imag)
        .finish();

    table
        .class::<Point>("Point")
        .constructor(|x: f64, y: f64| Point { x, y })
        .property("x", |p: &Point| p.x)
        .property("y", |p: &Point| p.y)
        .finish();

    table
        .class::<Circle>("Circle")
        .constructor(|radius: f64, center: Exposed<Point>| Circle {
            radius,
            center: center.0,
        })
        .property("radius", |c: &Circle| c.radius)
        .property("center", |c: &Circle| Exposed(c.center.clone()))
        .finish();

    table
}

/// Starts an interpreter with the demo module loaded.
pub fn demo_runtime() -> Vela {
    RuntimeBuilder::new()
        .with_module(demo_module())
        .start()
        .unwrap()
}
