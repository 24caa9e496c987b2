//! State of the interpreter.

use std::sync::atomic::{AtomicU8, Ordering};

/// State of the Vela interpreter.
#[repr(u8)]
#[derive(PartialEq, Debug)]
pub enum State {
    /// No interpreter is active.
    Uninit,
    /// An interpreter is active and has been embedded in a Rust application.
    Init,
}

static VELA_STATE: AtomicU8 = AtomicU8::new(State::Uninit as u8);

/// Returns the current state.
pub fn current_state() -> State {
    match VELA_STATE.load(Ordering::Acquire) {
        0 => State::Uninit,
        _ => State::Init,
    }
}

/// Returns `true` if `state` is the current state.
pub fn current_state_is(state: State) -> bool {
    current_state() == state
}

/// Returns `true` if the current state is [`State::Init`].
pub fn is_init() -> bool {
    current_state_is(State::Init)
}

pub(super) fn can_init() -> bool {
    VELA_STATE
        .compare_exchange(
            State::Uninit as u8,
            State::Init as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        )
        .is_ok()
}

pub(super) fn set_exit() {
    VELA_STATE.store(State::Uninit as u8, Ordering::Release);
}
