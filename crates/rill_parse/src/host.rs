//! The boundary to the embedding evaluator.

use std::fmt;

use rill_ir::{Name, Series, Value};

/// Evaluator and variable store the matcher calls out to.
///
/// `Control` is an opaque non-local exit (a throw, a return, a host error)
/// raised while evaluating embedded code. The matcher never interprets it;
/// it unwinds every nested pass and surfaces as [`ParseError::Host`].
///
/// [`ParseError::Host`]: crate::ParseError::Host
pub trait Host {
    type Control: fmt::Debug;

    /// Evaluate a group of code and return its result.
    fn evaluate(&mut self, code: &Series<Value>) -> Result<Value, Self::Control>;

    /// Read a variable.
    fn get(&self, name: Name) -> Option<Value>;

    /// Write a variable.
    fn set(&mut self, name: Name, value: Value);

    /// Cooperative suspension point, called once per rule item.
    fn checkpoint(&mut self) -> Result<(), Self::Control> {
        Ok(())
    }
}

impl<H: Host + ?Sized> Host for &mut H {
    type Control = H::Control;

    fn evaluate(&mut self, code: &Series<Value>) -> Result<Value, Self::Control> {
        (**self).evaluate(code)
    }

    fn get(&self, name: Name) -> Option<Value> {
        (**self).get(name)
    }

    fn set(&mut self, name: Name, value: Value) {
        (**self).set(name, value);
    }

    fn checkpoint(&mut self) -> Result<(), Self::Control> {
        (**self).checkpoint()
    }
}
