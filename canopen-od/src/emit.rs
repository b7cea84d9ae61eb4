// Boundary to whatever applies the compiled actions to a runtime node

use std::convert::Infallible;

use crate::action::Action;

/// Applies compiled actions, one at a time, in the order they are given
pub trait Emitter {
    type Error: std::error::Error + 'static;

    fn emit(&mut self, action: &Action) -> Result<(), Self::Error>;
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    type Error = E::Error;

    fn emit(&mut self, action: &Action) -> Result<(), Self::Error> {
        (**self).emit(action)
    }
}

/// Keeps every emitted action in memory
#[derive(Debug, Default)]
pub struct ActionRecorder {
    actions: Vec<Action>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

impl Emitter for ActionRecorder {
    type Error = Infallible;

    fn emit(&mut self, action: &Action) -> Result<(), Self::Error> {
        self.actions.push(action.clone());
        Ok(())
    }
}
