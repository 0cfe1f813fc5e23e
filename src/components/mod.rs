//! Editing components shared by the shell: undo/redo history and the tool
//! dispatch state machine.

pub mod history;
pub mod tools;
