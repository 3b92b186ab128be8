mod notes;
mod operation;
mod time;

pub use self::{notes::*, operation::*, time::*};
