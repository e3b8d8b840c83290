pub mod descriptor;
pub mod naming;

pub use descriptor::*;
pub use naming::*;
