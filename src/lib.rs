mod tileset;
mod map;
mod parse;
mod write;
mod validate;
mod diff;
mod refcheck;
mod util;

pub use tileset::*;
pub use map::*;
pub use parse::*;
pub use write::*;
pub use validate::*;
pub use diff::*;
pub use refcheck::*;
pub use util::*;
