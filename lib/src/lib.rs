mod lttb;
mod payload;
mod reporters;
mod sample;
mod series;

pub use lttb::*;
pub use payload::*;
pub use reporters::*;
pub use sample::*;
pub use series::*;
