mod fields;
mod pipeline;
mod source;
mod timestamp;

pub use pipeline::process;
pub use source::read_rows;
