pub mod confidence;
pub mod link;
pub mod statement;

pub use confidence::Confidence;
pub use link::ResponseLink;
pub use statement::Statement;
