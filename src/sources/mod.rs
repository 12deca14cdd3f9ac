//! @ai:module:intent Tool artifacts: identifiers, location and format-level parsing
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolKind, ResultReader, RawToolOutput, RunLocator

pub mod locator;
pub mod reader;
pub mod tool;

pub use locator::RunLocator;
pub use reader::{RawToolOutput, ResultReader, ResultReaderTrait};
pub use tool::ToolKind;
