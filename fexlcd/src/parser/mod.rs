pub mod fex;

pub use fex::{read_section, Document, FexValue, SectionRecord};
