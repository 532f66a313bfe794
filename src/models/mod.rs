pub mod category;
pub mod product;
pub mod validation;

pub use category::*;
pub use product::*;
