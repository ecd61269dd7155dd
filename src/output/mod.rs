// Card rendering and writing

pub mod cards;
pub mod templates;

pub use cards::CardWriter;
pub use templates::{CardTemplate, DEFAULT_TEMPLATE};
