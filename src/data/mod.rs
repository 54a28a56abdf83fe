pub mod card;
pub mod enemy;
pub mod import;
pub mod registry;
pub mod validate;
