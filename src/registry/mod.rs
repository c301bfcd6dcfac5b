//! Tag-keyed stores for the resources a scene draws with.
//!
//! Both registries are filled once while a scene is prepared and are torn down as a whole.

pub mod materials;
pub mod textures;

pub use materials::*;
pub use textures::*;
