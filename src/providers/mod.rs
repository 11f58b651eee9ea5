pub mod assets_api;
pub mod util;

pub use assets_api::AssetsApiProvider;
