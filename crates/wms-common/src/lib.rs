//! Common types shared by the map viewer and the layer API.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod layer;
pub mod tile;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{WmsError, WmsResult};
pub use layer::{LayerInfo, WmsEndpoint};
pub use tile::{TileCoord, TileGrid};
