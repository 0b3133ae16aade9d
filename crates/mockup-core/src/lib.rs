//! Mockup Core Library
//!
//! Platform-agnostic layer model, hit-testing and gesture handling for the
//! product mockup editor.

pub mod assets;
pub mod catalog;
pub mod color;
pub mod confirm;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod layers;
pub mod mapper;
pub mod model;
pub mod selection;
pub mod session;

pub use assets::{AssetError, AssetResult, BackdropFallback, ImageResource, Upload};
pub use catalog::{CatalogError, Product, ProductView, View};
pub use color::{parse_hex_color, to_hex};
pub use confirm::{ConfirmAction, ConfirmRequest, Confirmer, FixedAnswer};
pub use gesture::{GestureController, GestureState};
pub use hit::{ApproximateMetrics, TextMeasure, hit_test};
pub use input::InputEvent;
pub use layers::{ImageLayer, Layer, LayerId, TextLayer};
pub use mapper::SurfaceGeometry;
pub use model::LayerModel;
pub use selection::{Corner, Handle, SelectionOutline, HANDLE_SIZE};
pub use session::{Session, SessionConfig};
