//! Area-editing and state-management core for a map application.
//!
//! This crate owns everything between the map gestures and the storage row:
//! the draw-vs-view mode machine, the tap-to-toggle polygon editor, the
//! viewport-fitting math, the persisted point-list codec, and the reactive
//! store that ties them together. The host application is responsible only
//! for rendering (tiles, markers, polygons, dialogs) and for wiring gestures
//! to [`store::AppStateStore`] methods; it observes results through the
//! store's watch channels.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Reactive state container composing everything below |
//! | [`geo`] | Geographic points, great-circle distance, proximity |
//! | [`draft`] | The in-progress polygon and its toggle editing rule |
//! | [`mode`] | Viewing/Drawing state machine |
//! | [`camera`] | Viewport-fit directives for the presentation layer |
//! | [`codec`] | Point-list ⇄ persisted JSON string |
//! | [`db`] | SQLite pool and migrations for the bundled repository |
//! | [`services`] | Area repository and place-search collaborators |
//! | [`consts`] | Shared numeric constants (threshold, zoom, padding) |

pub mod camera;
pub mod codec;
pub mod consts;
pub mod db;
pub mod draft;
pub mod geo;
pub mod mode;
pub mod services;
pub mod store;

pub use camera::CameraDirective;
pub use draft::DraftPolygon;
pub use geo::GeoPoint;
pub use mode::Mode;
pub use store::{AppStateStore, Area};
