//! Client-side flows for the PCB board generation page.
//!
//! The [`Controller`] owns the per-page [`Session`] and drives the board
//! server through a [`BoardApi`], reporting progress through a [`BoardView`].
//! Both seams are traits so the flows run the same in the browser and in
//! native tests.

pub mod api;
pub mod controller;
pub mod error;
pub mod session;
pub mod types;

pub use api::BoardApi;
pub use controller::{BoardView, Controller, NoticeKind};
pub use error::{ApiError, FlowError};
pub use session::{FlowId, Phase, Session};
pub use types::{download_file_name, Endpoints, FileNameRequest, PathResponse};
