//! Data-grid state manager with pinned rows and server pagination
//!
//! `pingrid-lib` keeps the view state of an interactive table consistent
//! while rows are fetched page by page from a remote provider: sorting,
//! filtering, pagination, row selection, row pinning, column order,
//! visibility, pinning and sizing. Pinned rows stay on screen with the data
//! captured when they were pinned, even after they leave the fetched page.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use pingrid_lib::column::{ColumnSet, ColumnSpec};
//! use pingrid_lib::gateway::HttpGateway;
//! use pingrid_lib::grid::{Grid, GridIntent};
//! use pingrid_lib::model::FieldConcat;
//! use pingrid_lib::session::GridSession;
//!
//! let columns = ColumnSet::with_controls(
//!     vec![ColumnSpec::new("firstName", 150), ColumnSpec::new("lastName", 150)],
//!     40,
//! )?;
//! let grid = Grid::builder(columns, FieldConcat::new(["firstName", "lastName"])).build()?;
//! let gateway = HttpGateway::new("http://127.0.0.1:3000/api/users")?;
//!
//! let handle = GridSession::spawn(grid, Arc::new(gateway));
//! handle.apply(GridIntent::ToggleSort { column: "lastName".into(), multi: false }).await?;
//! let view = handle.wait_idle().await?;
//! ```

pub mod cache;
pub mod column;
pub mod config;
pub mod error;
pub mod gateway;
pub mod grid;
pub mod model;
pub mod pinning;
pub mod query;
pub mod reorder;
pub mod session;
pub mod state;
pub mod view;

mod response;

pub use error::Error;
pub use grid::Grid;
pub use grid::GridIntent;
pub use response::CacheStamp;
pub use response::CacheStatus;
pub use response::Response;
pub use session::GridHandle;
pub use session::GridSession;
pub use view::GridView;
