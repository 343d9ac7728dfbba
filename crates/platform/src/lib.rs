//! Platform layer: file fetching and the background load session.
//!
//! The asset crate never does I/O. This crate fetches the OBJ, its material
//! libraries and texture images on worker threads, feeds the results back into
//! the model over a channel, and hands the flattened mesh to the render loop.

pub mod fetch;
pub mod session;

pub use fetch::{Fetcher, FsFetcher, MemoryFetcher};
pub use session::{Session, Status};
