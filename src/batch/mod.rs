//! Batch module running SteamCMD over an identifier list.
//!
//! - `invoker` - the [`BatchInvoker`] loop with per-item failure isolation
//! - `summary` - per-identifier [`Summary`] and [`Status`]
//!
//! ```rust,no_run
//! use zomboid_workshop::batch::BatchInvoker;
//! use zomboid_workshop::{Identifier, Layout, PlatformProfile};
//!
//! # async fn example() -> zomboid_workshop::Result<()> {
//! let invoker = BatchInvoker::new(PlatformProfile::current()?, Layout::from_current_exe()?)
//!     .on_complete(|summary| println!("{}: {:?}", summary.identifier(), summary.status()));
//! let summaries = invoker.run(&[Identifier::from("2169435993")]).await;
//! # Ok(())
//! # }
//! ```

pub mod invoker;
pub mod summary;

pub use invoker::{BatchInvoker, InvokeCallback};
pub use summary::{Status, Summary};
