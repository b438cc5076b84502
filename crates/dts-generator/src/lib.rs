//! Stage (b) of css-modules-dts: from an export table to declaration text.
//!
//! Takes the [`CssExportsWithSourceMap`](css_exports::CssExportsWithSourceMap)
//! produced by the extraction stage and synthesizes the `.d.ts` text a host
//! serves to the type checker: a default-export dictionary typed over the
//! raw class names, one named binding per valid spelling, and optionally a
//! line-accurate layout that places each binding on the stylesheet line its
//! class was declared on, so "go to definition" lands in the right place.

mod locate;
mod synthesize;
mod transforms;

pub use locate::locate;
pub use synthesize::{create_dts_exports, DtsError};
pub use transforms::class_name_transform;
