//! Path handling for confined and native resolution.
//!
//! # Key Concepts
//!
//! ## Sysroot
//!
//! A [`Sysroot`] is the directory a tree of links was copied into. Inside
//! it, an absolute link target like `/usr/lib/libz.so.1` means
//! `<root>/usr/lib/libz.so.1`, never the host's `/usr/lib`.
//!
//! ## Logical paths
//!
//! A [`LogicalPath`] is a location as seen from inside the sysroot: it
//! always starts with `/` and `..` cannot climb above it.
//!
//! ## Normalization
//!
//! [`normalize`] is purely lexical. `clamp_components` applies chroot rules
//! (`/..` is `/`); `resolve_components` rejects escapes instead, for
//! user-supplied paths.
//!
//! ## Native resolution
//!
//! [`canonicalize`] follows links the way the kernel does. Only the
//! materializer uses it.
//!
//! # Examples
//!
//! ```
//! use relink::path::LogicalPath;
//!
//! let logical = LogicalPath::new("/lib/../usr/lib/libfoo.so.1.0");
//! assert_eq!(logical.to_string(), "/usr/lib/libfoo.so.1.0");
//! ```

pub mod canonicalize;
pub mod normalize;
mod sysroot;
mod types;

pub use sysroot::Sysroot;
pub use types::LogicalPath;
