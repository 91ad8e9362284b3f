//! The dependency graph core.
//!
//! [`Tree`] holds configuration and drives a resolve; [`Pkg`] is one package
//! node and carries the recursive resolution algorithm; [`ResolveSession`]
//! holds the per-call caches (the expanded-name set and the metadata cache).
//!
//! ## Resolution flow
//!
//! ```text
//! Tree::resolve(name)
//!     │  fresh root Pkg, fresh ResolveSession, default importer if unset
//!     ▼
//! Pkg::resolve(importer, tree, session)
//!     │  metadata lookup (session cache → importer)
//!     ▼
//! per candidate import, in declaration order:
//!     mark_expanded ∧ depth limit ∧ internal policy  →  recurse or leaf
//! ```

mod error;
mod pkg;
mod session;
mod tree;

pub use error::GraphError;
pub use pkg::Pkg;
pub use session::ResolveSession;
pub use tree::Tree;
