//! # prefixtree
//!
//! A compressed prefix (radix) tree for path-like keys such as URLs or
//! `service/method` names.
//!
//! Lookups return the value of the most specific registered key that is a
//! prefix of the requested one, so a service-level registration answers for
//! every method under it unless the method has its own entry.
//!
//! ## Example
//!
//! ```rust
//! use prefixtree::PrefixTree;
//!
//! let mut tree: PrefixTree<u32> = PrefixTree::new();
//! tree.add("/greeter.Greeter", 1);
//! tree.add("/greeter.Greeter/SayHello", 2);
//!
//! assert_eq!(tree.lookup("/greeter.Greeter/SayHello"), Some(&2));
//! assert_eq!(tree.lookup("/greeter.Greeter/SayGoodbye"), Some(&1));
//! assert_eq!(tree.lookup("/other.Service/Call"), None);
//!
//! // Removal only clears the value; cleanup prunes what is left behind.
//! assert_eq!(tree.remove("/greeter.Greeter/SayHello"), Some(2));
//! assert_eq!(tree.lookup("/greeter.Greeter/SayHello"), Some(&1));
//! tree.cleanup();
//!
//! assert!(tree.try_add("/unset", None).is_err());
//! ```

#![deny(unsafe_code)]

mod config;
mod debug;
mod error;
mod iter;
mod node;
mod sync;
mod tree;

pub use config::Config;
pub use error::{Error, Result};
pub use iter::{Entries, Iter, NodeView};
pub use node::{Node, NodeKind};
pub use sync::SafePrefixTree;
pub use tree::PrefixTree;

#[cfg(test)]
mod proptests;
