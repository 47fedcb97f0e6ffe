#![cfg_attr(docsrs, doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, deny(missing_docs))]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;
#[cfg(test)]
extern crate std;

#[macro_use]
pub(crate) mod util;

pub mod error;
pub mod list;
pub mod queue;
pub mod slist;
pub mod stack;

#[doc(inline)]
pub use error::{AllocError, Full};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::Queue;
#[doc(inline)]
pub use stack::Stack;
