//! vRealize Operations API model types.

mod link;
mod page_info;
mod resource;
mod resource_key;
mod response;
mod virtual_machine;

pub use link::*;
pub use page_info::*;
pub use resource::*;
pub use resource_key::*;
pub use response::*;
pub use virtual_machine::*;
