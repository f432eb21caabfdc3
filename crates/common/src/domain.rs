mod actor;
mod group;
mod group_template;
mod result;
mod rights;
mod scope_target;
mod wiki_gateway;
mod wiki_space;

pub use actor::*;
pub use group::*;
pub use group_template::*;
pub use result::*;
pub use rights::*;
pub use scope_target::*;
pub use wiki_gateway::*;
pub use wiki_space::*;
