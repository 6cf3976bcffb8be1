pub mod common;
pub mod err;
pub mod extract;
pub mod feedback;
pub mod labels;
pub mod projects;
