// HTTP handlers, one module per resource

pub mod labels;
pub mod recipes;
pub mod users;
