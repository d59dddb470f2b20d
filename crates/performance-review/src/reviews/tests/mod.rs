mod authorized;
mod common;
