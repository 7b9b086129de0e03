mod common;
mod properties;
mod validation;
