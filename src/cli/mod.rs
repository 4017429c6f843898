pub(crate) mod args;
pub(crate) mod settings;

pub(crate) use args::Cli;
pub(crate) use settings::{Settings, mask_secret};
