pub(crate) mod mask;
pub(crate) mod pipeline;
pub(crate) mod settings;
