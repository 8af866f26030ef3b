pub(crate) mod migrate;
pub(crate) mod serve;
pub(crate) mod token;
