pub mod chart;
pub mod fetcher;
pub mod inputs;
pub mod metrics;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;
