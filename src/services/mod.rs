pub mod ai;
#[cfg(test)]
pub(crate) mod http_stub;
pub mod inbox;
pub mod json_file;
pub mod knowledge;
pub mod messaging;
pub mod pipeline;
pub mod schedule;
pub mod structured_log;
pub mod tools;
