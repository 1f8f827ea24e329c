//! Cron jobs that run alongside the HTTP server.
//!
//! - `job_sweep` - Re-queues pending job records lost by a restart

pub mod job_sweep;

#[cfg(test)]
mod test;
