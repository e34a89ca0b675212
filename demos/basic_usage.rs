//! Basic logger usage example
//!
//! Demonstrates console output, threshold filtering and mixed fragments.
//!
//! Run with: cargo run --example basic_usage

use sinklog::prelude::*;
use sinklog::{info, warning};

fn main() -> Result<()> {
    println!("=== sinklog - Basic Usage Example ===\n");

    let logger = Logger::new();
    logger.add_sink(ConsoleSink::new());

    const TAG: &str = "tag";

    println!("1. Logging at every level (threshold INFO, debug stays hidden):");
    logger.emergency(TAG, &[&"emergency"]);
    logger.alert(TAG, &[&"alert"]);
    logger.critical(TAG, &[&"critical"]);
    logger.error(TAG, &[&"error"]);
    logger.warning(TAG, &[&"warning"]);
    logger.notice(TAG, &[&"notice"]);
    logger.info(TAG, &[&"info"]);
    logger.debug(TAG, &[&"debug"]);

    println!("\n2. Mixing strings and numbers:");
    info!(logger, TAG, "int: ", 42, ", double: ", 3.14, ", string: ", TAG);

    println!("\n3. Raising the threshold to ERROR:");
    logger.set_threshold(Severity::Error);
    warning!(logger, TAG, "x (hidden)");
    logger.critical(TAG, &[&"y (visible)"]);

    #[cfg(unix)]
    {
        println!("\n4. Adding a system log sink:");
        logger.add_sink(SyslogSink::new(
            "sinklog-demo",
            SyslogOptions::PID | SyslogOptions::NO_DELAY,
            SyslogFacility::User,
        )?);
        logger.error(TAG, &[&"sent to console and syslog"]);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
