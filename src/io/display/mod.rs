//! Plain-text rendering of analysis and optimization reports.

mod report;
