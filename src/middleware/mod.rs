/*
 * Responsibility
 * - Cross-cutting HTTP middleware for the demo server (request id, tracing, limits)
 */
pub mod http;
