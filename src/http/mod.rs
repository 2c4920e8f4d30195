pub mod redact_middleware;
