pub mod trace_ctx;
