//! Tracing setup with file-based OpenTelemetry span export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK TracerProvider
//!               → OtlpFileExporter → <data dir>/launcher-search-otlp.json
//! ```
//!
//! Each export is one OTLP/JSON document per line. The file rotates into
//! numbered backups once it passes a size limit.
//!
//! The filter level comes from `trace_level` in [`crate::Config`] and
//! defaults to `"info"`. Library code only emits events; installing the
//! subscriber is left to the host via [`init_tracing`].
//!
//! # Modules
//!
//! - [`init`]: subscriber installation
//! - [`exporter`]: the `SpanExporter` and tracer provider
//! - [`otlp_json`]: span to OTLP/JSON encoding
//! - [`rotating_file`]: size-rotated line file

pub mod exporter;
pub mod init;
pub mod otlp_json;
pub mod rotating_file;

pub use exporter::{file_tracer_provider, OtlpFileExporter};
pub use init::{init_tracing, TRACE_FILE_NAME};
pub use rotating_file::{RotatingFile, RotationPolicy};
